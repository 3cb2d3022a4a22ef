use super::interpolate::*;

#[test]
fn test_lin_interp() {
    assert_eq!(lin_interp(1.0, 3.0, 0.5), 2.0);
    assert_eq!(lin_interp(0.0, 10.0, 0.3), 3.0);
    assert_eq!(lin_interp(5.0, 15.0, 0.0), 5.0);
    assert_eq!(lin_interp(5.0, 15.0, 1.0), 15.0);
}

#[test]
fn test_bilinear_point_plane() {
    // f = 2 + 3*lat - lon is linear, so the fit must reproduce it anywhere
    let lats = [40.0, 40.0, 41.0, 41.0];
    let lons = [250.0, 251.0, 250.0, 251.0];
    let values: Vec<f64> = lats
        .iter()
        .zip(lons.iter())
        .map(|(la, lo)| 2.0 + 3.0 * la - lo)
        .collect();
    let values = [values[0], values[1], values[2], values[3]];

    let result = bilinear_point(&lats, &lons, &values, 40.3, 250.7).unwrap();
    let expected = 2.0 + 3.0 * 40.3 - 250.7;
    assert!((result - expected).abs() < 1e-8);
}

#[test]
fn test_bilinear_point_singular() {
    // All four neighbors on one meridian
    let lats = [40.0, 40.5, 41.0, 41.5];
    let lons = [250.0, 250.0, 250.0, 250.0];
    let values = [1.0, 2.0, 3.0, 4.0];

    let result = bilinear_point(&lats, &lons, &values, 40.7, 250.1);
    assert!(matches!(result, Err(InterpError::SingularGeometry)));
}

#[test]
fn test_interp1d_interior() {
    let xp = [0.0, 1000.0, 2000.0];
    let fp = [300.0, 290.0, 280.0];

    let out = interp1d(&[500.0], &xp, &fp).unwrap();
    assert!((out[0] - 295.0).abs() < 1e-12);
}

#[test]
fn test_interp1d_clamped_ends() {
    let xp = [100.0, 200.0];
    let fp = [10.0, 20.0];

    let out = interp1d(&[0.0, 100.0, 150.0, 200.0, 500.0], &xp, &fp).unwrap();
    assert_eq!(out, vec![10.0, 10.0, 15.0, 20.0, 20.0]);
}

#[test]
fn test_interp1d_empty_profile() {
    let result = interp1d(&[1.0], &[], &[]);
    assert!(matches!(result, Err(InterpError::EmptyProfile)));
}
