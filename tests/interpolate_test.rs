use hrrr_rust::math::interpolate::{bilinear_point, interp1d, InterpError};

#[test]
fn test_exact_interpolation_at_neighbors() {
    // The fit is exact (4 constraints, 4 unknowns): evaluating at any of the
    // 4 neighbor coordinates must reproduce that neighbor's value
    let lats = [38.01, 38.01, 38.04, 38.04];
    let lons = [242.90, 242.93, 242.90, 242.93];
    let values = [287.3, 287.9, 286.8, 287.1];

    for i in 0..4 {
        let result = bilinear_point(&lats, &lons, &values, lats[i], lons[i]).unwrap();
        assert!(
            (result - values[i]).abs() < 1e-4,
            "neighbor {}: got {}, expected {}",
            i,
            result,
            values[i]
        );
    }
}

#[test]
fn test_bilinear_reproduces_bilinear_field() {
    // A field of the form a + b*lat + c*lon + d*lat*lon is in the model
    // space, so interpolation anywhere must be exact
    let f = |lat: f64, lon: f64| 5.0 - 2.0 * lat + 0.5 * lon + 0.01 * lat * lon;

    let lats = [38.0, 38.0, 38.1, 38.1];
    let lons = [242.8, 242.9, 242.8, 242.9];
    let values = [
        f(lats[0], lons[0]),
        f(lats[1], lons[1]),
        f(lats[2], lons[2]),
        f(lats[3], lons[3]),
    ];

    let result = bilinear_point(&lats, &lons, &values, 38.04, 242.86).unwrap();
    assert!((result - f(38.04, 242.86)).abs() < 1e-4);
}

#[test]
fn test_collinear_neighbors_are_singular() {
    // 4 neighbors sharing one longitude are collinear in lat/lon
    let lats = [38.00, 38.01, 38.02, 38.03];
    let lons = [242.9, 242.9, 242.9, 242.9];
    let values = [1.0, 2.0, 3.0, 4.0];

    let result = bilinear_point(&lats, &lons, &values, 38.015, 242.91);
    assert!(matches!(result, Err(InterpError::SingularGeometry)));
}

#[test]
fn test_duplicate_neighbors_are_singular() {
    let lats = [38.0, 38.0, 38.1, 38.1];
    let lons = [242.9, 242.9, 242.8, 242.8];
    let values = [1.0, 1.0, 2.0, 2.0];

    let result = bilinear_point(&lats, &lons, &values, 38.05, 242.85);
    assert!(matches!(result, Err(InterpError::SingularGeometry)));
}

#[test]
fn test_linear_profile_midpoint() {
    // gh [0, 1000, 2000] m with T [300, 290, 280] K: 500 m resamples to 295 K
    let gh = [0.0, 1000.0, 2000.0];
    let temp = [300.0, 290.0, 280.0];

    let out = interp1d(&[500.0], &gh, &temp).unwrap();
    assert!((out[0] - 295.0).abs() < 1e-12);
}

#[test]
fn test_flat_extrapolation_at_boundaries() {
    // Outside the geopotential height range the boundary value is held
    // constant, never extended along the slope
    let gh = [500.0, 1500.0];
    let temp = [290.0, 283.0];

    let out = interp1d(&[0.0, 250.0, 2000.0, 12_000.0], &gh, &temp).unwrap();
    assert_eq!(out[0], 290.0);
    assert_eq!(out[1], 290.0);
    assert_eq!(out[2], 283.0);
    assert_eq!(out[3], 283.0);
}

#[test]
fn test_mismatched_profile_lengths_rejected() {
    // numpy.interp raises on mismatched array lengths; so do we
    let gh = [0.0, 1000.0, 2000.0];
    let temp = [300.0, 290.0];

    let result = interp1d(&[500.0], &gh, &temp);
    assert!(matches!(
        result,
        Err(InterpError::LengthMismatch { xp: 3, fp: 2 })
    ));
}

#[test]
fn test_single_level_profile_is_constant() {
    // One pressure level at 500 m: every altitude gets that level's value
    let gh = [500.0];
    let temp = [285.0];

    let out = interp1d(&[0.0, 500.0, 1000.0], &gh, &temp).unwrap();
    assert_eq!(out, vec![285.0, 285.0, 285.0]);
}
