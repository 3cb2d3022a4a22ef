use num_traits::Float;
use thiserror::Error;

/// Pivot threshold below which the 4x4 neighbor system is treated as singular
const SINGULARITY_EPS: f64 = 1e-12;

#[derive(Error, Debug)]
pub enum InterpError {
    #[error("singular neighbor geometry: 4-point interpolation system has no unique solution")]
    SingularGeometry,

    #[error("empty profile: no data points to interpolate against")]
    EmptyProfile,

    #[error("abscissa and ordinate lengths differ: {xp} vs {fp}")]
    LengthMismatch { xp: usize, fp: usize },
}

/// Generic linear interpolation between two values
pub fn lin_interp<T: Float>(v0: T, v1: T, fac: T) -> T {
    v0 + (v1 - v0) * fac
}

/// Exact 4-point bilinear functional interpolation.
///
/// Fits `f(lat, lon) = a + b*lat + c*lon + d*lat*lon` through the four
/// neighbor points (4 constraints, 4 unknowns, no least-squares) and
/// evaluates the fitted polynomial at the target location. The four
/// neighbors must span a non-degenerate quadrilateral in lat/lon;
/// collinear or duplicated neighbors make the system singular.
pub fn bilinear_point(
    lats: &[f64; 4],
    lons: &[f64; 4],
    values: &[f64; 4],
    target_lat: f64,
    target_lon: f64,
) -> Result<f64, InterpError> {
    let mut mat = [[0.0_f64; 4]; 4];
    for i in 0..4 {
        mat[i][0] = 1.0;
        mat[i][1] = lats[i];
        mat[i][2] = lons[i];
        mat[i][3] = lats[i] * lons[i];
    }

    let coeffs = solve4(mat, *values)?;

    Ok(coeffs[0]
        + coeffs[1] * target_lat
        + coeffs[2] * target_lon
        + coeffs[3] * target_lat * target_lon)
}

/// Solve a 4x4 linear system in place with partial pivoting.
///
/// Fixed-size Gaussian elimination, no heap allocation; this runs once per
/// variable per pressure level so the per-call cost stays O(1).
fn solve4(mut a: [[f64; 4]; 4], mut b: [f64; 4]) -> Result<[f64; 4], InterpError> {
    for col in 0..4 {
        // Partial pivot: largest magnitude entry in this column
        let mut pivot_row = col;
        for row in (col + 1)..4 {
            if a[row][col].abs() > a[pivot_row][col].abs() {
                pivot_row = row;
            }
        }
        if a[pivot_row][col].abs() < SINGULARITY_EPS {
            return Err(InterpError::SingularGeometry);
        }
        if pivot_row != col {
            a.swap(col, pivot_row);
            b.swap(col, pivot_row);
        }

        for row in (col + 1)..4 {
            let factor = a[row][col] / a[col][col];
            for k in col..4 {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    // Back substitution
    let mut x = [0.0_f64; 4];
    for col in (0..4).rev() {
        let mut sum = b[col];
        for k in (col + 1)..4 {
            sum -= a[col][k] * x[k];
        }
        x[col] = sum / a[col][col];
    }

    Ok(x)
}

/// Piecewise-linear 1-D interpolation with clamped ends.
///
/// Same contract as `numpy.interp`: `xp` is assumed ascending, values of
/// `x_new` below `xp[0]` get `fp[0]` and values above `xp[last]` get
/// `fp[last]` (flat extrapolation, no extended slope). The abscissae are
/// used in the order given; this routine never sorts its input.
pub fn interp1d(x_new: &[f64], xp: &[f64], fp: &[f64]) -> Result<Vec<f64>, InterpError> {
    if xp.is_empty() || fp.is_empty() {
        return Err(InterpError::EmptyProfile);
    }
    if xp.len() != fp.len() {
        return Err(InterpError::LengthMismatch {
            xp: xp.len(),
            fp: fp.len(),
        });
    }

    let last = xp.len() - 1;
    let mut out = Vec::with_capacity(x_new.len());

    for &x in x_new {
        if x <= xp[0] {
            out.push(fp[0]);
            continue;
        }
        if x >= xp[last] {
            out.push(fp[last]);
            continue;
        }

        // Binary search for the bracketing interval
        let mut left = 0;
        let mut right = last;
        while right - left > 1 {
            let mid = (left + right) / 2;
            if xp[mid] <= x {
                left = mid;
            } else {
                right = mid;
            }
        }

        let span = xp[right] - xp[left];
        if span.abs() < f64::EPSILON {
            out.push(fp[left]);
        } else {
            let fac = (x - xp[left]) / span;
            out.push(lin_interp(fp[left], fp[right], fac));
        }
    }

    Ok(out)
}
