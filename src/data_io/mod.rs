pub mod reader;
pub mod writer;

pub use reader::*;
pub use writer::*;

use chrono::{DateTime, Utc};
use ndarray::{Array1, Array2, Array3};

/// GRIB short names of the pressure-level variables, in processing order
pub const PRESSURE_LEVEL_VARS: [&str; 3] = ["t", "gh", "r"];

/// GRIB short names of the surface variables, in processing order
pub const SURFACE_VARS: [&str; 4] = ["blh", "t2m", "r2", "sp"];

/// One hour of pressure-level model output on the native horizontal mesh.
///
/// Data arrays are laid out `[level, y, x]`; the coordinate arrays carry the
/// per-cell latitude/longitude of the irregular mesh.
#[derive(Debug, Clone)]
pub struct PressureLevelGrid {
    /// Per-cell latitude (degrees north), shape [y, x]
    pub latitude: Array2<f64>,
    /// Per-cell longitude (degrees east, 0-360), shape [y, x]
    pub longitude: Array2<f64>,
    /// Pressure level values (hPa)
    pub levels: Array1<f64>,
    /// Temperature (K), shape [level, y, x]
    pub temperature: Array3<f64>,
    /// Geopotential height (m), shape [level, y, x]
    pub geopotential_height: Array3<f64>,
    /// Relative humidity (%), shape [level, y, x]
    pub relative_humidity: Array3<f64>,
    /// Valid time of this model hour
    pub valid_time: DateTime<Utc>,
}

impl PressureLevelGrid {
    /// Data variables paired with their GRIB short names
    pub fn variables(&self) -> [(&'static str, &Array3<f64>); 3] {
        [
            ("t", &self.temperature),
            ("gh", &self.geopotential_height),
            ("r", &self.relative_humidity),
        ]
    }
}

/// One hour of surface model output on the native horizontal mesh.
#[derive(Debug, Clone)]
pub struct SurfaceGrid {
    /// Per-cell latitude (degrees north), shape [y, x]
    pub latitude: Array2<f64>,
    /// Per-cell longitude (degrees east, 0-360), shape [y, x]
    pub longitude: Array2<f64>,
    /// Planetary boundary layer height (m), shape [y, x]
    pub pbl_height: Array2<f64>,
    /// 2 m temperature (K), shape [y, x]
    pub temp_2m: Array2<f64>,
    /// 2 m relative humidity (%), shape [y, x]
    pub rh_2m: Array2<f64>,
    /// Surface pressure (Pa), shape [y, x]
    pub surface_pressure: Array2<f64>,
    /// Valid time of this model hour
    pub valid_time: DateTime<Utc>,
}

impl SurfaceGrid {
    /// Data variables paired with their GRIB short names
    pub fn variables(&self) -> [(&'static str, &Array2<f64>); 4] {
        [
            ("blh", &self.pbl_height),
            ("t2m", &self.temp_2m),
            ("r2", &self.rh_2m),
            ("sp", &self.surface_pressure),
        ]
    }
}
