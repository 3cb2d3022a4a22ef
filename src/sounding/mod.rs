pub mod extract;

pub use extract::*;

use crate::grid::GridError;
use crate::math::interpolate::InterpError;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Any failure while processing one model hour. The batch loop reports it
/// and moves on to the next hour; nothing is written for a failed hour.
#[derive(Error, Debug)]
pub enum HourError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Interp(#[from] InterpError),

    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("variable '{0}' missing from flattened grid cell")]
    MissingVariable(String),

    #[error("valid time mismatch: pressure-level data at {pressure}, surface data at {surface}")]
    ValidTimeMismatch {
        pressure: DateTime<Utc>,
        surface: DateTime<Utc>,
    },
}

/// Location and instrument metadata attached to every hourly record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordMetadata {
    pub forecast_hour: u32,
    pub latitude: f64,
    pub longitude: f64,
    pub instrument_altitude: f64,
}

/// Interpolated thermodynamic variables on the model's native pressure
/// levels, in the source's level ordering.
#[derive(Debug, Clone, PartialEq)]
pub struct PressureProfile {
    /// Pressure level values (hPa)
    pub levels: Vec<f64>,
    /// Geopotential height of each level (m)
    pub geopotential_height: Vec<f64>,
    /// Temperature at each level (K)
    pub temperature: Vec<f64>,
    /// Relative humidity at each level (%)
    pub relative_humidity: Vec<f64>,
}

impl PressureProfile {
    /// Build a profile, checking that all four arrays cover the same levels.
    /// The vertical resample is ill-defined otherwise.
    pub fn new(
        levels: Vec<f64>,
        geopotential_height: Vec<f64>,
        temperature: Vec<f64>,
        relative_humidity: Vec<f64>,
    ) -> Result<Self, HourError> {
        let n = levels.len();
        if geopotential_height.len() != n || temperature.len() != n || relative_humidity.len() != n
        {
            return Err(HourError::ShapeMismatch(format!(
                "pressure profile arrays disagree: levels {}, gh {}, t {}, rh {}",
                n,
                geopotential_height.len(),
                temperature.len(),
                relative_humidity.len()
            )));
        }
        Ok(Self {
            levels,
            geopotential_height,
            temperature,
            relative_humidity,
        })
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

/// Thermodynamic variables resampled onto the fixed altitude grid
#[derive(Debug, Clone, PartialEq)]
pub struct AltitudeProfile {
    /// Altitude grid (m ASL)
    pub altitudes: Vec<f64>,
    /// Pressure at each altitude (hPa)
    pub pressure: Vec<f64>,
    /// Temperature at each altitude (K)
    pub temperature: Vec<f64>,
    /// Relative humidity at each altitude (%)
    pub relative_humidity: Vec<f64>,
}

/// Interpolated surface-level scalars for one hour
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceScalars {
    /// Planetary boundary layer height (m)
    pub pbl_height: f64,
    /// 2 m temperature (K)
    pub temp_2m: f64,
    /// 2 m relative humidity (%)
    pub rh_2m: f64,
    /// Surface pressure (Pa)
    pub surface_pressure: f64,
}

/// Final output of one successfully processed hour. Immutable once built;
/// the writer persists it and the batch loop drops it before the next hour.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyRecord {
    pub valid_time: DateTime<Utc>,
    pub pressure_profile: PressureProfile,
    pub altitude_profile: AltitudeProfile,
    pub surface: SurfaceScalars,
    pub metadata: RecordMetadata,
}

impl HourlyRecord {
    /// Aggregate the hour's outputs, validating every array against the
    /// declared axis lengths. No computation happens here; this is only
    /// called after all interpolation steps for the hour have succeeded.
    pub fn assemble(
        valid_time: DateTime<Utc>,
        pressure_profile: PressureProfile,
        altitude_profile: AltitudeProfile,
        surface: SurfaceScalars,
        metadata: RecordMetadata,
        n_altitudes: usize,
        n_levels: usize,
    ) -> Result<Self, HourError> {
        if pressure_profile.len() != n_levels {
            return Err(HourError::ShapeMismatch(format!(
                "pressure profile has {} levels, axis declares {}",
                pressure_profile.len(),
                n_levels
            )));
        }
        if altitude_profile.altitudes.len() != n_altitudes
            || altitude_profile.pressure.len() != n_altitudes
            || altitude_profile.temperature.len() != n_altitudes
            || altitude_profile.relative_humidity.len() != n_altitudes
        {
            return Err(HourError::ShapeMismatch(format!(
                "altitude profile arrays disagree with axis length {}",
                n_altitudes
            )));
        }

        Ok(Self {
            valid_time,
            pressure_profile,
            altitude_profile,
            surface,
            metadata,
        })
    }
}
