use super::{
    AltitudeProfile, HourError, HourlyRecord, PressureProfile, RecordMetadata, SurfaceScalars,
};
use crate::config::Config;
use crate::data_io::{PressureLevelGrid, SurfaceGrid, PRESSURE_LEVEL_VARS, SURFACE_VARS};
use crate::grid::{flatten_pressure_grid, flatten_surface_grid, select_neighbors, GridCell};
use crate::math::interpolate::{bilinear_point, interp1d};
use std::collections::HashMap;

/// Interpolate one variable at one level index across the 4 neighbors
fn interpolate_level(
    neighbors: &[&GridCell; 4],
    var: &str,
    level_idx: usize,
    target_lat: f64,
    target_lon: f64,
) -> Result<f64, HourError> {
    let mut lats = [0.0; 4];
    let mut lons = [0.0; 4];
    let mut values = [0.0; 4];
    for (slot, cell) in neighbors.iter().enumerate() {
        lats[slot] = cell.latitude;
        lons[slot] = cell.longitude;
        values[slot] = *cell
            .values
            .get(var)
            .and_then(|column| column.get(level_idx))
            .ok_or_else(|| HourError::MissingVariable(var.to_string()))?;
    }
    Ok(bilinear_point(&lats, &lons, &values, target_lat, target_lon)?)
}

/// Horizontally interpolate every pressure-level variable to the target
/// point, one bilinear fit per variable per level. The same 4 neighbors are
/// reused throughout, which keeps the fits consistent across variables.
fn interpolate_pressure_vars(
    neighbors: &[&GridCell; 4],
    n_levels: usize,
    target_lat: f64,
    target_lon: f64,
) -> Result<HashMap<&'static str, Vec<f64>>, HourError> {
    let mut interpolated = HashMap::new();
    for var in PRESSURE_LEVEL_VARS {
        let mut column = Vec::with_capacity(n_levels);
        for k in 0..n_levels {
            column.push(interpolate_level(neighbors, var, k, target_lat, target_lon)?);
        }
        interpolated.insert(var, column);
    }
    Ok(interpolated)
}

/// Horizontally interpolate the surface scalars to the target point
fn interpolate_surface_vars(
    neighbors: &[&GridCell; 4],
    target_lat: f64,
    target_lon: f64,
) -> Result<SurfaceScalars, HourError> {
    let mut scalars = [0.0; 4];
    for (slot, var) in SURFACE_VARS.iter().enumerate() {
        scalars[slot] = interpolate_level(neighbors, var, 0, target_lat, target_lon)?;
    }
    Ok(SurfaceScalars {
        pbl_height: scalars[0],
        temp_2m: scalars[1],
        rh_2m: scalars[2],
        surface_pressure: scalars[3],
    })
}

/// Resample a pressure-level profile onto the fixed altitude grid.
///
/// Geopotential height is the independent coordinate; pressure, temperature
/// and relative humidity are each piecewise-linearly interpolated against it
/// with flat extrapolation outside the profile's height range, so the top
/// and bottom of the column hold the boundary values. The profile is used
/// in its native level order and is never sorted.
pub fn resample_to_altitude(
    profile: &PressureProfile,
    altitude_grid: &[f64],
) -> Result<AltitudeProfile, HourError> {
    let gh = &profile.geopotential_height;
    let pressure = interp1d(altitude_grid, gh, &profile.levels)?;
    let temperature = interp1d(altitude_grid, gh, &profile.temperature)?;
    let relative_humidity = interp1d(altitude_grid, gh, &profile.relative_humidity)?;

    Ok(AltitudeProfile {
        altitudes: altitude_grid.to_vec(),
        pressure,
        temperature,
        relative_humidity,
    })
}

/// Process one model hour: flatten both datasets, pick the 4 nearest cells,
/// interpolate every variable to the target point, resample the column onto
/// the altitude grid and assemble the hourly record.
///
/// Holds no state across calls; running the same inputs twice produces a
/// bit-identical record.
pub fn process_hour(
    config: &Config,
    pressure_grid: &PressureLevelGrid,
    surface_grid: &SurfaceGrid,
) -> Result<HourlyRecord, HourError> {
    // Both files must describe the same model hour or the merged record
    // would mix valid times
    if pressure_grid.valid_time != surface_grid.valid_time {
        return Err(HourError::ValidTimeMismatch {
            pressure: pressure_grid.valid_time,
            surface: surface_grid.valid_time,
        });
    }

    let altitude_grid = config.altitude_grid();
    let target_lat = config.target_lat;
    let target_lon = config.target_lon;

    let pressure_cells = flatten_pressure_grid(pressure_grid)?;
    let pressure_neighbors = select_neighbors(&pressure_cells, target_lat, target_lon)?;

    let surface_cells = flatten_surface_grid(surface_grid)?;
    let surface_neighbors = select_neighbors(&surface_cells, target_lat, target_lon)?;

    let n_levels = pressure_grid.levels.len();
    let mut interpolated =
        interpolate_pressure_vars(&pressure_neighbors, n_levels, target_lat, target_lon)?;
    let surface = interpolate_surface_vars(&surface_neighbors, target_lat, target_lon)?;

    let profile = PressureProfile::new(
        pressure_grid.levels.to_vec(),
        interpolated
            .remove("gh")
            .ok_or_else(|| HourError::MissingVariable("gh".to_string()))?,
        interpolated
            .remove("t")
            .ok_or_else(|| HourError::MissingVariable("t".to_string()))?,
        interpolated
            .remove("r")
            .ok_or_else(|| HourError::MissingVariable("r".to_string()))?,
    )?;

    let altitude_profile = resample_to_altitude(&profile, &altitude_grid)?;

    let metadata = RecordMetadata {
        forecast_hour: config.forecast_hour,
        latitude: target_lat,
        longitude: target_lon,
        instrument_altitude: config.instrument_altitude,
    };

    HourlyRecord::assemble(
        pressure_grid.valid_time,
        profile,
        altitude_profile,
        surface,
        metadata,
        altitude_grid.len(),
        n_levels,
    )
}
