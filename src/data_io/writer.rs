use crate::sounding::HourlyRecord;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("NetCDF error: {0}")]
    Netcdf(#[from] netcdf::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Variable not found after creation: {0}")]
    MissingVariable(String),
}

/// Write one hourly record as a self-describing NetCDF file.
///
/// Variable names, units and attributes match what the downstream MPD
/// comparison tooling expects; do not rename them. Called only after the
/// whole hour has been processed, so a file on disk is always complete.
pub fn write_hourly_record(path: &Path, record: &HourlyRecord) -> Result<(), WriteError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let altitude = &record.altitude_profile;
    let profile = &record.pressure_profile;
    let n_alt = altitude.altitudes.len();
    let n_lev = profile.levels.len();

    let mut file = netcdf::create(path)?;

    file.add_unlimited_dimension("time")?;
    file.add_dimension("altitude", n_alt)?;
    file.add_dimension("pres_levels", n_lev)?;

    file.add_attribute("forecast_hour", record.metadata.forecast_hour as i32)?;
    file.add_attribute("latitude", record.metadata.latitude)?;
    file.add_attribute("longitude", record.metadata.longitude)?;
    file.add_attribute("lidar_altitude", record.metadata.instrument_altitude)?;

    // Coordinate variables
    {
        let mut time_var = file.add_variable::<f64>("time", &["time"])?;
        time_var.put_attribute("units", "seconds since 1970-01-01 00:00:00")?;
        time_var.put_attribute("description", "time UTC")?;
    }
    {
        let mut alt_var = file.add_variable::<f64>("altitude", &["altitude"])?;
        alt_var.put_attribute("units", "m")?;
        alt_var.put_attribute("description", "altitude ASL")?;
    }
    {
        let mut lev_var = file.add_variable::<f64>("pres_levels", &["pres_levels"])?;
        lev_var.put_attribute("units", "atm")?;
        lev_var.put_attribute("description", "pressure levels represented in the model")?;
    }

    // Altitude-gridded variables (time, altitude)
    let altitude_specs = [
        (
            "Relative_Humidity_HRRR",
            "percent",
            "Altitude and Coordinate interpolated relative humidity from HRRR",
            &altitude.relative_humidity,
        ),
        (
            "Pressure_HRRR",
            "atm",
            "Altitude and Coordinate interpolated pressure from HRRR",
            &altitude.pressure,
        ),
        (
            "Temperature_HRRR",
            "K",
            "Altitude and Coordinate interpolated temperature from HRRR",
            &altitude.temperature,
        ),
    ];

    // Pressure-level variables (time, pres_levels)
    let level_specs = [
        (
            "Geopotential_Height_PresLevel_HRRR",
            "m",
            "Geopotential height of each pressure level in HRRR",
            &profile.geopotential_height,
        ),
        (
            "Temperature_PresLevel_HRRR",
            "K",
            "Temperature at each pressure level in HRRR",
            &profile.temperature,
        ),
        (
            "Relative_Humidity_PresLevel_HRRR",
            "percent",
            "Relative Humidity at each pressure level in HRRR",
            &profile.relative_humidity,
        ),
    ];

    // Surface scalars (time,)
    let surface_specs = [
        (
            "HPBL_HRRR",
            "m",
            "Planetary Boundary Layer Height according to HRRR",
            record.surface.pbl_height,
        ),
        (
            "T_2_meter_HRRR",
            "K",
            "2-meter Temperature according to HRRR",
            record.surface.temp_2m,
        ),
        (
            "RH_2_meter_HRRR",
            "percent",
            "2-meter Relative Humidity according to HRRR",
            record.surface.rh_2m,
        ),
        (
            "Pressure_surface_HRRR",
            "atm",
            "surface pressure according to HRRR",
            record.surface.surface_pressure,
        ),
    ];

    for (name, units, description, _) in &altitude_specs {
        let mut var = file.add_variable::<f64>(name, &["time", "altitude"])?;
        var.put_attribute("units", *units)?;
        var.put_attribute("description", *description)?;
    }
    for (name, units, description, _) in &level_specs {
        let mut var = file.add_variable::<f64>(name, &["time", "pres_levels"])?;
        var.put_attribute("units", *units)?;
        var.put_attribute("description", *description)?;
    }
    for (name, units, description, _) in &surface_specs {
        let mut var = file.add_variable::<f64>(name, &["time"])?;
        var.put_attribute("units", *units)?;
        var.put_attribute("description", *description)?;
    }

    // Write the time coordinate first so the unlimited dimension has length 1
    {
        let mut time_var = file
            .variable_mut("time")
            .ok_or_else(|| WriteError::MissingVariable("time".to_string()))?;
        let seconds = record.valid_time.timestamp() as f64;
        time_var.put_values(&[seconds], ..)?;
    }
    {
        let mut alt_var = file
            .variable_mut("altitude")
            .ok_or_else(|| WriteError::MissingVariable("altitude".to_string()))?;
        alt_var.put_values(&altitude.altitudes, ..)?;
    }
    {
        let mut lev_var = file
            .variable_mut("pres_levels")
            .ok_or_else(|| WriteError::MissingVariable("pres_levels".to_string()))?;
        lev_var.put_values(&profile.levels, ..)?;
    }

    for (name, _, _, data) in &altitude_specs {
        let mut var = file
            .variable_mut(name)
            .ok_or_else(|| WriteError::MissingVariable(name.to_string()))?;
        var.put_values(data.as_slice(), (.., ..))?;
    }
    for (name, _, _, data) in &level_specs {
        let mut var = file
            .variable_mut(name)
            .ok_or_else(|| WriteError::MissingVariable(name.to_string()))?;
        var.put_values(data.as_slice(), (.., ..))?;
    }
    for (name, _, _, value) in &surface_specs {
        let mut var = file
            .variable_mut(name)
            .ok_or_else(|| WriteError::MissingVariable(name.to_string()))?;
        var.put_values(&[*value], ..)?;
    }

    Ok(())
}
