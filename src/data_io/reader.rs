use super::{PressureLevelGrid, SurfaceGrid};
use chrono::{DateTime, TimeZone, Utc};
use ndarray::{Array1, Array2, Array3};
use std::path::Path;
use thiserror::Error;

/// Accepted names for the vertical coordinate of the pressure-level subset,
/// tried in order
pub const VERTICAL_COORD_ALIASES: [&str; 2] = ["isobaricInhPa", "pressure"];

#[derive(Error, Debug)]
pub enum ReaderError {
    #[error("NetCDF error: {0}")]
    Netcdf(#[from] netcdf::Error),

    #[error("Variable not found: {0}")]
    MissingVariable(String),

    #[error("Vertical coordinate not found, tried: {0}")]
    MissingCoordinate(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid timestamp: {0}")]
    DateTimeError(String),

    #[error("Unexpected array shape for {0}: {1:?}")]
    ShapeError(String, Vec<usize>),
}

fn open_file(path: &Path) -> Result<netcdf::File, ReaderError> {
    if !path.exists() {
        return Err(ReaderError::FileNotFound(
            path.to_string_lossy().to_string(),
        ));
    }
    Ok(netcdf::open(path)?)
}

fn read_1d(file: &netcdf::File, name: &str) -> Result<Array1<f64>, ReaderError> {
    let var = file
        .variable(name)
        .ok_or_else(|| ReaderError::MissingVariable(name.to_string()))?;
    let data = var.get_values::<f64, _>(..)?;
    Ok(Array1::from_vec(data))
}

fn read_2d(file: &netcdf::File, name: &str) -> Result<Array2<f64>, ReaderError> {
    let var = file
        .variable(name)
        .ok_or_else(|| ReaderError::MissingVariable(name.to_string()))?;
    let shape: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();
    if shape.len() != 2 {
        return Err(ReaderError::ShapeError(name.to_string(), shape));
    }
    let data = var.get_values::<f64, _>(..)?;
    Array2::from_shape_vec((shape[0], shape[1]), data)
        .map_err(|_| ReaderError::ShapeError(name.to_string(), shape))
}

fn read_3d(file: &netcdf::File, name: &str) -> Result<Array3<f64>, ReaderError> {
    let var = file
        .variable(name)
        .ok_or_else(|| ReaderError::MissingVariable(name.to_string()))?;
    let shape: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();
    if shape.len() != 3 {
        return Err(ReaderError::ShapeError(name.to_string(), shape));
    }
    let data = var.get_values::<f64, _>(..)?;
    Array3::from_shape_vec((shape[0], shape[1], shape[2]), data)
        .map_err(|_| ReaderError::ShapeError(name.to_string(), shape))
}

/// Read the file's valid time, stored as seconds since the Unix epoch
fn read_valid_time(file: &netcdf::File) -> Result<DateTime<Utc>, ReaderError> {
    let var = file
        .variable("valid_time")
        .ok_or_else(|| ReaderError::MissingVariable("valid_time".to_string()))?;
    let seconds = var.get_value::<f64, _>(..)?;
    Utc.timestamp_opt(seconds as i64, 0)
        .single()
        .ok_or_else(|| ReaderError::DateTimeError(format!("{} seconds since epoch", seconds)))
}

/// Resolve the pressure-level coordinate through the alias list
fn read_levels(file: &netcdf::File) -> Result<Array1<f64>, ReaderError> {
    for alias in VERTICAL_COORD_ALIASES {
        if file.variable(alias).is_some() {
            return read_1d(file, alias);
        }
    }
    Err(ReaderError::MissingCoordinate(
        VERTICAL_COORD_ALIASES.join(", "),
    ))
}

/// Read one hour of fetched pressure-level output (`t`, `gh`, `r` on
/// `[level, y, x]` with 2-D `latitude`/`longitude`)
pub fn read_pressure_grid(path: &Path) -> Result<PressureLevelGrid, ReaderError> {
    let file = open_file(path)?;

    Ok(PressureLevelGrid {
        latitude: read_2d(&file, "latitude")?,
        longitude: read_2d(&file, "longitude")?,
        levels: read_levels(&file)?,
        temperature: read_3d(&file, "t")?,
        geopotential_height: read_3d(&file, "gh")?,
        relative_humidity: read_3d(&file, "r")?,
        valid_time: read_valid_time(&file)?,
    })
}

/// Read one hour of fetched surface output (`blh`, `t2m`, `r2`, `sp` on
/// `[y, x]`)
pub fn read_surface_grid(path: &Path) -> Result<SurfaceGrid, ReaderError> {
    let file = open_file(path)?;

    Ok(SurfaceGrid {
        latitude: read_2d(&file, "latitude")?,
        longitude: read_2d(&file, "longitude")?,
        pbl_height: read_2d(&file, "blh")?,
        temp_2m: read_2d(&file, "t2m")?,
        rh_2m: read_2d(&file, "r2")?,
        surface_pressure: read_2d(&file, "sp")?,
        valid_time: read_valid_time(&file)?,
    })
}
