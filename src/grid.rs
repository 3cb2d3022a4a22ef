use crate::data_io::{PressureLevelGrid, SurfaceGrid};
use std::collections::HashMap;
use thiserror::Error;

/// Number of horizontal neighbors used for the bilinear fit
pub const NUM_NEIGHBORS: usize = 4;

#[derive(Error, Debug)]
pub enum GridError {
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("insufficient data: need 4 grid cells, found {available}")]
    InsufficientData { available: usize },
}

/// One horizontal grid point after flattening.
///
/// `values` holds one sequence per variable: one entry per pressure level
/// for pressure-level variables, a single entry for surface variables.
/// Identity is the cell's position in the flattened list.
#[derive(Debug, Clone)]
pub struct GridCell {
    pub latitude: f64,
    pub longitude: f64,
    pub values: HashMap<String, Vec<f64>>,
}

/// Flatten the pressure-level dataset into a row-major cell list.
///
/// Pure reshape, no interpolation or filtering. The traversal order is
/// row-major over the two horizontal axes so that flattened indices line up
/// exactly across every variable and level.
pub fn flatten_pressure_grid(grid: &PressureLevelGrid) -> Result<Vec<GridCell>, GridError> {
    let (ny, nx) = grid.latitude.dim();
    if grid.longitude.dim() != (ny, nx) {
        return Err(GridError::ShapeMismatch(format!(
            "latitude {:?} vs longitude {:?}",
            grid.latitude.dim(),
            grid.longitude.dim()
        )));
    }

    let nlev = grid.levels.len();
    for (name, data) in grid.variables() {
        if data.dim() != (nlev, ny, nx) {
            return Err(GridError::ShapeMismatch(format!(
                "variable '{}' has shape {:?}, expected ({}, {}, {})",
                name,
                data.dim(),
                nlev,
                ny,
                nx
            )));
        }
    }

    let mut cells = Vec::with_capacity(ny * nx);
    for j in 0..ny {
        for i in 0..nx {
            let mut values = HashMap::new();
            for (name, data) in grid.variables() {
                let column: Vec<f64> = (0..nlev).map(|k| data[[k, j, i]]).collect();
                values.insert(name.to_string(), column);
            }
            cells.push(GridCell {
                latitude: grid.latitude[[j, i]],
                longitude: grid.longitude[[j, i]],
                values,
            });
        }
    }

    Ok(cells)
}

/// Flatten the surface dataset into a row-major cell list.
pub fn flatten_surface_grid(grid: &SurfaceGrid) -> Result<Vec<GridCell>, GridError> {
    let (ny, nx) = grid.latitude.dim();
    if grid.longitude.dim() != (ny, nx) {
        return Err(GridError::ShapeMismatch(format!(
            "latitude {:?} vs longitude {:?}",
            grid.latitude.dim(),
            grid.longitude.dim()
        )));
    }

    for (name, data) in grid.variables() {
        if data.dim() != (ny, nx) {
            return Err(GridError::ShapeMismatch(format!(
                "variable '{}' has shape {:?}, expected ({}, {})",
                name,
                data.dim(),
                ny,
                nx
            )));
        }
    }

    let mut cells = Vec::with_capacity(ny * nx);
    for j in 0..ny {
        for i in 0..nx {
            let mut values = HashMap::new();
            for (name, data) in grid.variables() {
                values.insert(name.to_string(), vec![data[[j, i]]]);
            }
            cells.push(GridCell {
                latitude: grid.latitude[[j, i]],
                longitude: grid.longitude[[j, i]],
                values,
            });
        }
    }

    Ok(cells)
}

/// Select the 4 cells horizontally closest to the target point.
///
/// Distance is squared planar lat/lon distance with no latitude-dependent
/// longitude scaling or great-circle correction; at HRRR's ~3 km spacing the
/// projection curvature is negligible and the uncorrected metric keeps
/// neighbor selection reproducible. Ties are broken by flattened index
/// (stable sort), so selection is deterministic for a fixed grid.
pub fn select_neighbors<'a>(
    cells: &'a [GridCell],
    target_lat: f64,
    target_lon: f64,
) -> Result<[&'a GridCell; NUM_NEIGHBORS], GridError> {
    if cells.len() < NUM_NEIGHBORS {
        return Err(GridError::InsufficientData {
            available: cells.len(),
        });
    }

    let mut ranked: Vec<(usize, f64)> = cells
        .iter()
        .enumerate()
        .map(|(idx, cell)| {
            let dlat = cell.latitude - target_lat;
            let dlon = cell.longitude - target_lon;
            (idx, dlat * dlat + dlon * dlon)
        })
        .collect();
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));

    Ok([
        &cells[ranked[0].0],
        &cells[ranked[1].0],
        &cells[ranked[2].0],
        &cells[ranked[3].0],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(lat: f64, lon: f64) -> GridCell {
        GridCell {
            latitude: lat,
            longitude: lon,
            values: HashMap::new(),
        }
    }

    #[test]
    fn test_select_neighbors_insufficient() {
        let cells = vec![cell(0.0, 0.0), cell(1.0, 1.0), cell(2.0, 2.0)];
        let result = select_neighbors(&cells, 0.5, 0.5);
        assert!(matches!(
            result,
            Err(GridError::InsufficientData { available: 3 })
        ));
    }

    #[test]
    fn test_select_neighbors_ties_by_index() {
        // Four cells equidistant from the origin plus one far cell
        let cells = vec![
            cell(1.0, 0.0),
            cell(0.0, 1.0),
            cell(-1.0, 0.0),
            cell(0.0, -1.0),
            cell(5.0, 5.0),
        ];
        let neighbors = select_neighbors(&cells, 0.0, 0.0).unwrap();
        assert_eq!(neighbors[0].latitude, 1.0);
        assert_eq!(neighbors[1].longitude, 1.0);
        assert_eq!(neighbors[2].latitude, -1.0);
        assert_eq!(neighbors[3].longitude, -1.0);
    }
}
