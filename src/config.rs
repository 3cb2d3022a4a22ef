use chrono::NaiveDate;
use clap::{Arg, Command};
use std::path::PathBuf;

/// Run configuration for the sounding extraction pipeline.
///
/// Everything the per-hour pipeline needs is carried explicitly here, so
/// multiple locations or date ranges can be processed in one process by
/// building multiple configs.
#[derive(Clone, Debug)]
pub struct Config {
    /// Target latitude (degrees north)
    pub target_lat: f64,
    /// Target longitude (degrees east, 0-360 system to match HRRR grids)
    pub target_lon: f64,
    /// Altitude of the lidar instrument (m ASL), metadata only
    pub instrument_altitude: f64,

    // Altitude grid definition; upper bound is exclusive
    /// Lower bound of the altitude grid (m ASL)
    pub alt_min: f64,
    /// Upper bound of the altitude grid (m ASL), exclusive
    pub alt_max: f64,
    /// Altitude grid spacing (m); 37.5 m is the MPD bin width
    pub alt_step: f64,

    /// First day to process (inclusive)
    pub start_date: NaiveDate,
    /// Last day to process (inclusive)
    pub end_date: NaiveDate,
    /// Forecast hour (0 = analysis), metadata and file selection
    pub forecast_hour: u32,

    /// Directory holding the fetched per-hour NetCDF subsets
    pub data_dir: PathBuf,
    /// Directory for hourly output files (per-day subdirectories)
    pub output_dir: PathBuf,
    /// Verbose output
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_lat: 38.0406,
            target_lon: 242.9124,
            instrument_altitude: 1641.0,

            alt_min: 0.0,
            alt_max: 12_000.0,
            alt_step: 37.5,

            start_date: NaiveDate::from_ymd_opt(2023, 9, 6).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2023, 9, 7).unwrap(),
            forecast_hour: 0,

            data_dir: PathBuf::from("./HRRR_data"),
            output_dir: PathBuf::from("./HRRR_data"),
            verbose: false,
        }
    }
}

impl Config {
    /// The fixed altitude grid, upper bound exclusive
    pub fn altitude_grid(&self) -> Vec<f64> {
        let n = ((self.alt_max - self.alt_min) / self.alt_step).ceil() as usize;
        (0..n)
            .map(|i| self.alt_min + i as f64 * self.alt_step)
            .collect()
    }

    /// Parse configuration from command line arguments
    pub fn from_args() -> Result<Self, String> {
        let app = Command::new("hrrr_rust")
            .version("0.1.0")
            .about("Extract HRRR soundings at a fixed point onto a uniform altitude grid")
            .arg(
                Arg::new("target-lat")
                    .long("target-lat")
                    .value_name("DEGREES")
                    .help("Target latitude (degrees north)")
                    .default_value("38.0406"),
            )
            .arg(
                Arg::new("target-lon")
                    .long("target-lon")
                    .value_name("DEGREES")
                    .help("Target longitude (degrees east, 0-360 system)")
                    .default_value("242.9124"),
            )
            .arg(
                Arg::new("altitude")
                    .long("altitude")
                    .value_name("METERS")
                    .help("Altitude of the lidar instrument (m ASL)")
                    .default_value("1641"),
            )
            .arg(
                Arg::new("start-date")
                    .short('s')
                    .long("start-date")
                    .value_name("YYYYMMDD")
                    .help("First day to process")
                    .required(true),
            )
            .arg(
                Arg::new("end-date")
                    .short('e')
                    .long("end-date")
                    .value_name("YYYYMMDD")
                    .help("Last day to process (inclusive)")
                    .required(true),
            )
            .arg(
                Arg::new("forecast-hour")
                    .short('f')
                    .long("forecast-hour")
                    .value_name("HOURS")
                    .help("Forecast hour (0 = analysis)")
                    .default_value("0"),
            )
            .arg(
                Arg::new("alt-min")
                    .long("alt-min")
                    .value_name("METERS")
                    .help("Lower bound of the altitude grid (m ASL)")
                    .default_value("0"),
            )
            .arg(
                Arg::new("alt-max")
                    .long("alt-max")
                    .value_name("METERS")
                    .help("Upper bound of the altitude grid (m ASL), exclusive")
                    .default_value("12000"),
            )
            .arg(
                Arg::new("alt-step")
                    .long("alt-step")
                    .value_name("METERS")
                    .help("Altitude grid spacing (m)")
                    .default_value("37.5"),
            )
            .arg(
                Arg::new("data-dir")
                    .short('i')
                    .long("data-dir")
                    .value_name("DIR")
                    .help("Directory holding the fetched per-hour NetCDF subsets")
                    .default_value("./HRRR_data"),
            )
            .arg(
                Arg::new("output-dir")
                    .short('o')
                    .long("output-dir")
                    .value_name("DIR")
                    .help("Output directory for hourly files")
                    .default_value("./HRRR_data"),
            )
            .arg(
                Arg::new("verbose")
                    .short('v')
                    .long("verbose")
                    .help("Verbose output")
                    .action(clap::ArgAction::SetTrue),
            );

        let matches = app.get_matches();

        let parse_f64 = |name: &str| -> Result<f64, String> {
            matches
                .get_one::<String>(name)
                .ok_or_else(|| format!("Missing argument: {}", name))?
                .parse::<f64>()
                .map_err(|e| format!("Invalid {}: {}", name, e))
        };

        let parse_date = |name: &str| -> Result<NaiveDate, String> {
            let raw = matches
                .get_one::<String>(name)
                .ok_or_else(|| format!("Missing argument: {}", name))?;
            NaiveDate::parse_from_str(raw, "%Y%m%d")
                .map_err(|e| format!("Invalid {} '{}': {}", name, raw, e))
        };

        let start_date = parse_date("start-date")?;
        let end_date = parse_date("end-date")?;
        if end_date < start_date {
            return Err(format!(
                "end-date {} is before start-date {}",
                end_date, start_date
            ));
        }

        let alt_step = parse_f64("alt-step")?;
        if alt_step <= 0.0 {
            return Err(format!("alt-step must be positive, got {}", alt_step));
        }

        Ok(Self {
            target_lat: parse_f64("target-lat")?,
            target_lon: parse_f64("target-lon")?,
            instrument_altitude: parse_f64("altitude")?,

            alt_min: parse_f64("alt-min")?,
            alt_max: parse_f64("alt-max")?,
            alt_step,

            start_date,
            end_date,
            forecast_hour: matches
                .get_one::<String>("forecast-hour")
                .ok_or_else(|| "Missing argument: forecast-hour".to_string())?
                .parse::<u32>()
                .map_err(|e| format!("Invalid forecast-hour: {}", e))?,

            data_dir: PathBuf::from(
                matches
                    .get_one::<String>("data-dir")
                    .ok_or_else(|| "Missing argument: data-dir".to_string())?,
            ),
            output_dir: PathBuf::from(
                matches
                    .get_one::<String>("output-dir")
                    .ok_or_else(|| "Missing argument: output-dir".to_string())?,
            ),
            verbose: matches.get_flag("verbose"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_altitude_grid_default() {
        let config = Config::default();
        let grid = config.altitude_grid();

        // 0 to 12 km in 37.5 m steps, upper bound exclusive
        assert_eq!(grid.len(), 320);
        assert_eq!(grid[0], 0.0);
        assert_eq!(grid[1], 37.5);
        assert_eq!(grid[319], 11962.5);
    }

    #[test]
    fn test_altitude_grid_partial_step() {
        let config = Config {
            alt_min: 0.0,
            alt_max: 100.0,
            alt_step: 40.0,
            ..Config::default()
        };
        let grid = config.altitude_grid();
        assert_eq!(grid, vec![0.0, 40.0, 80.0]);
    }
}
