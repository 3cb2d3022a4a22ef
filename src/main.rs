use hrrr_rust::{
    config::Config,
    data_io::{read_pressure_grid, read_surface_grid, write_hourly_record},
    sounding::process_hour,
    time_utils::{day_range, hours_of_day, output_path, pressure_input_path, surface_input_path},
};

fn main() {
    let config = match Config::from_args() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run_batch(&config) {
        eprintln!("Batch error: {}", e);
        std::process::exit(1);
    }
}

/// Sequential per-hour batch loop.
///
/// Hours are processed strictly one at a time in chronological order. A
/// failed hour is reported and skipped; it never aborts the batch. Each
/// hour's grids are dropped before the next hour starts, so peak memory is
/// one hour's working set.
fn run_batch(config: &Config) -> Result<(), String> {
    std::fs::create_dir_all(&config.output_dir)
        .map_err(|e| format!("Cannot create output directory: {}", e))?;

    let mut written = 0usize;
    let mut skipped = 0usize;

    for day in day_range(config.start_date, config.end_date) {
        println!("===== Processing data for {} =====", day.format("%Y-%m-%d"));

        for hour in hours_of_day(day) {
            let out_path = output_path(
                &config.output_dir,
                &hour,
                config.target_lat,
                config.target_lon,
            );
            if out_path.exists() {
                println!(
                    "File already exists for {} UTC, skipping this hour",
                    hour.format("%Y-%m-%d %H:%M")
                );
                skipped += 1;
                continue;
            }

            match process_one_hour(config, &hour, &out_path) {
                Ok(()) => {
                    println!("Saved: {}", out_path.display());
                    written += 1;
                }
                Err(e) => {
                    eprintln!(
                        "Skipping {} UTC due to error: {}",
                        hour.format("%Y-%m-%d %H:%M"),
                        e
                    );
                    skipped += 1;
                }
            }
        }
    }

    println!("Done: {} hours written, {} skipped", written, skipped);
    Ok(())
}

/// Load, interpolate and persist a single hour. Any error abandons the hour
/// with nothing written.
fn process_one_hour(
    config: &Config,
    hour: &chrono::DateTime<chrono::Utc>,
    out_path: &std::path::Path,
) -> Result<(), String> {
    let prs_path = pressure_input_path(&config.data_dir, hour, config.forecast_hour);
    let sfc_path = surface_input_path(&config.data_dir, hour, config.forecast_hour);

    let pressure_grid = read_pressure_grid(&prs_path).map_err(|e| e.to_string())?;
    let surface_grid = read_surface_grid(&sfc_path).map_err(|e| e.to_string())?;

    if config.verbose {
        println!(
            "Loaded grids for {} UTC: {} pressure levels, {:?} cells",
            hour.format("%Y-%m-%d %H:%M"),
            pressure_grid.levels.len(),
            pressure_grid.latitude.dim()
        );
    }

    let record = process_hour(config, &pressure_grid, &surface_grid).map_err(|e| e.to_string())?;

    write_hourly_record(out_path, &record).map_err(|e| e.to_string())?;

    Ok(())
}
