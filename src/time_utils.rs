use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use std::path::{Path, PathBuf};

/// All days from start to end inclusive, in chronological order
pub fn day_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut days = Vec::new();
    let mut current = start;
    while current <= end {
        days.push(current);
        current += Duration::days(1);
    }
    days
}

/// The 24 hourly valid times of one day
pub fn hours_of_day(date: NaiveDate) -> Vec<DateTime<Utc>> {
    (0..24)
        .map(|h| {
            Utc.from_utc_datetime(&date.and_hms_opt(h, 0, 0).expect("hour in 0..24 is valid"))
        })
        .collect()
}

/// Output file name for one processed hour, matching the downstream
/// consumer's expected pattern
pub fn output_filename(time: &DateTime<Utc>, lat: f64, lon: f64) -> String {
    format!(
        "hrrr_{}_hour_{:02}_lat_{:.4}_lon_{:.4}.nc",
        time.format("%Y%m%d"),
        time.format("%H"),
        lat,
        lon
    )
}

/// Full output path: per-day subdirectory under the output root
pub fn output_path(output_dir: &Path, time: &DateTime<Utc>, lat: f64, lon: f64) -> PathBuf {
    output_dir
        .join(time.format("%Y%m%d").to_string())
        .join(output_filename(time, lat, lon))
}

/// Path of the fetched pressure-level NetCDF subset for one hour
pub fn pressure_input_path(data_dir: &Path, time: &DateTime<Utc>, forecast_hour: u32) -> PathBuf {
    data_dir.join(time.format("%Y%m%d").to_string()).join(format!(
        "hrrr_prs_{}_f{:02}.nc",
        time.format("%Y%m%d_%H"),
        forecast_hour
    ))
}

/// Path of the fetched surface NetCDF subset for one hour
pub fn surface_input_path(data_dir: &Path, time: &DateTime<Utc>, forecast_hour: u32) -> PathBuf {
    data_dir.join(time.format("%Y%m%d").to_string()).join(format!(
        "hrrr_sfc_{}_f{:02}.nc",
        time.format("%Y%m%d_%H"),
        forecast_hour
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_range() {
        let start = NaiveDate::from_ymd_opt(2023, 9, 6).unwrap();
        let end = NaiveDate::from_ymd_opt(2023, 9, 8).unwrap();
        let days = day_range(start, end);
        assert_eq!(days.len(), 3);
        assert_eq!(days[0], start);
        assert_eq!(days[2], end);
    }

    #[test]
    fn test_day_range_single_day() {
        let day = NaiveDate::from_ymd_opt(2023, 9, 6).unwrap();
        assert_eq!(day_range(day, day), vec![day]);
    }

    #[test]
    fn test_hours_of_day() {
        let date = NaiveDate::from_ymd_opt(2023, 9, 6).unwrap();
        let hours = hours_of_day(date);
        assert_eq!(hours.len(), 24);
        assert_eq!(hours[0].format("%H").to_string(), "00");
        assert_eq!(hours[23].format("%H").to_string(), "23");
    }

    #[test]
    fn test_output_filename() {
        let time = Utc.with_ymd_and_hms(2023, 9, 6, 7, 0, 0).unwrap();
        assert_eq!(
            output_filename(&time, 38.0406, 242.9124),
            "hrrr_20230906_hour_07_lat_38.0406_lon_242.9124.nc"
        );
    }

    #[test]
    fn test_input_paths() {
        let time = Utc.with_ymd_and_hms(2023, 9, 6, 7, 0, 0).unwrap();
        let prs = pressure_input_path(Path::new("/data"), &time, 0);
        assert_eq!(
            prs.to_string_lossy(),
            "/data/20230906/hrrr_prs_20230906_07_f00.nc"
        );
        let sfc = surface_input_path(Path::new("/data"), &time, 0);
        assert_eq!(
            sfc.to_string_lossy(),
            "/data/20230906/hrrr_sfc_20230906_07_f00.nc"
        );
    }
}
