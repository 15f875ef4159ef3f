//! CSV export of a series

use std::io::Write;

use super::types::{Column, WeatherSeries};
use super::validation::REQUIRED_COLUMNS;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Write the series as CSV under the standard header; missing values are
/// empty cells
pub fn write_csv<W: Write>(series: &WeatherSeries, writer: W) -> csv::Result<()> {
    let mut out = csv::Writer::from_writer(writer);

    out.write_record(REQUIRED_COLUMNS)?;
    for sample in series.samples() {
        let mut record = vec![sample.timestamp.format(TIMESTAMP_FORMAT).to_string()];
        record.extend(Column::all().iter().map(|&c| {
            let value = sample.value(c);
            if value.is_nan() {
                String::new()
            } else {
                value.to_string()
            }
        }));
        out.write_record(&record)?;
    }

    out.flush()?;
    Ok(())
}

/// CSV as a string
pub fn to_csv(series: &WeatherSeries) -> csv::Result<String> {
    let mut buf = Vec::new();
    write_csv(series, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::Sample;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_csv_layout() {
        let t0 = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
        let series = WeatherSeries::new(vec![
            Sample::new(t0, 21.5, 55.0, 3.25),
            Sample::new(t0 + chrono::Duration::minutes(1), f64::NAN, 54.0, 3.0),
        ]);

        let csv = to_csv(&series).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Time,Temperature (°C),Humidity (%),Wind Speed (km/h)");
        assert_eq!(lines[1], "2024-06-01T09:00:00Z,21.5,55,3.25");
        assert_eq!(lines[2], "2024-06-01T09:01:00Z,,54,3");
    }

    #[test]
    fn test_csv_header_is_fixed() {
        let t0 = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
        let series = WeatherSeries::with_columns(
            vec!["Time".to_string(), "Temperature (°C)".to_string()],
            vec![Sample::new(t0, 21.5, 55.0, 3.25)],
        );

        let csv = to_csv(&series).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Time,Temperature (°C),Humidity (%),Wind Speed (km/h)");
        assert_eq!(lines[1], "2024-06-01T09:00:00Z,21.5,55,3.25");
    }
}
