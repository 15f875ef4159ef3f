//! Line Chart
//!
//! Multi-series time chart rendered to inline SVG. All series share one
//! y-axis, the way a data frame's columns share one plot.

use chrono::{DateTime, Utc};
use std::fmt::Write;

use super::error::{RenderError, RenderResult};
use crate::series::{Column, WeatherSeries};

/// Chart colors for different series
pub const SERIES_COLORS: [&str; 6] = [
    "#FF9800", // Orange
    "#4CAF50", // Green
    "#2196F3", // Blue
    "#9C27B0", // Purple
    "#F44336", // Red
    "#00BCD4", // Cyan
];

const MARGIN_LEFT: f64 = 60.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 20.0;
const MARGIN_BOTTOM: f64 = 40.0;

/// One plotted line
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub label: String,
    pub color: String,
    /// (timestamp ms, value); NaN values leave a gap
    pub points: Vec<(i64, f64)>,
}

/// A multi-series line chart over time
#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub series: Vec<ChartSeries>,
    pub width: u32,
    pub height: u32,
}

impl LineChart {
    /// Plot every measured column of a weather series against time
    pub fn from_series(series: &WeatherSeries) -> RenderResult<Self> {
        if series.is_empty() {
            return Err(RenderError::EmptySeries);
        }

        let lines = Column::all()
            .iter()
            .enumerate()
            .map(|(idx, &column)| ChartSeries {
                label: column.label().to_string(),
                color: SERIES_COLORS[idx % SERIES_COLORS.len()].to_string(),
                points: series
                    .samples()
                    .iter()
                    .map(|s| (s.timestamp.timestamp_millis(), s.value(column)))
                    .collect(),
            })
            .collect();

        Ok(Self {
            series: lines,
            width: 800,
            height: 400,
        })
    }

    fn time_bounds(&self) -> Option<(i64, i64)> {
        let mut stamps = self.series.iter().flat_map(|s| s.points.iter().map(|p| p.0));
        let first = stamps.next()?;
        Some(stamps.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t))))
    }

    fn value_bounds(&self) -> Option<(f64, f64)> {
        self.series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.1))
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Render as a standalone `<svg>` element
    pub fn to_svg(&self) -> RenderResult<String> {
        let (t_min, t_max) = self.time_bounds().ok_or(RenderError::EmptySeries)?;
        let (mut y_min, mut y_max) = self.value_bounds().ok_or(RenderError::EmptySeries)?;

        let y_range = y_max - y_min;
        let y_padding = if y_range > 0.0 { y_range * 0.1 } else { 1.0 };
        y_min -= y_padding;
        y_max += y_padding;

        let width = self.width as f64;
        let height = self.height as f64;
        let chart_width = width - MARGIN_LEFT - MARGIN_RIGHT;
        let chart_height = height - MARGIN_TOP - MARGIN_BOTTOM;
        let t_span = (t_max - t_min).max(1) as f64;

        let x_of = |t: i64| MARGIN_LEFT + ((t - t_min) as f64 / t_span) * chart_width;
        let y_of = |v: f64| MARGIN_TOP + ((y_max - v) / (y_max - y_min)) * chart_height;

        let mut svg = String::new();
        // Writing into a String cannot fail
        let _ = write!(
            svg,
            r#"<svg class="chart" viewBox="0 0 {w} {h}" width="100%" xmlns="http://www.w3.org/2000/svg" role="img">"#,
            w = self.width,
            h = self.height
        );
        let _ = write!(svg, r##"<rect width="{}" height="{}" fill="#ffffff"/>"##, width, height);

        // Horizontal grid lines with y-axis labels
        for i in 0..=5 {
            let y = MARGIN_TOP + (i as f64 / 5.0) * chart_height;
            let value = y_max - (i as f64 / 5.0) * (y_max - y_min);
            let _ = write!(
                svg,
                r##"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="#e5e7eb"/><text x="5" y="{:.1}" font-size="12" fill="#6b7280">{:.1}</text>"##,
                MARGIN_LEFT,
                y,
                width - MARGIN_RIGHT,
                y,
                y + 4.0,
                value
            );
        }

        // X-axis labels
        for i in 0..=5i64 {
            let t = t_min + i * (t_max - t_min) / 5;
            let label = DateTime::<Utc>::from_timestamp_millis(t)
                .map(|dt| dt.format("%H:%M").to_string())
                .unwrap_or_default();
            let _ = write!(
                svg,
                r##"<text x="{:.1}" y="{:.1}" font-size="12" fill="#6b7280" text-anchor="middle">{}</text>"##,
                x_of(t),
                height - 10.0,
                label
            );
        }

        for line in &self.series {
            for run in line.points.split(|p| !p.1.is_finite()) {
                if run.is_empty() {
                    continue;
                }
                let coords = run
                    .iter()
                    .map(|&(t, v)| format!("{:.1},{:.1}", x_of(t), y_of(v)))
                    .collect::<Vec<_>>()
                    .join(" ");
                let _ = write!(
                    svg,
                    r#"<polyline fill="none" stroke="{}" stroke-width="2" points="{}"><title>{}</title></polyline>"#,
                    line.color,
                    coords,
                    super::html::escape(&line.label)
                );
            }
        }

        // Legend
        for (idx, line) in self.series.iter().enumerate() {
            let x = MARGIN_LEFT + idx as f64 * 170.0;
            let _ = write!(
                svg,
                r#"<circle cx="{:.1}" cy="10" r="5" fill="{}"/><text x="{:.1}" y="14" font-size="12">{}</text>"#,
                x,
                line.color,
                x + 10.0,
                super::html::escape(&line.label)
            );
        }

        svg.push_str("</svg>");
        Ok(svg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::Sample;
    use chrono::{Duration, TimeZone};

    fn series(values: &[f64]) -> WeatherSeries {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        WeatherSeries::new(
            values
                .iter()
                .enumerate()
                .map(|(i, &t)| Sample::new(start + Duration::minutes(i as i64), t, 60.0, 12.0))
                .collect(),
        )
    }

    #[test]
    fn test_chart_has_one_line_per_column() {
        let chart = LineChart::from_series(&series(&[20.0, 21.0, 22.0])).unwrap();

        assert_eq!(chart.series.len(), 3);
        assert_eq!(chart.series[0].label, "Temperature (°C)");
        assert_eq!(chart.series[2].color, SERIES_COLORS[2]);
        assert_eq!(chart.series[1].points.len(), 3);
    }

    #[test]
    fn test_svg_output() {
        let chart = LineChart::from_series(&series(&[20.0, 21.0, 22.0])).unwrap();
        let svg = chart.to_svg().unwrap();

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches("<polyline").count(), 3);
        assert!(svg.contains("10:00"));
        assert!(svg.contains("Wind Speed (km/h)"));
    }

    #[test]
    fn test_nan_breaks_line() {
        let chart = LineChart::from_series(&series(&[20.0, f64::NAN, 22.0, 23.0])).unwrap();
        let svg = chart.to_svg().unwrap();

        // Temperature splits in two, the other columns stay whole
        assert_eq!(svg.matches("<polyline").count(), 4);
    }

    #[test]
    fn test_empty_series_rejected() {
        let err = LineChart::from_series(&WeatherSeries::new(vec![])).unwrap_err();
        assert!(matches!(err, RenderError::EmptySeries));
    }
}
