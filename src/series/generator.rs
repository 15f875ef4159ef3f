//! Synthetic series generator
//!
//! Each column is a sinusoid over an evenly spaced phase axis plus Gaussian
//! noise from a seeded RNG. Samples are one interval apart and the last one
//! lands on the generation time.
//!
//! Noise is drawn column by column (all temperature draws, then humidity,
//! then wind), so a given seed always yields identical arrays.

use chrono::{DateTime, Duration, Utc};
use rand::{rngs::StdRng, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use super::error::{SeriesError, SeriesResult};
use super::types::{Column, PlausibilityBounds, Sample, WeatherSeries};

/// Shape of the periodic component
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    Sine,
    Cosine,
}

impl Waveform {
    fn eval(&self, phase: f64) -> f64 {
        match self {
            Waveform::Sine => phase.sin(),
            Waveform::Cosine => phase.cos(),
        }
    }
}

/// Parameters of one generated column
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WaveSpec {
    /// Level the wave oscillates around
    pub base: f64,
    pub amplitude: f64,
    pub waveform: Waveform,
    /// End of the phase axis, in multiples of π
    pub span_pi: f64,
    /// Standard deviation of the additive noise
    pub noise_std: f64,
}

impl WaveSpec {
    pub fn new(base: f64, amplitude: f64, waveform: Waveform, span_pi: f64, noise_std: f64) -> Self {
        Self {
            base,
            amplitude,
            waveform,
            span_pi,
            noise_std,
        }
    }

    /// Reject parameters that cannot produce a wave
    fn check(&self, column: Column) -> SeriesResult<()> {
        let params = [
            ("base", self.base),
            ("amplitude", self.amplitude),
            ("span_pi", self.span_pi),
            ("noise_std", self.noise_std),
        ];
        if let Some((name, value)) = params.iter().find(|(_, v)| !v.is_finite()) {
            return Err(SeriesError::InvalidConfig(format!(
                "{} {} must be finite, got {}",
                column.name(),
                name,
                value
            )));
        }
        // rand_distr only rejects a non-finite std_dev
        if self.noise_std < 0.0 {
            return Err(SeriesError::InvalidConfig(format!(
                "{} noise_std must not be negative, got {}",
                column.name(),
                self.noise_std
            )));
        }
        Ok(())
    }

    /// Draw `n` values, consuming `n` normal samples from `rng`
    fn sample(&self, n: usize, rng: &mut StdRng) -> SeriesResult<Vec<f64>> {
        let noise = Normal::new(0.0, self.noise_std)
            .map_err(|e| SeriesError::InvalidConfig(format!("noise_std {}: {}", self.noise_std, e)))?;

        let end = self.span_pi * PI;
        let step = if n > 1 { end / (n - 1) as f64 } else { 0.0 };

        Ok((0..n)
            .map(|i| {
                let phase = step * i as f64;
                self.base + self.amplitude * self.waveform.eval(phase) + noise.sample(rng)
            })
            .collect())
    }
}

/// Largest series one call will generate
pub const MAX_SAMPLE_COUNT: usize = 100_000;

fn default_seed() -> u64 {
    42
}

fn default_sample_count() -> usize {
    100
}

fn default_interval_secs() -> i64 {
    60
}

fn default_temperature() -> WaveSpec {
    WaveSpec::new(20.0, 5.0, Waveform::Sine, 3.0, 0.5)
}

fn default_humidity() -> WaveSpec {
    WaveSpec::new(50.0, 10.0, Waveform::Cosine, 2.0, 1.0)
}

fn default_wind_speed() -> WaveSpec {
    WaveSpec::new(10.0, 3.0, Waveform::Sine, 4.0, 0.7)
}

/// Generator configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratorConfig {
    #[serde(default = "default_seed")]
    pub seed: u64,

    #[serde(default = "default_sample_count")]
    pub sample_count: usize,

    /// Spacing between consecutive samples
    #[serde(default = "default_interval_secs")]
    pub interval_secs: i64,

    #[serde(default = "default_temperature")]
    pub temperature: WaveSpec,

    #[serde(default = "default_humidity")]
    pub humidity: WaveSpec,

    #[serde(default = "default_wind_speed")]
    pub wind_speed: WaveSpec,

    #[serde(default)]
    pub bounds: PlausibilityBounds,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            sample_count: default_sample_count(),
            interval_secs: default_interval_secs(),
            temperature: default_temperature(),
            humidity: default_humidity(),
            wind_speed: default_wind_speed(),
            bounds: PlausibilityBounds::default(),
        }
    }
}

impl GeneratorConfig {
    /// Builder method: set the RNG seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Builder method: set the number of samples
    pub fn sample_count(mut self, count: usize) -> Self {
        self.sample_count = count;
        self
    }

    /// Builder method: replace the wave of one column
    pub fn wave(mut self, column: Column, spec: WaveSpec) -> Self {
        match column {
            Column::Temperature => self.temperature = spec,
            Column::Humidity => self.humidity = spec,
            Column::WindSpeed => self.wind_speed = spec,
        }
        self
    }

    pub fn wave_for(&self, column: Column) -> &WaveSpec {
        match column {
            Column::Temperature => &self.temperature,
            Column::Humidity => &self.humidity,
            Column::WindSpeed => &self.wind_speed,
        }
    }
}

/// Produces validated synthetic weather series
#[derive(Debug, Clone)]
pub struct SeriesGenerator {
    config: GeneratorConfig,
}

impl SeriesGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate a series ending at the current time
    pub fn generate(&self) -> SeriesResult<WeatherSeries> {
        self.generate_at(Utc::now())
    }

    /// Generate a series whose last sample is stamped `now`.
    ///
    /// Fails without returning any data if a single value breaks the
    /// plausibility bounds.
    pub fn generate_at(&self, now: DateTime<Utc>) -> SeriesResult<WeatherSeries> {
        let n = self.config.sample_count;
        if n == 0 || n > MAX_SAMPLE_COUNT {
            return Err(SeriesError::InvalidConfig(format!(
                "sample_count must be between 1 and {}, got {}",
                MAX_SAMPLE_COUNT, n
            )));
        }
        if self.config.interval_secs <= 0 {
            return Err(SeriesError::InvalidConfig(
                "interval_secs must be positive".to_string(),
            ));
        }
        for &column in Column::all() {
            self.config.wave_for(column).check(column)?;
        }

        let timestamps = self.timestamps(now, n)?;

        let mut rng = StdRng::seed_from_u64(self.config.seed);

        let mut columns = Vec::with_capacity(Column::all().len());
        for &column in Column::all() {
            let values = self.config.wave_for(column).sample(n, &mut rng)?;
            self.check_bounds(column, &values)?;
            columns.push(values);
        }

        let samples = timestamps
            .into_iter()
            .enumerate()
            .map(|(i, timestamp)| Sample::new(timestamp, columns[0][i], columns[1][i], columns[2][i]))
            .collect();

        tracing::debug!(
            seed = self.config.seed,
            samples = n,
            "Generated synthetic weather series"
        );

        Ok(WeatherSeries::new(samples))
    }

    /// `n` stamps one interval apart, the last one at `now`
    fn timestamps(&self, now: DateTime<Utc>, n: usize) -> SeriesResult<Vec<DateTime<Utc>>> {
        let interval = self.config.interval_secs;
        let out_of_range = || {
            SeriesError::InvalidConfig(format!(
                "{} samples at interval_secs {} reach outside the supported date range",
                n, interval
            ))
        };

        (0..n)
            .map(|i| {
                let steps_back = (n - 1 - i) as i64;
                let offset = interval
                    .checked_mul(steps_back)
                    .and_then(Duration::try_seconds)
                    .ok_or_else(out_of_range)?;
                now.checked_sub_signed(offset).ok_or_else(out_of_range)
            })
            .collect()
    }

    fn check_bounds(&self, column: Column, values: &[f64]) -> SeriesResult<()> {
        let range = self.config.bounds.range(column);
        match values.iter().position(|&v| range.rejects(v)) {
            Some(index) => {
                tracing::warn!(
                    column = %column,
                    index,
                    value = values[index],
                    "Generated value outside plausibility bounds"
                );
                Err(SeriesError::OutOfRange {
                    column,
                    index,
                    value: values[index],
                })
            }
            None => Ok(()),
        }
    }
}
