//! Day-bucketed aggregation of the 3-hour forecast feed.
//!
//! The free tier only serves 5 days of 3-hour samples, but the dashboard
//! shows a 7-day week. Samples are grouped by calendar date, averaged, and
//! the tail is padded by repeating the last real day at one-day spacing.

use chrono::{DateTime, NaiveDate};
use indexmap::IndexMap;
use thiserror::Error;

use super::models::{DailySummary, ForecastSample, WeatherCondition};

pub const SECONDS_PER_DAY: i64 = 86_400;

#[derive(Error, Debug, PartialEq)]
pub enum AggregateError {
    #[error("Forecast contained no samples")]
    EmptyForecast,

    #[error("Sample timestamp out of range: {0}")]
    InvalidTimestamp(i64),
}

/// Running sums for one calendar date. Samples arrive in timestamp order,
/// so the first sample seen for a date supplies the day's nominal
/// timestamp and representative condition.
struct DayBucket {
    timestamp: i64,
    condition: WeatherCondition,
    temp_sum: f64,
    humidity_sum: f64,
    wind_sum: f64,
    count: u32,
}

impl DayBucket {
    fn start(sample: &ForecastSample) -> Self {
        Self {
            timestamp: sample.dt,
            condition: sample.weather.first().cloned().unwrap_or_default(),
            temp_sum: 0.0,
            humidity_sum: 0.0,
            wind_sum: 0.0,
            count: 0,
        }
    }

    fn add(&mut self, sample: &ForecastSample) {
        self.temp_sum += sample.main.temp;
        self.humidity_sum += f64::from(sample.main.humidity);
        self.wind_sum += sample.wind.speed;
        self.count += 1;
    }

    fn into_summary(self) -> DailySummary {
        let n = f64::from(self.count);
        DailySummary {
            timestamp: self.timestamp,
            avg_temperature: self.temp_sum / n,
            avg_humidity: self.humidity_sum / n,
            avg_wind_speed: self.wind_sum / n,
            condition: self.condition,
            synthetic: false,
        }
    }
}

/// Aggregate an ordered 3-hour sample sequence into at least
/// `minimum_days` daily summaries.
///
/// Buckets keep the first-seen order of their UTC calendar dates. When
/// fewer than `minimum_days` dates are present, trailing entries repeat
/// the last real day's averages with timestamps advanced one day each;
/// surplus dates beyond `minimum_days` are dropped.
pub fn aggregate_weekly(
    samples: &[ForecastSample],
    minimum_days: usize,
) -> Result<Vec<DailySummary>, AggregateError> {
    if samples.is_empty() {
        return Err(AggregateError::EmptyForecast);
    }

    let mut buckets: IndexMap<NaiveDate, DayBucket> = IndexMap::new();

    for sample in samples {
        let date = DateTime::from_timestamp(sample.dt, 0)
            .ok_or(AggregateError::InvalidTimestamp(sample.dt))?
            .date_naive();

        buckets
            .entry(date)
            .or_insert_with(|| DayBucket::start(sample))
            .add(sample);
    }

    let mut days: Vec<DailySummary> = buckets
        .into_values()
        .take(minimum_days)
        .map(DayBucket::into_summary)
        .collect();

    // Extrapolate the tail from the last real day, one day apart. Input
    // was non-empty, so there is always a last entry to chain from.
    while days.len() < minimum_days {
        let mut next = days[days.len() - 1].clone();
        next.timestamp += SECONDS_PER_DAY;
        next.synthetic = true;
        days.push(next);
    }

    Ok(days)
}
