//! Forecast aggregation: daily buckets and the hourly strip.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Timelike, Utc};

use crate::types::{DailyForecast, ForecastSample, HourlySample};

const NOON_SECS: i64 = 12 * 60 * 60;

/// A sample that passed validation
struct Reading<'a> {
    time: DateTime<Utc>,
    temperature: f64,
    sample: &'a ForecastSample,
}

impl<'a> Reading<'a> {
    fn from_sample(sample: &'a ForecastSample) -> Option<Self> {
        let reading = Self {
            time: sample.timestamp()?,
            temperature: sample.temperature()?,
            sample,
        };
        Some(reading)
    }
}

fn well_formed(samples: &[ForecastSample]) -> impl Iterator<Item = Reading<'_>> {
    samples.iter().filter_map(|sample| {
        let reading = Reading::from_sample(sample);
        if reading.is_none() {
            tracing::debug!(dt = ?sample.dt, "Skipping malformed forecast sample");
        }
        reading
    })
}

struct DayBucket<'a> {
    date: NaiveDate,
    high: f64,
    low: f64,
    /// Seconds between the representative sample and local noon
    noon_distance: i64,
    representative: Reading<'a>,
}

impl<'a> DayBucket<'a> {
    fn new(date: NaiveDate, noon_distance: i64, reading: Reading<'a>) -> Self {
        Self {
            date,
            high: reading.temperature,
            low: reading.temperature,
            noon_distance,
            representative: reading,
        }
    }

    fn add(&mut self, noon_distance: i64, reading: Reading<'a>) {
        self.high = self.high.max(reading.temperature);
        self.low = self.low.min(reading.temperature);

        let closer = noon_distance < self.noon_distance;
        let tie_but_earlier =
            noon_distance == self.noon_distance && reading.time < self.representative.time;
        if closer || tie_but_earlier {
            self.noon_distance = noon_distance;
            self.representative = reading;
        }
    }

    fn finish(self) -> DailyForecast {
        DailyForecast {
            date: self.date,
            high: self.high,
            low: self.low,
            description: self.representative.sample.description().to_string(),
            icon: self.representative.sample.icon().to_string(),
        }
    }
}

/// Group samples into per-day buckets using the local time zone.
pub fn group_daily(samples: &[ForecastSample]) -> Vec<DailyForecast> {
    group_daily_in(samples, &Local)
}

/// Group samples into per-day buckets by their calendar date in `tz`.
///
/// Each day reports the highest and lowest temperature seen that day and the
/// condition of the sample closest to 12:00 local time (the earlier sample on
/// a tie). Samples without a usable timestamp or temperature are skipped.
/// Output is ordered by date with one entry per date.
pub fn group_daily_in<Tz: TimeZone>(samples: &[ForecastSample], tz: &Tz) -> Vec<DailyForecast> {
    let mut buckets: Vec<DayBucket<'_>> = Vec::new();

    for reading in well_formed(samples) {
        let local = reading.time.with_timezone(tz);
        let date = local.date_naive();
        let noon_distance = (i64::from(local.num_seconds_from_midnight()) - NOON_SECS).abs();

        match buckets.iter_mut().find(|b| b.date == date) {
            Some(bucket) => bucket.add(noon_distance, reading),
            None => buckets.push(DayBucket::new(date, noon_distance, reading)),
        }
    }

    // Feeds are time-ordered, so this only reorders malformed feeds
    buckets.sort_by_key(|b| b.date);
    buckets.into_iter().map(DayBucket::finish).collect()
}

/// The first `limit` well-formed samples, in feed order.
pub fn hourly(samples: &[ForecastSample], limit: usize) -> Vec<HourlySample> {
    well_formed(samples)
        .take(limit)
        .map(|reading| HourlySample {
            time: reading.time,
            temperature: reading.temperature,
            description: reading.sample.description().to_string(),
            icon: reading.sample.icon().to_string(),
        })
        .collect()
}
