use super::value_objects::{Precision, Price, Timestamp};
use crate::domain::logging::{LogComponent, get_time_provider};
use crate::log_trace;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Domain entity - one price observation. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp: Timestamp,
    pub price: Price,
}

impl Sample {
    pub fn new(timestamp: Timestamp, price: Price) -> Self {
        Self { timestamp, price }
    }

    pub fn price(&self) -> f64 {
        self.price.value()
    }
}

/// Domain entity - bounded, time-ascending price history.
///
/// Appends go to the tail; once `len() == capacity` every append evicts the
/// oldest sample first.
#[derive(Debug, Clone)]
pub struct PriceSeries {
    samples: VecDeque<Sample>,
    capacity: usize,
}

impl PriceSeries {
    pub const DEFAULT_CAPACITY: usize = 400;

    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { samples: VecDeque::with_capacity(capacity), capacity }
    }

    /// Stamp `price` with the current time and push it.
    pub fn append(&mut self, price: f64) -> Sample {
        let timestamp = Timestamp::from_millis(get_time_provider().current_timestamp());
        self.push(Sample::new(timestamp, Price::from(price)))
    }

    /// Push an already stamped sample. A timestamp older than the tail is
    /// raised to the tail's so the series stays non-decreasing.
    pub fn push(&mut self, mut sample: Sample) -> Sample {
        if let Some(last) = self.samples.back() {
            if sample.timestamp < last.timestamp {
                log_trace!(
                    LogComponent::Domain("Series"),
                    "clock went backwards ({} < {}), clamping",
                    sample.timestamp.value(),
                    last.timestamp.value()
                );
                sample.timestamp = last.timestamp;
            }
        }

        self.samples.push_back(sample);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
        sample
    }

    pub fn samples(&self) -> &VecDeque<Sample> {
        &self.samples
    }

    /// The last `count` samples (fewer if the series is shorter), oldest first.
    pub fn tail(&self, count: usize) -> impl Iterator<Item = &Sample> {
        self.samples.iter().skip(self.samples.len().saturating_sub(count))
    }

    pub fn latest(&self) -> Option<&Sample> {
        self.samples.back()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// (min, max) over every sample in the series
    pub fn price_range(&self) -> Option<(f64, f64)> {
        price_bounds(self.samples.iter().map(Sample::price))
    }

    pub fn summary(&self) -> Option<SeriesSummary> {
        let first = self.samples.front()?.price();
        let last = self.samples.back()?.price();
        let (low, high) = self.price_range()?;
        let change = last - first;
        let change_pct = if first != 0.0 { change / first * 100.0 } else { 0.0 };
        Some(SeriesSummary { first, last, high, low, change, change_pct, count: self.len() })
    }
}

impl Default for PriceSeries {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

/// Min and max of a price sequence; `None` when empty.
pub fn price_bounds(prices: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    prices.into_iter().fold(None, |acc, p| match acc {
        None => Some((p, p)),
        Some((lo, hi)) => Some((lo.min(p), hi.max(p))),
    })
}

/// Headline numbers for the whole series (first sample acts as the reference).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub first: f64,
    pub last: f64,
    pub high: f64,
    pub low: f64,
    pub change: f64,
    pub change_pct: f64,
    pub count: usize,
}

impl SeriesSummary {
    pub fn change_text(&self, precision: Precision) -> String {
        precision.format_change(self.change, self.change_pct)
    }
}
