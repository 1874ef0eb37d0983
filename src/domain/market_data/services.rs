use super::value_objects::round_to;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display as StrumDisplay, EnumString};

/// Uniform numbers in `[0, 1)`.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

impl<F: FnMut() -> f64> RandomSource for F {
    fn next_unit(&mut self) -> f64 {
        self()
    }
}

/// Host-side price source: one new price per tick.
pub trait PriceFeed {
    fn next_price(&mut self) -> f64;
    fn last_price(&self) -> f64;
}

/// Shape of the simulated walk.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, StrumDisplay, EnumString, AsRefStr, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FeedProfile {
    /// ±0.35 per tick, two decimals
    #[default]
    Smooth,
    /// up to ±2.5 per tick with occasional spikes, quantized to 0.1
    Volatile,
}

pub const DEFAULT_START_PRICE: f64 = 1805.0;
pub const DEFAULT_SEED_POINTS: usize = 200;

const SMOOTH_VOLATILITY: f64 = 0.7;
const VOLATILE_RANGE: f64 = 2.5;
const VOLATILE_SPIKE_CHANCE: f64 = 0.08;
const VOLATILE_SPIKE_FACTOR: f64 = 1.5;
const TICK_SIZE: f64 = 0.1;

const SEED_START_DRIFT: f64 = 0.015;
const SEED_SPIKE_CHANCE: f64 = 0.04;
const SEED_SPIKE_SIZE: f64 = 2.4;
const SEED_DRIFT_PERIOD: usize = 40;
const SEED_DRIFT_SPREAD: f64 = 0.03;

/// Random-walk price simulation driven by an injected [`RandomSource`].
#[derive(Debug, Clone)]
pub struct RandomWalkFeed<R> {
    rng: R,
    profile: FeedProfile,
    last_price: f64,
}

impl<R: RandomSource> RandomWalkFeed<R> {
    pub fn new(rng: R, profile: FeedProfile, start_price: f64) -> Self {
        Self { rng, profile, last_price: start_price }
    }

    /// Generate `points` of history: mild drift that is re-rolled every
    /// 40 steps, varied volatility and rare spikes.
    pub fn seed_history(&mut self, points: usize) -> Vec<f64> {
        let mut drift = SEED_START_DRIFT;
        let mut history = Vec::with_capacity(points);
        for i in 0..points {
            let spike = if self.rng.next_unit() < SEED_SPIKE_CHANCE {
                (self.rng.next_unit() - 0.5) * SEED_SPIKE_SIZE
            } else {
                0.0
            };
            let base_vol = 0.35 + self.rng.next_unit() * 0.25;
            let step = (self.rng.next_unit() - 0.5) * base_vol + drift + spike;
            self.last_price = round_to(self.last_price + step, 2);
            if i % SEED_DRIFT_PERIOD == 0 {
                drift = (self.rng.next_unit() - 0.5) * SEED_DRIFT_SPREAD;
            }
            history.push(self.last_price);
        }
        history
    }

    fn smooth_step(&mut self) -> f64 {
        let delta = (self.rng.next_unit() - 0.5) * SMOOTH_VOLATILITY;
        round_to(self.last_price + delta, 2)
    }

    fn volatile_step(&mut self) -> f64 {
        let mut delta = (self.rng.next_unit() * 2.0 - 1.0) * VOLATILE_RANGE;
        if self.rng.next_unit() < VOLATILE_SPIKE_CHANCE {
            delta *= VOLATILE_SPIKE_FACTOR;
        }
        delta = (delta / TICK_SIZE).round() * TICK_SIZE;
        if delta == 0.0 {
            delta = if self.rng.next_unit() > 0.5 { TICK_SIZE } else { -TICK_SIZE };
        }
        round_to(self.last_price + delta, 1)
    }
}

impl<R: RandomSource> PriceFeed for RandomWalkFeed<R> {
    fn next_price(&mut self) -> f64 {
        self.last_price = match self.profile {
            FeedProfile::Smooth => self.smooth_step(),
            FeedProfile::Volatile => self.volatile_step(),
        };
        self.last_price
    }

    fn last_price(&self) -> f64 {
        self.last_price
    }
}
