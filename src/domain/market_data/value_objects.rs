use derive_more::{Constructor, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Value Object - last traded price
#[derive(Debug, Clone, Copy, PartialEq, From, Into, Deref, Constructor, Serialize, Deserialize)]
pub struct Price(f64);

impl Price {
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl PartialOrd for Price {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.0.partial_cmp(&other.0)
    }
}

/// Value Object - milliseconds since epoch
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, From, Into, Deref, Constructor, Serialize, Deserialize,
)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn from_millis(value: u64) -> Self {
        Self(value)
    }
}

/// Value Object - number of decimal places shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, From, Into, Serialize, Deserialize)]
#[display(fmt = "{} dp", _0)]
pub struct Precision(u8);

impl Precision {
    pub const MAX: u8 = 8;

    pub fn new(decimals: u8) -> Self {
        Self(decimals.min(Self::MAX))
    }

    pub fn decimals(&self) -> usize {
        self.0 as usize
    }

    /// Round half away from zero to this many decimals.
    pub fn round(&self, value: f64) -> f64 {
        round_to(value, self.0)
    }

    pub fn format(&self, value: f64) -> String {
        format!("{:.*}", self.decimals(), self.round(value))
    }

    /// `+1.5 (+0.08%)`, `-1.5 (-0.08%)` or `0.0 (0.00%)`
    pub fn format_change(&self, change: f64, change_pct: f64) -> String {
        let abs = self.round(change);
        let sign = if abs > 0.0 {
            "+"
        } else if abs < 0.0 {
            "-"
        } else {
            ""
        };
        format!(
            "{sign}{} ({sign}{:.2}%)",
            self.format(abs.abs()),
            round_to(change_pct.abs(), 2)
        )
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self(1)
    }
}

pub fn round_to(value: f64, decimals: u8) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precision_formats_fixed_decimals() {
        assert_eq!(Precision::new(1).format(1805.04), "1805.0");
        assert_eq!(Precision::new(2).format(1805.0), "1805.00");
        assert_eq!(Precision::new(0).format(2.5), "3");
    }

    #[test]
    fn precision_is_capped() {
        assert_eq!(Precision::new(12).decimals(), Precision::MAX as usize);
    }

    #[test]
    fn change_text_carries_sign() {
        let p = Precision::new(1);
        assert_eq!(p.format_change(1.46, 0.0812), "+1.5 (+0.08%)");
        assert_eq!(p.format_change(-1.46, -0.0812), "-1.5 (-0.08%)");
        assert_eq!(p.format_change(0.01, 0.0005), "0.0 (0.00%)");
    }
}
