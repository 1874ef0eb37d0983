//! Order-ticket arithmetic: margin, liquidation estimate, sizing from a
//! share of the balance, P/L against an entry price and the ±0.1 steppers.

use super::value_objects::round_to;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

/// Smallest tradable quantity, also the stepper increment
pub const MIN_QUANTITY: f64 = 0.1;
pub const PRICE_STEP: f64 = 0.1;
pub const VOLUME_STEP: f64 = 0.1;

/// Share of the initial margin assumed lost at liquidation
const LIQUIDATION_MARGIN_SHARE: f64 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, AsRefStr, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    #[default]
    Buy,
    Sell,
}

/// Value Object - contract terms the margin maths depends on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarginTerms {
    /// Currency per price point per contract
    pub contract_multiplier: f64,
    pub initial_margin_ratio: f64,
}

impl Default for MarginTerms {
    fn default() -> Self {
        Self { contract_multiplier: 100_000.0, initial_margin_ratio: 0.13 }
    }
}

impl MarginTerms {
    /// Margin needed for one contract at `price`.
    fn margin_per_contract(&self, price: f64) -> f64 {
        price * self.contract_multiplier * self.initial_margin_ratio
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrderEstimate {
    pub notional: f64,
    pub initial_margin: f64,
    /// `None` for an empty quantity
    pub liquidation_price: Option<f64>,
}

/// Notional, initial margin and a simplified liquidation price: the level at
/// which 90% of the initial margin is gone.
pub fn estimate_order(price: f64, quantity: f64, side: OrderSide, terms: MarginTerms) -> OrderEstimate {
    let notional = price * quantity * terms.contract_multiplier;
    let initial_margin = notional * terms.initial_margin_ratio;

    let liquidation_price = (quantity > 0.0).then(|| {
        let distance = initial_margin * LIQUIDATION_MARGIN_SHARE / (quantity * terms.contract_multiplier);
        match side {
            OrderSide::Buy => price - distance,
            OrderSide::Sell => price + distance,
        }
    });

    OrderEstimate { notional, initial_margin, liquidation_price }
}

/// Quantity whose margin uses `percent` of `balance`, floored to 0.1 and
/// never below [`MIN_QUANTITY`].
pub fn quantity_for_percent(balance: f64, percent: f64, price: f64, terms: MarginTerms) -> f64 {
    let raw = balance * percent / 100.0 / terms.margin_per_contract(price);
    if !raw.is_finite() {
        return MIN_QUANTITY;
    }
    ((raw * 10.0).floor() / 10.0).max(MIN_QUANTITY)
}

/// Share of `balance` the margin for `quantity` takes, capped at 100.
pub fn percent_of_balance(quantity: f64, price: f64, balance: f64, terms: MarginTerms) -> f64 {
    let percent = quantity * terms.margin_per_contract(price) / balance * 100.0;
    if percent.is_finite() { percent.min(100.0) } else { 0.0 }
}

/// Unrealised P/L of a long position in percent; 0 without a usable entry.
pub fn profit_percent(last_price: f64, entry_price: f64) -> f64 {
    if entry_price == 0.0 || !entry_price.is_finite() {
        return 0.0;
    }
    (last_price - entry_price) / entry_price * 100.0
}

/// `+0.56%`, `-0.28%` or `0.00%`
pub fn format_percent(percent: f64) -> String {
    let sign = if percent > 0.0 {
        "+"
    } else if percent < 0.0 {
        "-"
    } else {
        ""
    };
    format!("{sign}{:.2}%", percent.abs())
}

/// Manual price stepper: one decimal, never negative.
pub fn step_price(current: f64, delta: f64) -> f64 {
    round_to(current + delta, 1).max(0.0)
}

/// Volume stepper: one decimal, never below [`MIN_QUANTITY`].
pub fn step_volume(current: f64, delta: f64) -> f64 {
    round_to(current + delta, 1).max(MIN_QUANTITY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    const EPS: f64 = 1e-6;

    #[test]
    fn long_liquidates_below_and_short_above() {
        let terms = MarginTerms::default();
        let long = estimate_order(1805.0, 1.0, OrderSide::Buy, terms);
        assert!((long.notional - 180_500_000.0).abs() < EPS);
        assert!((long.initial_margin - 23_465_000.0).abs() < EPS);
        assert!((long.liquidation_price.unwrap() - 1593.815).abs() < EPS);

        let short = estimate_order(1805.0, 1.0, OrderSide::Sell, terms);
        assert!((short.liquidation_price.unwrap() - 2016.185).abs() < EPS);
    }

    #[test]
    fn empty_quantity_has_no_liquidation_price() {
        let estimate = estimate_order(1805.0, 0.0, OrderSide::Buy, MarginTerms::default());
        assert_eq!(estimate.initial_margin, 0.0);
        assert!(estimate.liquidation_price.is_none());
    }

    #[test]
    fn side_parses_case_insensitive() {
        assert_eq!(OrderSide::from_str("Sell").unwrap(), OrderSide::Sell);
        assert_eq!(OrderSide::Buy.as_ref(), "buy");
    }

    #[test]
    fn percent_text_keeps_two_decimals() {
        assert_eq!(format_percent(profit_percent(1805.0, 1795.0)), "+0.56%");
        assert_eq!(format_percent(profit_percent(1790.0, 1795.0)), "-0.28%");
        assert_eq!(format_percent(profit_percent(1795.0, 1795.0)), "0.00%");
        assert_eq!(profit_percent(10.0, 0.0), 0.0);
    }
}
