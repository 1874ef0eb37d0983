use quickcheck_macros::quickcheck;
use sparkline_chart_wasm::application::ChartController;
use sparkline_chart_wasm::domain::chart::ChartConfig;
use sparkline_chart_wasm::domain::market_data::{
    MIN_QUANTITY, MarginTerms, OrderSide, PRICE_STEP, PriceFeed, VOLUME_STEP, format_percent, quantity_for_percent,
    step_price, step_volume,
};

const BALANCE: f64 = 500_000_000.0;
const EPS: f64 = 1e-6;

struct Fixed(f64);

impl PriceFeed for Fixed {
    fn next_price(&mut self) -> f64 {
        self.0
    }

    fn last_price(&self) -> f64 {
        self.0
    }
}

fn chart_at(price: f64) -> ChartController<Fixed> {
    let mut chart = ChartController::new(ChartConfig::default(), Fixed(price)).unwrap();
    chart.tick();
    chart
}

#[test]
fn nothing_to_estimate_before_first_price() {
    let chart = ChartController::new(ChartConfig::default(), Fixed(1805.0)).unwrap();
    assert!(chart.estimate_order(None, 1.0, OrderSide::Buy).is_none());
    assert!(chart.quantity_for_percent(BALANCE, 25.0).is_none());
    assert!(chart.profit_percent(1795.0).is_none());
}

#[test]
fn market_order_uses_last_price_and_limit_overrides_it() {
    let chart = chart_at(1805.0);

    let market = chart.estimate_order(None, 1.0, OrderSide::Buy).unwrap();
    assert!((market.initial_margin - 23_465_000.0).abs() < EPS);
    assert!((market.liquidation_price.unwrap() - 1593.815).abs() < EPS);

    let limit = chart.estimate_order(Some(1800.0), 2.0, OrderSide::Sell).unwrap();
    assert!((limit.notional - 360_000_000.0).abs() < EPS);
    assert!(limit.liquidation_price.unwrap() > 1800.0);
}

#[test]
fn balance_share_sizes_orders_in_tenths() {
    let chart = chart_at(1805.0);
    assert_eq!(chart.quantity_for_percent(BALANCE, 25.0), Some(5.3));
    assert_eq!(chart.quantity_for_percent(BALANCE, 1.0), Some(0.2));
    assert_eq!(chart.quantity_for_percent(BALANCE, 0.0), Some(MIN_QUANTITY));

    let pct = chart.percent_of_balance(1.0, BALANCE).unwrap();
    assert!((pct - 4.693).abs() < EPS);
    assert_eq!(chart.percent_of_balance(1_000.0, BALANCE), Some(100.0));
}

#[test]
fn zero_price_falls_back_to_minimum_lot() {
    assert_eq!(quantity_for_percent(BALANCE, 50.0, 0.0, MarginTerms::default()), MIN_QUANTITY);
}

#[test]
fn profit_is_measured_against_entry() {
    let chart = chart_at(1805.0);
    assert_eq!(chart.profit_percent(1795.0).map(format_percent).as_deref(), Some("+0.56%"));
    assert_eq!(chart.profit_percent(1805.0).map(format_percent).as_deref(), Some("0.00%"));
}

#[test]
fn steppers_clamp_at_their_floors() {
    assert_eq!(step_price(1805.0, PRICE_STEP), 1805.1);
    assert_eq!(step_price(0.05, -PRICE_STEP), 0.0);
    assert_eq!(step_volume(0.2, VOLUME_STEP), 0.3);
    assert_eq!(step_volume(MIN_QUANTITY, -VOLUME_STEP), MIN_QUANTITY);
}

#[quickcheck]
fn steppers_never_leave_their_range(start: u16, moves: Vec<bool>) -> bool {
    let mut price = start as f64 / 10.0;
    let mut volume = MIN_QUANTITY;
    for up in moves {
        let delta = if up { 0.1 } else { -0.1 };
        price = step_price(price, delta);
        volume = step_volume(volume, delta);
        if price < 0.0 || volume < MIN_QUANTITY {
            return false;
        }
    }
    true
}
