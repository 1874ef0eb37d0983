use sparkline_chart_wasm::application::{ChartController, PriceMove};
use sparkline_chart_wasm::domain::chart::{ChartConfig, ChartVariant, SurfaceGeometry};
use sparkline_chart_wasm::domain::market_data::{
    DEFAULT_SEED_POINTS, DEFAULT_START_PRICE, FeedProfile, PriceFeed, RandomWalkFeed,
};
use sparkline_chart_wasm::infrastructure::rendering::RecordingSurface;

/// Replays a fixed list of prices, then repeats the last one.
struct Scripted {
    prices: Vec<f64>,
    cursor: usize,
}

impl Scripted {
    fn new(prices: &[f64]) -> Self {
        Self { prices: prices.to_vec(), cursor: 0 }
    }
}

impl PriceFeed for Scripted {
    fn next_price(&mut self) -> f64 {
        let price = self.prices[self.cursor.min(self.prices.len() - 1)];
        self.cursor += 1;
        price
    }

    fn last_price(&self) -> f64 {
        self.prices[self.cursor.saturating_sub(1).min(self.prices.len() - 1)]
    }
}

fn lcg(seed: u64) -> impl FnMut() -> f64 {
    let mut state = seed;
    move || {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (state >> 11) as f64 / (1u64 << 53) as f64
    }
}

#[test]
fn ticks_report_direction() {
    let mut chart = ChartController::new(ChartConfig::default(), Scripted::new(&[10.0, 11.0, 11.0, 9.5])).unwrap();

    let moves: Vec<PriceMove> = (0..4).map(|_| chart.tick().movement).collect();
    assert_eq!(moves, vec![PriceMove::Unchanged, PriceMove::Up, PriceMove::Unchanged, PriceMove::Down]);
    assert_eq!(chart.last_price(), Some(9.5));
    assert_eq!(chart.series().len(), 4);
}

#[test]
fn pushed_prices_bypass_the_feed() {
    let mut chart = ChartController::new(ChartConfig::default(), Scripted::new(&[1.0])).unwrap();
    chart.push_price(100.0);
    assert_eq!(chart.push_price(99.0).movement, PriceMove::Down);
    assert_eq!(chart.push_price(99.0).movement, PriceMove::Unchanged);
    assert_eq!(chart.feed().last_price(), 1.0);
}

#[test]
fn nothing_is_drawn_before_the_first_resize() {
    let mut chart = ChartController::new(ChartConfig::default(), Scripted::new(&[1.0])).unwrap();
    chart.load_history([1.0, 2.0, 3.0]);

    let mut surface = RecordingSurface::new();
    let report = chart.redraw(&mut surface).unwrap();
    assert!(!report.drawn);
    assert_eq!(surface.primitives().count(), 0);
}

#[test]
fn seeded_chart_keeps_label_in_zone() {
    let config = ChartConfig::preset(ChartVariant::Compact);
    let zone = config.comfort_zone;
    let feed = RandomWalkFeed::new(lcg(7), FeedProfile::Volatile, DEFAULT_START_PRICE);
    let mut chart = ChartController::new(config, feed).unwrap();

    let history = chart.feed_mut().seed_history(DEFAULT_SEED_POINTS);
    assert_eq!(chart.load_history(history), DEFAULT_SEED_POINTS);

    let geometry = SurfaceGeometry::new(375.0, 240.0, 2.0);
    chart.resize(geometry);

    for _ in 0..50 {
        chart.tick();
        let mut surface = RecordingSurface::new();
        let report = chart.redraw(&mut surface).unwrap();
        assert!(report.drawn);

        let frac = report.label_y_css.unwrap() / geometry.layout_height;
        assert!(zone.contains(frac, 1e-9), "label at {frac}");
    }
    assert_eq!(chart.series().len(), 250);
}

#[test]
fn ingest_returns_the_new_frame() {
    let mut chart = ChartController::new(ChartConfig::default(), Scripted::new(&[1.0])).unwrap();
    chart.resize(SurfaceGeometry::new(200.0, 100.0, 1.0));

    let first = chart.ingest(10.0);
    assert!(!first.is_drawable());

    let second = chart.ingest(12.0);
    assert!(second.is_drawable());
    assert_eq!(second.visible.len(), 2);
    assert_eq!(second, chart.view());
}

#[test]
fn summary_describes_whole_series() {
    let mut chart = ChartController::new(ChartConfig::default(), Scripted::new(&[1.0])).unwrap();
    assert!(chart.summary().is_none());

    chart.load_history([100.0, 98.0, 103.0, 101.5]);
    let summary = chart.summary().unwrap();
    assert_eq!((summary.low, summary.high, summary.count), (98.0, 103.0, 4));
    assert_eq!(chart.summary_text().as_deref(), Some("+1.5 (+1.50%)"));
}

#[test]
fn invalid_config_is_rejected() {
    let config = ChartConfig { capacity: 1, ..ChartConfig::default() };
    assert!(ChartController::new(config, Scripted::new(&[1.0])).is_err());
}
