use crate::{
    domain::{
        chart::{ChartConfig, ChartState, SurfaceGeometry},
        errors::{ChartResult, RenderingResult},
        logging::{LogComponent, get_logger},
        market_data::{
            OrderEstimate, OrderSide, PriceFeed, PriceSeries, Sample, SeriesSummary, estimate_order, percent_of_balance,
            profit_percent, quantity_for_percent,
        },
    },
    infrastructure::rendering::{DrawSurface, FrameReport, Rasterizer},
    log_debug,
    view_state::ViewState,
};
use serde::Serialize;
use std::cmp::Ordering;

/// Direction of the last tick relative to the previous price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PriceMove {
    Up,
    Down,
    Unchanged,
}

impl PriceMove {
    pub fn between(previous: Option<f64>, current: f64) -> Self {
        match previous.and_then(|p| current.partial_cmp(&p)) {
            Some(Ordering::Greater) => PriceMove::Up,
            Some(Ordering::Less) => PriceMove::Down,
            _ => PriceMove::Unchanged,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TickReport {
    pub sample: Sample,
    pub movement: PriceMove,
}

/// Owns the chart state and the price feed; every mutation goes through here.
///
/// The pipeline is `ingest -> ViewState -> render`: the view is recomputed
/// from scratch each time and the surface only sees finished geometry.
pub struct ChartController<F> {
    state: ChartState,
    feed: F,
    rasterizer: Rasterizer,
}

impl<F: PriceFeed> ChartController<F> {
    pub fn new(config: ChartConfig, feed: F) -> ChartResult<Self> {
        let rasterizer = Rasterizer::from_config(&config);
        let state = ChartState::new(config)?;
        get_logger().info(
            LogComponent::Application("ChartController"),
            &format!(
                "📈 chart ready: capacity {}, zone {}, {}",
                state.config().capacity,
                state.config().comfort_zone,
                state.config().precision
            ),
        );
        Ok(Self { state, feed, rasterizer })
    }

    pub fn config(&self) -> &ChartConfig {
        self.state.config()
    }

    pub fn series(&self) -> &PriceSeries {
        self.state.series()
    }

    pub fn feed(&self) -> &F {
        &self.feed
    }

    pub fn feed_mut(&mut self) -> &mut F {
        &mut self.feed
    }

    pub fn last_price(&self) -> Option<f64> {
        self.state.series().latest().map(Sample::price)
    }

    /// Load pre-generated history in order.
    pub fn load_history(&mut self, prices: impl IntoIterator<Item = f64>) -> usize {
        let before = self.state.series().len();
        for price in prices {
            self.state.append(price);
        }
        let loaded = self.state.series().len();
        get_logger().info(
            LogComponent::Application("ChartController"),
            &format!("history loaded: {} -> {} samples", before, loaded),
        );
        loaded
    }

    /// Host-pushed price (not from the feed).
    pub fn push_price(&mut self, price: f64) -> TickReport {
        let previous = self.last_price();
        let sample = self.state.append(price);
        TickReport { sample, movement: PriceMove::between(previous, sample.price()) }
    }

    /// Pull the next price from the feed and append it.
    pub fn tick(&mut self) -> TickReport {
        let price = self.feed.next_price();
        let report = self.push_price(price);
        log_debug!(
            LogComponent::Application("ChartController"),
            "tick {:.4} {:?} ({} samples)",
            price,
            report.movement,
            self.state.series().len()
        );
        report
    }

    /// Append a price and return the frame it produces.
    pub fn ingest(&mut self, price: f64) -> ViewState {
        self.state.ingest(price)
    }

    pub fn resize(&mut self, geometry: SurfaceGeometry) {
        if geometry != self.state.geometry() {
            log_debug!(
                LogComponent::Application("ChartController"),
                "resize to {}x{} css px @ {}x",
                geometry.layout_width,
                geometry.layout_height,
                geometry.dpr
            );
        }
        self.state.resize(geometry);
    }

    pub fn geometry(&self) -> SurfaceGeometry {
        self.state.geometry()
    }

    pub fn view(&self) -> ViewState {
        self.state.view()
    }

    /// Recompute the view and draw it onto `surface`.
    pub fn redraw<S: DrawSurface + ?Sized>(&self, surface: &mut S) -> RenderingResult<FrameReport> {
        let view = self.state.view();
        self.rasterizer.render(&view, surface)
    }

    pub fn summary(&self) -> Option<SeriesSummary> {
        self.state.series().summary()
    }

    pub fn summary_text(&self) -> Option<String> {
        self.summary().map(|s| s.change_text(self.state.config().precision))
    }

    /// Margin and liquidation estimate at `limit_price`, or at the last price
    /// for a market order. `None` before the first price.
    pub fn estimate_order(&self, limit_price: Option<f64>, quantity: f64, side: OrderSide) -> Option<OrderEstimate> {
        let price = limit_price.or_else(|| self.last_price())?;
        Some(estimate_order(price, quantity, side, self.config().margin_terms))
    }

    /// Order size that commits `percent` of `balance` at the last price.
    pub fn quantity_for_percent(&self, balance: f64, percent: f64) -> Option<f64> {
        let price = self.last_price()?;
        Some(quantity_for_percent(balance, percent, price, self.config().margin_terms))
    }

    /// Slider position for a typed-in quantity.
    pub fn percent_of_balance(&self, quantity: f64, balance: f64) -> Option<f64> {
        let price = self.last_price()?;
        Some(percent_of_balance(quantity, price, balance, self.config().margin_terms))
    }

    pub fn profit_percent(&self, entry_price: f64) -> Option<f64> {
        self.last_price().map(|last| profit_percent(last, entry_price))
    }
}
