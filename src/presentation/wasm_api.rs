use gloo::events::EventListener;
use gloo::timers::callback::{Interval, Timeout};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::str::FromStr;
use wasm_bindgen::prelude::*;

use crate::application::{ChartController, PriceMove};
use crate::domain::{
    chart::{ChartConfig, ChartVariant},
    errors::ChartError,
    logging::{LogComponent, LogLevel, get_logger},
    market_data::{
        DEFAULT_SEED_POINTS, DEFAULT_START_PRICE, OrderSide, PRICE_STEP, RandomWalkFeed, VOLUME_STEP, format_percent,
        step_price, step_volume,
    },
};
use crate::infrastructure::{
    rendering::CanvasRenderer,
    services::MathRandom,
    ui::FloatingLabel,
};
use crate::{log_error, log_warn};

type BrowserController = ChartController<RandomWalkFeed<MathRandom>>;

/// JS-facing chart: binds a canvas and a floating label, runs the tick timer
/// and redraws on window resize.
#[wasm_bindgen]
pub struct PriceChartApi {
    controller: Rc<RefCell<BrowserController>>,
    canvas: Rc<CanvasRenderer>,
    label: Rc<FloatingLabel>,
    last_move: Rc<Cell<PriceMove>>,
    ticker: Option<Interval>,
    resize_listener: Option<EventListener>,
    pending_resize: Rc<RefCell<Option<Timeout>>>,
}

#[wasm_bindgen]
impl PriceChartApi {
    /// `config_json` may be partial; missing fields use the `fullscreen` preset.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: String, label_id: String, config_json: Option<String>) -> Result<PriceChartApi, JsValue> {
        let config = match config_json {
            Some(json) => ChartConfig::from_json(&json)?,
            None => ChartConfig::default(),
        };
        Ok(Self::with_config(canvas_id, label_id, config)?)
    }

    /// Build from a named preset (`fullscreen` or `compact`).
    #[wasm_bindgen(js_name = withVariant)]
    pub fn with_variant(canvas_id: String, label_id: String, variant: &str) -> Result<PriceChartApi, JsValue> {
        let variant = ChartVariant::from_str(variant)
            .map_err(|_| ChartError::ConfigError(format!("unknown chart variant {variant:?}")))?;
        Ok(Self::with_config(canvas_id, label_id, ChartConfig::preset(variant))?)
    }

    /// Seed history if empty, size the canvas, draw, then start ticking and
    /// listening for resizes. Calling it twice restarts the timer.
    pub fn start(&mut self) {
        self.stop();

        {
            let mut controller = self.controller.borrow_mut();
            if controller.series().is_empty() {
                let history = controller.feed_mut().seed_history(DEFAULT_SEED_POINTS);
                controller.load_history(history);
            }
            resize_and_draw(&mut controller, &self.canvas, &self.label);
        }

        let (tick_ms, debounce_ms) = {
            let controller = self.controller.borrow();
            (controller.config().tick_ms, controller.config().resize_debounce_ms)
        };

        let controller = Rc::clone(&self.controller);
        let canvas = Rc::clone(&self.canvas);
        let label = Rc::clone(&self.label);
        let last_move = Rc::clone(&self.last_move);
        self.ticker = Some(Interval::new(tick_ms, move || {
            let mut controller = controller.borrow_mut();
            let report = controller.tick();
            last_move.set(report.movement);
            draw(&controller, &canvas, &label);
        }));

        let controller = Rc::clone(&self.controller);
        let canvas = Rc::clone(&self.canvas);
        let label = Rc::clone(&self.label);
        let pending = Rc::clone(&self.pending_resize);
        self.resize_listener = Some(EventListener::new(&gloo::utils::window(), "resize", move |_| {
            match debounce_ms {
                Some(ms) => {
                    let controller = Rc::clone(&controller);
                    let canvas = Rc::clone(&canvas);
                    let label = Rc::clone(&label);
                    // replacing the handle cancels the previous timeout
                    *pending.borrow_mut() = Some(Timeout::new(ms, move || {
                        resize_and_draw(&mut controller.borrow_mut(), &canvas, &label);
                    }));
                }
                None => resize_and_draw(&mut controller.borrow_mut(), &canvas, &label),
            }
        }));

        let config_json = serde_json::to_string(self.controller.borrow().config()).unwrap_or_default();
        get_logger().log_with_metadata(
            LogLevel::Info,
            LogComponent::Presentation("PriceChartApi"),
            &format!("▶️ ticking every {} ms on #{}", tick_ms, self.canvas.canvas_id()),
            &config_json,
        );
    }

    /// Clear the tick timer and the resize listener.
    pub fn stop(&mut self) {
        let was_running = self.ticker.take().is_some();
        self.resize_listener.take();
        self.pending_resize.borrow_mut().take();
        if was_running {
            get_logger().info(LogComponent::Presentation("PriceChartApi"), "⏹️ stopped");
        }
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.ticker.is_some()
    }

    /// Append a host-supplied price and redraw.
    #[wasm_bindgen(js_name = pushPrice)]
    pub fn push_price(&self, price: f64) -> Result<(), JsValue> {
        if !price.is_finite() {
            return Err(ChartError::ValidationError(format!("price must be finite, got {price}")).into());
        }
        let mut controller = self.controller.borrow_mut();
        let report = controller.push_price(price);
        self.last_move.set(report.movement);
        draw(&controller, &self.canvas, &self.label);
        Ok(())
    }

    /// Re-measure the canvas and redraw.
    pub fn redraw(&self) {
        resize_and_draw(&mut self.controller.borrow_mut(), &self.canvas, &self.label);
    }

    #[wasm_bindgen(js_name = lastPrice)]
    pub fn last_price(&self) -> Option<f64> {
        self.controller.borrow().last_price()
    }

    /// `"Up"`, `"Down"` or `"Unchanged"` for the most recent tick
    #[wasm_bindgen(js_name = lastMove)]
    pub fn last_move(&self) -> String {
        format!("{:?}", self.last_move.get())
    }

    #[wasm_bindgen(js_name = sampleCount)]
    pub fn sample_count(&self) -> usize {
        self.controller.borrow().series().len()
    }

    /// Series summary as JSON, including the formatted change text.
    #[wasm_bindgen(js_name = summaryJson)]
    pub fn summary_json(&self) -> Result<String, JsValue> {
        let controller = self.controller.borrow();
        let payload = serde_json::json!({
            "summary": controller.summary(),
            "change_text": controller.summary_text(),
        });
        serde_json::to_string(&payload).map_err(|e| ChartError::from(e).into())
    }

    /// Order estimate as JSON (`null` before the first price). `side` is
    /// `buy` or `sell`; without `limit_price` the last price is used.
    #[wasm_bindgen(js_name = estimateOrder)]
    pub fn estimate_order(&self, quantity: f64, side: &str, limit_price: Option<f64>) -> Result<String, JsValue> {
        let side = OrderSide::from_str(side)
            .map_err(|_| ChartError::ValidationError(format!("unknown order side {side:?}")))?;
        let estimate = self.controller.borrow().estimate_order(limit_price, quantity, side);
        serde_json::to_string(&estimate).map_err(|e| ChartError::from(e).into())
    }

    #[wasm_bindgen(js_name = quantityForPercent)]
    pub fn quantity_for_percent(&self, balance: f64, percent: f64) -> Option<f64> {
        self.controller.borrow().quantity_for_percent(balance, percent)
    }

    #[wasm_bindgen(js_name = percentOfBalance)]
    pub fn percent_of_balance(&self, quantity: f64, balance: f64) -> Option<f64> {
        self.controller.borrow().percent_of_balance(quantity, balance)
    }

    /// P/L against `entry_price`, e.g. `+0.56%`
    #[wasm_bindgen(js_name = profitText)]
    pub fn profit_text(&self, entry_price: f64) -> Option<String> {
        self.controller.borrow().profit_percent(entry_price).map(format_percent)
    }
}

/// Price stepper button: ±0.1, never below zero.
#[wasm_bindgen(js_name = stepPrice)]
pub fn step_price_js(current: f64, up: bool) -> f64 {
    step_price(current, if up { PRICE_STEP } else { -PRICE_STEP })
}

/// Volume stepper button: ±0.1, never below the minimum lot.
#[wasm_bindgen(js_name = stepVolume)]
pub fn step_volume_js(current: f64, up: bool) -> f64 {
    step_volume(current, if up { VOLUME_STEP } else { -VOLUME_STEP })
}

impl PriceChartApi {
    fn with_config(canvas_id: String, label_id: String, config: ChartConfig) -> Result<Self, ChartError> {
        let feed = RandomWalkFeed::new(MathRandom, config.feed, DEFAULT_START_PRICE);
        let controller = ChartController::new(config, feed)?;
        Ok(Self {
            controller: Rc::new(RefCell::new(controller)),
            canvas: Rc::new(CanvasRenderer::new(canvas_id)),
            label: Rc::new(FloatingLabel::new(label_id)),
            last_move: Rc::new(Cell::new(PriceMove::Unchanged)),
            ticker: None,
            resize_listener: None,
            pending_resize: Rc::new(RefCell::new(None)),
        })
    }
}

/// Draw the current view; a missing canvas skips the frame.
fn draw(controller: &BrowserController, canvas: &CanvasRenderer, label: &FloatingLabel) {
    let mut surface = match canvas.surface() {
        Ok(surface) => surface,
        Err(e) => {
            log_warn!(LogComponent::Presentation("PriceChartApi"), "frame skipped: {}", e);
            return;
        }
    };
    match controller.redraw(&mut surface) {
        Ok(report) => label.update(&report),
        Err(e) => {
            log_error!(LogComponent::Presentation("PriceChartApi"), "render failed: {}", e);
        }
    }
}

fn resize_and_draw(controller: &mut BrowserController, canvas: &CanvasRenderer, label: &FloatingLabel) {
    let geometry = match canvas.measure() {
        Ok(geometry) => geometry,
        Err(e) => {
            log_warn!(LogComponent::Presentation("PriceChartApi"), "resize skipped: {}", e);
            return;
        }
    };
    controller.resize(geometry);
    if let Err(e) = canvas.apply_geometry(geometry) {
        log_warn!(LogComponent::Presentation("PriceChartApi"), "resize skipped: {}", e);
        return;
    }
    draw(controller, canvas, label);
}
