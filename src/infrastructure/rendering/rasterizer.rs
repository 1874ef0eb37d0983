use super::surface::{DrawSurface, StrokeStyle};
use crate::domain::chart::{ChartConfig, ChartStyle};
use crate::domain::errors::RenderingResult;
use crate::domain::logging::LogComponent;
use crate::domain::market_data::Precision;
use crate::log_trace;
use crate::view_state::{PlotPoint, ViewState};
use serde::Serialize;

/// What a frame ended up showing; the host uses it to move DOM overlays.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FrameReport {
    pub drawn: bool,
    pub point_count: usize,
    pub last_point: Option<PlotPoint>,
    /// Last point's y in layout (CSS) pixels
    pub label_y_css: Option<f64>,
    /// Last price formatted with the display precision
    pub label_text: Option<String>,
}

/// Turns a [`ViewState`] into drawing calls: the line, a marker on the newest
/// point and a dashed guide at its height.
#[derive(Debug, Clone)]
pub struct Rasterizer {
    style: ChartStyle,
    precision: Precision,
}

impl Rasterizer {
    pub fn new(style: ChartStyle, precision: Precision) -> Self {
        Self { style, precision }
    }

    pub fn from_config(config: &ChartConfig) -> Self {
        Self::new(config.style.clone(), config.precision)
    }

    pub fn render<S: DrawSurface + ?Sized>(
        &self,
        view: &ViewState,
        surface: &mut S,
    ) -> RenderingResult<FrameReport> {
        surface.clear(view.width_px, view.height_px)?;

        if !view.is_drawable() {
            log_trace!(
                LogComponent::Infrastructure("Rasterizer"),
                "skipping frame: {} visible samples",
                view.visible.len()
            );
            return Ok(FrameReport::default());
        }

        let (Some(last), Some(label_y_css)) = (view.last_point(), view.label_y_css()) else {
            return Ok(FrameReport::default());
        };

        let dpr = view.dpr();
        let line_color = self.style.line_color.to_css();

        let points: Vec<(f64, f64)> = view.points().iter().map(|p| (p.x, p.y)).collect();
        surface.stroke_polyline(&points, &StrokeStyle::solid(line_color.clone(), self.style.line_width * dpr))?;

        surface.fill_circle((last.x, last.y), self.style.marker_radius * dpr, &line_color)?;

        let guide = StrokeStyle::dashed(
            self.style.guide_color.to_css(),
            self.style.guide_width * dpr,
            self.style.dash_length * dpr,
        );
        surface.stroke_line((0.0, last.y), (view.width_px, last.y), &guide)?;

        Ok(FrameReport {
            drawn: true,
            point_count: points.len(),
            last_point: Some(last),
            label_y_css: Some(label_y_css),
            label_text: Some(self.precision.format(last.price)),
        })
    }
}
