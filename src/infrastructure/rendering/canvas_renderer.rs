use super::surface::{DrawSurface, StrokeStyle};
use crate::domain::chart::SurfaceGeometry;
use crate::domain::errors::{ChartError, ChartResult, RenderingResult, rendering_error};
use crate::domain::logging::{LogComponent, get_logger};
use js_sys::Array;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Canvas 2D implementation of [`DrawSurface`].
pub struct CanvasSurface {
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(context: CanvasRenderingContext2d) -> Self {
        Self { context }
    }

    fn trace_path(&self, points: &[(f64, f64)]) {
        self.context.begin_path();
        for (i, &(x, y)) in points.iter().enumerate() {
            if i == 0 {
                self.context.move_to(x, y);
            } else {
                self.context.line_to(x, y);
            }
        }
    }
}

impl DrawSurface for CanvasSurface {
    fn clear(&mut self, width: f64, height: f64) -> RenderingResult<()> {
        self.context.clear_rect(0.0, 0.0, width, height);
        Ok(())
    }

    fn stroke_polyline(&mut self, points: &[(f64, f64)], style: &StrokeStyle) -> RenderingResult<()> {
        if points.is_empty() {
            return Ok(());
        }
        self.context.set_line_width(style.width);
        self.context.set_stroke_style_str(&style.color);
        self.context.set_line_join("round");
        self.context.set_line_cap("round");
        self.trace_path(points);
        self.context.stroke();
        Ok(())
    }

    fn fill_circle(&mut self, center: (f64, f64), radius: f64, color: &str) -> RenderingResult<()> {
        self.context.set_fill_style_str(color);
        self.context.begin_path();
        self.context
            .arc(center.0, center.1, radius, 0.0, std::f64::consts::PI * 2.0)
            .map_err(|e| rendering_error("arc", e))?;
        self.context.fill();
        Ok(())
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), style: &StrokeStyle) -> RenderingResult<()> {
        self.context.save();
        if let Some(dash) = style.dash {
            let segments = Array::of2(&JsValue::from_f64(dash), &JsValue::from_f64(dash));
            self.context
                .set_line_dash(&segments)
                .map_err(|e| rendering_error("setLineDash", e))?;
        }
        self.context.set_stroke_style_str(&style.color);
        self.context.set_line_width(style.width);
        self.trace_path(&[from, to]);
        self.context.stroke();
        self.context.restore();
        Ok(())
    }
}

/// Finds the chart canvas by id and keeps its backing store sized in device pixels.
pub struct CanvasRenderer {
    canvas_id: String,
}

impl CanvasRenderer {
    pub fn new(canvas_id: impl Into<String>) -> Self {
        Self { canvas_id: canvas_id.into() }
    }

    pub fn canvas_id(&self) -> &str {
        &self.canvas_id
    }

    fn canvas(&self) -> ChartResult<HtmlCanvasElement> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| ChartError::SurfaceError("document not available".to_string()))?;
        document
            .get_element_by_id(&self.canvas_id)
            .ok_or_else(|| ChartError::SurfaceError(format!("canvas #{} not found", self.canvas_id)))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| ChartError::SurfaceError(format!("#{} is not a canvas", self.canvas_id)))
    }

    /// Layout size of the element and the current device pixel ratio.
    pub fn measure(&self) -> ChartResult<SurfaceGeometry> {
        let canvas = self.canvas()?;
        let rect = canvas.get_bounding_client_rect();
        let dpr = web_sys::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
        Ok(SurfaceGeometry::new(rect.width(), rect.height(), dpr))
    }

    /// Resize the backing store to `layout * dpr`; resets the context state.
    pub fn apply_geometry(&self, geometry: SurfaceGeometry) -> ChartResult<()> {
        let canvas = self.canvas()?;
        canvas.set_width(geometry.width_px());
        canvas.set_height(geometry.height_px());
        get_logger().debug(
            LogComponent::Infrastructure("CanvasRenderer"),
            &format!(
                "canvas #{} sized to {}x{} (dpr {})",
                self.canvas_id,
                geometry.width_px(),
                geometry.height_px(),
                geometry.dpr
            ),
        );
        Ok(())
    }

    pub fn surface(&self) -> ChartResult<CanvasSurface> {
        let context = self
            .canvas()?
            .get_context("2d")
            .map_err(|e| rendering_error("getContext", e))?
            .ok_or_else(|| ChartError::SurfaceError("2d context unavailable".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| ChartError::SurfaceError("failed to cast to 2D context".to_string()))?;
        Ok(CanvasSurface::new(context))
    }
}
