use crate::domain::errors::RenderingResult;

/// Stroke parameters in device pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeStyle {
    pub color: String,
    pub width: f64,
    /// Dash and gap length; `None` draws a solid line
    pub dash: Option<f64>,
}

impl StrokeStyle {
    pub fn solid(color: impl Into<String>, width: f64) -> Self {
        Self { color: color.into(), width, dash: None }
    }

    pub fn dashed(color: impl Into<String>, width: f64, dash: f64) -> Self {
        Self { color: color.into(), width, dash: Some(dash) }
    }
}

/// The drawing primitives a chart frame needs. Coordinates are device pixels
/// with the origin at the top-left corner.
pub trait DrawSurface {
    fn clear(&mut self, width: f64, height: f64) -> RenderingResult<()>;

    /// Connected line through `points` in the given order, round joins and caps
    fn stroke_polyline(&mut self, points: &[(f64, f64)], style: &StrokeStyle) -> RenderingResult<()>;

    fn fill_circle(&mut self, center: (f64, f64), radius: f64, color: &str) -> RenderingResult<()>;

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), style: &StrokeStyle) -> RenderingResult<()>;
}
