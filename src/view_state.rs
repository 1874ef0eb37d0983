use crate::domain::chart::{PriceScale, SurfaceGeometry};
use crate::domain::market_data::Sample;
use serde::Serialize;

/// One vertex of the line in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
    pub price: f64,
}

/// Everything a single frame needs, derived from the series on every redraw.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub geometry: SurfaceGeometry,
    pub width_px: f64,
    pub height_px: f64,
    /// Horizontal distance between points in device pixels
    pub spacing_px: f64,
    /// Width left of the right margin; the newest point sits on this edge
    pub drawable_width: f64,
    /// Trailing window of the series, oldest first
    pub visible: Vec<Sample>,
    /// `None` when fewer than two samples are visible
    pub scale: Option<PriceScale>,
}

impl ViewState {
    pub fn dpr(&self) -> f64 {
        self.geometry.dpr
    }

    pub fn is_drawable(&self) -> bool {
        self.scale.is_some() && self.visible.len() >= 2 && !self.geometry.is_empty()
    }

    /// x of the point `steps_back` positions before the newest one.
    pub fn x_at(&self, steps_back: usize) -> f64 {
        self.drawable_width - steps_back as f64 * self.spacing_px
    }

    pub fn price_to_y(&self, price: f64) -> Option<f64> {
        self.scale.map(|scale| scale.y_frac(price) * self.height_px)
    }

    /// Line vertices from the newest point leftwards, stopping at the left edge.
    pub fn points(&self) -> Vec<PlotPoint> {
        let Some(scale) = self.scale else {
            return Vec::new();
        };
        self.visible
            .iter()
            .rev()
            .enumerate()
            .map(|(i, sample)| (self.x_at(i), sample.price()))
            .take_while(|(x, _)| *x >= 0.0)
            .map(|(x, price)| PlotPoint { x, y: scale.y_frac(price) * self.height_px, price })
            .collect()
    }

    pub fn last_point(&self) -> Option<PlotPoint> {
        let last = self.visible.last()?;
        let y = self.price_to_y(last.price())?;
        Some(PlotPoint { x: self.drawable_width, y, price: last.price() })
    }

    /// Vertical fraction of the newest price (0 = top edge)
    pub fn last_y_frac(&self) -> Option<f64> {
        let last = self.visible.last()?;
        self.scale.map(|scale| scale.y_frac(last.price()))
    }

    /// Last point's y converted from device to layout pixels, for DOM overlays.
    pub fn label_y_css(&self) -> Option<f64> {
        self.last_point().map(|p| p.y / self.dpr())
    }
}
