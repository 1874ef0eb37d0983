use crate::domain::errors::{ChartError, ChartResult};
use crate::domain::market_data::{FeedProfile, MarginTerms, PriceSeries, Precision};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

/// Value Object - RGBA colour, serialized as `#RRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self::rgb(r, g, b)
    }

    pub fn to_hex(&self) -> u32 {
        let r = (self.r * 255.0).round() as u32;
        let g = (self.g * 255.0).round() as u32;
        let b = (self.b * 255.0).round() as u32;
        (r << 16) | (g << 8) | b
    }

    /// Parse `#RRGGBB` (the leading `#` is optional)
    pub fn from_css(value: &str) -> ChartResult<Self> {
        let digits = value.trim().trim_start_matches('#');
        if digits.len() != 6 {
            return Err(ChartError::ConfigError(format!("expected #RRGGBB colour, got {value:?}")));
        }
        u32::from_str_radix(digits, 16)
            .map(Self::from_hex)
            .map_err(|_| ChartError::ConfigError(format!("invalid hex colour {value:?}")))
    }

    /// CSS string for canvas fill/stroke styles
    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:06x}", self.to_hex())
        } else {
            let hex = self.to_hex();
            format!(
                "rgba({}, {}, {}, {})",
                (hex >> 16) & 0xFF,
                (hex >> 8) & 0xFF,
                hex & 0xFF,
                self.a
            )
        }
    }

    pub fn with_alpha(&self, alpha: f32) -> Self {
        Self { a: alpha, ..*self }
    }
}

impl TryFrom<String> for Color {
    type Error = ChartError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_css(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        format!("#{:06x}", color.to_hex())
    }
}

impl From<u32> for Color {
    fn from(hex: u32) -> Self {
        Self::from_hex(hex)
    }
}

/// Value Object - vertical margins as fractions of the canvas height
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub bottom: f64,
}

impl Margins {
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    /// Fraction of the height left for the line between the margins
    pub fn usable_span(&self) -> f64 {
        1.0 - self.top - self.bottom
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self { top: 0.10, bottom: 0.10 }
    }
}

/// Value Object - band (fractions from the top) the newest price must stay in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Display)]
#[display(fmt = "[{:.2}, {:.2}]", top, bottom)]
pub struct ComfortZone {
    pub top: f64,
    pub bottom: f64,
}

impl ComfortZone {
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    pub fn contains(&self, frac: f64, tolerance: f64) -> bool {
        frac >= self.top - tolerance && frac <= self.bottom + tolerance
    }
}

impl Default for ComfortZone {
    fn default() -> Self {
        ChartVariant::default().comfort_zone()
    }
}

/// Value Object - stroke widths and colours, in layout pixels (scaled by dpr)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub line_color: Color,
    pub guide_color: Color,
    pub line_width: f64,
    pub marker_radius: f64,
    pub guide_width: f64,
    pub dash_length: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            line_color: Color::from_hex(0x6F6ADE),
            guide_color: Color::from_hex(0xD2D7DC),
            line_width: 2.0,
            marker_radius: 4.0,
            guide_width: 1.0,
            dash_length: 4.0,
        }
    }
}

/// Named presets for the layouts the chart ships with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum ChartVariant {
    /// Full-screen line chart: lower zone edge at 75%, one decimal
    #[default]
    #[display(fmt = "fullscreen")]
    Fullscreen,
    /// Mini chart: tighter zone, two decimals, faster ticks
    #[display(fmt = "compact")]
    Compact,
}

impl ChartVariant {
    pub fn comfort_zone(&self) -> ComfortZone {
        match self {
            ChartVariant::Fullscreen => ComfortZone::new(0.22, 0.75),
            ChartVariant::Compact => ComfortZone::new(0.20, 0.60),
        }
    }

    pub fn precision(&self) -> Precision {
        match self {
            ChartVariant::Fullscreen => Precision::new(1),
            ChartVariant::Compact => Precision::new(2),
        }
    }

    pub fn tick_ms(&self) -> u32 {
        match self {
            ChartVariant::Fullscreen => 1000,
            ChartVariant::Compact => 650,
        }
    }

    pub fn resize_debounce_ms(&self) -> Option<u32> {
        match self {
            ChartVariant::Fullscreen => None,
            ChartVariant::Compact => Some(150),
        }
    }

    pub fn feed(&self) -> FeedProfile {
        match self {
            ChartVariant::Fullscreen => FeedProfile::Smooth,
            ChartVariant::Compact => FeedProfile::Volatile,
        }
    }
}

/// Every tunable of the chart. Missing JSON fields fall back to the
/// `fullscreen` preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub capacity: usize,
    /// Horizontal distance between points in layout px
    pub point_spacing: f64,
    pub right_margin_ratio: f64,
    pub margins: Margins,
    pub comfort_zone: ComfortZone,
    pub precision: Precision,
    pub tick_ms: u32,
    pub resize_debounce_ms: Option<u32>,
    pub feed: FeedProfile,
    pub style: ChartStyle,
    /// Used by the order ticket next to the chart
    pub margin_terms: MarginTerms,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self::preset(ChartVariant::default())
    }
}

impl ChartConfig {
    /// Layout px; anything denser is unreadable.
    pub const MIN_POINT_SPACING: f64 = 0.1;

    pub fn preset(variant: ChartVariant) -> Self {
        Self {
            capacity: PriceSeries::DEFAULT_CAPACITY,
            point_spacing: 6.0,
            right_margin_ratio: 0.05,
            margins: Margins::default(),
            comfort_zone: variant.comfort_zone(),
            precision: variant.precision(),
            tick_ms: variant.tick_ms(),
            resize_debounce_ms: variant.resize_debounce_ms(),
            feed: variant.feed(),
            style: ChartStyle::default(),
            margin_terms: MarginTerms::default(),
        }
    }

    pub fn from_json(json: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ChartResult<()> {
        let invalid = |msg: String| -> ChartResult<()> { Err(ChartError::ValidationError(msg)) };

        if self.capacity < 2 {
            return invalid(format!("capacity must be at least 2, got {}", self.capacity));
        }
        if !(self.point_spacing.is_finite() && self.point_spacing >= Self::MIN_POINT_SPACING) {
            return invalid(format!(
                "point_spacing must be at least {}, got {}",
                Self::MIN_POINT_SPACING,
                self.point_spacing
            ));
        }
        if !(0.0..1.0).contains(&self.right_margin_ratio) {
            return invalid(format!("right_margin_ratio must be in [0, 1), got {}", self.right_margin_ratio));
        }

        let Margins { top, bottom } = self.margins;
        if !(top >= 0.0 && bottom >= 0.0 && top + bottom < 1.0) {
            return invalid(format!("margins {top}/{bottom} leave no usable span"));
        }

        let zone = self.comfort_zone;
        if !(top <= zone.top && zone.top < zone.bottom && zone.bottom <= 1.0 - bottom) {
            return invalid(format!("comfort zone {zone} must sit inside the margins {top}/{bottom}"));
        }

        if self.precision.decimals() > Precision::MAX as usize {
            return invalid(format!("precision {} exceeds {}", self.precision, Precision::MAX));
        }
        if self.tick_ms == 0 {
            return invalid("tick_ms must be positive".to_string());
        }

        let terms = self.margin_terms;
        if !(terms.contract_multiplier.is_finite() && terms.contract_multiplier > 0.0) {
            return invalid(format!("contract_multiplier must be positive, got {}", terms.contract_multiplier));
        }
        if !(terms.initial_margin_ratio > 0.0 && terms.initial_margin_ratio <= 1.0) {
            return invalid(format!("initial_margin_ratio must be in (0, 1], got {}", terms.initial_margin_ratio));
        }

        let style = &self.style;
        let widths = [style.line_width, style.marker_radius, style.guide_width, style.dash_length];
        if widths.iter().any(|w| !(w.is_finite() && *w > 0.0)) {
            return invalid("style widths must be positive".to_string());
        }
        Ok(())
    }
}

/// Value Object - layout size of the canvas element and the device pixel ratio
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceGeometry {
    pub layout_width: f64,
    pub layout_height: f64,
    pub dpr: f64,
}

impl SurfaceGeometry {
    pub fn new(layout_width: f64, layout_height: f64, dpr: f64) -> Self {
        let sane = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        Self { layout_width: sane(layout_width), layout_height: sane(layout_height), dpr }
    }

    /// Raster width in device pixels (truncated like the canvas attribute)
    pub fn width_px(&self) -> u32 {
        (self.layout_width * self.dpr) as u32
    }

    pub fn height_px(&self) -> u32 {
        (self.layout_height * self.dpr) as u32
    }

    pub fn is_empty(&self) -> bool {
        self.width_px() == 0 || self.height_px() == 0
    }
}

impl Default for SurfaceGeometry {
    fn default() -> Self {
        Self { layout_width: 0.0, layout_height: 0.0, dpr: 1.0 }
    }
}
