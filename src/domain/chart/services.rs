use super::value_objects::{ChartConfig, ComfortZone, Margins, SurfaceGeometry};
use crate::domain::logging::LogComponent;
use crate::domain::market_data::{PriceSeries, price_bounds};
use crate::log_trace;
use crate::view_state::ViewState;
use serde::Serialize;

/// How many trailing samples fit into `drawable_width` at a constant `spacing`.
///
/// Two extra points keep the line running into the left edge; the result never
/// drops below 2 so a line can always be drawn.
pub fn visible_count(drawable_width: f64, spacing: f64) -> usize {
    if !(spacing > 0.0) || !drawable_width.is_finite() || drawable_width <= 0.0 {
        return 2;
    }
    // float-to-int casts saturate, so only the `+ 2` can overflow
    ((drawable_width / spacing).floor() as usize).saturating_add(2).max(2)
}

/// Which edge of the price range was stretched to pull the last point into the zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BandAdjustment {
    None,
    ExtendedMax,
    ExtendedMin,
}

/// Price → vertical fraction mapping (0 at the top of the canvas, 1 at the bottom).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceScale {
    pub min: f64,
    pub max: f64,
    pub margins: Margins,
    pub adjustment: BandAdjustment,
}

impl PriceScale {
    /// Plain min/max scale over `prices`, no band fitting.
    pub fn raw(prices: &[f64], margins: Margins) -> Option<Self> {
        let (min, max) = price_bounds(prices.iter().copied())?;
        Some(Self { min, max, margins, adjustment: BandAdjustment::None })
    }

    /// Fit `prices` (oldest first) and stretch the range so the last price
    /// lands inside `zone`.
    ///
    /// Only one side moves: `max` grows when the last price sits above the
    /// zone, `min` drops when it sits below. The stretched range applies to
    /// every point, so older points may leave the margins.
    pub fn fit(prices: &[f64], margins: Margins, zone: ComfortZone) -> Option<Self> {
        let last = *prices.last()?;
        let mut scale = Self::raw(prices, margins)?;
        let span = margins.usable_span();

        // a flat window maps to the centre; stretching it changes nothing
        let last_frac = scale.y_frac(last);

        if last_frac < zone.top {
            let alpha = (margins.top + span - zone.top) / span;
            scale.max = scale.min + (last - scale.min) / alpha;
            scale.adjustment = BandAdjustment::ExtendedMax;
        } else if last_frac > zone.bottom {
            let alpha = (margins.top + span - zone.bottom) / span;
            scale.min = (last - alpha * scale.max) / (1.0 - alpha);
            scale.adjustment = BandAdjustment::ExtendedMin;
        }

        if scale.adjustment != BandAdjustment::None {
            log_trace!(
                LogComponent::Domain("PriceScale"),
                "last {:.4} at {:.3} outside {}, range now {:.4}..{:.4}",
                last,
                last_frac,
                zone,
                scale.min,
                scale.max
            );
        }
        Some(scale)
    }

    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Vertical fraction for `price`; a degenerate range maps everything to
    /// the middle of the usable span.
    pub fn y_frac(&self, price: f64) -> f64 {
        let span = self.margins.usable_span();
        let range = self.range();
        if range == 0.0 {
            return self.margins.top + span / 2.0;
        }
        let alpha = (price - self.min) / range;
        self.margins.top + span * (1.0 - alpha)
    }
}

/// Derive the frame for the current series and surface. Pure; nothing is cached.
pub fn compute_view(series: &PriceSeries, config: &ChartConfig, geometry: SurfaceGeometry) -> ViewState {
    let width_px = geometry.width_px() as f64;
    let height_px = geometry.height_px() as f64;
    let spacing_px = config.point_spacing * geometry.dpr;
    let drawable_width = width_px * (1.0 - config.right_margin_ratio);

    let count = visible_count(drawable_width, spacing_px);
    let visible: Vec<_> = series.tail(count).copied().collect();

    let scale = if visible.len() >= 2 {
        let prices: Vec<f64> = visible.iter().map(|s| s.price()).collect();
        PriceScale::fit(&prices, config.margins, config.comfort_zone)
    } else {
        None
    };

    ViewState { geometry, width_px, height_px, spacing_px, drawable_width, visible, scale }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn visible_count_matches_constant_zoom() {
        assert_eq!(visible_count(600.0, 6.0), 102);
        assert_eq!(visible_count(0.0, 6.0), 2);
        assert_eq!(visible_count(5.0, 6.0), 2);
        assert_eq!(visible_count(100.0, 0.0), 2);
    }

    #[test]
    fn visible_count_saturates_on_tiny_spacing() {
        assert_eq!(visible_count(1000.0, 1e-300), usize::MAX);
        assert_eq!(visible_count(f64::MAX, 1e-10), usize::MAX);
    }

    #[test]
    fn top_extension_pins_last_price_to_zone_top() {
        let scale = PriceScale::fit(
            &[100.0, 102.0, 98.0, 105.0],
            Margins::new(0.10, 0.10),
            ComfortZone::new(0.20, 0.60),
        )
        .unwrap();
        assert_eq!(scale.adjustment, BandAdjustment::ExtendedMax);
        assert!((scale.min - 98.0).abs() < EPS);
        assert!((scale.max - 106.0).abs() < EPS);
        assert!((scale.y_frac(105.0) - 0.20).abs() < EPS);
        assert!((scale.y_frac(98.0) - 0.90).abs() < EPS);
    }

    #[test]
    fn bottom_extension_pins_last_price_to_zone_bottom() {
        let zone = ComfortZone::new(0.22, 0.75);
        let scale = PriceScale::fit(&[105.0, 110.0, 100.0], Margins::default(), zone).unwrap();
        assert_eq!(scale.adjustment, BandAdjustment::ExtendedMin);
        assert!((scale.max - 110.0).abs() < EPS);
        assert!(scale.min < 100.0);
        assert!((scale.y_frac(100.0) - 0.75).abs() < EPS);
    }

    #[test]
    fn last_price_inside_zone_keeps_raw_range() {
        let scale = PriceScale::fit(
            &[100.0, 110.0, 105.0],
            Margins::default(),
            ComfortZone::new(0.22, 0.75),
        )
        .unwrap();
        assert_eq!(scale.adjustment, BandAdjustment::None);
        assert_eq!((scale.min, scale.max), (100.0, 110.0));
        assert!((scale.y_frac(105.0) - 0.5).abs() < EPS);
    }

    #[test]
    fn flat_series_maps_to_center() {
        let scale = PriceScale::fit(&[50.0, 50.0, 50.0], Margins::default(), ComfortZone::new(0.2, 0.6))
            .unwrap();
        assert_eq!(scale.adjustment, BandAdjustment::None);
        assert_eq!(scale.range(), 0.0);
        assert!((scale.y_frac(50.0) - 0.5).abs() < EPS);
    }

    #[test]
    fn empty_input_has_no_scale() {
        assert!(PriceScale::fit(&[], Margins::default(), ComfortZone::default()).is_none());
    }
}
