use sparkline_chart_wasm::domain::chart::{ChartConfig, SurfaceGeometry, compute_view, visible_count};
use sparkline_chart_wasm::domain::market_data::{Price, PriceSeries, Sample, Timestamp};

fn series_of(len: usize) -> PriceSeries {
    let mut series = PriceSeries::new(400);
    for i in 0..len {
        series.push(Sample::new(Timestamp::from_millis(i as u64 * 1000), Price::from(100.0 + (i % 7) as f64)));
    }
    series
}

fn flush_config() -> ChartConfig {
    ChartConfig { right_margin_ratio: 0.0, ..ChartConfig::default() }
}

#[test]
fn window_size_is_independent_of_history_length() {
    let geometry = SurfaceGeometry::new(600.0, 300.0, 1.0);
    let config = flush_config();

    let short = compute_view(&series_of(200), &config, geometry);
    let long = compute_view(&series_of(400), &config, geometry);

    assert_eq!(visible_count(600.0, 6.0), 102);
    assert_eq!(short.visible.len(), 102);
    assert_eq!(long.visible.len(), 102);
    assert_eq!(long.visible.last(), series_of(400).latest());
}

#[test]
fn short_history_is_shown_whole() {
    let view = compute_view(&series_of(30), &flush_config(), SurfaceGeometry::new(600.0, 300.0, 1.0));
    assert_eq!(view.visible.len(), 30);
}

#[test]
fn spacing_scales_with_device_pixel_ratio() {
    let config = ChartConfig::default();
    let view = compute_view(&series_of(400), &config, SurfaceGeometry::new(400.0, 200.0, 3.0));

    assert_eq!(view.width_px, 1200.0);
    assert_eq!(view.spacing_px, 18.0);
    // 1140 px drawable / 18 px spacing
    assert_eq!(view.visible.len(), 65);
}

#[test]
fn newest_point_is_anchored_to_the_right_margin() {
    let view = compute_view(&series_of(50), &ChartConfig::default(), SurfaceGeometry::new(200.0, 100.0, 1.0));
    let points = view.points();

    assert!((points[0].x - 190.0).abs() < 1e-9);
    assert!((points[1].x - 184.0).abs() < 1e-9);
    assert!(points.iter().all(|p| p.x >= 0.0));
    assert_eq!(points[0].price, view.visible.last().unwrap().price());
}

#[test]
fn extreme_density_shows_whole_history_without_overflow() {
    // built directly, bypassing validation
    let config = ChartConfig { point_spacing: 1e-300, ..ChartConfig::default() };
    let view = compute_view(&series_of(120), &config, SurfaceGeometry::new(1000.0, 300.0, 1.0));

    assert_eq!(view.visible.len(), 120);
    assert!(config.validate().is_err());
}
