#![cfg(target_arch = "wasm32")]
use sparkline_chart_wasm::application::ChartController;
use sparkline_chart_wasm::domain::chart::ChartConfig;
use sparkline_chart_wasm::domain::market_data::{FeedProfile, RandomWalkFeed};
use sparkline_chart_wasm::infrastructure::rendering::CanvasRenderer;
use sparkline_chart_wasm::infrastructure::ui::FloatingLabel;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlElement;

wasm_bindgen_test_configure!(run_in_browser);

fn mount(html: &str) {
    let document = gloo::utils::document();
    let host = document.create_element("div").unwrap();
    host.set_inner_html(html);
    gloo::utils::body().append_child(&host).unwrap();
}

#[wasm_bindgen_test]
fn missing_canvas_is_a_surface_error() {
    let renderer = CanvasRenderer::new("no-such-canvas");
    assert!(renderer.measure().is_err());
    assert!(renderer.surface().is_err());
}

#[wasm_bindgen_test]
fn draws_and_moves_label() {
    mount(
        r#"<canvas id="chart-a" style="width:300px;height:150px"></canvas>
           <div id="label-a" style="position:absolute"><span class="fp-value"></span></div>"#,
    );

    let renderer = CanvasRenderer::new("chart-a");
    let geometry = renderer.measure().unwrap();
    assert_eq!(geometry.layout_width, 300.0);
    renderer.apply_geometry(geometry).unwrap();

    let feed = RandomWalkFeed::new(|| 0.25, FeedProfile::Smooth, 1805.0);
    let mut chart = ChartController::new(ChartConfig::default(), feed).unwrap();
    chart.resize(geometry);
    for _ in 0..20 {
        chart.tick();
    }

    let mut surface = renderer.surface().unwrap();
    let report = chart.redraw(&mut surface).unwrap();
    assert!(report.drawn);

    FloatingLabel::new("label-a").update(&report);
    let label: HtmlElement = gloo::utils::document()
        .get_element_by_id("label-a")
        .unwrap()
        .dyn_into()
        .unwrap();
    let text = report.label_text.unwrap();
    assert_eq!(label.text_content().unwrap().trim(), text);
    assert_eq!(label.get_attribute("aria-label").unwrap(), format!("Current price {text}"));
    assert!(label.style().get_property_value("top").unwrap().ends_with("px"));
}
