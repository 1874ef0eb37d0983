//! DOM overlay that follows the newest point of the line.

use crate::domain::logging::{LogComponent, get_logger};
use crate::infrastructure::rendering::FrameReport;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

/// Used when the label has not been laid out yet
const FALLBACK_LABEL_HEIGHT: f64 = 16.0;

/// `top` so the label's vertical centre sits on `y_css`.
pub fn label_top(y_css: f64, label_height: f64) -> f64 {
    let height = if label_height > 0.0 { label_height } else { FALLBACK_LABEL_HEIGHT };
    y_css - height / 2.0
}

/// Floating price label next to the chart. Text goes into a `.fp-value`
/// child when there is one, otherwise into the element itself.
#[derive(Debug, Clone)]
pub struct FloatingLabel {
    element_id: String,
}

impl FloatingLabel {
    pub fn new(element_id: impl Into<String>) -> Self {
        Self { element_id: element_id.into() }
    }

    fn element(&self) -> Option<HtmlElement> {
        web_sys::window()?
            .document()?
            .get_element_by_id(&self.element_id)?
            .dyn_into::<HtmlElement>()
            .ok()
    }

    /// Follow the frame's last point. Missing element or blank frame: no-op.
    pub fn update(&self, report: &FrameReport) {
        let (Some(text), Some(y_css)) = (report.label_text.as_deref(), report.label_y_css) else {
            return;
        };
        let Some(element) = self.element() else {
            get_logger().debug(
                LogComponent::Infrastructure("FloatingLabel"),
                &format!("label #{} not found, skipping", self.element_id),
            );
            return;
        };

        match element.query_selector(".fp-value") {
            Ok(Some(value)) => value.set_text_content(Some(text)),
            _ => element.set_text_content(Some(text)),
        }
        if let Err(e) = element.set_attribute("aria-label", &format!("Current price {}", text)) {
            get_logger().warn(
                LogComponent::Infrastructure("FloatingLabel"),
                &format!("failed to set aria-label: {:?}", e),
            );
        }

        let top = label_top(y_css, element.offset_height() as f64);
        if let Err(e) = element.style().set_property("top", &format!("{}px", top)) {
            get_logger().warn(
                LogComponent::Infrastructure("FloatingLabel"),
                &format!("failed to move label: {:?}", e),
            );
        }
    }
}
