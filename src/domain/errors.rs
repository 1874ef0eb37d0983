use wasm_bindgen::JsValue;

/// Everything that can go wrong around the chart. The math itself never fails;
/// errors come from configuration and from the browser surface.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartError {
    ValidationError(String),
    ConfigError(String),
    RenderingError(String),
    SurfaceError(String),
}

impl std::fmt::Display for ChartError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            ChartError::ConfigError(msg) => write!(f, "Config Error: {}", msg),
            ChartError::RenderingError(msg) => write!(f, "Rendering Error: {}", msg),
            ChartError::SurfaceError(msg) => write!(f, "Surface Error: {}", msg),
        }
    }
}

impl std::error::Error for ChartError {}

impl From<serde_json::Error> for ChartError {
    fn from(err: serde_json::Error) -> Self {
        ChartError::ConfigError(err.to_string())
    }
}

impl From<ChartError> for JsValue {
    fn from(err: ChartError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

pub type ChartResult<T> = Result<T, ChartError>;
pub type RenderingResult<T> = Result<T, ChartError>;

/// Canvas calls report failures as opaque `JsValue`s.
pub fn rendering_error(context: &str, err: JsValue) -> ChartError {
    ChartError::RenderingError(format!("{}: {:?}", context, err))
}
