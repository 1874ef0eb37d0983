pub mod canvas_renderer;
pub mod rasterizer;
pub mod recording;
pub mod surface;

pub use canvas_renderer::{CanvasRenderer, CanvasSurface};
pub use rasterizer::{FrameReport, Rasterizer};
pub use recording::{DrawCommand, RecordingSurface};
pub use surface::{DrawSurface, StrokeStyle};
