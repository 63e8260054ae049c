pub mod affordance;
pub mod geometry;
pub mod gesture;
pub mod host;
pub mod syntax;

// Re-export key types for easier usage
pub use affordance::{AffordanceSignaler, CursorKind, NullSignaler, indicator_bounds};
pub use geometry::{Point, Rect};
pub use gesture::{DragSession, EventDisposition, ResizeController, ResizeOptions};
pub use host::{
    EditorHost, ImageId, ImageRegion, PositionError, RenderSurface, ReplaceError,
    memory::MemoryHost,
};
pub use syntax::{
    FormatError, ImageEmbed, extract_width, is_embed_line, normalize_to_canonical, rewrite_width,
};
