//! Collaborator traits through which the engine reaches its host.
//!
//! The engine never touches files, the network, or a widget tree. The editor
//! that embeds it supplies two capabilities: text access via [`EditorHost`]
//! (pointer-to-offset mapping, line lookup, atomic span replacement) and the
//! rendered image inventory via [`RenderSurface`]. [`memory::MemoryHost`] is
//! an in-process reference implementation backed by a rope buffer, used by
//! the test suites and the CLI.

pub mod memory;

use std::ops::Range;

use crate::geometry::{Point, Rect};

/// Stable identity of a rendered image element.
///
/// The engine holds identities, never the elements themselves; bounds are
/// re-queried from the surface on every use so the live visual resize is
/// always reflected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageId(pub u64);

/// A rendered image and its current bounding box in layout coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageRegion {
    pub id: ImageId,
    pub bounds: Rect,
}

#[derive(Debug, thiserror::Error)]
pub enum PositionError {
    #[error("offset {0} is outside the document")]
    OutOfBounds(usize),
    #[error("offset {0} is not a character boundary")]
    NotCharBoundary(usize),
    #[error("line {0} is outside the document")]
    LineOutOfBounds(usize),
}

#[derive(Debug, thiserror::Error)]
pub enum ReplaceError {
    #[error("replace span {start}..{end} is outside the document")]
    OutOfBounds { start: usize, end: usize },
    #[error("host rejected the replacement: {0}")]
    Rejected(String),
}

/// Text-side host collaborator: the document/editor the engine rewrites.
///
/// Offsets are byte offsets into the document text; `line_*` operations work
/// on the line containing the given offset.
pub trait EditorHost {
    /// Map a screen point to a document offset, `None` if the point is
    /// outside any text.
    fn offset_at(&self, point: Point) -> Option<usize>;

    /// Text of the line containing `offset`, without the line terminator.
    fn line_text(&self, offset: usize) -> Result<String, PositionError>;

    /// Start/end byte offsets of the line containing `offset`, excluding the
    /// line terminator.
    fn line_span(&self, offset: usize) -> Result<Range<usize>, PositionError>;

    /// Atomically replace `span` with `text`.
    fn replace_span(&mut self, span: Range<usize>, text: &str) -> Result<(), ReplaceError>;
}

/// Render-side host collaborator: the layer that lays out images.
pub trait RenderSurface {
    /// Currently rendered images with their bounding boxes.
    fn images(&self) -> Vec<ImageRegion>;

    /// Current bounds of one image, `None` once it left the render tree.
    fn image_bounds(&self, id: ImageId) -> Option<Rect>;

    /// Apply a display width to an image element. This is the declared
    /// live-feedback effect of a drag: it changes only the visual size,
    /// never document text.
    fn set_image_width(&mut self, id: ImageId, width: u32);
}
