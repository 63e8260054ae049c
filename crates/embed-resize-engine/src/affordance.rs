//! Visual affordance contract for the resize gesture.
//!
//! The controller never draws; it asks an [`AffordanceSignaler`] to show a
//! drag indicator at an image's trailing edge and to switch the pointer
//! cursor. Each indicator is an owned handle with an explicit
//! create/update/destroy lifecycle, so an embedder can run several editing
//! surfaces without any shared global indicator.

use crate::geometry::Rect;

/// Pointer cursor requested while hovering or dragging a grab zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorKind {
    #[default]
    Default,
    /// Horizontal-resize icon.
    ColResize,
}

/// Thickness of the indicator bar in layout units.
pub const INDICATOR_THICKNESS: f64 = 3.0;
/// How far inside the image's right edge the bar sits.
pub const INDICATOR_EDGE_INSET: f64 = 10.0;

/// Bounds of the drag indicator for an image: a thin bar one third of the
/// element height, vertically centered, inset from the trailing edge.
///
/// Pure so a harness can assert on the exact geometry the signaler receives.
pub fn indicator_bounds(image: Rect) -> Rect {
    let bar_height = image.height / 3.0;
    Rect::new(
        image.right() - INDICATOR_EDGE_INSET,
        image.top() + bar_height,
        INDICATOR_THICKNESS,
        bar_height,
    )
}

/// Rendering collaborator that materializes hover/drag affordances.
///
/// Implementations own the visual representation; the engine only dictates
/// when an indicator exists and where it sits.
pub trait AffordanceSignaler {
    /// Opaque token for one live indicator.
    type Handle;

    fn create_indicator(&mut self, bounds: Rect) -> Self::Handle;

    fn update_indicator(&mut self, handle: &mut Self::Handle, bounds: Rect);

    fn destroy_indicator(&mut self, handle: Self::Handle);

    fn set_cursor(&mut self, cursor: CursorKind);
}

/// Signaler that renders nothing, for headless embedders.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSignaler;

impl AffordanceSignaler for NullSignaler {
    type Handle = ();

    fn create_indicator(&mut self, _bounds: Rect) -> Self::Handle {}

    fn update_indicator(&mut self, _handle: &mut Self::Handle, _bounds: Rect) {}

    fn destroy_indicator(&mut self, _handle: Self::Handle) {}

    fn set_cursor(&mut self, _cursor: CursorKind) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_sits_in_the_middle_third_of_the_trailing_edge() {
        let image = Rect::new(100.0, 50.0, 300.0, 90.0);
        let bar = indicator_bounds(image);
        assert_eq!(bar.x, 100.0 + 300.0 - INDICATOR_EDGE_INSET);
        assert_eq!(bar.y, 80.0);
        assert_eq!(bar.width, INDICATOR_THICKNESS);
        assert_eq!(bar.height, 30.0);
    }

    #[test]
    fn indicator_tracks_resized_image() {
        let before = indicator_bounds(Rect::new(0.0, 0.0, 200.0, 60.0));
        let after = indicator_bounds(Rect::new(0.0, 0.0, 120.0, 60.0));
        assert_eq!(before.height, after.height);
        assert_eq!(after.x, 120.0 - INDICATOR_EDGE_INSET);
    }
}
