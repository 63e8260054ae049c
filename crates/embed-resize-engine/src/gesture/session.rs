use crate::host::ImageId;

/// One in-progress resize gesture.
///
/// Created when a pointer-down is accepted, destroyed on every pointer-up
/// path (and on controller detach). At most one session is live at a time;
/// the controller owns it exclusively.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    /// Identity of the visual element being resized. Identity only: bounds
    /// are re-read from the surface on every move.
    pub image: ImageId,
    /// Document byte offset used to re-locate the owning line at commit
    /// time, after the document may have shifted.
    pub anchor: usize,
    /// Live candidate width, updated continuously during the drag.
    pub width: u32,
    /// Normalized embed markup captured at gesture start. The commit step
    /// rewrites this template instead of re-reading possibly-stale text.
    pub markup: String,
}
