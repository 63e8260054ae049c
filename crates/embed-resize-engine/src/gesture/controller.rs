use crate::affordance::{AffordanceSignaler, CursorKind, indicator_bounds};
use crate::geometry::{Point, Rect};
use crate::gesture::DragSession;
use crate::host::{EditorHost, ImageRegion, PositionError, RenderSurface, ReplaceError};
use crate::syntax;

/// Tunables for the resize gesture.
#[derive(Debug, Clone)]
pub struct ResizeOptions {
    /// Depth of the trailing-edge grab zone, in layout units. A pointer-down
    /// within this distance inside an image's right edge starts a resize.
    pub edge_margin: f64,
}

impl Default for ResizeOptions {
    fn default() -> Self {
        Self { edge_margin: 50.0 }
    }
}

/// What the embedding editor should do with the input event just handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDisposition {
    /// The event started a resize: suppress default handling so the editor
    /// does not also treat it as a text-selection click, and stop
    /// propagation.
    Consumed,
    /// Not ours; the editor handles it normally.
    Ignored,
}

#[derive(Debug, thiserror::Error)]
pub enum CommitError {
    #[error(transparent)]
    Position(#[from] PositionError),
    #[error(transparent)]
    Replace(#[from] ReplaceError),
}

/// The drag-to-resize state machine.
///
/// Two states: Idle (`session` is `None`) and Dragging. Pointer events drive
/// the transitions; every handler leaves the controller in one of the two
/// states regardless of collaborator failures, and no failure crosses this
/// boundary as a panic.
pub struct ResizeController<H, S, A: AffordanceSignaler> {
    host: H,
    surface: S,
    signaler: A,
    options: ResizeOptions,
    /// The single mutable slot of the core. `Some` iff Dragging.
    session: Option<DragSession>,
    /// Live hover/drag indicator, if one is shown.
    indicator: Option<A::Handle>,
}

impl<H, S, A> ResizeController<H, S, A>
where
    H: EditorHost,
    S: RenderSurface,
    A: AffordanceSignaler,
{
    pub fn new(host: H, surface: S, signaler: A) -> Self {
        Self::with_options(host, surface, signaler, ResizeOptions::default())
    }

    pub fn with_options(host: H, surface: S, signaler: A, options: ResizeOptions) -> Self {
        Self {
            host,
            surface,
            signaler,
            options,
            session: None,
            indicator: None,
        }
    }

    /// Idle → Dragging, if the press lands in a grab zone over a resizable
    /// embed line. Every failed precondition leaves the controller Idle and
    /// lets the editor handle the event.
    pub fn on_pointer_down(&mut self, point: Point) -> EventDisposition {
        if self.session.is_some() {
            return EventDisposition::Ignored;
        }
        let Some(offset) = self.host.offset_at(point) else {
            return EventDisposition::Ignored;
        };
        let Some(region) = self.grab_zone_hit(point) else {
            return EventDisposition::Ignored;
        };
        let line = match self.host.line_text(offset) {
            Ok(line) => line,
            Err(err) => {
                tracing::debug!("resize not started, line lookup failed: {}", err);
                return EventDisposition::Ignored;
            }
        };
        if !syntax::is_embed_line(&line) {
            return EventDisposition::Ignored;
        }
        // Legacy lines are normalized up front so the commit always rewrites
        // canonical syntax.
        let markup = match syntax::normalize_to_canonical(&line) {
            Ok(canonical) => canonical,
            Err(_) => line,
        };

        self.session = Some(DragSession {
            image: region.id,
            anchor: offset,
            width: region.bounds.width.max(0.0).floor() as u32,
            markup,
        });
        self.show_indicator(region.bounds);
        self.signaler.set_cursor(CursorKind::ColResize);
        EventDisposition::Consumed
    }

    /// While Dragging: recompute the candidate width against the element's
    /// current bounds and apply it immediately as live feedback. While Idle:
    /// hover affordance only; document state is never touched.
    pub fn on_pointer_move(&mut self, point: Point) {
        match self.session.as_mut() {
            Some(session) => {
                let Some(bounds) = self.surface.image_bounds(session.image) else {
                    tracing::debug!(
                        "image left the render tree mid-drag, keeping width {}",
                        session.width
                    );
                    return;
                };
                let width = (point.x - bounds.left()).floor().max(0.0) as u32;
                session.width = width;
                self.surface.set_image_width(session.image, width);
                // The element just changed size; track the fresh bounds.
                let bounds = self.surface.image_bounds(session.image).unwrap_or(bounds);
                if let Some(handle) = self.indicator.as_mut() {
                    self.signaler.update_indicator(handle, indicator_bounds(bounds));
                }
                self.signaler.set_cursor(CursorKind::ColResize);
            }
            None => self.update_hover(point),
        }
    }

    /// Dragging → Idle. The commit is best-effort: the line span is
    /// re-resolved fresh from the anchor, the captured markup is rewritten
    /// with the final width and replaced atomically; failures are reported
    /// and the session is cleared either way. A pointer-up while Idle is a
    /// no-op, which makes duplicate or out-of-order releases idempotent.
    pub fn on_pointer_up(&mut self, _point: Point) {
        let Some(session) = self.session.take() else {
            return;
        };
        if let Err(err) = self.commit(&session) {
            tracing::warn!(
                "abandoning resize of {:?} at offset {}: {}",
                session.markup,
                session.anchor,
                err
            );
        }
        self.clear_affordance();
    }

    fn commit(&mut self, session: &DragSession) -> Result<(), CommitError> {
        // Re-resolved, not cached: the document may have shifted since the
        // gesture started.
        let span = self.host.line_span(session.anchor)?;
        let rewritten = syntax::rewrite_width(&session.markup, session.width);
        self.host.replace_span(span, &rewritten)?;
        Ok(())
    }

    fn update_hover(&mut self, point: Point) {
        match self.grab_zone_hit(point) {
            Some(region) => {
                self.show_indicator(region.bounds);
                self.signaler.set_cursor(CursorKind::ColResize);
            }
            None => self.clear_affordance(),
        }
    }

    /// The first rendered image whose trailing-edge grab zone contains the
    /// point: vertically within the image, horizontally within
    /// `(right - margin, right]`.
    fn grab_zone_hit(&self, point: Point) -> Option<ImageRegion> {
        self.surface
            .images()
            .into_iter()
            .find(|region| self.in_grab_zone(region.bounds, point))
    }

    fn in_grab_zone(&self, bounds: Rect, point: Point) -> bool {
        point.y >= bounds.top()
            && point.y < bounds.bottom()
            && point.x > bounds.right() - self.options.edge_margin
            && point.x <= bounds.right()
    }
}

impl<H, S, A: AffordanceSignaler> ResizeController<H, S, A> {
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn options(&self) -> &ResizeOptions {
        &self.options
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn signaler(&self) -> &A {
        &self.signaler
    }

    /// Drop any live session and affordance, restoring the default cursor.
    /// Runs on drop; hosts disposing of the editing surface early can call
    /// it directly.
    pub fn detach(&mut self) {
        self.session = None;
        self.clear_affordance();
    }

    fn show_indicator(&mut self, image_bounds: Rect) {
        let bounds = indicator_bounds(image_bounds);
        match self.indicator.as_mut() {
            Some(handle) => self.signaler.update_indicator(handle, bounds),
            None => self.indicator = Some(self.signaler.create_indicator(bounds)),
        }
    }

    fn clear_affordance(&mut self) {
        if let Some(handle) = self.indicator.take() {
            self.signaler.destroy_indicator(handle);
        }
        self.signaler.set_cursor(CursorKind::Default);
    }
}

impl<H, S, A: AffordanceSignaler> Drop for ResizeController<H, S, A> {
    fn drop(&mut self) {
        self.detach();
    }
}
