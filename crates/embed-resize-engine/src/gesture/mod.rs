//! The resize gesture: drag lifecycle and commit.
//!
//! [`ResizeController`] owns the whole lifecycle: a pointer-down near an
//! image's trailing edge opens a [`DragSession`], pointer-moves feed live
//! width feedback to the render surface, and pointer-up rewrites the owning
//! embed line through the editor host. All collaborator access goes through
//! the traits in [`crate::host`] and [`crate::affordance`]; the controller
//! itself is plain single-threaded state driven to completion by each event.

pub mod controller;
pub mod session;

pub use controller::{CommitError, EventDisposition, ResizeController, ResizeOptions};
pub use session::DragSession;
