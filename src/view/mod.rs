/// View subsystem - Render-agnostic display data
///
/// Exposes the visible window, per-character highlight flags and status
/// line through the ViewModel abstraction; drawing itself is left to the host.

pub mod view_model;

// Re-export public interface
pub use view_model::{Cell, DocumentViewModel, StatusLine, ViewModel, Viewport, VisibleLine};
