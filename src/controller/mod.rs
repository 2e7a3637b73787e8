/// Controller subsystem - Applies abstract edit, movement and search requests
///
/// The Editor owns the document model and dispatches every request through
/// the Edit/Search mode state machine, recording inverse actions for undo.

pub mod editor;
pub mod history;
pub mod mode;
pub mod movement;
pub mod selection;

// Re-export public interface
pub use editor::{Editor, EditorBuilder};
pub use mode::Mode;
