/// Document model subsystem - Core data structures and text operations
///
/// Line storage, cursor addressing, highlight sets, the inverse-action
/// undo log and search state. Nothing here knows about modes or input.

pub mod cursor;
pub mod highlight;
pub mod line_store;
pub mod search_state;
pub mod undo;

// Re-export main types for convenience
pub use cursor::{Cursor, Position};
pub use highlight::HighlightSet;
pub use line_store::{Line, LineId, LineStore, Lines};
pub use search_state::{MatchAnchor, SearchState};
pub use undo::{Outcome, SwapDirection, UndoAction, UndoStack};
