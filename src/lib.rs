//! noter - a line-based text editing engine.
//!
//! The engine keeps a document as newline-terminated lines and exposes
//! editing, cursor movement, selection, undo and incremental search as
//! plain method calls on [`Editor`]. Rendering, key mapping and I/O stay
//! with the host, which plugs in through [`Content`] providers and reads
//! back display data from the [`view`] module.

pub mod config;
pub mod content;
pub mod controller;
pub mod document_model;
pub mod error;
pub mod view;

pub use config::{RcConfig, RcLoader};
#[cfg(feature = "clipboard")]
pub use content::SystemClipboard;
pub use content::{Content, FileContent, MemoryContent};
pub use controller::{Editor, EditorBuilder, Mode};
pub use document_model::{Outcome, Position};
pub use error::{EditorError, Result};
pub use view::{StatusLine, Viewport, VisibleLine};
