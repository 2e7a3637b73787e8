use crate::document_model::LineId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    #[error("line {line} is beyond the end of the document ({line_count} lines)")]
    LineOutOfRange { line: usize, line_count: usize },

    #[error("offset {offset} is beyond the end of line {line} ({len} characters)")]
    OffsetOutOfRange { line: usize, offset: usize, len: usize },

    #[error("line handle {0:?} no longer refers to a live line")]
    StaleLine(LineId),
}

pub type Result<T> = std::result::Result<T, EditorError>;
