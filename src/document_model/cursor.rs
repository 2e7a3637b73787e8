use super::line_store::{LineId, LineStore};

/// Absolute document address: 0-based line index and character offset.
///
/// Used wherever a position has to outlive the line it points into,
/// for example inside undo entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// The edit position, held as a line handle plus offset.
///
/// `x` always addresses an existing character, which at line end is the
/// trailing newline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub line: LineId,
    pub x: usize,
}

impl Cursor {
    pub fn new(line: LineId, x: usize) -> Self {
        Self { line, x }
    }

    pub fn at_head(store: &LineStore) -> Self {
        Self::new(store.head(), 0)
    }

    /// Pull `x` back onto the line's last character if it ran past it.
    pub fn clamp(&mut self, store: &LineStore) {
        if let Some(line) = store.get(self.line) {
            self.x = self.x.min(line.last_offset());
        }
    }

    pub fn position(&self, store: &LineStore) -> Option<Position> {
        store
            .index_of(self.line)
            .map(|line| Position::new(line, self.x))
    }
}
