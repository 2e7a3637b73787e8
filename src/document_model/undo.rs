use super::cursor::Position;
use std::collections::VecDeque;

/// Result of a mutating command. Structural no-ops such as deleting at the
/// start of the document are reported, not treated as errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    NoOp,
}

impl Outcome {
    pub fn is_applied(self) -> bool {
        self == Outcome::Applied
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapDirection {
    Up,
    Down,
}

impl SwapDirection {
    pub fn reverse(self) -> Self {
        match self {
            SwapDirection::Up => SwapDirection::Down,
            SwapDirection::Down => SwapDirection::Up,
        }
    }
}

/// An inverse edit. Each entry records the cursor position right after the
/// original edit, by line index so it survives line deletion, plus what
/// is needed to reverse it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UndoAction {
    /// Typed one character: remove it, then undo any selection it replaced.
    RemoveInserted {
        at: Position,
        restore: Option<Box<UndoAction>>,
    },
    /// Inserted several characters at once (paste).
    RemoveInsertedRun {
        at: Position,
        count: usize,
        restore: Option<Box<UndoAction>>,
    },
    /// Deleted one character before the cursor. `ch` is `'\n'` when the
    /// delete merged two lines.
    RestoreDeleted { at: Position, ch: char },
    /// Swapped the cursor line with a neighbour; swapping back in the
    /// opposite direction restores it.
    SwapLines {
        at: Position,
        direction: SwapDirection,
    },
    /// Deleted the highlighted block; `text` is exactly what was removed.
    /// `cursor` is where the cursor sat before the delete.
    RetypeDeleted {
        at: Position,
        text: Vec<char>,
        cursor: Position,
    },
}

impl UndoAction {
    pub fn position(&self) -> Position {
        match self {
            UndoAction::RemoveInserted { at, .. }
            | UndoAction::RemoveInsertedRun { at, .. }
            | UndoAction::RestoreDeleted { at, .. }
            | UndoAction::SwapLines { at, .. }
            | UndoAction::RetypeDeleted { at, .. } => *at,
        }
    }
}

/// LIFO log of inverse edits, bounded to `max_undo_levels` entries.
#[derive(Debug, Clone)]
pub struct UndoStack {
    entries: VecDeque<UndoAction>,
    max_undo_levels: usize,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::with_limit(1000)
    }

    pub fn with_limit(max_undo_levels: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_undo_levels: max_undo_levels.max(1),
        }
    }

    pub fn push(&mut self, action: UndoAction) {
        self.entries.push_back(action);

        // Limit the undo stack size
        if self.entries.len() > self.max_undo_levels {
            self.entries.pop_front();
        }
    }

    pub fn pop(&mut self) -> Option<UndoAction> {
        self.entries.pop_back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}
