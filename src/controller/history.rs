use super::editor::Editor;
use crate::document_model::{Outcome, SwapDirection, UndoAction};
use crate::error::Result;
use tracing::debug;

impl Editor {
    /// Revert the most recent edit that still has an effect. Entries that
    /// turn out to be no-ops are discarded on the way.
    pub fn undo(&mut self) -> Result<Outcome> {
        self.enter_edit_mode();
        self.highlights.clear();

        while let Some(action) = self.undo_stack.pop() {
            if self.apply_inverse(action)?.is_applied() {
                self.scroll_to_cursor();
                debug!(remaining = self.undo_stack.len(), "undo applied");
                return Ok(Outcome::Applied);
            }
        }

        debug!("nothing to undo");
        Ok(Outcome::NoOp)
    }

    pub fn can_undo(&self) -> bool {
        self.undo_stack.can_undo()
    }

    pub fn swap_line_up(&mut self) -> Result<Outcome> {
        self.swap_and_record(SwapDirection::Up)
    }

    pub fn swap_line_down(&mut self) -> Result<Outcome> {
        self.swap_and_record(SwapDirection::Down)
    }

    fn swap_and_record(&mut self, direction: SwapDirection) -> Result<Outcome> {
        self.enter_edit_mode();
        self.highlights.clear();
        let outcome = self.swap_lines(direction)?;
        if outcome.is_applied() {
            let at = self.cursor_position();
            self.record(UndoAction::SwapLines { at, direction });
            self.scroll_to_cursor();
        }
        Ok(outcome)
    }

    /// Exchange the cursor line's contents with its neighbour and follow
    /// the moved line.
    fn swap_lines(&mut self, direction: SwapDirection) -> Result<Outcome> {
        let neighbour = match direction {
            SwapDirection::Up => self.lines.prev(self.cursor.line),
            SwapDirection::Down => self.lines.next(self.cursor.line),
        };
        let Some(neighbour) = neighbour else {
            return Ok(Outcome::NoOp);
        };

        self.lines.swap_values(self.cursor.line, neighbour)?;
        self.cursor.line = neighbour;
        self.cursor.clamp(&self.lines);
        self.modified = true;
        Ok(Outcome::Applied)
    }

    fn apply_inverse(&mut self, action: UndoAction) -> Result<Outcome> {
        match action {
            UndoAction::RemoveInserted { at, restore } => {
                self.goto(at)?;
                self.delete_previous()?;
                if let Some(restore) = restore {
                    self.apply_inverse(*restore)?;
                }
                Ok(Outcome::Applied)
            }
            UndoAction::RemoveInsertedRun { at, count, restore } => {
                self.goto(at)?;
                for _ in 0..count {
                    if self.delete_previous()?.is_none() {
                        break;
                    }
                }
                if let Some(restore) = restore {
                    self.apply_inverse(*restore)?;
                }
                Ok(Outcome::Applied)
            }
            UndoAction::RestoreDeleted { at, ch } => {
                self.goto(at)?;
                self.type_char(ch)?;
                Ok(Outcome::Applied)
            }
            UndoAction::SwapLines { at, direction } => {
                self.goto(at)?;
                self.swap_lines(direction.reverse())
            }
            UndoAction::RetypeDeleted { at, text, cursor } => {
                self.goto(at)?;
                for ch in text {
                    self.type_char(ch)?;
                }
                self.goto(cursor)?;
                Ok(Outcome::Applied)
            }
        }
    }
}
