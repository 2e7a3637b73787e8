use super::editor::Editor;
use crate::document_model::{Cursor, LineId, UndoAction};
use crate::error::Result;
use tracing::trace;

impl Editor {
    /// Mark one character as selected. Idempotent.
    pub fn highlight(&mut self, line: LineId, x: usize) {
        self.highlights.insert(line, x);
    }

    pub fn highlight_whole_line(&mut self, line: LineId) -> Result<()> {
        let len = self.lines.line(line)?.len();
        self.highlights.insert_range(line, 0..len);
        Ok(())
    }

    /// Select from the start of the cursor line up to, not including, the cursor.
    pub fn highlight_line_to_left(&mut self) {
        self.highlights.insert_range(self.cursor.line, 0..self.cursor.x);
    }

    /// Select from the cursor to the end of its line, newline included.
    pub fn highlight_line_to_right(&mut self) -> Result<()> {
        let len = self.lines.line(self.cursor.line)?.len();
        self.highlights.insert_range(self.cursor.line, self.cursor.x..len);
        Ok(())
    }

    pub fn reset_highlight(&mut self) {
        self.highlights.clear();
    }

    /// Select every character and leave the cursor at the end of the document.
    pub fn select_all(&mut self) -> Result<()> {
        self.enter_edit_mode();
        self.highlights.clear();

        let mut line = self.lines.head();
        self.highlight_whole_line(line)?;
        while let Some(next) = self.lines.next(line) {
            line = next;
            self.highlight_whole_line(line)?;
        }

        self.cursor = Cursor::new(line, self.lines.line(line)?.last_offset());
        self.scroll_to_cursor();
        Ok(())
    }

    /// Selected characters in document order.
    pub fn highlighted_text(&self) -> Vec<char> {
        self.highlights.characters(&self.lines)
    }

    /// Delete the selected run and return its inverse, or `None` when
    /// nothing was removed.
    ///
    /// The cursor is placed just past the last selected character and the
    /// selection's size worth of characters is deleted backwards from
    /// there. The document's final newline is never removed, even when
    /// selected. Undoing puts the cursor back where it was before the
    /// delete.
    pub fn delete_highlighted(&mut self) -> Result<Option<UndoAction>> {
        let positions = self.highlights.positions_in_order(&self.lines);
        let Some(&(last_line, last_x)) = positions.last() else {
            return Ok(None);
        };
        let mut count = positions.len();
        let saved = self.cursor;
        let cursor = self.cursor_position();

        let line = self.lines.line(last_line)?;
        self.cursor = if last_x + 1 < line.len() {
            Cursor::new(last_line, last_x + 1)
        } else {
            match line.next() {
                Some(next) => Cursor::new(next, 0),
                None => {
                    count -= 1;
                    Cursor::new(last_line, line.last_offset())
                }
            }
        };

        let mut removed = Vec::with_capacity(count);
        for _ in 0..count {
            match self.delete_previous()? {
                Some(ch) => removed.push(ch),
                None => break,
            }
        }
        removed.reverse();
        self.highlights.clear();

        if removed.is_empty() {
            self.cursor = saved;
            return Ok(None);
        }
        trace!(count = removed.len(), "deleted selection");
        Ok(Some(UndoAction::RetypeDeleted {
            at: self.cursor_position(),
            text: removed,
            cursor,
        }))
    }
}
