use super::editor::Editor;
use crate::document_model::LineId;
use crate::error::Result;

/// Cursor motions. Every motion leaves search mode; without `extend` it
/// also drops the selection, with `extend` it adds the characters it
/// passes over to the selection.
impl Editor {
    pub fn move_right(&mut self, extend: bool) -> Result<()> {
        self.begin_motion(extend);
        self.step_right(extend)?;
        self.scroll_to_cursor();
        Ok(())
    }

    pub fn move_left(&mut self, extend: bool) -> Result<()> {
        self.begin_motion(extend);
        self.step_left(extend)?;
        self.scroll_to_cursor();
        Ok(())
    }

    pub fn move_up(&mut self, extend: bool) -> Result<()> {
        self.begin_motion(extend);
        self.step_up(extend)?;
        self.scroll_to_cursor();
        Ok(())
    }

    pub fn move_down(&mut self, extend: bool) -> Result<()> {
        self.begin_motion(extend);
        self.step_down(extend)?;
        self.scroll_to_cursor();
        Ok(())
    }

    pub fn move_line_start(&mut self, extend: bool) -> Result<()> {
        self.begin_motion(extend);
        if extend {
            self.highlights.insert_range(self.cursor.line, 0..self.cursor.x);
        }
        self.cursor.x = 0;
        self.scroll_to_cursor();
        Ok(())
    }

    pub fn move_line_end(&mut self, extend: bool) -> Result<()> {
        self.begin_motion(extend);
        let last = self.last_offset(self.cursor.line)?;
        if extend {
            self.highlights.insert_range(self.cursor.line, self.cursor.x..last);
        }
        self.cursor.x = last;
        self.scroll_to_cursor();
        Ok(())
    }

    /// Skip boundary characters, then the word that follows. Stops on the
    /// line's trailing newline at the latest.
    pub fn move_word_right(&mut self, extend: bool) -> Result<()> {
        self.begin_motion(extend);
        let values = self.lines.line(self.cursor.line)?.values().to_vec();
        let last = values.len().saturating_sub(1);

        for skip_boundaries in [true, false] {
            while self.cursor.x < last && self.is_boundary(values[self.cursor.x]) == skip_boundaries {
                if extend {
                    self.highlights.insert(self.cursor.line, self.cursor.x);
                }
                self.cursor.x += 1;
            }
        }

        self.scroll_to_cursor();
        Ok(())
    }

    /// Mirror of [`Editor::move_word_right`], stopping at the start of the
    /// word it passes.
    pub fn move_word_left(&mut self, extend: bool) -> Result<()> {
        self.begin_motion(extend);
        let values = self.lines.line(self.cursor.line)?.values().to_vec();

        for skip_boundaries in [true, false] {
            while self.cursor.x > 0 && self.is_boundary(values[self.cursor.x - 1]) == skip_boundaries {
                self.cursor.x -= 1;
                if extend {
                    self.highlights.insert(self.cursor.line, self.cursor.x);
                }
            }
        }

        self.scroll_to_cursor();
        Ok(())
    }

    pub fn move_document_start(&mut self, extend: bool) -> Result<()> {
        self.begin_motion(extend);
        if extend {
            self.highlights.insert_range(self.cursor.line, 0..self.cursor.x);
        }
        while let Some(prev) = self.lines.prev(self.cursor.line) {
            self.cursor.line = prev;
            if extend {
                self.highlight_whole_line(prev)?;
            }
        }
        self.cursor.x = 0;
        self.scroll_to_cursor();
        Ok(())
    }

    pub fn move_document_end(&mut self, extend: bool) -> Result<()> {
        self.begin_motion(extend);
        if extend {
            let len = self.lines.line(self.cursor.line)?.len();
            self.highlights.insert_range(self.cursor.line, self.cursor.x..len);
        }
        while let Some(next) = self.lines.next(self.cursor.line) {
            self.cursor.line = next;
            if extend {
                self.highlight_whole_line(next)?;
            }
        }
        self.cursor.x = self.last_offset(self.cursor.line)?;
        self.scroll_to_cursor();
        Ok(())
    }

    /// Up by one viewport height.
    pub fn page_up(&mut self, extend: bool) -> Result<()> {
        self.begin_motion(extend);
        for _ in 0..self.viewport.rows.max(1) {
            if self.lines.prev(self.cursor.line).is_none() {
                break;
            }
            self.step_up(extend)?;
        }
        self.scroll_to_cursor();
        Ok(())
    }

    /// Down by one viewport height.
    pub fn page_down(&mut self, extend: bool) -> Result<()> {
        self.begin_motion(extend);
        for _ in 0..self.viewport.rows.max(1) {
            if self.lines.next(self.cursor.line).is_none() {
                break;
            }
            self.step_down(extend)?;
        }
        self.scroll_to_cursor();
        Ok(())
    }

    fn begin_motion(&mut self, extend: bool) {
        self.enter_edit_mode();
        if !extend {
            self.highlights.clear();
        }
    }

    fn step_right(&mut self, extend: bool) -> Result<()> {
        let last = self.last_offset(self.cursor.line)?;
        if self.cursor.x < last {
            if extend {
                self.highlights.insert(self.cursor.line, self.cursor.x);
            }
            self.cursor.x += 1;
        } else if let Some(next) = self.lines.next(self.cursor.line) {
            if extend {
                self.highlights.insert(self.cursor.line, last);
            }
            self.cursor.line = next;
            self.cursor.x = 0;
        }
        Ok(())
    }

    fn step_left(&mut self, extend: bool) -> Result<()> {
        if self.cursor.x > 0 {
            self.cursor.x -= 1;
        } else if let Some(prev) = self.lines.prev(self.cursor.line) {
            self.cursor.line = prev;
            self.cursor.x = self.last_offset(prev)?;
        } else {
            return Ok(());
        }
        if extend {
            self.highlights.insert(self.cursor.line, self.cursor.x);
        }
        Ok(())
    }

    fn step_up(&mut self, extend: bool) -> Result<()> {
        if extend {
            self.highlights.insert_range(self.cursor.line, 0..self.cursor.x);
        }
        match self.lines.prev(self.cursor.line) {
            Some(prev) => {
                self.cursor.line = prev;
                self.cursor.clamp(&self.lines);
                if extend {
                    let len = self.lines.line(prev)?.len();
                    self.highlights.insert_range(prev, self.cursor.x..len);
                }
            }
            None => self.cursor.x = 0,
        }
        Ok(())
    }

    fn step_down(&mut self, extend: bool) -> Result<()> {
        let line = self.lines.line(self.cursor.line)?;
        let (len, next) = (line.len(), line.next());
        match next {
            Some(next) => {
                if extend {
                    self.highlights.insert_range(self.cursor.line, self.cursor.x..len);
                }
                self.cursor.line = next;
                self.cursor.clamp(&self.lines);
                if extend {
                    self.highlights.insert_range(next, 0..self.cursor.x);
                }
            }
            None => {
                let last = len.saturating_sub(1);
                if extend {
                    self.highlights.insert_range(self.cursor.line, self.cursor.x..last);
                }
                self.cursor.x = last;
            }
        }
        Ok(())
    }

    fn last_offset(&self, line: LineId) -> Result<usize> {
        Ok(self.lines.line(line)?.last_offset())
    }

    fn is_boundary(&self, ch: char) -> bool {
        self.config.word_boundaries.contains(&ch)
    }
}
