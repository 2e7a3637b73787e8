use super::mode::Mode;
use crate::config::RcConfig;
use crate::content::{Content, MemoryContent};
use crate::document_model::{
    Cursor, HighlightSet, LineStore, Outcome, Position, SearchState, UndoAction, UndoStack,
};
use crate::error::{EditorError, Result};
use crate::view::Viewport;
use tracing::{debug, trace};

/// Builds an [`Editor`] and performs the initial load.
pub struct EditorBuilder {
    content: Box<dyn Content>,
    clipboard: Box<dyn Content>,
    content_name: String,
    config: RcConfig,
}

impl Default for EditorBuilder {
    fn default() -> Self {
        Self {
            content: Box::new(MemoryContent::new()),
            clipboard: Box::new(MemoryContent::new()),
            content_name: String::new(),
            config: RcConfig::default(),
        }
    }
}

impl EditorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider the document is loaded from and saved to.
    pub fn content(mut self, content: impl Content + 'static) -> Self {
        self.content = Box::new(content);
        self
    }

    /// Shorthand for in-memory content holding `text`.
    pub fn text(self, text: &str) -> Self {
        self.content(MemoryContent::from_text(text))
    }

    pub fn clipboard(mut self, clipboard: impl Content + 'static) -> Self {
        self.clipboard = Box::new(clipboard);
        self
    }

    pub fn content_name(mut self, name: impl Into<String>) -> Self {
        self.content_name = name.into();
        self
    }

    pub fn config(mut self, config: RcConfig) -> Self {
        self.config = config;
        self
    }

    pub fn rows(mut self, rows: usize) -> Self {
        self.config.rows = rows;
        self
    }

    pub fn cols(mut self, cols: usize) -> Self {
        self.config.cols = cols;
        self
    }

    pub fn build(self) -> Editor {
        let lines = LineStore::new();
        let cursor = Cursor::at_head(&lines);
        let mut editor = Editor {
            lines,
            cursor,
            highlights: HighlightSet::new(),
            undo_stack: UndoStack::with_limit(self.config.max_undo_levels),
            search: SearchState::new(),
            mode: Mode::Edit,
            modified: false,
            viewport: Viewport::new(self.config.rows, self.config.cols),
            first_visible_line: 0,
            config: self.config,
            content: self.content,
            clipboard: self.clipboard,
            content_name: self.content_name,
        };
        editor.load();
        editor
    }
}

/// A single-document editing session.
///
/// Owns the lines, the cursor, the selection, the undo log and the search
/// state, and applies abstract edit, movement and search requests to them.
pub struct Editor {
    pub(crate) lines: LineStore,
    pub(crate) cursor: Cursor,
    pub(crate) highlights: HighlightSet,
    pub(crate) undo_stack: UndoStack,
    pub(crate) search: SearchState,
    pub(crate) mode: Mode,
    pub(crate) modified: bool,
    pub(crate) viewport: Viewport,
    pub(crate) first_visible_line: usize,
    pub(crate) config: RcConfig,
    content: Box<dyn Content>,
    clipboard: Box<dyn Content>,
    content_name: String,
}

impl Editor {
    pub fn builder() -> EditorBuilder {
        EditorBuilder::new()
    }

    /// Editor over in-memory `text` with default settings.
    pub fn from_text(text: &str) -> Self {
        EditorBuilder::new().text(text).build()
    }

    // ---- lifecycle -------------------------------------------------------

    /// Re-read the document from the content provider, resetting the
    /// cursor, selection, undo log and search state.
    pub fn load(&mut self) {
        let bytes = self.content.read_bytes();
        let text = String::from_utf8_lossy(&bytes);

        self.enter_edit_mode();
        self.lines = LineStore::load(&text);
        self.cursor = Cursor::at_head(&self.lines);
        self.highlights.clear();
        self.undo_stack = UndoStack::with_limit(self.config.max_undo_levels);
        self.first_visible_line = 0;
        self.modified = false;

        debug!(
            name = %self.content_name,
            bytes = bytes.len(),
            lines = self.lines.len(),
            "loaded document"
        );
    }

    /// Write the whole document to the content provider.
    pub fn save(&mut self) {
        let text = self.text();
        self.content.write_bytes(text.as_bytes());
        self.modified = false;
        debug!(name = %self.content_name, bytes = text.len(), "saved document");
    }

    // ---- queries ---------------------------------------------------------

    /// The document as a flat sequence of characters.
    pub fn concatenate(&self) -> Vec<char> {
        self.lines.concatenate()
    }

    pub fn text(&self) -> String {
        self.lines.text()
    }

    pub fn lines(&self) -> &LineStore {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Cursor as (line index, offset).
    pub fn cursor_position(&self) -> Position {
        self.cursor.position(&self.lines).unwrap_or_default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn search_term(&self) -> String {
        self.search.term_string()
    }

    pub fn search_state(&self) -> &SearchState {
        &self.search
    }

    pub fn selection(&self) -> &HighlightSet {
        &self.highlights
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn config(&self) -> &RcConfig {
        &self.config
    }

    pub fn content_name(&self) -> &str {
        &self.content_name
    }

    pub fn content_mut(&mut self) -> &mut dyn Content {
        self.content.as_mut()
    }

    pub fn clipboard_mut(&mut self) -> &mut dyn Content {
        self.clipboard.as_mut()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn first_visible_line(&self) -> usize {
        self.first_visible_line
    }

    /// Called by the display layer whenever its size changes.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.scroll_to_cursor();
    }

    // ---- mode ------------------------------------------------------------

    /// Clears the selection and starts an empty search.
    pub fn enter_search_mode(&mut self) {
        self.highlights.clear();
        self.search.reset();
        self.mode = Mode::Search;
        debug!("entered search mode");
    }

    /// Drops the search term and its match highlights.
    pub fn enter_edit_mode(&mut self) {
        if self.mode != Mode::Edit {
            debug!("entered edit mode");
        }
        self.search.reset();
        self.mode = Mode::Edit;
    }

    pub fn toggle_search(&mut self) {
        match self.mode.toggled() {
            Mode::Search => self.enter_search_mode(),
            Mode::Edit => self.enter_edit_mode(),
        }
    }

    pub fn escape(&mut self) {
        self.enter_edit_mode();
    }

    // ---- editing commands ------------------------------------------------

    /// Type one character. In search mode it extends the search term and
    /// the document is left alone.
    pub fn insert_char(&mut self, ch: char) -> Result<Outcome> {
        if !self.mode.edits_document() {
            self.search.push_char(ch);
            self.run_search();
            return Ok(Outcome::NoOp);
        }

        let restore = self.delete_highlighted()?.map(Box::new);
        self.type_char(ch)?;
        let at = self.cursor_position();
        self.record(UndoAction::RemoveInserted { at, restore });
        self.scroll_to_cursor();
        Ok(Outcome::Applied)
    }

    /// Insert several characters as one undoable step (paste).
    pub fn insert_run(&mut self, chars: &[char]) -> Result<Outcome> {
        if !self.mode.edits_document() {
            for &ch in chars {
                self.search.push_char(ch);
            }
            self.run_search();
            return Ok(Outcome::NoOp);
        }

        let restore = self.delete_highlighted()?.map(Box::new);
        if chars.is_empty() && restore.is_none() {
            return Ok(Outcome::NoOp);
        }
        for &ch in chars {
            self.type_char(ch)?;
        }
        let at = self.cursor_position();
        self.record(UndoAction::RemoveInsertedRun {
            at,
            count: chars.len(),
            restore,
        });
        self.scroll_to_cursor();
        Ok(Outcome::Applied)
    }

    pub fn insert_str(&mut self, text: &str) -> Result<Outcome> {
        let chars: Vec<char> = text.chars().collect();
        self.insert_run(&chars)
    }

    /// Insert `tab_width` spaces, or step to the next match while searching.
    pub fn insert_tab(&mut self) -> Result<Outcome> {
        if !self.mode.edits_document() {
            self.search_next();
            return Ok(Outcome::NoOp);
        }
        for _ in 0..self.config.tab_width {
            self.insert_char(' ')?;
        }
        Ok(Outcome::Applied)
    }

    /// Newline, or step to the next match while searching.
    pub fn enter(&mut self) -> Result<Outcome> {
        if !self.mode.edits_document() {
            self.search_next();
            return Ok(Outcome::NoOp);
        }
        self.insert_char('\n')
    }

    /// Backspace: deletes the selection if there is one, otherwise the
    /// character before the cursor. While searching it shortens the term.
    pub fn delete_backward(&mut self) -> Result<Outcome> {
        if !self.mode.edits_document() {
            self.search.pop_char();
            self.run_search();
            return Ok(Outcome::NoOp);
        }

        let outcome = if self.highlights.is_empty() {
            self.delete_before_cursor()?
        } else {
            match self.delete_highlighted()? {
                Some(inverse) => {
                    self.record(inverse);
                    Outcome::Applied
                }
                None => Outcome::NoOp,
            }
        };
        self.highlights.clear();
        self.scroll_to_cursor();
        Ok(outcome)
    }

    /// Delete the single character before the cursor, merging with the
    /// previous line at offset 0. A no-op at the start of the document.
    pub fn delete_before_cursor(&mut self) -> Result<Outcome> {
        let Some(ch) = self.delete_previous()? else {
            return Ok(Outcome::NoOp);
        };
        let at = self.cursor_position();
        self.record(UndoAction::RestoreDeleted { at, ch });
        self.scroll_to_cursor();
        Ok(Outcome::Applied)
    }

    // ---- clipboard -------------------------------------------------------

    pub fn copy(&mut self) -> Outcome {
        if self.highlights.is_empty() {
            return Outcome::NoOp;
        }
        let text: String = self.highlighted_text().into_iter().collect();
        self.clipboard.write_bytes(text.as_bytes());
        Outcome::Applied
    }

    pub fn cut(&mut self) -> Result<Outcome> {
        if self.copy() == Outcome::NoOp {
            return Ok(Outcome::NoOp);
        }
        let outcome = match self.delete_highlighted()? {
            Some(inverse) => {
                self.record(inverse);
                Outcome::Applied
            }
            None => Outcome::NoOp,
        };
        self.highlights.clear();
        self.scroll_to_cursor();
        Ok(outcome)
    }

    pub fn paste(&mut self) -> Result<Outcome> {
        let bytes = self.clipboard.read_bytes();
        let text = String::from_utf8_lossy(&bytes).into_owned();
        self.insert_str(&text)
    }

    // ---- search ----------------------------------------------------------

    /// Enter search mode with `term` already typed.
    pub fn search_for(&mut self, term: &str) {
        self.enter_search_mode();
        self.search.set_term(term);
        self.run_search();
    }

    pub fn search_next(&mut self) {
        if self.mode != Mode::Search {
            return;
        }
        self.search.next();
        self.run_search();
    }

    pub fn search_previous(&mut self) {
        if self.mode != Mode::Search {
            return;
        }
        self.search.previous();
        self.run_search();
    }

    fn run_search(&mut self) {
        if let Some(anchor) = self.search.search(&self.lines) {
            self.cursor = Cursor::new(anchor.line, anchor.x);
            self.scroll_to_cursor();
        }
    }

    // ---- primitives ------------------------------------------------------

    pub(crate) fn record(&mut self, action: UndoAction) {
        if self.mode.records_undo() {
            trace!(?action, "recorded undo entry");
            self.undo_stack.push(action);
        }
    }

    /// Insert without recording undo. A newline splits the line and moves
    /// the cursor to the start of the new successor.
    pub(crate) fn type_char(&mut self, ch: char) -> Result<()> {
        if !self.highlights.is_empty() {
            self.highlights.clear();
        }

        if ch == '\n' {
            let successor = self.lines.split(self.cursor.line, self.cursor.x)?;
            self.cursor = Cursor::new(successor, 0);
        } else {
            self.lines.insert_char(self.cursor.line, self.cursor.x, ch)?;
            self.cursor.x += 1;
        }

        self.modified = true;
        Ok(())
    }

    /// Delete before the cursor without recording undo. Returns the
    /// removed character, `'\n'` for a line merge, or `None` when the
    /// cursor is at the very start of the document.
    pub(crate) fn delete_previous(&mut self) -> Result<Option<char>> {
        if self.cursor.x == 0 {
            return match self.lines.merge_into_prev(self.cursor.line)? {
                Some((prev, join)) => {
                    self.cursor = Cursor::new(prev, join);
                    self.modified = true;
                    Ok(Some('\n'))
                }
                None => {
                    self.cursor.clamp(&self.lines);
                    Ok(None)
                }
            };
        }

        self.cursor.x -= 1;
        let ch = self.lines.remove_char(self.cursor.line, self.cursor.x)?;
        self.modified = true;
        Ok(Some(ch))
    }

    /// Absolute addressing. Line `-1` (or any negative) is the last line
    /// and offset `-1` the last character of the line.
    pub fn move_cursor_to(&mut self, line: isize, offset: isize) -> Result<()> {
        let line = usize::try_from(line).unwrap_or_else(|_| self.lines.len().saturating_sub(1));
        let id = self.lines.id_at(line).ok_or(EditorError::LineOutOfRange {
            line,
            line_count: self.lines.len(),
        })?;
        let last = self.lines.line(id)?.last_offset();
        let column = usize::try_from(offset).unwrap_or(last);
        self.goto(Position::new(line, column))
    }

    /// Place the cursor at an exact position.
    pub(crate) fn goto(&mut self, at: Position) -> Result<()> {
        let id = self.lines.id_at(at.line).ok_or(EditorError::LineOutOfRange {
            line: at.line,
            line_count: self.lines.len(),
        })?;
        let len = self.lines.line(id)?.len();
        if at.column >= len {
            return Err(EditorError::OffsetOutOfRange {
                line: at.line,
                offset: at.column,
                len,
            });
        }
        self.cursor = Cursor::new(id, at.column);
        self.scroll_to_cursor();
        Ok(())
    }

    /// Keep the cursor line inside the visible window.
    pub(crate) fn scroll_to_cursor(&mut self) {
        let line = self.cursor_position().line;
        let rows = self.viewport.rows.max(1);
        if line < self.first_visible_line {
            self.first_visible_line = line;
        } else if line >= self.first_visible_line + rows {
            self.first_visible_line = line + 1 - rows;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_char_advances_cursor() {
        let mut editor = Editor::from_text("ac\n");
        editor.move_cursor_to(0, 1).unwrap();
        assert_eq!(editor.insert_char('b').unwrap(), Outcome::Applied);
        assert_eq!(editor.text(), "abc\n");
        assert_eq!(editor.cursor_position(), Position::new(0, 2));
        assert!(editor.is_modified());
    }

    #[test]
    fn test_newline_splits_line() {
        let mut editor = Editor::from_text("hello world\n");
        editor.move_cursor_to(0, 5).unwrap();
        editor.insert_char('\n').unwrap();
        assert_eq!(editor.text(), "hello\n world\n");
        assert_eq!(editor.cursor_position(), Position::new(1, 0));
        assert_eq!(editor.line_count(), 2);
    }

    #[test]
    fn test_delete_merges_lines() {
        let mut editor = Editor::from_text("a\nb\n");
        editor.move_cursor_to(1, 1).unwrap();
        editor.delete_before_cursor().unwrap();
        assert_eq!(editor.text(), "a\n\n");
        editor.delete_before_cursor().unwrap();
        assert_eq!(editor.text(), "a\n");
        assert_eq!(editor.cursor_position(), Position::new(0, 1));
        assert_eq!(editor.line_count(), 1);
    }

    #[test]
    fn test_delete_at_document_start_is_noop() {
        let mut editor = Editor::from_text("");
        assert_eq!(editor.delete_before_cursor().unwrap(), Outcome::NoOp);
        assert_eq!(editor.text(), "\n");
        assert!(!editor.is_modified());
        assert_eq!(editor.undo_depth(), 0);
    }

    #[test]
    fn test_move_cursor_to_sentinels() {
        let mut editor = Editor::from_text("one\ntwo\nthree\n");
        editor.move_cursor_to(-1, -1).unwrap();
        assert_eq!(editor.cursor_position(), Position::new(2, 5));
        editor.move_cursor_to(1, -1).unwrap();
        assert_eq!(editor.cursor_position(), Position::new(1, 3));
    }

    #[test]
    fn test_move_cursor_to_out_of_range_is_error() {
        let mut editor = Editor::from_text("one\ntwo\n");
        assert_eq!(
            editor.move_cursor_to(5, 0),
            Err(EditorError::LineOutOfRange {
                line: 5,
                line_count: 2
            })
        );
        assert_eq!(
            editor.move_cursor_to(0, 9),
            Err(EditorError::OffsetOutOfRange {
                line: 0,
                offset: 9,
                len: 4
            })
        );
        assert_eq!(editor.cursor_position(), Position::new(0, 0));
    }

    #[test]
    fn test_search_mode_edits_term_not_document() {
        let mut editor = Editor::from_text("abc abc\n");
        editor.enter_search_mode();
        assert_eq!(editor.insert_char('b').unwrap(), Outcome::NoOp);
        assert_eq!(editor.text(), "abc abc\n");
        assert_eq!(editor.search_term(), "b");
        assert_eq!(editor.cursor_position(), Position::new(0, 1));

        editor.delete_backward().unwrap();
        assert_eq!(editor.search_term(), "");
        assert_eq!(editor.undo_depth(), 0);
    }

    #[test]
    fn test_save_and_reload_through_content() {
        let mut editor = Editor::builder().text("draft").content_name("note").build();
        assert_eq!(editor.text(), "draft\n");
        editor.move_cursor_to(0, -1).unwrap();
        editor.insert_char('!').unwrap();
        editor.save();
        assert!(!editor.is_modified());
        assert_eq!(editor.content_mut().read_bytes(), b"draft!\n");

        editor.load();
        assert_eq!(editor.text(), "draft!\n");
        assert_eq!(editor.undo_depth(), 0);
        assert_eq!(editor.content_name(), "note");
    }

    #[test]
    fn test_copy_cut_paste() {
        let mut editor = Editor::from_text("hello\n");
        editor.move_line_end(true).unwrap();
        assert_eq!(editor.copy(), Outcome::Applied);
        assert_eq!(editor.clipboard_mut().read_bytes(), b"hello");

        assert_eq!(editor.cut().unwrap(), Outcome::Applied);
        assert_eq!(editor.text(), "\n");

        editor.paste().unwrap();
        editor.paste().unwrap();
        assert_eq!(editor.text(), "hellohello\n");
    }

    #[test]
    fn test_copy_without_selection_is_noop() {
        let mut editor = Editor::from_text("hello\n");
        assert_eq!(editor.copy(), Outcome::NoOp);
        assert_eq!(editor.cut().unwrap(), Outcome::NoOp);
        assert!(editor.clipboard_mut().read_bytes().is_empty());
    }

    #[test]
    fn test_tab_inserts_configured_spaces() {
        let mut editor = Editor::builder().text("x").build();
        editor.insert_tab().unwrap();
        assert_eq!(editor.text(), "    x\n");
        assert_eq!(editor.undo_depth(), 4);
    }

    #[test]
    fn test_scroll_follows_cursor() {
        let mut editor = Editor::builder().text("0\n1\n2\n3\n4\n5\n").rows(2).build();
        editor.move_cursor_to(4, 0).unwrap();
        assert_eq!(editor.first_visible_line(), 3);
        editor.move_cursor_to(1, 0).unwrap();
        assert_eq!(editor.first_visible_line(), 1);
    }
}
