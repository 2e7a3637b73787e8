/// View Model - Render-agnostic snapshot of what a display layer needs
/// This keeps any renderer from reaching into the line store or editor state
use crate::controller::{Editor, Mode};
use crate::document_model::Position;
use std::fmt;
use unicode_width::UnicodeWidthChar;

/// Visible rows and columns, supplied by whoever draws the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub rows: usize,
    pub cols: usize,
}

impl Viewport {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(25, 80)
    }
}

/// One character of a visible line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub offset: usize,
    pub ch: char,
    /// Display columns taken; tabs expand to the next tab stop.
    pub width: usize,
    pub selected: bool,
    pub search_hit: bool,
    pub cursor: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleLine {
    pub index: usize,
    /// Display column of the first cell after horizontal paging.
    pub first_column: usize,
    pub cells: Vec<Cell>,
}

impl VisibleLine {
    pub fn text(&self) -> String {
        self.cells
            .iter()
            .map(|cell| cell.ch)
            .filter(|&ch| ch != '\n')
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub name: String,
    pub modified: bool,
    pub mode: Mode,
    pub search_term: String,
    /// 1-based.
    pub line: usize,
    /// 1-based.
    pub column: usize,
    pub match_count: usize,
    /// Active match, 0-based.
    pub match_index: Option<usize>,
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if self.name.is_empty() { "[No Name]" } else { self.name.as_str() };
        write!(f, "{}", name)?;
        if self.modified {
            write!(f, " [+]")?;
        }
        write!(f, " -- {} -- {}:{}", self.mode.label(), self.line, self.column)?;
        if self.mode == Mode::Search {
            write!(f, " /{}", self.search_term)?;
            match self.match_index {
                Some(index) => write!(f, " [{}/{}]", index + 1, self.match_count)?,
                None => write!(f, " [no matches]")?,
            }
        }
        Ok(())
    }
}

/// The ViewModel trait provides everything a simple view needs to render
/// without depending on editor internals
pub trait ViewModel {
    fn cursor_position(&self) -> Position;

    fn line_count(&self) -> usize;

    /// Line text without its trailing newline.
    fn line(&self, line_number: usize) -> Option<String>;
}

/// Adapts an [`Editor`] to [`ViewModel`] and computes the visible window.
pub struct DocumentViewModel<'a> {
    editor: &'a Editor,
}

impl<'a> DocumentViewModel<'a> {
    pub fn new(editor: &'a Editor) -> Self {
        Self { editor }
    }

    /// Lines `[first_visible_line, first_visible_line + rows)`, each paged
    /// horizontally so the cursor column stays on screen.
    pub fn visible_lines(&self) -> Vec<VisibleLine> {
        let editor = self.editor;
        let viewport = editor.viewport();
        let cols = viewport.cols.max(1);
        let tab_width = editor.config().tab_width.max(1);
        let cursor = editor.cursor();
        let search = editor.search_state().highlights();
        let selection = editor.selection();

        let cursor_column = editor
            .lines()
            .get(cursor.line)
            .map(|line| display_column(&line.values()[..cursor.x.min(line.len())], tab_width))
            .unwrap_or(0);
        let first_column = (cursor_column / cols) * cols;

        editor
            .lines()
            .iter()
            .enumerate()
            .skip(editor.first_visible_line())
            .take(viewport.rows)
            .map(|(index, (id, line))| {
                let mut column = 0;
                let mut cells = Vec::new();
                for (offset, &ch) in line.values().iter().enumerate() {
                    let width = cell_width(ch, column, tab_width);
                    let start = column;
                    column += width;
                    if start < first_column {
                        continue;
                    }
                    if column > first_column + cols {
                        break;
                    }
                    cells.push(Cell {
                        offset,
                        ch,
                        width,
                        selected: selection.contains(id, offset),
                        search_hit: search.contains(id, offset),
                        cursor: id == cursor.line && offset == cursor.x,
                    });
                }
                VisibleLine {
                    index,
                    first_column,
                    cells,
                }
            })
            .collect()
    }

    pub fn status(&self) -> StatusLine {
        let editor = self.editor;
        let position = editor.cursor_position();
        let search = editor.search_state();
        let match_count = search.matches().len();
        let match_index = usize::try_from(search.index())
            .ok()
            .filter(|&index| index < match_count);

        StatusLine {
            name: editor.content_name().to_string(),
            modified: editor.is_modified(),
            mode: editor.mode(),
            search_term: editor.search_term(),
            line: position.line + 1,
            column: position.column + 1,
            match_count,
            match_index,
        }
    }
}

impl<'a> ViewModel for DocumentViewModel<'a> {
    fn cursor_position(&self) -> Position {
        self.editor.cursor_position()
    }

    fn line_count(&self) -> usize {
        self.editor.line_count()
    }

    fn line(&self, line_number: usize) -> Option<String> {
        let lines = self.editor.lines();
        let line = lines.get(lines.id_at(line_number)?)?;
        Some(line.values()[..line.last_offset()].iter().collect())
    }
}

impl Editor {
    pub fn view_model(&self) -> DocumentViewModel<'_> {
        DocumentViewModel::new(self)
    }

    pub fn visible_lines(&self) -> Vec<VisibleLine> {
        self.view_model().visible_lines()
    }

    pub fn status(&self) -> StatusLine {
        self.view_model().status()
    }
}

/// Display column reached after drawing `chars` from column 0.
fn display_column(chars: &[char], tab_width: usize) -> usize {
    chars
        .iter()
        .fold(0, |column, &ch| column + cell_width(ch, column, tab_width))
}

fn cell_width(ch: char, column: usize, tab_width: usize) -> usize {
    match ch {
        '\t' => tab_width - column % tab_width,
        '\n' => 1,
        c => c.width().unwrap_or(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_column() {
        assert_eq!(display_column(&['a', 'b', 'c'], 4), 3);
        assert_eq!(display_column(&['a', '\t', 'b'], 4), 5);
        assert_eq!(display_column(&['日', '本'], 4), 4);
    }

    #[test]
    fn test_visible_window_follows_cursor() {
        let text: String = (0..6).map(|i| format!("line {i}\n")).collect();
        let mut editor = Editor::builder().text(&text).rows(2).build();
        editor.move_cursor_to(4, 0).unwrap();

        let lines = editor.visible_lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].index, 3);
        assert_eq!(lines[1].text(), "line 4");
        assert!(lines[1].cells[0].cursor);
    }

    #[test]
    fn test_cells_flag_selection_and_search() {
        let mut editor = Editor::from_text("abcabc\n");
        editor.move_right(true).unwrap();
        let cells = &editor.visible_lines()[0].cells;
        assert!(cells[0].selected);
        assert!(!cells[1].selected);
        assert!(cells[1].cursor);

        editor.search_for("bc");
        let cells = &editor.visible_lines()[0].cells;
        let hits: Vec<usize> = cells
            .iter()
            .filter(|cell| cell.search_hit)
            .map(|cell| cell.offset)
            .collect();
        assert_eq!(hits, vec![1, 2, 4, 5]);
        assert!(cells.iter().all(|cell| !cell.selected));
    }

    #[test]
    fn test_horizontal_paging() {
        let mut editor = Editor::builder().text("0123456789abc\n").cols(5).build();
        editor.move_cursor_to(0, 7).unwrap();
        let line = &editor.visible_lines()[0];
        assert_eq!(line.first_column, 5);
        assert_eq!(line.text(), "56789");
    }

    #[test]
    fn test_status_line() {
        let mut editor = Editor::builder().text("foo\nfoo\n").content_name("notes.txt").build();
        editor.search_for("FOO");
        editor.search_next();
        let status = editor.status();
        assert_eq!(status.name, "notes.txt");
        assert_eq!(status.mode, Mode::Search);
        assert_eq!(status.search_term, "FOO");
        assert_eq!(status.match_count, 2);
        assert_eq!(status.match_index, Some(1));
        assert_eq!((status.line, status.column), (2, 1));
        assert!(!status.modified);
        assert_eq!(status.to_string(), "notes.txt -- SEARCH -- 2:1 /FOO [2/2]");
    }

    #[test]
    fn test_status_line_display_in_edit_mode() {
        let mut editor = Editor::from_text("abc\n");
        editor.move_cursor_to(0, 2).unwrap();
        editor.insert_char('x').unwrap();
        assert_eq!(editor.status().to_string(), "[No Name] [+] -- EDIT -- 1:4");

        editor.search_for("zz");
        assert_eq!(
            editor.status().to_string(),
            "[No Name] [+] -- SEARCH -- 1:4 /zz [no matches]"
        );
    }

    #[test]
    fn test_view_model_line_text() {
        let editor = Editor::from_text("one\ntwo");
        let view = editor.view_model();
        assert_eq!(view.line_count(), 2);
        assert_eq!(view.line(1), Some("two".to_string()));
        assert_eq!(view.line(2), None);
        assert_eq!(view.cursor_position(), Position::new(0, 0));
    }
}
