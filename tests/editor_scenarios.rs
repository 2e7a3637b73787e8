use noter::{Content, Editor, FileContent, MemoryContent, Mode, Outcome, Position, RcLoader};
use tempfile::TempDir;

#[test]
fn test_backspace_twice_merges_lines() {
    let mut editor = Editor::from_text("a\nb\n");
    editor.move_cursor_to(1, 1).unwrap();
    editor.delete_backward().unwrap();
    editor.delete_backward().unwrap();

    assert_eq!(editor.text(), "a\n");
    assert_eq!(editor.line_count(), 1);
    assert_eq!(editor.cursor_position(), Position::new(0, 1));
}

#[test]
fn test_backspace_in_empty_document_changes_nothing() {
    let mut editor = Editor::from_text("");
    assert_eq!(editor.text(), "\n");
    assert_eq!(editor.delete_backward().unwrap(), Outcome::NoOp);
    assert_eq!(editor.text(), "\n");
    assert!(!editor.is_modified());
}

#[test]
fn test_select_all_delete_two_lines() {
    let mut editor = Editor::from_text("x\ny\n");
    editor.select_all().unwrap();
    assert_eq!(editor.highlighted_text(), vec!['x', '\n', 'y', '\n']);

    let inverse = editor.delete_highlighted().unwrap();
    assert!(inverse.is_some());
    assert_eq!(editor.concatenate(), vec!['\n']);
}

#[test]
fn test_search_session() {
    let mut editor = Editor::from_text("Alpha beta\nALPHA gamma\nalphabet\n");
    editor.toggle_search();
    assert_eq!(editor.mode(), Mode::Search);

    for ch in "alpha".chars() {
        editor.insert_char(ch).unwrap();
    }
    assert_eq!(editor.search_state().matches().len(), 3);
    assert_eq!(editor.cursor_position(), Position::new(0, 0));

    editor.enter().unwrap();
    assert_eq!(editor.cursor_position(), Position::new(1, 0));
    editor.insert_tab().unwrap();
    assert_eq!(editor.cursor_position(), Position::new(2, 0));
    editor.search_next();
    assert_eq!(editor.cursor_position(), Position::new(0, 0));
    editor.search_previous();
    assert_eq!(editor.cursor_position(), Position::new(2, 0));

    // typing in search mode never touches the document
    assert_eq!(editor.text(), "Alpha beta\nALPHA gamma\nalphabet\n");
    assert!(!editor.is_modified());

    editor.escape();
    assert_eq!(editor.mode(), Mode::Edit);
    assert_eq!(editor.search_term(), "");
    assert!(editor.search_state().highlights().is_empty());
    assert_eq!(editor.cursor_position(), Position::new(2, 0));
}

#[test]
fn test_search_without_matches_keeps_cursor() {
    let mut editor = Editor::from_text("hello\n");
    editor.move_cursor_to(0, 3).unwrap();
    editor.search_for("xyz");
    assert!(editor.search_state().matches().is_empty());
    assert_eq!(editor.search_state().index(), 0);
    assert_eq!(editor.cursor_position(), Position::new(0, 3));
}

#[test]
fn test_search_spans_lines() {
    let mut editor = Editor::from_text("foo\nbar\n");
    editor.search_for("o\nb");
    assert_eq!(editor.search_state().matches().len(), 1);
    assert_eq!(editor.cursor_position(), Position::new(0, 2));
}

#[test]
fn test_entering_search_clears_selection() {
    let mut editor = Editor::from_text("abc\n");
    editor.move_line_end(true).unwrap();
    assert!(!editor.selection().is_empty());
    editor.enter_search_mode();
    assert!(editor.selection().is_empty());
    assert_eq!(editor.search_term(), "");
}

#[test]
fn test_cut_paste_moves_text_between_lines() {
    let mut editor = Editor::builder()
        .text("first\nsecond\n")
        .clipboard(MemoryContent::new())
        .build();
    editor.move_line_end(true).unwrap();
    editor.cut().unwrap();
    assert_eq!(editor.text(), "\nsecond\n");

    editor.move_document_end(false).unwrap();
    editor.paste().unwrap();
    assert_eq!(editor.text(), "\nsecondfirst\n");

    editor.undo().unwrap();
    assert_eq!(editor.text(), "\nsecond\n");
    editor.undo().unwrap();
    assert_eq!(editor.text(), "first\nsecond\n");
}

#[test]
fn test_paste_replaces_selection_and_undoes_in_one_step() {
    let mut clipboard = MemoryContent::new();
    clipboard.write_bytes(b"XY");
    let mut editor = Editor::builder().text("abcd\n").clipboard(clipboard).build();
    editor.move_cursor_to(0, 1).unwrap();
    editor.move_right(true).unwrap();
    editor.move_right(true).unwrap();

    editor.paste().unwrap();
    assert_eq!(editor.text(), "aXYd\n");
    assert_eq!(editor.undo_depth(), 1);

    editor.undo().unwrap();
    assert_eq!(editor.text(), "abcd\n");
}

#[test]
fn test_file_backed_session() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("todo.txt");
    std::fs::write(&path, "milk\neggs").unwrap();

    let file = FileContent::new(&path);
    let name = file.file_name();
    let mut editor = Editor::builder().content(file).content_name(name).build();
    assert_eq!(editor.text(), "milk\neggs\n");

    editor.move_document_end(false).unwrap();
    editor.insert_str("\nbread").unwrap();
    assert!(editor.is_modified());
    assert!(editor.status().modified);

    editor.save();
    assert!(!editor.is_modified());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "milk\neggs\nbread\n");
    assert_eq!(editor.status().name, "todo.txt");
}

#[test]
fn test_missing_file_starts_empty() {
    let dir = TempDir::new().unwrap();
    let mut editor = Editor::builder()
        .content(FileContent::new(dir.path().join("new.txt")))
        .build();
    assert_eq!(editor.text(), "\n");
    editor.insert_str("hi").unwrap();
    editor.save();
    assert_eq!(
        std::fs::read_to_string(dir.path().join("new.txt")).unwrap(),
        "hi\n"
    );
}

#[test]
fn test_reload_discards_history() {
    let mut editor = Editor::from_text("keep\n");
    editor.insert_char('x').unwrap();
    editor.load();
    assert_eq!(editor.text(), "keep\n");
    assert_eq!(editor.undo().unwrap(), Outcome::NoOp);
    assert!(!editor.is_modified());
}

#[test]
fn test_config_drives_tab_and_word_motion() {
    let mut config = Default::default();
    RcLoader::parse_config_content("set tabwidth=2\nset wordchars=\"-\"\n", &mut config);
    let mut editor = Editor::builder().text("one-two three\n").config(config).build();

    editor.move_word_right(false).unwrap();
    assert_eq!(editor.cursor_position(), Position::new(0, 3));
    editor.move_word_right(false).unwrap();
    assert_eq!(editor.cursor_position(), Position::new(0, 13));

    editor.move_line_start(false).unwrap();
    editor.insert_tab().unwrap();
    assert_eq!(editor.text(), "  one-two three\n");
}

#[test]
fn test_viewport_resize_rescrolls() {
    let text: String = (0..30).map(|i| format!("{i}\n")).collect();
    let mut editor = Editor::from_text(&text);
    editor.move_cursor_to(20, 0).unwrap();
    assert_eq!(editor.first_visible_line(), 0);

    editor.set_viewport(noter::Viewport::new(5, 80));
    assert_eq!(editor.first_visible_line(), 16);
    assert_eq!(editor.visible_lines().len(), 5);
}
