/// The two editing states. Keystrokes that edit text in `Edit` mode edit
/// the search term in `Search` mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Edit,
    Search,
}

impl Mode {
    pub fn toggled(self) -> Mode {
        match self {
            Mode::Edit => Mode::Search,
            Mode::Search => Mode::Edit,
        }
    }

    /// Only document edits made in `Edit` mode are recorded for undo.
    pub fn records_undo(self) -> bool {
        self == Mode::Edit
    }

    pub fn edits_document(self) -> bool {
        self == Mode::Edit
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Edit => "EDIT",
            Mode::Search => "SEARCH",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trip() {
        assert_eq!(Mode::default(), Mode::Edit);
        assert_eq!(Mode::Edit.toggled(), Mode::Search);
        assert_eq!(Mode::Edit.toggled().toggled(), Mode::Edit);
    }

    #[test]
    fn test_only_edit_mode_records_undo() {
        assert!(Mode::Edit.records_undo());
        assert!(!Mode::Search.records_undo());
        assert_eq!(Mode::Search.label(), "SEARCH");
    }
}
