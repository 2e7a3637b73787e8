use super::highlight::HighlightSet;
use super::line_store::{LineId, LineStore};
use regex::Regex;
use tracing::{debug, warn};

/// Where a match begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchAnchor {
    pub line: LineId,
    pub x: usize,
}

/// Incremental, case-insensitive substring search.
///
/// Matches are recomputed from scratch against the whole document after
/// every term change or cycle request. `index` selects the active match;
/// `-1` means "stepped back before the first match" and resolves to the
/// last one on the next search.
#[derive(Debug, Clone)]
pub struct SearchState {
    term: Vec<char>,
    index: isize,
    matches: Vec<MatchAnchor>,
    highlights: HighlightSet,
    regex: Option<Regex>,
}

impl SearchState {
    pub fn new() -> Self {
        Self {
            term: Vec::new(),
            index: 0,
            matches: Vec::new(),
            highlights: HighlightSet::new(),
            regex: None,
        }
    }

    pub fn term(&self) -> &[char] {
        &self.term
    }

    pub fn term_string(&self) -> String {
        self.term.iter().collect()
    }

    pub fn index(&self) -> isize {
        self.index
    }

    pub fn matches(&self) -> &[MatchAnchor] {
        &self.matches
    }

    pub fn highlights(&self) -> &HighlightSet {
        &self.highlights
    }

    pub fn push_char(&mut self, ch: char) {
        self.term.push(ch);
        self.compile();
    }

    /// Drop the last character of the term; false when already empty.
    pub fn pop_char(&mut self) -> bool {
        let popped = self.term.pop().is_some();
        if popped {
            self.compile();
        }
        popped
    }

    pub fn set_term(&mut self, term: &str) {
        self.term = term.chars().collect();
        self.compile();
    }

    pub fn next(&mut self) {
        self.index += 1;
    }

    pub fn previous(&mut self) {
        if self.index > -1 {
            self.index -= 1;
        }
    }

    /// Forget the computed matches but keep the term.
    pub fn clear_matches(&mut self) {
        self.matches.clear();
        self.highlights.clear();
    }

    /// Back to an empty term with no matches.
    pub fn reset(&mut self) {
        self.term.clear();
        self.regex = None;
        self.index = 0;
        self.clear_matches();
    }

    fn compile(&mut self) {
        if self.term.is_empty() {
            self.regex = None;
            return;
        }

        // Escape special regex characters for literal search
        let escaped = regex::escape(&self.term_string());
        match Regex::new(&format!("(?i){}", escaped)) {
            Ok(regex) => self.regex = Some(regex),
            Err(e) => {
                warn!(error = %e, "search term could not be compiled");
                self.regex = None;
            }
        }
    }

    /// Recompute every match against `store` and return the anchor the
    /// cursor should move to, if any.
    pub fn search(&mut self, store: &LineStore) -> Option<MatchAnchor> {
        self.clear_matches();

        let Some(regex) = &self.regex else {
            return None;
        };

        // Flatten the document so matches may span line boundaries.
        let mut text = String::new();
        let mut origins: Vec<(usize, LineId, usize)> = Vec::new();
        for (id, line) in store.iter() {
            for (x, &ch) in line.values().iter().enumerate() {
                origins.push((text.len(), id, x));
                text.push(ch);
            }
        }

        for found in regex.find_iter(&text) {
            if found.is_empty() {
                continue;
            }
            let first = origins.partition_point(|&(byte, _, _)| byte < found.start());
            let last = origins.partition_point(|&(byte, _, _)| byte < found.end());
            let Some(&(_, line, x)) = origins.get(first) else {
                continue;
            };
            self.matches.push(MatchAnchor { line, x });
            for &(_, id, offset) in &origins[first..last] {
                self.highlights.insert(id, offset);
            }
        }

        debug!(
            term = %self.term_string(),
            matches = self.matches.len(),
            index = self.index,
            "search"
        );

        if self.matches.is_empty() {
            // Next successful search starts from the first match
            self.index = 0;
            return None;
        }

        let last = self.matches.len() - 1;
        match usize::try_from(self.index) {
            Ok(index) if index <= last => {}
            Ok(_) => self.index = 0,
            Err(_) => self.index = last as isize,
        }
        self.matches.get(self.index as usize).copied()
    }
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new()
    }
}
