use super::line_store::{LineId, LineStore};
use std::collections::{BTreeSet, HashMap};

/// Sparse per-line sets of highlighted offsets.
///
/// Serves both the selection and the search matches. Offsets within a
/// line are kept sorted so document-order traversal is a head-to-tail walk
/// over the store.
#[derive(Debug, Clone, Default)]
pub struct HighlightSet {
    lines: HashMap<LineId, BTreeSet<usize>>,
}

impl HighlightSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idempotent.
    pub fn insert(&mut self, line: LineId, x: usize) {
        self.lines.entry(line).or_default().insert(x);
    }

    pub fn insert_range(&mut self, line: LineId, range: std::ops::Range<usize>) {
        if range.is_empty() {
            return;
        }
        self.lines.entry(line).or_default().extend(range);
    }

    pub fn contains(&self, line: LineId, x: usize) -> bool {
        self.lines.get(&line).is_some_and(|offsets| offsets.contains(&x))
    }

    pub fn offsets(&self, line: LineId) -> Option<&BTreeSet<usize>> {
        self.lines.get(&line)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.values().all(BTreeSet::is_empty)
    }

    /// Total number of highlighted offsets across all lines.
    pub fn count(&self) -> usize {
        self.lines.values().map(BTreeSet::len).sum()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Highlighted `(line, offset)` pairs in document order. Entries for
    /// lines no longer in `store` are skipped.
    pub fn positions_in_order(&self, store: &LineStore) -> Vec<(LineId, usize)> {
        store
            .iter()
            .filter_map(|(id, _)| self.lines.get(&id).map(|offsets| (id, offsets)))
            .flat_map(|(id, offsets)| offsets.iter().map(move |&x| (id, x)))
            .collect()
    }

    /// Highlighted characters in document order.
    pub fn characters(&self, store: &LineStore) -> Vec<char> {
        self.positions_in_order(store)
            .into_iter()
            .filter_map(|(id, x)| store.get(id).and_then(|line| line.values().get(x).copied()))
            .collect()
    }
}
