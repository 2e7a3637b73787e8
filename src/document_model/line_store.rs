use crate::error::{EditorError, Result};

/// Stable handle to a line. A handle whose line was merged away or
/// discarded never resolves again, even if its slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId {
    index: u32,
    generation: u32,
}

#[derive(Debug, Clone, Default)]
pub struct Line {
    prev: Option<LineId>,
    next: Option<LineId>,
    values: Vec<char>,
}

impl Line {
    fn with_values(values: Vec<char>) -> Self {
        Self {
            prev: None,
            next: None,
            values,
        }
    }

    pub fn values(&self) -> &[char] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Offset of the last character, normally the trailing newline.
    pub fn last_offset(&self) -> usize {
        self.values.len().saturating_sub(1)
    }

    pub fn prev(&self) -> Option<LineId> {
        self.prev
    }

    pub fn next(&self) -> Option<LineId> {
        self.next
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    line: Option<Line>,
}

/// Arena of lines linked into a single document-ordered list.
///
/// The store exclusively owns every line; `prev`/`next` are plain handles
/// used for traversal. Every line ends with `'\n'` and the store always
/// holds at least one line.
#[derive(Debug, Clone)]
pub struct LineStore {
    slots: Vec<Slot>,
    free: Vec<u32>,
    head: LineId,
    len: usize,
}

impl LineStore {
    pub fn new() -> Self {
        Self::load("")
    }

    /// Parse raw text into lines, keeping each newline as the terminal
    /// character of its line.
    pub fn load(text: &str) -> Self {
        let mut segments: Vec<Vec<char>> = vec![Vec::new()];
        for ch in text.chars() {
            if let Some(current) = segments.last_mut() {
                current.push(ch);
            }
            if ch == '\n' {
                segments.push(Vec::new());
            }
        }

        // A source ending in newline leaves a dangling empty segment
        if segments.len() > 1 && segments.last().is_some_and(|s| s.is_empty()) {
            segments.pop();
        }
        if let Some(last) = segments.last_mut() {
            if last.last() != Some(&'\n') {
                last.push('\n');
            }
        }

        let mut store = Self {
            slots: Vec::with_capacity(segments.len()),
            free: Vec::new(),
            head: LineId {
                index: 0,
                generation: 0,
            },
            len: 0,
        };

        let mut prev: Option<LineId> = None;
        for values in segments {
            let id = store.allocate(Line::with_values(values));
            match prev {
                Some(p) => store.link_after(p, id),
                None => store.head = id,
            }
            prev = Some(id);
            store.len += 1;
        }

        store
    }

    fn allocate(&mut self, line: Line) -> LineId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.generation = slot.generation.wrapping_add(1);
            slot.line = Some(line);
            LineId {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                line: Some(line),
            });
            LineId {
                index,
                generation: 0,
            }
        }
    }

    fn release(&mut self, id: LineId) {
        if let Some(slot) = self.slots.get_mut(id.index as usize) {
            if slot.generation == id.generation && slot.line.take().is_some() {
                self.free.push(id.index);
            }
        }
    }

    // Links an unlinked line directly after `prev`.
    fn link_after(&mut self, prev: LineId, id: LineId) {
        let after = self.get(prev).and_then(Line::next);
        if let Some(line) = self.get_mut(id) {
            line.prev = Some(prev);
            line.next = after;
        }
        if let Some(line) = self.get_mut(prev) {
            line.next = Some(id);
        }
        if let Some(after) = after {
            if let Some(line) = self.get_mut(after) {
                line.prev = Some(id);
            }
        }
    }

    pub fn get(&self, id: LineId) -> Option<&Line> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.line.as_ref())
    }

    fn get_mut(&mut self, id: LineId) -> Option<&mut Line> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.line.as_mut())
    }

    pub fn line(&self, id: LineId) -> Result<&Line> {
        self.get(id).ok_or(EditorError::StaleLine(id))
    }

    fn line_mut(&mut self, id: LineId) -> Result<&mut Line> {
        self.get_mut(id).ok_or(EditorError::StaleLine(id))
    }

    // Edits happen before an existing character, never after the newline.
    fn check_offset(&self, id: LineId, at: usize) -> Result<()> {
        let len = self.line(id)?.len();
        if at >= len {
            return Err(EditorError::OffsetOutOfRange {
                line: self.index_of(id).unwrap_or_default(),
                offset: at,
                len,
            });
        }
        Ok(())
    }

    pub fn contains(&self, id: LineId) -> bool {
        self.get(id).is_some()
    }

    pub fn head(&self) -> LineId {
        self.head
    }

    pub fn tail(&self) -> LineId {
        let mut current = self.head;
        while let Some(next) = self.next(current) {
            current = next;
        }
        current
    }

    pub fn next(&self, id: LineId) -> Option<LineId> {
        self.get(id).and_then(Line::next)
    }

    pub fn prev(&self, id: LineId) -> Option<LineId> {
        self.get(id).and_then(Line::prev)
    }

    /// Number of lines in the document.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Never true: the document always holds at least one line.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> Lines<'_> {
        Lines {
            store: self,
            current: Some(self.head),
        }
    }

    /// 0-based position of `id` counted from the head.
    pub fn index_of(&self, id: LineId) -> Option<usize> {
        self.iter().position(|(candidate, _)| candidate == id)
    }

    pub fn id_at(&self, index: usize) -> Option<LineId> {
        self.iter().nth(index).map(|(id, _)| id)
    }

    /// Split `id` at `at`: the left part keeps a newline terminator and
    /// the remainder becomes a new successor line, which is returned.
    pub fn split(&mut self, id: LineId, at: usize) -> Result<LineId> {
        self.check_offset(id, at)?;
        let line = self.line_mut(id)?;
        let shifted = line.values.split_off(at);
        line.values.push('\n');

        let successor = self.allocate(Line::with_values(shifted));
        self.link_after(id, successor);
        self.len += 1;
        Ok(successor)
    }

    pub fn insert_char(&mut self, id: LineId, at: usize, ch: char) -> Result<()> {
        self.check_offset(id, at)?;
        self.line_mut(id)?.values.insert(at, ch);
        Ok(())
    }

    pub fn remove_char(&mut self, id: LineId, at: usize) -> Result<char> {
        self.check_offset(id, at)?;
        Ok(self.line_mut(id)?.values.remove(at))
    }

    /// Merge `id` into its predecessor: the predecessor's trailing newline
    /// is dropped and `id`'s contents appended. Returns the predecessor and
    /// the offset where the two joined, or `None` for the head line.
    pub fn merge_into_prev(&mut self, id: LineId) -> Result<Option<(LineId, usize)>> {
        let line = self.line(id)?;
        let Some(prev) = line.prev else {
            return Ok(None);
        };
        let next = line.next;

        let mut moved = self.line_mut(id).map(|line| std::mem::take(&mut line.values))?;
        let prev_line = self.line_mut(prev)?;
        prev_line.values.pop();
        let join = prev_line.values.len();
        prev_line.values.append(&mut moved);
        prev_line.next = next;

        if let Some(next) = next {
            self.line_mut(next)?.prev = Some(prev);
        }
        self.release(id);
        self.len -= 1;

        Ok(Some((prev, join)))
    }

    /// Exchange the contents of two lines; links are untouched.
    pub fn swap_values(&mut self, a: LineId, b: LineId) -> Result<()> {
        self.line(a)?;
        self.line(b)?;
        if a == b {
            return Ok(());
        }
        let first = std::mem::take(&mut self.line_mut(a)?.values);
        let second = std::mem::replace(&mut self.line_mut(b)?.values, first);
        self.line_mut(a)?.values = second;
        Ok(())
    }

    /// Every character of every line, in document order.
    pub fn concatenate(&self) -> Vec<char> {
        self.iter()
            .flat_map(|(_, line)| line.values.iter().copied())
            .collect()
    }

    pub fn text(&self) -> String {
        self.concatenate().into_iter().collect()
    }
}

impl Default for LineStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Head-to-tail iterator over `(LineId, &Line)`.
pub struct Lines<'a> {
    store: &'a LineStore,
    current: Option<LineId>,
}

impl<'a> Iterator for Lines<'a> {
    type Item = (LineId, &'a Line);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let line = self.store.get(id)?;
        self.current = line.next;
        Some((id, line))
    }
}
