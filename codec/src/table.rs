//! Per-stream string table.

use std::collections::HashMap;
use std::sync::Arc;

/// Outcome of [`StringTable::intern`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interned {
    /// The value was already present at this index.
    Existing(usize),
    /// The value was appended at this index.
    Inserted(usize),
}

/// Append-only table of interned strings.
///
/// The encoder and the decoder of one stream each own a table. Both append
/// a value exactly when it travels as a literal, so after the same prefix of
/// records the two tables hold the same entries at the same indices.
#[derive(Debug, Clone, Default)]
pub struct StringTable {
    entries: Vec<Arc<str>>,
    index: HashMap<Arc<str>, usize>,
}

impl StringTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entry at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Arc<str>> {
        self.entries.get(index)
    }

    /// Returns the index of the first entry equal to `value`.
    #[must_use]
    pub fn lookup(&self, value: &str) -> Option<usize> {
        self.index.get(value).copied()
    }

    /// Appends `value` and returns its index.
    ///
    /// A value already present keeps resolving to its first index.
    pub fn push(&mut self, value: Arc<str>) -> usize {
        let index = self.entries.len();
        self.index.entry(Arc::clone(&value)).or_insert(index);
        self.entries.push(value);
        index
    }

    /// Returns the index of `value`, appending it first if it is new.
    pub fn intern(&mut self, value: &str) -> Interned {
        match self.lookup(value) {
            Some(index) => Interned::Existing(index),
            None => Interned::Inserted(self.push(value.into())),
        }
    }

    /// Drops every entry at or after `len`.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.entries.len() {
            return;
        }
        for (offset, value) in self.entries.drain(len..).enumerate() {
            if self.index.get(&value) == Some(&(len + offset)) {
                self.index.remove(&value);
            }
        }
    }

    /// Removes every entry, keeping allocations.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    /// Iterates entries in index order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(AsRef::as_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_assigns_sequential_indices() {
        let mut table = StringTable::new();
        assert!(table.is_empty());
        assert_eq!(table.push("a".into()), 0);
        assert_eq!(table.push("b".into()), 1);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(1).map(AsRef::as_ref), Some("b"));
        assert!(table.get(2).is_none());
    }

    #[test]
    fn lookup_finds_first_occurrence() {
        let mut table = StringTable::new();
        table.push("x".into());
        table.push("x".into());
        assert_eq!(table.lookup("x"), Some(0));
        assert_eq!(table.lookup("y"), None);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn intern_reuses_existing_entries() {
        let mut table = StringTable::new();
        assert_eq!(table.intern("a"), Interned::Inserted(0));
        assert_eq!(table.intern("b"), Interned::Inserted(1));
        assert_eq!(table.intern("a"), Interned::Existing(0));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn empty_string_is_a_regular_entry() {
        let mut table = StringTable::new();
        assert_eq!(table.push("".into()), 0);
        assert_eq!(table.lookup(""), Some(0));
    }

    #[test]
    fn truncate_forgets_dropped_entries() {
        let mut table = StringTable::new();
        table.push("keep".into());
        table.push("drop".into());
        table.push("keep".into());
        table.truncate(1);
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup("keep"), Some(0));
        assert_eq!(table.lookup("drop"), None);
        assert_eq!(table.iter().collect::<Vec<_>>(), vec!["keep"]);
    }

    #[test]
    fn clear_resets_everything() {
        let mut table = StringTable::new();
        table.push("a".into());
        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.lookup("a"), None);
        assert_eq!(table.push("b".into()), 0);
    }
}
