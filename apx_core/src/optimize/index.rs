//! Provides a bidirectional mapping between names and dense integer positions
use std::fmt::{Display, Formatter};

use indexmap::IndexSet;

/// Bidirectional map between names and dense, zero-based positions
///
/// Positions are handed out in first-seen order and are never reused or reassigned. The
/// underlying [`IndexSet`] keeps the ordered sequence of names and the name-to-position
/// hash table in a single structure, so both directions always change together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NameIndex {
    names: IndexSet<String>,
}

impl NameIndex {
    /// Create a new, empty index
    pub fn new() -> Self {
        Self {
            names: IndexSet::new(),
        }
    }

    /// Get the position of `name`, allocating the next free position if it is not yet known
    ///
    /// # Parameters
    /// - `name`: Name to resolve
    ///
    /// # Returns
    /// The position associated with `name`
    ///
    /// # Examples
    /// ```rust
    /// use apx_core::optimize::index::NameIndex;
    /// let mut index = NameIndex::new();
    /// assert_eq!(index.resolve("x"), 0);
    /// assert_eq!(index.resolve("y"), 1);
    /// assert_eq!(index.resolve("x"), 0);
    /// ```
    pub fn resolve(&mut self, name: &str) -> usize {
        match self.names.get_index_of(name) {
            Some(index) => index,
            None => self.names.insert_full(name.to_string()).0,
        }
    }

    /// Position of `name`, None if it has not been allocated
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.get_index_of(name)
    }

    /// Name stored at `index`, None if the index has not been allocated
    pub fn name_of(&self, index: usize) -> Option<&str> {
        self.names.get_index(index).map(String::as_str)
    }

    /// Check if `name` has been allocated a position
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Number of allocated positions
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate over the names in position order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Iterate over `(position, name)` pairs in position order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.names.iter().map(String::as_str).enumerate()
    }
}

impl Display for NameIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.names().collect();
        write!(f, "[{}]", names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_is_idempotent() {
        let mut index = NameIndex::new();
        let first = index.resolve("flow");
        let second = index.resolve("flow");
        assert_eq!(first, second);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn first_seen_order() {
        let mut index = NameIndex::new();
        let names = ["c", "a", "b", "a", "d", "c"];
        let positions: Vec<usize> = names.iter().map(|n| index.resolve(n)).collect();
        assert_eq!(positions, vec![0, 1, 2, 1, 3, 0]);
        assert_eq!(index.names().collect::<Vec<_>>(), vec!["c", "a", "b", "d"]);
    }

    #[test]
    fn both_directions_agree() {
        let mut index = NameIndex::new();
        for name in ["x1", "x2", "slack", "x_3"] {
            index.resolve(name);
        }
        for (position, name) in index.iter() {
            assert_eq!(index.index_of(name), Some(position));
            assert_eq!(index.name_of(position), Some(name));
        }
        assert_eq!(index.index_of("missing"), None);
        assert_eq!(index.name_of(4), None);
    }

    #[test]
    fn display() {
        let mut index = NameIndex::new();
        assert_eq!(index.to_string(), "[]");
        index.resolve("x");
        index.resolve("y");
        assert_eq!(index.to_string(), "[x, y]");
    }
}
