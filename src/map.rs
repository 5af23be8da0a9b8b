//! Ordered table type for parsed TOML documents.
//!
//! This module provides [`Table`], a wrapper around [`IndexMap`] that keeps
//! keys in the order they first appeared in the document. Re-assigning a key
//! replaces its node in place (last write wins) without moving it.
//!
//! ## Examples
//!
//! ```rust
//! use serde_tomlstream::{Node, Table};
//!
//! let mut table = Table::new();
//! table.insert("name".to_string(), Node::leaf("Alice"));
//! table.insert("role".to_string(), Node::leaf("admin"));
//!
//! assert_eq!(table.len(), 2);
//! assert_eq!(table.get("name").and_then(|n| n.raw_value()), Some("Alice"));
//! ```

use crate::Node;
use indexmap::IndexMap;

/// An ordered map of keys to [`Node`]s.
///
/// # Examples
///
/// ```rust
/// use serde_tomlstream::{Node, Table};
///
/// let mut table = Table::new();
/// table.insert("first".to_string(), Node::leaf("1"));
/// table.insert("second".to_string(), Node::leaf("2"));
///
/// let keys: Vec<_> = table.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table(IndexMap<String, Node>);

impl Table {
    /// Creates an empty `Table`.
    #[must_use]
    pub fn new() -> Self {
        Table(IndexMap::new())
    }

    /// Inserts a node under `key`, returning the node it replaced.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tomlstream::{Node, Table};
    ///
    /// let mut table = Table::new();
    /// assert!(table.insert("key".to_string(), Node::leaf("a")).is_none());
    /// assert!(table.insert("key".to_string(), Node::leaf("b")).is_some());
    /// assert_eq!(table.get("key").and_then(|n| n.raw_value()), Some("b"));
    /// ```
    pub fn insert(&mut self, key: String, node: Node) -> Option<Node> {
        self.0.insert(key, node)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.0.get_mut(key)
    }

    /// Returns the child table under `key`, creating an empty one if the key is
    /// absent. Returns `None` when `key` already holds a leaf.
    pub(crate) fn child_table_mut(&mut self, key: &str) -> Option<&mut Table> {
        let node = self
            .0
            .entry(key.to_string())
            .or_insert_with(|| Node::table(Table::new()));
        node.children_mut()
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys, in document order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Node> {
        self.0.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, String, Node> {
        self.0.values()
    }

    /// Returns an iterator over the key-node pairs, in document order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Node> {
        self.0.iter()
    }
}

impl IntoIterator for Table {
    type Item = (String, Node);
    type IntoIter = indexmap::map::IntoIter<String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = (&'a String, &'a Node);
    type IntoIter = indexmap::map::Iter<'a, String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Node)> for Table {
    fn from_iter<T: IntoIterator<Item = (String, Node)>>(iter: T) -> Self {
        Table(IndexMap::from_iter(iter))
    }
}
