//! Node tree produced by the parser.
//!
//! A parsed document is a root [`Table`] of [`Node`]s. Each node is either a
//! leaf holding the raw decoded string payload of a value, or a container
//! holding named children (created by dotted keys such as `a.b = "x"`).
//!
//! The parser never infers types: `port = "8080"` produces the leaf `8080`,
//! and it is up to the consumer (or [`crate::from_str`]) to interpret it.
//!
//! ## Examples
//!
//! ```rust
//! use serde_tomlstream::{parse_str, Node};
//!
//! let tree = parse_str("server.host = \"localhost\"").unwrap();
//! let server = tree.get("server").unwrap();
//! assert!(server.is_table());
//! assert_eq!(server.get("host"), Some(&Node::leaf("localhost")));
//! ```

use crate::Table;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A single entry of a parsed TOML tree.
///
/// # Examples
///
/// ```rust
/// use serde_tomlstream::{Node, Table};
///
/// let leaf = Node::leaf("hello");
/// assert!(leaf.is_leaf());
/// assert_eq!(leaf.raw_value(), Some("hello"));
///
/// let table = Node::table(Table::new());
/// assert!(table.is_table());
/// assert_eq!(table.raw_value(), None);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Leaf(String),
    Table(Table),
}

impl Node {
    /// Wraps a decoded string payload as a leaf node.
    #[inline]
    #[must_use]
    pub fn leaf(raw: impl Into<String>) -> Self {
        Node::Leaf(raw.into())
    }

    /// Wraps a table as a container node.
    #[inline]
    #[must_use]
    pub fn table(children: Table) -> Self {
        Node::Table(children)
    }

    #[inline]
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_table(&self) -> bool {
        matches!(self, Node::Table(_))
    }

    /// If the node is a leaf, returns its raw payload. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn raw_value(&self) -> Option<&str> {
        match self {
            Node::Leaf(raw) => Some(raw),
            Node::Table(_) => None,
        }
    }

    /// If the node is a container, returns its children. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn children(&self) -> Option<&Table> {
        match self {
            Node::Table(children) => Some(children),
            Node::Leaf(_) => None,
        }
    }

    #[inline]
    pub fn children_mut(&mut self) -> Option<&mut Table> {
        match self {
            Node::Table(children) => Some(children),
            Node::Leaf(_) => None,
        }
    }

    /// Looks up a direct child of a container node.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.children().and_then(|children| children.get(key))
    }

    /// Follows a sequence of keys through nested containers.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_tomlstream::{parse_str, Node};
    ///
    /// let tree = Node::table(parse_str("a.b.c = \"deep\"").unwrap());
    /// assert_eq!(tree.get_path(&["a", "b", "c"]), Some(&Node::leaf("deep")));
    /// assert_eq!(tree.get_path(&["a", "x"]), None);
    /// ```
    #[must_use]
    pub fn get_path(&self, path: &[&str]) -> Option<&Node> {
        path.iter().try_fold(self, |node, key| node.get(key))
    }
}

impl Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Node::Leaf(raw) => serializer.serialize_str(raw),
            Node::Table(children) => children.serialize(serializer),
        }
    }
}

impl Serialize for Table {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

struct NodeVisitor;

impl<'de> serde::de::Visitor<'de> for NodeVisitor {
    type Value = Node;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string or a table of strings")
    }

    // Scalars from other formats are kept as their textual form, the same
    // shape the parser produces.
    fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
        Ok(Node::leaf(value.to_string()))
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
        Ok(Node::leaf(value.to_string()))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
        Ok(Node::leaf(value.to_string()))
    }

    fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
        Ok(Node::leaf(value.to_string()))
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
        Ok(Node::leaf(value))
    }

    fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
        Ok(Node::Leaf(value))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut children = Table::new();
        while let Some((key, value)) = map.next_entry()? {
            children.insert(key, value);
        }
        Ok(Node::Table(children))
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(NodeVisitor)
    }
}

impl<'de> Deserialize<'de> for Table {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Node::deserialize(deserializer)? {
            Node::Table(children) => Ok(children),
            Node::Leaf(_) => Err(serde::de::Error::custom("expected a table, found a string")),
        }
    }
}

impl TryFrom<Node> for String {
    type Error = crate::Error;

    fn try_from(node: Node) -> crate::Result<Self> {
        match node {
            Node::Leaf(raw) => Ok(raw),
            Node::Table(_) => Err(crate::Error::custom("expected string, found table")),
        }
    }
}

impl TryFrom<Node> for Table {
    type Error = crate::Error;

    fn try_from(node: Node) -> crate::Result<Self> {
        match node {
            Node::Table(children) => Ok(children),
            Node::Leaf(raw) => Err(crate::Error::custom(format!(
                "expected table, found string {:?}",
                raw
            ))),
        }
    }
}
