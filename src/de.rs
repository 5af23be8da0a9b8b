//! Mapping parsed trees onto Rust types.
//!
//! This module provides [`NodeDeserializer`], a serde `Deserializer` over an
//! owned [`Node`]. Tables map to structs and maps; leaves map to strings.
//!
//! The parser keeps every value as raw text, so typed fields are converted
//! here on request: a `u16` field reads the leaf `"8080"` with `str::parse`.
//! Sequences are not supported since the parser produces no arrays.
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use serde_tomlstream::from_str;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Server { host: String, port: u16 }
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Config { name: String, server: Server }
//!
//! let toml = "name = \"demo\"\nserver.host = \"localhost\"\nserver.port = \"8080\"";
//! let config: Config = from_str(toml).unwrap();
//! assert_eq!(config.server.port, 8080);
//! ```

use crate::{Error, Node, Result, Table};
use serde::de::IntoDeserializer;
use serde::{de, forward_to_deserialize_any};

/// A serde deserializer over an owned [`Node`].
pub struct NodeDeserializer {
    node: Node,
}

impl NodeDeserializer {
    pub fn new(node: Node) -> Self {
        NodeDeserializer { node }
    }

    fn describe(&self) -> &'static str {
        match self.node {
            Node::Leaf(_) => "string",
            Node::Table(_) => "table",
        }
    }
}

macro_rules! deserialize_parsed {
    ($($method:ident => $visit:ident($ty:ty)),* $(,)?) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                match self.node {
                    Node::Leaf(raw) => match raw.trim().parse::<$ty>() {
                        Ok(parsed) => visitor.$visit(parsed),
                        Err(_) => Err(Error::custom(format!(
                            "invalid {} value: {:?}",
                            stringify!($ty),
                            raw
                        ))),
                    },
                    Node::Table(_) => Err(Error::custom(concat!(
                        "expected ",
                        stringify!($ty),
                        ", found table"
                    ))),
                }
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for NodeDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.node {
            Node::Leaf(raw) => visitor.visit_string(raw),
            Node::Table(children) => visitor.visit_map(MapDeserializer::new(children)),
        }
    }

    deserialize_parsed! {
        deserialize_bool => visit_bool(bool),
        deserialize_i8 => visit_i8(i8),
        deserialize_i16 => visit_i16(i16),
        deserialize_i32 => visit_i32(i32),
        deserialize_i64 => visit_i64(i64),
        deserialize_u8 => visit_u8(u8),
        deserialize_u16 => visit_u16(u16),
        deserialize_u32 => visit_u32(u32),
        deserialize_u64 => visit_u64(u64),
        deserialize_f32 => visit_f32(f32),
        deserialize_f64 => visit_f64(f64),
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if let Node::Leaf(raw) = &self.node {
            let mut chars = raw.chars();
            if let (Some(ch), None) = (chars.next(), chars.next()) {
                return visitor.visit_char(ch);
            }
        }
        Err(Error::custom("Expected single character"))
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        // an absent key is the only way to spell `None`
        visitor.visit_some(self)
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match &self.node {
            Node::Leaf(raw) if raw.is_empty() => visitor.visit_unit(),
            _ => Err(Error::custom(format!(
                "expected empty string, found {}",
                self.describe()
            ))),
        }
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::custom(format!(
            "arrays are not supported, found {}",
            self.describe()
        )))
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.node {
            Node::Table(children) => visitor.visit_map(MapDeserializer::new(children)),
            Node::Leaf(raw) => Err(Error::custom(format!(
                "expected table, found string {:?}",
                raw
            ))),
        }
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_map(visitor)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.node {
            Node::Leaf(raw) => visitor.visit_enum(raw.into_deserializer()),
            Node::Table(children) => {
                let mut entries = children.into_iter();
                match (entries.next(), entries.next()) {
                    (Some((variant, node)), None) => {
                        visitor.visit_enum(EnumDeserializer::new(variant, node))
                    }
                    _ => Err(Error::custom("Expected enum variant")),
                }
            }
        }
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    forward_to_deserialize_any! {
        i128 u128 str string bytes byte_buf identifier
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<String, Node>,
    value: Option<Node>,
}

impl MapDeserializer {
    fn new(table: Table) -> Self {
        MapDeserializer {
            iter: table.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, node)) => {
                self.value = Some(node);
                seed.deserialize(NodeDeserializer::new(Node::Leaf(key)))
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(node) => seed.deserialize(NodeDeserializer::new(node)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct EnumDeserializer {
    variant: String,
    node: Node,
}

impl EnumDeserializer {
    fn new(variant: String, node: Node) -> Self {
        EnumDeserializer { variant, node }
    }
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(NodeDeserializer::new(Node::Leaf(self.variant)))?;
        Ok((variant, VariantDeserializer { node: self.node }))
    }
}

struct VariantDeserializer {
    node: Node,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.node {
            Node::Leaf(raw) if raw.is_empty() => Ok(()),
            _ => Err(Error::custom("Expected unit variant")),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        seed.deserialize(NodeDeserializer::new(self.node))
    }

    fn tuple_variant<V>(self, _len: usize, _visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::custom("tuple variants are not supported"))
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.node {
            Node::Table(children) => visitor.visit_map(MapDeserializer::new(children)),
            Node::Leaf(_) => Err(Error::custom("Expected struct variant")),
        }
    }
}
