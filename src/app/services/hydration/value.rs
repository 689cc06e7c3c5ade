//! Loosely-typed values and the type tags they carry
//!
//! Decoded JSON is converted into [`FieldValue`] before hydration. Every value
//! reports a type set: a single canonical [`TypeTag`] for primitives, or the
//! full capability set of the entity for object values.

use super::schema::EntityRef;
use crate::Error;
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::fmt;

/// Identity of a type a field may accept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeTag {
    Int,
    Float,
    Bool,
    String,
    List,
    Map,
    /// An entity type or a capability it declares
    Named(&'static str),
}

impl TypeTag {
    /// Resolve a primitive type name, normalizing common aliases
    ///
    /// Returns `None` for names that are not primitive; named entity types
    /// are only ever produced from declarations, never parsed.
    ///
    /// # Examples
    /// ```
    /// # use dmi_processor::TypeTag;
    /// assert_eq!(TypeTag::from_alias("integer"), Some(TypeTag::Int));
    /// assert_eq!(TypeTag::from_alias("double"), Some(TypeTag::Float));
    /// assert_eq!(TypeTag::from_alias("Station"), None);
    /// ```
    pub fn from_alias(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "int" | "integer" | "i64" | "long" => Some(TypeTag::Int),
            "float" | "double" | "f64" | "number" => Some(TypeTag::Float),
            "bool" | "boolean" => Some(TypeTag::Bool),
            "string" | "str" | "text" => Some(TypeTag::String),
            "list" | "array" | "vec" => Some(TypeTag::List),
            "map" | "object" | "dict" => Some(TypeTag::Map),
            _ => None,
        }
    }

    /// Canonical name of this tag
    pub fn name(&self) -> &'static str {
        match self {
            TypeTag::Int => "int",
            TypeTag::Float => "float",
            TypeTag::Bool => "bool",
            TypeTag::String => "string",
            TypeTag::List => "list",
            TypeTag::Map => "map",
            TypeTag::Named(name) => *name,
        }
    }

    /// Check whether this tag names a primitive kind
    pub fn is_primitive(&self) -> bool {
        !matches!(self, TypeTag::Named(_))
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Serialize for TypeTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// A loosely-typed value taken from a raw record or read back from an entity
#[derive(Debug, Clone, Default)]
pub enum FieldValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<FieldValue>),
    Map(IndexMap<String, FieldValue>),
    /// A hydrated entity, typed by its capability set
    Object(EntityRef),
}

impl FieldValue {
    /// Check if this is the null/absence marker
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Every type identity this value satisfies
    ///
    /// Primitives yield their single canonical tag. Objects yield their own
    /// type plus every capability declared for it. Null yields nothing.
    pub fn type_set(&self) -> Vec<TypeTag> {
        match self {
            FieldValue::Null => Vec::new(),
            FieldValue::Bool(_) => vec![TypeTag::Bool],
            FieldValue::Int(_) => vec![TypeTag::Int],
            FieldValue::Float(_) => vec![TypeTag::Float],
            FieldValue::String(_) => vec![TypeTag::String],
            FieldValue::List(_) => vec![TypeTag::List],
            FieldValue::Map(_) => vec![TypeTag::Map],
            FieldValue::Object(entity) => entity
                .type_set()
                .iter()
                .copied()
                .map(TypeTag::Named)
                .collect(),
        }
    }

    /// Short description of the value's kind for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Null => "null",
            FieldValue::Object(entity) => entity.type_name(),
            other => other
                .type_set()
                .first()
                .map(TypeTag::name)
                .unwrap_or("null"),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, FieldValue>> {
        match self {
            FieldValue::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&EntityRef> {
        match self {
            FieldValue::Object(entity) => Some(entity),
            _ => None,
        }
    }

    /// Nesting depth of this value (scalars are depth 0)
    pub fn depth(&self) -> usize {
        match self {
            FieldValue::List(items) => 1 + items.iter().map(FieldValue::depth).max().unwrap_or(0),
            FieldValue::Map(map) => 1 + map.values().map(FieldValue::depth).max().unwrap_or(0),
            _ => 0,
        }
    }
}

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FieldValue::Null, FieldValue::Null) => true,
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a == b,
            (FieldValue::Int(a), FieldValue::Int(b)) => a == b,
            (FieldValue::Float(a), FieldValue::Float(b)) => a == b,
            (FieldValue::String(a), FieldValue::String(b)) => a == b,
            (FieldValue::List(a), FieldValue::List(b)) => a == b,
            (FieldValue::Map(a), FieldValue::Map(b)) => a == b,
            (FieldValue::Object(a), FieldValue::Object(b)) => {
                a.type_name() == b.type_name() && a.to_map() == b.to_map()
            }
            _ => false,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => write!(f, "null"),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::List(l) => write!(f, "{:?}", l),
            FieldValue::Map(m) => write!(f, "{:?}", m),
            FieldValue::Object(entity) => write!(f, "<{}>", entity.type_name()),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Null => serializer.serialize_none(),
            FieldValue::Bool(b) => serializer.serialize_bool(*b),
            FieldValue::Int(i) => serializer.serialize_i64(*i),
            FieldValue::Float(f) => serializer.serialize_f64(*f),
            FieldValue::String(s) => serializer.serialize_str(s),
            FieldValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            FieldValue::Map(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
            FieldValue::Object(entity) => (**entity).serialize(serializer),
        }
    }
}

impl TryFrom<serde_json::Value> for FieldValue {
    type Error = Error;

    /// Convert decoded JSON, keeping integers and floats apart
    ///
    /// Integers outside the `i64` range are rejected rather than widened to
    /// a float.
    fn try_from(value: serde_json::Value) -> crate::Result<Self> {
        Ok(match value {
            serde_json::Value::Null => FieldValue::Null,
            serde_json::Value::Bool(b) => FieldValue::Bool(b),
            serde_json::Value::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => FieldValue::Int(i),
                (None, Some(f)) if n.is_f64() => FieldValue::Float(f),
                _ => {
                    return Err(Error::malformed_record(format!(
                        "integer {} is out of range",
                        n
                    )));
                }
            },
            serde_json::Value::String(s) => FieldValue::String(s),
            serde_json::Value::Array(items) => FieldValue::List(
                items
                    .into_iter()
                    .map(FieldValue::try_from)
                    .collect::<crate::Result<_>>()?,
            ),
            serde_json::Value::Object(map) => FieldValue::Map(
                map.into_iter()
                    .map(|(key, value)| Ok((key, FieldValue::try_from(value)?)))
                    .collect::<crate::Result<_>>()?,
            ),
        })
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Int(i64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<Vec<FieldValue>> for FieldValue {
    fn from(value: Vec<FieldValue>) -> Self {
        FieldValue::List(value)
    }
}

impl From<EntityRef> for FieldValue {
    fn from(value: EntityRef) -> Self {
        FieldValue::Object(value)
    }
}

/// Numeric sum type accepting both integer and floating-point values
///
/// DMI publishes whole-number readings (e.g. `"value": 12`) as JSON integers;
/// fields declared as `Number` accept either kind without converting it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    /// Numeric value as a float
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Int(i) => *i as f64,
            Number::Float(f) => *f,
        }
    }
}

impl Default for Number {
    fn default() -> Self {
        Number::Int(0)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{}", i),
            Number::Float(fl) => write!(f, "{}", fl),
        }
    }
}

/// Identifier published either as text or as a number
///
/// WMO station ids appear as `"06180"` in some payloads and `6180` in others.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identifier {
    Text(String),
    Numeric(i64),
}

impl Default for Identifier {
    fn default() -> Self {
        Identifier::Text(String::new())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Text(s) => write!(f, "{}", s),
            Identifier::Numeric(n) => write!(f, "{}", n),
        }
    }
}
