use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single configuration value as it travels through a descriptor.
///
/// The string form (see [`fmt::Display`]) is what coercion, equality and hashing operate on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Null,
    Bool(bool),
    Int(i32),
    Long(i64),
    Str(String),
    List(Vec<PropertyValue>),
    /// nested settings handed to a setter as they are
    Object(IndexMap<String, PropertyValue>),
}

/// Declared type of an accessor's return value or a mutator's parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Bool,
    Int,
    Long,
    Str,
    List,
    /// a nested object the flat property map cannot represent
    Opaque(&'static str),
}

impl ValueKind {
    /// whether values of this kind may appear in an extracted property map
    pub fn is_general(&self) -> bool {
        !matches!(self, ValueKind::Opaque(_))
    }
}

impl PropertyValue {
    pub fn is_null(&self) -> bool {
        matches!(self, PropertyValue::Null)
    }

    pub fn is_scalar(&self) -> bool {
        !matches!(self, PropertyValue::List(_) | PropertyValue::Object(_))
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Null => write!(f, "null"),
            PropertyValue::Bool(b) => write!(f, "{b}"),
            PropertyValue::Int(i) => write!(f, "{i}"),
            PropertyValue::Long(l) => write!(f, "{l}"),
            PropertyValue::Str(s) => f.write_str(s),
            PropertyValue::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            PropertyValue::Object(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}={value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        PropertyValue::Int(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::Long(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Str(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Str(value)
    }
}

impl From<Option<String>> for PropertyValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(PropertyValue::Null, PropertyValue::Str)
    }
}

impl<T: Into<PropertyValue>> From<Vec<T>> for PropertyValue {
    fn from(values: Vec<T>) -> Self {
        PropertyValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<IndexMap<String, PropertyValue>> for PropertyValue {
    fn from(entries: IndexMap<String, PropertyValue>) -> Self {
        PropertyValue::Object(entries)
    }
}
