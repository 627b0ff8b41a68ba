//! Generic attribute view of a node.
//!
//! Every node, baseline or custom, can be flattened into an [`Attributes`]
//! map. The validator checks this view against the node's variant
//! definition, and the tag-driven constructor reads it back.

use std::fmt;

use ecow::EcoString;
use indexmap::IndexMap;
use serde::Serialize;

/// A scalar or list attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// A string payload (identifiers, urls, enumerated literals, ...)
    Text(EcoString),
    /// A flag
    Bool(bool),
    /// An integer
    Int(i64),
    /// A list of values, e.g. per-column table alignment
    List(Vec<AttrValue>),
}

impl AttrValue {
    /// Returns the string payload if this is a text value.
    pub fn as_text(&self) -> Option<&EcoString> {
        match self {
            AttrValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the flag if this is a boolean value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    /// Returns the number if this is an integer value.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttrValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the items if this is a list value.
    pub fn as_list(&self) -> Option<&[AttrValue]> {
        match self {
            AttrValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Name of the value's type, used in violation messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            AttrValue::Text(_) => "text",
            AttrValue::Bool(_) => "boolean",
            AttrValue::Int(_) => "integer",
            AttrValue::List(_) => "list",
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Text(text) => write!(f, "{text:?}"),
            AttrValue::Bool(flag) => write!(f, "{flag}"),
            AttrValue::Int(value) => write!(f, "{value}"),
            AttrValue::List(items) => {
                f.write_str("[")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.into())
    }
}

impl From<EcoString> for AttrValue {
    fn from(value: EcoString) -> Self {
        AttrValue::Text(value)
    }
}

impl From<&EcoString> for AttrValue {
    fn from(value: &EcoString) -> Self {
        AttrValue::Text(value.clone())
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<u32> for AttrValue {
    fn from(value: u32) -> Self {
        AttrValue::Int(value.into())
    }
}

impl From<u8> for AttrValue {
    fn from(value: u8) -> Self {
        AttrValue::Int(value.into())
    }
}

impl<T: Into<AttrValue>> From<Vec<T>> for AttrValue {
    fn from(items: Vec<T>) -> Self {
        AttrValue::List(items.into_iter().map(Into::into).collect())
    }
}

/// Insertion-ordered attribute map of a node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Attributes(IndexMap<EcoString, AttrValue>);

impl Attributes {
    /// Creates an empty attribute map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an attribute, builder style.
    pub fn with(mut self, name: impl Into<EcoString>, value: impl Into<AttrValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Sets an attribute, replacing any previous value.
    pub fn set(&mut self, name: impl Into<EcoString>, value: impl Into<AttrValue>) {
        self.0.insert(name.into(), value.into());
    }

    /// Sets an attribute only when a value is present.
    pub fn set_opt<V: Into<AttrValue>>(&mut self, name: impl Into<EcoString>, value: Option<V>) {
        if let Some(value) = value {
            self.set(name, value);
        }
    }

    /// Looks up an attribute.
    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.0.get(name)
    }

    /// Whether an attribute is present.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Text attribute, if present and textual.
    pub fn text(&self, name: &str) -> Option<EcoString> {
        self.get(name).and_then(AttrValue::as_text).cloned()
    }

    /// Boolean attribute, if present and boolean.
    pub fn flag(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(AttrValue::as_bool)
    }

    /// Integer attribute, if present and an integer.
    pub fn int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(AttrValue::as_int)
    }

    /// Iterates attributes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&EcoString, &AttrValue)> {
        self.0.iter()
    }

    /// Attribute names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &EcoString> {
        self.0.keys()
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map holds no attributes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<EcoString>, V: Into<AttrValue>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

impl IntoIterator for Attributes {
    type Item = (EcoString, AttrValue);
    type IntoIter = indexmap::map::IntoIter<EcoString, AttrValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
