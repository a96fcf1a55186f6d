//! Dynamic value model
//!
//! [`Value`] is the closed set of runtime shapes the comparator knows how to
//! relate. Each value is probed once through [`Value::shape`], and the
//! resulting [`Shape`] is matched exhaustively by the comparator.
//!
//! Copyright (c) 2025 Versa Team
//! Licensed under the Apache-2.0 license

use crate::equality::{Comparable, Equatable};
use indexmap::IndexMap;
use std::any::Any;
use std::borrow::Cow;
use std::sync::Arc;

/// A dynamically shaped value
#[derive(Debug, Clone)]
pub enum Value {
    /// Absence of a value
    Null,
    /// Boolean scalar
    Bool(bool),
    /// Integer scalar
    Int(i64),
    /// Floating point scalar
    Float(f64),
    /// Text scalar
    Text(String),
    /// Sequence; its keys are the indexes `0..len`
    List(Vec<Value>),
    /// Insertion-ordered key to value collection
    Map(IndexMap<String, Value>),
    /// Plain object with public fields and no comparison capability
    Record {
        type_name: String,
        fields: IndexMap<String, Value>,
    },
    /// Object implementing the equality protocol
    Object(Arc<dyn Equatable>),
    /// Handle with no comparison capability at all
    Opaque(Arc<dyn Any + Send + Sync>),
}

/// Result of the capability probe performed on a [`Value`]
#[derive(Debug, Clone, Copy)]
pub enum Shape<'a> {
    Scalar(Scalar<'a>),
    Composite(Composite<'a>),
    Capable(Capability<'a>),
    Opaque,
}

/// Scalar kinds
#[derive(Debug, Clone, Copy)]
pub enum Scalar<'a> {
    Null,
    Bool(bool),
    Number(Number),
    Text(&'a str),
}

/// Numeric scalar
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

/// Composite kinds, all viewed as ordered key to value collections
#[derive(Debug, Clone, Copy)]
pub enum Composite<'a> {
    List(&'a [Value]),
    Map(&'a IndexMap<String, Value>),
    Record {
        type_name: &'a str,
        fields: &'a IndexMap<String, Value>,
    },
}

/// Capabilities exposed by an object
#[derive(Debug, Clone, Copy)]
pub struct Capability<'a> {
    /// `equals` is always available
    pub equatable: &'a dyn Equatable,
    /// Total order through `compare_to`, when the object declares one
    pub comparable: Option<&'a dyn Comparable>,
}

impl Value {
    /// Probe the value once for its shape and capabilities
    pub fn shape(&self) -> Shape<'_> {
        match self {
            Value::Null => Shape::Scalar(Scalar::Null),
            Value::Bool(b) => Shape::Scalar(Scalar::Bool(*b)),
            Value::Int(i) => Shape::Scalar(Scalar::Number(Number::Int(*i))),
            Value::Float(f) => Shape::Scalar(Scalar::Number(Number::Float(*f))),
            Value::Text(s) => Shape::Scalar(Scalar::Text(s)),
            Value::List(items) => Shape::Composite(Composite::List(items)),
            Value::Map(entries) => Shape::Composite(Composite::Map(entries)),
            Value::Record { type_name, fields } => Shape::Composite(Composite::Record {
                type_name,
                fields,
            }),
            Value::Object(object) => Shape::Capable(Capability {
                equatable: object.as_ref(),
                comparable: object.as_comparable(),
            }),
            Value::Opaque(_) => Shape::Opaque,
        }
    }

    /// Wrap any equatable object
    pub fn object<T: Equatable>(object: T) -> Self {
        Value::Object(Arc::new(object))
    }

    /// Wrap a handle without comparison capability
    pub fn opaque<T: Any + Send + Sync>(handle: T) -> Self {
        Value::Opaque(Arc::new(handle))
    }

    /// Build a record from a type name and its fields
    pub fn record<I, K>(type_name: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Value::Record {
            type_name: type_name.into(),
            fields: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Build a map from key/value pairs, keeping their order
    pub fn map<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Value::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Downcast an object value to its concrete type
    pub fn downcast_ref<T: Equatable>(&self) -> Option<&T> {
        match self {
            Value::Object(object) => object.as_any().downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Name of the runtime shape, for diagnostics
    pub fn type_name(&self) -> &str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Text(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Record { type_name, .. } => type_name.as_str(),
            Value::Object(object) => object.type_name(),
            Value::Opaque(_) => "opaque",
        }
    }

    /// Truthiness used by loose equality
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::Text(s) => !s.is_empty() && s != "0",
            Value::List(items) => !items.is_empty(),
            Value::Map(entries) => !entries.is_empty(),
            Value::Record { .. } | Value::Object(_) | Value::Opaque(_) => true,
        }
    }

    /// Numeric reading of a scalar, if it has one
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Int(i) => Some(Number::Int(*i)),
            Value::Float(f) => Some(Number::Float(*f)),
            Value::Text(s) => parse_numeric_text(s),
            _ => None,
        }
    }
}

impl<'a> Composite<'a> {
    /// Keys in iteration order, rendered as strings
    pub fn keys(&self) -> Vec<Cow<'a, str>> {
        match *self {
            Composite::List(items) => (0..items.len()).map(|i| Cow::Owned(i.to_string())).collect(),
            Composite::Map(entries) | Composite::Record { fields: entries, .. } => {
                entries.keys().map(|k| Cow::Borrowed(k.as_str())).collect()
            }
        }
    }

    /// Values in key order
    pub fn values(&self) -> Vec<&'a Value> {
        match *self {
            Composite::List(items) => items.iter().collect(),
            Composite::Map(entries) | Composite::Record { fields: entries, .. } => {
                entries.values().collect()
            }
        }
    }

    /// Lists and maps relate to each other; records only to records of the same type
    pub fn relates_to(&self, other: &Composite<'_>) -> bool {
        match (*self, *other) {
            (Composite::Record { type_name: a, .. }, Composite::Record { type_name: b, .. }) => a == b,
            (Composite::Record { .. }, _) | (_, Composite::Record { .. }) => false,
            _ => true,
        }
    }
}

fn parse_numeric_text(text: &str) -> Option<Number> {
    let trimmed = text.trim();
    if let Ok(i) = trimmed.parse::<i64>() {
        return Some(Number::Int(i));
    }
    match trimmed.parse::<f64>() {
        Ok(f) if f.is_finite() => Some(Number::Float(f)),
        _ => None,
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(entries: IndexMap<String, Value>) -> Self {
        Value::Map(entries)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}
