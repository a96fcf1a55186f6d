//! Generic value comparison
//!
//! [`ValueComparator`] relates two [`Value`]s of possibly unrelated shape.
//! Dispatch is checked in order:
//!
//! 1. **Identity** - the same value (or the same shared object) is equal.
//! 2. **Capability** - an object implementing the equality protocol decides;
//!    `compare_to` is preferred over `equals`. A capable right operand is
//!    asked when the left one is not, and its answer is reversed.
//! 3. **Composites** - lists, maps and records compare by key sequence first
//!    (keys rendered as strings), then by values in key order, recursively.
//! 4. **Scalars of the same kind** - numbers numerically, text by ordinal byte
//!    order, booleans as `0`/`1`.
//! 5. **Fallback** - ordering is incomparable (`None`); equality uses loose
//!    platform equality.
//!
//! `None` means "do not reorder these relative to each other". It never means
//! equal, and [`ValueComparator::equals`] has to be asked separately.
//!
//! Copyright (c) 2025 Versa Team
//! Licensed under the Apache-2.0 license

use crate::value::{Capability, Composite, Number, Scalar, Shape, Value};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{trace, warn};

/// Outcome of a comparison; `None` is incomparable
pub type Comparison = Option<Ordering>;

/// Default recursion limit for nested composites
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Comparator configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparatorConfig {
    /// Maximum composite nesting followed before giving up as incomparable
    pub max_depth: usize,
}

impl Default for ComparatorConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Compares values of arbitrary shape
#[derive(Debug, Clone, Default)]
pub struct ValueComparator {
    config: ComparatorConfig,
}

impl ValueComparator {
    /// Create a comparator with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a comparator with a specific configuration
    pub fn with_config(config: ComparatorConfig) -> Self {
        Self { config }
    }

    /// Set the composite recursion limit
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    pub fn config(&self) -> &ComparatorConfig {
        &self.config
    }

    /// Relative position of `left` with respect to `right`, or `None` if
    /// they cannot be related
    pub fn compare(&self, left: &Value, right: &Value) -> Comparison {
        self.compare_at(left, right, 0)
    }

    /// Whether `left` and `right` are equal
    pub fn equals(&self, left: &Value, right: &Value) -> bool {
        self.equals_at(left, right, 0)
    }

    /// Stable sort; incomparable pairs keep their relative order
    pub fn sort(&self, values: &mut Vec<Value>) {
        stable_sort_by(values, |a, b| self.compare(a, b));
    }

    fn compare_at(&self, left: &Value, right: &Value, depth: usize) -> Comparison {
        if is_identical(left, right) {
            return Some(Ordering::Equal);
        }

        match (left.shape(), right.shape()) {
            (Shape::Capable(capability), _) => compare_capable(capability, right),
            (_, Shape::Capable(capability)) => {
                compare_capable(capability, left).map(Ordering::reverse)
            }
            (Shape::Composite(a), Shape::Composite(b)) if a.relates_to(&b) => {
                self.compare_composites(a, b, depth)
            }
            (Shape::Scalar(a), Shape::Scalar(b)) => {
                let result = compare_scalars(a, b);
                if result.is_none() {
                    trace!(
                        left = left.type_name(),
                        right = right.type_name(),
                        "Scalars are not comparable"
                    );
                }
                result
            }
            _ => {
                trace!(
                    left = left.type_name(),
                    right = right.type_name(),
                    "No common shape, values are incomparable"
                );
                None
            }
        }
    }

    fn compare_composites(&self, left: Composite<'_>, right: Composite<'_>, depth: usize) -> Comparison {
        if depth >= self.config.max_depth {
            warn!(
                max_depth = self.config.max_depth,
                "Composite nesting exceeds the comparison depth limit"
            );
            return None;
        }

        // Key sequences decide first, so a length mismatch never falls through to values
        match left.keys().iter().cmp(right.keys().iter()) {
            Ordering::Equal => {}
            ordering => return Some(ordering),
        }

        for (a, b) in left.values().into_iter().zip(right.values()) {
            match self.compare_at(a, b, depth + 1) {
                Some(Ordering::Equal) => continue,
                other => return other,
            }
        }

        Some(Ordering::Equal)
    }

    fn equals_at(&self, left: &Value, right: &Value, depth: usize) -> bool {
        if is_identical(left, right) {
            return true;
        }

        match (left.shape(), right.shape()) {
            (Shape::Capable(capability), _) => capability.equatable.equals(right),
            (_, Shape::Capable(capability)) => capability.equatable.equals(left),
            (Shape::Composite(a), Shape::Composite(b)) if a.relates_to(&b) => {
                if depth >= self.config.max_depth {
                    warn!(
                        max_depth = self.config.max_depth,
                        "Composite nesting exceeds the comparison depth limit"
                    );
                    return false;
                }
                a.keys() == b.keys()
                    && a.values()
                        .into_iter()
                        .zip(b.values())
                        .all(|(x, y)| self.equals_at(x, y, depth + 1))
            }
            (Shape::Scalar(a), Shape::Scalar(b)) if same_kind(a, b) => {
                compare_scalars(a, b) == Some(Ordering::Equal)
            }
            _ => loosely_equals(left, right),
        }
    }
}

/// Compare with the default comparator
pub fn compare(left: &Value, right: &Value) -> Comparison {
    ValueComparator::default().compare(left, right)
}

/// Equality with the default comparator
pub fn equals(left: &Value, right: &Value) -> bool {
    ValueComparator::default().equals(left, right)
}

/// Stable sort with the default comparator
pub fn sort_values(values: &mut Vec<Value>) {
    ValueComparator::default().sort(values);
}

/// Signed integer form of a comparison: `-1`, `0`, `1`, or `None`
pub fn ordering_sign(comparison: Comparison) -> Option<i32> {
    comparison.map(|ordering| ordering as i32)
}

/// Stable merge sort driven by a partial comparator.
///
/// Incomparable pairs are treated as equal. The std sorts may panic when the
/// comparator is not a total order, which a partial comparator cannot promise.
pub fn stable_sort_by<T, F>(items: &mut Vec<T>, mut compare: F)
where
    F: FnMut(&T, &T) -> Comparison,
{
    let taken = std::mem::take(items);
    *items = merge_sort(taken, &mut compare);
}

fn merge_sort<T, F>(mut items: Vec<T>, compare: &mut F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Comparison,
{
    if items.len() <= 1 {
        return items;
    }

    let right = items.split_off(items.len() / 2);
    let left = merge_sort(items, compare);
    let right = merge_sort(right, compare);

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    while let (Some(a), Some(b)) = (left.peek(), right.peek()) {
        // Only a strictly smaller right element moves ahead, which keeps the sort stable
        if compare(b, a) == Some(Ordering::Less) {
            merged.extend(right.next());
        } else {
            merged.extend(left.next());
        }
    }
    merged.extend(left);
    merged.extend(right);
    merged
}

fn is_identical(left: &Value, right: &Value) -> bool {
    if std::ptr::eq(left, right) {
        return true;
    }

    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Int(a), Value::Int(b)) => a == b,
        (Value::Float(a), Value::Float(b)) => a == b,
        (Value::Text(a), Value::Text(b)) => a == b,
        (Value::Object(a), Value::Object(b)) => {
            std::ptr::addr_eq(std::sync::Arc::as_ptr(a), std::sync::Arc::as_ptr(b))
        }
        (Value::Opaque(a), Value::Opaque(b)) => {
            std::ptr::addr_eq(std::sync::Arc::as_ptr(a), std::sync::Arc::as_ptr(b))
        }
        _ => false,
    }
}

fn compare_capable(capability: Capability<'_>, other: &Value) -> Comparison {
    match capability.comparable {
        Some(object) => object.compare_to(other),
        None => capability
            .equatable
            .equals(other)
            .then_some(Ordering::Equal),
    }
}

fn same_kind(left: Scalar<'_>, right: Scalar<'_>) -> bool {
    matches!(
        (left, right),
        (Scalar::Null, Scalar::Null)
            | (Scalar::Bool(_), Scalar::Bool(_))
            | (Scalar::Number(_), Scalar::Number(_))
            | (Scalar::Text(_), Scalar::Text(_))
    )
}

fn compare_scalars(left: Scalar<'_>, right: Scalar<'_>) -> Comparison {
    match (left, right) {
        (Scalar::Null, Scalar::Null) => Some(Ordering::Equal),
        (Scalar::Bool(a), Scalar::Bool(b)) => Some(u8::from(a).cmp(&u8::from(b))),
        (Scalar::Number(a), Scalar::Number(b)) => compare_numbers(a, b),
        (Scalar::Text(a), Scalar::Text(b)) => Some(a.as_bytes().cmp(b.as_bytes())),
        _ => None,
    }
}

fn compare_numbers(left: Number, right: Number) -> Comparison {
    match (left, right) {
        (Number::Int(a), Number::Int(b)) => Some(a.cmp(&b)),
        (Number::Int(a), Number::Float(b)) => compare_int_float(a, b),
        (Number::Float(a), Number::Int(b)) => compare_int_float(b, a).map(Ordering::reverse),
        (Number::Float(a), Number::Float(b)) => a.partial_cmp(&b),
    }
}

/// Exact comparison; casting the integer to `f64` would merge neighbours above 2^53
fn compare_int_float(int: i64, float: f64) -> Comparison {
    // 2^63, the first float past `i64::MAX`
    const UPPER: f64 = 9_223_372_036_854_775_808.0;

    if float.is_nan() {
        return None;
    }
    if float >= UPPER {
        return Some(Ordering::Less);
    }
    if float < -UPPER {
        return Some(Ordering::Greater);
    }

    let whole = float.trunc();
    match int.cmp(&(whole as i64)) {
        Ordering::Equal => 0f64.partial_cmp(&(float - whole)),
        ordering => Some(ordering),
    }
}

fn loosely_equals(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Bool(b), other) | (other, Value::Bool(b)) => *b == other.is_truthy(),
        (Value::Null, Value::Text(s)) | (Value::Text(s), Value::Null) => s.is_empty(),
        (Value::Null, other) | (other, Value::Null) => !other.is_truthy(),
        (Value::Int(_) | Value::Float(_), Value::Text(_))
        | (Value::Text(_), Value::Int(_) | Value::Float(_)) => {
            match (left.as_number(), right.as_number()) {
                (Some(a), Some(b)) => compare_numbers(a, b) == Some(Ordering::Equal),
                _ => false,
            }
        }
        _ => false,
    }
}
