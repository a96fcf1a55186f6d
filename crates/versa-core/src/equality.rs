//! Equality and ordering capabilities
//!
//! Any type can take part in generic comparison by implementing [`Equatable`]
//! and wrapping itself in [`Value::Object`]. Types with a total order also
//! implement [`Comparable`] and advertise it through
//! [`Equatable::as_comparable`]; the comparator prefers `compare_to` over
//! `equals` whenever both are available.
//!
//! Implementations must keep `equals` reflexive, and symmetric whenever both
//! operands implement the capability.
//!
//! Copyright (c) 2025 Versa Team
//! Licensed under the Apache-2.0 license

use crate::value::Value;
use std::any::Any;
use std::cmp::Ordering;
use std::fmt;

/// A value that can decide whether another value is equal to it
pub trait Equatable: Any + fmt::Debug + Send + Sync {
    /// Indicates whether `other` is equal to this instance
    fn equals(&self, other: &Value) -> bool;

    /// Access to the concrete type, used for downcasting
    fn as_any(&self) -> &dyn Any;

    /// Capability probe for a total order
    fn as_comparable(&self) -> Option<&dyn Comparable> {
        None
    }

    /// Name reported in diagnostics
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// A value that can determine its position relative to another value
pub trait Comparable: Equatable {
    /// Relative position of `self` with respect to `other`.
    ///
    /// Returns `None` when `other` cannot be related to this instance.
    fn compare_to(&self, other: &Value) -> Option<Ordering>;
}
