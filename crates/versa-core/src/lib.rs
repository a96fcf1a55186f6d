//! Versa Core - value comparison protocol and version numbers
//!
//! This crate provides:
//! - **Value comparison**: a comparator that orders and equates values of
//!   arbitrary shape (scalars, lists, maps, records, capable objects) and
//!   reports incomparable pairs explicitly instead of guessing
//! - **Equality protocol**: the [`Equatable`] and [`Comparable`] capabilities
//!   any type can implement to take part in generic comparison
//! - **Version numbers**: four-part [`Version`]s with optional build and
//!   revision [`VersionComponent`]s, parsing, rendering and ordering
//!
//! ## Quick Start
//!
//! ```rust
//! use versa_core::{compare, Value, Version};
//! use std::cmp::Ordering;
//!
//! let newer = Version::parse("2.10.3").unwrap();
//! let older = Version::parse("2.9.99").unwrap();
//! assert!(newer > older);
//!
//! let mut versions = vec![
//!     Version::parse("1.2").unwrap(),
//!     Version::parse("1.0").unwrap(),
//!     Version::parse("1.2.1").unwrap(),
//! ];
//! versions.sort_by(Version::compare);
//! assert_eq!(versions[0].to_string(), "1.0");
//!
//! // Versions take part in generic comparison like any other value
//! let result = compare(&Value::from(newer), &Value::from(older));
//! assert_eq!(result, Some(Ordering::Greater));
//!
//! // Values with nothing in common are incomparable, not equal
//! assert_eq!(compare(&Value::from(1i64), &Value::from(vec!["a"])), None);
//! ```
//!
//! Copyright (c) 2025 Versa Team
//! Licensed under the Apache-2.0 license

pub mod compare;
pub mod equality;
pub mod error;
pub mod value;
pub mod versioning;

// Re-export commonly used types for convenience
pub use compare::{
    compare, equals, ordering_sign, sort_values, stable_sort_by, ComparatorConfig, Comparison,
    ValueComparator,
};
pub use equality::{Comparable, Equatable};
pub use error::{Error, Result};
pub use value::{Shape, Value};
pub use versioning::{ComponentInput, ParseMode, Version, VersionComponent};
