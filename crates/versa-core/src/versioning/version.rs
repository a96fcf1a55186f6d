//! Four-part version numbers
//!
//! A [`Version`] has the textual form `major.minor[.build[.revision]]`. Major
//! and minor are always present; build and revision are optional
//! [`VersionComponent`]s.
//!
//! Copyright (c) 2025 Versa Team
//! Licensed under the Apache-2.0 license

use crate::equality::{Comparable, Equatable};
use crate::error::{Error, Result};
use crate::value::Value;
use crate::versioning::component::{ComponentInput, VersionComponent};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// How major and minor segments are read from text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Integer cast: leading digits (and an exponent) are used, anything unreadable becomes `0`
    #[default]
    Lenient,
    /// Segments must be plain decimal numbers
    Strict,
}

/// Version number of the form `major.minor[.build[.revision]]`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub build: VersionComponent,
    pub revision: VersionComponent,
}

impl Version {
    /// Create a version with undefined build and revision
    pub const fn new(major: u32, minor: u32) -> Self {
        Self {
            major,
            minor,
            build: VersionComponent::undefined(),
            revision: VersionComponent::undefined(),
        }
    }

    /// Set the build component
    pub const fn with_build(mut self, build: u32) -> Self {
        self.build = VersionComponent::new(build);
        self
    }

    /// Set the revision component
    pub const fn with_revision(mut self, revision: u32) -> Self {
        self.revision = VersionComponent::new(revision);
        self
    }

    /// Create a version from unchecked numbers.
    ///
    /// `major` and `minor` must be non-negative; `build` and `revision` go
    /// through [`VersionComponent::parse`].
    pub fn try_new<'a, 'b>(
        major: i64,
        minor: i64,
        build: impl Into<ComponentInput<'a>>,
        revision: impl Into<ComponentInput<'b>>,
    ) -> Result<Self> {
        Ok(Self {
            major: positional_number("major", 1, major)?,
            minor: positional_number("minor", 2, minor)?,
            build: VersionComponent::parse(build)?,
            revision: VersionComponent::parse(revision)?,
        })
    }

    /// Create a version from dynamic values.
    ///
    /// `major` and `minor` must be integers; use [`Version::parse`] to read text.
    pub fn try_from_values(
        major: &Value,
        minor: &Value,
        build: &Value,
        revision: &Value,
    ) -> Result<Self> {
        let major = integer_argument("major", 1, major)?;
        let minor = integer_argument("minor", 2, minor)?;
        Self::try_new(
            major,
            minor,
            VersionComponent::from_value(build)?,
            VersionComponent::from_value(revision)?,
        )
    }

    /// Parse a version string, reading major and minor leniently
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_with(text, ParseMode::Lenient)
    }

    /// Parse a version string, rejecting non-numeric major and minor segments
    pub fn parse_strict(text: &str) -> Result<Self> {
        Self::parse_with(text, ParseMode::Strict)
    }

    /// Parse a version string with the given mode
    pub fn parse_with(text: &str, mode: ParseMode) -> Result<Self> {
        debug!(input = text, ?mode, "Parsing version");

        let segments: Vec<&str> = text.split('.').collect();
        if !(2..=4).contains(&segments.len()) {
            return Err(Error::parse(
                text,
                format!(
                    "expected format major.minor[.build[.revision]], found {} segment(s)",
                    segments.len()
                ),
            ));
        }

        let (major, minor) = match mode {
            ParseMode::Lenient => (coerce_integer(segments[0]), coerce_integer(segments[1])),
            ParseMode::Strict => (
                strict_integer(text, "major", segments[0])?,
                strict_integer(text, "minor", segments[1])?,
            ),
        };

        let build = optional_component(text, "build", segments.get(2))?;
        let revision = optional_component(text, "revision", segments.get(3))?;

        Self::try_new(major, minor, build, revision)
    }

    /// Read a version from a dynamic value.
    ///
    /// A value already holding a `Version` is returned unchanged; text is parsed.
    pub fn from_value(value: &Value) -> Result<Self> {
        if let Some(version) = value.downcast_ref::<Version>() {
            return Ok(*version);
        }
        match value {
            Value::Text(text) => Self::parse(text),
            other => Err(Error::parse(
                other.type_name(),
                "expected version text or a version",
            )),
        }
    }

    /// At least one component has to carry information
    pub fn is_valid(&self) -> bool {
        self.major != 0
            || self.minor != 0
            || self.build.int_value() > 0
            || self.revision.int_value() > 0
    }

    /// Comparator callback, usable directly with `sort_by`
    pub fn compare(left: &Version, right: &Version) -> Ordering {
        left.cmp(right)
    }
}

fn positional_number(argument: &'static str, position: usize, value: i64) -> Result<u32> {
    u32::try_from(value).map_err(|_| {
        if value < 0 {
            Error::invalid_argument(
                argument,
                position,
                format!("must be a non-negative number; '{}' given", value),
            )
        } else {
            Error::invalid_argument(
                argument,
                position,
                format!("must not exceed {}; '{}' given", u32::MAX, value),
            )
        }
    })
}

fn integer_argument(argument: &'static str, position: usize, value: &Value) -> Result<i64> {
    match value {
        Value::Int(i) => Ok(*i),
        other => Err(Error::invalid_argument(
            argument,
            position,
            format!(
                "must be an integer, '{}' given; use Version::parse to read text",
                other.type_name()
            ),
        )),
    }
}

/// Integer cast of a segment: optional leading ASCII whitespace and sign, the
/// leading digits, then an optional exponent (`1e3` is 1000). `0` when there
/// are no digits. Values beyond `i64` saturate and an infinite exponent yields `0`.
fn coerce_integer(segment: &str) -> i64 {
    let trimmed = segment.trim_start_matches([' ', '\t', '\n', '\r', '\x0B', '\x0C']);
    let bytes = trimmed.as_bytes();
    let sign = usize::from(matches!(bytes.first(), Some(b'-' | b'+')));
    let digits = count_digits(&bytes[sign..]);
    if digits == 0 {
        return 0;
    }

    let mut end = sign + digits;
    if let Some(b'e' | b'E') = bytes.get(end) {
        let exponent_sign = usize::from(matches!(bytes.get(end + 1), Some(b'-' | b'+')));
        let exponent_digits = count_digits(&bytes[end + 1 + exponent_sign..]);
        if exponent_digits > 0 {
            end += 1 + exponent_sign + exponent_digits;
            return match trimmed[..end].parse::<f64>() {
                Ok(value) if value.is_finite() => value as i64,
                _ => 0,
            };
        }
    }

    let negative = bytes.first() == Some(&b'-');
    let mut value: i64 = 0;
    for digit in &bytes[sign..end] {
        let digit = i64::from(digit - b'0');
        value = value.saturating_mul(10).saturating_add(digit);
    }

    if negative {
        -value
    } else {
        value
    }
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

fn strict_integer(text: &str, name: &str, segment: &str) -> Result<i64> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::parse(
            text,
            format!("{} component '{}' is not a decimal number", name, segment),
        ));
    }
    segment
        .parse::<i64>()
        .map_err(|_| Error::parse(text, format!("{} component '{}' is too large", name, segment)))
}

fn optional_component(text: &str, name: &str, segment: Option<&&str>) -> Result<VersionComponent> {
    VersionComponent::parse(segment.copied()).map_err(|e| match e {
        Error::Parse { message, .. } => Error::parse(text, format!("invalid {}: {}", name, message)),
        other => other,
    })
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)?;

        // Revision is only shown after a shown build
        if let Some(build) = self.build.value().filter(|b| *b > 0) {
            write!(f, ".{}", build)?;

            if let Some(revision) = self.revision.value().filter(|r| *r > 0) {
                write!(f, ".{}", revision)?;
            }
        }

        Ok(())
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Version {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Version {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.to_string()
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.major.cmp(&other.major) {
            Ordering::Equal => match self.minor.cmp(&other.minor) {
                Ordering::Equal => match self.build.cmp(&other.build) {
                    Ordering::Equal => self.revision.cmp(&other.revision),
                    ord => ord,
                },
                ord => ord,
            },
            ord => ord,
        }
    }
}

impl Equatable for Version {
    fn equals(&self, other: &Value) -> bool {
        other.downcast_ref::<Version>().is_some_and(|other| self == other)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_comparable(&self) -> Option<&dyn Comparable> {
        Some(self)
    }

    fn type_name(&self) -> &'static str {
        "Version"
    }
}

impl Comparable for Version {
    fn compare_to(&self, other: &Value) -> Option<Ordering> {
        other.downcast_ref::<Version>().map(|other| self.cmp(other))
    }
}

impl From<Version> for Value {
    fn from(version: Version) -> Self {
        Value::object(version)
    }
}
