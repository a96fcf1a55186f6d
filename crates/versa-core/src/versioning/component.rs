//! Optional version components
//!
//! Build and revision numbers may be left unspecified. An undefined component
//! is distinct from zero: it sorts before every defined component and renders
//! as nothing.
//!
//! Copyright (c) 2025 Versa Team
//! Licensed under the Apache-2.0 license

use crate::equality::{Comparable, Equatable};
use crate::error::{Error, Result};
use crate::value::Value;
use std::any::Any;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// An optional non-negative version component
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct VersionComponent(Option<u32>);

/// Accepted inputs for [`VersionComponent::parse`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentInput<'a> {
    /// No value given
    Absent,
    /// Integer value
    Integer(i64),
    /// Decimal text
    Text(&'a str),
    /// Already built component, passed through
    Component(VersionComponent),
}

impl VersionComponent {
    /// The undefined component
    pub const fn undefined() -> Self {
        Self(None)
    }

    /// A defined component
    pub const fn new(value: u32) -> Self {
        Self(Some(value))
    }

    /// Build a component from an integer, decimal text, nothing, or another component
    pub fn parse<'a>(input: impl Into<ComponentInput<'a>>) -> Result<Self> {
        match input.into() {
            ComponentInput::Absent => Ok(Self::undefined()),
            ComponentInput::Component(component) => Ok(component),
            ComponentInput::Integer(value) => u32::try_from(value).map(Self::new).map_err(|_| {
                if value < 0 {
                    Error::parse(value.to_string(), "component must not be negative")
                } else {
                    Error::parse(
                        value.to_string(),
                        format!("component exceeds the maximum of {}", u32::MAX),
                    )
                }
            }),
            ComponentInput::Text(text) => parse_digits(text).map(Self::new),
        }
    }

    /// Build a component from a dynamic value
    pub fn from_value(value: &Value) -> Result<Self> {
        let input = match value {
            Value::Null => ComponentInput::Absent,
            Value::Int(i) => ComponentInput::Integer(*i),
            Value::Text(s) => ComponentInput::Text(s),
            other => match other.downcast_ref::<VersionComponent>() {
                Some(component) => ComponentInput::Component(*component),
                None => {
                    return Err(Error::parse(
                        other.type_name(),
                        "expected an integer, decimal text, null, or a version component",
                    ))
                }
            },
        };
        Self::parse(input)
    }

    pub const fn is_defined(&self) -> bool {
        self.0.is_some()
    }

    pub const fn value(&self) -> Option<u32> {
        self.0
    }

    /// Numeric value, `0` when undefined
    pub fn int_value(&self) -> u32 {
        self.0.unwrap_or(0)
    }

    /// Comparator callback: undefined sorts first, defined values numerically
    pub fn compare(left: &Self, right: &Self) -> Ordering {
        left.cmp(right)
    }
}

fn parse_digits(text: &str) -> Result<u32> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::parse(text, "component must be a non-negative decimal number"));
    }
    text.parse::<u32>().map_err(|_| {
        Error::parse(text, format!("component exceeds the maximum of {}", u32::MAX))
    })
}

impl PartialOrd for VersionComponent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VersionComponent {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.0, other.0) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(a), Some(b)) => a.cmp(&b),
        }
    }
}

impl fmt::Display for VersionComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{}", value),
            None => Ok(()),
        }
    }
}

impl FromStr for VersionComponent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<u32> for VersionComponent {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl From<Option<u32>> for VersionComponent {
    fn from(value: Option<u32>) -> Self {
        Self(value)
    }
}

impl From<i64> for ComponentInput<'_> {
    fn from(value: i64) -> Self {
        ComponentInput::Integer(value)
    }
}

impl From<u32> for ComponentInput<'_> {
    fn from(value: u32) -> Self {
        ComponentInput::Integer(i64::from(value))
    }
}

impl<'a> From<&'a str> for ComponentInput<'a> {
    fn from(value: &'a str) -> Self {
        ComponentInput::Text(value)
    }
}

impl<'a> From<&'a String> for ComponentInput<'a> {
    fn from(value: &'a String) -> Self {
        ComponentInput::Text(value)
    }
}

impl From<VersionComponent> for ComponentInput<'_> {
    fn from(value: VersionComponent) -> Self {
        ComponentInput::Component(value)
    }
}

impl<'a, T: Into<ComponentInput<'a>>> From<Option<T>> for ComponentInput<'a> {
    fn from(value: Option<T>) -> Self {
        value.map_or(ComponentInput::Absent, Into::into)
    }
}

impl Equatable for VersionComponent {
    fn equals(&self, other: &Value) -> bool {
        other
            .downcast_ref::<VersionComponent>()
            .is_some_and(|other| self == other)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_comparable(&self) -> Option<&dyn Comparable> {
        Some(self)
    }
}

impl Comparable for VersionComponent {
    fn compare_to(&self, other: &Value) -> Option<Ordering> {
        other
            .downcast_ref::<VersionComponent>()
            .map(|other| self.cmp(other))
    }
}

impl From<VersionComponent> for Value {
    fn from(component: VersionComponent) -> Self {
        Value::object(component)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_inputs() {
        assert_eq!(VersionComponent::parse(ComponentInput::Absent).unwrap(), VersionComponent::undefined());
        assert_eq!(VersionComponent::parse(None::<u32>).unwrap(), VersionComponent::undefined());
        assert_eq!(VersionComponent::parse(7i64).unwrap(), VersionComponent::new(7));
        assert_eq!(VersionComponent::parse(0u32).unwrap(), VersionComponent::new(0));
        assert_eq!(VersionComponent::parse("42").unwrap(), VersionComponent::new(42));

        let existing = VersionComponent::new(3);
        assert_eq!(VersionComponent::parse(existing).unwrap(), existing);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(VersionComponent::parse(-1i64).unwrap_err().is_parse());
        assert!(VersionComponent::parse(i64::from(u32::MAX) + 1).unwrap_err().is_parse());
        assert!(VersionComponent::parse("abc").unwrap_err().is_parse());
        assert!(VersionComponent::parse("-2").unwrap_err().is_parse());
        assert!(VersionComponent::parse("").unwrap_err().is_parse());
        assert!(VersionComponent::parse(" 1").unwrap_err().is_parse());
        assert!(VersionComponent::parse("99999999999").unwrap_err().is_parse());
    }

    #[test]
    fn test_from_value() {
        assert_eq!(VersionComponent::from_value(&Value::Null).unwrap(), VersionComponent::undefined());
        assert_eq!(VersionComponent::from_value(&Value::from(5i64)).unwrap(), VersionComponent::new(5));
        assert_eq!(VersionComponent::from_value(&Value::from("12")).unwrap(), VersionComponent::new(12));
        assert_eq!(
            VersionComponent::from_value(&Value::from(VersionComponent::new(9))).unwrap(),
            VersionComponent::new(9)
        );
        assert!(VersionComponent::from_value(&Value::from(1.5)).is_err());
        assert!(VersionComponent::from_value(&Value::from(vec![1i64])).is_err());
    }

    #[test]
    fn test_ordering() {
        let undefined = VersionComponent::undefined();
        let zero = VersionComponent::new(0);
        let five = VersionComponent::new(5);

        assert_eq!(VersionComponent::compare(&undefined, &undefined), Ordering::Equal);
        assert_eq!(VersionComponent::compare(&undefined, &zero), Ordering::Less);
        assert_eq!(VersionComponent::compare(&zero, &undefined), Ordering::Greater);
        assert_eq!(VersionComponent::compare(&zero, &five), Ordering::Less);
        assert_eq!(VersionComponent::compare(&five, &five), Ordering::Equal);
        assert_ne!(undefined, zero);
    }

    #[test]
    fn test_display() {
        assert_eq!(VersionComponent::undefined().to_string(), "");
        assert_eq!(VersionComponent::new(0).to_string(), "0");
        assert_eq!(VersionComponent::new(12).to_string(), "12");
    }

    #[test]
    fn test_equality_protocol() {
        let value = Value::from(VersionComponent::new(4));
        let component = VersionComponent::new(4);

        assert!(component.equals(&value));
        assert!(!component.equals(&Value::from(4i64)));
        assert_eq!(
            component.compare_to(&Value::from(VersionComponent::undefined())),
            Some(Ordering::Greater)
        );
        assert_eq!(component.compare_to(&Value::from("4")), None);
    }
}
