//! Error types for the Versa core library
//!
//! Parsing and construction failures surface immediately through [`Error`].
//! Incomparable values are not errors: the comparator reports them as `None`.
//!
//! Copyright (c) 2025 Versa Team
//! Licensed under the Apache-2.0 license

use thiserror::Error;

/// Main error type for Versa operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Version text or a version component could not be parsed
    #[error("Unable to parse '{input}': {message}")]
    Parse {
        input: String,
        message: String,
    },

    /// Direct construction received an unusable argument
    #[error("Invalid argument '{argument}' (argument {position}): {message}")]
    InvalidArgument {
        argument: &'static str,
        position: usize,
        message: String,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a parse error for the given input
    pub fn parse(input: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            input: input.into(),
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(
        argument: &'static str,
        position: usize,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidArgument {
            argument,
            position,
            message: message.into(),
        }
    }

    /// Check if this is a parse error
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    /// Check if this is an invalid argument error
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}
