//! Version numbers and their optional components
//!
//! This module provides:
//! - Four-part version parsing, both lenient and strict
//! - Rendering that hides zero build and revision numbers
//! - Total ordering with undefined components sorting first
//!
//! Copyright (c) 2025 Versa Team
//! Licensed under the Apache-2.0 license

pub mod component;
pub mod version;

pub use component::{ComponentInput, VersionComponent};
pub use version::{ParseMode, Version};

/// Sort versions in ascending order
pub fn sort_versions(versions: &mut [Version]) {
    versions.sort_by(Version::compare);
}

/// Parse every version text, failing on the first invalid one
pub fn parse_all<'a, I>(texts: I, mode: ParseMode) -> crate::Result<Vec<Version>>
where
    I: IntoIterator<Item = &'a str>,
{
    texts
        .into_iter()
        .map(|text| Version::parse_with(text, mode))
        .collect()
}
