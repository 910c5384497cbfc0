//! Field-level invariants shared by the HTTP handlers and the repository.
//!
//! Both layers call these independently so that no entry point can persist an
//! invalid power description or hero power strength.

use crate::enums::Strength;
use crate::error::ValidationError;

/// Minimum number of characters in a power description.
pub const MIN_DESCRIPTION_LEN: usize = 20;

/// Checks a power description, treating an absent value as too short.
///
/// Length is measured in characters, not bytes.
pub fn validate_description(value: Option<&str>) -> Result<&str, ValidationError> {
    match value {
        Some(description) if description.chars().count() >= MIN_DESCRIPTION_LEN => Ok(description),
        _ => Err(ValidationError::DescriptionTooShort {
            min: MIN_DESCRIPTION_LEN,
        }),
    }
}

/// Checks that `value` is exactly one of the enumerated strengths.
pub fn validate_strength(value: &str) -> Result<Strength, ValidationError> {
    value.parse()
}
