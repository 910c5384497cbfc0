use thiserror::Error;

/// A field-level invariant was violated. Raised before any write is issued.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Description must be at least {min} characters long")]
    DescriptionTooShort { min: usize },

    #[error("Strength must be one of 'Strong', 'Weak', or 'Average'")]
    InvalidStrength(String),
}
