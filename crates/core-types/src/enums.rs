use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How strongly a hero wields one of their powers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strength {
    Strong,
    Weak,
    Average,
}

impl Strength {
    pub const ALL: [Strength; 3] = [Strength::Strong, Strength::Weak, Strength::Average];

    /// The exact spelling stored in the `hero_powers.strength` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Strength::Strong => "Strong",
            Strength::Weak => "Weak",
            Strength::Average => "Average",
        }
    }
}

impl FromStr for Strength {
    type Err = ValidationError;

    // Matching is case-sensitive: "strong" is not a valid strength.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strength::ALL
            .into_iter()
            .find(|strength| strength.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidStrength(s.to_string()))
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
