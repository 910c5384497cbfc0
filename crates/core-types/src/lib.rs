pub mod enums;
pub mod error;
pub mod structs;
pub mod validation;

// Re-export the core types to provide a clean public API.
pub use enums::Strength;
pub use error::ValidationError;
pub use structs::{Hero, HeroPower, HeroWithPowers, Power};
pub use validation::{validate_description, validate_strength, MIN_DESCRIPTION_LEN};
