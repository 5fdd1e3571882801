//! Wire models for the character catalog API
//!
//! Defines the JSON envelope returned by the list endpoint and the entity
//! records inside it. Entities are immutable once decoded.

pub mod character;

// Re-export commonly used types
pub use character::{Character, CharacterPage, PageInfo};
