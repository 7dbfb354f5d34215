//! Correlation id generation

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Correlation id generator strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdGenerator {
    /// Random UUID v4
    #[default]
    UuidV4,
    /// Time-ordered UUID v7, sorts by creation time
    UuidV7,
}

impl IdGenerator {
    /// Generate a new id in canonical hyphenated form
    pub fn generate(&self) -> String {
        match self {
            IdGenerator::UuidV4 => Uuid::new_v4().to_string(),
            IdGenerator::UuidV7 => Uuid::now_v7().to_string(),
        }
    }
}
