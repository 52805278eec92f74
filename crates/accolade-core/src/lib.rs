//! Accolade Core - Core types for the Accolade achievement engine
//!
//! This crate provides the fundamental types used across the Accolade
//! ecosystem:
//! - Value types for event payloads
//! - The achievement and condition model
//! - The boolean grouping operator
//! - Error types

pub mod error;
pub mod model;
pub mod types;

// Re-export commonly used types
pub use error::CoreError;
pub use model::{
    Achievement, AchievementKind, Badge, Condition, ConditionId, ConditionTest, ConditionType,
    Difficulty, Grouping,
};
pub use types::Value;
