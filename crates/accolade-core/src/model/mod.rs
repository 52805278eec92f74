//! Achievement and condition model
//!
//! Achievements and conditions are authored externally and read-only during
//! evaluation. Conditions are a tagged union dispatched by exhaustive match,
//! never by runtime type lookup.

pub mod achievement;
pub mod condition;
pub mod grouping;

pub use achievement::{Achievement, AchievementKind, Badge, Difficulty};
pub use condition::{
    AttributeTest, Condition, ConditionId, ConditionTest, ConditionType, CustomTest, ValueTest,
};
pub use grouping::Grouping;
