//! Achievement model

use super::condition::{Condition, ConditionId};
use super::grouping::Grouping;
use serde::{Deserialize, Serialize};

/// Ranked difficulty with associated points
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Difficulty {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub points: u32,
}

/// A badge awarded alongside an achievement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Whether an achievement unlocks through the engine or bespoke logic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementKind {
    #[default]
    Standard,
    /// Never unlocked by the generic evaluator
    Custom,
}

impl AchievementKind {
    pub fn is_custom(&self) -> bool {
        matches!(self, AchievementKind::Custom)
    }
}

/// A named, points-bearing goal unlocked when its grouped conditions are
/// satisfied
///
/// Authored externally and read-only during evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Inactive achievements are kept out of event dispatch
    #[serde(default)]
    pub active: bool,

    pub difficulty: Difficulty,

    #[serde(default)]
    pub kind: AchievementKind,

    #[serde(default)]
    pub badge: Option<Badge>,

    /// How per-condition results fold into the unlock decision
    #[serde(default)]
    pub grouping: Grouping,

    #[serde(default)]
    pub conditions: Vec<Condition>,
}

impl Achievement {
    pub fn new(name: impl Into<String>, difficulty: Difficulty) -> Self {
        Achievement {
            name: name.into(),
            description: String::new(),
            active: false,
            difficulty,
            kind: AchievementKind::default(),
            badge: None,
            grouping: Grouping::default(),
            conditions: Vec::new(),
        }
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn with_kind(mut self, kind: AchievementKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_badge(mut self, badge: Badge) -> Self {
        self.badge = Some(badge);
        self
    }

    pub fn with_grouping(mut self, grouping: Grouping) -> Self {
        self.grouping = grouping;
        self
    }

    pub fn with_conditions(mut self, conditions: Vec<Condition>) -> Self {
        self.conditions = conditions;
        self
    }

    pub fn add_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Points won by completing this achievement.
    pub fn points(&self) -> u32 {
        self.difficulty.points
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_custom(&self) -> bool {
        self.kind.is_custom()
    }

    /// Ids of every attached condition.
    pub fn condition_ids(&self) -> Vec<ConditionId> {
        self.conditions.iter().map(|c| c.id).collect()
    }
}
