//! Achievement catalog
//!
//! Achievements, conditions, difficulties and badges are authored externally
//! in YAML, cross-linked by id or name, and validated against the callable
//! registry and the handler registry before any event is evaluated. Every
//! failure here is a configuration error surfaced immediately; the
//! evaluation path never sees an unresolvable name.

use crate::error::ConfigError;
use crate::handlers::HandlerRegistry;
use crate::registry::{CallableKind, CallableRegistry};
use accolade_core::model::{
    Achievement, AchievementKind, Badge, Condition, ConditionId, ConditionTest, Difficulty,
    Grouping,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, info};

/// On-disk catalog format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    /// Known event type names; conditions may only reference these
    pub events: Vec<String>,

    #[serde(default)]
    pub difficulties: Vec<Difficulty>,

    #[serde(default)]
    pub badges: Vec<Badge>,

    /// Shared condition pool, referenced by id from achievements
    #[serde(default)]
    pub conditions: Vec<Condition>,

    #[serde(default)]
    pub achievements: Vec<AchievementDef>,
}

/// Achievement as authored: conditions by id, difficulty and badge by name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AchievementDef {
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub active: bool,

    pub difficulty: String,

    #[serde(default)]
    pub kind: AchievementKind,

    #[serde(default)]
    pub badge: Option<String>,

    #[serde(default)]
    pub grouping: Grouping,

    pub conditions: Vec<ConditionId>,
}

/// Validated, cross-linked catalog ready for evaluation
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    achievements: Vec<Achievement>,
}

impl Catalog {
    /// Load and validate a catalog from a YAML file.
    pub fn load_from_file(
        path: impl AsRef<Path>,
        registry: &CallableRegistry,
        handlers: &HandlerRegistry,
    ) -> Result<Catalog> {
        let path = path.as_ref();
        debug!("Loading achievement catalog from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;

        let catalog = Self::from_str(&content, registry, handlers)
            .with_context(|| format!("Failed to load catalog file: {}", path.display()))?;

        info!(
            "Loaded {} achievements from: {}",
            catalog.achievements.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Parse and validate a catalog from YAML text.
    pub fn from_str(
        content: &str,
        registry: &CallableRegistry,
        handlers: &HandlerRegistry,
    ) -> Result<Catalog> {
        let file: CatalogFile =
            serde_yaml::from_str(content).context("Failed to parse catalog YAML")?;
        let catalog = file.build(registry, handlers)?;
        Ok(catalog)
    }

    pub fn achievements(&self) -> &[Achievement] {
        &self.achievements
    }

    pub fn achievement(&self, name: &str) -> Option<&Achievement> {
        self.achievements.iter().find(|a| a.name == name)
    }

    /// Active achievements with at least one condition listening for
    /// `event_type`.
    pub fn achievements_for_event(&self, event_type: &str) -> Vec<&Achievement> {
        self.achievements
            .iter()
            .filter(|a| a.is_active())
            .filter(|a| a.conditions.iter().any(|c| c.event_type == event_type))
            .collect()
    }
}

impl CatalogFile {
    /// Validate the file and cross-link it into a [`Catalog`].
    pub fn build(
        self,
        registry: &CallableRegistry,
        handlers: &HandlerRegistry,
    ) -> std::result::Result<Catalog, ConfigError> {
        let events: HashSet<&str> = self.events.iter().map(|e| e.as_str()).collect();

        let mut conditions: HashMap<ConditionId, &Condition> = HashMap::new();
        for condition in &self.conditions {
            validate_condition(condition, &events, registry, handlers)?;
            if conditions.insert(condition.id, condition).is_some() {
                return Err(ConfigError::DuplicateConditionId(condition.id));
            }
        }

        let difficulties: HashMap<&str, &Difficulty> = self
            .difficulties
            .iter()
            .map(|d| (d.name.as_str(), d))
            .collect();
        let badges: HashMap<&str, &Badge> =
            self.badges.iter().map(|b| (b.name.as_str(), b)).collect();

        let mut achievements = Vec::with_capacity(self.achievements.len());
        for def in &self.achievements {
            let difficulty = difficulties.get(def.difficulty.as_str()).ok_or_else(|| {
                ConfigError::UnknownDifficulty {
                    achievement: def.name.clone(),
                    difficulty: def.difficulty.clone(),
                }
            })?;

            let badge = match &def.badge {
                Some(name) => Some(badges.get(name.as_str()).ok_or_else(|| {
                    ConfigError::UnknownBadge {
                        achievement: def.name.clone(),
                        badge: name.clone(),
                    }
                })?),
                None => None,
            };

            let mut attached = Vec::with_capacity(def.conditions.len());
            for id in &def.conditions {
                let condition =
                    conditions
                        .get(id)
                        .ok_or_else(|| ConfigError::UnknownCondition {
                            achievement: def.name.clone(),
                            id: *id,
                        })?;
                attached.push((*condition).clone());
            }

            achievements.push(Achievement {
                name: def.name.clone(),
                description: def.description.clone(),
                active: def.active,
                difficulty: (*difficulty).clone(),
                kind: def.kind,
                badge: badge.map(|b| (*b).clone()),
                grouping: def.grouping,
                conditions: attached,
            });
        }

        Ok(Catalog { achievements })
    }
}

fn validate_condition(
    condition: &Condition,
    events: &HashSet<&str>,
    registry: &CallableRegistry,
    handlers: &HandlerRegistry,
) -> std::result::Result<(), ConfigError> {
    if !events.contains(condition.event_type.as_str()) {
        return Err(ConfigError::UnknownEventType {
            id: condition.id,
            event_type: condition.event_type.clone(),
        });
    }

    match &condition.test {
        ConditionTest::Value(test) => {
            if test.attribute.is_empty() {
                return Err(ConfigError::EmptyAttributePath { id: condition.id });
            }
            resolve_callable(registry, CallableKind::Method, &test.method, condition.id)?;
            if let Some(name) = &test.qualifier {
                resolve_callable(registry, CallableKind::Qualifier, name, condition.id)?;
            }
            if let Some(name) = &test.quantifier {
                resolve_callable(registry, CallableKind::Quantifier, name, condition.id)?;
            }
        }
        ConditionTest::Attribute(test) => {
            if test.attributes.is_empty() || test.attributes.iter().any(|path| path.is_empty()) {
                return Err(ConfigError::EmptyAttributePath { id: condition.id });
            }
            let method = registry.resolve_method(&test.method).map_err(|_| {
                ConfigError::UnknownCallable {
                    id: condition.id,
                    kind: CallableKind::Method,
                    name: test.method.clone(),
                }
            })?;
            if let Some(expected) = method.arity {
                if test.attributes.len() != expected {
                    return Err(ConfigError::ArityMismatch {
                        id: condition.id,
                        name: test.method.clone(),
                        expected,
                        got: test.attributes.len(),
                    });
                }
            }
            for name in test.qualifiers.iter().flatten() {
                resolve_callable(registry, CallableKind::Qualifier, name, condition.id)?;
            }
        }
        ConditionTest::Custom(test) => {
            if !handlers.contains(&test.handler) {
                return Err(ConfigError::UnknownHandler {
                    id: condition.id,
                    handler: test.handler.clone(),
                });
            }
        }
    }

    Ok(())
}

fn resolve_callable(
    registry: &CallableRegistry,
    kind: CallableKind,
    name: &str,
    id: ConditionId,
) -> std::result::Result<(), ConfigError> {
    if registry.contains(kind, name) {
        Ok(())
    } else {
        Err(ConfigError::UnknownCallable {
            id,
            kind,
            name: name.to_string(),
        })
    }
}
