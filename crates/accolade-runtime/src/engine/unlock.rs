//! Achievement unlock evaluation
//!
//! Folds per-condition results into a single unlock decision using the
//! achievement's grouping operator, skipping conditions already proven for
//! the user.

use super::Engine;
use crate::error::Result;
use accolade_core::model::{Achievement, ConditionId};
use accolade_core::Value;
use std::collections::HashSet;

/// Result of evaluating an achievement against one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnlockOutcome {
    /// Whether the grouped conditions are satisfied
    pub unlocked: bool,
    /// Conditions this event newly satisfied, for the caller to persist
    pub newly_satisfied: Vec<ConditionId>,
}

impl UnlockOutcome {
    fn locked() -> Self {
        UnlockOutcome {
            unlocked: false,
            newly_satisfied: Vec::new(),
        }
    }
}

impl Engine {
    /// Decide whether an event unlocks `achievement`.
    ///
    /// `already_satisfied` holds ids of conditions previously proven for
    /// this user and achievement. They are skipped: never re-checked against
    /// the (possibly irrelevant) new event and never allowed to flip the
    /// result back. The set is an immutable snapshot; use
    /// [`Engine::evaluate`] to learn which conditions the event newly
    /// satisfied.
    pub fn unlocked(
        &self,
        achievement: &Achievement,
        event_type: &str,
        payload: &Value,
        already_satisfied: &HashSet<ConditionId>,
    ) -> Result<bool> {
        self.evaluate(achievement, event_type, payload, already_satisfied)
            .map(|outcome| outcome.unlocked)
    }

    /// Like [`Engine::unlocked`], but also reports which conditions the
    /// event newly satisfied so the caller can fold them into its
    /// satisfied-set storage.
    ///
    /// An event whose type does not match a pending condition is irrelevant
    /// to the achievement as a whole: evaluation stops immediately, the
    /// achievement is reported locked and no progress is recorded.
    pub fn evaluate(
        &self,
        achievement: &Achievement,
        event_type: &str,
        payload: &Value,
        already_satisfied: &HashSet<ConditionId>,
    ) -> Result<UnlockOutcome> {
        // Custom achievements require bespoke external logic
        if achievement.is_custom() {
            return Ok(UnlockOutcome::locked());
        }

        let grouping = achievement.grouping;
        let mut passed = grouping.identity();
        let mut newly_satisfied = Vec::new();

        for condition in &achievement.conditions {
            if already_satisfied.contains(&condition.id) {
                continue;
            }
            if condition.event_type != event_type {
                tracing::debug!(
                    achievement = %achievement.name,
                    condition = condition.id,
                    expected = %condition.event_type,
                    received = %event_type,
                    "event type mismatch, achievement stays locked"
                );
                return Ok(UnlockOutcome::locked());
            }
            let satisfied = self
                .evaluate_condition(condition, payload)?
                .unwrap_or(false);
            if satisfied {
                newly_satisfied.push(condition.id);
            }
            passed = grouping.combine(passed, satisfied);
        }

        Ok(UnlockOutcome {
            unlocked: passed,
            newly_satisfied,
        })
    }

    /// Ids of the achievement's conditions this event satisfies, with no
    /// grouping or event-type filtering applied.
    pub fn satisfied_conditions(
        &self,
        achievement: &Achievement,
        payload: &Value,
    ) -> Result<Vec<ConditionId>> {
        let mut satisfied = Vec::new();
        for condition in &achievement.conditions {
            if self
                .evaluate_condition(condition, payload)?
                .unwrap_or(false)
            {
                satisfied.push(condition.id);
            }
        }
        Ok(satisfied)
    }
}
