//! Per-user achievement progress
//!
//! Tracks which conditions each user has already satisfied for each
//! achievement, so repeated evaluation never re-checks proven conditions.
//! Updates run as read-evaluate-merge cycles under a per-key lock; two
//! events for the same user racing each other cannot lose updates.
//!
//! The ledger is engine-internal working state, not durable storage.
//! Callers that persist progress elsewhere can seed it with
//! [`ProgressLedger::record`].

use crate::engine::{Engine, UnlockOutcome};
use crate::error::Result;
use accolade_core::model::{Achievement, ConditionId};
use accolade_core::Value;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

type Key = (String, String);
type SatisfiedSet = Arc<Mutex<HashSet<ConditionId>>>;

/// In-memory ledger of satisfied condition ids per user and achievement
#[derive(Default)]
pub struct ProgressLedger {
    entries: Mutex<HashMap<Key, SatisfiedSet>>,
}

impl ProgressLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&self, user: &str, achievement: &str) -> SatisfiedSet {
        let mut entries = self.entries.lock().expect("progress ledger poisoned");
        entries
            .entry((user.to_string(), achievement.to_string()))
            .or_default()
            .clone()
    }

    /// Snapshot of the satisfied set for `user` and `achievement`.
    pub fn satisfied(&self, user: &str, achievement: &str) -> HashSet<ConditionId> {
        self.entry(user, achievement)
            .lock()
            .expect("progress entry poisoned")
            .clone()
    }

    /// Merge satisfied ids computed elsewhere (e.g. restored from storage).
    pub fn record(
        &self,
        user: &str,
        achievement: &str,
        ids: impl IntoIterator<Item = ConditionId>,
    ) {
        let entry = self.entry(user, achievement);
        let mut satisfied = entry.lock().expect("progress entry poisoned");
        satisfied.extend(ids);
    }

    /// Evaluate `achievement` against an event and fold the newly satisfied
    /// conditions back into the ledger.
    ///
    /// The whole read-evaluate-merge cycle holds the per-key lock, so
    /// concurrent events for the same user and achievement serialize instead
    /// of overwriting each other's progress.
    pub fn evaluate_and_record(
        &self,
        engine: &Engine,
        user: &str,
        achievement: &Achievement,
        event_type: &str,
        payload: &Value,
    ) -> Result<UnlockOutcome> {
        let entry = self.entry(user, &achievement.name);
        let mut satisfied = entry.lock().expect("progress entry poisoned");
        let snapshot = satisfied.clone();
        let outcome = engine.evaluate(achievement, event_type, payload, &snapshot)?;
        satisfied.extend(outcome.newly_satisfied.iter().copied());
        Ok(outcome)
    }
}
