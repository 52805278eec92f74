//! End-to-end tests for accolade-runtime
//!
//! Drives the full path: catalog YAML -> validation -> event evaluation ->
//! unlock decisions and progress tracking.

use accolade_core::model::Grouping;
use accolade_core::Value;
use accolade_runtime::{
    CallableRegistry, Catalog, Engine, HandlerRegistry, ProgressLedger, RuntimeError,
};
use std::collections::HashSet;

const CATALOG: &str = r#"
events: [push, pull_request, release]

difficulties:
  - name: Easy
    points: 10
  - name: Medium
    points: 25
  - name: Hard
    points: 50

badges:
  - name: release-captain
    description: Cut a release.

conditions:
  - id: 1
    event_type: push
    description: pushed to the default branch
    test: value
    method: eq
    attribute: ref
    value: refs/heads/main
  - id: 2
    event_type: push
    description: every commit touched more than ten lines
    test: value
    method: gt
    attribute: commits.additions
    value: 10
  - id: 3
    event_type: push
    description: at least one commit mentions a fix
    test: value
    method: contains
    attribute: commits.message
    value: fix
    qualifier: lowercase
    quantifier: any
  - id: 4
    event_type: pull_request
    description: merged their own pull request
    test: attribute
    method: eq
    attributes:
      - [author, login]
      - [merged_by, login]
    qualifiers: [lowercase, lowercase]
  - id: 5
    event_type: release
    description: tagged a semver release
    test: value
    method: matches
    attribute: tag
    value: '^v\d+\.\d+\.\d+$'
  - id: 6
    event_type: push
    description: pushed outside working hours
    condition_type: custom
    test: custom
    handler: after_hours

achievements:
  - name: Mainliner
    active: true
    difficulty: Easy
    conditions: [1]
  - name: Fix Machine
    active: true
    difficulty: Medium
    grouping: or
    conditions: [2, 3]
  - name: Release Captain
    active: true
    difficulty: Hard
    badge: release-captain
    conditions: [5]
  - name: Self Merger
    active: true
    difficulty: Medium
    conditions: [4]
  - name: Night Owl
    active: true
    difficulty: Hard
    conditions: [6]
  - name: Bespoke
    active: true
    difficulty: Hard
    kind: custom
    conditions: [1]
"#;

fn engine() -> Engine {
    let mut handlers = HandlerRegistry::new();
    handlers.register("after_hours", |event: &Value| {
        Ok(event
            .as_object()
            .and_then(|map| map.get("hour"))
            .and_then(|hour| hour.as_number())
            .map_or(false, |hour| !(9.0..18.0).contains(&hour)))
    });
    Engine::new(CallableRegistry::new(), handlers)
}

fn catalog(engine: &Engine) -> Catalog {
    Catalog::from_str(CATALOG, engine.registry(), engine.handlers()).unwrap()
}

fn event(json: serde_json::Value) -> Value {
    Value::from(json)
}

// ========== Catalog ==========

#[test]
fn test_catalog_loads_and_links() {
    let engine = engine();
    let catalog = catalog(&engine);

    assert_eq!(catalog.achievements().len(), 6);
    let captain = catalog.achievement("Release Captain").unwrap();
    assert_eq!(captain.points(), 50);
    assert_eq!(captain.badge.as_ref().unwrap().name, "release-captain");

    let push_achievements = catalog.achievements_for_event("push");
    assert_eq!(push_achievements.len(), 4);
}

// ========== Single achievements ==========

#[test]
fn test_value_condition_unlocks() {
    let engine = engine();
    let catalog = catalog(&engine);
    let mainliner = catalog.achievement("Mainliner").unwrap();

    let push = event(serde_json::json!({"ref": "refs/heads/main"}));
    assert!(engine
        .unlocked(mainliner, "push", &push, &HashSet::new())
        .unwrap());

    let branch_push = event(serde_json::json!({"ref": "refs/heads/feature"}));
    assert!(!engine
        .unlocked(mainliner, "push", &branch_push, &HashSet::new())
        .unwrap());
}

#[test]
fn test_fan_out_with_quantifier() {
    let engine = engine();
    let catalog = catalog(&engine);
    let fix_machine = catalog.achievement("Fix Machine").unwrap();

    // Grouping is OR: the "any commit mentions a fix" condition carries it,
    // qualifier lowercases the message first
    let push = event(serde_json::json!({
        "commits": [
            {"additions": 2, "message": "Fix the login timeout"},
            {"additions": 1, "message": "typo"}
        ]
    }));
    assert!(engine
        .unlocked(fix_machine, "push", &push, &HashSet::new())
        .unwrap());

    let boring = event(serde_json::json!({
        "commits": [
            {"additions": 2, "message": "refactor"},
            {"additions": 1, "message": "typo"}
        ]
    }));
    assert!(!engine
        .unlocked(fix_machine, "push", &boring, &HashSet::new())
        .unwrap());
}

#[test]
fn test_regex_condition() {
    let engine = engine();
    let catalog = catalog(&engine);
    let captain = catalog.achievement("Release Captain").unwrap();

    let release = event(serde_json::json!({"tag": "v1.4.0"}));
    assert!(engine
        .unlocked(captain, "release", &release, &HashSet::new())
        .unwrap());

    let nightly = event(serde_json::json!({"tag": "nightly-2024"}));
    assert!(!engine
        .unlocked(captain, "release", &nightly, &HashSet::new())
        .unwrap());
}

#[test]
fn test_attribute_condition_compares_two_paths() {
    let engine = engine();
    let catalog = catalog(&engine);
    let merger = catalog.achievement("Self Merger").unwrap();

    let own_merge = event(serde_json::json!({
        "author": {"login": "Octo"},
        "merged_by": {"login": "octo"}
    }));
    assert!(engine
        .unlocked(merger, "pull_request", &own_merge, &HashSet::new())
        .unwrap());

    // Missing merged_by: the attribute condition is inapplicable, which is
    // falsy for unlocking
    let unmerged = event(serde_json::json!({"author": {"login": "octo"}}));
    assert!(!engine
        .unlocked(merger, "pull_request", &unmerged, &HashSet::new())
        .unwrap());
}

#[test]
fn test_custom_condition_through_handler() {
    let engine = engine();
    let catalog = catalog(&engine);
    let night_owl = catalog.achievement("Night Owl").unwrap();

    let late = event(serde_json::json!({"hour": 23}));
    assert!(engine
        .unlocked(night_owl, "push", &late, &HashSet::new())
        .unwrap());

    let midday = event(serde_json::json!({"hour": 12}));
    assert!(!engine
        .unlocked(night_owl, "push", &midday, &HashSet::new())
        .unwrap());
}

#[test]
fn test_handler_failure_propagates_as_error() {
    let mut handlers = HandlerRegistry::new();
    handlers.register("after_hours", |_event: &Value| {
        anyhow::bail!("clock service unavailable")
    });
    let engine = Engine::new(CallableRegistry::new(), handlers);
    let catalog = Catalog::from_str(CATALOG, engine.registry(), engine.handlers()).unwrap();
    let night_owl = catalog.achievement("Night Owl").unwrap();

    let late = event(serde_json::json!({"hour": 23}));
    let err = engine
        .unlocked(night_owl, "push", &late, &HashSet::new())
        .unwrap_err();
    assert!(matches!(err, RuntimeError::HandlerFailed { .. }));
}

// ========== Grouping and event types ==========

#[test]
fn test_event_type_mismatch_never_unlocks() {
    let engine = engine();
    let catalog = catalog(&engine);
    let mainliner = catalog.achievement("Mainliner").unwrap();

    // Payload would satisfy the condition; the event type keeps it locked
    let payload = event(serde_json::json!({"ref": "refs/heads/main"}));
    assert!(!engine
        .unlocked(mainliner, "pull_request", &payload, &HashSet::new())
        .unwrap());
    assert!(!engine
        .unlocked(mainliner, "release", &payload, &HashSet::new())
        .unwrap());
}

#[test]
fn test_custom_achievement_never_unlocks() {
    let engine = engine();
    let catalog = catalog(&engine);
    let bespoke = catalog.achievement("Bespoke").unwrap();

    let push = event(serde_json::json!({"ref": "refs/heads/main"}));
    assert!(!engine
        .unlocked(bespoke, "push", &push, &HashSet::new())
        .unwrap());
}

#[test]
fn test_xor_grouping_from_yaml() {
    let engine = engine();
    let yaml = CATALOG.replace("    grouping: or\n", "    grouping: xor\n");
    let catalog = Catalog::from_str(&yaml, engine.registry(), engine.handlers()).unwrap();
    let fix_machine = catalog.achievement("Fix Machine").unwrap();
    assert_eq!(fix_machine.grouping, Grouping::Xor);

    // Both conditions satisfied: xor folds back to false
    let both = event(serde_json::json!({
        "commits": [{"additions": 40, "message": "fix everything"}]
    }));
    assert!(!engine
        .unlocked(fix_machine, "push", &both, &HashSet::new())
        .unwrap());

    // Exactly one satisfied
    let one = event(serde_json::json!({
        "commits": [{"additions": 40, "message": "refactor"}]
    }));
    assert!(engine
        .unlocked(fix_machine, "push", &one, &HashSet::new())
        .unwrap());
}

// ========== Progress across events ==========

#[test]
fn test_progress_ledger_accumulates() {
    let engine = engine();
    let yaml = CATALOG.replace("    grouping: or\n", "");
    let catalog = Catalog::from_str(&yaml, engine.registry(), engine.handlers()).unwrap();
    // Now an AND achievement over conditions 2 and 3
    let fix_machine = catalog.achievement("Fix Machine").unwrap();
    let ledger = ProgressLedger::new();

    // Big push, no fix: proves condition 2 only
    let big = event(serde_json::json!({
        "commits": [{"additions": 40, "message": "refactor"}]
    }));
    let outcome = ledger
        .evaluate_and_record(&engine, "alice", fix_machine, "push", &big)
        .unwrap();
    assert!(!outcome.unlocked);
    assert_eq!(outcome.newly_satisfied, vec![2]);

    // Small fix push: proves condition 3; condition 2 is remembered
    let fix = event(serde_json::json!({
        "commits": [{"additions": 1, "message": "fix: off by one"}]
    }));
    let outcome = ledger
        .evaluate_and_record(&engine, "alice", fix_machine, "push", &fix)
        .unwrap();
    assert!(outcome.unlocked);
    assert_eq!(outcome.newly_satisfied, vec![3]);
}

#[test]
fn test_idempotent_re_evaluation() {
    let engine = engine();
    let catalog = catalog(&engine);
    let mainliner = catalog.achievement("Mainliner").unwrap();

    let satisfied: HashSet<_> = mainliner.condition_ids().into_iter().collect();
    // Unrelated payload and event type: the proven condition set carries it
    let anything = event(serde_json::json!({"noise": true}));
    assert!(engine
        .unlocked(mainliner, "release", &anything, &satisfied)
        .unwrap());
}
