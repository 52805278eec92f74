//! Runtime error types
//!
//! `RuntimeError` covers evaluation-time failures; `ConfigError` covers
//! catalog validation, which runs once at configuration time. Soft failures
//! (missing attribute paths, event-type mismatches) are not errors at all;
//! they surface as `false` or "inapplicable" results.

use crate::registry::CallableKind;
use accolade_core::ConditionId;
use thiserror::Error;

/// Runtime error
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Named callable missing from every allow-listed namespace
    #[error("Unknown {kind} '{name}'")]
    UnknownCallable { kind: CallableKind, name: String },

    /// Method invoked with the wrong number of arguments
    #[error("Method '{name}' expects {expected} arguments, got {got}")]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Custom condition names a handler nobody registered
    #[error("Unknown custom handler '{0}'")]
    UnknownHandler(String),

    /// An externally-registered handler failed; distinct from the handler
    /// reporting "not satisfied"
    #[error("Custom handler '{name}' failed")]
    HandlerFailed {
        name: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Configuration-time validation error
///
/// Fatal and surfaced immediately when a catalog is built; never retried.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Condition {id}: unknown {kind} '{name}'")]
    UnknownCallable {
        id: ConditionId,
        kind: CallableKind,
        name: String,
    },

    #[error("Condition {id}: method '{name}' takes {expected} arguments but {got} attribute paths are given")]
    ArityMismatch {
        id: ConditionId,
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("Condition {id}: empty attribute path")]
    EmptyAttributePath { id: ConditionId },

    #[error("Condition {id}: unknown event type '{event_type}'")]
    UnknownEventType { id: ConditionId, event_type: String },

    #[error("Condition {id}: no custom handler registered under '{handler}'")]
    UnknownHandler { id: ConditionId, handler: String },

    #[error("Duplicate condition id {0}")]
    DuplicateConditionId(ConditionId),

    #[error("Achievement '{achievement}' references unknown condition {id}")]
    UnknownCondition {
        achievement: String,
        id: ConditionId,
    },

    #[error("Achievement '{achievement}' references unknown difficulty '{difficulty}'")]
    UnknownDifficulty {
        achievement: String,
        difficulty: String,
    },

    #[error("Achievement '{achievement}' references unknown badge '{badge}'")]
    UnknownBadge { achievement: String, badge: String },
}
