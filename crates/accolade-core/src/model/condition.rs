//! Condition model
//!
//! A condition is a single testable predicate over an event. Exactly one
//! test variant backs any condition.

use crate::types::Value;
use serde::{Deserialize, Serialize};

/// Identifier shared between authored conditions and satisfied-set tracking
pub type ConditionId = u64;

/// Whether a condition is evaluated by the engine or by external code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionType {
    /// Evaluated by the engine
    #[default]
    Standard,
    /// Opaque; only unlocks through direct handler dispatch
    Custom,
}

impl ConditionType {
    pub fn is_custom(&self) -> bool {
        matches!(self, ConditionType::Custom)
    }
}

/// A single testable predicate over an event
///
/// Conditions react to one event type and carry exactly one test. They are
/// authored at configuration time and immutable during evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Unique id, referenced by achievements and satisfied-set tracking
    pub id: ConditionId,

    /// The kind of event this condition reacts to
    pub event_type: String,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub condition_type: ConditionType,

    #[serde(flatten)]
    pub test: ConditionTest,
}

impl Condition {
    pub fn is_custom(&self) -> bool {
        self.condition_type.is_custom()
    }
}

/// The test backing a condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "test", rename_all = "lowercase")]
pub enum ConditionTest {
    /// Compare a resolved attribute against a configured literal
    Value(ValueTest),
    /// Compare resolved attributes against each other
    Attribute(AttributeTest),
    /// Defer to an externally-registered handler
    Custom(CustomTest),
}

/// Test of one attribute against a configured value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueTest {
    /// Method name, resolved against the method namespaces
    pub method: String,

    /// Dotted path into the event payload
    pub attribute: String,

    /// Literal the resolved values are compared against
    pub value: Value,

    /// Optional transform applied to each resolved value
    #[serde(default)]
    pub qualifier: Option<String>,

    /// Optional aggregation over the per-value results; defaults to
    /// logical AND when absent
    #[serde(default)]
    pub quantifier: Option<String>,
}

impl ValueTest {
    /// The attribute split into its path keys.
    pub fn attribute_path(&self) -> Vec<&str> {
        self.attribute.split('.').collect()
    }
}

/// Test of several attributes against each other
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeTest {
    /// Method name, invoked with all resolved values positionally
    pub method: String,

    /// Ordered attribute paths, each a list of keys
    pub attributes: Vec<Vec<String>>,

    /// Positional qualifiers; paths beyond this list get none
    #[serde(default)]
    pub qualifiers: Vec<Option<String>>,
}

impl AttributeTest {
    /// Qualifier for the path at `index`, if one is configured.
    pub fn qualifier_for(&self, index: usize) -> Option<&str> {
        self.qualifiers.get(index).and_then(|q| q.as_deref())
    }
}

/// Reference to an externally-registered handler
///
/// The engine defines only the dispatch contract: name to a callable that
/// takes the event and returns a boolean. Handler bodies live outside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomTest {
    pub handler: String,
}
