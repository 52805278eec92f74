//! Condition evaluation
//!
//! [`Engine::evaluate_condition`] returns `Ok(Some(bool))` for a decided
//! condition, `Ok(None)` when the condition is inapplicable to the event
//! (callers treat this as falsy), and `Err` only when a callable or custom
//! handler fails.
//!
//! The two engine-evaluated variants disagree on missing data: a value test
//! whose attribute does not resolve is `false`, while an attribute test with
//! any unresolvable path is inapplicable (`None`). The asymmetry is
//! load-bearing for callers that distinguish the two.

use super::Engine;
use crate::error::{Result, RuntimeError};
use crate::resolver::resolve_path;
use accolade_core::model::{AttributeTest, Condition, ConditionTest, ValueTest};
use accolade_core::Value;

impl Engine {
    /// Evaluate a single condition against an event payload.
    pub fn evaluate_condition(&self, condition: &Condition, event: &Value) -> Result<Option<bool>> {
        match &condition.test {
            ConditionTest::Value(test) => {
                if condition.is_custom() {
                    return Ok(Some(false));
                }
                self.evaluate_value_test(test, event).map(Some)
            }
            ConditionTest::Attribute(test) => {
                if condition.is_custom() {
                    return Ok(Some(false));
                }
                self.evaluate_attribute_test(test, event)
            }
            ConditionTest::Custom(test) => {
                self.handlers().dispatch(&test.handler, event).map(Some)
            }
        }
    }

    fn evaluate_value_test(&self, test: &ValueTest, event: &Value) -> Result<bool> {
        let data = match resolve_path(event, &test.attribute_path()) {
            Some(values) => values,
            None => {
                tracing::debug!(
                    attribute = %test.attribute,
                    "attribute did not resolve, condition fails"
                );
                return Ok(false);
            }
        };

        let method = self.registry().resolve_method(&test.method)?;
        let qualifier = match &test.qualifier {
            Some(name) => Some(self.registry().resolve_qualifier(name)?),
            None => None,
        };

        let mut passed = Vec::with_capacity(data.len());
        for value in data {
            let value = match qualifier {
                Some(qualify) => qualify(&value)?,
                None => value,
            };
            passed.push((method.func)(&[value, test.value.clone()])?);
        }

        match &test.quantifier {
            Some(name) => {
                let quantify = self.registry().resolve_quantifier(name)?;
                Ok(quantify(&passed))
            }
            None => Ok(aggregate_default(&passed)),
        }
    }

    fn evaluate_attribute_test(&self, test: &AttributeTest, event: &Value) -> Result<Option<bool>> {
        let mut resolved = Vec::with_capacity(test.attributes.len());
        for (index, attribute) in test.attributes.iter().enumerate() {
            let data = match resolve_path(event, attribute) {
                Some(values) => values,
                None => {
                    tracing::debug!(
                        path = ?attribute,
                        "attribute did not resolve, condition is inapplicable"
                    );
                    return Ok(None);
                }
            };
            let mut value = collapse(data);
            if let Some(name) = test.qualifier_for(index) {
                let qualify = self.registry().resolve_qualifier(name)?;
                value = qualify(&value)?;
            }
            resolved.push(value);
        }

        let method = self.registry().resolve_method(&test.method)?;
        if let Some(expected) = method.arity {
            if resolved.len() != expected {
                return Err(RuntimeError::ArityMismatch {
                    name: test.method.clone(),
                    expected,
                    got: resolved.len(),
                });
            }
        }
        (method.func)(&resolved).map(Some)
    }
}

/// Default aggregation when no quantifier is configured: logical AND over
/// every per-value result. An empty collection is vacuously true.
pub(crate) fn aggregate_default(passed: &[bool]) -> bool {
    passed.iter().all(|p| *p)
}

/// Collapse a fanned-out resolution: a single value stands alone, several
/// become an array.
fn collapse(mut values: Vec<Value>) -> Value {
    if values.len() == 1 {
        values.remove(0)
    } else {
        Value::Array(values)
    }
}
