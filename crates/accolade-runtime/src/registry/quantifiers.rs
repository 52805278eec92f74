//! Quantifier namespace
//!
//! Quantifiers aggregate the per-value booleans a value condition produces
//! across a fanned-out resolution. The namespace is caller-extensible via
//! [`CallableRegistry::register_quantifier`](super::CallableRegistry::register_quantifier).

use super::QuantifierFn;
use std::collections::HashMap;

pub(super) fn builtin() -> HashMap<String, QuantifierFn> {
    let mut entries: HashMap<String, QuantifierFn> = HashMap::new();
    entries.insert(
        "any".to_string(),
        Box::new(|passed: &[bool]| passed.iter().any(|p| *p)),
    );
    entries.insert(
        "all".to_string(),
        Box::new(|passed: &[bool]| passed.iter().all(|p| *p)),
    );
    entries.insert(
        "none".to_string(),
        Box::new(|passed: &[bool]| !passed.iter().any(|p| *p)),
    );
    entries
}
