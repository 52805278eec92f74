//! Evaluation engine
//!
//! Evaluates conditions against event payloads and folds the per-condition
//! results into achievement unlock decisions.

mod conditions;
mod unlock;

pub use unlock::UnlockOutcome;

use crate::handlers::HandlerRegistry;
use crate::registry::CallableRegistry;

/// Achievement evaluation engine
///
/// Holds the callable registry and the custom handler registry. Both are
/// read-only once the engine is built, so a shared engine can evaluate
/// events from any number of threads.
pub struct Engine {
    registry: CallableRegistry,
    handlers: HandlerRegistry,
}

impl Engine {
    pub fn new(registry: CallableRegistry, handlers: HandlerRegistry) -> Self {
        Self { registry, handlers }
    }

    pub fn registry(&self) -> &CallableRegistry {
        &self.registry
    }

    pub fn handlers(&self) -> &HandlerRegistry {
        &self.handlers
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(CallableRegistry::new(), HandlerRegistry::new())
    }
}
