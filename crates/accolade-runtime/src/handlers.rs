//! Custom condition handlers
//!
//! Custom conditions dispatch to externally-registered handlers by name.
//! The engine defines only the dispatch contract: a handler takes the event
//! payload and reports whether the condition is satisfied. A handler failure
//! is surfaced as an error, distinct from the handler answering "not
//! satisfied".

use crate::error::{Result, RuntimeError};
use accolade_core::Value;
use std::collections::HashMap;

type Handler = Box<dyn Fn(&Value) -> anyhow::Result<bool> + Send + Sync>;

/// Registry of externally-supplied custom condition handlers
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Handler>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register a handler. An existing handler under the same name is
    /// replaced.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        handler: impl Fn(&Value) -> anyhow::Result<bool> + Send + Sync + 'static,
    ) {
        self.handlers.insert(name.into(), Box::new(handler));
    }

    /// Whether a handler is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Invoke the handler registered under `name` with the event payload.
    pub fn dispatch(&self, name: &str, event: &Value) -> Result<bool> {
        let handler = self
            .handlers
            .get(name)
            .ok_or_else(|| RuntimeError::UnknownHandler(name.to_string()))?;
        handler(event).map_err(|source| RuntimeError::HandlerFailed {
            name: name.to_string(),
            source,
        })
    }
}
