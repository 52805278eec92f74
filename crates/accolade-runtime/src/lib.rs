//! Accolade Runtime - evaluation engine for achievement unlocking
//!
//! This crate takes achievements and conditions authored in a catalog and
//! decides, event by event, whether they unlock:
//! - a callable registry resolving named methods, qualifiers and quantifiers
//!   against a fixed allow-list of namespaces
//! - a nested path resolver that fans out over arrays in event payloads
//! - condition evaluation for value, attribute and custom conditions
//! - an unlock evaluator folding per-condition results with the
//!   achievement's grouping operator
//! - a progress ledger tracking satisfied conditions per user

pub mod catalog;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod progress;
pub mod registry;
pub mod resolver;

// Re-export main types
pub use catalog::{AchievementDef, Catalog, CatalogFile};
pub use engine::{Engine, UnlockOutcome};
pub use error::{ConfigError, Result, RuntimeError};
pub use handlers::HandlerRegistry;
pub use progress::ProgressLedger;
pub use registry::{Callable, CallableKind, CallableRegistry};
pub use resolver::resolve_path;
