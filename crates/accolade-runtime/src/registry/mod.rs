//! Callable registry
//!
//! Resolves named methods, qualifiers and quantifiers against a fixed
//! allow-list of namespaces, searched in order with first match winning.
//! Unresolvable names are configuration errors, surfaced when a catalog is
//! validated, never during event evaluation. Lookups are pure; the callables
//! themselves must be pure functions of their arguments.

mod methods;
mod qualifiers;
mod quantifiers;

use crate::error::{Result, RuntimeError};
use accolade_core::Value;
use std::collections::HashMap;
use std::fmt;

/// The kind of callable a name resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallableKind {
    Method,
    Qualifier,
    Quantifier,
}

impl fmt::Display for CallableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CallableKind::Method => "method",
            CallableKind::Qualifier => "qualifier",
            CallableKind::Quantifier => "quantifier",
        };
        write!(f, "{}", name)
    }
}

/// A method compares or combines resolved values
pub type MethodFn = fn(&[Value]) -> Result<bool>;

/// A qualifier transforms a single resolved value before comparison
pub type QualifierFn = fn(&Value) -> Result<Value>;

/// A quantifier aggregates a collection of per-value booleans
pub type QuantifierFn = Box<dyn Fn(&[bool]) -> bool + Send + Sync>;

/// A registered method together with its declared arity
#[derive(Clone, Copy)]
#[derive(Debug)]
pub struct MethodEntry {
    pub func: MethodFn,
    /// Expected argument count; `None` accepts any arity
    pub arity: Option<usize>,
}

/// An ordered, named namespace of methods
pub(crate) struct MethodNamespace {
    pub(crate) name: &'static str,
    pub(crate) entries: HashMap<&'static str, MethodEntry>,
}

/// An ordered, named namespace of qualifiers
pub(crate) struct QualifierNamespace {
    pub(crate) name: &'static str,
    pub(crate) entries: HashMap<&'static str, QualifierFn>,
}

/// A resolved callable
pub enum Callable<'a> {
    Method(MethodEntry),
    Qualifier(QualifierFn),
    Quantifier(&'a QuantifierFn),
}

/// Registry of named callables, fixed at configuration time
///
/// Method names search the comparison namespace then the string namespace;
/// qualifier names search only the string namespace; quantifier names search
/// a caller-extensible namespace seeded with `any`, `all` and `none`.
pub struct CallableRegistry {
    methods: Vec<MethodNamespace>,
    qualifiers: Vec<QualifierNamespace>,
    quantifiers: HashMap<String, QuantifierFn>,
}

impl CallableRegistry {
    /// Registry with the built-in allow-list
    pub fn new() -> Self {
        Self {
            methods: vec![methods::comparison(), methods::strings()],
            qualifiers: vec![qualifiers::strings()],
            quantifiers: quantifiers::builtin(),
        }
    }

    /// Resolve a name for the given kind.
    pub fn resolve(&self, kind: CallableKind, name: &str) -> Result<Callable<'_>> {
        match kind {
            CallableKind::Method => self.resolve_method(name).map(Callable::Method),
            CallableKind::Qualifier => self.resolve_qualifier(name).map(Callable::Qualifier),
            CallableKind::Quantifier => self.resolve_quantifier(name).map(Callable::Quantifier),
        }
    }

    pub fn resolve_method(&self, name: &str) -> Result<MethodEntry> {
        for namespace in &self.methods {
            if let Some(entry) = namespace.entries.get(name) {
                tracing::trace!(namespace = namespace.name, name, "resolved method");
                return Ok(*entry);
            }
        }
        Err(RuntimeError::UnknownCallable {
            kind: CallableKind::Method,
            name: name.to_string(),
        })
    }

    pub fn resolve_qualifier(&self, name: &str) -> Result<QualifierFn> {
        for namespace in &self.qualifiers {
            if let Some(qualify) = namespace.entries.get(name) {
                tracing::trace!(namespace = namespace.name, name, "resolved qualifier");
                return Ok(*qualify);
            }
        }
        Err(RuntimeError::UnknownCallable {
            kind: CallableKind::Qualifier,
            name: name.to_string(),
        })
    }

    pub fn resolve_quantifier(&self, name: &str) -> Result<&QuantifierFn> {
        self.quantifiers
            .get(name)
            .ok_or_else(|| RuntimeError::UnknownCallable {
                kind: CallableKind::Quantifier,
                name: name.to_string(),
            })
    }

    /// Register a caller-supplied quantifier. An existing quantifier under
    /// the same name is replaced.
    pub fn register_quantifier(
        &mut self,
        name: impl Into<String>,
        quantify: impl Fn(&[bool]) -> bool + Send + Sync + 'static,
    ) {
        self.quantifiers.insert(name.into(), Box::new(quantify));
    }

    /// Whether `name` resolves for `kind`; used by catalog validation.
    pub fn contains(&self, kind: CallableKind, name: &str) -> bool {
        self.resolve(kind, name).is_ok()
    }
}

impl Default for CallableRegistry {
    fn default() -> Self {
        Self::new()
    }
}
