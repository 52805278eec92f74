//! Built-in method namespaces
//!
//! Methods are pure functions over resolved event values. Null operands
//! compare false so conditions degrade gracefully when a payload carries
//! nulls instead of the expected field.

use super::{MethodEntry, MethodFn, MethodNamespace};
use crate::error::{Result, RuntimeError};
use accolade_core::Value;
use std::cmp::Ordering;
use std::collections::HashMap;

pub(super) fn comparison() -> MethodNamespace {
    let table: [(&'static str, MethodFn); 6] = [
        ("eq", eq),
        ("ne", ne),
        ("gt", gt),
        ("ge", ge),
        ("lt", lt),
        ("le", le),
    ];
    namespace("comparison", &table)
}

pub(super) fn strings() -> MethodNamespace {
    let table: [(&'static str, MethodFn); 4] = [
        ("contains", contains),
        ("starts_with", starts_with),
        ("ends_with", ends_with),
        ("matches", matches_pattern),
    ];
    namespace("strings", &table)
}

fn namespace(name: &'static str, table: &[(&'static str, MethodFn)]) -> MethodNamespace {
    let mut entries = HashMap::new();
    for (method, func) in table {
        entries.insert(
            *method,
            MethodEntry {
                func: *func,
                arity: Some(2),
            },
        );
    }
    MethodNamespace { name, entries }
}

fn binary<'a>(name: &str, args: &'a [Value]) -> Result<(&'a Value, &'a Value)> {
    match args {
        [left, right] => Ok((left, right)),
        _ => Err(RuntimeError::ArityMismatch {
            name: name.to_string(),
            expected: 2,
            got: args.len(),
        }),
    }
}

fn eq(args: &[Value]) -> Result<bool> {
    let (left, right) = binary("eq", args)?;
    if left.is_null() || right.is_null() {
        tracing::debug!("Null comparison in 'eq', returning false");
        return Ok(false);
    }
    Ok(left == right)
}

fn ne(args: &[Value]) -> Result<bool> {
    let (left, right) = binary("ne", args)?;
    if left.is_null() || right.is_null() {
        tracing::debug!("Null comparison in 'ne', returning false");
        return Ok(false);
    }
    Ok(left != right)
}

fn gt(args: &[Value]) -> Result<bool> {
    ordered("gt", args, |ordering| ordering == Ordering::Greater)
}

fn ge(args: &[Value]) -> Result<bool> {
    ordered("ge", args, |ordering| ordering != Ordering::Less)
}

fn lt(args: &[Value]) -> Result<bool> {
    ordered("lt", args, |ordering| ordering == Ordering::Less)
}

fn le(args: &[Value]) -> Result<bool> {
    ordered("le", args, |ordering| ordering != Ordering::Greater)
}

fn ordered(name: &str, args: &[Value], test: fn(Ordering) -> bool) -> Result<bool> {
    let (left, right) = binary(name, args)?;
    match (left, right) {
        (Value::Null, _) | (_, Value::Null) => {
            tracing::debug!("Null comparison in '{}', returning false", name);
            Ok(false)
        }
        (Value::Number(l), Value::Number(r)) => Ok(l.partial_cmp(r).map_or(false, test)),
        (Value::String(l), Value::String(r)) => Ok(test(l.cmp(r))),
        _ => Err(RuntimeError::InvalidOperation(format!(
            "Cannot order {:?} and {:?} with '{}'",
            left, right, name
        ))),
    }
}

fn contains(args: &[Value]) -> Result<bool> {
    let (left, right) = binary("contains", args)?;
    match (left, right) {
        (Value::Null, _) | (_, Value::Null) => Ok(false),
        (Value::String(l), Value::String(r)) => Ok(l.contains(r.as_str())),
        (Value::Array(items), value) => Ok(items.iter().any(|item| item == value)),
        _ => Err(RuntimeError::InvalidOperation(format!(
            "Cannot apply 'contains' to {:?} and {:?}",
            left, right
        ))),
    }
}

fn starts_with(args: &[Value]) -> Result<bool> {
    let (left, right) = binary("starts_with", args)?;
    match (left, right) {
        (Value::Null, _) | (_, Value::Null) => Ok(false),
        (Value::String(l), Value::String(r)) => Ok(l.starts_with(r.as_str())),
        _ => Err(RuntimeError::InvalidOperation(format!(
            "Cannot apply 'starts_with' to {:?} and {:?}",
            left, right
        ))),
    }
}

fn ends_with(args: &[Value]) -> Result<bool> {
    let (left, right) = binary("ends_with", args)?;
    match (left, right) {
        (Value::Null, _) | (_, Value::Null) => Ok(false),
        (Value::String(l), Value::String(r)) => Ok(l.ends_with(r.as_str())),
        _ => Err(RuntimeError::InvalidOperation(format!(
            "Cannot apply 'ends_with' to {:?} and {:?}",
            left, right
        ))),
    }
}

fn matches_pattern(args: &[Value]) -> Result<bool> {
    let (left, right) = binary("matches", args)?;
    match (left, right) {
        (Value::Null, _) | (_, Value::Null) => Ok(false),
        (Value::String(l), Value::String(pattern)) => {
            let re = regex::Regex::new(pattern).map_err(|e| {
                RuntimeError::InvalidOperation(format!("Invalid pattern '{}': {}", pattern, e))
            })?;
            Ok(re.is_match(l))
        }
        _ => Err(RuntimeError::InvalidOperation(format!(
            "Cannot apply 'matches' to {:?} and {:?}",
            left, right
        ))),
    }
}
