//! Built-in qualifier namespace
//!
//! Qualifiers transform a single resolved value before a method sees it.

use super::{QualifierFn, QualifierNamespace};
use crate::error::{Result, RuntimeError};
use accolade_core::Value;
use std::collections::HashMap;

pub(super) fn strings() -> QualifierNamespace {
    let table: [(&'static str, QualifierFn); 4] = [
        ("lowercase", lowercase),
        ("uppercase", uppercase),
        ("trim", trim),
        ("length", length),
    ];
    let mut entries = HashMap::new();
    for (name, func) in table {
        entries.insert(name, func);
    }
    QualifierNamespace {
        name: "strings",
        entries,
    }
}

fn lowercase(value: &Value) -> Result<Value> {
    match value {
        Value::String(s) => Ok(Value::String(s.to_lowercase())),
        other => Err(RuntimeError::InvalidOperation(format!(
            "Cannot lowercase {:?}",
            other
        ))),
    }
}

fn uppercase(value: &Value) -> Result<Value> {
    match value {
        Value::String(s) => Ok(Value::String(s.to_uppercase())),
        other => Err(RuntimeError::InvalidOperation(format!(
            "Cannot uppercase {:?}",
            other
        ))),
    }
}

fn trim(value: &Value) -> Result<Value> {
    match value {
        Value::String(s) => Ok(Value::String(s.trim().to_string())),
        other => Err(RuntimeError::InvalidOperation(format!(
            "Cannot trim {:?}",
            other
        ))),
    }
}

fn length(value: &Value) -> Result<Value> {
    match value {
        Value::String(s) => Ok(Value::Number(s.chars().count() as f64)),
        Value::Array(items) => Ok(Value::Number(items.len() as f64)),
        other => Err(RuntimeError::InvalidOperation(format!(
            "Cannot take the length of {:?}",
            other
        ))),
    }
}
