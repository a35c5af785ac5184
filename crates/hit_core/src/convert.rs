//! Coercion of values into a comparable shape.
//!
//! Assertions compare user expectations against values decoded from the
//! wire, so a header `"3"` must be comparable with an expected `3`. Coercion
//! either produces a value of the requested shape or fails with a
//! [`ConvertError`]; it never guesses.

use crate::value::{Kind, Record, Value};
use std::collections::BTreeMap;
use thiserror::Error;

/// A value could not be reconciled with the requested shape.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("could not convert {value} ({from}) to {to}")]
pub struct ConvertError {
    /// The value that failed to convert.
    pub value: Value,
    /// Shape of the value.
    pub from: Kind,
    /// Requested shape.
    pub to: Kind,
}

impl ConvertError {
    fn new(value: &Value, to: Kind) -> Self {
        Self {
            value: value.clone(),
            from: value.kind(),
            to,
        }
    }
}

/// Converts `value` into the shape of `template`.
///
/// Scalars are converted to the template's kind. Composite values keep their
/// entries and convert each one against the template entry at the same
/// position (list index, map key or field name); entries without a template
/// counterpart are kept unchanged.
pub fn convert(value: &Value, template: &Value) -> Result<Value, ConvertError> {
    match template {
        Value::List(templates) => match value {
            Value::List(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| match templates.get(i) {
                    Some(tpl) => convert(item, tpl),
                    None => Ok(item.clone()),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List),
            _ => Err(ConvertError::new(value, Kind::List)),
        },
        Value::Map(templates) => {
            let entries = entries(value).ok_or_else(|| ConvertError::new(value, Kind::Map))?;
            entries
                .into_iter()
                .map(|(key, item)| {
                    let converted = match templates.get(&key) {
                        Some(tpl) => convert(item, tpl)?,
                        None => item.clone(),
                    };
                    Ok((key, converted))
                })
                .collect::<Result<BTreeMap<_, _>, _>>()
                .map(Value::Map)
        }
        Value::Record(template) => {
            let (name, entries) = match value {
                Value::Record(record) => (record.name.clone(), entries(value)),
                Value::Map(_) => (template.name.clone(), entries(value)),
                _ => (String::new(), None),
            };
            let entries = entries.ok_or_else(|| ConvertError::new(value, Kind::Record))?;
            let fields = entries
                .into_iter()
                .map(|(key, item)| {
                    let converted = match template.field(&key) {
                        Some(tpl) => convert(item, tpl)?,
                        None => item.clone(),
                    };
                    Ok((key, converted))
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::Record(Record { name, fields }))
        }
        scalar => convert_to_kind(value, scalar.kind()),
    }
}

/// Converts `value` into the given kind.
///
/// Composite kinds are only reachable from the same kind.
pub fn convert_to_kind(value: &Value, kind: Kind) -> Result<Value, ConvertError> {
    if value.kind() == kind {
        return Ok(value.clone());
    }
    let converted = match (value, kind) {
        (Value::Int(i), Kind::Float) => Some(Value::Float(*i as f64)),
        (Value::Float(f), Kind::Int) => float_to_int(*f).map(Value::Int),
        (Value::Bool(b), Kind::Int) => Some(Value::Int(i64::from(*b))),
        (Value::Bool(b), Kind::Float) => Some(Value::Float(if *b { 1.0 } else { 0.0 })),
        (Value::Int(i), Kind::Bool) => Some(Value::Bool(*i != 0)),
        (Value::Float(f), Kind::Bool) => Some(Value::Bool(*f != 0.0)),
        (Value::String(s), Kind::Int) => parse_int(s.trim()).map(Value::Int),
        (Value::String(s), Kind::Float) => s.trim().parse::<f64>().ok().map(Value::Float),
        (Value::String(s), Kind::Bool) => parse_bool(s.trim()).map(Value::Bool),
        (Value::Int(i), Kind::String) => Some(Value::String(i.to_string())),
        (Value::Float(f), Kind::String) => Some(Value::String(f.to_string())),
        (Value::Bool(b), Kind::String) => Some(Value::String(b.to_string())),
        _ => None,
    };
    converted.ok_or_else(|| ConvertError::new(value, kind))
}

/// Map-like view of a map or record, keyed by name.
fn entries(value: &Value) -> Option<Vec<(String, &Value)>> {
    match value {
        Value::Map(map) => Some(map.iter().map(|(k, v)| (k.clone(), v)).collect()),
        Value::Record(record) => Some(record.fields.iter().map(|(k, v)| (k.clone(), v)).collect()),
        _ => None,
    }
}

fn float_to_int(f: f64) -> Option<i64> {
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

fn parse_int(s: &str) -> Option<i64> {
    s.parse::<i64>()
        .ok()
        .or_else(|| s.parse::<f64>().ok().and_then(float_to_int))
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}
