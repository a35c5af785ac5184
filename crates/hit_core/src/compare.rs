//! The comparison engine behind every assertion.
//!
//! All operations take [`Value`]s, coerce where the shapes differ and report
//! failures as [`CompareError`] values carrying role-labelled text. Whether a
//! failure aborts anything is up to the caller.

use crate::convert::{convert, convert_to_kind, ConvertError};
use crate::value::{Kind, Value};
use difference::{Changeset, Difference};
use thiserror::Error;

/// An unmet comparison.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompareError {
    /// Values differ after coercion.
    #[error("Not equal\nexpected: {expected}\nactual: {actual}{}", render_diff(.diff))]
    NotEqual {
        expected: Value,
        actual: Value,
        /// Line diff, present when either side is composite.
        diff: Option<String>,
    },

    /// Values are equal although they should differ.
    #[error("should not be {value}")]
    Equal { value: Value },

    #[error("{haystack} does not contain {needle}")]
    NotContained { haystack: Value, needle: Value },

    #[error("{haystack} should not contain {needle}")]
    Contained { haystack: Value, needle: Value },

    #[error("{value} should have {expected} item(s), but has {actual} item(s)")]
    Length {
        value: Value,
        expected: usize,
        actual: usize,
    },

    #[error("{value} should be empty, but has {len} item(s)")]
    NotEmpty { value: Value, len: usize },

    #[error("{value} should not be empty")]
    Empty { value: Value },

    /// Length was requested for a shape that has none.
    #[error("called Len() on {value}")]
    NotMeasurable { value: Value },

    /// Operands could not be reconciled.
    #[error(transparent)]
    Conversion(#[from] ConvertError),
}

impl CompareError {
    /// Returns true if the failure stems from coercion rather than a mismatch.
    pub fn is_conversion(&self) -> bool {
        matches!(self, CompareError::Conversion(_))
    }
}

fn render_diff(diff: &Option<String>) -> String {
    match diff {
        Some(diff) => format!("\ndiff:\n{diff}"),
        None => String::new(),
    }
}

/// Checks that `actual`, coerced into the shape of `expected`, equals it.
///
/// # Examples
///
/// ```
/// use hit_core::{compare, Value};
///
/// assert!(compare::equal(&Value::from(3), &Value::from("3")).is_ok());
/// assert!(compare::equal(&Value::from(3), &Value::from("three")).unwrap_err().is_conversion());
/// ```
pub fn equal(expected: &Value, actual: &Value) -> Result<(), CompareError> {
    let converted = convert(actual, expected)?;
    if deep_equal(expected, &converted) {
        return Ok(());
    }
    Err(CompareError::NotEqual {
        diff: diff(expected, &converted),
        expected: expected.clone(),
        actual: converted,
    })
}

/// Checks that `actual`, coerced into the shape of `expected`, differs from it.
pub fn not_equal(expected: &Value, actual: &Value) -> Result<(), CompareError> {
    let converted = convert(actual, expected)?;
    if deep_equal(expected, &converted) {
        return Err(CompareError::Equal {
            value: expected.clone(),
        });
    }
    Ok(())
}

/// Containment over the haystack's shape.
///
/// Strings are searched for the needle as text, lists for an equal element,
/// maps for an equal key and records for an equal field name. Any other
/// shape contains nothing, except that `null` contains `null`.
pub fn contains(haystack: &Value, needle: &Value) -> bool {
    match (haystack, needle) {
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        (Value::String(s), needle) => match convert_to_kind(needle, Kind::String) {
            Ok(Value::String(term)) => s.contains(term.as_str()),
            _ => false,
        },
        (Value::List(items), needle) => items
            .iter()
            .any(|item| matches!(convert(needle, item), Ok(n) if deep_equal(item, &n))),
        (Value::Map(map), needle) => name_matches(needle, map.keys().map(String::as_str)),
        (Value::Record(record), needle) => {
            name_matches(needle, record.fields.iter().map(|(name, _)| name.as_str()))
        }
        _ => false,
    }
}

fn name_matches<'a>(needle: &Value, mut names: impl Iterator<Item = &'a str>) -> bool {
    match convert_to_kind(needle, Kind::String) {
        Ok(Value::String(term)) => names.any(|name| name == term),
        _ => false,
    }
}

/// Like [`contains`], reporting a diagnostic when the needle is missing.
pub fn check_contains(haystack: &Value, needle: &Value) -> Result<(), CompareError> {
    if contains(haystack, needle) {
        return Ok(());
    }
    Err(CompareError::NotContained {
        haystack: haystack.clone(),
        needle: needle.clone(),
    })
}

/// Fails when the haystack contains the needle.
pub fn check_not_contains(haystack: &Value, needle: &Value) -> Result<(), CompareError> {
    if !contains(haystack, needle) {
        return Ok(());
    }
    Err(CompareError::Contained {
        haystack: haystack.clone(),
        needle: needle.clone(),
    })
}

/// Returns true if `value` is found among `candidates`.
pub fn one_of(candidates: &[Value], value: &Value) -> bool {
    contains(&Value::List(candidates.to_vec()), value)
}

/// Like [`one_of`], reporting a diagnostic when no candidate matches.
pub fn check_one_of(candidates: &[Value], value: &Value) -> Result<(), CompareError> {
    check_contains(&Value::List(candidates.to_vec()), value)
}

/// Fails when `value` is found among `candidates`.
pub fn check_not_one_of(candidates: &[Value], value: &Value) -> Result<(), CompareError> {
    check_not_contains(&Value::List(candidates.to_vec()), value)
}

/// Number of characters, elements or entries.
pub fn length(value: &Value) -> Result<usize, CompareError> {
    match value {
        Value::String(s) => Ok(s.chars().count()),
        Value::List(items) => Ok(items.len()),
        Value::Map(map) => Ok(map.len()),
        _ => Err(CompareError::NotMeasurable {
            value: value.clone(),
        }),
    }
}

/// Checks that `value` has exactly `expected` items.
pub fn len(value: &Value, expected: usize) -> Result<(), CompareError> {
    let actual = length(value)?;
    if actual == expected {
        return Ok(());
    }
    Err(CompareError::Length {
        value: value.clone(),
        expected,
        actual,
    })
}

/// Checks that `value` has no items.
pub fn empty(value: &Value) -> Result<(), CompareError> {
    match length(value)? {
        0 => Ok(()),
        len => Err(CompareError::NotEmpty {
            value: value.clone(),
            len,
        }),
    }
}

/// Checks that `value` has at least one item.
pub fn not_empty(value: &Value) -> Result<(), CompareError> {
    match length(value)? {
        0 => Err(CompareError::Empty {
            value: value.clone(),
        }),
        _ => Ok(()),
    }
}

/// Structural equality. Integers and floats compare numerically, map and
/// record entries regardless of order.
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Int(x), Value::Float(y)) | (Value::Float(y), Value::Int(x)) => *x as f64 == *y,
        (Value::List(xs), Value::List(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| deep_equal(x, y))
        }
        (Value::Map(xs), Value::Map(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(key, x)| ys.get(key).is_some_and(|y| deep_equal(x, y)))
        }
        (Value::Record(x), Value::Record(y)) => {
            x.name == y.name
                && x.fields.len() == y.fields.len()
                && x.fields
                    .iter()
                    .all(|(key, xv)| y.field(key).is_some_and(|yv| deep_equal(xv, yv)))
        }
        _ => a == b,
    }
}

fn diff(expected: &Value, actual: &Value) -> Option<String> {
    if !expected.kind().is_composite() && !actual.kind().is_composite() {
        return None;
    }
    let changeset = Changeset::new(&expected.render_pretty(), &actual.render_pretty(), "\n");
    let mut lines = Vec::new();
    for change in &changeset.diffs {
        let (marker, text) = match change {
            Difference::Same(text) => (' ', text),
            Difference::Rem(text) => ('-', text),
            Difference::Add(text) => ('+', text),
        };
        lines.extend(text.lines().map(|line| format!("{marker} {line}")));
    }
    Some(lines.join("\n"))
}
