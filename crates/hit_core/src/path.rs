//! Structural identity of steps.
//!
//! Every builder call appends a named segment with the arguments it received,
//! so `expect().header("X-Header").len(5)` produces the path
//! `expect().header("X-Header").len(5)`. Clear chains build the same shape and
//! match against it instead of holding references to earlier steps.

use crate::compare;
use crate::value::Value;
use std::fmt;

/// One call in a builder chain.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    name: String,
    arguments: Vec<Value>,
}

impl Segment {
    /// The called method's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Arguments passed to the call, possibly none.
    pub fn arguments(&self) -> &[Value] {
        &self.arguments
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, argument) in self.arguments.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{argument}")?;
        }
        f.write_str(")")
    }
}

/// An immutable sequence of [`Segment`]s.
///
/// `push` returns a new path and leaves the receiver untouched, so a chain
/// stage can hand out any number of children.
///
/// # Examples
///
/// ```
/// use hit_core::{Path, Value};
///
/// let header = Path::new().push("expect", vec![]).push("header", vec![Value::from("X")]);
/// let len = header.push("len", vec![Value::from(5)]);
///
/// assert_eq!(header.len(), 2);
/// assert_eq!(len.to_string(), r#"expect().header("X").len(5)"#);
/// assert!(len.has_prefix(&header));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// Creates an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new path extended by one segment.
    pub fn push(&self, name: impl Into<String>, arguments: Vec<Value>) -> Path {
        let mut segments = self.segments.clone();
        segments.push(Segment {
            name: name.into(),
            arguments,
        });
        Path { segments }
    }

    /// Returns the path without its first `n` segments.
    pub fn skip(&self, n: usize) -> Path {
        Path {
            segments: self.segments.iter().skip(n).cloned().collect(),
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Path equality: same length, same names, and at every position the
    /// arguments are either missing on one side or equal after coercion.
    pub fn equals(&self, other: &Path) -> bool {
        self.len() == other.len()
            && self.segments.iter().zip(&other.segments).all(|(a, b)| {
                a.name == b.name
                    && (a.arguments.is_empty()
                        || b.arguments.is_empty()
                        || arguments_equal(&a.arguments, &b.arguments))
            })
    }

    /// Returns true if the names of `prefix` are a leading run of this
    /// path's names. Arguments are ignored.
    pub fn has_prefix(&self, prefix: &Path) -> bool {
        prefix.len() <= self.len()
            && prefix
                .segments
                .iter()
                .zip(&self.segments)
                .all(|(p, s)| p.name == s.name)
    }

    /// Decides whether this clear pattern addresses `target`.
    ///
    /// The pattern's names must prefix the target's names. A pattern segment
    /// without arguments matches any arguments; a pattern segment with
    /// arguments matches when they equal the leading arguments of the
    /// target segment.
    pub fn clears(&self, target: &Path) -> bool {
        target.has_prefix(self)
            && self.segments.iter().zip(&target.segments).all(|(p, t)| {
                p.arguments.is_empty() || leading_arguments_equal(&p.arguments, &t.arguments)
            })
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

fn arguments_equal(a: &[Value], b: &[Value]) -> bool {
    a.len() == b.len() && leading_arguments_equal(a, b)
}

fn leading_arguments_equal(pattern: &[Value], arguments: &[Value]) -> bool {
    pattern.len() <= arguments.len()
        && pattern
            .iter()
            .zip(arguments)
            .all(|(p, a)| compare::equal(p, a).is_ok())
}

/// Arguments of a builder call that accepts "any number of values".
///
/// `()` stands for "no arguments"; single values and tuples of up to three
/// values are accepted directly.
pub trait IntoArgs {
    fn into_args(self) -> Vec<Value>;
}

impl IntoArgs for () {
    fn into_args(self) -> Vec<Value> {
        Vec::new()
    }
}

impl IntoArgs for Vec<Value> {
    fn into_args(self) -> Vec<Value> {
        self
    }
}

macro_rules! impl_into_args {
    ($($ty:ty),*) => {
        $(
            impl IntoArgs for $ty {
                fn into_args(self) -> Vec<Value> {
                    vec![Value::from(self)]
                }
            }
        )*
    };
}

impl_into_args!(
    Value,
    &str,
    String,
    &String,
    bool,
    i32,
    i64,
    u16,
    u32,
    u64,
    usize,
    f64,
    serde_json::Value
);

impl<A: Into<Value>> IntoArgs for (A,) {
    fn into_args(self) -> Vec<Value> {
        vec![self.0.into()]
    }
}

impl<A: Into<Value>, B: Into<Value>> IntoArgs for (A, B) {
    fn into_args(self) -> Vec<Value> {
        vec![self.0.into(), self.1.into()]
    }
}

impl<A: Into<Value>, B: Into<Value>, C: Into<Value>> IntoArgs for (A, B, C) {
    fn into_args(self) -> Vec<Value> {
        vec![self.0.into(), self.1.into(), self.2.into()]
    }
}
