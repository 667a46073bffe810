//! Dynamic value representation for pbxproj trees.
//!
//! This module provides the [`Value`] enum which represents anything that can
//! appear on the right-hand side of a `key = value;` line, plus the two
//! classifiers the writer branches on:
//!
//! - [`Shape`]: scalar, record or sequence, computed once per value
//! - [`RecordKind`]: build-file, file-reference or any other record, resolved
//!   from the `isa` field of an object
//!
//! ## Creating Values
//!
//! ```rust
//! use serde_pbxproj::{pbx, Value};
//!
//! let scalar = Value::from("PBXGroup");
//! let number = Value::from(46);
//! let reference = Value::annotated("1D6058910D05DD3D006BFB54", "App.app");
//!
//! let record = pbx!({
//!     "isa": "PBXGroup",
//!     "children": [],
//!     "sourceTree": "\"<group>\""
//! });
//! assert!(record.is_object());
//! ```
//!
//! Strings are written verbatim. Quoting is the caller's responsibility;
//! [`quote`] implements Xcode's rules for when it is needed.

use crate::{PbxMap, COMMENT_SUFFIX};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;

/// A dynamically-typed pbxproj value.
///
/// # Examples
///
/// ```rust
/// use serde_pbxproj::{Number, Value};
///
/// let null = Value::Null;
/// let num = Value::Number(Number::Integer(46));
/// let text = Value::String("PBXProject".to_string());
///
/// assert!(null.is_null());
/// assert!(num.is_number());
/// assert!(text.is_string());
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Value>),
    Object(PbxMap),
    /// A sequence entry carrying its own comment, written `value /* comment */,`.
    Annotated { value: Box<Value>, comment: String },
}

/// A numeric scalar.
#[derive(Clone, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(i) => Some(*i),
            Number::Float(f) => {
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                    Some(*f as i64)
                } else {
                    None
                }
            }
        }
    }

    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Float(f) => *f,
        }
    }

    fn is_zero(&self) -> bool {
        match self {
            Number::Integer(i) => *i == 0,
            Number::Float(f) => *f == 0.0 || f.is_nan(),
        }
    }
}

/// Floats print the way JavaScript stringifies numbers, which is what
/// existing pbxproj tooling writes: `Infinity`, `NaN`, `0` for negative zero,
/// and exponent notation (`1e+21`, `1.5e-7`) outside `[1e-6, 1e21)`.
impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(fl) => write_float(*fl, f),
        }
    }
}

fn write_float(value: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if value.is_nan() {
        return f.write_str("NaN");
    }
    if value.is_infinite() {
        return f.write_str(if value > 0.0 { "Infinity" } else { "-Infinity" });
    }
    if value == 0.0 {
        return f.write_str("0");
    }

    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return write!(f, "{}", value);
    }
    let text = format!("{:e}", value);
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            write!(f, "{}e+{}", mantissa, exponent)
        }
        _ => f.write_str(&text),
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::Integer(value as i64)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Integer(value)
    }
}

impl From<u32> for Number {
    fn from(value: u32) -> Self {
        Number::Integer(value as i64)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

/// The structural shape of a value, as the writer sees it.
///
/// Annotated pairs and null count as scalars.
#[derive(Clone, Copy, Debug)]
pub enum Shape<'a> {
    Scalar(&'a Value),
    Record(&'a PbxMap),
    Sequence(&'a [Value]),
}

/// Formatting class of an object inside an `objects` section, taken from its
/// `isa` field.
///
/// Build files and file references are written on a single line; everything
/// else gets a multi-line block.
#[derive(Clone, Copy, Debug)]
pub enum RecordKind<'a> {
    BuildFile(&'a PbxMap),
    FileReference(&'a PbxMap),
    Other(&'a PbxMap),
}

impl<'a> RecordKind<'a> {
    /// Classifies a record by its `isa` tag. Records without a string tag fall
    /// back to [`RecordKind::Other`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_pbxproj::{pbx, RecordKind};
    ///
    /// let file = pbx!({ "isa": "PBXFileReference", "path": "main.m" });
    /// let kind = RecordKind::of(file.as_object().unwrap());
    /// assert!(kind.is_inline());
    /// ```
    #[must_use]
    pub fn of(record: &'a PbxMap) -> Self {
        match record.get("isa").and_then(Value::as_str) {
            Some("PBXBuildFile") => RecordKind::BuildFile(record),
            Some("PBXFileReference") => RecordKind::FileReference(record),
            _ => RecordKind::Other(record),
        }
    }

    #[must_use]
    pub const fn is_inline(&self) -> bool {
        matches!(self, RecordKind::BuildFile(_) | RecordKind::FileReference(_))
    }
}

impl Value {
    /// Creates a sequence entry with an inline comment.
    pub fn annotated(value: impl Into<Value>, comment: impl Into<String>) -> Self {
        Value::Annotated {
            value: Box::new(value.into()),
            comment: comment.into(),
        }
    }

    /// Classifies this value for the writer.
    #[must_use]
    pub fn shape(&self) -> Shape<'_> {
        match self {
            Value::Array(items) => Shape::Sequence(items),
            Value::Object(map) => Shape::Record(map),
            _ => Shape::Scalar(self),
        }
    }

    /// Short human-readable name of the variant, used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "sequence",
            Value::Object(_) => "record",
            Value::Annotated { .. } => "annotated pair",
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Returns `true` for null, booleans, numbers and strings.
    #[inline]
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(
            self,
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_)
        )
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&PbxMap> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// JavaScript-style truthiness, which decides whether a `{value, comment}`
    /// pair is written as an annotated reference.
    fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => !n.is_zero(),
            Value::String(s) => !s.is_empty(),
            _ => true,
        }
    }

    /// Text of a scalar used as a legacy `_comment` value.
    pub(crate) fn comment_text(&self) -> Option<String> {
        match self {
            Value::Null => None,
            other if other.is_scalar() => Some(other.to_string()),
            _ => None,
        }
    }

    /// Rewrites `{value, comment}` objects into [`Value::Annotated`] entries,
    /// the way sequences coming from JSON or serde spell references.
    #[doc(hidden)]
    pub fn sequence(items: Vec<Value>) -> Value {
        Value::Array(items.into_iter().map(Value::into_sequence_entry).collect())
    }

    fn into_sequence_entry(self) -> Value {
        let Value::Object(map) = self else {
            return self;
        };
        let pair = sequence_annotation(&map).map(|(value, comment)| (value.clone(), comment.to_string()));
        match pair {
            Some((value, comment)) => Value::annotated(value, comment),
            None => Value::Object(map),
        }
    }
}

/// Splits a sequence entry record of the form `{ value, comment }` with both
/// fields set into its parts.
pub(crate) fn sequence_annotation(record: &PbxMap) -> Option<(&Value, &Value)> {
    match (record.get("value"), record.get("comment")) {
        (Some(value), Some(comment))
            if value.is_truthy() && comment.is_truthy() && comment.is_scalar() =>
        {
            Some((value, comment))
        }
        _ => None,
    }
}

/// Single-line rendering.
///
/// Scalars print exactly as the writer emits them. Sequences and records
/// print in the compact inline spelling (`(a, b, )`, `{k = v; }`), which the
/// writer only falls back to for shapes it has no dedicated layout for.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => f.write_str(s),
            Value::Annotated { value, comment } => write!(f, "{} /* {} */", value, comment),
            Value::Array(items) => {
                f.write_str("(")?;
                for item in items {
                    write!(f, "{}, ", item)?;
                }
                f.write_str(")")
            }
            Value::Object(map) => {
                f.write_str("{")?;
                for (key, field) in map {
                    if key.ends_with(COMMENT_SUFFIX) {
                        continue;
                    }
                    match map.comment(key) {
                        Some(comment) => write!(f, "{} = {} /* {} */; ", key, field.value, comment)?,
                        None => write!(f, "{} = {}; ", key, field.value)?,
                    }
                }
                f.write_str("}")
            }
        }
    }
}

/// Quotes a string for the NeXTSTEP property list syntax if it needs it.
///
/// Strings made only of ASCII alphanumerics and `_$./` are left bare; anything
/// else (including the empty string) is wrapped in double quotes with `"` and
/// `\` escaped.
///
/// # Examples
///
/// ```rust
/// use serde_pbxproj::quote;
///
/// assert_eq!(quote("main.m"), "main.m");
/// assert_eq!(quote("<group>"), "\"<group>\"");
/// assert_eq!(quote("My App"), "\"My App\"");
/// assert_eq!(quote(""), "\"\"");
/// ```
#[must_use]
pub fn quote(s: &str) -> Cow<'_, str> {
    let bare = !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '.' | '/'));
    if bare {
        return Cow::Borrowed(s);
    }

    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for ch in s.chars() {
        match ch {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            _ => quoted.push(ch),
        }
    }
    quoted.push('"');
    Cow::Owned(quoted)
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(Number::Integer(i)) => serializer.serialize_i64(*i),
            Value::Number(Number::Float(f)) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(map) => map.serialize(serializer),
            Value::Annotated { value, comment } => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("value", value)?;
                map.serialize_entry("comment", comment)?;
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any pbxproj value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(Value::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(Value::Number(Number::Integer(value)))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                if value <= i64::MAX as u64 {
                    Ok(Value::Number(Number::Integer(value as i64)))
                } else {
                    Ok(Value::Number(Number::Float(value as f64)))
                }
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(Value::Number(Number::Float(value)))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Value::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(Value::String(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(Value::Null)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(Value::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut items = Vec::new();
                while let Some(item) = seq.next_element()? {
                    items.push(item);
                }
                Ok(Value::sequence(items))
            }

            fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                crate::map::visit_legacy_map(map).map(Value::Object)
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(Number::Integer(value as i64))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(Number::Integer(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Number(Number::Integer(value as i64))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(Number::Float(value))
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Value::Number(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<PbxMap> for Value {
    fn from(value: PbxMap) -> Self {
        Value::Object(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
