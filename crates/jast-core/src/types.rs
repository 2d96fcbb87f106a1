//! The JSON value tree.
//!
//! `Value` is a closed set of variants. Numbers are split into `Int` and
//! `Double` (the decoder picks one from the numeral's spelling), objects are
//! `Vec<Field>` so that insertion order and duplicate keys survive, and
//! `Nothing` stands for "no value could be parsed".

use std::fmt;

/// A JSON document value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// No value: an invalid or empty document. Never encodable.
    #[default]
    Nothing,
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
    Array(Vec<Value>),
    /// Entries in insertion order. Duplicate names are kept as written.
    Object(Vec<Field>),
}

/// A single object entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub value: Value,
}

impl Field {
    /// Pair a name with anything convertible into a [`Value`].
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Field {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> From<(K, V)> for Field {
    fn from((name, value): (K, V)) -> Self {
        Field::new(name, value)
    }
}

/// The variant tag of a [`Value`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Nothing,
    Null,
    Bool,
    Int,
    Double,
    String,
    Array,
    Object,
}

impl Kind {
    /// Display name of the kind, e.g. `"Boolean"` for [`Kind::Bool`].
    pub fn name(self) -> &'static str {
        match self {
            Kind::Nothing => "Nothing",
            Kind::Null => "Null",
            Kind::Bool => "Boolean",
            Kind::Int => "Int",
            Kind::Double => "Double",
            Kind::String => "String",
            Kind::Array => "Array",
            Kind::Object => "Object",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    /// Build an array from anything yielding values.
    pub fn array<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Value::Array(items.into_iter().map(Into::into).collect())
    }

    /// Build an object from entries, keeping their order.
    pub fn object<I>(fields: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Field>,
    {
        Value::Object(fields.into_iter().map(Into::into).collect())
    }

    /// The variant tag of this value.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Nothing => Kind::Nothing,
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Double(_) => Kind::Double,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
        }
    }

    /// True for `Value::Nothing`.
    pub fn is_nothing(&self) -> bool {
        matches!(self, Value::Nothing)
    }

    /// True for JSON `null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The payload of a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The payload of an `Int`. A `Double` is not converted.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric payload as `f64`. `Int` widens, which may round past 2^53.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Double(n) => Some(*n),
            _ => None,
        }
    }

    /// The contents of a `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The elements of an `Array`.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// The entries of an `Object`, in order, duplicates included.
    pub fn as_fields(&self) -> Option<&[Field]> {
        match self {
            Value::Object(fields) => Some(fields),
            _ => None,
        }
    }

    /// Look up an object entry by name.
    ///
    /// When the name occurs more than once the last entry wins, the same
    /// outcome as collapsing the entries into a map.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.as_fields()?
            .iter()
            .rev()
            .find(|field| field.name == name)
            .map(|field| &field.value)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Int(n.into())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Double(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Vec<Field>> for Value {
    fn from(fields: Vec<Field>) -> Self {
        Value::Object(fields)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::Array(iter.into_iter().collect())
    }
}

impl FromIterator<Field> for Value {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        Value::Object(iter.into_iter().collect())
    }
}

/// Loose, human-oriented rendering for logs and debugging.
///
/// This is not JSON: strings are quoted but not escaped, object keys are bare
/// and `Nothing` renders as the empty string. Use [`crate::encode`] for text
/// that must parse again.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nothing => Ok(()),
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            // Debug keeps the fractional part, so 1.0 does not print as 1
            Value::Double(n) => write!(f, "{n:?}"),
            Value::String(s) => write!(f, "\"{s}\""),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Object(fields) => {
                f.write_str("{")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{field}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_and_double_are_distinct() {
        assert_ne!(Value::Int(1), Value::Double(1.0));
    }

    #[test]
    fn object_equality_is_order_sensitive() {
        let ab = Value::object([("a", 1), ("b", 2)]);
        let ba = Value::object([("b", 2), ("a", 1)]);
        assert_ne!(ab, ba);
        assert_eq!(ab, Value::object([("a", 1), ("b", 2)]));
    }

    #[test]
    fn get_prefers_last_duplicate() {
        let obj = Value::object([("k", 1), ("k", 2)]);
        assert_eq!(obj.get("k"), Some(&Value::Int(2)));
        assert_eq!(obj.get("missing"), None);
        assert_eq!(Value::Null.get("k"), None);
    }

    #[test]
    fn option_none_becomes_null() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::String("x".into()));
    }

    #[test]
    fn display_is_loose() {
        let v = Value::object([
            Field::new("a", Value::array([Value::Int(1), Value::Double(2.0)])),
            Field::new("b", "s"),
        ]);
        assert_eq!(v.to_string(), "{a: [1, 2.0], b: \"s\"}");
        assert_eq!(Value::Nothing.to_string(), "");
    }

    #[test]
    fn collects_from_iterators() {
        let arr: Value = (1..=3).map(Value::from).collect();
        assert_eq!(arr.as_array().map(<[Value]>::len), Some(3));
        let obj: Value = vec![Field::new("x", true)].into_iter().collect();
        assert_eq!(obj.kind(), Kind::Object);
    }
}
