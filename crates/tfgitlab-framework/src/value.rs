//! Attribute values carried in config, plan and state snapshots

use crate::diag::Diagnostic;
use std::collections::BTreeMap;
use std::fmt;

/// Primitive type of a schema attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    Int64,
    String,
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeType::Int64 => write!(f, "int64"),
            AttributeType::String => write!(f, "string"),
        }
    }
}

/// Dynamically typed attribute value
///
/// `Unknown` only appears in plans: the value will be known after apply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Value {
    #[default]
    Null,
    Unknown,
    Int64(i64),
    String(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Value::Unknown)
    }

    pub fn is_known(&self) -> bool {
        !self.is_null() && !self.is_unknown()
    }

    /// Type of a known value
    pub fn value_type(&self) -> Option<AttributeType> {
        match self {
            Value::Null | Value::Unknown => None,
            Value::Int64(_) => Some(AttributeType::Int64),
            Value::String(_) => Some(AttributeType::String),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Unknown => write!(f, "(known after apply)"),
            Value::Int64(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{:?}", s),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

/// Rust types that map onto an [`AttributeType`]
pub trait Primitive: Sized + Clone {
    const TYPE: AttributeType;

    fn from_value(value: &Value) -> Option<Self>;

    fn into_value(self) -> Value;
}

impl Primitive for i64 {
    const TYPE: AttributeType = AttributeType::Int64;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int64(n) => Some(*n),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::Int64(self)
    }
}

impl Primitive for String {
    const TYPE: AttributeType = AttributeType::String;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s.clone()),
            _ => None,
        }
    }

    fn into_value(self) -> Value {
        Value::String(self)
    }
}

/// Statically typed attribute: null, unknown, or a known value
///
/// Null and the empty value are distinct: `Attr::Null` is never the same as
/// `Attr::Known(String::new())`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Attr<T> {
    #[default]
    Null,
    Unknown,
    Known(T),
}

impl<T> Attr<T> {
    pub fn known(value: T) -> Self {
        Attr::Known(value)
    }

    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => Attr::Known(v),
            None => Attr::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Attr::Null)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Attr::Unknown)
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Attr::Known(_))
    }

    pub fn as_known(&self) -> Option<&T> {
        match self {
            Attr::Known(v) => Some(v),
            _ => None,
        }
    }
}

impl<T: Clone> Attr<T> {
    /// Replace an unknown value with `other`, keeping null and known values
    pub fn or_if_unknown(&self, other: &Attr<T>) -> Attr<T> {
        match self {
            Attr::Unknown => other.clone(),
            _ => self.clone(),
        }
    }
}

impl<T: Primitive> Attr<T> {
    /// Convert a dynamic value, reporting a type mismatch against `attribute`
    pub fn from_value(attribute: &str, value: &Value) -> std::result::Result<Self, Diagnostic> {
        match value {
            Value::Null => Ok(Attr::Null),
            Value::Unknown => Ok(Attr::Unknown),
            other => T::from_value(other).map(Attr::Known).ok_or_else(|| {
                Diagnostic::attribute_error(
                    attribute,
                    "Incorrect Attribute Value Type",
                    format!(
                        "Expected a value of type {}, got: {}",
                        T::TYPE,
                        other.value_type().map(|t| t.to_string()).unwrap_or_default()
                    ),
                )
            }),
        }
    }
}

impl<T: Primitive> From<Attr<T>> for Value {
    fn from(attr: Attr<T>) -> Self {
        match attr {
            Attr::Null => Value::Null,
            Attr::Unknown => Value::Unknown,
            Attr::Known(v) => v.into_value(),
        }
    }
}

static NULL: Value = Value::Null;

/// Flat attribute map used for config, plan and state snapshots
///
/// Missing attributes read as [`Value::Null`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Object {
    attributes: BTreeMap<String, Value>,
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> &Value {
        self.attributes.get(name).unwrap_or(&NULL)
    }

    /// Typed read of one attribute
    pub fn attr<T: Primitive>(&self, name: &str) -> std::result::Result<Attr<T>, Diagnostic> {
        Attr::from_value(name, self.get(name))
    }

    /// Typed write of one attribute
    pub fn set_attr<T: Primitive>(&mut self, name: impl Into<String>, attr: Attr<T>) {
        self.set(name, Value::from(attr));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.attributes.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.attributes.keys()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Names of attributes that hold an unknown value
    pub fn unknown_attributes(&self) -> Vec<String> {
        self.attributes
            .iter()
            .filter(|(_, v)| v.is_unknown())
            .map(|(k, _)| k.clone())
            .collect()
    }

}
