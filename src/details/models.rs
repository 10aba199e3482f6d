use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// A single stored detail. Dates carry no timezone, so a value saved from
/// the date picker comes back exactly as it went in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    Str(String),
    DateTime(NaiveDateTime),
    Bool(bool),
    Int(i64),
    Float(f64),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ValueType {
    Str,
    DateTime,
    Bool,
    Int,
    Float,
}

impl ValueType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Str => "string",
            Self::DateTime => "date/time",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
        }
    }
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Str(_) => ValueType::Str,
            Self::DateTime(_) => ValueType::DateTime,
            Self::Bool(_) => ValueType::Bool,
            Self::Int(_) => ValueType::Int,
            Self::Float(_) => ValueType::Float,
        }
    }
}

/// The canonical string form of a value. This is what the raw writers emit.
impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => write!(f, "{s}"),
            Self::DateTime(dt) => write!(f, "{dt}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
        }
    }
}

/// Typed access into the untyped detail bag. `from_value` returns `None`
/// when the stored variant is not `Self`; the store turns that into a
/// `TypeMismatch`.
pub trait DetailValue: Sized {
    const TYPE: ValueType;
    fn from_value(value: &Value) -> Option<Self>;
    fn into_value(self) -> Value;
}

impl DetailValue for String {
    const TYPE: ValueType = ValueType::Str;
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Str(s) => Some(s.clone()),
            _ => None,
        }
    }
    fn into_value(self) -> Value {
        Value::Str(self)
    }
}

impl DetailValue for NaiveDateTime {
    const TYPE: ValueType = ValueType::DateTime;
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }
    fn into_value(self) -> Value {
        Value::DateTime(self)
    }
}

impl DetailValue for bool {
    const TYPE: ValueType = ValueType::Bool;
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
    fn into_value(self) -> Value {
        Value::Bool(self)
    }
}

impl DetailValue for i64 {
    const TYPE: ValueType = ValueType::Int;
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }
    fn into_value(self) -> Value {
        Value::Int(self)
    }
}

impl DetailValue for f64 {
    const TYPE: ValueType = ValueType::Float;
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }
    fn into_value(self) -> Value {
        Value::Float(self)
    }
}
