//! Details are the loosely-typed values stored on a content item, keyed by
//! property name. The `Details` bag is the only place editables read from
//! and write to, and it keeps itself compact: a value equal to the
//! property's default is never stored, so a missing key always means
//! "default".
//!
//! - `Str`
//! - `DateTime`
//! - `Bool`, `Int`, `Float`

pub mod models;

use crate::errors::DetailError;
pub use models::{DetailValue, Value, ValueType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Details {
    values: BTreeMap<String, Value>,
}

impl Details {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// An absent key is `Ok(None)`, not an error.
    pub fn get<T: DetailValue>(
        &self,
        key: &str,
    ) -> Result<Option<T>, DetailError> {
        match self.values.get(key) {
            None => Ok(None),
            Some(value) => T::from_value(value).map(Some).ok_or_else(|| {
                DetailError::TypeMismatch {
                    key: key.to_string(),
                    expected: T::TYPE.name(),
                    found: value.value_type().name(),
                }
            }),
        }
    }

    pub fn get_or<T: DetailValue>(
        &self,
        key: &str,
        default: T,
    ) -> Result<T, DetailError> {
        Ok(self.get(key)?.unwrap_or(default))
    }

    /// Store `value` under `key`, unless it is `None` or equal to `default`,
    /// in which case the key is removed. Returns whether anything is stored
    /// afterwards.
    pub fn set<T: DetailValue + PartialEq>(
        &mut self,
        key: &str,
        value: Option<T>,
        default: Option<T>,
    ) -> bool {
        match value.filter(|v| default.as_ref() != Some(v)) {
            Some(v) => {
                self.values.insert(key.to_string(), v.into_value());
                true
            }
            None => {
                self.values.remove(key);
                false
            }
        }
    }

    /// Write a value that has already been coerced, e.g. a rebased path or
    /// an imported detail.
    pub fn set_raw(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
