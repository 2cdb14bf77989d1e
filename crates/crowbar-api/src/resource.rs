//! Record plumbing shared by every resource binding.
//!
//! The admin node decides which keys a record carries, and older API
//! versions send some of them with different JSON types. [`Field`] keeps
//! that information instead of flattening it into `Option`.

use serde::{Deserialize, Deserializer, Serialize, Serializer, de::DeserializeOwned};
use serde_json::Value;

///
/// Resource
///
/// A record type served by one API collection.
///

pub trait Resource: DeserializeOwned + Serialize + Send + Sync {
    /// Type tag reported by endpoints serving this record.
    const RESOURCE_TYPE: &'static str;

    /// Enumerations published alongside the record.
    type Enums;
}

///
/// Field
///
/// One declared key of a record:
/// - `Absent`: the key was not in the input
/// - `Unset`: the key is present with no value (`null`)
/// - `Value`: the key holds a value of the declared type
/// - `Raw`: the key holds some other JSON value, kept verbatim
///

#[derive(Clone, Debug, PartialEq)]
pub enum Field<T> {
    Absent,
    Unset,
    Value(T),
    Raw(Value),
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T> Field<T> {
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// True when the key is part of the record, whatever it holds.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        !self.is_absent()
    }

    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }
}

impl<T: DeserializeOwned> Field<T> {
    /// Adopt a JSON value without coercion: `null` is unset, a value of the
    /// declared type is typed, anything else is kept raw.
    #[must_use]
    pub fn from_json(raw: Value) -> Self {
        if raw.is_null() {
            return Self::Unset;
        }

        match T::deserialize(&raw) {
            Ok(v) => Self::Value(v),
            Err(_) => Self::Raw(raw),
        }
    }
}

impl<T: Serialize> Field<T> {
    /// JSON form of the slot; `None` when absent.
    #[must_use]
    pub fn to_json(&self) -> Option<Value> {
        match self {
            Self::Absent => None,
            Self::Unset => Some(Value::Null),
            Self::Value(v) => Some(serde_json::to_value(v).unwrap_or(Value::Null)),
            Self::Raw(raw) => Some(raw.clone()),
        }
    }
}

impl<T> From<T> for Field<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // skipped by the containing record; null if serialized bare
            Self::Absent | Self::Unset => serializer.serialize_none(),
            Self::Value(v) => v.serialize(serializer),
            Self::Raw(raw) => raw.serialize(serializer),
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_json)
    }
}

///
/// TESTS
///
