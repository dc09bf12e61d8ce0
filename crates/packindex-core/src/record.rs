//! Catalog records and tag keys
//!
//! A `Record` is one catalog item as it arrived over the wire. Its fields are
//! not enumerated; anything the endpoint sends is carried through untouched,
//! in the order it was received.

use crate::{Error, Result};
use serde_json::{Number, Value};
use std::fmt;

/// Field of the document holding the record list
pub const PACKS_FIELD: &str = "packs";

/// Field of each record holding its tag list
pub const TAG_FIELD: &str = "genres";

/// One catalog item: an open map of field name to JSON value
pub type Record = serde_json::Map<String, Value>;

/// A group key taken from a record's tag list.
///
/// Tags are used as-is: a numeric tag `5` and a string tag `"5"` are distinct
/// keys. Only scalar JSON values can be keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tag {
    Text(String),
    Number(Number),
    Bool(bool),
    Null,
}

impl Tag {
    /// Convert a tag list element into a key
    ///
    /// # Errors
    /// - `Error::UnhashableTag` if the value is an array or object
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(Tag::Text(s)),
            Value::Number(n) => Ok(Tag::Number(n)),
            Value::Bool(b) => Ok(Tag::Bool(b)),
            Value::Null => Ok(Tag::Null),
            other @ (Value::Array(_) | Value::Object(_)) => {
                Err(Error::UnhashableTag(other.to_string()))
            }
        }
    }

    /// The tag text, if this is a string tag
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Tag::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The tag as a JSON value
    pub fn to_value(&self) -> Value {
        match self {
            Tag::Text(s) => Value::String(s.clone()),
            Tag::Number(n) => Value::Number(n.clone()),
            Tag::Bool(b) => Value::Bool(*b),
            Tag::Null => Value::Null,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tag::Text(s) => f.write_str(s),
            Tag::Number(n) => write!(f, "{}", n),
            Tag::Bool(b) => write!(f, "{}", b),
            Tag::Null => f.write_str("null"),
        }
    }
}

impl From<&str> for Tag {
    fn from(s: &str) -> Self {
        Tag::Text(s.to_string())
    }
}

impl From<String> for Tag {
    fn from(s: String) -> Self {
        Tag::Text(s)
    }
}

/// Remove the tag list from a record.
///
/// A missing field, or an explicit `null`, yields an empty list.
///
/// # Errors
/// - `Error::MalformedRecord` if the field holds anything other than an array
pub fn take_tags(record: &mut Record, field: &str) -> Result<Vec<Value>> {
    match record.remove(field) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(tags)) => Ok(tags),
        Some(other) => Err(Error::MalformedRecord(format!(
            "field '{}' must be an array, got {}",
            field, other
        ))),
    }
}
