//! Grouping of catalog records by tag
//!
//! The grouper walks the record list once. Each record loses its tag field
//! and is appended to the group of every tag it carried. Groups keep the
//! order in which their tags were first seen, and each group keeps the order
//! in which its records were seen.

use crate::record::{PACKS_FIELD, Record, TAG_FIELD, Tag, take_tags};
use crate::{Error, Result};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Mapping from tag to the records carrying it, in first-appearance order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupMap {
    groups: Vec<(Tag, Vec<Record>)>,
    index: HashMap<Tag, usize>,
}

impl GroupMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record to the group for `tag`, creating the group on first sight
    fn push(&mut self, tag: Tag, record: Record) {
        match self.index.get(&tag) {
            Some(&slot) => self.groups[slot].1.push(record),
            None => {
                self.index.insert(tag.clone(), self.groups.len());
                self.groups.push((tag, vec![record]));
            }
        }
    }

    /// Records grouped under `tag`
    pub fn get(&self, tag: &Tag) -> Option<&[Record]> {
        self.index
            .get(tag)
            .map(|&slot| self.groups[slot].1.as_slice())
    }

    /// Records grouped under a string tag
    pub fn get_str(&self, tag: &str) -> Option<&[Record]> {
        self.get(&Tag::from(tag))
    }

    /// Tags in first-appearance order
    pub fn tags(&self) -> impl Iterator<Item = &Tag> {
        self.groups.iter().map(|(tag, _)| tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Tag, &[Record])> {
        self.groups
            .iter()
            .map(|(tag, records)| (tag, records.as_slice()))
    }

    /// Number of distinct tags
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of record placements across all groups
    pub fn placements(&self) -> usize {
        self.groups.iter().map(|(_, records)| records.len()).sum()
    }

    /// Whether every key is a string tag, so the map can render as an object
    pub fn has_only_text_tags(&self) -> bool {
        self.groups.iter().all(|(tag, _)| tag.as_str().is_some())
    }

    /// Render the map as JSON.
    ///
    /// With only string tags this is an object keyed by tag. Otherwise it is
    /// an array of `[tag, records]` pairs, so `5` and `"5"` stay apart.
    pub fn to_json_string(&self, pretty: bool) -> Result<String> {
        let rendered = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(rendered)
    }
}

impl Serialize for GroupMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if !self.has_only_text_tags() {
            let mut pairs = serializer.serialize_seq(Some(self.groups.len()))?;
            for (tag, records) in &self.groups {
                pairs.serialize_element(&(tag.to_value(), records))?;
            }
            return pairs.end();
        }

        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for (tag, records) in &self.groups {
            map.serialize_entry(&tag.to_string(), records)?;
        }
        map.end()
    }
}

impl<'a> IntoIterator for &'a GroupMap {
    type Item = (&'a Tag, &'a [Record]);
    type IntoIter = Box<dyn Iterator<Item = Self::Item> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// Group the `packs` of a fetched document by their `genres`.
///
/// # Errors
/// - `Error::MalformedRecord` if the document has no `packs` array, or an
///   element of it is not an object, or a `genres` field is not an array
/// - `Error::UnhashableTag` if a tag is an array or object
#[instrument(skip(doc))]
pub fn group_by_tag(doc: Value) -> Result<GroupMap> {
    let mut doc = match doc {
        Value::Object(map) => map,
        other => {
            return Err(Error::MalformedRecord(format!(
                "expected a top-level object, got {}",
                json_kind(&other)
            )));
        }
    };

    let packs = match doc.remove(PACKS_FIELD) {
        Some(Value::Array(packs)) => packs,
        Some(other) => {
            return Err(Error::MalformedRecord(format!(
                "field '{}' must be an array, got {}",
                PACKS_FIELD,
                json_kind(&other)
            )));
        }
        None => {
            return Err(Error::MalformedRecord(format!(
                "document has no '{}' field",
                PACKS_FIELD
            )));
        }
    };

    let records = packs
        .into_iter()
        .enumerate()
        .map(|(position, value)| match value {
            Value::Object(record) => Ok(record),
            other => Err(Error::MalformedRecord(format!(
                "{}[{}] must be an object, got {}",
                PACKS_FIELD,
                position,
                json_kind(&other)
            ))),
        })
        .collect::<Result<Vec<_>>>()?;

    group_records(records)
}

/// Group already-parsed records by their `genres` field
pub fn group_records(records: impl IntoIterator<Item = Record>) -> Result<GroupMap> {
    group_records_by(TAG_FIELD, records)
}

/// Group records by the tag list held in `field`.
///
/// Records without the field (or with `null`) contribute to no group. A tag
/// repeated within one record places that record in its group once per
/// repetition.
pub fn group_records_by(
    field: &str,
    records: impl IntoIterator<Item = Record>,
) -> Result<GroupMap> {
    let mut groups = GroupMap::new();
    let mut seen = 0usize;
    let mut untagged = 0usize;

    for mut record in records {
        seen += 1;
        let tags = take_tags(&mut record, field)?;
        if tags.is_empty() {
            untagged += 1;
            continue;
        }

        let tags = tags
            .into_iter()
            .map(Tag::from_value)
            .collect::<Result<Vec<_>>>()?;
        for tag in tags {
            groups.push(tag, record.clone());
        }
    }

    debug!(
        records = seen,
        untagged,
        tags = groups.len(),
        "Grouped records by '{}'",
        field
    );

    Ok(groups)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
