//! Rendering of grouped packs to a writer

use anyhow::{Context, bail};
use packindex_core::{GroupMap, Record, Tag};
use serde::Serialize;
use serde_json::{Map, Value, ser::PrettyFormatter};
use std::io::Write;

/// What to print once the catalog has been grouped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    /// The whole tag to records mapping as JSON
    Full { pretty: bool },
    /// Tag names only, one per line
    Genres,
    /// The records of one tag, each as indented JSON with sorted keys
    Genre(String),
}

pub fn render(groups: &GroupMap, mode: &OutputMode, out: &mut impl Write) -> anyhow::Result<()> {
    match mode {
        OutputMode::Full { pretty } => {
            writeln!(out, "{}", groups.to_json_string(*pretty)?)?;
        }
        OutputMode::Genres => {
            let as_json = !groups.has_only_text_tags();
            for tag in groups.tags() {
                if as_json {
                    writeln!(out, "{}", tag.to_value())?;
                } else {
                    writeln!(out, "{}", tag)?;
                }
            }
        }
        OutputMode::Genre(tag) => {
            let Some(records) = find_group(groups, tag) else {
                bail!("No packs tagged '{}'", tag);
            };
            for record in records {
                writeln!(out, "{}", to_sorted_pretty(record)?)?;
            }
        }
    }
    Ok(())
}

/// Look up the group named on the command line.
///
/// With only string tags the argument is the tag itself. Otherwise it is read
/// as a JSON tag first (`5` vs `"5"`), falling back to plain text so that
/// unquoted names like `hip-hop` still resolve.
fn find_group<'a>(groups: &'a GroupMap, arg: &str) -> Option<&'a [Record]> {
    if groups.has_only_text_tags() {
        return groups.get_str(arg);
    }
    serde_json::from_str::<Value>(arg)
        .ok()
        .and_then(|value| Tag::from_value(value).ok())
        .and_then(|tag| groups.get(&tag))
        .or_else(|| groups.get_str(arg))
}

/// Four-space indented JSON with object keys sorted at every depth
fn to_sorted_pretty(record: &Record) -> anyhow::Result<String> {
    let sorted = sort_keys(Value::Object(record.clone()));
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    sorted.serialize(&mut serializer)?;
    String::from_utf8(buf).context("Rendered JSON is not UTF-8")
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, sort_keys(v)))
                    .collect::<Map<String, Value>>(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}
