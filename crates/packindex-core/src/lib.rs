//! PackIndex Core Types
//!
//! This crate provides the catalog types and the grouping logic used
//! throughout PackIndex:
//! - Open-ended `Record` and hashable `Tag` types
//! - `GroupMap` and the tag grouper
//! - Core error types

pub mod error;
pub mod group;
pub mod record;

pub use error::{Error, Result};
pub use group::{GroupMap, group_by_tag, group_records, group_records_by};
pub use record::{PACKS_FIELD, Record, TAG_FIELD, Tag};
