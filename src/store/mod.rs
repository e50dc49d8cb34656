//! Record Store
//!
//! In-memory view of the record file plus the JSON codec used to move it on
//! and off disk. The whole file is one JSON array; every mutation decodes it
//! fully and writes it back fully.

pub mod file;

use crate::error::StoreError;
use crate::types::Record;
use serde::{Deserialize, Serialize};

pub use file::JsonFileStore;

/// Permission bits applied when the record file is created.
pub const DEFAULT_FILE_MODE: u32 = 0o644;

/// What `add` does when the incoming id is already stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Report the conflict and append anyway.
    #[default]
    Allow,
    /// Report the conflict as an error and leave the file untouched.
    Reject,
    /// Replace the stored record carrying the same id.
    Overwrite,
}

impl std::str::FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "allow" => Ok(DuplicatePolicy::Allow),
            "reject" => Ok(DuplicatePolicy::Reject),
            "overwrite" => Ok(DuplicatePolicy::Overwrite),
            _ => Err(format!(
                "Invalid duplicate policy: {} (must be 'allow', 'reject', or 'overwrite')",
                s
            )),
        }
    }
}

fn default_file_mode() -> u32 {
    DEFAULT_FILE_MODE
}

/// Store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Behaviour of `add` on an id that is already present
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,

    /// Mode bits for newly created record files (unix only)
    #[serde(default = "default_file_mode")]
    pub file_mode: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            duplicate_policy: DuplicatePolicy::default(),
            file_mode: default_file_mode(),
        }
    }
}

/// Ordered sequence of records; insertion order is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordCollection {
    records: Vec<Record>,
}

impl RecordCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// All records carrying `id`, in stored order.
    pub fn matching<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Record> + 'a {
        self.records.iter().filter(move |r| r.id == id)
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.records.iter().any(|r| r.id == id)
    }

    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Remove the first record with `id`, keeping the order of the rest.
    pub fn remove_first(&mut self, id: &str) -> Option<Record> {
        let index = self.records.iter().position(|r| r.id == id)?;
        Some(self.records.remove(index))
    }

    /// Put `record` in place of the first record sharing its id and drop any
    /// later records with that id. Returns false when no record matched.
    pub fn replace(&mut self, record: Record) -> bool {
        let Some(index) = self.records.iter().position(|r| r.id == record.id) else {
            return false;
        };
        let id = record.id.clone();
        self.records[index] = record;
        let mut position = 0usize;
        self.records.retain(|r| {
            let keep = position <= index || r.id != id;
            position += 1;
            keep
        });
        true
    }
}

impl From<Vec<Record>> for RecordCollection {
    fn from(records: Vec<Record>) -> Self {
        Self { records }
    }
}

/// Decode the full contents of a record file.
///
/// Zero bytes and a bare `null` both mean an empty collection.
pub fn decode_records(bytes: &[u8]) -> Result<RecordCollection, StoreError> {
    if bytes.is_empty() {
        return Ok(RecordCollection::new());
    }
    let records: Option<Vec<Record>> =
        serde_json::from_slice(bytes).map_err(StoreError::CorruptStore)?;
    Ok(records.unwrap_or_default().into())
}

/// Encode a collection as a compact JSON array.
pub fn encode_records(collection: &RecordCollection) -> Result<Vec<u8>, StoreError> {
    serde_json::to_vec(collection.records()).map_err(StoreError::Encode)
}

/// Decode a single record supplied by the caller.
pub fn decode_item(item: &str) -> Result<Record, StoreError> {
    serde_json::from_str(item).map_err(StoreError::InvalidItem)
}

/// Encode a single record as compact JSON.
pub fn encode_record(record: &Record) -> Result<Vec<u8>, StoreError> {
    serde_json::to_vec(record).map_err(StoreError::Encode)
}
