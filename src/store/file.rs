//! JSON file backed record store.
//!
//! Each operation opens the record file, does its work, and drops the handle
//! before returning, so the file is closed on every path including errors.

use crate::error::StoreError;
use crate::store::{
    decode_item, decode_records, encode_record, encode_records, DuplicatePolicy, RecordCollection,
    StoreConfig,
};
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace, warn};

/// Chunk size used when streaming the raw file in `list`.
const LIST_CHUNK_SIZE: usize = 2048;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    Read,
    ReadWrite,
}

/// Record store persisted as one JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    config: StoreConfig,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_config(path, StoreConfig::default())
    }

    pub fn with_config(path: impl Into<PathBuf>, config: StoreConfig) -> Self {
        Self {
            path: path.into(),
            config,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `item` to the stored records.
    ///
    /// Existing records with the same id are handled per the configured
    /// [`DuplicatePolicy`]; under `Allow` a notice is written for each one.
    pub fn add(&self, item: &str, out: &mut dyn Write) -> Result<(), StoreError> {
        let record = decode_item(item)?;
        let mut file = self.open(Access::ReadWrite)?;
        let mut collection = read_collection(&mut file)?;

        if collection.contains_id(&record.id) {
            warn!(
                id = %record.id,
                policy = ?self.config.duplicate_policy,
                "Record id already present in {}",
                self.path.display()
            );
            match self.config.duplicate_policy {
                DuplicatePolicy::Allow => {
                    for existing in collection.matching(&record.id) {
                        write!(out, "Item with id {} already exists", existing.id)?;
                    }
                    collection.push(record);
                }
                DuplicatePolicy::Reject => {
                    return Err(StoreError::DuplicateId(record.id));
                }
                DuplicatePolicy::Overwrite => {
                    write!(out, "Item with id {} already exists", record.id)?;
                    collection.replace(record);
                }
            }
        } else {
            collection.push(record);
        }
        // Notices must reach the caller before the file changes.
        out.flush()?;

        write_collection(&mut file, &collection)?;
        info!(
            records = collection.len(),
            "Added record to {}",
            self.path.display()
        );
        Ok(())
    }

    /// Copy the raw file bytes to `out` without decoding them.
    pub fn list(&self, out: &mut dyn Write) -> Result<(), StoreError> {
        let mut file = self.open(Access::Read)?;
        let mut buffer = [0u8; LIST_CHUNK_SIZE];
        let mut total = 0usize;
        loop {
            let n = match file.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            out.write_all(&buffer[..n])?;
            total += n;
        }
        out.flush()?;
        debug!(bytes = total, "Listed {}", self.path.display());
        Ok(())
    }

    /// Write the JSON of every record with `id`, back to back.
    pub fn find_by_id(&self, id: &str, out: &mut dyn Write) -> Result<(), StoreError> {
        let mut file = self.open(Access::Read)?;
        let collection = read_collection(&mut file)?;
        let mut matches = 0usize;
        for record in collection.matching(id) {
            out.write_all(&encode_record(record)?)?;
            matches += 1;
        }
        out.flush()?;
        debug!(id, matches, "Looked up record in {}", self.path.display());
        Ok(())
    }

    /// Drop the first record with `id` and rewrite the file.
    ///
    /// When nothing matches a notice is written and the file is left as is.
    pub fn remove(&self, id: &str, out: &mut dyn Write) -> Result<(), StoreError> {
        let mut file = self.open(Access::ReadWrite)?;
        let mut collection = read_collection(&mut file)?;

        if collection.remove_first(id).is_none() {
            warn!(id, "No record to remove in {}", self.path.display());
            write!(out, "Item with id {} not found", id)?;
            out.flush()?;
            return Ok(());
        }

        write_collection(&mut file, &collection)?;
        info!(
            id,
            records = collection.len(),
            "Removed record from {}",
            self.path.display()
        );
        Ok(())
    }

    fn open(&self, access: Access) -> Result<File, StoreError> {
        let mut options = OpenOptions::new();
        options.read(true);
        // Creating needs write access even when the caller only reads.
        if access == Access::ReadWrite || !self.path.exists() {
            options.write(true).create(true);
        }
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(self.config.file_mode);
        }
        let file = options.open(&self.path)?;
        debug!(?access, "Opened record file {}", self.path.display());
        Ok(file)
    }
}

fn read_collection(file: &mut File) -> Result<RecordCollection, StoreError> {
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    trace!(contents = %String::from_utf8_lossy(&bytes), "Read record file");
    let collection = decode_records(&bytes)?;
    debug!(records = collection.len(), "Decoded record file");
    Ok(collection)
}

fn write_collection(file: &mut File, collection: &RecordCollection) -> Result<(), StoreError> {
    let bytes = encode_records(collection)?;
    file.set_len(0)?;
    file.seek(SeekFrom::Start(0))?;
    file.write_all(&bytes)?;
    file.flush()?;
    Ok(())
}
