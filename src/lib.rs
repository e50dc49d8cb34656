//! User Store: flag-driven management of user records in a JSON file
//!
//! Records live as one JSON array in a single flat file. Each invocation
//! decodes the file, applies one operation (add, list, findById, remove), and
//! rewrites the file in full when the operation mutates it.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod store;
pub mod tooling;
pub mod types;

pub use dispatch::{perform, Arguments, Invocation, Operation, OperationKind};
pub use error::{ApiError, StoreError};
pub use store::{DuplicatePolicy, JsonFileStore, RecordCollection, StoreConfig};
pub use types::{Record, RecordId};
