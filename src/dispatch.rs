//! Operation dispatch.
//!
//! Turns the raw argument mapping into a validated [`Invocation`] and runs it
//! against a [`JsonFileStore`]. All input checks happen before any file is
//! opened.

use crate::error::ApiError;
use crate::store::{JsonFileStore, StoreConfig};
use std::fmt;
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;

/// Raw named inputs of one invocation. Absent flags are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments {
    pub operation: String,
    pub item: String,
    pub id: String,
    pub file_name: String,
}

/// The recognised operation names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Add,
    List,
    FindById,
    Remove,
}

impl OperationKind {
    pub const ALL: [OperationKind; 4] = [
        OperationKind::Add,
        OperationKind::List,
        OperationKind::FindById,
        OperationKind::Remove,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Add => "add",
            OperationKind::List => "list",
            OperationKind::FindById => "findById",
            OperationKind::Remove => "remove",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OperationKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ApiError::OperationNotAllowed(s.to_string()))
    }
}

/// A fully validated operation with the inputs it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Add { item: String },
    List,
    FindById { id: String },
    Remove { id: String },
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Add { .. } => OperationKind::Add,
            Operation::List => OperationKind::List,
            Operation::FindById { .. } => OperationKind::FindById,
            Operation::Remove { .. } => OperationKind::Remove,
        }
    }
}

/// Target file plus the operation to run on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub file_name: PathBuf,
    pub operation: Operation,
}

impl Invocation {
    /// Validate `args`.
    ///
    /// Checks run in a fixed order: file name, operation presence, operation
    /// name, then the input the chosen operation requires.
    pub fn resolve(args: &Arguments) -> Result<Self, ApiError> {
        if args.file_name.is_empty() {
            return Err(ApiError::MissingFileName);
        }
        if args.operation.is_empty() {
            return Err(ApiError::MissingOperation);
        }
        let operation = match args.operation.parse::<OperationKind>()? {
            OperationKind::Add => Operation::Add {
                item: required(&args.item, ApiError::MissingItem)?,
            },
            OperationKind::List => Operation::List,
            OperationKind::FindById => Operation::FindById {
                id: required(&args.id, ApiError::MissingId)?,
            },
            OperationKind::Remove => Operation::Remove {
                id: required(&args.id, ApiError::MissingId)?,
            },
        };
        Ok(Self {
            file_name: PathBuf::from(&args.file_name),
            operation,
        })
    }

    /// Run the operation, writing any result or notice to `out`.
    pub fn execute(&self, config: &StoreConfig, out: &mut dyn Write) -> Result<(), ApiError> {
        let store = JsonFileStore::with_config(self.file_name.clone(), config.clone());
        tracing::debug!(
            operation = %self.operation.kind(),
            "Dispatching on {}",
            self.file_name.display()
        );
        match &self.operation {
            Operation::Add { item } => store.add(item, out)?,
            Operation::List => store.list(out)?,
            Operation::FindById { id } => store.find_by_id(id, out)?,
            Operation::Remove { id } => store.remove(id, out)?,
        }
        Ok(())
    }
}

fn required(value: &str, missing: ApiError) -> Result<String, ApiError> {
    if value.is_empty() {
        Err(missing)
    } else {
        Ok(value.to_string())
    }
}

/// Validate `args` and run the selected operation.
pub fn perform(args: &Arguments, config: &StoreConfig, out: &mut dyn Write) -> Result<(), ApiError> {
    Invocation::resolve(args)?.execute(config, out)
}
