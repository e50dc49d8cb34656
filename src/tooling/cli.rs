//! CLI Tooling
//!
//! Flag-driven interface for the record store. Flags keep their Go-style
//! single-dash spelling (`-operation add -fileName users.json`); the double
//! dash form is accepted as well.

use crate::config::{AppConfig, ConfigLoader};
use crate::dispatch::{perform, Arguments};
use crate::error::ApiError;
use crate::logging::validate_format;
use crate::store::DuplicatePolicy;
use clap::Parser;
use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

/// Flags that take no value.
const SWITCH_FLAGS: [&str; 4] = ["help", "version", "verbose", "h"];

/// User store CLI - manage user records kept in a JSON file
#[derive(Parser, Debug)]
#[command(name = "user-store")]
#[command(version)]
#[command(about = "Add, list, find, and remove user records stored as a JSON array in a file")]
pub struct Cli {
    /// Operation to run: add, list, findById, remove
    #[arg(long = "operation", value_name = "OPERATION")]
    pub operation: Option<String>,

    /// Record to add, as JSON: {"id": "...", "email": "...", "age": 0}
    #[arg(long = "item", value_name = "JSON", allow_hyphen_values = true)]
    pub item: Option<String>,

    /// Record id for findById and remove
    #[arg(long = "id", value_name = "ID", allow_hyphen_values = true)]
    pub id: Option<String>,

    /// Path of the JSON file holding the records
    #[arg(long = "fileName", value_name = "PATH", allow_hyphen_values = true)]
    pub file_name: Option<String>,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// How add treats an id that is already stored (allow, reject, overwrite)
    #[arg(long)]
    pub duplicates: Option<DuplicatePolicy>,

    /// Enable verbose logging (same as --log-level debug)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Parse the process arguments, accepting single-dash long flags.
    pub fn parse_normalized() -> Self {
        Self::parse_from(normalize_flag_prefix(std::env::args_os()))
    }

    /// The raw argument mapping; absent flags become empty strings.
    pub fn arguments(&self) -> Arguments {
        Arguments {
            operation: self.operation.clone().unwrap_or_default(),
            item: self.item.clone().unwrap_or_default(),
            id: self.id.clone().unwrap_or_default(),
            file_name: self.file_name.clone().unwrap_or_default(),
        }
    }
}

/// Rewrite `-name` flags to `--name` so clap treats them as long flags.
///
/// The first element is the binary name and is kept as is. A token that
/// follows a value-taking flag is a value and is never rewritten, so ids such
/// as `-5` survive. Everything after a bare `--` is left alone.
pub fn normalize_flag_prefix<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut iter = args.into_iter().map(Into::into);
    let mut normalized: Vec<OsString> = iter.next().into_iter().collect();
    let mut expecting_value = false;
    let mut passthrough = false;

    for arg in iter {
        if passthrough || expecting_value {
            expecting_value = false;
            normalized.push(arg);
            continue;
        }
        let Some(text) = arg.to_str() else {
            normalized.push(arg);
            continue;
        };
        if text == "--" {
            passthrough = true;
            normalized.push(arg);
            continue;
        }

        let long = if let Some(rest) = text.strip_prefix("--") {
            Some(rest.to_string())
        } else if text.len() > 2 && text.starts_with('-') {
            Some(text[1..].to_string())
        } else {
            None
        };

        match long {
            Some(flag) => {
                let name = flag.split('=').next().unwrap_or_default();
                expecting_value = !flag.contains('=') && !SWITCH_FLAGS.contains(&name);
                normalized.push(OsString::from(format!("--{}", flag)));
            }
            None => normalized.push(arg),
        }
    }

    normalized
}

/// CLI context: effective configuration for one invocation
pub struct CliContext {
    config: AppConfig,
}

impl CliContext {
    /// Create a new CLI context, loading configuration from `config_path` or
    /// the default sources.
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = match &config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };
        Ok(Self::from_config(config))
    }

    pub fn from_config(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Layer flag overrides from `cli` on top of the loaded configuration.
    pub fn with_overrides(mut self, cli: &Cli) -> Result<Self, ApiError> {
        if let Some(policy) = cli.duplicates {
            self.config.store.duplicate_policy = policy;
        }

        let logging = &mut self.config.logging;
        if cli.verbose {
            logging.level = "debug".to_string();
        }
        if let Some(level) = &cli.log_level {
            logging.level = level.clone();
        }
        if let Some(format) = &cli.log_format {
            validate_format(format)?;
            logging.format = format.clone();
        }
        if let Some(output) = &cli.log_output {
            logging.output = output.clone();
        }
        if let Some(file) = &cli.log_file {
            logging.file = Some(file.clone());
        }
        Ok(self)
    }

    /// Execute one invocation, writing results and notices to `out`.
    pub fn execute(&self, args: &Arguments, out: &mut dyn Write) -> Result<(), ApiError> {
        perform(args, &self.config.store, out)
    }
}
