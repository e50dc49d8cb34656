//! MergeService: orchestrates sources and deserializes to AppConfig.

use crate::config::sources::{environment, global_file};
use crate::config::AppConfig;
use config::{Config, ConfigError, File, FileFormat};
use std::path::Path;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Load config from standard sources.
    /// Precedence: defaults (lowest) -> global file -> environment (highest).
    pub fn load() -> Result<AppConfig, ConfigError> {
        let builder = Config::builder();
        let builder = global_file::add_to_builder(builder)?;
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Load config from a specific file with environment overlay.
    /// The global file is skipped; `path` must exist.
    pub fn load_from_file(path: &Path) -> Result<AppConfig, ConfigError> {
        let builder = Config::builder().add_source(
            File::from(path)
                .format(FileFormat::Toml)
                .required(true),
        );
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }
}
