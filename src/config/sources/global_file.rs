//! Global config file source: `$XDG_CONFIG_HOME/user-store/config.toml`.

use crate::config::xdg;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File, FileFormat};

/// Add the global config file to builder when it can be located.
/// A missing file is not an error.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let Ok(path) = xdg::global_config_path() else {
        tracing::debug!("No config home available, skipping global config file");
        return Ok(builder);
    };
    Ok(builder.add_source(
        File::from(path)
            .format(FileFormat::Toml)
            .required(false),
    ))
}
