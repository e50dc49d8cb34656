//! Environment variable source: USER_STORE_* prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Prefix shared by every configuration environment variable.
pub const ENV_PREFIX: &str = "USER_STORE";

/// Add environment variable overlay to builder.
/// Uses USER_STORE_ prefix and __ as separator for nested keys, e.g.
/// `USER_STORE__STORE__DUPLICATE_POLICY=reject`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true),
    );
    Ok(builder)
}
