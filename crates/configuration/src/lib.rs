use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{BudgetSettings, Config, LoggingSettings, OutputFormat, ReportSettings};

/// Name of the settings file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "opstats";

/// Prefix of the environment variables that override file settings,
/// e.g. `OPSTATS__BUDGET__WARNING_RATIO=0.8`.
pub const ENV_PREFIX: &str = "OPSTATS";

/// Loads the application configuration.
///
/// Reads `path` when given (it must exist), otherwise an optional
/// `opstats.toml` in the working directory. Environment variables are layered
/// on top, and the result is validated before it is returned.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(?config, "Configuration loaded.");
    Ok(config)
}
