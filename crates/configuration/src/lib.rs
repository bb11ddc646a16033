use crate::error::ConfigError;
use config::builder::DefaultState;
use config::ConfigBuilder;
use std::path::{Path, PathBuf};

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{Config, Database, Logging, Server};

/// The file read when no explicit path is given. It may be absent.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Prefix for environment overrides, e.g. `CONFAB__SERVER__PORT=8080`.
pub const ENV_PREFIX: &str = "CONFAB";

/// Listen address overrides given on the command line. They sit on top of
/// every other source and are applied before validation.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "clap", derive(clap::Args))]
pub struct ServerOverrides {
    /// Address to bind, overriding `server.host`.
    #[cfg_attr(feature = "clap", arg(long))]
    pub host: Option<String>,

    /// Port to bind, overriding `server.port`.
    #[cfg_attr(feature = "clap", arg(long, short = 'p'))]
    pub port: Option<u16>,
}

/// Loads the application configuration.
///
/// Sources, lowest precedence first: built-in defaults, the TOML file,
/// `CONFAB__*` environment variables, `DATABASE_URL`, then `overrides`. An
/// explicit `path` must exist; the default `config.toml` is optional.
pub fn load_config(path: Option<&Path>, overrides: &ServerOverrides) -> Result<Config, ConfigError> {
    let mut builder = file_layers(path)?.add_source(
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    );

    if let Ok(url) = std::env::var("DATABASE_URL") {
        builder = builder.set_override("database.url", url)?;
    }

    finish(builder, overrides)
}

/// Loads defaults, the TOML file and `overrides`, ignoring the process environment.
pub fn load_config_file(
    path: Option<&Path>,
    overrides: &ServerOverrides,
) -> Result<Config, ConfigError> {
    finish(file_layers(path)?, overrides)
}

fn file_layers(path: Option<&Path>) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let (file, required) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };

    let builder = config::Config::builder()
        .set_default("server.host", settings::DEFAULT_HOST)?
        .set_default("server.port", i64::from(settings::DEFAULT_PORT))?
        .set_default("database.url", settings::DEFAULT_DATABASE_URL)?
        .set_default("database.max_connections", i64::from(settings::DEFAULT_MAX_CONNECTIONS))?
        .set_default("database.run_migrations", true)?
        .set_default("logging.level", settings::DEFAULT_LOG_LEVEL)?
        .add_source(config::File::from(file.as_path()).required(required));

    Ok(builder)
}

fn finish(
    builder: ConfigBuilder<DefaultState>,
    overrides: &ServerOverrides,
) -> Result<Config, ConfigError> {
    let builder = builder
        .set_override_option("server.host", overrides.host.clone())?
        .set_override_option("server.port", overrides.port.map(i64::from))?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.build()?.try_deserialize::<Config>()?;
    config.validate()?;
    tracing::debug!(?config, "Configuration loaded.");
    Ok(config)
}

/// Command-line flag naming the configuration file.
#[cfg(feature = "clap")]
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ConfigArgs {
    /// Path to the TOML configuration file.
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,
}
