//! # ob-configs
//!
//! Layered settings for Overboard hosts.
//! Precedence, lowest first: built-in defaults, `overboard.toml`,
//! `OVERBOARD__*` environment variables (a `.env` file is loaded first).

use std::str::FromStr;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat, Source};
use serde::Deserialize;
use thiserror::Error;

/// Default file stem searched for in the working directory.
pub const DEFAULT_FILE: &str = "overboard";
pub const ENV_PREFIX: &str = "OVERBOARD";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub board: BoardSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BoardSettings {
    /// Display name of the forum instance (e.g., "Java")
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingSettings {
    /// Fallback filter when `RUST_LOG` is unset.
    pub level: String,
    /// Emit JSON lines instead of the human-readable format.
    pub json: bool,
}

impl Settings {
    /// Loads `.env`, then layers `overboard.toml` and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::layered(
            File::with_name(DEFAULT_FILE).required(false),
            environment(),
        )
    }

    /// Defaults, then `file`, then `env`; later layers win.
    fn layered<S>(file: S, env: Environment) -> Result<Self, ConfigError>
    where
        S: Source + Send + Sync + 'static,
    {
        Self::build(defaults()?.add_source(file).add_source(env))
    }

    /// Layers a TOML document over the defaults. Ignores the environment.
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        Self::build(defaults()?.add_source(File::from_str(source, FileFormat::Toml)))
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        tracing::debug!(board = %settings.board.name, "configuration loaded");
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.board.name.trim().is_empty() {
            return Err(ConfigError::Invalid("board.name must not be blank".into()));
        }
        if tracing::Level::from_str(&self.logging.level).is_err() {
            return Err(ConfigError::Invalid(format!(
                "logging.level {:?} is not one of trace, debug, info, warn, error",
                self.logging.level
            )));
        }
        Ok(())
    }
}

/// `OVERBOARD__SECTION__KEY` variables, e.g. `OVERBOARD__BOARD__NAME`.
fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(Config::builder()
        .set_default("board.name", "Java")?
        .set_default("logging.level", "info")?
        .set_default("logging.json", false)?)
}
