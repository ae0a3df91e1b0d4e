//! # ndf-config
//!
//! Layered configuration loading for the NDF generator using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Explicit overrides (CLI flags)
//! 2. Environment variables (`NDF_*` prefix, `__` as separator)
//! 3. Project-level `.ndf/config.toml`
//! 4. User-level `~/.config/ndf/config.toml`
//! 5. Built-in defaults
//!
//! Only the three filesystem paths of a run are configurable. Entity counts
//! and shard layout are fixed.
//!
//! # Usage
//!
//! ```no_run
//! use ndf_config::NdfConfig;
//!
//! let config = NdfConfig::load().expect("config");
//! println!("archive: {}", config.paths.archive_output.display());
//! ```

mod error;
mod paths;

pub use error::ConfigError;
pub use paths::{PathOverrides, PathsConfig, is_within};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct NdfConfig {
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Serialized shape of [`PathOverrides`] so it merges under `paths`.
#[derive(Serialize)]
struct OverrideLayer<'a> {
    paths: &'a PathOverrides,
}

impl NdfConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT load `.env` files; the binary does that before calling in.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction fails or the paths are invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::extract(Self::figment())
    }

    /// Load configuration and apply explicit overrides on top of every source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction fails or the paths are invalid.
    pub fn load_with_overrides(overrides: &PathOverrides) -> Result<Self, ConfigError> {
        let figment =
            Self::figment().merge(Serialized::defaults(OverrideLayer { paths: overrides }));
        Self::extract(figment)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".ndf/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables
        figment.merge(Env::prefixed("NDF_").split("__"))
    }

    fn extract(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.paths.validate()?;
        Ok(config)
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ndf").join("config.toml"))
    }
}
