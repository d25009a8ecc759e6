//! # venture-config
//!
//! Layered configuration loading for Venture using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`VENTURE_*` prefix, `__` as separator)
//! 2. Project-level `.venture/config.toml`
//! 3. User-level `~/.config/venture/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `VENTURE_JUDGE__API_KEY` -> `judge.api_key`,
//! `VENTURE_GATE__LENIENCY_THRESHOLD` -> `gate.leniency_threshold`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use venture_config::VentureConfig;
//!
//! let config = VentureConfig::load_with_dotenv().expect("config");
//! if config.judge.is_configured() {
//!     println!("judge model: {}", config.judge.model);
//! }
//! ```

mod error;
mod gate;
mod judge;
mod questionnaire;
mod server;
mod storage;

pub use error::ConfigError;
pub use gate::GateConfig;
pub use judge::JudgeConfig;
pub use questionnaire::QuestionnaireConfig;
pub use server::ServerConfig;
pub use storage::StorageConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct VentureConfig {
    #[serde(default)]
    pub judge: JudgeConfig,
    #[serde(default)]
    pub gate: GateConfig,
    #[serde(default)]
    pub questionnaire: QuestionnaireConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl VentureConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if extraction fails and
    /// `ConfigError::InvalidValue` if a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Extract and validate a config from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
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
        let local_path = PathBuf::from(".venture/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("VENTURE_").split("__"))
    }

    /// Range checks figment cannot express.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError::InvalidValue` found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.judge.validate()?;
        self.gate.validate()?;
        self.questionnaire.validate()
    }

    /// Fail with `NotConfigured` unless the judge endpoint is usable.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotConfigured { section: "judge" }`.
    pub fn require_judge(&self) -> Result<&JudgeConfig, ConfigError> {
        if self.judge.is_configured() {
            Ok(&self.judge)
        } else {
            Err(ConfigError::NotConfigured {
                section: "judge".into(),
            })
        }
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("venture").join("config.toml"))
    }

    /// Load `.env` from the workspace root, falling back to the current dir.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}
