//! Configuration manager implementation

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use tracing::debug;

use crate::{
    error::{ConfigError, Result},
    types::{ConfigLoader, EnvConfig, DEFAULT_ENVIRONMENT},
};

/// Layered configuration loader
pub struct ConfigManager {
    /// Explicit TOML file, overriding the per-environment one
    config_path: Option<PathBuf>,
    /// Directory holding `<environment>.toml` files
    config_dir: PathBuf,
    /// Environment prefix
    env_prefix: String,
    /// Whether to read a `.env` file before the environment source
    load_dotenv: bool,
}

impl ConfigManager {
    /// Create a new configuration manager
    pub fn new() -> Self {
        Self {
            config_path: None,
            config_dir: PathBuf::from("config"),
            env_prefix: "GOREST".to_string(),
            load_dotenv: true,
        }
    }

    /// Create with custom config path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: Some(path.into()),
            ..Self::new()
        }
    }

    /// Look for `<environment>.toml` in `dir` instead of `config/`
    pub fn with_config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config_dir = dir.into();
        self
    }

    /// Use a different environment variable prefix
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Skip the `.env` file
    pub fn without_dotenv(mut self) -> Self {
        self.load_dotenv = false;
        self
    }

    /// Path of the optional TOML file.
    ///
    /// Without an explicit path this is `<config_dir>/<environment>.toml`,
    /// where the environment comes from `<PREFIX>_ENVIRONMENT` (lowercased)
    /// and defaults to `qa`.
    pub fn config_path(&self) -> PathBuf {
        match &self.config_path {
            Some(path) => path.clone(),
            None => environment_file(&self.config_dir, &self.environment()),
        }
    }

    /// Environment label selected by the process environment
    pub fn environment(&self) -> String {
        std::env::var(format!("{}_ENVIRONMENT", self.env_prefix))
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string())
    }

    /// Load and validate in one go
    pub fn load(&self) -> Result<EnvConfig> {
        let config = self.load_config()?;
        self.validate_config(&config)?;
        Ok(config)
    }
}

fn environment_file(dir: &Path, environment: &str) -> PathBuf {
    dir.join(format!("{}.toml", environment.to_lowercase()))
}

impl ConfigLoader for ConfigManager {
    fn load_config(&self) -> Result<EnvConfig> {
        if self.load_dotenv {
            if let Ok(path) = dotenv::dotenv() {
                debug!("Loaded environment from {}", path.display());
            }
        }

        let config_path = self.config_path();
        debug!("Reading configuration file {}", config_path.display());

        let builder = Config::builder()
            .add_source(File::from(config_path).required(false))
            .add_source(Environment::with_prefix(&self.env_prefix));

        let config = builder.build()?;
        let env_config: EnvConfig = config.try_deserialize()?;
        debug!(
            environment = %env_config.environment,
            base_url = %env_config.base_url,
            has_token = env_config.auth_token.is_some(),
            "Configuration loaded"
        );
        Ok(env_config)
    }

    fn validate_config(&self, config: &EnvConfig) -> Result<()> {
        let url = url::Url::parse(&config.base_url).map_err(|e| {
            ConfigError::Validation(format!("Invalid base URL `{}`: {e}", config.base_url))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Validation(format!(
                "Base URL must be http or https, got `{}`",
                url.scheme()
            )));
        }
        if config.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "Timeout must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
