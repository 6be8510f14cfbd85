//! GoRest harness configuration
//!
//! Loads the target environment (base URL, bearer token, environment label and
//! request timeout) from built-in defaults, the per-environment TOML file
//! `config/<environment>.toml`, a `.env` file and `GOREST_*` environment
//! variables, in that order of precedence.

pub mod error;
pub mod manager;
pub mod types;

pub use error::{ConfigError, Result};
pub use manager::ConfigManager;
pub use types::{require_token, ConfigLoader, EnvConfig, DEFAULT_BASE_URL, DEFAULT_ENVIRONMENT};
