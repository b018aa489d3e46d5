use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use super::{IdentityConfig, SandboxConfig, ServerConfig};

/// Default directory holding `app.yaml`.
pub const DEFAULT_CONFIG_DIR: &str = "configs";

/// Prefix of environment variables overriding file values, e.g.
/// `TRANSFORM_SANDBOX__SERVER__LISTEN_ADDRESS`.
pub const ENV_PREFIX: &str = "TRANSFORM_SANDBOX";

/// Application configuration for the transform sandbox service.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Execution budget for sandboxed scripts.
    #[serde(default)]
    pub sandbox: SandboxConfig,

    /// Source of the document identity factory script, if identities are
    /// derived.
    #[serde(default)]
    pub identity: Option<IdentityConfig>,

    /// The identity factory script, resolved from `identity` at load time.
    #[serde(skip_deserializing)]
    pub identity_factory: Option<String>,

    /// Directory the configuration was read from.
    #[serde(skip_deserializing)]
    pub config_dir: PathBuf,
}

impl AppConfig {
    /// Creates a new `AppConfig` by reading from the configuration directory.
    pub fn new(config_dir: Option<&str>) -> Result<Self, ConfigError> {
        let config_dir_str = config_dir.unwrap_or(DEFAULT_CONFIG_DIR);
        let s = Config::builder()
            .add_source(File::with_name(&format!("{}/app.yaml", config_dir_str)))
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;
        let mut config: Self = s.try_deserialize()?;

        let config_path = Path::new(config_dir_str);
        config.identity_factory =
            config.identity.as_ref().map(|identity| identity.load_factory(config_path)).transpose()?;
        config.config_dir = config_path.to_path_buf();

        tracing::debug!(
            config_dir = %config.config_dir.display(),
            identity = config.identity_factory.is_some(),
            "Configuration loaded."
        );
        Ok(config)
    }
}
