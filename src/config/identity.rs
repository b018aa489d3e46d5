use std::{
    fs,
    path::{Path, PathBuf},
};

use config::ConfigError;
use serde::Deserialize;

/// Where the identity factory script comes from. Exactly one of the two
/// fields must be set.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct IdentityConfig {
    /// Inline script source.
    #[serde(default)]
    pub factory: Option<String>,

    /// Path to a script file, relative to the configuration directory.
    #[serde(default)]
    pub factory_file: Option<PathBuf>,
}

impl IdentityConfig {
    /// Returns the factory script, reading it from disk when configured as a
    /// file.
    pub fn load_factory(&self, config_dir: &Path) -> Result<String, ConfigError> {
        match (&self.factory, &self.factory_file) {
            (Some(script), None) => Ok(script.clone()),
            (None, Some(path)) => {
                let path = config_dir.join(path);
                fs::read_to_string(&path).map_err(|e| {
                    ConfigError::Message(format!(
                        "Failed to read identity factory '{}': {e}",
                        path.display()
                    ))
                })
            }
            (Some(_), Some(_)) => Err(ConfigError::Message(
                "identity: set either `factory` or `factory_file`, not both".to_string(),
            )),
            (None, None) => Err(ConfigError::Message(
                "identity: one of `factory` or `factory_file` is required".to_string(),
            )),
        }
    }
}
