// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;

/// Environment variable consulted for the PyPI token when neither the
/// config file nor the command line provides one.
pub const PYPI_TOKEN_ENV: &str = "POSTGEN_PYPI_TOKEN";

/// Load a configuration file from a given path and return the raw
/// `RawConfigFile`.
///
/// This only performs TOML deserialization. Use [`load_and_validate`] for
/// the semantic checks.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and validate it.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Like [`load_and_validate`], but a missing file yields the defaults.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let path = path.as_ref();
    if !path.exists() {
        debug!(path = %path.display(), "no config file; using defaults");
        return Ok(ConfigFile::default());
    }
    load_and_validate(path)
}

/// Default config location: `postgen.toml` inside the project directory.
pub fn default_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join("postgen.toml")
}

/// Values given on the command line, which win over the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub author_username: Option<String>,
    pub author_email: Option<String>,
    pub pypi_token: Option<String>,
    pub skip_release: bool,
    pub abort_on_failure: bool,
}

impl ConfigOverrides {
    /// Apply the overrides and validate the result again.
    ///
    /// The PyPI token falls back to [`PYPI_TOKEN_ENV`] when still unset.
    pub fn apply(self, config: ConfigFile) -> Result<ConfigFile> {
        let mut raw = config.into_raw();

        if let Some(user) = self.author_username {
            raw.git.author_username = Some(user);
        }
        if let Some(email) = self.author_email {
            raw.git.author_email = Some(email);
        }
        if let Some(token) = self.pypi_token {
            raw.release.pypi_token = Some(token);
        }
        if raw.release.pypi_token.is_none() {
            raw.release.pypi_token = std::env::var(PYPI_TOKEN_ENV).ok().filter(|t| !t.is_empty());
        }
        if self.skip_release {
            raw.release.skip = true;
        }
        if self.abort_on_failure {
            raw.behaviour.failure_policy = crate::types::FailurePolicy::Abort;
        }

        ConfigFile::try_from(raw)
    }
}
