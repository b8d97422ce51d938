// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

use crate::types::{FailurePolicy, ReleaseBump};

/// Configuration as read from `postgen.toml`, before validation.
///
/// ```toml
/// [project]
/// module_name = "my_package"
///
/// [git]
/// author_username = "jane"
/// author_email = "jane@example.com"
///
/// [release]
/// bump = "minor"
///
/// [behaviour]
/// failure_policy = "continue"
/// ```
///
/// Every section is optional; a missing file behaves like an empty one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub project: ProjectSection,

    #[serde(default)]
    pub git: GitSection,

    #[serde(default)]
    pub install: InstallSection,

    #[serde(default)]
    pub release: ReleaseSection,

    #[serde(default)]
    pub behaviour: BehaviourSection,

    /// `[[step]]` entries. When non-empty they replace the default plan.
    #[serde(default)]
    pub step: Vec<StepConfig>,
}

/// Validated configuration. Only obtainable through
/// `TryFrom<RawConfigFile>` (or `Default`, which is valid by construction).
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub project: ProjectSection,
    pub git: GitSection,
    pub install: InstallSection,
    pub release: ReleaseSection,
    pub behaviour: BehaviourSection,
    pub step: Vec<StepConfig>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(raw: RawConfigFile) -> Self {
        Self {
            project: raw.project,
            git: raw.git,
            install: raw.install,
            release: raw.release,
            behaviour: raw.behaviour,
            step: raw.step,
        }
    }

    /// Turn back into raw form, e.g. to apply overrides and re-validate.
    pub fn into_raw(self) -> RawConfigFile {
        RawConfigFile {
            project: self.project,
            git: self.git,
            install: self.install,
            release: self.release,
            behaviour: self.behaviour,
            step: self.step,
        }
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self::new_unchecked(RawConfigFile::default())
    }
}

/// `[project]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectSection {
    /// Importable name of the generated package, checked against the Python
    /// module-name rules when present.
    #[serde(default)]
    pub module_name: Option<String>,
}

/// `[git]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct GitSection {
    /// Written to `user.name`; the step is skipped when unset.
    #[serde(default)]
    pub author_username: Option<String>,

    /// Written to `user.email`; the step is skipped when unset.
    #[serde(default)]
    pub author_email: Option<String>,

    #[serde(default = "default_branch")]
    pub default_branch: String,

    #[serde(default = "default_commit_message")]
    pub commit_message: String,
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_commit_message() -> String {
    "Initial commit".to_string()
}

impl Default for GitSection {
    fn default() -> Self {
        Self {
            author_username: None,
            author_email: None,
            default_branch: default_branch(),
            commit_message: default_commit_message(),
        }
    }
}

/// `[install]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct InstallSection {
    /// Dependency install command line, shell-split.
    #[serde(default = "default_install_command")]
    pub command: String,

    /// Script (run with `bash`) that exports requirement files.
    #[serde(default = "default_export_script")]
    pub export_script: String,
}

fn default_install_command() -> String {
    "poetry install".to_string()
}

fn default_export_script() -> String {
    "scripts/export_requirements.sh".to_string()
}

impl Default for InstallSection {
    fn default() -> Self {
        Self {
            command: default_install_command(),
            export_script: default_export_script(),
        }
    }
}

/// `[release]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseSection {
    #[serde(default = "default_release_script")]
    pub script: String,

    #[serde(default)]
    pub bump: ReleaseBump,

    /// Passed as the last argument to the release script.
    #[serde(default)]
    pub pypi_token: Option<String>,

    /// Leave the release step out of the plan entirely.
    #[serde(default)]
    pub skip: bool,
}

fn default_release_script() -> String {
    "scripts/release.sh".to_string()
}

impl Default for ReleaseSection {
    fn default() -> Self {
        Self {
            script: default_release_script(),
            bump: ReleaseBump::default(),
            pypi_token: None,
            skip: false,
        }
    }
}

/// `[behaviour]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BehaviourSection {
    #[serde(default)]
    pub failure_policy: FailurePolicy,
}

/// One `[[step]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct StepConfig {
    /// Banner printed before the command runs.
    pub message: String,

    /// Command line, shell-split.
    pub cmd: String,

    /// Working directory, relative to the project directory.
    #[serde(default)]
    pub cwd: Option<PathBuf>,
}
