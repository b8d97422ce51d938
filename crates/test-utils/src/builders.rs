#![allow(dead_code)]

use std::path::PathBuf;

use postgen::bootstrap::Step;
use postgen::config::{ConfigFile, RawConfigFile, StepConfig};
use postgen::exec::CommandLine;
use postgen::types::{FailurePolicy, ReleaseBump};

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn author(mut self, username: &str, email: &str) -> Self {
        self.config.git.author_username = Some(username.to_string());
        self.config.git.author_email = Some(email.to_string());
        self
    }

    pub fn module_name(mut self, name: &str) -> Self {
        self.config.project.module_name = Some(name.to_string());
        self
    }

    pub fn install_command(mut self, cmd: &str) -> Self {
        self.config.install.command = cmd.to_string();
        self
    }

    pub fn pypi_token(mut self, token: &str) -> Self {
        self.config.release.pypi_token = Some(token.to_string());
        self
    }

    pub fn release_bump(mut self, bump: ReleaseBump) -> Self {
        self.config.release.bump = bump;
        self
    }

    pub fn skip_release(mut self) -> Self {
        self.config.release.skip = true;
        self
    }

    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.config.behaviour.failure_policy = policy;
        self
    }

    pub fn with_step(mut self, message: &str, cmd: &str) -> Self {
        self.config.step.push(StepConfig {
            message: message.to_string(),
            cmd: cmd.to_string(),
            cwd: None,
        });
        self
    }

    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `Step`.
pub struct StepBuilder {
    message: String,
    command: String,
    working_dir: Option<PathBuf>,
}

impl StepBuilder {
    pub fn new(command: &str) -> Self {
        Self {
            message: format!("Running {command}..."),
            command: command.to_string(),
            working_dir: None,
        }
    }

    pub fn message(mut self, message: &str) -> Self {
        self.message = message.to_string();
        self
    }

    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn build(self) -> Step {
        let command = CommandLine::parse(&self.command).expect("test command must tokenize");
        let step = Step::new(self.message, command);
        match self.working_dir {
            Some(dir) => step.in_dir(dir),
            None => step,
        }
    }
}
