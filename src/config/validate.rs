// src/config/validate.rs

use crate::bootstrap::naming::validate_module_name;
use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{PostgenError, Result};
use crate::exec::CommandLine;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = PostgenError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw))
    }
}

/// Semantic checks on a deserialized config:
/// - `module_name`, if given, is a valid Python module name
/// - `author_email`, if given, looks like an address
/// - branch, scripts and install command are non-empty
/// - every `[[step]]` has a message and a command that tokenizes
fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    if let Some(name) = &cfg.project.module_name {
        validate_module_name(name)?;
    }
    validate_git(cfg)?;
    validate_install_and_release(cfg)?;
    validate_steps(cfg)?;
    Ok(())
}

fn validate_git(cfg: &RawConfigFile) -> Result<()> {
    if let Some(email) = &cfg.git.author_email {
        if !email.contains('@') {
            return Err(PostgenError::ConfigError(format!(
                "[git].author_email '{}' is not an email address",
                email
            )));
        }
    }
    if cfg.git.default_branch.trim().is_empty() {
        return Err(PostgenError::ConfigError(
            "[git].default_branch must not be empty".to_string(),
        ));
    }
    if cfg.git.commit_message.trim().is_empty() {
        return Err(PostgenError::ConfigError(
            "[git].commit_message must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_install_and_release(cfg: &RawConfigFile) -> Result<()> {
    CommandLine::parse(&cfg.install.command).map_err(|e| {
        PostgenError::ConfigError(format!("[install].command is not a valid command: {e}"))
    })?;

    for (field, value) in [
        ("[install].export_script", &cfg.install.export_script),
        ("[release].script", &cfg.release.script),
    ] {
        if value.trim().is_empty() {
            return Err(PostgenError::ConfigError(format!("{field} must not be empty")));
        }
    }
    Ok(())
}

fn validate_steps(cfg: &RawConfigFile) -> Result<()> {
    for (idx, step) in cfg.step.iter().enumerate() {
        if step.message.trim().is_empty() {
            return Err(PostgenError::ConfigError(format!(
                "[[step]] #{} has an empty message",
                idx + 1
            )));
        }
        CommandLine::parse(&step.cmd).map_err(|e| {
            PostgenError::ConfigError(format!(
                "[[step]] #{} ('{}') has an invalid cmd: {}",
                idx + 1,
                step.message,
                e
            ))
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::model::StepConfig;

    #[test]
    fn defaults_are_valid() {
        assert!(ConfigFile::try_from(RawConfigFile::default()).is_ok());
    }

    #[test]
    fn bad_email_is_rejected() {
        let mut raw = RawConfigFile::default();
        raw.git.author_email = Some("not-an-email".into());
        match ConfigFile::try_from(raw) {
            Err(PostgenError::ConfigError(msg)) => assert!(msg.contains("author_email")),
            other => panic!("expected ConfigError, got {other:?}"),
        }
    }

    #[test]
    fn step_with_unbalanced_quote_is_rejected() {
        let mut raw = RawConfigFile::default();
        raw.step.push(StepConfig {
            message: "Broken".into(),
            cmd: "echo 'oops".into(),
            cwd: None,
        });
        match ConfigFile::try_from(raw) {
            Err(PostgenError::ConfigError(msg)) => {
                assert!(msg.contains("#1"));
                assert!(msg.contains("Broken"));
            }
            other => panic!("expected ConfigError, got {other:?}"),
        }
    }

    #[test]
    fn invalid_module_name_is_rejected() {
        let mut raw = RawConfigFile::default();
        raw.project.module_name = Some("my-package".into());
        assert!(matches!(
            ConfigFile::try_from(raw),
            Err(PostgenError::InvalidModuleName(_))
        ));
    }
}
