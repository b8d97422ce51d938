// src/bootstrap/plan.rs

//! The sequence of steps that bootstraps a freshly generated project.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::config::ConfigFile;
use crate::errors::Result;
use crate::exec::CommandLine;

/// One unit of work in the bootstrap sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Banner shown before the command runs.
    pub message: String,
    pub command: CommandLine,
    /// `None` runs in the caller's current directory.
    pub working_dir: Option<PathBuf>,
}

impl Step {
    pub fn new(message: impl Into<String>, command: CommandLine) -> Self {
        Self {
            message: message.into(),
            command,
            working_dir: None,
        }
    }

    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }
}

/// The steps to run for `project_dir`: the config's `[[step]]` list when it
/// has one, otherwise [`default_plan`].
pub fn build_plan(config: &ConfigFile, project_dir: &Path) -> Result<Vec<Step>> {
    if config.step.is_empty() {
        return default_plan(config, project_dir);
    }

    config
        .step
        .iter()
        .map(|s| -> Result<Step> {
            let dir = match &s.cwd {
                Some(cwd) => project_dir.join(cwd),
                None => project_dir.to_path_buf(),
            };
            Ok(Step::new(s.message.clone(), CommandLine::parse(&s.cmd)?).in_dir(dir))
        })
        .collect()
}

/// The standard sequence:
///
/// 1. `git init` and git identity/branch config, only if `.git` is missing
/// 2. dependency install
/// 3. requirement export
/// 4. `git add .` and the initial commit
/// 5. the release script, unless skipped
pub fn default_plan(config: &ConfigFile, project_dir: &Path) -> Result<Vec<Step>> {
    let mut steps = Vec::new();
    let step = |message: &str, tokens: Vec<String>| -> Result<Step> {
        Ok(Step::new(message, CommandLine::from_tokens(tokens)?).in_dir(project_dir))
    };

    if !project_dir.join(".git").exists() {
        steps.push(step("Initialising git repository...", argv(&["git", "init"]))?);

        match &config.git.author_username {
            Some(user) => steps.push(step(
                "Configuring git user name...",
                argv(&["git", "config", "user.name", user.as_str()]),
            )?),
            None => warn!("no git author username configured; skipping user.name"),
        }
        match &config.git.author_email {
            Some(email) => steps.push(step(
                "Configuring git user email...",
                argv(&["git", "config", "user.email", email.as_str()]),
            )?),
            None => warn!("no git author email configured; skipping user.email"),
        }

        steps.push(step(
            "Configuring default git branch name...",
            argv(&["git", "config", "init.defaultBranch", config.git.default_branch.as_str()]),
        )?);
    }

    steps.push(
        Step::new(
            "Creating virtual environment and installing dependencies...",
            CommandLine::parse(&config.install.command)?,
        )
        .in_dir(project_dir),
    );
    steps.push(step(
        "Exporting requirements to files...",
        argv(&["bash", config.install.export_script.as_str()]),
    )?);
    steps.push(step(
        "Adding changes to the git repository...",
        argv(&["git", "add", "."]),
    )?);
    steps.push(step(
        "Committing changes to the git repository...",
        argv(&["git", "commit", "-m", config.git.commit_message.as_str()]),
    )?);

    if !config.release.skip {
        let mut release = argv(&["bash", config.release.script.as_str(), config.release.bump.as_str()]);
        let command_line = match &config.release.pypi_token {
            Some(token) => {
                release.push(token.clone());
                CommandLine::from_tokens(release)?.with_secret(token.clone())
            }
            None => CommandLine::from_tokens(release)?,
        };
        steps.push(Step::new("Running the release script...", command_line).in_dir(project_dir));
    }

    Ok(steps)
}

fn argv(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RawConfigFile, StepConfig};

    fn commands(steps: &[Step]) -> Vec<String> {
        steps.iter().map(|s| s.command.to_string()).collect()
    }

    #[test]
    fn fresh_project_gets_the_full_sequence() {
        let dir = tempfile::tempdir().unwrap();
        let mut raw = RawConfigFile::default();
        raw.git.author_username = Some("jane".into());
        raw.git.author_email = Some("jane@example.com".into());
        raw.release.pypi_token = Some("tok".into());
        let cfg = ConfigFile::try_from(raw).unwrap();

        let steps = default_plan(&cfg, dir.path()).unwrap();
        assert_eq!(
            commands(&steps),
            vec![
                "git init",
                "git config user.name jane",
                "git config user.email jane@example.com",
                "git config init.defaultBranch main",
                "poetry install",
                "bash scripts/export_requirements.sh",
                "git add .",
                "git commit -m Initial commit",
                "bash scripts/release.sh minor ****",
            ]
        );
        assert_eq!(steps[8].command.args().last().map(String::as_str), Some("tok"));
        assert!(steps.iter().all(|s| s.working_dir.as_deref() == Some(dir.path())));
        assert_eq!(steps[7].command.args(), ["commit", "-m", "Initial commit"]);
    }

    #[test]
    fn existing_repository_skips_git_setup() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(".git")).unwrap();
        let steps = default_plan(&ConfigFile::default(), dir.path()).unwrap();
        assert_eq!(steps[0].command.to_string(), "poetry install");
        assert!(!commands(&steps).iter().any(|c| c.starts_with("git init")));
    }

    #[test]
    fn missing_identity_and_skip_release_shrink_the_plan() {
        let dir = tempfile::tempdir().unwrap();
        let mut raw = RawConfigFile::default();
        raw.release.skip = true;
        let cfg = ConfigFile::try_from(raw).unwrap();

        let steps = default_plan(&cfg, dir.path()).unwrap();
        let cmds = commands(&steps);
        assert!(!cmds.iter().any(|c| c.contains("user.name") || c.contains("user.email")));
        assert!(!cmds.iter().any(|c| c.contains("release.sh")));
        assert_eq!(cmds.len(), 6);
    }

    #[test]
    fn custom_steps_replace_the_default_plan() {
        let dir = tempfile::tempdir().unwrap();
        let mut raw = RawConfigFile::default();
        raw.step.push(StepConfig {
            message: "Say hi".into(),
            cmd: "echo 'hello world'".into(),
            cwd: Some("sub".into()),
        });
        let cfg = ConfigFile::try_from(raw).unwrap();

        let steps = build_plan(&cfg, dir.path()).unwrap();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].command.tokens(), ["echo", "hello world"]);
        assert_eq!(steps[0].working_dir, Some(dir.path().join("sub")));
    }
}
