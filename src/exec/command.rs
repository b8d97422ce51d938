// src/exec/command.rs

//! The command to run and the options it runs with.

use std::fmt;
use std::path::PathBuf;

use crate::console::Console;
use crate::errors::ExecError;
use crate::exec::drain::{ClassifyingEcho, LineHandler};
use crate::exec::lexer;

/// A program and its arguments. Never empty.
///
/// Tokens registered with [`CommandLine::with_secret`] are passed to the
/// child unchanged but shown as `****` by `Display`, which is what every
/// console message, log field and error uses.
#[derive(Clone, PartialEq, Eq)]
pub struct CommandLine {
    tokens: Vec<String>,
    secrets: Vec<String>,
}

const REDACTED: &str = "****";

impl CommandLine {
    /// Tokenize a single pre-formed command string with shell quoting rules.
    pub fn parse(input: &str) -> Result<Self, ExecError> {
        Self::from_tokens(lexer::split(input)?)
    }

    /// Use already-split tokens verbatim.
    pub fn from_tokens<I, S>(tokens: I) -> Result<Self, ExecError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens: Vec<String> = tokens.into_iter().map(Into::into).collect();
        if tokens.is_empty() {
            return Err(ExecError::EmptyCommand);
        }
        Ok(Self {
            tokens,
            secrets: Vec::new(),
        })
    }

    /// Mask every token equal to `secret` when displayed. Empty secrets are
    /// ignored.
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        let secret = secret.into();
        if !secret.is_empty() {
            self.secrets.push(secret);
        }
        self
    }

    fn shown<'a>(&self, token: &'a str) -> &'a str {
        if self.secrets.iter().any(|s| s == token) {
            REDACTED
        } else {
            token
        }
    }

    /// Build from arguments as typed by a caller: a single argument is
    /// treated as a whole command line and shell-split, several arguments
    /// are taken as the tokens themselves.
    pub fn from_args(args: &[String]) -> Result<Self, ExecError> {
        match args {
            [single] => Self::parse(single),
            many => Self::from_tokens(many.iter().cloned()),
        }
    }

    pub fn program(&self) -> &str {
        &self.tokens[0]
    }

    pub fn args(&self) -> &[String] {
        &self.tokens[1..]
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, token) in self.tokens.iter().enumerate() {
            if idx > 0 {
                f.write_str(" ")?;
            }
            f.write_str(self.shown(token))?;
        }
        Ok(())
    }
}

impl fmt::Debug for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown: Vec<&str> = self.tokens.iter().map(|t| self.shown(t)).collect();
        f.debug_struct("CommandLine").field("tokens", &shown).finish()
    }
}

/// How a command is launched.
///
/// `Default` gives: caller's current directory, inherited environment, not
/// detached, and no explicit handlers. Missing handlers fall back to a
/// [`ClassifyingEcho`] on the console passed to [`launch`](super::launch).
#[derive(Default)]
pub struct LaunchOptions {
    /// Working directory of the child. `None` means the caller's current
    /// directory.
    pub working_dir: Option<PathBuf>,
    /// Start from a cleared environment instead of inheriting the parent's.
    pub clean_env: bool,
    /// Variables set on top of the (inherited or cleared) environment.
    pub envs: Vec<(String, String)>,
    /// Start the child in a new session (`setsid`) and let it outlive the
    /// handle.
    pub detach: bool,
    pub stdout_handler: Option<Box<dyn LineHandler>>,
    pub stderr_handler: Option<Box<dyn LineHandler>>,
}

impl fmt::Debug for LaunchOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LaunchOptions")
            .field("working_dir", &self.working_dir)
            .field("clean_env", &self.clean_env)
            .field("envs", &self.envs)
            .field("detach", &self.detach)
            .field("stdout_handler", &self.stdout_handler.is_some())
            .field("stderr_handler", &self.stderr_handler.is_some())
            .finish()
    }
}

impl LaunchOptions {
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: Some(dir.into()),
            ..Self::default()
        }
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    pub fn clean_env(mut self, clean: bool) -> Self {
        self.clean_env = clean;
        self
    }

    pub fn detached(mut self, detach: bool) -> Self {
        self.detach = detach;
        self
    }

    pub fn on_stdout(mut self, handler: impl LineHandler) -> Self {
        self.stdout_handler = Some(Box::new(handler));
        self
    }

    pub fn on_stderr(mut self, handler: impl LineHandler) -> Self {
        self.stderr_handler = Some(Box::new(handler));
        self
    }

    /// Resolve the working directory against the caller's current one.
    pub(crate) fn resolved_dir(&self) -> PathBuf {
        match &self.working_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    /// Take both handlers, defaulting to echoing onto `console`.
    pub(crate) fn take_handlers(
        &mut self,
        console: &Console,
    ) -> (Box<dyn LineHandler>, Box<dyn LineHandler>) {
        let stdout = self
            .stdout_handler
            .take()
            .unwrap_or_else(|| Box::new(ClassifyingEcho::new(console.clone())));
        let stderr = self
            .stderr_handler
            .take()
            .unwrap_or_else(|| Box::new(ClassifyingEcho::new(console.clone())));
        (stdout, stderr)
    }
}
