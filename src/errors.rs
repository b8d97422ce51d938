// src/errors.rs

//! Crate-wide error types and aliases.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while launching, draining or waiting on a single command.
#[derive(Error, Debug)]
pub enum ExecError {
    #[error("could not tokenize command {input:?}: {reason}")]
    Lex { input: String, reason: String },

    #[error("command is empty")]
    EmptyCommand,

    #[error("failed to spawn '{command}' in {}: {source}", .cwd.display())]
    Spawn {
        command: String,
        cwd: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{line}")]
    ErrorOutput { line: String },

    #[error("'{command}' exited with status {code}")]
    NonZeroExit { command: String, code: i32 },

    #[error("waiting for process failed: {0}")]
    Wait(#[source] std::io::Error),

    #[error("reading process output failed: {0}")]
    Drain(#[source] std::io::Error),
}

#[derive(Error, Debug)]
pub enum PostgenError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(
        "ERROR: '{0}' is not a valid Python module name! It must start with a letter or \
         underscore and contain only letters, digits and underscores (no spaces, hyphens, etc.)."
    )]
    InvalidModuleName(String),

    #[error(transparent)]
    Exec(#[from] ExecError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, PostgenError>;
