// src/exec/mod.rs

//! Process execution layer.
//!
//! Runs external commands with `tokio::process::Command`, streams their
//! output through line handlers, and reports how each command ended.
//!
//! - [`lexer`] splits a command string into words with shell quoting rules.
//! - [`command`] holds [`CommandLine`] and [`LaunchOptions`].
//! - [`drain`] reads output streams line by line and classifies lines.
//! - [`launch`] spawns the child and owns the [`ProcessHandle`].
//! - [`runner`] composes launch + wait into [`run_to_completion`].
//! - [`backend`] provides the `StepExecutor` seam used by the bootstrap
//!   driver, with `ProcessExecutor` as the real implementation.

pub mod backend;
pub mod command;
pub mod drain;
pub mod launch;
pub mod lexer;
pub mod runner;

pub use backend::{ProcessExecutor, StepExecutor};
pub use command::{CommandLine, LaunchOptions};
pub use drain::{ClassifyingEcho, CollectLines, Discard, LineClass, LineHandler, classify};
pub use launch::{ProcessHandle, launch};
pub use runner::{StepOutcome, run_to_completion};
