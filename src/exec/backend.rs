// src/exec/backend.rs

//! Pluggable step executor.
//!
//! The bootstrap driver hands each step to a `StepExecutor` instead of
//! spawning processes itself, so tests can substitute an executor that
//! records steps and returns canned outcomes.
//!
//! - `ProcessExecutor` is the production implementation; it runs each step
//!   through [`run_to_completion`].

use std::future::Future;
use std::pin::Pin;

use crate::bootstrap::Step;
use crate::console::Console;
use crate::exec::command::LaunchOptions;
use crate::exec::runner::{StepOutcome, run_to_completion};

/// Trait abstracting how a bootstrap step is executed.
pub trait StepExecutor: Send {
    fn run_step<'a>(
        &'a mut self,
        step: &'a Step,
    ) -> Pin<Box<dyn Future<Output = StepOutcome> + Send + 'a>>;
}

/// Runs steps as real child processes, echoing their output to a console.
#[derive(Debug, Clone)]
pub struct ProcessExecutor {
    console: Console,
    envs: Vec<(String, String)>,
}

impl ProcessExecutor {
    pub fn new(console: Console) -> Self {
        Self {
            console,
            envs: Vec::new(),
        }
    }

    /// Extra environment variables for every step.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }
}

impl StepExecutor for ProcessExecutor {
    fn run_step<'a>(
        &'a mut self,
        step: &'a Step,
    ) -> Pin<Box<dyn Future<Output = StepOutcome> + Send + 'a>> {
        let options = LaunchOptions {
            working_dir: step.working_dir.clone(),
            envs: self.envs.clone(),
            ..LaunchOptions::default()
        };

        Box::pin(async move { run_to_completion(&step.command, options, &self.console).await })
    }
}
