// src/exec/runner.rs

//! Run one command start to finish and tell the user how it went.

use std::path::PathBuf;

use tracing::warn;

use crate::console::Console;
use crate::errors::ExecError;
use crate::exec::command::{CommandLine, LaunchOptions};
use crate::exec::launch::launch;

/// Result of running a command through [`run_to_completion`].
#[derive(Debug)]
pub enum StepOutcome {
    Succeeded,
    Failed(ExecError),
}

impl StepOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, StepOutcome::Succeeded)
    }

    pub fn error(&self) -> Option<&ExecError> {
        match self {
            StepOutcome::Succeeded => None,
            StepOutcome::Failed(e) => Some(e),
        }
    }
}

/// Launch `command`, wait for it, and report the result on `console`.
///
/// Never returns an error: spawn failures, error lines and non-zero exits
/// are printed together with a yellow hint to re-run the command by hand,
/// and handed back as [`StepOutcome::Failed`].
pub async fn run_to_completion(
    command: &CommandLine,
    options: LaunchOptions,
    console: &Console,
) -> StepOutcome {
    let working_dir: PathBuf = options.resolved_dir();

    let result = match launch(command, options, console) {
        Ok(handle) => handle.wait().await.map(|_| ()),
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => {
            console.success(&format!(
                "Command {} ran successfully in {}.",
                command,
                working_dir.display()
            ));
            StepOutcome::Succeeded
        }
        Err(e) => {
            warn!(cmd = %command, cwd = %working_dir.display(), error = %e, "command failed");
            console.plain(&e.to_string());
            console.warning(&format!(
                "Failed to run command: {} in {}. You may need to re-run the command.",
                command,
                working_dir.display()
            ));
            StepOutcome::Failed(e)
        }
    }
}
