use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use postgen::bootstrap::Step;
use postgen::errors::ExecError;
use postgen::exec::{StepExecutor, StepOutcome};

/// A fake executor that:
/// - records the command of every step it is asked to run
/// - reports `Failed(NonZeroExit)` for commands listed in `failing`,
///   `Succeeded` for everything else.
pub struct FakeExecutor {
    executed: Arc<Mutex<Vec<String>>>,
    failing: HashSet<String>,
}

impl FakeExecutor {
    pub fn new(executed: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            executed,
            failing: HashSet::new(),
        }
    }

    /// Make the step whose command renders as `command` fail.
    pub fn failing_on(mut self, command: &str) -> Self {
        self.failing.insert(command.to_string());
        self
    }
}

impl StepExecutor for FakeExecutor {
    fn run_step<'a>(
        &'a mut self,
        step: &'a Step,
    ) -> Pin<Box<dyn Future<Output = StepOutcome> + Send + 'a>> {
        let executed = Arc::clone(&self.executed);
        let command = step.command.to_string();
        let fails = self.failing.contains(&command);

        Box::pin(async move {
            executed.lock().unwrap().push(command.clone());

            if fails {
                StepOutcome::Failed(ExecError::NonZeroExit { command, code: 1 })
            } else {
                StepOutcome::Succeeded
            }
        })
    }
}
