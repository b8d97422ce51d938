// src/bootstrap/driver.rs

//! Strictly sequential execution of a bootstrap plan.

use tracing::{debug, info, warn};

use crate::bootstrap::plan::Step;
use crate::console::Console;
use crate::exec::{StepExecutor, StepOutcome};
use crate::types::FailurePolicy;

/// What happened to one executed step.
#[derive(Debug)]
pub struct StepReport {
    pub message: String,
    pub command: String,
    pub outcome: StepOutcome,
}

/// Every executed step, in order, plus how many were never started.
#[derive(Debug, Default)]
pub struct BootstrapSummary {
    pub reports: Vec<StepReport>,
    /// Steps left out because an earlier one failed under `Abort`.
    pub not_run: usize,
}

impl BootstrapSummary {
    pub fn failed(&self) -> impl Iterator<Item = &StepReport> {
        self.reports.iter().filter(|r| !r.outcome.is_success())
    }

    pub fn failed_count(&self) -> usize {
        self.failed().count()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed_count() == 0 && self.not_run == 0
    }
}

/// Runs steps one after another through a [`StepExecutor`].
pub struct Bootstrap<E: StepExecutor> {
    executor: E,
    console: Console,
    policy: FailurePolicy,
}

impl<E: StepExecutor> Bootstrap<E> {
    pub fn new(executor: E, console: Console, policy: FailurePolicy) -> Self {
        Self {
            executor,
            console,
            policy,
        }
    }

    /// Execute `steps` in order. Step N+1 never starts before step N has
    /// finished. Under [`FailurePolicy::Continue`] a failed step is reported
    /// and the next one runs anyway.
    pub async fn run(&mut self, steps: &[Step]) -> BootstrapSummary {
        let mut summary = BootstrapSummary::default();
        info!(steps = steps.len(), policy = ?self.policy, "starting bootstrap");

        for (idx, step) in steps.iter().enumerate() {
            self.console.info(&step.message);
            debug!(step = idx + 1, cmd = %step.command, "running step");

            let outcome = self.executor.run_step(step).await;
            let failed = !outcome.is_success();

            summary.reports.push(StepReport {
                message: step.message.clone(),
                command: step.command.to_string(),
                outcome,
            });

            if failed && self.policy == FailurePolicy::Abort {
                summary.not_run = steps.len() - idx - 1;
                warn!(
                    step = idx + 1,
                    not_run = summary.not_run,
                    "step failed; aborting bootstrap"
                );
                break;
            }
        }

        info!(
            executed = summary.reports.len(),
            failed = summary.failed_count(),
            "bootstrap finished"
        );
        summary
    }

    /// Print a closing overview of failed steps, if any.
    pub fn print_summary(&self, summary: &BootstrapSummary) {
        if summary.all_succeeded() {
            self.console
                .success(&format!("All {} bootstrap steps completed.", summary.reports.len()));
            return;
        }

        for report in summary.failed() {
            self.console
                .warning(&format!("Step '{}' failed: {}", report.message, report.command));
        }
        if summary.not_run > 0 {
            self.console.warning(&format!(
                "{} step(s) were not run because the bootstrap was aborted.",
                summary.not_run
            ));
        }
    }

    pub fn into_executor(self) -> E {
        self.executor
    }
}
