// src/lib.rs

pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod console;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod types;

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::bootstrap::{Bootstrap, Step, build_plan, validate_module_name};
use crate::cli::{CliArgs, CliCommand, ExecArgs, RunArgs};
use crate::config::{
    ConfigFile, ConfigOverrides, default_config_path, load_and_validate, load_or_default,
};
use crate::console::Console;
use crate::exec::{CommandLine, LaunchOptions, ProcessExecutor, run_to_completion};
use crate::types::FailurePolicy;

/// High-level entry point used by `main.rs`.
///
/// Dispatches on the subcommand and turns the result into a process exit
/// code. Step failures are reported on the console; only configuration and
/// setup problems come back as `Err`.
pub async fn run(args: CliArgs) -> Result<ExitCode> {
    let console = Console::stdout(args.no_color);

    match args.command {
        CliCommand::Run(run_args) => run_bootstrap(run_args, &console).await,
        CliCommand::Exec(exec_args) => run_exec(exec_args, &console).await,
        CliCommand::CheckName { name } => Ok(check_name(&name, &console)),
    }
}

async fn run_bootstrap(args: RunArgs, console: &Console) -> Result<ExitCode> {
    let project_dir = std::fs::canonicalize(&args.project_dir)
        .with_context(|| format!("resolving project directory {:?}", args.project_dir))?;

    let config = load_config(args.config.as_deref(), &project_dir)?;
    let config = ConfigOverrides {
        author_username: args.author_username,
        author_email: args.author_email,
        pypi_token: args.pypi_token,
        skip_release: args.skip_release,
        abort_on_failure: args.abort_on_failure,
    }
    .apply(config)?;

    let plan = build_plan(&config, &project_dir)?;
    info!(project = %project_dir.display(), steps = plan.len(), "bootstrap plan ready");

    if args.dry_run {
        print_dry_run(&plan, &config, console);
        return Ok(ExitCode::SUCCESS);
    }

    let policy = config.behaviour.failure_policy;
    let mut bootstrap = Bootstrap::new(ProcessExecutor::new(console.clone()), console.clone(), policy);
    let summary = bootstrap.run(&plan).await;
    bootstrap.print_summary(&summary);

    if policy == FailurePolicy::Abort && !summary.all_succeeded() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// An explicit `--config` must exist; the default location may be absent.
fn load_config(explicit: Option<&Path>, project_dir: &Path) -> Result<ConfigFile> {
    let config = match explicit {
        Some(path) => load_and_validate(path)
            .with_context(|| format!("loading config file {:?}", path))?,
        None => {
            let path = default_config_path(project_dir);
            load_or_default(&path).with_context(|| format!("loading config file {:?}", path))?
        }
    };
    Ok(config)
}

async fn run_exec(args: ExecArgs, console: &Console) -> Result<ExitCode> {
    let command = CommandLine::from_args(&args.command)?;
    let options = LaunchOptions {
        working_dir: args.cwd,
        clean_env: args.clean_env,
        detach: args.detach,
        ..LaunchOptions::default()
    };

    let outcome = run_to_completion(&command, options, console).await;
    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn check_name(name: &str, console: &Console) -> ExitCode {
    match validate_module_name(name) {
        Ok(()) => {
            console.success(&format!("'{name}' is a valid Python module name."));
            ExitCode::SUCCESS
        }
        Err(e) => {
            console.error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

/// Print the plan without executing it. Secret tokens show as `****`.
fn print_dry_run(plan: &[Step], config: &ConfigFile, console: &Console) {
    console.plain("postgen dry-run");
    console.plain(&format!(
        "  behaviour.failure_policy = {:?}",
        config.behaviour.failure_policy
    ));
    console.plain("");
    console.plain(&format!("steps ({}):", plan.len()));

    for (idx, step) in plan.iter().enumerate() {
        console.plain(&format!("  {}. {}", idx + 1, step.message));
        console.plain(&format!("      cmd: {}", step.command));
        if let Some(dir) = &step.working_dir {
            console.plain(&format!("      cwd: {}", dir.display()));
        }
    }

    debug!("dry-run complete (no execution)");
}
