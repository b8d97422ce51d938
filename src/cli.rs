// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Command-line arguments for `postgen`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "postgen",
    version,
    about = "Bootstrap a freshly generated Python project: git, dependencies, release.",
    long_about = None
)]
pub struct CliArgs {
    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `--verbose`, `POSTGEN_LOG` or a default level is used.
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Shorthand for `--log-level debug`.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write logs to this file instead of stderr.
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Never colour console output.
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Run the post-generation bootstrap sequence.
    Run(RunArgs),

    /// Run a single command with classified, streamed output.
    Exec(ExecArgs),

    /// Check that a name is a valid Python module name.
    CheckName {
        /// Name to check, e.g. `my_package`.
        name: String,
    },
}

#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Directory of the generated project.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub project_dir: PathBuf,

    /// Path to the config file (TOML).
    ///
    /// Default: `postgen.toml` inside the project directory; a missing
    /// default file is not an error.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[arg(long, value_name = "NAME")]
    pub author_username: Option<String>,

    #[arg(long, value_name = "EMAIL")]
    pub author_email: Option<String>,

    /// Token handed to the release script (also read from `POSTGEN_PYPI_TOKEN`).
    #[arg(long, value_name = "TOKEN")]
    pub pypi_token: Option<String>,

    /// Leave the release script out.
    #[arg(long)]
    pub skip_release: bool,

    /// Stop at the first failed step and exit non-zero.
    #[arg(long)]
    pub abort_on_failure: bool,

    /// Print the plan without running anything.
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ExecArgs {
    /// Working directory for the command.
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Do not inherit the parent environment.
    #[arg(long)]
    pub clean_env: bool,

    /// Start the command in a new session, detached from this terminal.
    #[arg(long)]
    pub detach: bool,

    /// The command: one quoted string, or the program and its arguments.
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true, value_name = "CMD")]
    pub command: Vec<String>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exec_keeps_hyphenated_arguments() {
        let args =
            CliArgs::try_parse_from(["postgen", "exec", "--cwd", "/tmp", "--", "ls", "-la"]).unwrap();
        match args.command {
            CliCommand::Exec(exec) => {
                assert_eq!(exec.cwd, Some(PathBuf::from("/tmp")));
                assert_eq!(exec.command, vec!["ls", "-la"]);
            }
            other => panic!("expected exec, got {other:?}"),
        }
    }

    #[test]
    fn run_defaults_to_current_directory() {
        let args = CliArgs::try_parse_from(["postgen", "-v", "run", "--skip-release"]).unwrap();
        assert!(args.verbose);
        match args.command {
            CliCommand::Run(run) => {
                assert_eq!(run.project_dir, PathBuf::from("."));
                assert!(run.skip_release);
                assert!(!run.dry_run);
                assert!(run.config.is_none());
            }
            other => panic!("expected run, got {other:?}"),
        }
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        CliArgs::command().debug_assert();
    }
}
