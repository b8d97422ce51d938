// src/main.rs

use std::process::ExitCode;

use postgen::{cli, logging, run};

// One single-threaded runtime for the whole program; drains and process
// waits interleave cooperatively on it.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run_main().await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("postgen error: {err:?}");
            ExitCode::FAILURE
        }
    }
}

async fn run_main() -> anyhow::Result<ExitCode> {
    let args = cli::parse();
    logging::init_logging(args.log_level, args.verbose, args.log_file.as_deref())?;
    run(args).await
}
