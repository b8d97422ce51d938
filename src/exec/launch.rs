// src/exec/launch.rs

//! Spawning a command and waiting on it.

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::process::{Child, Command};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, timeout_at};
use tracing::{debug, info, warn};

use crate::console::Console;
use crate::errors::ExecError;
use crate::exec::command::{CommandLine, LaunchOptions};
use crate::exec::drain::{LineHandler, drain};

type DrainTask = JoinHandle<Result<usize, ExecError>>;

/// How long the streams may keep delivering output once the child is gone.
/// A background process that inherited a pipe keeps it open past this.
const DRAIN_GRACE: Duration = Duration::from_secs(1);

/// A running child process whose stdout and stderr are already being
/// drained in the background.
///
/// Consumed by [`ProcessHandle::wait`], so each handle is waited on exactly
/// once.
#[derive(Debug)]
pub struct ProcessHandle {
    command: CommandLine,
    working_dir: PathBuf,
    detached: bool,
    child: Child,
    stdout_drain: Option<DrainTask>,
    stderr_drain: Option<DrainTask>,
    failures: mpsc::Receiver<String>,
    /// Set once `wait` has finished; later lines are read and dropped.
    muted: Arc<AtomicBool>,
}

/// Sits between a drain and the caller's handler for one stream.
///
/// Reports the first error line on the failure channel. Once the wait is
/// over, lines are still consumed but no longer handed on.
struct StreamGuard {
    inner: Box<dyn LineHandler>,
    failures: mpsc::Sender<String>,
    muted: Arc<AtomicBool>,
    /// Detached children keep writing after an error line; their pipe must
    /// stay open or they die of SIGPIPE.
    keep_reading: bool,
    failed: bool,
}

impl LineHandler for StreamGuard {
    fn handle_line(&mut self, line: &str) -> Result<(), ExecError> {
        if self.failed || self.muted.load(Ordering::Relaxed) {
            return Ok(());
        }
        match self.inner.handle_line(line) {
            Err(ExecError::ErrorOutput { line }) => {
                self.failed = true;
                // One report per stream fits the channel's capacity.
                let _ = self.failures.try_send(line.clone());
                if self.keep_reading {
                    Ok(())
                } else {
                    Err(ExecError::ErrorOutput { line })
                }
            }
            other => other,
        }
    }
}

/// Spawn `command` and start draining its output.
///
/// The working directory is handed to the child directly; the parent's
/// current directory is never touched. Returns as soon as the process has
/// started.
pub fn launch(
    command: &CommandLine,
    mut options: LaunchOptions,
    console: &Console,
) -> Result<ProcessHandle, ExecError> {
    let working_dir = options.resolved_dir();

    let mut std_cmd = std::process::Command::new(command.program());
    std_cmd
        .args(command.args())
        .current_dir(&working_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    if options.clean_env {
        std_cmd.env_clear();
    }
    for (key, value) in &options.envs {
        std_cmd.env(key, value);
    }

    #[cfg(unix)]
    if options.detach {
        use std::os::unix::process::CommandExt;
        // SAFETY: only `setsid`, which is async-signal-safe, runs between
        // fork and exec.
        unsafe {
            std_cmd.pre_exec(|| {
                if libc::setsid() == -1 {
                    return Err(std::io::Error::last_os_error());
                }
                Ok(())
            });
        }
    }

    let mut cmd = Command::from(std_cmd);
    cmd.kill_on_drop(!options.detach);

    debug!(
        cmd = %command,
        cwd = %working_dir.display(),
        clean_env = options.clean_env,
        detach = options.detach,
        "spawning process"
    );

    let mut child = cmd.spawn().map_err(|source| ExecError::Spawn {
        command: command.to_string(),
        cwd: working_dir.clone(),
        source,
    })?;

    let (stdout_handler, stderr_handler) = options.take_handlers(console);
    let (fail_tx, failures) = mpsc::channel::<String>(2);
    let muted = Arc::new(AtomicBool::new(false));

    let guard = |inner: Box<dyn LineHandler>| -> Box<dyn LineHandler> {
        Box::new(StreamGuard {
            inner,
            failures: fail_tx.clone(),
            muted: muted.clone(),
            keep_reading: options.detach,
            failed: false,
        })
    };
    let stdout_handler = guard(stdout_handler);
    let stderr_handler = guard(stderr_handler);

    let stdout_drain = child
        .stdout
        .take()
        .map(|out| spawn_drain("stdout", command, out, stdout_handler));
    let stderr_drain = child
        .stderr
        .take()
        .map(|err| spawn_drain("stderr", command, err, stderr_handler));

    Ok(ProcessHandle {
        command: command.clone(),
        working_dir,
        detached: options.detach,
        child,
        stdout_drain,
        stderr_drain,
        failures,
        muted,
    })
}

fn spawn_drain<R>(
    stream: &'static str,
    command: &CommandLine,
    reader: R,
    handler: Box<dyn LineHandler>,
) -> DrainTask
where
    R: tokio::io::AsyncRead + Unpin + Send + 'static,
{
    let cmd = command.to_string();
    tokio::spawn(async move {
        let result = drain(reader, handler).await;
        match &result {
            Ok(lines) => debug!(cmd = %cmd, stream, lines, "drain finished"),
            Err(ExecError::ErrorOutput { .. }) => debug!(cmd = %cmd, stream, "drain stopped at error line"),
            Err(e) => warn!(cmd = %cmd, stream, error = %e, "drain failed"),
        }
        result
    })
}

impl ProcessHandle {
    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }

    pub fn command(&self) -> &CommandLine {
        &self.command
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Wait until the process exits or one of its streams reports an error
    /// line, whichever comes first.
    ///
    /// - An error line kills the child (unless detached) and is returned as
    ///   [`ExecError::ErrorOutput`] even if the exit status would have been 0.
    ///   A detached child is left running with its output read and dropped.
    /// - After the child exits, the drains get a short grace period to
    ///   deliver what is left. A stream still held open by a background
    ///   process does not keep this waiting.
    /// - No output is printed after this returns.
    /// - A non-zero exit status is [`ExecError::NonZeroExit`].
    pub async fn wait(mut self) -> Result<ExitStatus, ExecError> {
        let exited = tokio::select! {
            status = self.child.wait() => Ok(status),
            Some(line) = self.failures.recv() => Err(line),
        };

        let status = match exited {
            Err(line) => {
                self.stop_after_error_line().await;
                return Err(ExecError::ErrorOutput { line });
            }
            Ok(Err(e)) => {
                self.settle_drains(Duration::ZERO).await;
                return Err(ExecError::Wait(e));
            }
            Ok(Ok(status)) => status,
        };

        self.settle_drains(DRAIN_GRACE).await;
        if let Ok(line) = self.failures.try_recv() {
            return Err(ExecError::ErrorOutput { line });
        }

        let code = status.code().unwrap_or(-1);
        info!(
            cmd = %self.command,
            cwd = %self.working_dir.display(),
            exit_code = code,
            success = status.success(),
            "process exited"
        );

        if status.success() {
            Ok(status)
        } else {
            Err(ExecError::NonZeroExit {
                command: self.command.to_string(),
                code,
            })
        }
    }

    async fn stop_after_error_line(&mut self) {
        if self.detached {
            debug!(cmd = %self.command, "error line from detached process; leaving it running");
            self.settle_drains(Duration::ZERO).await;
            return;
        }
        if let Err(e) = self.child.kill().await {
            // Most likely the process already exited on its own.
            debug!(cmd = %self.command, error = %e, "could not kill process after error line");
        }
        self.settle_drains(DRAIN_GRACE).await;
    }

    /// Join the drains until `grace` runs out, then mute whatever is still
    /// reading. Muted drains keep consuming their pipe until it closes.
    async fn settle_drains(&mut self, grace: Duration) {
        let deadline = Instant::now() + grace;
        for slot in [&mut self.stdout_drain, &mut self.stderr_drain] {
            let Some(task) = slot.as_mut() else {
                continue;
            };
            match timeout_at(deadline, task).await {
                Ok(Ok(_)) => *slot = None,
                Ok(Err(join_err)) => {
                    warn!(cmd = %self.command, error = %join_err, "drain task panicked");
                    *slot = None;
                }
                Err(_) => {}
            }
        }

        self.muted.store(true, Ordering::Relaxed);
        if self.stdout_drain.is_some() || self.stderr_drain.is_some() {
            debug!(
                cmd = %self.command,
                "output still open after the wait; another process holds the pipe"
            );
        }
    }
}
