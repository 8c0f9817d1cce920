//! Builder for executing external tool commands under a hard deadline.

use std::path::PathBuf;
use std::time::Duration;

use tokio::io::AsyncReadExt;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::models::ProcessFailure;
use crate::process::{ExitCode, ProcessSpawner, StderrStream};

/// Default command timeout: 10 minutes.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(600);

/// Read size for the stderr collector.
const STDERR_CHUNK: usize = 8 * 1024;

/// Output captured from a successful tool execution.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Process exit status.
    pub status: ExitCode,
    /// Captured standard error (lossy UTF-8).
    pub stderr: String,
}

/// A builder for constructing and executing external tool invocations.
///
/// # Example
///
/// ```no_run
/// use std::path::PathBuf;
/// use std::time::Duration;
/// use vf_av::{TokioSpawner, ToolCommand};
///
/// # async fn example() {
/// let result = ToolCommand::new(PathBuf::from("ffmpeg"))
///     .args(["-i", "https://cdn.example/index.m3u8", "-c", "copy", "/tmp/out.mp4"])
///     .timeout(Duration::from_secs(60))
///     .execute(&TokioSpawner)
///     .await;
/// # let _ = result;
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: PathBuf,
    args: Vec<String>,
    timeout: Duration,
}

impl ToolCommand {
    /// Create a new command for the given program path.
    pub fn new(program: PathBuf) -> Self {
        Self {
            program,
            args: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Append a single argument.
    pub fn arg(&mut self, s: impl Into<String>) -> &mut Self {
        self.args.push(s.into());
        self
    }

    /// Append multiple arguments.
    pub fn args(&mut self, iter: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        self.args.extend(iter.into_iter().map(Into::into));
        self
    }

    /// Set the maximum execution time.
    pub fn timeout(&mut self, d: Duration) -> &mut Self {
        self.timeout = d;
        self
    }

    /// The argument list as it will be passed to the program.
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    fn program_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.program.to_string_lossy().to_string())
    }

    /// Spawn the command, collect stderr, and wait for it to exit or for the
    /// deadline to pass, whichever comes first.
    ///
    /// On timeout the process is killed and reaped before this returns, and
    /// whatever it would have produced is discarded.
    ///
    /// # Errors
    ///
    /// - [`TranscodeFailureKind::ProcessSpawnError`] if the process cannot be
    ///   started or waiting on it fails.
    /// - [`TranscodeFailureKind::NonZeroExit`] with the collected stderr if it
    ///   exits unsuccessfully.
    /// - [`TranscodeFailureKind::Timeout`] if the deadline elapses first.
    ///
    /// [`TranscodeFailureKind::ProcessSpawnError`]: crate::TranscodeFailureKind::ProcessSpawnError
    /// [`TranscodeFailureKind::NonZeroExit`]: crate::TranscodeFailureKind::NonZeroExit
    /// [`TranscodeFailureKind::Timeout`]: crate::TranscodeFailureKind::Timeout
    pub async fn execute(&self, spawner: &dyn ProcessSpawner) -> Result<ToolOutput, ProcessFailure> {
        let program_name = self.program_name();

        tracing::debug!("{program_name} args: {:?}", self.args);

        let mut child = spawner.spawn(&self.program, &self.args).map_err(|e| {
            tracing::warn!("failed to spawn {program_name}: {e}");
            ProcessFailure::spawn(format!("failed to spawn {program_name}: {e}"))
        })?;

        tracing::info!(
            pid = ?child.id(),
            timeout_secs = self.timeout.as_secs_f64(),
            "{program_name} started"
        );

        let deadline = Instant::now() + self.timeout;
        let collector = child.take_stderr().map(spawn_collector);

        let waited = tokio::select! {
            status = child.wait() => Some(status),
            _ = tokio::time::sleep_until(deadline) => None,
        };

        match waited {
            None => {
                tracing::warn!(
                    "{program_name} timed out after {:?}; killing pid {:?}",
                    self.timeout,
                    child.id()
                );
                if let Err(e) = child.kill().await {
                    tracing::warn!("failed to kill {program_name}: {e}");
                }
                if let Some(handle) = collector {
                    handle.abort();
                }
                Err(ProcessFailure::timeout())
            }
            Some(Err(e)) => {
                // The child may still be running; don't leave it behind.
                if let Err(kill_err) = child.kill().await {
                    tracing::warn!("failed to kill {program_name}: {kill_err}");
                }
                if let Some(handle) = collector {
                    handle.abort();
                }
                Err(ProcessFailure::spawn(format!(
                    "I/O error waiting for {program_name}: {e}"
                )))
            }
            Some(Ok(status)) => {
                let stderr = match collector {
                    Some(handle) => drain_stderr(handle, deadline, &program_name).await,
                    None => String::new(),
                };

                if status.success() {
                    tracing::info!("{program_name} finished ({status})");
                    return Ok(ToolOutput { status, stderr });
                }

                tracing::warn!("{program_name} failed ({status})");
                let diagnostic = if stderr.trim().is_empty() {
                    format!("{program_name} exited with {status}")
                } else {
                    stderr
                };
                Err(ProcessFailure::non_zero_exit(diagnostic, status.code))
            }
        }
    }
}

fn spawn_collector(stream: StderrStream) -> JoinHandle<String> {
    tokio::spawn(collect_stderr(stream))
}

/// Wait for the collector, but no later than `deadline`. A descendant that
/// inherited the pipe can hold it open after the tool itself has exited.
async fn drain_stderr(
    mut handle: JoinHandle<String>,
    deadline: Instant,
    program_name: &str,
) -> String {
    match tokio::time::timeout_at(deadline, &mut handle).await {
        Ok(collected) => collected.unwrap_or_default(),
        Err(_) => {
            tracing::warn!("{program_name} stderr still open at deadline; dropping it");
            handle.abort();
            String::new()
        }
    }
}

/// Drain `stream` chunk by chunk into one buffer. Not size-capped: the buffer
/// lives as long as the process does.
async fn collect_stderr(mut stream: StderrStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = vec![0u8; STDERR_CHUNK];

    loop {
        match stream.read(&mut chunk).await {
            Ok(0) => break,
            Ok(n) => {
                tracing::trace!("stderr: {}", String::from_utf8_lossy(&chunk[..n]).trim_end());
                buf.extend_from_slice(&chunk[..n]);
            }
            Err(e) => {
                tracing::debug!("stderr read failed: {e}");
                break;
            }
        }
    }

    String::from_utf8_lossy(&buf).into_owned()
}
