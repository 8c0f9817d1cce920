//! Process spawning seam.
//!
//! [`ProcessSpawner`] and [`ProcessHandle`] are the only place vidfetch touches
//! real OS processes. [`TokioSpawner`] is the production implementation;
//! tests substitute their own.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncRead;

/// Boxed stderr stream of a spawned process.
pub type StderrStream = Box<dyn AsyncRead + Send + Unpin>;

/// How a process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode {
    /// Exit code; `None` when the process was terminated by a signal.
    pub code: Option<i32>,
}

impl ExitCode {
    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {code}"),
            None => f.write_str("terminated by signal"),
        }
    }
}

/// A running child process.
#[async_trait]
pub trait ProcessHandle: Send {
    /// OS process id, if known.
    fn id(&self) -> Option<u32>;

    /// Take the stderr stream. Returns `None` on every call after the first.
    fn take_stderr(&mut self) -> Option<StderrStream>;

    /// Wait for the process to exit. Must be cancel-safe.
    async fn wait(&mut self) -> std::io::Result<ExitCode>;

    /// Forcibly terminate the process and reap it.
    async fn kill(&mut self) -> std::io::Result<()>;
}

/// Starts processes.
pub trait ProcessSpawner: Send + Sync {
    /// Spawn `program` with `args`, stdin closed and stderr piped.
    fn spawn(&self, program: &Path, args: &[String]) -> std::io::Result<Box<dyn ProcessHandle>>;
}

/// Spawns real processes with [`tokio::process::Command`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSpawner;

impl ProcessSpawner for TokioSpawner {
    fn spawn(&self, program: &Path, args: &[String]) -> std::io::Result<Box<dyn ProcessHandle>> {
        let child = tokio::process::Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        Ok(Box::new(TokioHandle { child }))
    }
}

struct TokioHandle {
    child: tokio::process::Child,
}

#[async_trait]
impl ProcessHandle for TokioHandle {
    fn id(&self) -> Option<u32> {
        self.child.id()
    }

    fn take_stderr(&mut self) -> Option<StderrStream> {
        self.child
            .stderr
            .take()
            .map(|s| Box::new(s) as StderrStream)
    }

    async fn wait(&mut self) -> std::io::Result<ExitCode> {
        let status = self.child.wait().await?;
        Ok(ExitCode {
            code: status.code(),
        })
    }

    async fn kill(&mut self) -> std::io::Result<()> {
        // Sends SIGKILL (TerminateProcess on Windows) and waits for the exit.
        self.child.kill().await
    }
}
