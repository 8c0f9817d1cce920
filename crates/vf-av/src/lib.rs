//! # vf-av
//!
//! HLS download and remux orchestration for vidfetch.
//!
//! This crate provides:
//!
//! - **Tool discovery** ([`ToolRegistry`]) -- find ffmpeg and yt-dlp.
//! - **Process abstraction** ([`ProcessSpawner`], [`ProcessHandle`]) -- the
//!   narrow seam between orchestration logic and real OS processes.
//! - **Command execution** ([`ToolCommand`]) -- spawn, stream stderr, and race
//!   the exit against a hard deadline.
//! - **Scratch files** ([`ScratchFile`]) -- temporary output paths that are
//!   unlinked exactly once when dropped.
//! - **Orchestration** ([`TranscodeOrchestrator`]) -- direct link, remux, or
//!   failure with a [`FallbackAdvisory`].

pub mod advisory;
pub mod classify;
pub mod command;
pub mod models;
pub mod naming;
pub mod orchestrator;
pub mod process;
pub mod remux;
pub mod response;
pub mod tools;
pub mod workspace;

// ---- Re-exports for convenience ----

pub use advisory::{AdvisoryEntry, FallbackAdvisory};
pub use classify::is_segmented_stream;
pub use command::{ToolCommand, ToolOutput};
pub use models::{ProcessFailure, TranscodeFailureKind, TranscodeOutcome, TranscodeRequest};
pub use naming::{derive_file_name, derive_file_name_or, DEFAULT_BASE_NAME};
pub use orchestrator::TranscodeOrchestrator;
pub use process::{ExitCode, ProcessHandle, ProcessSpawner, TokioSpawner};
pub use response::OutcomeResponse;
pub use tools::{ToolInfo, ToolRegistry};
pub use workspace::ScratchFile;
