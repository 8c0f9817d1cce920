//! Request and outcome types for the transcoding orchestrator.

use serde::{Deserialize, Serialize};

use crate::advisory::FallbackAdvisory;

/// Diagnostic attached to a [`TranscodeFailureKind::Timeout`] failure.
pub const TIMEOUT_DIAGNOSTIC: &str = "conversion timed out";

/// One download request. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscodeRequest {
    source_url: String,
    name_hint: Option<String>,
}

impl TranscodeRequest {
    /// Build a request, rejecting an empty or whitespace-only source URL.
    ///
    /// # Errors
    ///
    /// Returns [`vf_core::Error::Validation`] when `source_url` is blank.
    pub fn new(
        source_url: impl Into<String>,
        name_hint: Option<impl Into<String>>,
    ) -> vf_core::Result<Self> {
        let source_url = source_url.into();
        if source_url.trim().is_empty() {
            return Err(vf_core::Error::Validation(
                "source url is required".to_string(),
            ));
        }

        Ok(Self {
            source_url,
            name_hint: name_hint.map(Into::into),
        })
    }

    /// The source URL exactly as supplied.
    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    /// The caller's file name hint, unsanitized.
    pub fn name_hint(&self) -> Option<&str> {
        self.name_hint.as_deref()
    }
}

/// Why a transcode attempt failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranscodeFailureKind {
    /// The transcoder ran and exited unsuccessfully.
    NonZeroExit,
    /// The transcoder could not be started, or its output could not be used.
    ProcessSpawnError,
    /// The deadline elapsed and the transcoder was killed.
    Timeout,
}

impl std::fmt::Display for TranscodeFailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TranscodeFailureKind::NonZeroExit => "non_zero_exit",
            TranscodeFailureKind::ProcessSpawnError => "process_spawn_error",
            TranscodeFailureKind::Timeout => "timeout",
        };
        f.write_str(s)
    }
}

/// A failed transcoder run as seen by the process layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessFailure {
    pub kind: TranscodeFailureKind,
    /// Accumulated stderr, spawn error text, or the timeout message.
    pub diagnostic: String,
    /// Exit code, when the process exited normally.
    pub exit_code: Option<i32>,
}

impl ProcessFailure {
    pub fn non_zero_exit(diagnostic: impl Into<String>, exit_code: Option<i32>) -> Self {
        Self {
            kind: TranscodeFailureKind::NonZeroExit,
            diagnostic: diagnostic.into(),
            exit_code,
        }
    }

    pub fn spawn(diagnostic: impl Into<String>) -> Self {
        Self {
            kind: TranscodeFailureKind::ProcessSpawnError,
            diagnostic: diagnostic.into(),
            exit_code: None,
        }
    }

    pub fn timeout() -> Self {
        Self {
            kind: TranscodeFailureKind::Timeout,
            diagnostic: TIMEOUT_DIAGNOSTIC.to_string(),
            exit_code: None,
        }
    }
}

/// Result of one orchestrator invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscodeOutcome {
    /// Not a segmented stream; the caller can fetch `url` directly.
    DirectLink { url: String, file_name: String },
    /// The stream was remuxed; `bytes` holds the whole MP4 file.
    Transcoded {
        bytes: Vec<u8>,
        file_name: String,
        byte_length: usize,
    },
    /// The transcoder failed; `advisory` lists alternatives.
    Failed {
        reason: TranscodeFailureKind,
        diagnostic: String,
        advisory: FallbackAdvisory,
    },
}

impl TranscodeOutcome {
    /// The derived output file name, if the outcome carries one.
    pub fn file_name(&self) -> Option<&str> {
        match self {
            TranscodeOutcome::DirectLink { file_name, .. }
            | TranscodeOutcome::Transcoded { file_name, .. } => Some(file_name),
            TranscodeOutcome::Failed { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, TranscodeOutcome::Failed { .. })
    }
}
