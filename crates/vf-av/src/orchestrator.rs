//! Transcoding orchestrator.
//!
//! Turns one [`TranscodeRequest`] into one [`TranscodeOutcome`]: a direct
//! link for progressive sources, the remuxed bytes for HLS sources, or a
//! failure with a [`FallbackAdvisory`]. Transcoder failures never surface as
//! `Err`; only caller errors and internal errors do.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::advisory::FallbackAdvisory;
use crate::classify::is_segmented_stream;
use crate::models::{ProcessFailure, TranscodeFailureKind, TranscodeOutcome, TranscodeRequest};
use crate::naming::derive_file_name_or;
use crate::process::{ProcessSpawner, TokioSpawner};
use crate::remux::remux_hls;
use crate::tools::ToolRegistry;
use crate::workspace::ScratchFile;

/// Runs HLS remux requests. Holds no per-request state, so one instance can
/// serve concurrent requests.
#[derive(Clone)]
pub struct TranscodeOrchestrator {
    spawner: Arc<dyn ProcessSpawner>,
    ffmpeg: PathBuf,
    timeout: Duration,
    scratch_dir: PathBuf,
    default_name: String,
}

impl std::fmt::Debug for TranscodeOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranscodeOrchestrator")
            .field("ffmpeg", &self.ffmpeg)
            .field("timeout", &self.timeout)
            .field("scratch_dir", &self.scratch_dir)
            .field("default_name", &self.default_name)
            .finish_non_exhaustive()
    }
}

impl TranscodeOrchestrator {
    /// Create an orchestrator with an explicit spawner and ffmpeg path.
    pub fn new(
        spawner: Arc<dyn ProcessSpawner>,
        ffmpeg: PathBuf,
        config: &vf_core::config::TranscodeConfig,
    ) -> Self {
        Self {
            spawner,
            ffmpeg,
            timeout: config.timeout(),
            scratch_dir: config.resolved_scratch_dir(),
            default_name: config.default_file_name.clone(),
        }
    }

    /// Create an orchestrator that runs real processes, locating ffmpeg
    /// through the [`ToolRegistry`].
    pub fn from_config(config: &vf_core::config::Config) -> Self {
        let tools = ToolRegistry::discover(&config.tools);
        Self::new(
            Arc::new(TokioSpawner),
            tools.path_or_name("ffmpeg"),
            &config.transcode,
        )
    }

    /// Override the transcoder deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Validate `source_url` and run it.
    ///
    /// # Errors
    ///
    /// [`vf_core::Error::Validation`] for a blank URL, otherwise as
    /// [`TranscodeOrchestrator::run`].
    pub async fn run_url(
        &self,
        source_url: &str,
        name_hint: Option<&str>,
    ) -> vf_core::Result<TranscodeOutcome> {
        let request = TranscodeRequest::new(source_url, name_hint)?;
        self.run(&request).await
    }

    /// Run one request to completion.
    ///
    /// Any scratch file allocated for the request has been unlinked by the
    /// time this returns.
    ///
    /// # Errors
    ///
    /// Returns [`vf_core::Error::Internal`] if no scratch path can be
    /// allocated. Every transcoder failure is reported as
    /// [`TranscodeOutcome::Failed`] instead.
    pub async fn run(&self, request: &TranscodeRequest) -> vf_core::Result<TranscodeOutcome> {
        let source_url = request.source_url();
        let file_name = derive_file_name_or(request.name_hint(), &self.default_name);

        if !is_segmented_stream(source_url) {
            tracing::debug!("{source_url} is not an HLS playlist; returning direct link");
            return Ok(TranscodeOutcome::DirectLink {
                url: source_url.to_string(),
                file_name,
            });
        }

        let scratch = ScratchFile::allocate(&self.scratch_dir, &file_name)?;

        let outcome = match remux_hls(
            self.spawner.as_ref(),
            &self.ffmpeg,
            source_url,
            scratch.path(),
            self.timeout,
        )
        .await
        {
            Ok(_) => match scratch.read().await {
                Ok(bytes) => {
                    tracing::info!("remuxed {source_url} into {file_name} ({} bytes)", bytes.len());
                    TranscodeOutcome::Transcoded {
                        byte_length: bytes.len(),
                        bytes,
                        file_name,
                    }
                }
                Err(e) => {
                    tracing::warn!("remux output for {source_url} unreadable: {e}");
                    failed(
                        ProcessFailure {
                            kind: TranscodeFailureKind::ProcessSpawnError,
                            diagnostic: format!("output unreadable: {e}"),
                            exit_code: None,
                        },
                        source_url,
                        &file_name,
                    )
                }
            },
            Err(failure) => {
                tracing::warn!("remux of {source_url} failed: {}", failure.kind);
                failed(failure, source_url, &file_name)
            }
        };

        drop(scratch);
        Ok(outcome)
    }
}

fn failed(failure: ProcessFailure, source_url: &str, file_name: &str) -> TranscodeOutcome {
    TranscodeOutcome::Failed {
        reason: failure.kind,
        diagnostic: failure.diagnostic,
        advisory: FallbackAdvisory::build(source_url, file_name),
    }
}
