//! Scratch output files.
//!
//! A [`ScratchFile`] is an output path inside a private temporary directory
//! under the scratch root, owned by one orchestrator invocation. The file
//! itself is not created; only the tool writes it. Dropping the scratch file
//! makes exactly one best-effort attempt to remove the directory.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary output path that is removed on drop.
///
/// # Example
///
/// ```no_run
/// use vf_av::ScratchFile;
///
/// let scratch = ScratchFile::allocate(&std::env::temp_dir(), "clip.mp4").unwrap();
/// // ... let a tool write to scratch.path() ...
/// drop(scratch); // file is gone
/// ```
#[derive(Debug)]
pub struct ScratchFile {
    path: PathBuf,
    temp_dir: Option<TempDir>,
}

impl ScratchFile {
    /// Reserve a collision-free path in `dir` whose name is `file_name`.
    ///
    /// The scratch root is created if needed, then a fresh directory inside
    /// it, so concurrent invocations never share a path.
    ///
    /// # Errors
    ///
    /// Returns [`vf_core::Error::Internal`] if either directory cannot be
    /// created.
    pub fn allocate(dir: &Path, file_name: &str) -> vf_core::Result<Self> {
        std::fs::create_dir_all(dir).map_err(|e| {
            vf_core::Error::Internal(format!(
                "failed to create scratch dir {}: {e}",
                dir.display()
            ))
        })?;

        let temp_dir = tempfile::Builder::new()
            .prefix("vf-")
            .tempdir_in(dir)
            .map_err(|e| {
                vf_core::Error::Internal(format!(
                    "failed to create temp dir in {}: {e}",
                    dir.display()
                ))
            })?;

        let path = temp_dir.path().join(file_name);
        tracing::debug!("allocated scratch path {:?}", path);

        Ok(Self {
            path,
            temp_dir: Some(temp_dir),
        })
    }

    /// Path the tool should write to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full file contents.
    pub async fn read(&self) -> std::io::Result<Vec<u8>> {
        tokio::fs::read(self.path()).await
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        let Some(temp_dir) = self.temp_dir.take() else {
            return;
        };

        match temp_dir.close() {
            Ok(()) => tracing::debug!("removed scratch path {:?}", self.path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("scratch path {:?} already gone", self.path)
            }
            Err(e) => tracing::warn!("failed to remove scratch path {:?}: {e}", self.path),
        }
    }
}
