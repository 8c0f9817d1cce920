//! Application configuration types.
//!
//! The top-level [`Config`] struct is deserialized from JSON and carries the
//! tool and transcode sub-configs. Every section defaults sensibly so a
//! completely empty `{}` file is valid.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Result;
use crate::Error;

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tools: ToolsConfig,
    pub transcode: TranscodeConfig,
}

impl Config {
    /// Deserialize a `Config` from a JSON string.
    pub fn from_json(json_str: &str) -> Result<Self> {
        serde_json::from_str(json_str)
            .map_err(|e| Error::Validation(format!("config parse error: {e}")))
    }

    /// Read and parse a config file, failing on any I/O or parse error.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Load configuration from a file path, falling back to defaults if the
    /// path is `None` or the file does not exist.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_json(&contents).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse config file {}: {e}", path.display());
                Self::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No config file at {}; using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                tracing::warn!("Failed to read config file {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Return a list of validation warnings (non-fatal issues).
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.transcode.timeout_secs == 0 {
            warnings.push(
                "transcode.timeout_secs is 0; every conversion will time out immediately".into(),
            );
        }

        let name = self.transcode.default_file_name.trim();
        if name.is_empty() {
            warnings.push("transcode.default_file_name is empty".into());
        } else if !name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == ' ')
        {
            warnings.push(format!(
                "transcode.default_file_name '{name}' contains characters that will be stripped"
            ));
        }

        if let Some(ref dir) = self.transcode.scratch_dir {
            if dir.is_file() {
                warnings.push(format!(
                    "transcode.scratch_dir {} is a file, not a directory",
                    dir.display()
                ));
            }
        }

        for (key, path) in [
            ("tools.ffmpeg_path", &self.tools.ffmpeg_path),
            ("tools.ytdlp_path", &self.tools.ytdlp_path),
        ] {
            if let Some(p) = path {
                if !p.exists() {
                    warnings.push(format!(
                        "{key} {} does not exist; falling back to PATH lookup",
                        p.display()
                    ));
                }
            }
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// Paths to external CLI tools.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub ffmpeg_path: Option<PathBuf>,
    pub ytdlp_path: Option<PathBuf>,
}

/// HLS transcoding settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscodeConfig {
    /// Hard deadline for one transcoder run, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Directory that holds temporary output files. `None` means a `vidfetch`
    /// directory under the system temp dir.
    pub scratch_dir: Option<PathBuf>,
    /// Base name used when the caller gives no usable name hint.
    #[serde(default = "default_file_name")]
    pub default_file_name: String,
}

fn default_timeout_secs() -> u64 {
    600
}
fn default_file_name() -> String {
    "video".into()
}

impl Default for TranscodeConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            scratch_dir: None,
            default_file_name: default_file_name(),
        }
    }
}

impl TranscodeConfig {
    /// The transcoder deadline as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The scratch directory, resolved against the system temp dir when unset.
    pub fn resolved_scratch_dir(&self) -> PathBuf {
        self.scratch_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("vidfetch"))
    }
}
