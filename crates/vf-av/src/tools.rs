//! External tool detection.
//!
//! The [`ToolRegistry`] discovers and caches the locations of ffmpeg and
//! yt-dlp and provides lookup methods for the rest of the crate.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Known tool names that the registry manages.
const KNOWN_TOOLS: &[&str] = &["ffmpeg", "yt-dlp"];

/// Availability information for a tool, returned by [`ToolRegistry::check_all`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    /// Tool name.
    pub name: String,
    /// Whether the tool was found.
    pub available: bool,
    /// Version string (first line of `--version` output), if available.
    pub version: Option<String>,
    /// Resolved path to the executable.
    pub path: Option<PathBuf>,
}

/// Registry holding discovered tool paths.
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: HashMap<String, PathBuf>,
}

impl ToolRegistry {
    /// Discover tools by searching `PATH` (or using overrides from config).
    ///
    /// A configured path is used when it exists; otherwise [`which::which`]
    /// locates the tool. Tools that are not found are omitted.
    pub fn discover(tools_config: &vf_core::config::ToolsConfig) -> Self {
        let mut tools = HashMap::new();

        for &name in KNOWN_TOOLS {
            let custom_path = match name {
                "ffmpeg" => tools_config.ffmpeg_path.as_deref(),
                "yt-dlp" => tools_config.ytdlp_path.as_deref(),
                _ => None,
            };

            let resolved = match custom_path {
                Some(p) if p.exists() => Some(p.to_path_buf()),
                Some(p) => {
                    tracing::warn!(
                        "configured {name} path {} does not exist; searching PATH",
                        p.display()
                    );
                    which::which(name).ok()
                }
                None => which::which(name).ok(),
            };

            match resolved {
                Some(path) => {
                    tracing::debug!("found {name} at {}", path.display());
                    tools.insert(name.to_string(), path);
                }
                None => tracing::debug!("{name} not found"),
            }
        }

        Self { tools }
    }

    /// Return the path of the given tool, or an [`vf_core::Error::Tool`] if it
    /// was not found during discovery.
    pub fn require(&self, name: &str) -> vf_core::Result<&Path> {
        self.tools.get(name).map(PathBuf::as_path).ok_or_else(|| {
            vf_core::Error::tool(name, format!("{name} not found; is it installed and in PATH?"))
        })
    }

    /// Path to use for `name`: the discovered one, or the bare name so that a
    /// missing binary shows up as a spawn error at run time.
    pub fn path_or_name(&self, name: &str) -> PathBuf {
        match self.require(name) {
            Ok(path) => path.to_path_buf(),
            Err(e) => {
                tracing::warn!("{e}; using bare name");
                PathBuf::from(name)
            }
        }
    }

    /// Check all known tools and return availability information.
    pub fn check_all(&self) -> Vec<ToolInfo> {
        KNOWN_TOOLS
            .iter()
            .map(|&name| match self.tools.get(name) {
                Some(path) => ToolInfo {
                    name: name.to_string(),
                    available: true,
                    version: detect_version(name, path),
                    path: Some(path.clone()),
                },
                None => ToolInfo {
                    name: name.to_string(),
                    available: false,
                    version: None,
                    path: None,
                },
            })
            .collect()
    }
}

/// Run `<tool> --version` (`-version` for ffmpeg) and return the first line
/// of stdout.
fn detect_version(name: &str, path: &Path) -> Option<String> {
    let version_arg = match name {
        "ffmpeg" => "-version",
        _ => "--version",
    };

    let output = std::process::Command::new(path)
        .arg(version_arg)
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()
        .map(|s| s.to_string())
}
