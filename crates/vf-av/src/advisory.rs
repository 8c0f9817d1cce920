//! Fallback advisory returned when automated remuxing fails.
//!
//! The advisory is plain data derived from the source URL and the output file
//! name. Entry order is fixed so output is deterministic.

use serde::{Deserialize, Serialize};

/// One alternative-tool recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisoryEntry {
    pub tool_name: String,
    pub description: String,
    /// Ready-to-copy shell command, for tools that have one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install_hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Ordered list of alternative-tool recommendations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FallbackAdvisory {
    entries: Vec<AdvisoryEntry>,
}

impl FallbackAdvisory {
    /// Build the advisory for `source_url` saved as `file_name`.
    ///
    /// Both values are interpolated literally inside double quotes. Quote
    /// characters in the URL are not escaped in `command`; a consumer must
    /// rely on the structured encoding for field boundaries, not on the
    /// command text.
    pub fn build(source_url: &str, file_name: &str) -> Self {
        let entries = vec![
            AdvisoryEntry {
                tool_name: "yt-dlp".to_string(),
                description: "Command-line downloader that understands HLS playlists and merges segments automatically.".to_string(),
                command: Some(format!("yt-dlp -o \"{file_name}\" \"{source_url}\"")),
                install_hint: Some("pip install -U yt-dlp".to_string()),
                note: None,
            },
            AdvisoryEntry {
                tool_name: "ffmpeg".to_string(),
                description: "Remux the stream locally without re-encoding.".to_string(),
                command: Some(format!(
                    "ffmpeg -i \"{source_url}\" -c copy -bsf:a aac_adtstoasc -movflags +faststart \"{file_name}\""
                )),
                install_hint: Some("Download from https://ffmpeg.org/download.html".to_string()),
                note: None,
            },
            AdvisoryEntry {
                tool_name: "Internet Download Manager".to_string(),
                description: "Desktop download manager with HLS stream capture.".to_string(),
                command: None,
                install_hint: None,
                note: Some("Paste the playlist URL into a new download task.".to_string()),
            },
            AdvisoryEntry {
                tool_name: "Video DownloadHelper".to_string(),
                description: "Browser extension that detects and saves media streams.".to_string(),
                command: None,
                install_hint: None,
                note: Some("Open the page playing the video and pick the stream from the extension menu.".to_string()),
            },
        ];

        Self { entries }
    }

    pub fn entries(&self) -> &[AdvisoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AdvisoryEntry> {
        self.entries.iter()
    }
}
