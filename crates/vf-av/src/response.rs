//! Caller-facing response shapes for [`TranscodeOutcome`].
//!
//! The HTTP layer frames these; this module only decides their content.

use serde_json::json;

use crate::models::TranscodeOutcome;

/// MIME type of every remuxed body.
pub const MP4_CONTENT_TYPE: &str = "video/mp4";

/// What the HTTP layer should send back.
#[derive(Debug, Clone, PartialEq)]
pub enum OutcomeResponse {
    /// Raw file body with download headers.
    Binary {
        content_type: &'static str,
        content_disposition: String,
        content_length: usize,
        body: Vec<u8>,
    },
    /// JSON document with a status code.
    Json {
        status: u16,
        body: serde_json::Value,
    },
}

impl OutcomeResponse {
    pub fn http_status(&self) -> u16 {
        match self {
            OutcomeResponse::Binary { .. } => 200,
            OutcomeResponse::Json { status, .. } => *status,
        }
    }
}

impl From<TranscodeOutcome> for OutcomeResponse {
    fn from(outcome: TranscodeOutcome) -> Self {
        match outcome {
            TranscodeOutcome::DirectLink { url, file_name } => OutcomeResponse::Json {
                status: 200,
                body: json!({
                    "success": true,
                    "directDownload": true,
                    "url": url,
                    "fileName": file_name,
                }),
            },
            TranscodeOutcome::Transcoded {
                bytes,
                file_name,
                byte_length,
            } => OutcomeResponse::Binary {
                content_type: MP4_CONTENT_TYPE,
                content_disposition: content_disposition(&file_name),
                content_length: byte_length,
                body: bytes,
            },
            TranscodeOutcome::Failed {
                reason,
                diagnostic,
                advisory,
            } => OutcomeResponse::Json {
                status: 502,
                body: json!({
                    "success": false,
                    "reason": reason,
                    "error": diagnostic,
                    "advisory": advisory,
                }),
            },
        }
    }
}

/// `Content-Disposition` value for an attachment named `file_name`.
///
/// Carries an ASCII-only `filename` for old clients and the exact name as an
/// RFC 5987 `filename*`.
pub fn content_disposition(file_name: &str) -> String {
    let ascii: String = file_name
        .chars()
        .map(|c| if c.is_ascii() && c != '"' && c != '\\' { c } else { '_' })
        .collect();
    let encoded = urlencoding::encode(file_name);
    format!("attachment; filename=\"{ascii}\"; filename*=UTF-8''{encoded}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisory::FallbackAdvisory;
    use crate::models::TranscodeFailureKind;

    #[test]
    fn direct_link_json() {
        let resp = OutcomeResponse::from(TranscodeOutcome::DirectLink {
            url: "https://cdn.example/movie.mp4".into(),
            file_name: "movie.mp4".into(),
        });
        assert_eq!(resp.http_status(), 200);
        let OutcomeResponse::Json { body, .. } = resp else {
            panic!("expected json");
        };
        assert_eq!(body["directDownload"], true);
        assert_eq!(body["success"], true);
        assert_eq!(body["url"], "https://cdn.example/movie.mp4");
        assert_eq!(body["fileName"], "movie.mp4");
    }

    #[test]
    fn transcoded_binary() {
        let resp = OutcomeResponse::from(TranscodeOutcome::Transcoded {
            bytes: vec![1, 2, 3],
            file_name: "My Clip.mp4".into(),
            byte_length: 3,
        });
        assert_eq!(resp.http_status(), 200);
        let OutcomeResponse::Binary {
            content_type,
            content_disposition,
            content_length,
            body,
        } = resp
        else {
            panic!("expected binary");
        };
        assert_eq!(content_type, "video/mp4");
        assert_eq!(content_length, 3);
        assert_eq!(body, vec![1, 2, 3]);
        assert_eq!(
            content_disposition,
            "attachment; filename=\"My Clip.mp4\"; filename*=UTF-8''My%20Clip.mp4"
        );
    }

    #[test]
    fn failed_json_carries_advisory() {
        let resp = OutcomeResponse::from(TranscodeOutcome::Failed {
            reason: TranscodeFailureKind::Timeout,
            diagnostic: "conversion timed out".into(),
            advisory: FallbackAdvisory::build("https://cdn.example/a.m3u8", "video.mp4"),
        });
        assert_eq!(resp.http_status(), 502);
        let OutcomeResponse::Json { body, .. } = resp else {
            panic!("expected json");
        };
        assert_eq!(body["success"], false);
        assert_eq!(body["reason"], "timeout");
        assert_eq!(body["error"], "conversion timed out");
        assert_eq!(body["advisory"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn unicode_disposition() {
        let value = content_disposition("Видео.mp4");
        assert!(value.starts_with("attachment; filename=\"_____.mp4\""));
        assert!(value.contains("filename*=UTF-8''%D0%92%D0%B8%D0%B4%D0%B5%D0%BE.mp4"));
    }
}
