//! Unified error type for vidfetch.
//!
//! Transcoder failures are not errors: the orchestrator reports them as
//! typed outcomes. [`Error`] covers what remains, namely caller mistakes,
//! tool lookup, I/O, and unexpected internal failures. The HTTP layer derives
//! a status code via [`Error::http_status`].

/// Unified error type covering the non-transcoding failure modes.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Request data failed validation (for example an empty source URL).
    #[error("Validation error: {0}")]
    Validation(String),

    /// An I/O operation failed.
    #[error("IO error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// An external tool could not be located or reported an error.
    #[error("Tool error [{tool}]: {message}")]
    Tool {
        /// Name of the tool that failed.
        tool: String,
        /// Human-readable error description.
        message: String,
    },

    /// Catch-all for unexpected internal errors.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Map this error to an appropriate HTTP status code.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::Validation(_) => 400,
            Error::Io { .. } => 500,
            Error::Tool { .. } => 502,
            Error::Internal(_) => 500,
        }
    }

    /// Whether the caller, rather than the server, is at fault.
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// Convenience constructor for [`Error::Tool`].
    pub fn tool(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Tool {
            tool: tool.into(),
            message: message.into(),
        }
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_display() {
        let err = Error::Validation("source url is required".into());
        assert_eq!(err.to_string(), "Validation error: source url is required");
        assert_eq!(err.http_status(), 400);
        assert!(err.is_caller_error());
    }

    #[test]
    fn io_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err = Error::from(io_err);
        assert!(matches!(err, Error::Io { .. }));
        assert_eq!(err.http_status(), 500);
        assert!(!err.is_caller_error());
    }

    #[test]
    fn tool_display() {
        let err = Error::tool("ffmpeg", "not found in PATH");
        assert_eq!(err.to_string(), "Tool error [ffmpeg]: not found in PATH");
        assert_eq!(err.http_status(), 502);
    }

    #[test]
    fn internal_display() {
        let err = Error::Internal("scratch dir unavailable".into());
        assert_eq!(err.to_string(), "Internal error: scratch dir unavailable");
        assert_eq!(err.http_status(), 500);
    }
}
