use thiserror::Error;

/// Application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("Could not determine project directories")]
    NoProjectDirs,

    #[error("Malformed configuration: {reason}")]
    MalformedConfiguration { reason: String },

    #[error("'{command}' failed: {reason}")]
    CommandFailed { command: &'static str, reason: String },

    #[error("{operation} is not supported on this platform")]
    Unsupported { operation: &'static str },

    #[error("Discord IPC endpoint not found")]
    EndpointNotFound,

    #[error("Handshake rejected: {reason}")]
    HandshakeRejected { reason: String },

    #[error("Protocol error: {reason}")]
    Protocol { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Another instance is already running")]
    AlreadyRunning,
}

impl AppError {
    pub(crate) fn protocol(reason: impl Into<String>) -> Self {
        Self::Protocol {
            reason: reason.into(),
        }
    }
}

/// Check if an I/O error means the peer went away
pub fn is_disconnect(e: &AppError) -> bool {
    matches!(e, AppError::Io(err) if matches!(
        err.kind(),
        std::io::ErrorKind::BrokenPipe
            | std::io::ErrorKind::ConnectionReset
            | std::io::ErrorKind::ConnectionAborted
            | std::io::ErrorKind::UnexpectedEof
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_disconnect() {
        let broken = AppError::Io(std::io::Error::from(std::io::ErrorKind::BrokenPipe));
        assert!(is_disconnect(&broken));

        let other = AppError::Io(std::io::Error::from(std::io::ErrorKind::PermissionDenied));
        assert!(!is_disconnect(&other));
        assert!(!is_disconnect(&AppError::EndpointNotFound));
    }

    #[test]
    fn test_error_messages() {
        let e = AppError::Unsupported { operation: "open_url" };
        assert_eq!(e.to_string(), "open_url is not supported on this platform");

        let e = AppError::InvalidInput {
            field: "application id",
            reason: "must be numeric".into(),
        };
        assert_eq!(e.to_string(), "Invalid application id: must be numeric");
    }
}
