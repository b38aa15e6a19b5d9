//! Integration error types.

/// Errors raised while talking to an external service.
///
/// These never reach HTTP clients; the collaborators turn them into
/// fallbacks after logging.
#[derive(Debug, thiserror::Error)]
pub enum IntegrationError {
    /// Transport-level failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status from the remote service.
    #[error("service returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly truncated.
        body: String,
    },

    /// Response could not be interpreted.
    #[error("unusable response: {0}")]
    Parse(String),

    /// Required configuration is missing.
    #[error("not configured: {0}")]
    NotConfigured(&'static str),
}

impl IntegrationError {
    /// Builds a status error, truncating long bodies.
    pub(crate) fn status(status: reqwest::StatusCode, body: &str) -> Self {
        const MAX_BODY: usize = 512;
        let body = match body.char_indices().nth(MAX_BODY) {
            Some((cut, _)) => format!("{}...", &body[..cut]),
            None => body.to_string(),
        };
        Self::Status {
            status: status.as_u16(),
            body,
        }
    }
}
