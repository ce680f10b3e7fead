use reqwest::StatusCode;

/// Failure of a single gateway call. Never accompanied by partial data.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The request could not be completed (DNS, refused connection, broken body).
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("Weather provider responded with status {status}: {body}")]
    Provider { status: StatusCode, body: String },

    #[error("Failed to decode provider response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Provider returned invalid data: {0}")]
    InvalidData(String),

    #[error("Location name must not be empty")]
    EmptyLocation,
}

impl GatewayError {
    pub fn is_network(&self) -> bool {
        matches!(self, GatewayError::Network(_))
    }

    /// HTTP status for provider errors.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            GatewayError::Provider { status, .. } => Some(*status),
            _ => None,
        }
    }
}
