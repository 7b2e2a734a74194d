use thiserror::Error;

/// Detail used when the service fails without saying why.
pub const GENERIC_FAILURE: &str = "Request failed";

/// A request that reached (or tried to reach) the service and did not succeed.
///
/// `Display` renders only the best available detail; callers add their own
/// workflow prefix.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestFailure {
    #[error("{detail}")]
    Status { status: u16, detail: String },

    #[error("{0}")]
    Transport(String),

    #[error("{0}")]
    Decode(String),
}

impl RequestFailure {
    /// Build a status failure from a non-success response body.
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = if body.trim().is_empty() {
            GENERIC_FAILURE.to_string()
        } else {
            body.to_string()
        };
        RequestFailure::Status { status, detail }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            RequestFailure::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RequestFailure {
    fn from(err: reqwest::Error) -> Self {
        RequestFailure::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for RequestFailure {
    fn from(err: serde_json::Error) -> Self {
        RequestFailure::Decode(err.to_string())
    }
}
