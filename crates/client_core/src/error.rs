use shared::error::ErrorCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid service endpoint '{url}': {source}")]
    InvalidEndpoint {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("failed to build http client: {0}")]
    Builder(#[source] reqwest::Error),
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server rejected request ({status}): {message}")]
    Rejected {
        status: u16,
        code: ErrorCode,
        message: String,
    },
    #[error("student service unavailable: {0}")]
    Unavailable(String),
}

impl ClientError {
    /// Text shown to the operator. Empty when the server gave no usable reason.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Rejected { message, .. } => message.clone(),
            ClientError::Unavailable(reason) => reason.clone(),
            other => other.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Rejected { status, .. } => Some(*status),
            ClientError::Transport(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }
}
