use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The API answered with a non-success status and an `{error}` body.
    #[error("{message} ({status})")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Session storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Not logged in")]
    NotAuthenticated,
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
