use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Everything that may go wrong while fetching course data.
///
/// This is serializable so that a failed fetch on the server may be
/// transferred as part of the resource to the client during hydration,
/// which then renders the very same error view.
#[derive(Error, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum FetchError {
    /// The request could not be sent, timed out, or the server did not
    /// respond with a success status.
    #[error("network error: {0}")]
    Network(String),
    /// The response body was not valid JSON or lacked the expected field.
    #[error("parse error: {0}")]
    Parse(String),
    /// The credential was missing, or was rejected by the server.
    #[error("authentication error: {0}")]
    Auth(String),
}

/// The discriminant of a [`FetchError`], handy for matching in views.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchErrorKind {
    Network,
    Parse,
    Auth,
}

impl FetchError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    pub fn kind(&self) -> FetchErrorKind {
        match self {
            Self::Network(_) => FetchErrorKind::Network,
            Self::Parse(_) => FetchErrorKind::Parse,
            Self::Auth(_) => FetchErrorKind::Auth,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Network(format!("request timed out: {error}"))
        } else {
            Self::Network(error.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(error: serde_json::Error) -> Self {
        Self::Parse(error.to_string())
    }
}
