//! Error types for the backend client.

use planner_grid::RequestError;
use planner_model::ModelError;
use thiserror::Error;

/// Errors that can occur while talking to the Plot Planner backend.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    /// The request never got a response.
    #[error("network error: {0}")]
    Network(String),

    /// The request took longer than the configured timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The backend answered with an error status.
    #[error("backend returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, usually a short message or an HTML error page.
        body: String,
    },

    /// The backend redirected to its login page or refused the session.
    #[error("not logged in: the session cookie is missing or has expired")]
    Unauthorized,

    /// The response body was not what the endpoint returns.
    #[error("could not decode response: {0}")]
    Decode(String),

    /// Invalid client settings.
    #[error("configuration error: {0}")]
    Config(String),

    /// The response decoded but its content was rejected.
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl ApiError {
    /// Returns a short message suitable for showing to a user.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Network(_) => "Could not reach the Plot Planner server. Is it running?",
            Self::Timeout(_) => "The Plot Planner server did not answer in time.",
            Self::Status { status, .. } if *status == 404 => "That item does not exist.",
            Self::Status { status, .. } if *status >= 500 => {
                "The Plot Planner server ran into an error."
            }
            Self::Status { .. } => "The Plot Planner server rejected the request.",
            Self::Unauthorized => "Log in again and update the session cookie.",
            Self::Config(_) => "The client configuration is invalid.",
            Self::Decode(_) | Self::Model(_) => "The server sent data this client cannot read.",
        }
    }

    /// Returns whether asking again might succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::Timeout(_) => true,
            Self::Status { status, .. } => *status >= 500,
            Self::Unauthorized | Self::Decode(_) | Self::Config(_) | Self::Model(_) => false,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else if err.is_builder() {
            Self::Config(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<ApiError> for RequestError {
    fn from(err: ApiError) -> Self {
        if err.is_retryable() {
            RequestError::retryable(err.to_string())
        } else {
            RequestError::new(err.to_string())
        }
    }
}

/// Result type alias for backend calls.
pub type Result<T> = std::result::Result<T, ApiError>;
