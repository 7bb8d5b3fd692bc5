use thiserror::Error;

/// Error types for hosted text-generation calls
#[derive(Debug, Error)]
pub enum InferenceError {
    /// No bearer token is configured for the inference host
    #[error("Inference API token is not configured")]
    MissingCredentials,

    /// Network error when communicating with the inference host
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// Transport error raised by the client middleware stack
    #[error("Middleware error: {0}")]
    MiddlewareError(String),

    /// The inference host answered with a non-success status
    #[error("Upstream status {status}: {body}")]
    UpstreamStatus {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The payload did not contain generated text
    #[error("Malformed inference payload: {0}")]
    MalformedPayload(String),

    /// The model produced nothing usable
    #[error("Model returned empty output")]
    EmptyOutput,

    /// The attempt did not finish within its time budget
    #[error("Model attempt timed out")]
    Timeout,
}

impl From<reqwest_middleware::Error> for InferenceError {
    fn from(err: reqwest_middleware::Error) -> Self {
        match err {
            reqwest_middleware::Error::Reqwest(err) => Self::NetworkError(err),
            reqwest_middleware::Error::Middleware(err) => Self::MiddlewareError(err.to_string()),
        }
    }
}
