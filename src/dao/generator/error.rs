//! Error types raised by completion backends.

use reqwest::StatusCode;
use thiserror::Error;

/// Convenient result alias returning [`GeneratorError`] failures.
pub type GeneratorResult<T> = Result<T, GeneratorError>;

/// Failures that can occur while talking to the completion API.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// No API key was configured.
    #[error("OPENAI_API_KEY is not configured")]
    MissingCredential,
    /// Building the HTTP client failed (invalid TLS setup, etc).
    #[error("failed to build completion client")]
    ClientBuilder {
        /// Underlying reqwest failure.
        #[source]
        source: reqwest::Error,
    },
    /// The request could not be sent or the connection dropped.
    #[error("failed to send completion request to `{url}`")]
    RequestSend {
        /// Endpoint that was called.
        url: String,
        /// Underlying reqwest failure.
        #[source]
        source: reqwest::Error,
    },
    /// The API answered with a non-success status.
    #[error("completion API returned status {status}: {body}")]
    RequestStatus {
        /// HTTP status of the answer.
        status: StatusCode,
        /// Raw response body, kept for diagnostics.
        body: String,
    },
    /// Response payload could not be parsed into JSON.
    #[error("failed to decode completion response")]
    DecodeResponse {
        /// Underlying reqwest failure.
        #[source]
        source: reqwest::Error,
    },
    /// Response parsed but carried no choice.
    #[error("completion response contained no choices")]
    NoChoices,
}
