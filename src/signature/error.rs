use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by the signature generation backend.
pub enum SignatureError {
    /// Could not reach the backend endpoint.
    #[error("failed to reach signature backend at '{url}': {message}")]
    ConnectionFailed {
        /// Endpoint URL.
        url: String,
        /// Error message.
        message: String,
    },

    /// Backend answered with a non-success status.
    #[error("signature backend returned status {status} for '{file_path}'")]
    BackendStatus {
        /// HTTP status code.
        status: u16,
        /// Scan file the request was for.
        file_path: String,
    },

    /// Backend answered with a body we could not decode.
    #[error("invalid signature backend response: {reason}")]
    InvalidResponse {
        /// Decode failure description.
        reason: String,
    },
}
