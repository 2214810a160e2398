//! Error types for remote model services.

use thiserror::Error;

/// Errors produced by embedding and language-model service calls.
///
/// The three variants are deliberately coarse: callers only need to tell
/// apart credential rejection (give up), throttling (back off and retry),
/// and any other service failure. The `provider` field names the backend
/// that produced the error.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The configured credential was rejected by the remote service.
    #[error("{provider}: authentication rejected: {message}")]
    Auth {
        /// The service that rejected the credential.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// The remote service throttled the request.
    ///
    /// Retry policy belongs to the caller, not to this crate.
    #[error("{provider}: rate limited: {message}")]
    RateLimit {
        /// The service that throttled the request.
        provider: String,
        /// A description of the failure.
        message: String,
    },

    /// Any other remote failure: transport errors, malformed responses,
    /// or non-auth, non-throttle HTTP error statuses.
    #[error("{provider}: {message}")]
    Service {
        /// The service that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },
}

impl ModelError {
    /// The name of the backend that produced this error.
    pub fn provider(&self) -> &str {
        match self {
            Self::Auth { provider, .. }
            | Self::RateLimit { provider, .. }
            | Self::Service { provider, .. } => provider,
        }
    }
}

/// A convenience result type for model-service operations.
pub type Result<T> = std::result::Result<T, ModelError>;
