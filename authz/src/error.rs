//! Error types for the authorizer.
//!
//! # Security Note
//! An unrecognized token and a recognized-but-denied token are deliberately
//! different outcomes: the former is an error (surfaced by the platform as a
//! server-side failure), the latter is a normal `Deny` decision.

use thiserror::Error;

/// Errors that can occur while producing an authorization decision.
#[derive(Debug, Error)]
pub enum AuthzError {
    /// The `auth` attribute was missing or did not match any known token.
    ///
    /// The offending value is never echoed back.
    #[error("Invalid token")]
    InvalidToken,

    /// The request carried no resource identifier to scope the policy to.
    #[error("Missing resource identifier")]
    MissingResource,

    /// An authorizer event could not be decoded.
    #[error("Malformed authorizer event: {0}")]
    MalformedEvent(#[from] serde_json::Error),
}

/// A specialized Result type for authorization operations.
pub type Result<T> = std::result::Result<T, AuthzError>;
