//! Core error types and definitions

use std::sync::Arc;
use thiserror::Error;

/// Error type shared by every jwtkit operation
///
/// Cloning is cheap: the payload lives behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Error {
    pub(super) inner: Arc<ErrorInner>,
}

#[derive(Debug)]
pub(super) struct ErrorInner {
    /// The error kind
    pub kind: ErrorKind,
    /// Optional human readable context
    pub context: Option<String>,
    /// Underlying cause, kept for diagnostics
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

/// The kinds of failure a caller can match on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ErrorKind {
    /// Input is not valid base64 / base64url
    #[error("invalid encoding")]
    InvalidEncoding,

    /// PEM text has no recognizable marker pair or an invalid body
    #[error("malformed PEM")]
    MalformedPem,

    /// Token does not have three decodable segments
    #[error("malformed token")]
    MalformedToken,

    /// Claims are not a JSON object or array
    #[error("invalid payload")]
    InvalidPayload,

    /// The selected algorithm needs a secret or key that was not supplied
    #[error("missing credential")]
    MissingCredential,

    /// Unknown algorithm, or key material of the wrong type for it
    #[error("unsupported algorithm")]
    UnsupportedAlgorithm,

    /// The key is structurally valid but unusable for the operation
    #[error("invalid key")]
    InvalidKey,

    /// Key pair generation failed
    #[error("key generation failed")]
    KeyGenerationFailed,

    /// RSA-OAEP encryption or decryption failed
    #[error("cipher operation failed")]
    CipherOperationFailed,

    /// A background worker disappeared before reporting
    #[error("internal error")]
    Internal,
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;
