//! Error constructors and accessors

use super::types::{Error, ErrorInner, ErrorKind};
use std::fmt;
use std::sync::Arc;

impl Error {
    /// Create a new error with the given kind
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            inner: Arc::new(ErrorInner {
                kind,
                context: None,
                source: None,
            }),
        }
    }

    /// Create an error wrapping an underlying cause
    #[must_use]
    pub fn with_source<E>(kind: ErrorKind, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(ErrorInner {
                kind,
                context: None,
                source: Some(Box::new(source)),
            }),
        }
    }

    /// Attach context to this error, keeping kind and cause
    #[must_use]
    pub fn context<C: fmt::Display>(self, context: C) -> Self {
        match Arc::try_unwrap(self.inner) {
            Ok(mut inner) => {
                inner.context = Some(context.to_string());
                Self {
                    inner: Arc::new(inner),
                }
            }
            // Shared with a clone: chain the original as the cause
            Err(shared) => {
                let kind = shared.kind;
                Self {
                    inner: Arc::new(ErrorInner {
                        kind,
                        context: Some(context.to_string()),
                        source: Some(Box::new(Self { inner: shared })),
                    }),
                }
            }
        }
    }

    /// Get the error kind
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.inner.kind
    }

    /// Whether this error is of the given kind
    #[must_use]
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.inner.kind == kind
    }

    /// Get the error context if any
    #[must_use]
    pub fn get_context(&self) -> Option<&str> {
        self.inner.context.as_deref()
    }

    /// Create an invalid encoding error
    #[must_use]
    pub fn invalid_encoding() -> Self {
        Self::new(ErrorKind::InvalidEncoding)
    }

    /// Create a malformed PEM error
    #[must_use]
    pub fn malformed_pem() -> Self {
        Self::new(ErrorKind::MalformedPem)
    }

    /// Create a malformed token error
    #[must_use]
    pub fn malformed_token() -> Self {
        Self::new(ErrorKind::MalformedToken)
    }

    /// Create an invalid payload error
    #[must_use]
    pub fn invalid_payload() -> Self {
        Self::new(ErrorKind::InvalidPayload)
    }

    /// Create a missing credential error
    #[must_use]
    pub fn missing_credential() -> Self {
        Self::new(ErrorKind::MissingCredential)
    }

    /// Create an unsupported algorithm error
    #[must_use]
    pub fn unsupported_algorithm() -> Self {
        Self::new(ErrorKind::UnsupportedAlgorithm)
    }

    /// Create an invalid key error
    #[must_use]
    pub fn invalid_key() -> Self {
        Self::new(ErrorKind::InvalidKey)
    }

    /// Create a key generation error
    #[must_use]
    pub fn key_generation_failed() -> Self {
        Self::new(ErrorKind::KeyGenerationFailed)
    }

    /// Create a cipher error
    #[must_use]
    pub fn cipher_operation_failed() -> Self {
        Self::new(ErrorKind::CipherOperationFailed)
    }

    /// Create an internal error
    #[must_use]
    pub fn internal() -> Self {
        Self::new(ErrorKind::Internal)
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}
