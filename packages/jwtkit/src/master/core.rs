//! Core Master Builder
//!
//! Main entry point for all jwtkit operations

use super::{CipherMasterBuilder, KeyMasterBuilder};

/// Unified entry point for all jwtkit operations
pub struct JwtKit;

impl JwtKit {
    /// Entry point for JWT operations
    /// Example: `JwtKit::jwt().with_secret(secret).sign(&claims).await`
    #[cfg(feature = "jwt")]
    #[must_use]
    pub fn jwt() -> jwtkit_jwt::JwtMasterBuilder {
        jwtkit_jwt::JwtMasterBuilder
    }

    /// Entry point for key operations
    /// Example: `JwtKit::key().rsa(ModulusLength::Bits2048).generate().await`
    #[must_use]
    pub fn key() -> KeyMasterBuilder {
        KeyMasterBuilder
    }

    /// Entry point for asymmetric encryption
    /// Example: `JwtKit::cipher().rsa_oaep().encrypt_text(pem, text).await`
    #[must_use]
    pub fn cipher() -> CipherMasterBuilder {
        CipherMasterBuilder
    }
}
