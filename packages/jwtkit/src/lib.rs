//! # jwtkit
//!
//! JSON Web Tokens, PEM key material and RSA-OAEP with feature-gated crates.
//!
//! ## Features
//!
//! - `key` - PEM framing, key import, RSA/EC key generation, RSA-OAEP
//! - `jwt` - HS/RS/ES token signing and verification (enables `key`)
//! - `full` - everything (default)
//!
//! ## Example
//!
//! ```no_run
//! use jwtkit::{Algorithm, JwtKit, ModulusLength};
//!
//! # async fn example() -> jwtkit::Result<()> {
//! let pair = JwtKit::key().rsa(ModulusLength::Bits2048).generate().await?;
//!
//! let jwt = JwtKit::jwt()
//!     .with_algorithm(Algorithm::RS256)
//!     .with_private_key_pem(pair.private_key().pem())
//!     .with_public_key_pem(pair.public_key().pem());
//! let token = jwt.sign(&serde_json::json!({"sub": "1234567890"})).await?;
//! assert!(jwt.verify(&token).await?);
//!
//! let sealed = JwtKit::cipher()
//!     .rsa_oaep()
//!     .encrypt_text(pair.public_key().pem(), "hello")
//!     .await
//!     .into_result()?;
//! # let _ = sealed;
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

#[cfg(feature = "key")]
mod master;

#[cfg(feature = "key")]
pub use master::{CipherMasterBuilder, JwtKit, KeyMasterBuilder};

#[cfg(feature = "jwt")]
pub use jwtkit_jwt::api::JwtMasterBuilder;

// === Core Re-exports ===

pub use jwtkit_common::*;

#[cfg(feature = "key")]
#[cfg_attr(docsrs, doc(cfg(feature = "key")))]
pub use jwtkit_key as key;

#[cfg(feature = "key")]
#[cfg_attr(docsrs, doc(cfg(feature = "key")))]
pub use jwtkit_key::{
    pem, CipherOutcome, CipherService, EcCurve, KeyFormat, KeyGenerator, KeyMaterial, KeyPair,
    KeyType, ModulusLength, PemKind, RsaOaepCipher,
};

// === Higher Level Re-exports ===

#[cfg(feature = "jwt")]
#[cfg_attr(docsrs, doc(cfg(feature = "jwt")))]
pub use jwtkit_jwt as jwt;

#[cfg(feature = "jwt")]
#[cfg_attr(docsrs, doc(cfg(feature = "jwt")))]
pub use jwtkit_jwt::{
    process_jwt_payload, Algorithm, Credential, DecodedToken, Jwt, JwtBuilder, JwtCodec, JwtHeader,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{Error, ErrorKind, Result};

    #[cfg(feature = "key")]
    pub use crate::{JwtKit, KeyGenerator, KeyMaterial, KeyPair, ModulusLength};

    #[cfg(feature = "jwt")]
    pub use crate::{Algorithm, Jwt};
}
