//! JSON Web Tokens in compact JWS form
//!
//! This crate provides:
//! - The closed [`Algorithm`] table: HS, RS and ES over SHA-256/384/512
//! - [`SignatureEngine`], the native [`Signer`] behind every token
//! - [`JwtCodec`] for encoding, structural decoding and verification
//! - [`Jwt::builder`], the async builder API
//! - [`process_jwt_payload`] for rendering timestamps to humans
//!
//! Claims are never validated here: `exp`, `nbf` and friends are opaque
//! JSON until [`process_jwt_payload`] formats them for display.
//!
//! ```no_run
//! # async fn demo() -> jwtkit_common::Result<()> {
//! use jwtkit_jwt::Jwt;
//!
//! let jwt = Jwt::builder().with_secret(b"secret");
//! let token = jwt.sign(&serde_json::json!({"sub": "1234567890"})).await?;
//! assert!(jwt.verify(&token).await?);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod algorithm;
pub mod api;
pub mod codec;
pub mod display;
pub mod engine;
pub mod types;

pub use algorithm::{supported_algorithms, Algorithm, AlgorithmFamily, HashAlgorithm, SUPPORTED_ALGORITHMS};
pub use api::{Jwt, JwtBuilder, JwtMasterBuilder};
pub use codec::{decode, parse_claims, JwtCodec};
pub use display::process_jwt_payload;
pub use engine::{Credential, SignatureEngine, Signer};
pub use types::{DecodedToken, JwtHeader, JWT_TYPE};
