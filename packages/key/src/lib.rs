//! # jwtkit key material
//!
//! PEM framing, algorithm-agnostic key material, import-time usage binding,
//! key pair generation and RSA-OAEP encryption.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use jwtkit_key::{CipherService, KeyGenerator, ModulusLength};
//!
//! # #[tokio::main]
//! # async fn main() -> jwtkit_common::Result<()> {
//! let pair = KeyGenerator::rsa(ModulusLength::Bits2048).generate().await?;
//!
//! let cipher = CipherService::rsa_oaep();
//! let sealed = cipher.encrypt_text(pair.public_key().pem(), "hello").await;
//! let opened = cipher
//!     .decrypt_text(pair.private_key().pem(), sealed.result.as_deref().unwrap_or_default())
//!     .await;
//! assert_eq!(opened.result.as_deref(), Some("hello"));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod cipher;
pub mod generator;
pub mod import;
pub mod material;
pub mod pem;

pub use cipher::{Cipher, CipherOutcome, CipherService, RsaOaepCipher};
pub use generator::{generate, KeyGenerator, KeySpec, ModulusLength};
pub use import::{KeyImporter, KeyUsage, NativeKeyImporter, SigningKey, VerifyingKey};
pub use material::{EcCurve, KeyFormat, KeyMaterial, KeyPair, KeyType};
pub use pem::PemKind;
