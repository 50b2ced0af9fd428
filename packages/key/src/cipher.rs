//! RSA-OAEP (SHA-256) encryption of arbitrary payloads
//!
//! [`Cipher`] is the engine capability; [`RsaOaepCipher`] implements it with
//! the `rsa` crate. [`CipherService`] is the boundary callers use: PEM in,
//! every failure folded into `CipherOperationFailed`, and a text-level API
//! that reports through [`CipherOutcome`] instead of an error.

use crate::import::{KeyImporter, NativeKeyImporter};
use crate::material::KeyMaterial;
use jwtkit_common::encoding::{decode_std, encode_std};
use jwtkit_common::{CryptoTask, Error, ErrorKind, LoggingTransformer, Result, ResultExt};
use rand::rngs::OsRng;
use rsa::traits::PublicKeyParts;
use rsa::Oaep;
use sha2::Sha256;
use std::sync::Arc;

/// OAEP padding bytes with SHA-256: two digests plus two
pub const OAEP_SHA256_OVERHEAD: usize = 2 * 32 + 2;

/// Largest plaintext a modulus of `modulus_bytes` can carry under OAEP/SHA-256
#[must_use]
pub const fn max_plaintext_len(modulus_bytes: usize) -> usize {
    modulus_bytes.saturating_sub(OAEP_SHA256_OVERHEAD)
}

/// Public-key encryption capability
pub trait Cipher: Send + Sync + 'static {
    /// Encrypt `plaintext` to the holder of `public_key`
    ///
    /// # Errors
    /// Any import or engine failure.
    fn encrypt(&self, public_key: &KeyMaterial, plaintext: &[u8]) -> Result<Vec<u8>>;

    /// Decrypt `ciphertext` with `private_key`
    ///
    /// # Errors
    /// Any import or engine failure, including a ciphertext made for another key.
    fn decrypt(&self, private_key: &KeyMaterial, ciphertext: &[u8]) -> Result<Vec<u8>>;
}

/// RSA-OAEP with SHA-256 for both the digest and MGF1
#[derive(Debug, Clone, Copy, Default)]
pub struct RsaOaepCipher<I = NativeKeyImporter> {
    importer: I,
}

impl RsaOaepCipher {
    /// Cipher using the native key importer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            importer: NativeKeyImporter::new(),
        }
    }
}

impl<I: KeyImporter> RsaOaepCipher<I> {
    /// Cipher using a custom key importer
    #[must_use]
    pub const fn with_importer(importer: I) -> Self {
        Self { importer }
    }
}

impl<I: KeyImporter> Cipher for RsaOaepCipher<I> {
    fn encrypt(&self, public_key: &KeyMaterial, plaintext: &[u8]) -> Result<Vec<u8>> {
        let key = self.importer.import_rsa_encrypting(public_key)?;
        let limit = max_plaintext_len(key.size());
        if plaintext.len() > limit {
            return Err(Error::cipher_operation_failed().context(format!(
                "plaintext is {} bytes, a {}-bit key takes at most {limit}",
                plaintext.len(),
                key.size() * 8
            )));
        }
        key.encrypt(&mut OsRng, Oaep::new::<Sha256>(), plaintext)
            .wrap_with(ErrorKind::CipherOperationFailed, "RSA-OAEP encrypt")
    }

    fn decrypt(&self, private_key: &KeyMaterial, ciphertext: &[u8]) -> Result<Vec<u8>> {
        let key = self.importer.import_rsa_decrypting(private_key)?;
        key.decrypt(Oaep::new::<Sha256>(), ciphertext)
            .wrap_with(ErrorKind::CipherOperationFailed, "RSA-OAEP decrypt")
    }
}

/// Explicit-result report of a text-level cipher call
#[derive(Debug, Clone)]
pub struct CipherOutcome<T> {
    /// Whether the operation succeeded
    pub is_valid: bool,
    /// Output on success
    pub result: Option<T>,
    /// Failure on error, always of kind `CipherOperationFailed`
    pub error: Option<Error>,
    label: &'static str,
}

impl<T> CipherOutcome<T> {
    fn new(label: &'static str, result: Result<T>) -> Self {
        match result {
            Ok(value) => Self {
                is_valid: true,
                result: Some(value),
                error: None,
                label,
            },
            Err(error) => Self {
                is_valid: false,
                result: None,
                error: Some(error),
                label,
            },
        }
    }

    /// Human-readable failure message, `None` on success
    ///
    /// Prefixed with `encryption failed: ` or `decryption failed: `.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        let error = self.error.as_ref()?;
        let cause = std::error::Error::source(error)
            .map_or_else(|| describe(error), ToString::to_string);
        Some(format!("{}: {cause}", self.label))
    }

    /// Back into a `Result`
    ///
    /// # Errors
    /// The recorded failure.
    pub fn into_result(self) -> Result<T> {
        match (self.result, self.error) {
            (Some(value), _) => Ok(value),
            (None, Some(error)) => Err(error),
            (None, None) => Err(Error::internal().context("cipher outcome without a result")),
        }
    }
}

fn describe(error: &Error) -> String {
    error
        .get_context()
        .map_or_else(|| error.kind().to_string(), ToString::to_string)
}

/// Fold any failure into `CipherOperationFailed`, keeping it as the cause
fn as_cipher_failure(operation: &str, error: Error) -> Error {
    LoggingTransformer::log_crypto_error(operation, &error);
    if error.is(ErrorKind::CipherOperationFailed) {
        error
    } else {
        Error::with_source(ErrorKind::CipherOperationFailed, error)
    }
}

/// PEM-level encryption boundary over a [`Cipher`]
#[derive(Debug, Default)]
pub struct CipherService<C = RsaOaepCipher> {
    cipher: Arc<C>,
}

impl CipherService {
    /// Service over [`RsaOaepCipher`] with the native importer
    #[must_use]
    pub fn rsa_oaep() -> Self {
        Self::new(RsaOaepCipher::new())
    }
}

impl<C: Cipher> CipherService<C> {
    /// Service over the given cipher
    #[must_use]
    pub fn new(cipher: C) -> Self {
        Self {
            cipher: Arc::new(cipher),
        }
    }

    /// Encrypt bytes to a `PUBLIC KEY` PEM
    ///
    /// # Errors
    /// `CipherOperationFailed` wrapping the cause (bad PEM, wrong key type,
    /// oversized plaintext, engine error).
    pub fn encrypt_blocking(&self, public_key_pem: &str, plaintext: &[u8]) -> Result<Vec<u8>> {
        KeyMaterial::from_pem(public_key_pem)
            .and_then(|key| self.cipher.encrypt(&key, plaintext))
            .map(|ciphertext| {
                log::debug!("Encrypted {} bytes", plaintext.len());
                ciphertext
            })
            .map_err(|e| as_cipher_failure("encrypt", e))
    }

    /// Decrypt bytes with a `PRIVATE KEY` PEM
    ///
    /// # Errors
    /// `CipherOperationFailed` wrapping the cause, including a ciphertext
    /// produced for a different key.
    pub fn decrypt_blocking(&self, private_key_pem: &str, ciphertext: &[u8]) -> Result<Vec<u8>> {
        KeyMaterial::from_pem(private_key_pem)
            .and_then(|key| self.cipher.decrypt(&key, ciphertext))
            .map(|plaintext| {
                log::debug!("Decrypted {} bytes", plaintext.len());
                plaintext
            })
            .map_err(|e| as_cipher_failure("decrypt", e))
    }

    /// [`Self::encrypt_blocking`] on the blocking pool
    pub fn encrypt(&self, public_key_pem: &str, plaintext: &[u8]) -> CryptoTask<Vec<u8>> {
        let service = self.clone();
        let pem = public_key_pem.to_owned();
        let plaintext = plaintext.to_vec();
        CryptoTask::spawn("encrypt", move || service.encrypt_blocking(&pem, &plaintext))
    }

    /// [`Self::decrypt_blocking`] on the blocking pool
    pub fn decrypt(&self, private_key_pem: &str, ciphertext: &[u8]) -> CryptoTask<Vec<u8>> {
        let service = self.clone();
        let pem = zeroize::Zeroizing::new(private_key_pem.to_owned());
        let ciphertext = ciphertext.to_vec();
        CryptoTask::spawn("decrypt", move || service.decrypt_blocking(&pem, &ciphertext))
    }

    /// Encrypt UTF-8 text, reporting standard base64 ciphertext
    pub async fn encrypt_text(&self, public_key_pem: &str, text: &str) -> CipherOutcome<String> {
        let result = self
            .encrypt(public_key_pem, text.as_bytes())
            .await
            .map(|ciphertext| encode_std(&ciphertext));
        CipherOutcome::new("encryption failed", result)
    }

    /// Decrypt standard base64 ciphertext, reporting UTF-8 text
    pub async fn decrypt_text(
        &self,
        private_key_pem: &str,
        ciphertext_b64: &str,
    ) -> CipherOutcome<String> {
        let result = match decode_std(ciphertext_b64.trim()) {
            Ok(ciphertext) => self.decrypt(private_key_pem, &ciphertext).await,
            Err(e) => Err(as_cipher_failure("decrypt", e)),
        }
        .and_then(|plaintext| {
            String::from_utf8(plaintext).wrap_with(ErrorKind::CipherOperationFailed, "plaintext is not UTF-8")
        });
        CipherOutcome::new("decryption failed", result)
    }
}

impl<C> Clone for CipherService<C> {
    fn clone(&self) -> Self {
        Self {
            cipher: Arc::clone(&self.cipher),
        }
    }
}
