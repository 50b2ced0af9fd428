//! Signature engine: algorithm-indexed sign and verify
//!
//! [`Signer`] is the capability the JWT codec depends on. [`SignatureEngine`]
//! is the native implementation: HMAC takes raw secret bytes, RSA and ECDSA
//! take [`KeyMaterial`] bound to the algorithm by a [`KeyImporter`].
//!
//! `verify` returns `Ok(false)` for any signature that does not check out,
//! including one of the wrong length. It returns `Err` only when the
//! credential itself is unusable for the algorithm.

mod ecdsa;
mod hmac;
mod rsa;

use crate::algorithm::{Algorithm, AlgorithmFamily};
use jwtkit_common::{bail, Error, LoggingTransformer, Result};
use jwtkit_key::{KeyFormat, KeyImporter, KeyMaterial, NativeKeyImporter, SigningKey, VerifyingKey};
use std::fmt;
use zeroize::Zeroizing;

/// Secret or key handed to the engine
#[derive(Clone)]
pub enum Credential {
    /// Shared HMAC secret
    Secret(Zeroizing<Vec<u8>>),
    /// SPKI or PKCS#8 key material
    Key(KeyMaterial),
}

impl Credential {
    /// HMAC secret from raw bytes
    #[must_use]
    pub fn secret(secret: impl AsRef<[u8]>) -> Self {
        Self::Secret(Zeroizing::new(secret.as_ref().to_vec()))
    }

    /// Key material from a `PUBLIC KEY` or `PRIVATE KEY` PEM block
    ///
    /// # Errors
    /// `MalformedPem` if the block does not parse.
    pub fn from_pem(pem: &str) -> Result<Self> {
        KeyMaterial::from_pem(pem).map(Self::Key)
    }

    /// Log label; secrets are never fingerprinted
    fn log_label(&self) -> String {
        match self {
            Self::Secret(_) => "secret".to_string(),
            Self::Key(material) => LoggingTransformer::fingerprint(material.der()),
        }
    }
}

impl From<KeyMaterial> for Credential {
    fn from(material: KeyMaterial) -> Self {
        Self::Key(material)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Secret(secret) => f
                .debug_struct("Secret")
                .field("len", &secret.len())
                .finish_non_exhaustive(),
            Self::Key(material) => f.debug_tuple("Key").field(material).finish(),
        }
    }
}

/// Sign/verify capability keyed by [`Algorithm`]
pub trait Signer: Send + Sync + 'static {
    /// Sign `message`
    ///
    /// # Errors
    /// `MissingCredential` when the credential is not the kind the algorithm
    /// signs with; `UnsupportedAlgorithm` on a key-type mismatch;
    /// `InvalidKey` when the key is rejected.
    fn sign(&self, algorithm: Algorithm, credential: &Credential, message: &[u8]) -> Result<Vec<u8>>;

    /// Check `signature` over `message`
    ///
    /// # Errors
    /// Only for an unusable credential; a wrong signature is `Ok(false)`.
    fn verify(
        &self,
        algorithm: Algorithm,
        credential: &Credential,
        message: &[u8],
        signature: &[u8],
    ) -> Result<bool>;
}

/// Native [`Signer`] over the RustCrypto primitives
#[derive(Debug, Clone, Copy, Default)]
pub struct SignatureEngine<I = NativeKeyImporter> {
    importer: I,
}

impl SignatureEngine {
    /// Engine with the native key importer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            importer: NativeKeyImporter::new(),
        }
    }
}

impl<I: KeyImporter> SignatureEngine<I> {
    /// Engine with a custom key importer
    #[must_use]
    pub const fn with_importer(importer: I) -> Self {
        Self { importer }
    }

    fn secret<'a>(algorithm: Algorithm, credential: &'a Credential) -> Result<&'a [u8]> {
        match credential {
            Credential::Secret(secret) if !secret.is_empty() => {
                if secret.len() < algorithm.hash().output_len() {
                    tracing::warn!(
                        alg = %algorithm,
                        len = secret.len(),
                        "HMAC secret is shorter than the hash output"
                    );
                }
                Ok(secret.as_slice())
            }
            Credential::Secret(_) => bail!(missing_credential, "{algorithm} secret is empty"),
            Credential::Key(_) => bail!(missing_credential, "{algorithm} requires a secret, not a key"),
        }
    }

    fn key(algorithm: Algorithm, credential: &Credential) -> Result<&KeyMaterial> {
        match credential {
            Credential::Key(material) => Ok(material),
            Credential::Secret(_) => bail!(missing_credential, "{algorithm} requires a key, not a secret"),
        }
    }

    fn signing_key(&self, algorithm: Algorithm, credential: &Credential) -> Result<SigningKey> {
        let material = Self::key(algorithm, credential)?;
        if material.format() != KeyFormat::Pkcs8 {
            bail!(missing_credential, "{algorithm} signing requires a private key");
        }
        let expected = algorithm
            .key_type()
            .ok_or_else(|| Error::internal().context(format!("{algorithm} has no key type")))?;
        self.importer.import_signing(material, expected)
    }

    fn verifying_key(&self, algorithm: Algorithm, credential: &Credential) -> Result<VerifyingKey> {
        let material = Self::key(algorithm, credential)?;
        let expected = algorithm
            .key_type()
            .ok_or_else(|| Error::internal().context(format!("{algorithm} has no key type")))?;
        self.importer.import_verifying(material, expected)
    }
}

impl<I: KeyImporter> Signer for SignatureEngine<I> {
    fn sign(&self, algorithm: Algorithm, credential: &Credential, message: &[u8]) -> Result<Vec<u8>> {
        let signature = match algorithm.family() {
            AlgorithmFamily::Hmac => hmac::sign(algorithm.hash(), Self::secret(algorithm, credential)?, message)?,
            AlgorithmFamily::Rsa => match self.signing_key(algorithm, credential)? {
                SigningKey::Rsa(key) => rsa::sign(algorithm.hash(), key, message)?,
                _ => bail!(unsupported_algorithm, "{algorithm} requires an RSA key"),
            },
            AlgorithmFamily::Ecdsa => ecdsa::sign(&self.signing_key(algorithm, credential)?, message)?,
        };
        tracing::debug!(
            alg = %algorithm,
            key = %credential.log_label(),
            len = signature.len(),
            "Signed message"
        );
        Ok(signature)
    }

    fn verify(
        &self,
        algorithm: Algorithm,
        credential: &Credential,
        message: &[u8],
        signature: &[u8],
    ) -> Result<bool> {
        let valid = match algorithm.family() {
            AlgorithmFamily::Hmac => {
                hmac::verify(algorithm.hash(), Self::secret(algorithm, credential)?, message, signature)?
            }
            AlgorithmFamily::Rsa => match self.verifying_key(algorithm, credential)? {
                VerifyingKey::Rsa(key) => rsa::verify(algorithm.hash(), key, message, signature),
                _ => bail!(unsupported_algorithm, "{algorithm} requires an RSA key"),
            },
            AlgorithmFamily::Ecdsa => {
                ecdsa::verify(&self.verifying_key(algorithm, credential)?, message, signature)?
            }
        };
        tracing::debug!(
            alg = %algorithm,
            key = %credential.log_label(),
            valid,
            "Verified signature"
        );
        Ok(valid)
    }
}
