//! JWT builder: entry points and configuration methods

use crate::algorithm::{Algorithm, AlgorithmFamily};
use crate::codec::{self, parse_claims, JwtCodec};
use crate::engine::{Credential, SignatureEngine, Signer};
use crate::types::{DecodedToken, JwtHeader};
use jwtkit_common::{CryptoTask, Error, ErrorKind, Result, ResultExt};
use jwtkit_key::KeyMaterial;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use zeroize::Zeroizing;

/// Master builder for JWT operations
#[derive(Debug, Clone, Copy, Default)]
pub struct JwtMasterBuilder;

impl JwtMasterBuilder {
    /// Fresh builder, HS256 with no credentials
    #[must_use]
    pub fn builder(self) -> JwtBuilder {
        JwtBuilder::new()
    }

    /// Builder preset to `algorithm`
    #[inline]
    #[must_use]
    pub fn with_algorithm(self, algorithm: Algorithm) -> JwtBuilder {
        JwtBuilder::new().algorithm(algorithm)
    }

    /// HS256 builder with a shared secret
    #[inline]
    #[must_use]
    pub fn with_secret(self, secret: impl AsRef<[u8]>) -> JwtBuilder {
        JwtBuilder::new().with_secret(secret)
    }
}

/// Direct builder entry point, equivalent to `JwtKit::jwt().builder()`
pub struct Jwt;

impl Jwt {
    /// Create new JWT builder
    #[inline]
    #[must_use]
    pub fn builder() -> JwtBuilder {
        JwtBuilder::new()
    }
}

/// Credential as configured, resolved when an operation runs
#[derive(Clone)]
enum CredentialSource {
    Ready(Credential),
    Pem(Zeroizing<String>),
}

impl CredentialSource {
    fn resolve(self) -> Result<Credential> {
        match self {
            Self::Ready(credential) => Ok(credential),
            Self::Pem(pem) => Credential::from_pem(&pem),
        }
    }
}

impl fmt::Debug for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready(credential) => fmt::Debug::fmt(credential, f),
            Self::Pem(_) => f.write_str("Pem(..)"),
        }
    }
}

/// Unified JWT builder
///
/// A secret serves both directions. A private key also verifies; a public
/// key, when set, takes precedence for verification.
pub struct JwtBuilder<S = SignatureEngine> {
    codec: Arc<JwtCodec<S>>,
    algorithm: Algorithm,
    key_id: Option<String>,
    signing: Option<CredentialSource>,
    verifying: Option<CredentialSource>,
}

impl<S> Clone for JwtBuilder<S> {
    fn clone(&self) -> Self {
        Self {
            codec: Arc::clone(&self.codec),
            algorithm: self.algorithm,
            key_id: self.key_id.clone(),
            signing: self.signing.clone(),
            verifying: self.verifying.clone(),
        }
    }
}

impl<S> fmt::Debug for JwtBuilder<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtBuilder")
            .field("algorithm", &self.algorithm)
            .field("key_id", &self.key_id)
            .field("signing", &self.signing)
            .field("verifying", &self.verifying)
            .finish_non_exhaustive()
    }
}

impl Default for JwtBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl JwtBuilder {
    /// Create new JWT builder over the native signature engine
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_signer(SignatureEngine::new())
    }
}

impl<S: Signer> JwtBuilder<S> {
    /// Builder over a custom signer
    #[must_use]
    pub fn with_signer(signer: S) -> Self {
        Self {
            codec: Arc::new(JwtCodec::with_signer(signer)),
            algorithm: Algorithm::default(),
            key_id: None,
            signing: None,
            verifying: None,
        }
    }

    /// Set the signing algorithm
    #[inline]
    #[must_use]
    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the header `kid`
    #[inline]
    #[must_use]
    pub fn key_id(mut self, kid: impl Into<String>) -> Self {
        self.key_id = Some(kid.into());
        self
    }

    /// Shared secret for the HMAC algorithms
    #[inline]
    #[must_use]
    pub fn with_secret(mut self, secret: impl AsRef<[u8]>) -> Self {
        let credential = CredentialSource::Ready(Credential::secret(secret));
        self.signing = Some(credential.clone());
        self.verifying = Some(credential);
        self
    }

    /// `PRIVATE KEY` PEM block; parsed when an operation runs
    #[inline]
    #[must_use]
    pub fn with_private_key_pem(mut self, pem: impl Into<String>) -> Self {
        self.signing = Some(CredentialSource::Pem(Zeroizing::new(pem.into())));
        self
    }

    /// `PUBLIC KEY` PEM block; parsed when an operation runs
    #[inline]
    #[must_use]
    pub fn with_public_key_pem(mut self, pem: impl Into<String>) -> Self {
        self.verifying = Some(CredentialSource::Pem(Zeroizing::new(pem.into())));
        self
    }

    /// Already-parsed key material; private keys sign, either kind verifies
    #[must_use]
    pub fn with_key(mut self, material: KeyMaterial) -> Self {
        let credential = CredentialSource::Ready(Credential::Key(material));
        if credential_is_private(&credential) {
            self.signing = Some(credential);
        } else {
            self.verifying = Some(credential);
        }
        self
    }

    /// The configured algorithm
    #[must_use]
    pub fn get_algorithm(&self) -> Algorithm {
        self.algorithm
    }

    fn header(&self) -> JwtHeader {
        let header = JwtHeader::new(self.algorithm);
        match &self.key_id {
            Some(kid) => header.with_key_id(kid.clone()),
            None => header,
        }
    }

    fn missing(&self, signing: bool) -> Error {
        let (purpose, what) = match (self.algorithm.family(), signing) {
            (AlgorithmFamily::Hmac, true) => ("signing", "a secret"),
            (AlgorithmFamily::Hmac, false) => ("verification", "a secret"),
            (_, true) => ("signing", "a private key"),
            (_, false) => ("verification", "a public or private key"),
        };
        Error::missing_credential().context(format!("{} {purpose} requires {what}", self.algorithm))
    }

    fn signing_source(&self) -> Result<CredentialSource> {
        self.signing.clone().ok_or_else(|| self.missing(true))
    }

    fn verifying_source(&self) -> Result<CredentialSource> {
        self.verifying
            .clone()
            .or_else(|| self.signing.clone())
            .ok_or_else(|| self.missing(false))
    }

    /// Sign any serializable claims value
    ///
    /// Resolves to `InvalidPayload` unless the claims serialize to a JSON
    /// object or array, and to `MissingCredential` without a signing
    /// credential.
    pub fn sign<C: Serialize + ?Sized>(&self, claims: &C) -> CryptoTask<String> {
        let claims = match serde_json::to_value(claims).wrap(ErrorKind::InvalidPayload) {
            Ok(claims) => claims,
            Err(e) => return CryptoTask::ready("jwt sign", Err(e)),
        };
        self.sign_value(claims)
    }

    /// Sign claims given as JSON text
    pub fn sign_json(&self, claims_json: &str) -> CryptoTask<String> {
        match parse_claims(claims_json) {
            Ok(claims) => self.sign_value(claims),
            Err(e) => CryptoTask::ready("jwt sign", Err(e)),
        }
    }

    fn sign_value(&self, claims: Value) -> CryptoTask<String> {
        let source = match self.signing_source() {
            Ok(source) => source,
            Err(e) => return CryptoTask::ready("jwt sign", Err(e)),
        };
        let codec = Arc::clone(&self.codec);
        let header = self.header();
        CryptoTask::spawn("jwt sign", move || {
            let credential = source.resolve()?;
            codec.encode_with_header(&header, &claims, &credential)
        })
    }

    /// Check a compact token's signature against the configured credential
    ///
    /// The algorithm comes from the token header. Resolves to `Ok(false)` on
    /// a signature mismatch and to `Err` for malformed tokens or unusable
    /// credentials.
    pub fn verify(&self, token: &str) -> CryptoTask<bool> {
        let source = match self.verifying_source() {
            Ok(source) => source,
            Err(e) => return CryptoTask::ready("jwt verify", Err(e)),
        };
        let codec = Arc::clone(&self.codec);
        let token = token.to_string();
        CryptoTask::spawn("jwt verify", move || {
            let credential = source.resolve()?;
            codec.verify_token(&token, &credential)
        })
    }

    /// Structural decode without verification
    ///
    /// # Errors
    /// `MalformedToken` on any structural problem.
    pub fn decode(&self, token: &str) -> Result<DecodedToken> {
        codec::decode(token)
    }
}

fn credential_is_private(source: &CredentialSource) -> bool {
    matches!(source, CredentialSource::Ready(Credential::Key(material)) if material.format().is_private())
}
