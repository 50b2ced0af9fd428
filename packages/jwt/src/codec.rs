//! Compact JWS serialization: `header.payload.signature`
//!
//! Encoding serializes the header and claims independently, signs
//! `base64url(header) + "." + base64url(claims)` and appends the signature.
//! Decoding is purely structural. Verification always signs over the
//! original first two segments, never over re-serialized JSON.

use crate::algorithm::Algorithm;
use crate::engine::{Credential, SignatureEngine, Signer};
use crate::types::{DecodedToken, JwtHeader};
use jwtkit_common::encoding::{decode_url, encode_url};
use jwtkit_common::{bail, ensure, Error, ErrorKind, Result, ResultExt};
use serde::Serialize;
use serde_json::Value;

/// Parse claims text; must be a JSON object or array
///
/// # Errors
/// `InvalidPayload` for anything else.
pub fn parse_claims(claims_json: &str) -> Result<Value> {
    let claims: Value =
        serde_json::from_str(claims_json).wrap_with(ErrorKind::InvalidPayload, "claims are not JSON")?;
    ensure!(
        claims.is_object() || claims.is_array(),
        invalid_payload,
        "claims must be a JSON object or array"
    );
    Ok(claims)
}

fn split(token: &str) -> Result<(&str, &str, &str)> {
    let mut segments = token.split('.');
    match (segments.next(), segments.next(), segments.next(), segments.next()) {
        (Some(header), Some(payload), Some(signature), None)
            if !header.is_empty() && !payload.is_empty() && !signature.is_empty() =>
        {
            Ok((header, payload, signature))
        }
        _ => Err(Error::malformed_token().context(format!(
            "expected three non-empty dot-separated segments, found {}",
            token.split('.').count()
        ))),
    }
}

fn decode_json(segment: &str, role: &str) -> Result<Value> {
    let bytes = decode_url(segment)
        .map_err(|e| Error::with_source(ErrorKind::MalformedToken, e).context(format!("{role} is not base64url")))?;
    serde_json::from_slice(&bytes).wrap_with(ErrorKind::MalformedToken, format!("{role} is not JSON"))
}

fn decode_header(segment: &str) -> Result<JwtHeader> {
    match decode_json(segment, "header")? {
        Value::Object(params) => Ok(JwtHeader::from(params)),
        _ => bail!(malformed_token, "header is not a JSON object"),
    }
}

/// Split and parse a compact token without verifying it
///
/// Surrounding whitespace is ignored.
///
/// # Errors
/// `MalformedToken` unless the token has exactly three non-empty segments,
/// the first two decode to JSON (the header to an object) and the
/// third is base64url.
pub fn decode(token: &str) -> Result<DecodedToken> {
    let (header_b64, payload_b64, signature_b64) = split(token.trim())?;
    let header = decode_header(header_b64)?;
    let payload = decode_json(payload_b64, "payload")?;
    let signature = decode_url(signature_b64)
        .map_err(|e| Error::with_source(ErrorKind::MalformedToken, e).context("signature is not base64url"))?;

    Ok(DecodedToken {
        header,
        payload,
        signature,
        signing_input: format!("{header_b64}.{payload_b64}"),
    })
}

/// Token encoder, decoder and verifier over a [`Signer`]
#[derive(Debug, Clone, Default)]
pub struct JwtCodec<S = SignatureEngine> {
    signer: S,
}

impl JwtCodec {
    /// Codec over the native signature engine
    #[must_use]
    pub const fn new() -> Self {
        Self {
            signer: SignatureEngine::new(),
        }
    }
}

impl<S: Signer> JwtCodec<S> {
    /// Codec over a custom signer
    #[must_use]
    pub const fn with_signer(signer: S) -> Self {
        Self { signer }
    }

    /// Encode claims under `{"alg": algorithm, "typ": "JWT"}`
    ///
    /// # Errors
    /// `InvalidPayload` unless `claims` is an object or array;
    /// `MissingCredential` and key errors from the signer.
    pub fn encode(&self, claims: &Value, algorithm: Algorithm, credential: &Credential) -> Result<String> {
        self.encode_with_header(&JwtHeader::new(algorithm), claims, credential)
    }

    /// Encode claims given as JSON text
    ///
    /// # Errors
    /// As [`Self::encode`], plus `InvalidPayload` for text that is not JSON.
    pub fn encode_json(&self, claims_json: &str, algorithm: Algorithm, credential: &Credential) -> Result<String> {
        self.encode(&parse_claims(claims_json)?, algorithm, credential)
    }

    /// Encode any serializable claims value
    ///
    /// # Errors
    /// As [`Self::encode`].
    pub fn encode_claims<C: Serialize + ?Sized>(
        &self,
        claims: &C,
        algorithm: Algorithm,
        credential: &Credential,
    ) -> Result<String> {
        let claims = serde_json::to_value(claims).wrap(ErrorKind::InvalidPayload)?;
        self.encode(&claims, algorithm, credential)
    }

    /// Encode with a caller-built header (for `kid` and extra parameters)
    ///
    /// # Errors
    /// `UnsupportedAlgorithm` if `header.alg` is not supported, otherwise as
    /// [`Self::encode`].
    pub fn encode_with_header(&self, header: &JwtHeader, claims: &Value, credential: &Credential) -> Result<String> {
        let algorithm = header.algorithm()?;
        ensure!(
            claims.is_object() || claims.is_array(),
            invalid_payload,
            "claims must be a JSON object or array"
        );

        let header_json = serde_json::to_vec(header).wrap_with(ErrorKind::Internal, "header serialization")?;
        let claims_json = serde_json::to_vec(claims).wrap(ErrorKind::InvalidPayload)?;
        let signing_input = format!("{}.{}", encode_url(&header_json), encode_url(&claims_json));

        let signature = self.signer.sign(algorithm, credential, signing_input.as_bytes())?;
        tracing::debug!(alg = %algorithm, claims_len = claims_json.len(), "Encoded token");
        Ok(format!("{signing_input}.{}", encode_url(&signature)))
    }

    /// See [`decode`]
    ///
    /// # Errors
    /// `MalformedToken` on any structural problem.
    pub fn decode(&self, token: &str) -> Result<DecodedToken> {
        decode(token)
    }

    /// Check a decoded token's signature
    ///
    /// # Errors
    /// `UnsupportedAlgorithm` for an unknown `alg`; credential errors from
    /// the signer. A signature that does not match is `Ok(false)`.
    pub fn verify(&self, token: &DecodedToken, credential: &Credential) -> Result<bool> {
        let algorithm = token.algorithm()?;
        self.signer
            .verify(algorithm, credential, token.signing_input.as_bytes(), &token.signature)
    }

    /// Check a compact token's signature
    ///
    /// Everything after the second dot is the signature. One that is not
    /// base64url, stray dots included, counts as a mismatch.
    ///
    /// # Errors
    /// `MalformedToken` for a missing segment or a broken header or payload;
    /// otherwise as [`Self::verify`].
    pub fn verify_token(&self, token: &str, credential: &Credential) -> Result<bool> {
        let mut segments = token.trim().splitn(3, '.');
        let (Some(header_b64), Some(payload_b64), Some(signature_b64)) =
            (segments.next(), segments.next(), segments.next())
        else {
            bail!(malformed_token, "expected three dot-separated segments");
        };
        ensure!(
            !header_b64.is_empty() && !payload_b64.is_empty() && !signature_b64.is_empty(),
            malformed_token,
            "empty token segment"
        );
        let algorithm = decode_header(header_b64)?.algorithm()?;
        decode_json(payload_b64, "payload")?;

        let Ok(signature) = decode_url(signature_b64) else {
            tracing::debug!(alg = %algorithm, "Signature segment is not base64url");
            return Ok(false);
        };
        let signing_input = format!("{header_b64}.{payload_b64}");
        self.signer
            .verify(algorithm, credential, signing_input.as_bytes(), &signature)
    }
}
