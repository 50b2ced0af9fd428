//! JWT header and decoded-token types

use crate::algorithm::Algorithm;
use jwtkit_common::{ErrorKind, OptionExt};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `typ` written into every header this crate produces
pub const JWT_TYPE: &str = "JWT";

/// JOSE header
///
/// `alg` stays a string so tokens naming an unknown algorithm still decode;
/// [`JwtHeader::algorithm`] resolves it against the supported table. Any
/// JSON object deserializes: an `alg`, `typ` or `kid` that is not a string
/// is kept under [`JwtHeader::extra`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct JwtHeader {
    /// Signing algorithm name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alg: Option<String>,
    /// Media type, `"JWT"` on tokens produced here
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,
    /// Key identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
    /// Any other header parameters, in their original order
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl JwtHeader {
    /// `{"alg": <algorithm>, "typ": "JWT"}`
    #[must_use]
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            alg: Some(algorithm.as_str().to_string()),
            typ: Some(JWT_TYPE.to_string()),
            kid: None,
            extra: Map::new(),
        }
    }

    /// Set the `kid` parameter
    #[must_use]
    pub fn with_key_id(mut self, kid: impl Into<String>) -> Self {
        self.kid = Some(kid.into());
        self
    }

    /// Resolve `alg` against the supported algorithms
    ///
    /// # Errors
    /// `UnsupportedAlgorithm` for any other value, `none` included, and for a
    /// header without a string `alg`.
    pub fn algorithm(&self) -> jwtkit_common::Result<Algorithm> {
        self.alg
            .as_deref()
            .ok_or_kind(ErrorKind::UnsupportedAlgorithm, "header has no alg")?
            .parse()
    }
}

impl From<Map<String, Value>> for JwtHeader {
    fn from(mut params: Map<String, Value>) -> Self {
        Self {
            alg: take_string(&mut params, "alg"),
            typ: take_string(&mut params, "typ"),
            kid: take_string(&mut params, "kid"),
            extra: params,
        }
    }
}

fn take_string(params: &mut Map<String, Value>, name: &str) -> Option<String> {
    match params.remove(name)? {
        Value::String(value) => Some(value),
        other => {
            params.insert(name.to_string(), other);
            None
        }
    }
}

/// The three parts of a compact token, structurally validated but not verified
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedToken {
    pub(crate) header: JwtHeader,
    pub(crate) payload: Value,
    pub(crate) signature: Vec<u8>,
    pub(crate) signing_input: String,
}

impl DecodedToken {
    /// Parsed header
    #[must_use]
    pub fn header(&self) -> &JwtHeader {
        &self.header
    }

    /// Parsed claims, exactly as they were encoded
    #[must_use]
    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// Raw signature bytes
    #[must_use]
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// The first two segments of the original token, verbatim
    #[must_use]
    pub fn signing_input(&self) -> &str {
        &self.signing_input
    }

    /// Algorithm named by the header
    ///
    /// # Errors
    /// `UnsupportedAlgorithm` if the header names anything else.
    pub fn algorithm(&self) -> jwtkit_common::Result<Algorithm> {
        self.header.algorithm()
    }

    /// Split into `(header, payload, signature)`
    #[must_use]
    pub fn into_parts(self) -> (JwtHeader, Value, Vec<u8>) {
        (self.header, self.payload, self.signature)
    }
}
