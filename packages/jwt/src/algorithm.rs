//! The closed set of signing algorithms
//!
//! Each [`Algorithm`] maps to a fixed `(family, hash)` pair. The table is a
//! compile-time constant; there is no registration of new algorithms.

use jwtkit_common::{Error, Result};
use jwtkit_key::{EcCurve, KeyType};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Signature algorithm family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmFamily {
    /// Keyed hash over a shared secret
    Hmac,
    /// RSASSA-PKCS1-v1_5
    Rsa,
    /// ECDSA with fixed-width `r || s` signatures
    Ecdsa,
}

/// SHA-2 variant used by an algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    /// SHA-256
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
}

impl HashAlgorithm {
    /// Digest length in bytes
    #[must_use]
    pub const fn output_len(self) -> usize {
        match self {
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }
}

/// JWS `alg` values supported for signing and verification
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    /// HMAC with SHA-256
    #[default]
    HS256,
    /// HMAC with SHA-384
    HS384,
    /// HMAC with SHA-512
    HS512,
    /// RSASSA-PKCS1-v1_5 with SHA-256
    RS256,
    /// RSASSA-PKCS1-v1_5 with SHA-384
    RS384,
    /// RSASSA-PKCS1-v1_5 with SHA-512
    RS512,
    /// ECDSA on P-256 with SHA-256
    ES256,
    /// ECDSA on P-384 with SHA-384
    ES384,
    /// ECDSA on P-521 with SHA-512
    ES512,
}

/// Every supported algorithm in display order
pub const SUPPORTED_ALGORITHMS: [Algorithm; 9] = [
    Algorithm::HS256,
    Algorithm::HS384,
    Algorithm::HS512,
    Algorithm::RS256,
    Algorithm::RS384,
    Algorithm::RS512,
    Algorithm::ES256,
    Algorithm::ES384,
    Algorithm::ES512,
];

/// Every supported algorithm in display order
#[must_use]
pub fn supported_algorithms() -> &'static [Algorithm] {
    &SUPPORTED_ALGORITHMS
}

impl Algorithm {
    /// Name as it appears in the `alg` header
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HS256 => "HS256",
            Self::HS384 => "HS384",
            Self::HS512 => "HS512",
            Self::RS256 => "RS256",
            Self::RS384 => "RS384",
            Self::RS512 => "RS512",
            Self::ES256 => "ES256",
            Self::ES384 => "ES384",
            Self::ES512 => "ES512",
        }
    }

    /// Signature family
    #[must_use]
    pub const fn family(self) -> AlgorithmFamily {
        match self {
            Self::HS256 | Self::HS384 | Self::HS512 => AlgorithmFamily::Hmac,
            Self::RS256 | Self::RS384 | Self::RS512 => AlgorithmFamily::Rsa,
            Self::ES256 | Self::ES384 | Self::ES512 => AlgorithmFamily::Ecdsa,
        }
    }

    /// Hash function
    #[must_use]
    pub const fn hash(self) -> HashAlgorithm {
        match self {
            Self::HS256 | Self::RS256 | Self::ES256 => HashAlgorithm::Sha256,
            Self::HS384 | Self::RS384 | Self::ES384 => HashAlgorithm::Sha384,
            Self::HS512 | Self::RS512 | Self::ES512 => HashAlgorithm::Sha512,
        }
    }

    /// Inverse of `(family, hash)`
    #[must_use]
    pub const fn from_parts(family: AlgorithmFamily, hash: HashAlgorithm) -> Self {
        use AlgorithmFamily::{Ecdsa, Hmac, Rsa};
        use HashAlgorithm::{Sha256, Sha384, Sha512};
        match (family, hash) {
            (Hmac, Sha256) => Self::HS256,
            (Hmac, Sha384) => Self::HS384,
            (Hmac, Sha512) => Self::HS512,
            (Rsa, Sha256) => Self::RS256,
            (Rsa, Sha384) => Self::RS384,
            (Rsa, Sha512) => Self::RS512,
            (Ecdsa, Sha256) => Self::ES256,
            (Ecdsa, Sha384) => Self::ES384,
            (Ecdsa, Sha512) => Self::ES512,
        }
    }

    /// Key type an asymmetric algorithm needs; `None` for HMAC
    #[must_use]
    pub const fn key_type(self) -> Option<KeyType> {
        match self {
            Self::HS256 | Self::HS384 | Self::HS512 => None,
            Self::RS256 | Self::RS384 | Self::RS512 => Some(KeyType::Rsa),
            Self::ES256 => Some(KeyType::Ec(EcCurve::P256)),
            Self::ES384 => Some(KeyType::Ec(EcCurve::P384)),
            Self::ES512 => Some(KeyType::Ec(EcCurve::P521)),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        SUPPORTED_ALGORITHMS
            .into_iter()
            .find(|alg| alg.as_str() == name)
            .ok_or_else(|| Error::unsupported_algorithm().context(format!("alg {name:?}")))
    }
}

impl Serialize for Algorithm {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Algorithm {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
