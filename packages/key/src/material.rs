//! Algorithm-agnostic key material
//!
//! [`KeyMaterial`] is DER bytes plus a format tag and the PEM rendering of
//! those bytes. It never records what the key is *for*: the same RSA bytes
//! can be imported for signing today and for OAEP encryption tomorrow. The
//! interpretation is bound at import time (see [`crate::import`]).

use crate::pem::{self, PemKind};
use const_oid::db::rfc5912::{
    ID_EC_PUBLIC_KEY, RSA_ENCRYPTION, SECP_256_R_1, SECP_384_R_1, SECP_521_R_1,
};
use const_oid::ObjectIdentifier;
use jwtkit_common::{bail, Error, ErrorKind, OptionExt, Result, ResultExt};
use pkcs8::PrivateKeyInfo;
use sha2::{Digest, Sha256};
use spki::SubjectPublicKeyInfoRef;
use std::fmt;
use zeroize::Zeroizing;

/// DER structure of a key buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyFormat {
    /// `SubjectPublicKeyInfo`, the public half
    Spki,
    /// PKCS#8 `PrivateKeyInfo`, the private half
    Pkcs8,
}

impl KeyFormat {
    /// PEM block kind carrying this format
    #[must_use]
    pub const fn pem_kind(self) -> PemKind {
        match self {
            Self::Spki => PemKind::Public,
            Self::Pkcs8 => PemKind::Private,
        }
    }

    /// Whether this is the private half
    #[must_use]
    pub const fn is_private(self) -> bool {
        matches!(self, Self::Pkcs8)
    }
}

impl From<PemKind> for KeyFormat {
    fn from(kind: PemKind) -> Self {
        match kind {
            PemKind::Public => Self::Spki,
            PemKind::Private => Self::Pkcs8,
        }
    }
}

/// Named elliptic curves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EcCurve {
    /// NIST P-256 (secp256r1)
    P256,
    /// NIST P-384 (secp384r1)
    P384,
    /// NIST P-521 (secp521r1)
    P521,
}

impl EcCurve {
    fn from_oid(oid: ObjectIdentifier) -> Option<Self> {
        [
            (SECP_256_R_1, Self::P256),
            (SECP_384_R_1, Self::P384),
            (SECP_521_R_1, Self::P521),
        ]
        .into_iter()
        .find_map(|(known, curve)| (known == oid).then_some(curve))
    }

    /// Length of a fixed-width `r || s` signature on this curve
    #[must_use]
    pub const fn signature_len(self) -> usize {
        match self {
            Self::P256 => 64,
            Self::P384 => 96,
            Self::P521 => 132,
        }
    }
}

impl fmt::Display for EcCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::P256 => "P-256",
            Self::P384 => "P-384",
            Self::P521 => "P-521",
        })
    }
}

/// What kind of key a DER buffer holds, read from its algorithm identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    /// `rsaEncryption`
    Rsa,
    /// `id-ecPublicKey` on a named curve
    Ec(EcCurve),
}

impl KeyType {
    fn from_oids(algorithm: ObjectIdentifier, parameters: Option<ObjectIdentifier>) -> Result<Self> {
        if algorithm == RSA_ENCRYPTION {
            return Ok(Self::Rsa);
        }
        if algorithm != ID_EC_PUBLIC_KEY {
            bail!(unsupported_algorithm, "unsupported key algorithm {algorithm}");
        }
        match parameters {
            Some(oid) => EcCurve::from_oid(oid)
                .map(Self::Ec)
                .ok_or_kind(ErrorKind::UnsupportedAlgorithm, format!("unsupported curve {oid}")),
            None => Err(Error::unsupported_algorithm().context("EC key without a named curve")),
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rsa => f.write_str("RSA"),
            Self::Ec(curve) => write!(f, "EC {curve}"),
        }
    }
}

/// DER key bytes with their format and PEM rendering
///
/// Private material is zeroized on drop and redacted from `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyMaterial {
    format: KeyFormat,
    der: Zeroizing<Vec<u8>>,
    pem: Zeroizing<String>,
}

impl KeyMaterial {
    /// Parse a `PUBLIC KEY` or `PRIVATE KEY` PEM block
    ///
    /// # Errors
    /// `MalformedPem` if the framing is broken or the body is not an SPKI /
    /// PKCS#8 structure matching its label.
    pub fn from_pem(pem_text: &str) -> Result<Self> {
        let (kind, der) = pem::parse(pem_text)?;
        let format = KeyFormat::from(kind);
        check_structure(format, &der)
            .map_err(|e| Error::with_source(ErrorKind::MalformedPem, e))?;
        Ok(Self::assemble(format, der))
    }

    /// Wrap DER bytes of the given format
    ///
    /// # Errors
    /// `InvalidKey` if the bytes are not the named structure.
    pub fn from_der(format: KeyFormat, der: impl Into<Vec<u8>>) -> Result<Self> {
        let der = der.into();
        check_structure(format, &der)?;
        Ok(Self::assemble(format, der))
    }

    fn assemble(format: KeyFormat, der: Vec<u8>) -> Self {
        let pem = pem::wrap(&der, format.pem_kind());
        Self {
            format,
            der: Zeroizing::new(der),
            pem: Zeroizing::new(pem),
        }
    }

    /// DER structure of the bytes
    #[must_use]
    pub fn format(&self) -> KeyFormat {
        self.format
    }

    /// Raw DER bytes
    #[must_use]
    pub fn der(&self) -> &[u8] {
        &self.der
    }

    /// PEM rendering with 64-character lines
    #[must_use]
    pub fn pem(&self) -> &str {
        &self.pem
    }

    /// Key type named by the algorithm identifier
    ///
    /// # Errors
    /// `UnsupportedAlgorithm` for anything other than RSA or EC on P-256,
    /// P-384 or P-521.
    pub fn key_type(&self) -> Result<KeyType> {
        let (algorithm, parameters) = match self.format {
            KeyFormat::Spki => {
                let spki = SubjectPublicKeyInfoRef::try_from(self.der.as_slice())
                    .wrap(ErrorKind::InvalidKey)?;
                (spki.algorithm.oid, spki.algorithm.parameters_oid().ok())
            }
            KeyFormat::Pkcs8 => {
                let info = PrivateKeyInfo::try_from(self.der.as_slice())
                    .wrap(ErrorKind::InvalidKey)?;
                (info.algorithm.oid, info.algorithm.parameters_oid().ok())
            }
        };
        KeyType::from_oids(algorithm, parameters)
    }

    /// Hex SHA-256 digest of the DER bytes
    #[must_use]
    pub fn fingerprint(&self) -> String {
        hex::encode(Sha256::digest(self.der.as_slice()))
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dbg = f.debug_struct("KeyMaterial");
        dbg.field("format", &self.format).field("len", &self.der.len());
        if self.format.is_private() {
            dbg.field("der", &"<redacted>");
        } else {
            dbg.field("pem", &self.pem.as_str());
        }
        dbg.finish()
    }
}

fn check_structure(format: KeyFormat, der: &[u8]) -> Result<()> {
    match format {
        KeyFormat::Spki => SubjectPublicKeyInfoRef::try_from(der)
            .map(drop)
            .wrap_with(ErrorKind::InvalidKey, "not a SubjectPublicKeyInfo"),
        KeyFormat::Pkcs8 => PrivateKeyInfo::try_from(der)
            .map(drop)
            .wrap_with(ErrorKind::InvalidKey, "not a PKCS#8 PrivateKeyInfo"),
    }
}

/// Public and private halves produced by one generation call
///
/// Only the generator constructs pairs, so the halves are always linked.
#[derive(Debug, Clone)]
pub struct KeyPair {
    public: KeyMaterial,
    private: KeyMaterial,
}

impl KeyPair {
    pub(crate) fn new(public: KeyMaterial, private: KeyMaterial) -> Self {
        Self { public, private }
    }

    /// SPKI half
    #[must_use]
    pub fn public_key(&self) -> &KeyMaterial {
        &self.public
    }

    /// PKCS#8 half
    #[must_use]
    pub fn private_key(&self) -> &KeyMaterial {
        &self.private
    }

    /// Both PEM blocks, public first, separated by a blank line
    #[must_use]
    pub fn export(&self) -> String {
        format!("{}\n{}", self.public.pem(), self.private.pem())
    }

    /// Split into `(public, private)`
    #[must_use]
    pub fn into_parts(self) -> (KeyMaterial, KeyMaterial) {
        (self.public, self.private)
    }
}
