//! Import-time binding of key material to an algorithm and usage
//!
//! [`KeyMaterial`] is just bytes. A [`KeyImporter`] turns those bytes into a
//! primitive key object for exactly one [`KeyUsage`], checking along the way
//! that the key type is the one the caller's algorithm expects.

use crate::material::{EcCurve, KeyFormat, KeyMaterial, KeyType};
use jwtkit_common::{bail, ensure, ErrorKind, Result, ResultExt};
use p256::elliptic_curve::sec1::ToEncodedPoint;
use pkcs8::DecodePrivateKey;
use rsa::pkcs8::DecodePublicKey;
use rsa::{RsaPrivateKey, RsaPublicKey};
use std::fmt;

/// Operation a key is imported for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyUsage {
    /// Produce signatures
    Sign,
    /// Check signatures
    Verify,
    /// RSA-OAEP encryption
    Encrypt,
    /// RSA-OAEP decryption
    Decrypt,
}

impl fmt::Display for KeyUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sign => "sign",
            Self::Verify => "verify",
            Self::Encrypt => "encrypt",
            Self::Decrypt => "decrypt",
        })
    }
}

/// Private key imported for signing
pub enum SigningKey {
    /// RSA PKCS#1 v1.5
    Rsa(RsaPrivateKey),
    /// ECDSA on P-256
    P256(p256::ecdsa::SigningKey),
    /// ECDSA on P-384
    P384(p384::ecdsa::SigningKey),
    /// ECDSA on P-521
    P521(p521::ecdsa::SigningKey),
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Self::Rsa(_) => "Rsa",
            Self::P256(_) => "P256",
            Self::P384(_) => "P384",
            Self::P521(_) => "P521",
        };
        f.debug_tuple("SigningKey").field(&kind).finish()
    }
}

/// Public key imported for signature verification
pub enum VerifyingKey {
    /// RSA PKCS#1 v1.5
    Rsa(RsaPublicKey),
    /// ECDSA on P-256
    P256(p256::ecdsa::VerifyingKey),
    /// ECDSA on P-384
    P384(p384::ecdsa::VerifyingKey),
    /// ECDSA on P-521
    P521(p521::ecdsa::VerifyingKey),
}

impl fmt::Debug for VerifyingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Self::Rsa(_) => "Rsa",
            Self::P256(_) => "P256",
            Self::P384(_) => "P384",
            Self::P521(_) => "P521",
        };
        f.debug_tuple("VerifyingKey").field(&kind).finish()
    }
}

/// Capability to interpret key material for one usage
///
/// Every method checks the DER structure against the usage (private for
/// `Sign`/`Decrypt`, public for `Encrypt`) and the key type against what the
/// caller expects.
pub trait KeyImporter: Send + Sync + 'static {
    /// Import a private key for signing
    ///
    /// # Errors
    /// `UnsupportedAlgorithm` if the key is not of type `expected`;
    /// `InvalidKey` if the material is public or the primitive rejects it.
    fn import_signing(&self, material: &KeyMaterial, expected: KeyType) -> Result<SigningKey>;

    /// Import a key for verification; a private key yields its public half
    ///
    /// # Errors
    /// `UnsupportedAlgorithm` if the key is not of type `expected`;
    /// `InvalidKey` if the primitive rejects it.
    fn import_verifying(&self, material: &KeyMaterial, expected: KeyType) -> Result<VerifyingKey>;

    /// Import an RSA public key for OAEP encryption
    ///
    /// # Errors
    /// `UnsupportedAlgorithm` for a non-RSA key; `InvalidKey` for private
    /// material or a key the primitive rejects.
    fn import_rsa_encrypting(&self, material: &KeyMaterial) -> Result<RsaPublicKey>;

    /// Import an RSA private key for OAEP decryption
    ///
    /// # Errors
    /// `UnsupportedAlgorithm` for a non-RSA key; `InvalidKey` for public
    /// material or a key the primitive rejects.
    fn import_rsa_decrypting(&self, material: &KeyMaterial) -> Result<RsaPrivateKey>;
}

/// Importer backed by the RustCrypto `rsa`, `p256`, `p384` and `p521` crates
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeKeyImporter;

impl NativeKeyImporter {
    /// Create the native importer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn expect_type(material: &KeyMaterial, expected: KeyType, usage: KeyUsage) -> Result<()> {
    let actual = material.key_type()?;
    ensure!(
        actual == expected,
        unsupported_algorithm,
        "cannot {usage} with a {actual} key, algorithm needs {expected}"
    );
    Ok(())
}

fn expect_format(material: &KeyMaterial, format: KeyFormat, usage: KeyUsage) -> Result<()> {
    if material.format() != format {
        let needed = match format {
            KeyFormat::Spki => "public",
            KeyFormat::Pkcs8 => "private",
        };
        bail!(invalid_key, "{usage} needs a {needed} key");
    }
    Ok(())
}

macro_rules! ec_import {
    ($curve:ident, $sign_fn:ident, $verify_fn:ident, $public_from_private:ident) => {
        fn $sign_fn(der: &[u8]) -> Result<$curve::ecdsa::SigningKey> {
            let secret = $curve::SecretKey::from_pkcs8_der(der)
                .wrap_with(ErrorKind::InvalidKey, concat!(stringify!($curve), " private key"))?;
            $curve::ecdsa::SigningKey::from_bytes(&secret.to_bytes())
                .wrap_with(ErrorKind::InvalidKey, concat!(stringify!($curve), " signing key"))
        }

        fn $verify_fn(der: &[u8]) -> Result<$curve::ecdsa::VerifyingKey> {
            let public = $curve::PublicKey::from_public_key_der(der)
                .wrap_with(ErrorKind::InvalidKey, concat!(stringify!($curve), " public key"))?;
            $curve::ecdsa::VerifyingKey::from_sec1_bytes(public.to_encoded_point(false).as_bytes())
                .wrap_with(ErrorKind::InvalidKey, concat!(stringify!($curve), " verifying key"))
        }

        fn $public_from_private(der: &[u8]) -> Result<$curve::ecdsa::VerifyingKey> {
            let secret = $curve::SecretKey::from_pkcs8_der(der)
                .wrap_with(ErrorKind::InvalidKey, concat!(stringify!($curve), " private key"))?;
            $curve::ecdsa::VerifyingKey::from_sec1_bytes(
                secret.public_key().to_encoded_point(false).as_bytes(),
            )
            .wrap_with(ErrorKind::InvalidKey, concat!(stringify!($curve), " verifying key"))
        }
    };
}

ec_import!(p256, p256_signing, p256_verifying, p256_derived_verifying);
ec_import!(p384, p384_signing, p384_verifying, p384_derived_verifying);
ec_import!(p521, p521_signing, p521_verifying, p521_derived_verifying);

fn rsa_private(der: &[u8]) -> Result<RsaPrivateKey> {
    RsaPrivateKey::from_pkcs8_der(der).wrap_with(ErrorKind::InvalidKey, "RSA private key")
}

fn rsa_public(der: &[u8]) -> Result<RsaPublicKey> {
    RsaPublicKey::from_public_key_der(der).wrap_with(ErrorKind::InvalidKey, "RSA public key")
}

impl KeyImporter for NativeKeyImporter {
    fn import_signing(&self, material: &KeyMaterial, expected: KeyType) -> Result<SigningKey> {
        expect_type(material, expected, KeyUsage::Sign)?;
        expect_format(material, KeyFormat::Pkcs8, KeyUsage::Sign)?;
        let der = material.der();
        match expected {
            KeyType::Rsa => rsa_private(der).map(SigningKey::Rsa),
            KeyType::Ec(EcCurve::P256) => p256_signing(der).map(SigningKey::P256),
            KeyType::Ec(EcCurve::P384) => p384_signing(der).map(SigningKey::P384),
            KeyType::Ec(EcCurve::P521) => p521_signing(der).map(SigningKey::P521),
        }
    }

    fn import_verifying(&self, material: &KeyMaterial, expected: KeyType) -> Result<VerifyingKey> {
        expect_type(material, expected, KeyUsage::Verify)?;
        let der = material.der();
        match (material.format(), expected) {
            (KeyFormat::Spki, KeyType::Rsa) => rsa_public(der).map(VerifyingKey::Rsa),
            (KeyFormat::Spki, KeyType::Ec(EcCurve::P256)) => p256_verifying(der).map(VerifyingKey::P256),
            (KeyFormat::Spki, KeyType::Ec(EcCurve::P384)) => p384_verifying(der).map(VerifyingKey::P384),
            (KeyFormat::Spki, KeyType::Ec(EcCurve::P521)) => p521_verifying(der).map(VerifyingKey::P521),
            (KeyFormat::Pkcs8, KeyType::Rsa) => {
                rsa_private(der).map(|key| VerifyingKey::Rsa(key.to_public_key()))
            }
            (KeyFormat::Pkcs8, KeyType::Ec(EcCurve::P256)) => {
                p256_derived_verifying(der).map(VerifyingKey::P256)
            }
            (KeyFormat::Pkcs8, KeyType::Ec(EcCurve::P384)) => {
                p384_derived_verifying(der).map(VerifyingKey::P384)
            }
            (KeyFormat::Pkcs8, KeyType::Ec(EcCurve::P521)) => {
                p521_derived_verifying(der).map(VerifyingKey::P521)
            }
        }
    }

    fn import_rsa_encrypting(&self, material: &KeyMaterial) -> Result<RsaPublicKey> {
        expect_type(material, KeyType::Rsa, KeyUsage::Encrypt)?;
        expect_format(material, KeyFormat::Spki, KeyUsage::Encrypt)?;
        rsa_public(material.der())
    }

    fn import_rsa_decrypting(&self, material: &KeyMaterial) -> Result<RsaPrivateKey> {
        expect_type(material, KeyType::Rsa, KeyUsage::Decrypt)?;
        expect_format(material, KeyFormat::Pkcs8, KeyUsage::Decrypt)?;
        rsa_private(material.der())
    }
}
