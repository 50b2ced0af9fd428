//! Key pair generation
//!
//! RSA generation at 2048 bits and above takes long enough to matter, so
//! [`KeyGenerator::generate`] hands the work to the blocking pool and
//! returns a [`CryptoTask`]. Every call draws fresh randomness from the OS;
//! two calls never return the same pair.

use crate::material::{EcCurve, KeyFormat, KeyMaterial, KeyPair};
use jwtkit_common::{CryptoTask, Error, ErrorKind, LoggingTransformer, Result, ResultExt};
use pkcs8::EncodePrivateKey;
use rand::rngs::OsRng;
use rsa::pkcs8::EncodePublicKey;
use rsa::{RsaPrivateKey, RsaPublicKey};

/// RSA modulus sizes offered for generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ModulusLength {
    /// 1024 bits; accepted for interop, logged as weak
    Bits1024,
    /// 2048 bits
    #[default]
    Bits2048,
    /// 4096 bits
    Bits4096,
}

impl ModulusLength {
    /// Every supported length, shortest first
    pub const ALL: [Self; 3] = [Self::Bits1024, Self::Bits2048, Self::Bits4096];

    /// Modulus length in bits
    #[must_use]
    pub const fn bits(self) -> usize {
        match self {
            Self::Bits1024 => 1024,
            Self::Bits2048 => 2048,
            Self::Bits4096 => 4096,
        }
    }
}

impl TryFrom<u32> for ModulusLength {
    type Error = Error;

    fn try_from(bits: u32) -> Result<Self> {
        match bits {
            1024 => Ok(Self::Bits1024),
            2048 => Ok(Self::Bits2048),
            4096 => Ok(Self::Bits4096),
            other => Err(Error::key_generation_failed()
                .context(format!("unsupported RSA modulus length {other}, expected 1024, 2048 or 4096"))),
        }
    }
}

/// What a [`KeyGenerator`] produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeySpec {
    /// RSA with public exponent 65537
    Rsa(ModulusLength),
    /// EC key on a named curve
    Ec(EcCurve),
}

/// Generates linked public/private key pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyGenerator {
    spec: KeySpec,
}

impl Default for KeyGenerator {
    fn default() -> Self {
        Self::rsa(ModulusLength::default())
    }
}

impl KeyGenerator {
    /// RSA key pairs of the given modulus length
    #[must_use]
    pub const fn rsa(modulus: ModulusLength) -> Self {
        Self {
            spec: KeySpec::Rsa(modulus),
        }
    }

    /// EC key pairs on the given curve
    #[must_use]
    pub const fn ec(curve: EcCurve) -> Self {
        Self {
            spec: KeySpec::Ec(curve),
        }
    }

    /// What this generator produces
    #[must_use]
    pub const fn spec(&self) -> KeySpec {
        self.spec
    }

    /// Always `false`: each call yields a different pair, so a failed or
    /// discarded generation cannot be replayed by retrying it
    #[must_use]
    pub const fn is_deterministic(&self) -> bool {
        false
    }

    /// Generate a pair on the blocking pool
    pub fn generate(self) -> CryptoTask<KeyPair> {
        CryptoTask::spawn("key generation", move || self.generate_blocking())
    }

    /// Generate a pair on the current thread
    ///
    /// # Errors
    /// `KeyGenerationFailed` wrapping the primitive's error.
    pub fn generate_blocking(&self) -> Result<KeyPair> {
        let pair = match self.spec {
            KeySpec::Rsa(modulus) => generate_rsa(modulus),
            KeySpec::Ec(curve) => generate_ec(curve),
        };
        match pair {
            Ok(pair) => {
                log::debug!(
                    "Generated {:?} key pair {}",
                    self.spec,
                    LoggingTransformer::fingerprint(pair.public_key().der())
                );
                Ok(pair)
            }
            Err(e) => {
                LoggingTransformer::log_crypto_error("key generation", &e);
                Err(e)
            }
        }
    }
}

/// Generate an RSA key pair, validating the modulus length first
///
/// # Errors
/// `KeyGenerationFailed` for a length other than 1024, 2048 or 4096.
pub fn generate(modulus_length_bits: u32) -> CryptoTask<KeyPair> {
    match ModulusLength::try_from(modulus_length_bits) {
        Ok(modulus) => KeyGenerator::rsa(modulus).generate(),
        Err(e) => CryptoTask::ready("key generation", Err(e)),
    }
}

fn generate_rsa(modulus: ModulusLength) -> Result<KeyPair> {
    if modulus == ModulusLength::Bits1024 {
        log::warn!("Generating a 1024-bit RSA key; use 2048 bits or more outside of testing");
    }

    let private_key = RsaPrivateKey::new(&mut OsRng, modulus.bits())
        .wrap_with(ErrorKind::KeyGenerationFailed, format!("RSA-{}", modulus.bits()))?;
    let public_key = RsaPublicKey::from(&private_key);

    let private_der = private_key
        .to_pkcs8_der()
        .wrap_with(ErrorKind::KeyGenerationFailed, "PKCS#8 encoding")?;
    let public_der = public_key
        .to_public_key_der()
        .wrap_with(ErrorKind::KeyGenerationFailed, "SPKI encoding")?;

    assemble(public_der.as_bytes(), private_der.as_bytes())
}

macro_rules! generate_ec {
    ($curve:ident) => {{
        let secret = $curve::SecretKey::random(&mut OsRng);
        let private_der = secret
            .to_pkcs8_der()
            .wrap_with(ErrorKind::KeyGenerationFailed, "PKCS#8 encoding")?;
        let public_der = secret
            .public_key()
            .to_public_key_der()
            .wrap_with(ErrorKind::KeyGenerationFailed, "SPKI encoding")?;
        assemble(public_der.as_bytes(), private_der.as_bytes())
    }};
}

fn generate_ec(curve: EcCurve) -> Result<KeyPair> {
    match curve {
        EcCurve::P256 => generate_ec!(p256),
        EcCurve::P384 => generate_ec!(p384),
        EcCurve::P521 => generate_ec!(p521),
    }
}

fn assemble(public_der: &[u8], private_der: &[u8]) -> Result<KeyPair> {
    let public = KeyMaterial::from_der(KeyFormat::Spki, public_der)
        .map_err(|e| Error::with_source(ErrorKind::KeyGenerationFailed, e))?;
    let private = KeyMaterial::from_der(KeyFormat::Pkcs8, private_der)
        .map_err(|e| Error::with_source(ErrorKind::KeyGenerationFailed, e))?;
    Ok(KeyPair::new(public, private))
}
