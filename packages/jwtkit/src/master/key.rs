//! Key Master Builder
//!
//! Master builder for key operations (generate, import)

use jwtkit_common::{CryptoTask, Result};
use jwtkit_key::{EcCurve, KeyGenerator, KeyMaterial, KeyPair, ModulusLength};

/// Master builder for key operations
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyMasterBuilder;

impl KeyMasterBuilder {
    /// RSA key pair generator
    #[must_use]
    pub fn rsa(self, modulus: ModulusLength) -> KeyGenerator {
        KeyGenerator::rsa(modulus)
    }

    /// EC key pair generator
    #[must_use]
    pub fn ec(self, curve: EcCurve) -> KeyGenerator {
        KeyGenerator::ec(curve)
    }

    /// RSA key pair from a bit count; anything but 1024, 2048 or 4096 fails
    pub fn generate(self, modulus_length_bits: u32) -> CryptoTask<KeyPair> {
        jwtkit_key::generate(modulus_length_bits)
    }

    /// Import a `PUBLIC KEY` or `PRIVATE KEY` PEM block
    ///
    /// # Errors
    /// `MalformedPem` if the block does not frame an SPKI or PKCS#8 key.
    pub fn from_pem(self, pem: &str) -> Result<KeyMaterial> {
        KeyMaterial::from_pem(pem)
    }
}
