//! Shared key fixtures; generation is slow, so each pair is made once

#![allow(dead_code)]

use jwtkit_jwt::{Algorithm, AlgorithmFamily, Credential};
use jwtkit_key::{EcCurve, KeyGenerator, KeyPair, ModulusLength};
use std::sync::OnceLock;

static RSA: OnceLock<KeyPair> = OnceLock::new();
static P256: OnceLock<KeyPair> = OnceLock::new();
static P384: OnceLock<KeyPair> = OnceLock::new();
static P521: OnceLock<KeyPair> = OnceLock::new();

pub const SECRET: &[u8] = b"a-shared-secret-of-sixty-four-bytes-for-every-hmac-variant-here!";

fn pair(cell: &'static OnceLock<KeyPair>, generator: KeyGenerator) -> &'static KeyPair {
    cell.get_or_init(|| generator.generate_blocking().unwrap())
}

pub fn rsa_pair() -> &'static KeyPair {
    pair(&RSA, KeyGenerator::rsa(ModulusLength::Bits2048))
}

pub fn ec_pair(curve: EcCurve) -> &'static KeyPair {
    match curve {
        EcCurve::P256 => pair(&P256, KeyGenerator::ec(EcCurve::P256)),
        EcCurve::P384 => pair(&P384, KeyGenerator::ec(EcCurve::P384)),
        EcCurve::P521 => pair(&P521, KeyGenerator::ec(EcCurve::P521)),
    }
}

pub fn pair_for(algorithm: Algorithm) -> Option<&'static KeyPair> {
    match algorithm {
        Algorithm::RS256 | Algorithm::RS384 | Algorithm::RS512 => Some(rsa_pair()),
        Algorithm::ES256 => Some(ec_pair(EcCurve::P256)),
        Algorithm::ES384 => Some(ec_pair(EcCurve::P384)),
        Algorithm::ES512 => Some(ec_pair(EcCurve::P521)),
        _ => None,
    }
}

/// `(signing, verifying)` credentials for any algorithm
pub fn credentials_for(algorithm: Algorithm) -> (Credential, Credential) {
    if algorithm.family() == AlgorithmFamily::Hmac {
        return (Credential::secret(SECRET), Credential::secret(SECRET));
    }
    let pair = pair_for(algorithm).unwrap();
    (
        Credential::from(pair.private_key().clone()),
        Credential::from(pair.public_key().clone()),
    )
}
