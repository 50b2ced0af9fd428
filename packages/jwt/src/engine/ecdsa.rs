//! ECDSA (ES256, ES384, ES512) with JWS `r || s` signatures
//!
//! The hash is fixed by the curve: P-256 with SHA-256, P-384 with SHA-384,
//! P-521 with SHA-512. The key importer has already checked that the key's
//! curve matches the algorithm.

use jwtkit_common::{bail, err, ErrorKind, Result, ResultExt};
use jwtkit_key::{SigningKey, VerifyingKey};
use p256::ecdsa::signature::{Signer, Verifier};

pub(crate) fn sign(key: &SigningKey, message: &[u8]) -> Result<Vec<u8>> {
    match key {
        SigningKey::P256(key) => Signer::<p256::ecdsa::Signature>::try_sign(key, message)
            .map(|signature| signature.to_bytes().to_vec()),
        SigningKey::P384(key) => Signer::<p384::ecdsa::Signature>::try_sign(key, message)
            .map(|signature| signature.to_bytes().to_vec()),
        SigningKey::P521(key) => Signer::<p521::ecdsa::Signature>::try_sign(key, message)
            .map(|signature| signature.to_bytes().to_vec()),
        SigningKey::Rsa(_) => {
            return Err(err!(unsupported_algorithm, "RSA key given to ECDSA"))
        }
    }
    .wrap_with(ErrorKind::InvalidKey, "ECDSA signing")
}

/// A signature of the wrong length or with out-of-range scalars is a mismatch
pub(crate) fn verify(key: &VerifyingKey, message: &[u8], signature: &[u8]) -> Result<bool> {
    let valid = match key {
        VerifyingKey::P256(key) => p256::ecdsa::Signature::from_slice(signature)
            .is_ok_and(|signature| key.verify(message, &signature).is_ok()),
        VerifyingKey::P384(key) => p384::ecdsa::Signature::from_slice(signature)
            .is_ok_and(|signature| key.verify(message, &signature).is_ok()),
        VerifyingKey::P521(key) => p521::ecdsa::Signature::from_slice(signature)
            .is_ok_and(|signature| key.verify(message, &signature).is_ok()),
        VerifyingKey::Rsa(_) => {
            bail!(unsupported_algorithm, "RSA key given to ECDSA")
        }
    };
    Ok(valid)
}
