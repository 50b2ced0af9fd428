//! RSASSA-PKCS1-v1_5 (RS256, RS384, RS512)

use crate::algorithm::HashAlgorithm;
use jwtkit_common::{ErrorKind, Result, ResultExt};
use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::sha2::{Sha256, Sha384, Sha512};
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use rsa::{RsaPrivateKey, RsaPublicKey};

pub(crate) fn sign(hash: HashAlgorithm, key: RsaPrivateKey, message: &[u8]) -> Result<Vec<u8>> {
    let signature = match hash {
        HashAlgorithm::Sha256 => SigningKey::<Sha256>::new(key).try_sign(message),
        HashAlgorithm::Sha384 => SigningKey::<Sha384>::new(key).try_sign(message),
        HashAlgorithm::Sha512 => SigningKey::<Sha512>::new(key).try_sign(message),
    };
    signature
        .map(|signature| signature.to_vec())
        .wrap_with(ErrorKind::InvalidKey, "RSA signing")
}

/// Any shape problem with the signature is a mismatch, not an error
pub(crate) fn verify(hash: HashAlgorithm, key: RsaPublicKey, message: &[u8], signature: &[u8]) -> bool {
    let Ok(signature) = Signature::try_from(signature) else {
        return false;
    };
    match hash {
        HashAlgorithm::Sha256 => VerifyingKey::<Sha256>::new(key).verify(message, &signature),
        HashAlgorithm::Sha384 => VerifyingKey::<Sha384>::new(key).verify(message, &signature),
        HashAlgorithm::Sha512 => VerifyingKey::<Sha512>::new(key).verify(message, &signature),
    }
    .is_ok()
}
