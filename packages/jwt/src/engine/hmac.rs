//! HMAC-SHA2 (HS256, HS384, HS512)

use crate::algorithm::HashAlgorithm;
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use jwtkit_common::{Error, Result};
use sha2::{Sha256, Sha384, Sha512};

fn keyed<M: Mac + KeyInit>(secret: &[u8], message: &[u8]) -> Result<M> {
    let mut mac = <M as KeyInit>::new_from_slice(secret)
        .map_err(|_| Error::invalid_key().context("HMAC secret rejected"))?;
    mac.update(message);
    Ok(mac)
}

fn tag<M: Mac + KeyInit>(secret: &[u8], message: &[u8]) -> Result<Vec<u8>> {
    Ok(keyed::<M>(secret, message)?.finalize().into_bytes().to_vec())
}

fn check<M: Mac + KeyInit>(secret: &[u8], message: &[u8], signature: &[u8]) -> Result<bool> {
    // verify_slice compares in constant time and rejects wrong lengths
    Ok(keyed::<M>(secret, message)?.verify_slice(signature).is_ok())
}

#[inline]
pub(crate) fn sign(hash: HashAlgorithm, secret: &[u8], message: &[u8]) -> Result<Vec<u8>> {
    match hash {
        HashAlgorithm::Sha256 => tag::<Hmac<Sha256>>(secret, message),
        HashAlgorithm::Sha384 => tag::<Hmac<Sha384>>(secret, message),
        HashAlgorithm::Sha512 => tag::<Hmac<Sha512>>(secret, message),
    }
}

#[inline]
pub(crate) fn verify(
    hash: HashAlgorithm,
    secret: &[u8],
    message: &[u8],
    signature: &[u8],
) -> Result<bool> {
    match hash {
        HashAlgorithm::Sha256 => check::<Hmac<Sha256>>(secret, message, signature),
        HashAlgorithm::Sha384 => check::<Hmac<Sha384>>(secret, message, signature),
        HashAlgorithm::Sha512 => check::<Hmac<Sha512>>(secret, message, signature),
    }
}
