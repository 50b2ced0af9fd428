//! Base64 codecs for token segments and PEM bodies
//!
//! Two alphabets are in play:
//! - base64url without padding for JWT segments (RFC 7515 §2)
//! - standard padded base64 for PEM bodies (RFC 7468)

use crate::error::{ErrorKind, Result, ResultExt};
use base64::Engine as _;
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;

/// URL-safe alphabet; never emits `=`, accepts it when present on decode
const URL_SAFE_INDIFFERENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encode bytes as unpadded base64url
#[inline]
#[must_use]
pub fn encode_url(input: &[u8]) -> String {
    URL_SAFE_INDIFFERENT.encode(input)
}

/// Decode base64url text, inferring any missing padding
///
/// # Errors
/// `InvalidEncoding` for characters outside the URL-safe alphabet
/// (including `+` and `/`) or non-canonical trailing bits.
#[inline]
pub fn decode_url(input: &str) -> Result<Vec<u8>> {
    URL_SAFE_INDIFFERENT
        .decode(input)
        .wrap_with(ErrorKind::InvalidEncoding, "base64url")
}

/// Encode bytes as standard padded base64
#[inline]
#[must_use]
pub fn encode_std(input: &[u8]) -> String {
    STANDARD.encode(input)
}

/// Decode standard padded base64
///
/// # Errors
/// `InvalidEncoding` for characters outside the standard alphabet or bad padding.
#[inline]
pub fn decode_std(input: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(input)
        .wrap_with(ErrorKind::InvalidEncoding, "base64")
}
