//! Error kind, context and cause propagation

use jwtkit_common::{Error, ErrorKind, LoggingTransformer, OptionExt, ResultExt};
use std::error::Error as _;

#[test]
fn test_kind_survives_context() {
    let err = Error::malformed_pem().context("missing END marker");
    assert_eq!(err.kind(), ErrorKind::MalformedPem);
    assert_eq!(err.get_context(), Some("missing END marker"));
    assert_eq!(err.to_string(), "malformed PEM: missing END marker");
}

#[test]
fn test_context_on_shared_error_chains_original() {
    let original = Error::invalid_key().context("modulus too small");
    let shared = original.clone();
    let wrapped = original.context("while importing");

    assert!(wrapped.is(ErrorKind::InvalidKey));
    assert_eq!(wrapped.get_context(), Some("while importing"));
    let cause = wrapped.source().map(ToString::to_string);
    assert_eq!(cause.as_deref(), Some("invalid key: modulus too small"));
    drop(shared);
}

#[test]
fn test_wrap_preserves_source() {
    let parsed: Result<u8, _> = "300".parse::<u8>();
    let err = parsed
        .wrap_with(ErrorKind::KeyGenerationFailed, "parsing modulus")
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::KeyGenerationFailed);
    assert!(err.source().is_some());
    assert!(err.to_string().contains("Caused by"));
}

#[test]
fn test_display_lists_each_cause_once() {
    let parsed = "x".parse::<u8>().wrap_with(ErrorKind::InvalidEncoding, "modulus");
    let original = parsed.unwrap_err();
    let shared = original.clone();
    let wrapped = original.context("while importing");

    assert_eq!(
        wrapped.to_string(),
        "invalid encoding: while importing\n\
         Caused by: invalid encoding: modulus\n\
         Caused by: invalid digit found in string"
    );
    assert_eq!(wrapped.to_string().matches("Caused by").count(), 2);
    assert_eq!(
        shared.to_string(),
        "invalid encoding: modulus\nCaused by: invalid digit found in string"
    );
}

#[test]
fn test_option_ext() {
    let missing: Option<&[u8]> = None;
    let err = missing
        .ok_or_kind(ErrorKind::MissingCredential, "HS256 requires a secret")
        .unwrap_err();
    assert!(err.is(ErrorKind::MissingCredential));
    assert!(err.to_string().contains("HS256"));
}

#[test]
fn test_err_macro_formats_context() {
    let alg = "RS256";
    let err = jwtkit_common::err!(unsupported_algorithm, "{alg} needs an RSA key");
    assert_eq!(err.kind(), ErrorKind::UnsupportedAlgorithm);
    assert_eq!(err.get_context(), Some("RS256 needs an RSA key"));
}

#[test]
fn test_ensure_macro_bails() {
    fn check(len: usize) -> jwtkit_common::Result<()> {
        jwtkit_common::ensure!(len == 3, malformed_token, "expected 3 segments, got {len}");
        Ok(())
    }
    assert!(check(3).is_ok());
    assert!(check(2).unwrap_err().is(ErrorKind::MalformedToken));
}

#[test]
fn test_error_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Error>();
}

#[test]
fn test_fingerprint_is_stable_and_short() {
    LoggingTransformer::init_test();

    let a = LoggingTransformer::fingerprint(b"sensitive_key_123");
    let b = LoggingTransformer::fingerprint(b"different_key_456");

    assert_ne!(a, b);
    assert_eq!(a, LoggingTransformer::fingerprint(b"sensitive_key_123"));
    assert!(a.starts_with('#'));
    assert_eq!(a.len(), 13);
}
