//! Base64 / base64url codec behaviour

use jwtkit_common::encoding::{decode_std, decode_url, encode_std, encode_url};
use jwtkit_common::ErrorKind;
use proptest::prelude::*;

#[test]
fn test_url_encoding_uses_safe_alphabet_without_padding() {
    // 0xfb 0xff encodes to "+/8=" in the standard alphabet
    assert_eq!(encode_std(&[0xfb, 0xff]), "+/8=");
    assert_eq!(encode_url(&[0xfb, 0xff]), "-_8");
}

#[test]
fn test_url_decoding_infers_padding() {
    assert_eq!(decode_url("-_8").unwrap(), vec![0xfb, 0xff]);
    assert_eq!(decode_url("-_8=").unwrap(), vec![0xfb, 0xff]);
    assert_eq!(decode_url("e30").unwrap(), b"{}".to_vec());
}

#[test]
fn test_url_decoding_rejects_standard_alphabet() {
    let err = decode_url("+/8").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidEncoding);
}

#[test]
fn test_url_decoding_rejects_garbage() {
    assert!(decode_url("!!!invalid!!!").unwrap_err().is(ErrorKind::InvalidEncoding));
    assert!(decode_url("ab cd").unwrap_err().is(ErrorKind::InvalidEncoding));
}

#[test]
fn test_std_decoding_requires_padding() {
    assert_eq!(decode_std("+/8=").unwrap(), vec![0xfb, 0xff]);
    assert!(decode_std("+/8").unwrap_err().is(ErrorKind::InvalidEncoding));
}

#[test]
fn test_empty_input() {
    assert_eq!(encode_url(&[]), "");
    assert!(decode_url("").unwrap().is_empty());
}

proptest! {
    #[test]
    fn prop_url_round_trip(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
        let encoded = encode_url(&bytes);
        prop_assert!(!encoded.contains('='));
        prop_assert!(!encoded.contains('+'));
        prop_assert!(!encoded.contains('/'));
        prop_assert_eq!(decode_url(&encoded).unwrap(), bytes);
    }

    #[test]
    fn prop_std_round_trip(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
        prop_assert_eq!(decode_std(&encode_std(&bytes)).unwrap(), bytes);
    }
}
