//! Compact token encoding, decoding and verification

mod common;

use common::{credentials_for, SECRET};
use hex_literal::hex;
use jwtkit_common::encoding::{decode_url, encode_url};
use jwtkit_common::ErrorKind;
use jwtkit_jwt::{decode, supported_algorithms, Algorithm, Credential, JwtCodec, JwtHeader};
use proptest::prelude::*;
use serde_json::{json, Value};

const JWT_IO_TOKEN: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.\
eyJzdWIiOiIxMjM0NTY3ODkwIiwibmFtZSI6IkpvaG4gRG9lIiwiaWF0IjoxNTE2MjM5MDIyfQ.\
SflKxwRJSMeKKF2QT4fwpMeJf36POk6yJV_adQssw5c";

fn john_doe() -> Value {
    json!({"sub": "1234567890", "name": "John Doe", "iat": 1516239022})
}

/// Replace the signature segment of `token`
fn with_signature(token: &str, signature: &[u8]) -> String {
    let (signing_input, _) = token.rsplit_once('.').unwrap();
    format!("{signing_input}.{}", encode_url(signature))
}

#[test]
fn test_hs256_known_vector() {
    let codec = JwtCodec::new();
    let token = codec
        .encode(&john_doe(), Algorithm::HS256, &Credential::secret("your-256-bit-secret"))
        .unwrap();
    assert_eq!(token, JWT_IO_TOKEN);

    let decoded = decode(&token).unwrap();
    assert_eq!(
        decoded.signature(),
        hex!("49f94ac7044948c78a285d904f87f0a4c7897f7e8f3a4eb2255fda750b2cc397")
    );
    assert!(codec.verify(&decoded, &Credential::secret("your-256-bit-secret")).unwrap());
}

#[test]
fn test_hs256_secret_scenario() {
    let codec = JwtCodec::new();
    let token = codec
        .encode_json(
            r#"{"sub":"1234567890","name":"John Doe","iat":1516239022}"#,
            Algorithm::HS256,
            &Credential::secret("secret"),
        )
        .unwrap();

    let decoded = codec.decode(&token).unwrap();
    assert_eq!(decoded.payload(), &john_doe());
    assert_eq!(
        decoded.signature(),
        hex!("5db3df6c81cc23a6ab67763ddb60618d6810cd65dc5cdaf3d2882d5617c4776a")
    );
    assert!(codec.verify_token(&token, &Credential::secret("secret")).unwrap());
    assert!(!codec.verify_token(&token, &Credential::secret("wrong")).unwrap());
}

#[test]
fn test_header_layout() {
    let codec = JwtCodec::new();
    let token = codec
        .encode(&json!({"a": 1}), Algorithm::HS384, &Credential::secret(SECRET))
        .unwrap();
    let header_b64 = token.split('.').next().unwrap();
    let header = decode_url(header_b64).unwrap();
    assert_eq!(header, br#"{"alg":"HS384","typ":"JWT"}"#);

    let decoded = decode(&token).unwrap();
    assert_eq!(decoded.header(), &JwtHeader::new(Algorithm::HS384));
    assert_eq!(decoded.algorithm().unwrap(), Algorithm::HS384);
    assert_eq!(decoded.signature().len(), 48);
}

#[test]
fn test_key_id_is_carried() {
    let codec = JwtCodec::new();
    let header = JwtHeader::new(Algorithm::HS256).with_key_id("2024-rotation");
    let token = codec
        .encode_with_header(&header, &json!({"a": 1}), &Credential::secret(SECRET))
        .unwrap();

    let decoded = decode(&token).unwrap();
    assert_eq!(decoded.header().kid.as_deref(), Some("2024-rotation"));
    assert!(codec.verify(&decoded, &Credential::secret(SECRET)).unwrap());
}

#[test]
fn test_claims_must_be_object_or_array() {
    let codec = JwtCodec::new();
    let secret = Credential::secret(SECRET);
    for claims in ["42", "\"text\"", "null", "true", "{not json"] {
        let err = codec.encode_json(claims, Algorithm::HS256, &secret).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidPayload, "{claims}");
    }

    let token = codec.encode_json("[1,2,3]", Algorithm::HS256, &secret).unwrap();
    assert_eq!(decode(&token).unwrap().payload(), &json!([1, 2, 3]));
}

#[test]
fn test_structurally_broken_tokens() {
    let header = encode_url(br#"{"alg":"HS256"}"#);
    let payload = encode_url(b"{}");
    let cases = [
        "abc.def".to_string(),
        "a.b.c.d".to_string(),
        "..".to_string(),
        String::new(),
        format!("{header}.{payload}."),
        format!(".{payload}.AAAA"),
        format!("!!!.{payload}.AAAA"),
        format!("{}.{payload}.AAAA", encode_url(b"not json")),
        format!("{}.{payload}.AAAA", encode_url(b"\"HS256\"")),
        format!("{}.{payload}.AAAA", encode_url(b"[\"HS256\"]")),
        format!("{header}.{}.AAAA", encode_url(b"{\"a\":")),
        format!("{header}.{payload}.***"),
    ];
    for token in &cases {
        let err = decode(token).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedToken, "{token:?}");
    }
}

#[test]
fn test_unknown_algorithm_decodes_but_never_verifies() {
    let token = format!(
        "{}.{}.{}",
        encode_url(br#"{"alg":"none","typ":"JWT"}"#),
        encode_url(br#"{"admin":true}"#),
        encode_url(b"sig")
    );
    let decoded = decode(&token).unwrap();
    assert_eq!(decoded.header().alg.as_deref(), Some("none"));
    assert_eq!(decoded.payload(), &json!({"admin": true}));

    let codec = JwtCodec::new();
    let err = codec.verify(&decoded, &Credential::secret(SECRET)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedAlgorithm);
    let err = codec.verify_token(&token, &Credential::secret(SECRET)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedAlgorithm);
}

#[test]
fn test_extra_header_parameters_survive() {
    let token = format!(
        "{}.{}.{}",
        encode_url(br#"{"alg":"HS256","cty":"JWT","x5t":"abc"}"#),
        encode_url(b"{}"),
        encode_url(b"sig")
    );
    let header = decode(&token).unwrap().header().clone();
    assert_eq!(header.typ, None);
    assert_eq!(header.extra.get("cty"), Some(&json!("JWT")));
    assert_eq!(header.extra.get("x5t"), Some(&json!("abc")));
}

#[test]
fn test_loosely_typed_header_parameters_decode() {
    let payload = encode_url(b"{}");
    let token = |header: &[u8]| format!("{}.{payload}.AAAA", encode_url(header));

    let header = decode(&token(br#"{"alg":"HS256","kid":7}"#)).unwrap().header().clone();
    assert_eq!(header.alg.as_deref(), Some("HS256"));
    assert_eq!(header.kid, None);
    assert_eq!(header.extra.get("kid"), Some(&json!(7)));

    let header = decode(&token(br#"{"alg":"HS256","typ":1}"#)).unwrap().header().clone();
    assert_eq!(header.typ, None);
    assert_eq!(header.extra.get("typ"), Some(&json!(1)));
    assert_eq!(header.algorithm().unwrap(), Algorithm::HS256);

    let headless = token(br#"{"typ":"JWT"}"#);
    let decoded = decode(&headless).unwrap();
    assert_eq!(decoded.header().alg, None);
    assert_eq!(decoded.header().typ.as_deref(), Some("JWT"));
    let err = decoded.algorithm().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedAlgorithm);
    let err = JwtCodec::new()
        .verify_token(&headless, &Credential::secret(SECRET))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedAlgorithm);

    let header = decode(&token(br#"{"alg":["HS256"]}"#)).unwrap().header().clone();
    assert_eq!(header.alg, None);
    assert_eq!(header.extra.get("alg"), Some(&json!(["HS256"])));
}

#[test]
fn test_verify_uses_original_segments() {
    // Same claims, different whitespace: the signature covers the bytes sent
    let codec = JwtCodec::new();
    let header = encode_url(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = encode_url(br#"{ "sub" : "x" }"#);
    let signing_input = format!("{header}.{payload}");

    let signed = codec
        .encode(&json!({"sub": "x"}), Algorithm::HS256, &Credential::secret("secret"))
        .unwrap();
    let signature = signed.rsplit_once('.').unwrap().1;
    let forged = format!("{signing_input}.{signature}");
    assert!(!codec.verify_token(&forged, &Credential::secret("secret")).unwrap());
}

#[test]
fn test_undecodable_signature_is_a_mismatch() {
    let codec = JwtCodec::new();
    let token = codec
        .encode(&json!({"a": 1}), Algorithm::HS256, &Credential::secret(SECRET))
        .unwrap();
    let (signing_input, _) = token.rsplit_once('.').unwrap();
    let garbled = format!("{signing_input}.***");
    assert!(!codec.verify_token(&garbled, &Credential::secret(SECRET)).unwrap());
}

#[test]
fn test_surrounding_whitespace_is_ignored() {
    let codec = JwtCodec::new();
    let pasted = format!("  {JWT_IO_TOKEN}\n");
    assert!(codec
        .verify_token(&pasted, &Credential::secret("your-256-bit-secret"))
        .unwrap());
    assert_eq!(decode(&pasted).unwrap().signing_input(), JWT_IO_TOKEN.rsplit_once('.').unwrap().0);
}

#[test]
fn test_flipped_signature_bits_fail_every_algorithm() {
    let codec = JwtCodec::new();
    let claims = json!({"sub": "flip", "n": 7});
    for &algorithm in supported_algorithms() {
        let (signing, verifying) = credentials_for(algorithm);
        let token = codec.encode(&claims, algorithm, &signing).unwrap();
        assert!(codec.verify_token(&token, &verifying).unwrap(), "{algorithm}");

        let signature = decode(&token).unwrap().signature().to_vec();
        for index in [0, signature.len() / 2, signature.len() - 1] {
            let mut tampered = signature.clone();
            tampered[index] ^= 0x01;
            let forged = with_signature(&token, &tampered);
            assert!(!codec.verify_token(&forged, &verifying).unwrap(), "{algorithm} byte {index}");
        }

        let truncated = with_signature(&token, &signature[..signature.len() - 1]);
        assert!(!codec.verify_token(&truncated, &verifying).unwrap(), "{algorithm} truncated");
    }
}

#[test]
fn test_flipped_signature_characters_are_mismatches() {
    let codec = JwtCodec::new();
    let credential = Credential::secret(SECRET);
    let token = codec
        .encode(&json!({"sub": "chars"}), Algorithm::HS256, &credential)
        .unwrap();
    let (signing_input, signature) = token.rsplit_once('.').unwrap();

    for (index, original) in signature.bytes().enumerate() {
        for bit in 0..7 {
            let mut garbled = signature.as_bytes().to_vec();
            garbled[index] = original ^ (1 << bit);
            let garbled = String::from_utf8(garbled).unwrap();
            let forged = format!("{signing_input}.{garbled}");
            assert!(
                !codec.verify_token(&forged, &credential).unwrap(),
                "char {index} bit {bit}: {garbled}"
            );
        }
    }

    let mut dotted = signature.to_string();
    dotted.replace_range(5..6, ".");
    assert!(!codec
        .verify_token(&format!("{signing_input}.{dotted}"), &credential)
        .unwrap());
    assert!(!codec
        .verify_token(&format!("{signing_input}.{signature}."), &credential)
        .unwrap());
}

#[test]
fn test_tampered_payload_fails() {
    let codec = JwtCodec::new();
    let (signing, verifying) = credentials_for(Algorithm::ES256);
    let token = codec.encode(&json!({"admin": false}), Algorithm::ES256, &signing).unwrap();

    let mut segments: Vec<String> = token.split('.').map(str::to_string).collect();
    segments[1] = encode_url(br#"{"admin":true}"#);
    assert!(!codec.verify_token(&segments.join("."), &verifying).unwrap());
}

fn claims_strategy() -> impl Strategy<Value = Value> {
    prop::collection::btree_map(
        "[a-z_]{1,10}",
        prop_oneof![
            any::<i64>().prop_map(Value::from),
            "[ -~]{0,24}".prop_map(Value::from),
            any::<bool>().prop_map(Value::from),
        ],
        0..8,
    )
    .prop_map(|claims| Value::Object(claims.into_iter().collect()))
}

proptest! {
    #[test]
    fn prop_hmac_claims_survive(claims in claims_strategy(), secret in "[a-zA-Z0-9]{1,64}") {
        let codec = JwtCodec::new();
        let credential = Credential::secret(&secret);
        let token = codec.encode(&claims, Algorithm::HS512, &credential).unwrap();
        let decoded = decode(&token).unwrap();
        prop_assert_eq!(decoded.payload(), &claims);
        prop_assert!(codec.verify(&decoded, &credential).unwrap());

        let other = Credential::secret(format!("{secret}x"));
        prop_assert!(!codec.verify(&decoded, &other).unwrap());
    }
}
