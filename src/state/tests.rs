// SPDX-FileCopyrightText: The sharetoken authors
// SPDX-License-Identifier: MPL-2.0

use std::io;

use proptest::prelude::*;

use super::*;
use crate::{alphabet::is_token, compress::Level};

const CONFIG: &str = r#"POST https://api.example.com/users
Content-Type: application/json

{
  "name": "test",
  "email": "test@example.com"
}"#;

#[test]
fn pack_unpack() {
    for text in [
        "Hello, World!",
        "hello world",
        CONFIG,
        "Line 1\nLine 2\r\nLine 3\tTabbed",
        "你好世界 🌍 مرحبا Привет",
        "Testing URL safety with special chars: &=+/?#[]@!$'()*,;",
    ] {
        let token = pack(text).unwrap();
        assert!(is_token(&token), "{token}");
        assert_eq!(text, unpack(&token).unwrap());
    }
}

#[test]
fn pack_unpack_empty_text() {
    let token = pack("").unwrap();
    // The compressed stream is never empty.
    assert!(!token.is_empty());
    assert_eq!("", unpack(&token).unwrap());
}

#[test]
fn pack_unpack_nul_characters() {
    let text = "\0".repeat(10_000);
    assert_eq!(text, unpack(&pack(&text).unwrap()).unwrap());
}

#[test]
fn pack_is_deterministic() {
    assert_eq!(pack(CONFIG).unwrap(), pack(CONFIG).unwrap());
}

#[test]
fn different_texts_result_in_different_tokens() {
    assert_ne!(pack("State 1").unwrap(), pack("State 2").unwrap());
}

#[test]
fn repetitive_text_is_shortened() {
    let text = "x".repeat(10_000);
    assert!(pack(&text).unwrap().len() < text.len());
    let text = "Lorem ipsum dolor sit amet. ".repeat(100);
    assert!(pack(&text).unwrap().len() < text.len());
}

#[test]
fn pack_unpack_bytes() {
    let codec = StateCodec::<Gzip>::default();
    let data = [0x00, 0xff, 0x00, 0xfe, 0x80];
    let token = codec.pack_bytes(&data).unwrap();
    // Leading zero bytes of the payload survive because the
    // compressed stream never starts with a zero byte.
    assert_eq!(data.to_vec(), codec.unpack_bytes(&token).unwrap());
}

#[test]
fn compression_levels_are_compatible() {
    let fast = StateCodec::new(Gzip::new(Level::Fast));
    let best = StateCodec::new(Gzip::new(Level::Best));
    assert_eq!(CONFIG, best.unpack(&fast.pack(CONFIG).unwrap()).unwrap());
    assert_eq!(fast.compressor().level(), Level::Fast);
}

#[test]
fn should_fail_to_unpack_foreign_character() {
    assert!(matches!(
        unpack("abc$def"),
        Err(DecodeError::InvalidCharacter { character: '$', .. })
    ));
}

#[test]
fn should_fail_to_unpack_truncated_token() {
    let token = pack("Hello, World!").unwrap();
    let truncated = &token[..token.len() - 5];
    assert!(matches!(
        unpack(truncated),
        Err(DecodeError::Decompression { .. } | DecodeError::InvalidCharacter { .. })
    ));
}

#[test]
fn should_fail_to_unpack_non_compressed_data() {
    let token = encode_bytes(b"Hello, World!");
    assert!(matches!(
        unpack(&token),
        Err(DecodeError::Decompression { .. })
    ));
}

#[test]
fn should_fail_to_unpack_non_utf8_payload() {
    let codec = StateCodec::<Gzip>::default();
    let token = codec.pack_bytes(&[0xc3, 0x28]).unwrap();
    assert!(matches!(
        codec.unpack(&token),
        Err(DecodeError::InvalidUtf8 { .. })
    ));
    assert_eq!(vec![0xc3, 0x28], codec.unpack_bytes(&token).unwrap());
}

#[test]
fn should_fail_to_unpack_oversized_payload() {
    let text = "x".repeat(1_000);
    let token = pack(&text).unwrap();
    let limited = StateCodec::new(Gzip::default().with_limit(999));
    assert!(matches!(
        limited.unpack(&token),
        Err(DecodeError::Decompression { .. })
    ));
}

#[test]
fn should_fail_to_unpack_overlong_token() {
    assert_eq!(DEFAULT_TOKEN_LIMIT, StateCodec::<Gzip>::default().token_limit());
    let token = "B".repeat(100_000);
    assert!(matches!(
        unpack(&token),
        Err(DecodeError::TokenTooLong {
            len: 100_000,
            limit: DEFAULT_TOKEN_LIMIT
        })
    ));
    assert_eq!("", unpack_or_default(&token));
}

#[test]
fn token_limit_is_inclusive() {
    let token = pack(CONFIG).unwrap();
    let exact = StateCodec::<Gzip>::default().with_token_limit(token.len());
    assert_eq!(CONFIG, exact.unpack(&token).unwrap());
    let short = exact.with_token_limit(token.len() - 1);
    assert!(matches!(
        short.unpack(&token),
        Err(DecodeError::TokenTooLong { .. })
    ));
    // Packing is not limited.
    assert_eq!(token, short.pack(CONFIG).unwrap());
}

#[test]
fn unpack_or_default_falls_back_to_empty_state() {
    assert_eq!("", unpack_or_default("not a token!"));
    assert_eq!("", unpack_or_default("Hello"));
    assert_eq!(CONFIG, unpack_or_default(&pack(CONFIG).unwrap()));
}

#[derive(Debug)]
struct FailingCompressor;

impl Compressor for FailingCompressor {
    fn compress(&self, _data: &[u8]) -> io::Result<Vec<u8>> {
        Err(io::Error::other("out of order"))
    }

    fn decompress(&self, _data: &[u8]) -> io::Result<Vec<u8>> {
        Err(io::Error::other("out of order"))
    }
}

/// Stores the data verbatim behind a zero byte
#[derive(Debug, Default)]
struct ZeroPrefixCompressor;

impl Compressor for ZeroPrefixCompressor {
    fn compress(&self, data: &[u8]) -> io::Result<Vec<u8>> {
        let mut compressed = vec![0];
        compressed.extend_from_slice(data);
        Ok(compressed)
    }

    fn decompress(&self, data: &[u8]) -> io::Result<Vec<u8>> {
        match data.split_first() {
            Some((0, data)) => Ok(data.to_vec()),
            _ => Err(io::Error::new(io::ErrorKind::InvalidData, "missing zero byte")),
        }
    }
}

#[test]
fn packing_with_zero_prefixed_compressor_does_not_panic() {
    let codec = StateCodec::<ZeroPrefixCompressor>::default();
    let token = codec.pack("text").unwrap();
    assert_eq!(encode_bytes(b"text"), token);
    // The leading zero byte is lost.
    assert!(matches!(
        codec.unpack(&token),
        Err(DecodeError::Decompression { .. })
    ));
}

#[test]
fn compressor_errors_are_propagated() {
    let codec = StateCodec::new(FailingCompressor);
    assert!(matches!(
        codec.pack("text"),
        Err(EncodeError::Compression { .. })
    ));
    assert!(matches!(
        codec.unpack("Hello"),
        Err(DecodeError::Decompression { .. })
    ));
}

proptest! {
    #[test]
    fn round_trip(text in "\\PC*") {
        let token = pack(&text).unwrap();
        prop_assert!(is_token(&token));
        prop_assert_eq!(text, unpack(&token).unwrap());
    }

    #[test]
    fn unpacking_arbitrary_tokens_does_not_panic(token in "[A-Za-z0-9_.~-]{0,64}") {
        drop(unpack(&token));
    }
}
