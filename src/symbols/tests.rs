// SPDX-FileCopyrightText: The sharetoken authors
// SPDX-License-Identifier: MPL-2.0

use proptest::prelude::*;

use super::*;
use crate::alphabet::is_token;

#[test]
fn empty_input() {
    assert_eq!("", encode_bytes(&[]));
    assert!(decode_bytes("").unwrap().is_empty());
}

#[test]
fn zero_is_encoded_as_empty_string() {
    assert_eq!("", encode_bytes(&[0]));
    assert_eq!("", encode_bytes(&[0, 0, 0]));
    assert!(decode_bytes("A").unwrap().is_empty());
    assert!(decode_bytes("AAAA").unwrap().is_empty());
}

#[test]
fn known_encodings() {
    assert_eq!("B", encode_bytes(&[1]));
    assert_eq!("~", encode_bytes(&[65]));
    assert_eq!("BA", encode_bytes(&[66]));
    // 255 = 3 * 66 + 57
    assert_eq!("D5", encode_bytes(&[255]));
    assert_eq!(vec![255], decode_bytes("D5").unwrap());
}

#[test]
fn hello_round_trip() {
    let bytes = [72, 101, 108, 108, 111];
    let encoded = encode_bytes(&bytes);
    assert!(is_token(&encoded));
    assert_eq!(bytes.to_vec(), decode_bytes(&encoded).unwrap());
}

#[test]
fn leading_zero_bytes_are_lost() {
    assert_eq!(vec![1], decode_bytes(&encode_bytes(&[0, 0, 1])).unwrap());
    assert_eq!(vec![255], decode_bytes(&encode_bytes(&[0, 255])).unwrap());
}

#[test]
fn leading_zero_symbols_are_insignificant() {
    assert_eq!(decode_bytes("B").unwrap(), decode_bytes("AAAB").unwrap());
}

#[test]
fn should_fail_to_decode_foreign_character() {
    let err = decode_bytes("abc$def").unwrap_err();
    assert!(matches!(
        err,
        DecodeError::InvalidCharacter {
            character: '$',
            position: 3
        }
    ));
    assert!(err.to_string().contains('$'));
}

#[test]
fn should_report_first_foreign_character() {
    assert!(matches!(
        decode_bytes("a b+c").unwrap_err(),
        DecodeError::InvalidCharacter {
            character: ' ',
            position: 1
        }
    ));
    // Positions are counted in characters, not bytes.
    assert!(matches!(
        decode_bytes("äb=").unwrap_err(),
        DecodeError::InvalidCharacter {
            character: 'ä',
            position: 0
        }
    ));
    assert!(matches!(
        decode_bytes("Ab=").unwrap_err(),
        DecodeError::InvalidCharacter {
            character: '=',
            position: 2
        }
    ));
}

#[test]
fn long_tokens() {
    let token = "~".repeat(20_000);
    let bytes = decode_bytes(&token).unwrap();
    assert_eq!(15_111, bytes.len());
    assert_eq!(token, encode_bytes(&bytes));
}

fn without_leading_zero() -> impl Strategy<Value = Vec<u8>> {
    (1u8..=255, proptest::collection::vec(any::<u8>(), 0..128)).prop_map(|(first, rest)| {
        let mut bytes = Vec::with_capacity(1 + rest.len());
        bytes.push(first);
        bytes.extend(rest);
        bytes
    })
}

proptest! {
    #[test]
    fn round_trip(bytes in without_leading_zero()) {
        prop_assert_eq!(&bytes, &decode_bytes(&encode_bytes(&bytes)).unwrap());
    }

    #[test]
    fn encoded_symbols_are_from_alphabet(bytes in proptest::collection::vec(any::<u8>(), 0..128)) {
        prop_assert!(is_token(&encode_bytes(&bytes)));
    }

    #[test]
    fn distinct_inputs_have_distinct_encodings(
        lhs in without_leading_zero(),
        rhs in without_leading_zero(),
    ) {
        prop_assume!(lhs != rhs);
        prop_assert_ne!(encode_bytes(&lhs), encode_bytes(&rhs));
    }

    #[test]
    fn decoding_arbitrary_strings_does_not_panic(input in "\\PC*") {
        drop(decode_bytes(&input));
    }
}
