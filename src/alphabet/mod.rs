// SPDX-FileCopyrightText: The sharetoken authors
// SPDX-License-Identifier: MPL-2.0

//! The symbol alphabet of tokens
//!
//! The alphabet consists of the 66 characters that are *unreserved* in URLs
//! (RFC 3986, section 2.3) and never need to be percent-encoded, neither in
//! a path segment nor in a query value.
//!
//! The position of a symbol in [`ALPHABET`] is its digit value. Tokens that
//! have been issued once remain decodable only as long as this order is kept.
//! Never reorder, insert, or remove symbols!

/// The ordered symbols
///
/// Uppercase letters, lowercase letters, decimal digits, and `-_.~`.
pub const ALPHABET: &[u8; 66] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_.~";

/// The radix of tokens, i.e. the number of symbols
pub const BASE: usize = ALPHABET.len();

const NO_DIGIT: u8 = u8::MAX;

// Reverse lookup: ASCII code -> digit
#[allow(clippy::cast_lossless, clippy::cast_possible_truncation)]
const DIGITS: [u8; 256] = {
    let mut digits = [NO_DIGIT; 256];
    let mut digit = 0;
    while digit < BASE {
        let symbol = ALPHABET[digit];
        assert!(
            symbol.is_ascii_alphanumeric() || matches!(symbol, b'-' | b'_' | b'.' | b'~'),
            "reserved URL character in alphabet"
        );
        assert!(
            digits[symbol as usize] == NO_DIGIT,
            "duplicate symbol in alphabet"
        );
        digits[symbol as usize] = digit as u8;
        digit += 1;
    }
    digits
};

/// Look up the digit value of a symbol.
///
/// Returns `None` if `symbol` is not contained in the alphabet.
#[must_use]
pub fn digit_of(symbol: char) -> Option<u8> {
    let code = u8::try_from(symbol).ok()?;
    let digit = DIGITS[usize::from(code)];
    (digit != NO_DIGIT).then_some(digit)
}

/// Look up the symbol of a digit value.
///
/// The `digit` must be less than [`BASE`].
#[must_use]
pub fn symbol_of(digit: u8) -> char {
    debug_assert!(usize::from(digit) < BASE);
    char::from(ALPHABET[usize::from(digit)])
}

/// Check if the given string consists only of alphabet symbols.
///
/// The empty string is a valid token.
#[must_use]
pub fn is_token(token: &str) -> bool {
    token.chars().all(|symbol| digit_of(symbol).is_some())
}
