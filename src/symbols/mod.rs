// SPDX-FileCopyrightText: The sharetoken authors
// SPDX-License-Identifier: MPL-2.0

//! Byte-to-symbol codec
//!
//! Bytes are read as a big-endian number in radix 256 and written as
//! a big-endian number in radix [`BASE`] using the symbols of the [alphabet](crate::alphabet).
//! No padding is added, the encoding uses the minimal number of symbols.
//!
//! # Leading zero bytes
//!
//! Leading zero bytes do not affect the numeric value and are dropped
//! when encoding. They cannot be restored when decoding. Callers that need
//! to preserve the exact length must embed it into the payload, the
//! encoding must not be changed.

use crate::{
    DecodeError,
    alphabet::{BASE, digit_of, symbol_of},
    radix,
};

const BYTE_RADIX: u32 = 256;

#[allow(clippy::cast_possible_truncation)] // 66
const SYMBOL_RADIX: u32 = BASE as u32;

/// Encode bytes as symbols.
///
/// An empty input or an input that consists only of zero bytes is
/// encoded as an empty string.
#[must_use]
pub fn encode_bytes(bytes: &[u8]) -> String {
    radix::convert(bytes, BYTE_RADIX, SYMBOL_RADIX)
        .into_iter()
        .map(symbol_of)
        .collect()
}

/// Decode symbols into bytes.
///
/// The empty string is decoded into no bytes. The result never starts
/// with a zero byte.
///
/// # Errors
///
/// Returns [`DecodeError::InvalidCharacter`] for the first character in
/// `symbols` that is not contained in the alphabet.
pub fn decode_bytes(symbols: &str) -> Result<Vec<u8>, DecodeError> {
    let digits = symbols
        .chars()
        .enumerate()
        .map(|(position, character)| {
            digit_of(character).ok_or(DecodeError::InvalidCharacter {
                character,
                position,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(radix::convert(&digits, SYMBOL_RADIX, BYTE_RADIX))
}

#[cfg(test)]
mod tests;
