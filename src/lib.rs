// SPDX-FileCopyrightText: The sharetoken authors
// SPDX-License-Identifier: MPL-2.0

#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(unreachable_pub)]
#![warn(unsafe_code)]
#![warn(clippy::pedantic)]
#![warn(rustdoc::broken_intra_doc_links)]
#![cfg_attr(not(test), deny(clippy::panic_in_result_fn))]
#![cfg_attr(not(debug_assertions), deny(clippy::used_underscore_binding))]

//! Compact, URL-safe tokens for sharing application state in a link.
//!
//! Text is compressed and the compressed bytes are written as a number
//! in radix 66, using only characters that never need to be
//! percent-encoded in a URL.
//!
//! Refer to [`docs`] for more information about the token format.

use std::{io, string::FromUtf8Error};

use derive_more::{Display, Error};

pub mod docs;

pub mod alphabet;

pub mod radix;

pub mod symbols;
pub use self::symbols::{decode_bytes, encode_bytes};

pub mod compress;
pub use self::compress::{Compressor, Gzip, Level};

pub mod state;
pub use self::state::{StateCodec, pack, unpack, unpack_or_default};

pub mod link;
pub use self::link::{LinkError, ShareLink};

pub mod summary;

/// An encoding error
#[derive(Debug, Display, Error)]
pub enum EncodeError {
    /// The compressor failed.
    #[display("failed to compress payload: {source}")]
    Compression {
        /// The cause
        source: io::Error,
    },
}

/// A decoding error
///
/// None of these errors are recoverable. A token that fails to decode
/// should be treated as absent.
#[derive(Debug, Display, Error)]
pub enum DecodeError {
    /// The token exceeds the length limit of the codec.
    #[display("token of {len} characters exceeds the limit of {limit} characters")]
    TokenTooLong {
        /// The length of the token in bytes
        len: usize,

        /// The maximum length
        limit: usize,
    },

    /// The token contains a character outside of the [alphabet](alphabet::ALPHABET).
    #[display("invalid character {character:?} at position {position}")]
    InvalidCharacter {
        /// The offending character
        character: char,

        /// The zero-based position of the character, counted in characters
        position: usize,
    },

    /// The decoded bytes are not a valid compressed stream.
    #[display("failed to decompress payload: {source}")]
    Decompression {
        /// The cause
        source: io::Error,
    },

    /// The decompressed bytes are not valid UTF-8.
    #[display("decompressed payload is not valid UTF-8: {source}")]
    InvalidUtf8 {
        /// The cause
        source: FromUtf8Error,
    },
}
