// SPDX-FileCopyrightText: The sharetoken authors
// SPDX-License-Identifier: MPL-2.0

//! Packing state into tokens
//!
//! The state is an arbitrary text, usually a serialized document.
//! Packing compresses its UTF-8 representation and encodes the
//! compressed bytes as symbols. Unpacking reverses these steps.

use crate::{
    DecodeError, EncodeError,
    compress::{Compressor, Gzip},
    symbols::{decode_bytes, encode_bytes},
};

/// The default maximum length of tokens that are unpacked
///
/// Decoding time grows quadratically with the token length. Tokens of
/// this length carry 48 KiB of compressed data.
pub const DEFAULT_TOKEN_LIMIT: usize = 65_536;

/// Packs and unpacks state with a [`Compressor`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateCodec<C = Gzip> {
    compressor: C,
    token_limit: usize,
}

impl<C> StateCodec<C> {
    /// Create a codec.
    #[must_use]
    pub const fn new(compressor: C) -> Self {
        Self {
            compressor,
            token_limit: DEFAULT_TOKEN_LIMIT,
        }
    }

    /// Limit the length of tokens that are unpacked.
    ///
    /// Longer tokens are rejected before decoding. Packing is not affected.
    #[must_use]
    pub fn with_token_limit(self, token_limit: usize) -> Self {
        Self {
            token_limit,
            ..self
        }
    }

    /// The compressor
    #[must_use]
    pub const fn compressor(&self) -> &C {
        &self.compressor
    }

    /// The maximum length of tokens that are unpacked
    #[must_use]
    pub const fn token_limit(&self) -> usize {
        self.token_limit
    }
}

impl<C> Default for StateCodec<C>
where
    C: Default,
{
    fn default() -> Self {
        Self::new(C::default())
    }
}

impl<C> StateCodec<C>
where
    C: Compressor,
{
    /// Pack text into a token.
    ///
    /// The same text always results in the same token.
    ///
    /// # Errors
    ///
    /// Returns an [`EncodeError`] if compression fails.
    pub fn pack(&self, text: &str) -> Result<String, EncodeError> {
        self.pack_bytes(text.as_bytes())
    }

    /// Pack binary data into a token.
    ///
    /// # Errors
    ///
    /// Returns an [`EncodeError`] if compression fails.
    pub fn pack_bytes(&self, data: &[u8]) -> Result<String, EncodeError> {
        let compressed = self
            .compressor
            .compress(data)
            .map_err(|source| EncodeError::Compression { source })?;
        if compressed.first() == Some(&0) {
            // Leading zero bytes are lost by the symbol encoding.
            tracing::warn!(
                compressed_len = compressed.len(),
                "Compressed data starts with a zero byte"
            );
        }
        let token = encode_bytes(&compressed);
        tracing::trace!(
            payload_len = data.len(),
            compressed_len = compressed.len(),
            token_len = token.len(),
            "Packed"
        );
        Ok(token)
    }

    /// Unpack text from a token.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] if `token` has not been created by [`Self::pack()`]
    /// with a compatible compressor, or if it has been corrupted.
    pub fn unpack(&self, token: &str) -> Result<String, DecodeError> {
        let data = self.unpack_bytes(token)?;
        String::from_utf8(data).map_err(|source| {
            tracing::debug!("Unpacked payload is not UTF-8: {source}");
            DecodeError::InvalidUtf8 { source }
        })
    }

    /// Unpack binary data from a token.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] if `token` has not been created by [`Self::pack_bytes()`]
    /// with a compatible compressor, or if it has been corrupted.
    /// Tokens longer than the [token limit](Self::token_limit()) are rejected
    /// with [`DecodeError::TokenTooLong`].
    pub fn unpack_bytes(&self, token: &str) -> Result<Vec<u8>, DecodeError> {
        if token.len() > self.token_limit {
            tracing::debug!(
                token_len = token.len(),
                token_limit = self.token_limit,
                "Rejecting oversized token"
            );
            return Err(DecodeError::TokenTooLong {
                len: token.len(),
                limit: self.token_limit,
            });
        }
        let compressed = decode_bytes(token).inspect_err(|err| {
            tracing::debug!("Malformed token: {err}");
        })?;
        self.compressor.decompress(&compressed).map_err(|source| {
            tracing::debug!(
                compressed_len = compressed.len(),
                "Failed to decompress token: {source}"
            );
            DecodeError::Decompression { source }
        })
    }

    /// Unpack text from a token or fall back to the empty state.
    ///
    /// Failures are logged and otherwise ignored.
    #[must_use]
    pub fn unpack_or_default(&self, token: &str) -> String {
        self.unpack(token).unwrap_or_else(|err| {
            tracing::warn!("Discarding invalid token: {err}");
            String::new()
        })
    }
}

/// Pack text into a token with the default codec.
///
/// # Errors
///
/// See [`StateCodec::pack()`].
pub fn pack(text: &str) -> Result<String, EncodeError> {
    StateCodec::<Gzip>::default().pack(text)
}

/// Unpack text from a token with the default codec.
///
/// # Errors
///
/// See [`StateCodec::unpack()`].
pub fn unpack(token: &str) -> Result<String, DecodeError> {
    StateCodec::<Gzip>::default().unpack(token)
}

/// Unpack text from a token with the default codec or fall back to the empty state.
#[must_use]
pub fn unpack_or_default(token: &str) -> String {
    StateCodec::<Gzip>::default().unpack_or_default(token)
}

#[cfg(test)]
mod tests;
