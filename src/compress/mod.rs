// SPDX-FileCopyrightText: The sharetoken authors
// SPDX-License-Identifier: MPL-2.0

//! Compression of payloads
//!
//! Payloads are compressed before they are encoded as tokens.
//! The default [`Gzip`] compressor produces a gzip container with
//! a self-describing header and a checksum, i.e. corrupted and foreign
//! input is rejected instead of producing garbage.

use std::io::{self, Read as _, Write as _};

use flate2::{Compression, read::GzDecoder, write::GzEncoder};

/// A lossless, deterministic byte transform
///
/// `decompress(compress(data))` must reproduce `data` exactly and
/// `compress` must always produce the same output for the same input.
/// Compressed output must not start with a zero byte, because leading
/// zero bytes do not survive the [symbol encoding](crate::symbols).
pub trait Compressor {
    /// Compress bytes.
    ///
    /// # Errors
    ///
    /// Returns an [`io::Error`] if compression fails.
    fn compress(&self, data: &[u8]) -> io::Result<Vec<u8>>;

    /// Decompress bytes that have been compressed by [`Self::compress()`].
    ///
    /// # Errors
    ///
    /// Returns an [`io::Error`] if `data` is not a valid compressed stream.
    fn decompress(&self, data: &[u8]) -> io::Result<Vec<u8>>;
}

impl<C> Compressor for &C
where
    C: Compressor + ?Sized,
{
    fn compress(&self, data: &[u8]) -> io::Result<Vec<u8>> {
        (**self).compress(data)
    }

    fn decompress(&self, data: &[u8]) -> io::Result<Vec<u8>> {
        (**self).decompress(data)
    }
}

/// Compression level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Level {
    /// Store only (0)
    None,

    /// Best speed (1)
    Fast,

    /// Default (6)
    #[default]
    Default,

    /// Best compression (9)
    Best,
}

impl From<Level> for Compression {
    fn from(from: Level) -> Self {
        match from {
            Level::None => Self::none(),
            Level::Fast => Self::fast(),
            Level::Default => Self::default(),
            Level::Best => Self::best(),
        }
    }
}

/// The default upper bound for the size of decompressed payloads (16 MiB)
pub const DEFAULT_DECOMPRESSED_LIMIT: u64 = 16 * 1024 * 1024;

/// The gzip compressor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gzip {
    level: Level,
    limit: u64,
}

impl Gzip {
    /// Create a compressor with the given level and the
    /// [default limit](DEFAULT_DECOMPRESSED_LIMIT).
    #[must_use]
    pub const fn new(level: Level) -> Self {
        Self {
            level,
            limit: DEFAULT_DECOMPRESSED_LIMIT,
        }
    }

    /// Replace the upper bound for the size of decompressed payloads.
    #[must_use]
    pub const fn with_limit(self, limit: u64) -> Self {
        Self { limit, ..self }
    }

    /// The compression level
    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }

    /// The upper bound for the size of decompressed payloads in bytes
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit
    }
}

impl Default for Gzip {
    fn default() -> Self {
        Self::new(Level::default())
    }
}

impl Compressor for Gzip {
    fn compress(&self, data: &[u8]) -> io::Result<Vec<u8>> {
        // The header carries no timestamp, i.e. the output is deterministic.
        let mut encoder = GzEncoder::new(Vec::new(), self.level.into());
        encoder.write_all(data)?;
        encoder.finish()
    }

    fn decompress(&self, data: &[u8]) -> io::Result<Vec<u8>> {
        let mut decompressed = Vec::new();
        // Read one byte beyond the limit to detect oversized payloads.
        GzDecoder::new(data)
            .take(self.limit.saturating_add(1))
            .read_to_end(&mut decompressed)?;
        if !u64::try_from(decompressed.len()).is_ok_and(|len| len <= self.limit) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "decompressed payload exceeds limit of {limit} bytes",
                    limit = self.limit
                ),
            ));
        }
        Ok(decompressed)
    }
}
