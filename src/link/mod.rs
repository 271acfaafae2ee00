// SPDX-FileCopyrightText: The sharetoken authors
// SPDX-License-Identifier: MPL-2.0

//! Share links
//!
//! A share link embeds a token as the last path segment of a URL
//! below some base URL, e.g. `https://yapi.run/c/{token}`.

use std::{borrow::Cow, str::FromStr};

use derive_more::{Display, Error};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use url::Url;

use crate::{DecodeError, EncodeError, compress::Compressor, state::StateCodec};

/// The characters that are percent-encoded by JavaScript's `encodeURIComponent()`
///
/// Everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`. None of the
/// [alphabet](crate::alphabet::ALPHABET) symbols is contained in this set.
pub const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// The base URL of the playground
pub const DEFAULT_BASE_URL: &str = "https://yapi.run/c/";

/// The default number of characters in a [`preview()`]
pub const DEFAULT_PREVIEW_CHARS: usize = 200;

/// A share link error
#[derive(Debug, Display, Error)]
pub enum LinkError {
    /// Syntax error.
    #[display("invalid URL: {source}")]
    Url {
        /// The cause
        source: url::ParseError,
    },

    /// The URL cannot be used as a base for share links.
    #[display("unsuitable base URL <{url}>")]
    InvalidBase {
        /// The rejected URL
        url: Url,
    },

    /// The URL is not located below the base URL.
    #[display("<{url}> is not a share link")]
    Foreign {
        /// The rejected URL
        url: Url,
    },

    /// The token of the link is invalid.
    #[display("{source}")]
    Decode {
        /// The cause
        source: DecodeError,
    },
}

/// Creates and resolves share links below a base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLink {
    base: Url,
}

impl ShareLink {
    /// Create share links below the given base URL.
    ///
    /// A trailing slash is appended to the path of `base` if missing.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::InvalidBase`] if `base` cannot be a base URL
    /// or if it has a query or fragment.
    pub fn new(mut base: Url) -> Result<Self, LinkError> {
        if base.cannot_be_a_base() || base.query().is_some() || base.fragment().is_some() {
            return Err(LinkError::InvalidBase { url: base });
        }
        if !base.path().ends_with('/') {
            let path = format!("{path}/", path = base.path());
            base.set_path(&path);
        }
        Ok(Self { base })
    }

    /// The base URL
    ///
    /// The path always ends with a slash.
    #[must_use]
    pub const fn base(&self) -> &Url {
        &self.base
    }

    /// Create the share link for a token.
    ///
    /// Characters outside of the [alphabet](crate::alphabet::ALPHABET) are
    /// percent-encoded and the resulting link does not resolve.
    /// The tokens `.` and `..` are path navigation and resolve to the
    /// base URL or its parent. Packing never results in one of them.
    #[must_use]
    pub fn url_for_token(&self, token: &str) -> Url {
        let mut url = self.base.clone();
        // Percent-encoding is a no-op for valid tokens.
        let path = format!(
            "{base_path}{token}",
            base_path = self.base.path(),
            token = utf8_percent_encode(token, COMPONENT)
        );
        url.set_path(&path);
        url
    }

    /// Pack text and create the share link for the resulting token.
    ///
    /// # Errors
    ///
    /// Returns an [`EncodeError`] if packing fails.
    pub fn share<C>(&self, codec: &StateCodec<C>, text: &str) -> Result<Url, EncodeError>
    where
        C: Compressor,
    {
        let token = codec.pack(text)?;
        Ok(self.url_for_token(&token))
    }

    /// Extract the token from a share link.
    ///
    /// Returns `None` if `url` does not have the same origin as the
    /// base URL or if its path does not consist of the base path followed
    /// by a single, non-empty segment. Query and fragment are ignored.
    ///
    /// The token is not validated.
    #[must_use]
    pub fn token_of<'u>(&self, url: &'u Url) -> Option<&'u str> {
        if url.origin() != self.base.origin() {
            return None;
        }
        let token = url.path().strip_prefix(self.base.path())?;
        (!token.is_empty() && !token.contains('/')).then_some(token)
    }

    /// Resolve a share link into the packed text.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Foreign`] if `url` is not a share link below
    /// the base URL or [`LinkError::Decode`] if its token is invalid.
    pub fn resolve<C>(&self, codec: &StateCodec<C>, url: &Url) -> Result<String, LinkError>
    where
        C: Compressor,
    {
        let Some(token) = self.token_of(url) else {
            return Err(LinkError::Foreign { url: url.clone() });
        };
        codec
            .unpack(token)
            .map_err(|source| LinkError::Decode { source })
    }
}

impl Default for ShareLink {
    fn default() -> Self {
        // The constant is covered by the tests.
        DEFAULT_BASE_URL
            .parse()
            .expect("valid default base URL")
    }
}

impl FromStr for ShareLink {
    type Err = LinkError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let base = input
            .trim()
            .parse::<Url>()
            .map_err(|source| LinkError::Url { source })?;
        Self::new(base)
    }
}

/// Shorten text for previews of a share link, e.g. in page metadata.
///
/// Text with more than `max_chars` characters is cut after `max_chars`
/// characters and `...` is appended.
#[must_use]
pub fn preview(text: &str, max_chars: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max_chars) {
        None => Cow::Borrowed(text),
        Some((end, _)) => Cow::Owned(format!("{head}...", head = &text[..end])),
    }
}
