// SPDX-FileCopyrightText: The sharetoken authors
// SPDX-License-Identifier: MPL-2.0

//! Size summaries of packed text

use std::fmt;

const KIB: usize = 1024;
const MIB: usize = KIB * 1024;

/// Format a size in bytes with binary units.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_bytes(len: usize) -> String {
    match len {
        ..KIB => format!("{len} B"),
        KIB..MIB => format!("{:.1} KB", len as f64 / KIB as f64),
        _ => format!("{:.1} MB", len as f64 / MIB as f64),
    }
}

/// Compares a text with its token
///
/// Displayed as two aligned lines, e.g.
///
/// ```text
/// lines    3
/// size     120 B -> 96 B (80%)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// The number of lines of the text
    pub lines: usize,

    /// The length of the text in bytes
    pub text_len: usize,

    /// The length of the token in bytes
    pub token_len: usize,
}

impl Summary {
    /// Summarize a text and its token.
    #[must_use]
    pub fn new(text: &str, token: &str) -> Self {
        Self {
            lines: text.lines().count(),
            text_len: text.len(),
            token_len: token.len(),
        }
    }

    /// The token length relative to the text length in percent
    ///
    /// Zero for an empty text.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn ratio_percent(&self) -> f64 {
        if self.text_len == 0 {
            return 0.0;
        }
        self.token_len as f64 / self.text_len as f64 * 100.0
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "lines    {lines}", lines = self.lines)?;
        write!(
            f,
            "size     {text_size} -> {token_size} ({ratio:.0}%)",
            text_size = format_bytes(self.text_len),
            token_size = format_bytes(self.token_len),
            ratio = self.ratio_percent(),
        )
    }
}
