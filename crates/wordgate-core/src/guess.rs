//! Guess extraction and normalization.

use std::fmt;

/// Number of letters a guess must have.
pub const GUESS_LEN: usize = 5;

/// A guess as read from the input field, trimmed and uppercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GuessInput(String);

impl GuessInput {
    /// Normalize raw field content.
    ///
    /// Surrounding whitespace is trimmed and the rest is uppercased. Inner
    /// whitespace is kept, so `"HE LO"` is still five characters long.
    pub fn normalize(raw: &str) -> Self {
        Self(raw.trim_matches(is_browser_whitespace).to_uppercase())
    }

    /// The normalized text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in UTF-16 code units, as a browser string counts it.
    pub fn len(&self) -> usize {
        self.0.encode_utf16().count()
    }

    /// True if the guess is empty after trimming.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if the guess passes the length precondition.
    pub fn has_valid_length(&self) -> bool {
        self.len() == GUESS_LEN
    }
}

/// Whitespace as a browser's `String.prototype.trim` sees it: the Unicode
/// `White_Space` set without NEL (U+0085), plus the byte order mark.
fn is_browser_whitespace(c: char) -> bool {
    match c {
        '\u{FEFF}' => true,
        '\u{0085}' => false,
        c => c.is_whitespace(),
    }
}

impl fmt::Display for GuessInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
