//! Character sets the rain is drawn from
//!
//! Each cell shows one character picked uniformly from an [`Alphabet`].
//! Columns are laid out two terminal cells apart, so every character must
//! be exactly one cell wide.

use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthChar;

use crate::error::{Error, Result};

const DIGITS: &str = "0123456789";
const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Named character sets
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Charset {
    /// 0 and 1
    #[default]
    Binary,
    /// 0-7
    Octal,
    /// 0-9
    Digits,
    /// 0-9 and A-F
    Hex,
    /// a-z
    Lowercase,
    /// A-Z
    Uppercase,
    /// a-z and A-Z
    Letters,
    /// Digits and letters
    Ordinary,
    /// Digits, letters and ASCII punctuation
    Printable,
    /// Printable characters and the space
    All,
}

impl Charset {
    /// The characters of this set, in order
    pub fn chars(self) -> String {
        match self {
            Charset::Binary => "01".to_string(),
            Charset::Octal => "01234567".to_string(),
            Charset::Digits => DIGITS.to_string(),
            Charset::Hex => "0123456789ABCDEF".to_string(),
            Charset::Lowercase => LOWERCASE.to_string(),
            Charset::Uppercase => UPPERCASE.to_string(),
            Charset::Letters => [LOWERCASE, UPPERCASE].concat(),
            Charset::Ordinary => [DIGITS, LOWERCASE, UPPERCASE].concat(),
            Charset::Printable => [DIGITS, LOWERCASE, UPPERCASE, PUNCTUATION].concat(),
            Charset::All => [DIGITS, LOWERCASE, UPPERCASE, PUNCTUATION, " "].concat(),
        }
    }
}

/// A validated, non-empty sequence of single-width characters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alphabet {
    chars: Vec<char>,
}

impl Alphabet {
    /// Build an alphabet from the characters of `s`, keeping their order
    ///
    /// Duplicates are kept and weight the distribution accordingly.
    pub fn new(s: &str) -> Result<Self> {
        let chars: Vec<char> = s.chars().collect();
        if chars.is_empty() {
            return Err(Error::EmptyAlphabet);
        }
        if let Some(&bad) = chars
            .iter()
            .find(|c| c.is_control() || c.width() != Some(1))
        {
            return Err(Error::InvalidCharacter(bad));
        }
        Ok(Self { chars })
    }

    /// Number of characters (never zero)
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Always false
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Character at `index`
    ///
    /// Panics if `index >= len()`.
    pub fn get(&self, index: usize) -> char {
        self.chars[index]
    }

    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }
}

impl From<Charset> for Alphabet {
    fn from(charset: Charset) -> Self {
        // Built-in sets are ASCII and non-empty
        Self {
            chars: charset.chars().chars().collect(),
        }
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Charset::default().into()
    }
}
