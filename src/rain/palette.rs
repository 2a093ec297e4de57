//! Colors and the fading ramp
//!
//! A [`ColorRamp`] is an ordered list of [`Style`]s: index 0 is the drop
//! head, the last entry is the dim background every cell falls back to.
//!
//! Styles are written as tokens, `<color>[ bold]`, where the color is one of:
//! - `default` (terminal foreground)
//! - `white` / `black`
//! - `color(N)` (256-color palette index)
//! - `#rrggbb` (24-bit RGB)

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// Foreground color of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    /// Default terminal foreground
    #[default]
    Default,
    /// Indexed color (0-255)
    /// 0-7: standard colors
    /// 8-15: bright colors
    /// 16-231: 6x6x6 color cube
    /// 232-255: grayscale
    Indexed(u8),
    /// 24-bit RGB color
    Rgb { r: u8, g: u8, b: u8 },
}

impl Color {
    pub const BLACK: u8 = 0;
    pub const WHITE: u8 = 7;
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidColor(s.to_string());
        match s {
            "default" => return Ok(Color::Default),
            "white" => return Ok(Color::Indexed(Color::WHITE)),
            "black" => return Ok(Color::Indexed(Color::BLACK)),
            _ => {},
        }

        if let Some(inner) = s.strip_prefix("color(").and_then(|r| r.strip_suffix(')')) {
            return inner.trim().parse::<u8>().map(Color::Indexed).map_err(|_| invalid());
        }

        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return Err(invalid());
            }
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
            return Ok(Color::Rgb {
                r: channel(0)?,
                g: channel(2)?,
                b: channel(4)?,
            });
        }

        Err(invalid())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Default => f.write_str("default"),
            Color::Indexed(Color::WHITE) => f.write_str("white"),
            Color::Indexed(Color::BLACK) => f.write_str("black"),
            Color::Indexed(idx) => write!(f, "color({})", idx),
            Color::Rgb { r, g, b } => write!(f, "#{:02x}{:02x}{:02x}", r, g, b),
        }
    }
}

/// Display style of one cell: a color and optional boldness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub color: Color,
    pub bold: bool,
}

impl Style {
    pub const fn new(color: Color, bold: bool) -> Self {
        Self { color, bold }
    }

    pub const fn indexed(index: u8) -> Self {
        Self::new(Color::Indexed(index), false)
    }

    pub const fn bold(self) -> Self {
        Self { bold: true, ..self }
    }
}

impl FromStr for Style {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut words = s.split_whitespace();
        let color = words
            .next()
            .ok_or_else(|| Error::InvalidColor(s.to_string()))?
            .parse()?;
        let mut bold = false;
        for word in words {
            match word {
                "bold" => bold = true,
                _ => return Err(Error::InvalidColor(s.to_string())),
            }
        }
        Ok(Style { color, bold })
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.bold {
            write!(f, "{} bold", self.color)
        } else {
            write!(f, "{}", self.color)
        }
    }
}

impl Serialize for Style {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Style {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        token.parse().map_err(serde::de::Error::custom)
    }
}

/// Gradient from the drop head (index 0) to the background (last index)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorRamp {
    styles: Vec<Style>,
}

impl ColorRamp {
    pub fn new(styles: Vec<Style>) -> Result<Self> {
        if styles.is_empty() {
            return Err(Error::EmptyColorRamp);
        }
        Ok(Self { styles })
    }

    /// Parse a ramp from style tokens
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Result<Self> {
        let styles = tokens
            .iter()
            .map(|t| t.as_ref().parse())
            .collect::<Result<Vec<Style>>>()?;
        Self::new(styles)
    }

    /// Number of styles (never zero)
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Index of the dim background style
    pub fn last_index(&self) -> usize {
        self.styles.len() - 1
    }

    /// Ramp index for a distance from the nearest drop head
    ///
    /// Negative distances (no drop reached yet) and distances past the end
    /// of the ramp both map to the background.
    pub fn index_for(&self, delta: isize) -> usize {
        if delta < 0 {
            self.last_index()
        } else {
            (delta as usize).min(self.last_index())
        }
    }

    /// Style at `index`, saturating to the background
    pub fn style(&self, index: usize) -> Style {
        self.styles[index.min(self.last_index())]
    }

}

impl Default for ColorRamp {
    /// White head, bright green neck, then five green bands of growing
    /// length, ending on black.
    fn default() -> Self {
        let mut styles = vec![
            Style::new(Color::Indexed(Color::WHITE), true),
            Style::indexed(46).bold(),
        ];
        for (index, count) in [(46, 3), (40, 5), (34, 7), (28, 9), (22, 11)] {
            styles.extend(std::iter::repeat(Style::indexed(index)).take(count));
        }
        styles.push(Style::indexed(Color::BLACK));
        Self { styles }
    }
}
