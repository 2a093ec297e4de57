//! Error types for building columns and configurations

use thiserror::Error;

/// Construction error
///
/// Every failure happens before the animation starts; a running column
/// never produces one.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A column must have at least one row
    #[error("Column length must be positive")]
    InvalidLength,

    /// The terminal must be at least one cell wide
    #[error("Terminal width must be positive")]
    InvalidWidth,

    /// No characters to draw from
    #[error("Alphabet is empty")]
    EmptyAlphabet,

    /// Alphabet entry that does not occupy exactly one terminal cell
    #[error("Alphabet character {0:?} is not a single-width printable character")]
    InvalidCharacter(char),

    /// No styles to color with
    #[error("Color ramp is empty")]
    EmptyColorRamp,

    /// Style token that could not be parsed
    #[error("Invalid color: {0:?}")]
    InvalidColor(String),

    /// Probability outside [0, 1]
    #[error("Probability {name} = {value} is outside [0, 1]")]
    Probability { name: &'static str, value: f64 },

    /// Drops would be discarded before fading out completely
    #[error("Max drop age {max_drop_age} is shorter than the color ramp ({ramp_len})")]
    MaxDropAge { max_drop_age: usize, ramp_len: usize },
}

/// Result type for column and configuration construction
pub type Result<T> = std::result::Result<T, Error>;
