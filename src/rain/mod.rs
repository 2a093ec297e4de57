//! Rain Core Module
//!
//! The per-column simulation and coloring model. This module contains:
//! - Character sets and alphabets
//! - Styles and the fading color ramp
//! - Injectable randomness
//! - The immutable configuration derived from the terminal size
//! - The column engine (`update` / `render`)
//! - The field of columns and its snapshot
//!
//! Nothing here touches the terminal. Given the same configuration and the
//! same random outcomes, the rain always evolves the same way.

mod alphabet;
mod column;
mod config;
mod field;
mod palette;
mod random;
mod snapshot;

pub use alphabet::{Alphabet, Charset};
pub use column::{Column, Glyph};
pub use config::{Config, ConfigBuilder, DEFAULT_CHAR_CHANGE_PROBABILITY};
pub use field::Field;
pub use palette::{Color, ColorRamp, Style};
pub use random::{uniform_char, RandomSource, ScriptedSource, SeededSource};
pub use snapshot::{ColumnSnapshot, Snapshot};
