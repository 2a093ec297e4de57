//! Matrix Rain Library
//!
//! Digital rain for the terminal: columns of changing characters with
//! falling drops that leave a fading colored trail.
//!
//! - `rain`: columns, drops, coloring, configuration (no terminal access)
//! - `app`: settings, terminal session and the frame loop

pub mod app;
pub mod error;
pub mod rain;

pub use error::{Error, Result};
