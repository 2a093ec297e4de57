//! Animation constants derived from the terminal geometry
//!
//! A [`Config`] is computed once at startup and shared read-only by every
//! column. Defaults:
//! - `p_new_drop = 1 / width`: one new drop per frame across the screen
//! - `p_char_change = 0.10`
//! - `max_drop_age = width + ramp length`: a drop fades out before removal
//! - `column_count = width / 2`: each column takes two terminal cells
//! - `column_length = height`

use serde::Serialize;

use super::alphabet::Alphabet;
use super::palette::ColorRamp;
use crate::error::{Error, Result};

/// Default chance that any given character is replaced on a frame
pub const DEFAULT_CHAR_CHANGE_PROBABILITY: f64 = 0.10;

/// Immutable animation configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Config {
    alphabet: Alphabet,
    ramp: ColorRamp,
    new_drop_probability: f64,
    char_change_probability: f64,
    max_drop_age: usize,
    column_count: usize,
    column_length: usize,
}

impl Config {
    /// Defaults for a `width` x `height` terminal
    pub fn for_terminal(width: usize, height: usize) -> Result<Self> {
        ConfigBuilder::new(width, height).build()
    }

    pub fn builder(width: usize, height: usize) -> ConfigBuilder {
        ConfigBuilder::new(width, height)
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn ramp(&self) -> &ColorRamp {
        &self.ramp
    }

    /// Chance a column spawns a drop on a frame
    pub fn new_drop_probability(&self) -> f64 {
        self.new_drop_probability
    }

    /// Chance a character is replaced on a frame, independent of drops
    pub fn char_change_probability(&self) -> f64 {
        self.char_change_probability
    }

    /// Frames a drop is tracked before it is discarded
    pub fn max_drop_age(&self) -> usize {
        self.max_drop_age
    }

    /// Number of display columns
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Rows per column
    pub fn column_length(&self) -> usize {
        self.column_length
    }
}

/// Builder for [`Config`] with optional overrides of the derived values
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    width: usize,
    height: usize,
    alphabet: Alphabet,
    ramp: ColorRamp,
    char_change_probability: f64,
    new_drop_probability: Option<f64>,
    max_drop_age: Option<usize>,
}

impl ConfigBuilder {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            alphabet: Alphabet::default(),
            ramp: ColorRamp::default(),
            char_change_probability: DEFAULT_CHAR_CHANGE_PROBABILITY,
            new_drop_probability: None,
            max_drop_age: None,
        }
    }

    pub fn alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = alphabet;
        self
    }

    pub fn ramp(mut self, ramp: ColorRamp) -> Self {
        self.ramp = ramp;
        self
    }

    pub fn char_change_probability(mut self, p: f64) -> Self {
        self.char_change_probability = p;
        self
    }

    /// Replace the derived `1 / width`
    pub fn new_drop_probability(mut self, p: f64) -> Self {
        self.new_drop_probability = Some(p);
        self
    }

    /// Replace the derived `width + ramp length`
    pub fn max_drop_age(mut self, age: usize) -> Self {
        self.max_drop_age = Some(age);
        self
    }

    /// Validate and freeze
    pub fn build(self) -> Result<Config> {
        if self.width == 0 {
            return Err(Error::InvalidWidth);
        }
        if self.height == 0 {
            return Err(Error::InvalidLength);
        }

        let new_drop_probability = self
            .new_drop_probability
            .unwrap_or(1.0 / self.width as f64);
        check_probability("new_drop_probability", new_drop_probability)?;
        check_probability("char_change_probability", self.char_change_probability)?;

        let ramp_len = self.ramp.len();
        let max_drop_age = self.max_drop_age.unwrap_or(self.width + ramp_len);
        if max_drop_age < ramp_len {
            return Err(Error::MaxDropAge {
                max_drop_age,
                ramp_len,
            });
        }

        let config = Config {
            alphabet: self.alphabet,
            ramp: self.ramp,
            new_drop_probability,
            char_change_probability: self.char_change_probability,
            max_drop_age,
            column_count: self.width / 2,
            column_length: self.height,
        };
        tracing::debug!(
            "Config for {}x{}: {} columns, p_new_drop={:.4}, max_drop_age={}",
            self.width,
            self.height,
            config.column_count,
            config.new_drop_probability,
            config.max_drop_age
        );
        Ok(config)
    }
}

fn check_probability(name: &'static str, value: f64) -> Result<()> {
    // Also rejects NaN
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::Probability { name, value })
    }
}
