//! A single column of falling characters
//!
//! A column owns a buffer of characters and the ages of its active drops.
//! A drop spawns at row 0 with age 0 and falls one row per frame, so its
//! head is at row `age`. Drops keep aging after the head leaves the bottom
//! and are discarded once they reach `max_drop_age`; by then the tail has
//! faded out completely.

use std::collections::VecDeque;
use std::sync::Arc;

use serde::Serialize;

use super::config::Config;
use super::palette::Style;
use super::random::{uniform_char, RandomSource, SeededSource};
use crate::error::{Error, Result};

/// One rendered cell: the character and its index into the color ramp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Glyph {
    pub ch: char,
    pub color: usize,
}

/// A column of the rain
#[derive(Debug, Clone)]
pub struct Column<R = SeededSource> {
    config: Arc<Config>,
    rng: R,
    /// Characters, top row first
    chars: Vec<char>,
    /// Drop ages, ascending (newest first)
    drops: VecDeque<usize>,
}

impl<R: RandomSource> Column<R> {
    /// Create a column of `length` random characters with no drops
    pub fn new(length: usize, config: Arc<Config>, mut rng: R) -> Result<Self> {
        if length == 0 {
            return Err(Error::InvalidLength);
        }
        let chars = (0..length)
            .map(|_| uniform_char(&mut rng, config.alphabet()))
            .collect();
        Ok(Self {
            config,
            rng,
            chars,
            drops: VecDeque::new(),
        })
    }

    /// Advance one frame
    ///
    /// Ages every drop (discarding the ones that reach `max_drop_age`),
    /// maybe spawns a new drop at the top, then refreshes characters:
    /// a cell under a drop head always changes, any other cell changes
    /// with `char_change_probability`.
    pub fn update(&mut self) {
        let Self {
            config,
            rng,
            chars,
            drops,
        } = self;

        let max_age = config.max_drop_age();
        let before = drops.len();
        drops.retain_mut(|age| {
            *age += 1;
            *age < max_age
        });
        if drops.len() < before {
            tracing::trace!("{} drop(s) aged out", before - drops.len());
        }

        if rng.bernoulli(config.new_drop_probability()) {
            drops.push_front(0);
            tracing::trace!("Drop spawned ({} active)", drops.len());
        }

        debug_assert!(
            drops.iter().zip(drops.iter().skip(1)).all(|(a, b)| a < b),
            "drop ages out of order: {:?}",
            drops
        );

        let p = config.char_change_probability();
        let alphabet = config.alphabet();
        let mut heads = drops.iter().copied().peekable();
        for (row, ch) in chars.iter_mut().enumerate() {
            let is_head = heads.next_if_eq(&row).is_some();
            if is_head || rng.bernoulli(p) {
                *ch = uniform_char(rng, alphabet);
            }
        }
    }
}

impl<R> Column<R> {
    /// Character and ramp index for every row, top row first
    ///
    /// Each row is colored by its distance to the next drop head at or
    /// below it. Passing a head moves on to the next older drop, which
    /// leaves a fading trail above every head. Rows below the last head
    /// get the background style.
    pub fn render(&self) -> Vec<Glyph> {
        let ramp = self.config.ramp();
        let mut heads = self.drops.iter().copied().peekable();
        self.chars
            .iter()
            .enumerate()
            .map(|(row, &ch)| {
                let delta = match heads.peek() {
                    Some(&head) => {
                        // Ages ascend and a head is consumed on its row
                        debug_assert!(head >= row, "head {} above row {}", head, row);
                        if head == row {
                            heads.next();
                        }
                        head as isize - row as isize
                    },
                    None => -1,
                };
                Glyph {
                    ch,
                    color: ramp.index_for(delta),
                }
            })
            .collect()
    }

    /// Rendered rows resolved to display styles
    pub fn styled(&self) -> impl Iterator<Item = (char, Style)> + '_ {
        let ramp = self.config.ramp();
        self.render()
            .into_iter()
            .map(move |glyph| (glyph.ch, ramp.style(glyph.color)))
    }

    /// Number of rows
    pub fn length(&self) -> usize {
        self.chars.len()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Ages of the active drops, newest first
    pub fn drops(&self) -> impl ExactSizeIterator<Item = usize> + '_ {
        self.drops.iter().copied()
    }

    /// Whether at least one drop is being tracked
    pub fn is_active(&self) -> bool {
        !self.drops.is_empty()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
