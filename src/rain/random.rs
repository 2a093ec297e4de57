//! Sources of randomness
//!
//! The column engine consumes randomness only through [`RandomSource`], so
//! an update sequence is reproducible given a seed (with [`SeededSource`])
//! or a fixed list of outcomes (with [`ScriptedSource`]).

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::alphabet::Alphabet;

/// The random bits a column needs
pub trait RandomSource {
    /// Uniform integer in `[0, n)`; `n` is never zero
    fn uniform_index(&mut self, n: usize) -> usize;

    /// True with probability `p`, where `p` is in [0, 1]
    fn bernoulli(&mut self, p: f64) -> bool;
}

/// One character sampled uniformly from `alphabet`
pub fn uniform_char<R: RandomSource + ?Sized>(rng: &mut R, alphabet: &Alphabet) -> char {
    alphabet.get(rng.uniform_index(alphabet.len()))
}

/// Seedable generator backed by [`StdRng`]
#[derive(Debug, Clone)]
pub struct SeededSource {
    rng: StdRng,
}

impl SeededSource {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded from the operating system
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Draw a seed for another, independent source
    pub fn next_seed(&mut self) -> u64 {
        self.rng.random()
    }
}

impl RandomSource for SeededSource {
    fn uniform_index(&mut self, n: usize) -> usize {
        debug_assert!(n > 0, "uniform_index over an empty range");
        self.rng.random_range(0..n)
    }

    fn bernoulli(&mut self, p: f64) -> bool {
        debug_assert!((0.0..=1.0).contains(&p), "probability {} out of range", p);
        self.rng.random_bool(p)
    }
}

/// Replays a fixed list of outcomes
///
/// `bernoulli(0.0)` is always false and `bernoulli(1.0)` always true without
/// consuming a scripted outcome. Once a script runs out, coin flips come up
/// false and indices come up 0. Scripted indices are reduced modulo `n`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    coins: VecDeque<bool>,
    indices: VecDeque<usize>,
}

impl ScriptedSource {
    pub fn new<C, I>(coins: C, indices: I) -> Self
    where
        C: IntoIterator<Item = bool>,
        I: IntoIterator<Item = usize>,
    {
        Self {
            coins: coins.into_iter().collect(),
            indices: indices.into_iter().collect(),
        }
    }

    /// Coin flips only; every index is 0
    pub fn coins<C: IntoIterator<Item = bool>>(coins: C) -> Self {
        Self::new(coins, std::iter::empty())
    }

    /// Outcomes not yet consumed
    #[cfg(test)]
    pub(crate) fn remaining(&self) -> (usize, usize) {
        (self.coins.len(), self.indices.len())
    }
}

impl RandomSource for ScriptedSource {
    fn uniform_index(&mut self, n: usize) -> usize {
        self.indices.pop_front().map_or(0, |i| i % n)
    }

    fn bernoulli(&mut self, p: f64) -> bool {
        if p <= 0.0 {
            return false;
        }
        if p >= 1.0 {
            return true;
        }
        self.coins.pop_front().unwrap_or(false)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn uniform_index(&mut self, n: usize) -> usize {
        (**self).uniform_index(n)
    }

    fn bernoulli(&mut self, p: f64) -> bool {
        (**self).bernoulli(p)
    }
}
