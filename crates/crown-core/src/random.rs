//! Random Source
//!
//! The monarch never owns its entropy. Every operation that draws takes a
//! `&mut` random source for the duration of the call. Any `rand::Rng` is a
//! random source, so a seeded `SmallRng` replays identical draws for
//! identical call sequences.

use rand::Rng;
use std::collections::VecDeque;

/// Single-draw entropy capability.
pub trait RandomSource {
    /// Uniform integer in `0..bound`. Bounds of 0 or 1 yield 0.
    fn random_int(&mut self, bound: u32) -> u32;

    /// Uniform float in `[0, 1)`.
    fn random_double(&mut self) -> f64;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn random_int(&mut self, bound: u32) -> u32 {
        if bound <= 1 {
            0
        } else {
            self.gen_range(0..bound)
        }
    }

    fn random_double(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Picks a uniformly random member of `items`.
pub fn pick_random<'a, T, R: RandomSource + ?Sized>(rng: &mut R, items: &'a [T]) -> Option<&'a T> {
    match items.len() {
        0 => None,
        n => items.get(rng.random_int(n as u32) as usize),
    }
}

/// A random source that replays queued draws, for forcing specific branches.
///
/// Integer draws are reduced modulo the requested bound. Bounds of 0 or 1
/// take nothing from the queue, as with a real source. An exhausted queue
/// yields zeros.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    ints: VecDeque<u32>,
    doubles: VecDeque<f64>,
    int_draws: usize,
    double_draws: usize,
}

impl ScriptedRandom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ints(mut self, ints: impl IntoIterator<Item = u32>) -> Self {
        self.ints.extend(ints);
        self
    }

    pub fn with_doubles(mut self, doubles: impl IntoIterator<Item = f64>) -> Self {
        self.doubles.extend(doubles);
        self
    }

    /// Total draws taken so far, integer and float.
    pub fn draws(&self) -> usize {
        self.int_draws + self.double_draws
    }
}

impl RandomSource for ScriptedRandom {
    fn random_int(&mut self, bound: u32) -> u32 {
        if bound <= 1 {
            return 0;
        }
        self.int_draws += 1;
        self.ints.pop_front().unwrap_or(0) % bound
    }

    fn random_double(&mut self) -> f64 {
        self.double_draws += 1;
        self.doubles.pop_front().unwrap_or(0.0)
    }
}
