//! Poisson sampling for the distribution game modes
//!
//! Uses Knuth's multiplication method. Randomness comes through
//! `UniformSource` so callers can swap the round RNG for a scripted sequence.

use rand::Rng;
use rand_pcg::Pcg32;

/// A source of uniform samples in [0, 1)
pub trait UniformSource {
    fn next_uniform(&mut self) -> f64;
}

impl UniformSource for Pcg32 {
    fn next_uniform(&mut self) -> f64 {
        self.random()
    }
}

/// Replays a fixed list of samples, cycling when exhausted
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f64>,
    index: usize,
    /// Total samples handed out
    pub draws: usize,
}

impl SequenceSource {
    /// An empty list behaves as a constant 0.0
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values,
            index: 0,
            draws: 0,
        }
    }
}

impl UniformSource for SequenceSource {
    fn next_uniform(&mut self) -> f64 {
        self.draws += 1;
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.index];
        self.index = (self.index + 1) % self.values.len();
        value
    }
}

/// Draw from Poisson(lambda)
///
/// A rate of zero or less is always 0 and consumes no samples. Otherwise the
/// loop multiplies uniforms together until the product falls to e^-lambda; it
/// has no iteration cap. For very large rates e^-lambda underflows to 0 and
/// the loop runs until the product itself underflows.
pub fn poisson<S: UniformSource + ?Sized>(lambda: f64, source: &mut S) -> u32 {
    if lambda.is_nan() || lambda <= 0.0 {
        return 0;
    }

    let limit = (-lambda).exp();
    let mut p = 1.0;
    let mut k: u32 = 0;
    loop {
        k += 1;
        p *= source.next_uniform();
        if p <= limit {
            break;
        }
    }
    k - 1
}
