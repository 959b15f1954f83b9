//! Uniform range sampling over a seedable source.
//!
//! Every spawner draws its attributes through [`RandomSource::sample`], so a
//! seeded [`Rng`] makes a whole run reproducible.

use serde::{Deserialize, Serialize};

/// A source of uniform values in `[0, 1)`.
pub trait RandomSource {
    /// Next value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform value in `[min, max)`.
    fn sample(&mut self, min: f32, max: f32) -> f32 {
        min + (max - min) * self.next_unit() as f32
    }

    /// True with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.next_unit() < p
    }

    /// Uniform integer in `[min, max]` (both inclusive).
    fn pick_int(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        let span = (max as u64 - min as u64 + 1) as f64;
        min + ((self.next_unit() * span) as u64).min((max - min) as u64) as u32
    }
}

/// Seedable pseudo-random number generator (xorshift64).
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

impl RandomSource for Rng {
    fn next_unit(&mut self) -> f64 {
        // Top 53 bits fill an f64 mantissa exactly.
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

impl Default for Rng {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Half-open sampling range `[min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn sample(&self, rng: &mut impl RandomSource) -> f32 {
        rng.sample(self.min, self.max)
    }

    /// Whether `min <= max` and both bounds are finite.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}
