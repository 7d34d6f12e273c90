//! Deterministic RNG plane - spec §4.6.
//!
//! A `(2^H - 1) x 2` table of unit-interval draws per tree, frozen at
//! forest construction and never touched again. It is the sole source of
//! randomness consumed by the builder and the insertion engine, which is
//! what makes determinism (I4) hold.

use rand::Rng;
use rand::distr::{Distribution, Uniform};

/// Per-node `(r0, r1)` pairs for a single tree's internal nodes.
#[derive(Debug, Clone)]
pub struct RngPlane {
    pairs: Vec<(f64, f64)>,
}

impl RngPlane {
    /// Draw one plane covering `internal_count` heap indices, resampling
    /// any draw that lands exactly on `0` so every value lies in `(0, 1]`.
    pub fn draw<R: Rng + ?Sized>(internal_count: usize, rng: &mut R) -> Self {
        let unit = Uniform::new(0.0, 1.0).expect("unit interval bounds are valid");
        let draw_nonzero = |rng: &mut R| loop {
            let v = unit.sample(rng);
            if v != 0.0 {
                return v;
            }
        };

        let pairs = (0..internal_count)
            .map(|_| (draw_nonzero(rng), draw_nonzero(rng)))
            .collect();
        Self { pairs }
    }

    /// The frozen `(r0, r1)` pair for internal heap index `i`.
    pub fn get(&self, i: usize) -> (f64, f64) {
        self.pairs[i]
    }
}
