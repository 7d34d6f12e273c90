//! Running moments per (tree, internal-node, attribute) - spec §4.1.
//!
//! The update recurrence is the textbook online single-pass formulation for
//! `n`, mean, and the second/third/fourth central moments; it is algebraically
//! equivalent whether applied point-by-point or looped over a bulk subset,
//! which is what lets online insertion preserve invariant I3.

/// Online accumulator for `(n, mean, M2, M3, M4)` of one attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Moments {
    pub n: u64,
    pub mean: f64,
    pub m2: f64,
    pub m3: f64,
    pub m4: f64,
}

impl Moments {
    /// Fold a single new value into the accumulator.
    pub fn update(&mut self, x: f64) {
        let n0 = self.n as f64;
        self.n += 1;
        let n1 = self.n as f64;

        let delta = x - self.mean;
        let delta_n = delta / n1;
        let delta_n2 = delta_n * delta_n;
        let term1 = delta * delta_n * n0;

        self.mean += delta_n;
        self.m4 += term1 * delta_n2 * (n1 * n1 - 3.0 * n1 + 3.0) + 6.0 * delta_n2 * self.m2
 - 4.0 * delta_n * self.m3;
        self.m3 += term1 * delta_n * (n1 - 2.0) - 3.0 * delta_n * self.m2;
        self.m2 += term1;
    }

    /// Build moments from scratch over a bulk subset, by looping the same
    /// update recurrence. Equivalent to point-by-point insertion.
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> Self {
        let mut m = Self::default();
        for x in values {
            m.update(x);
        }
        m
    }

    /// Raw kurtosis `K = n * M4 / M2^2`, or `0` if `M4 == 0` (spec §4.1).
    pub fn kurtosis(&self) -> f64 {
        if self.m4 == 0.0 {
            0.0
        } else {
            (self.n as f64) * self.m4 / (self.m2 * self.m2)
        }
    }

    /// Selector weight `log(K + 1)`, always non-negative.
    pub fn kurtosis_weight(&self) -> f64 {
        (self.kurtosis() + 1.0).ln()
    }
}
