//! Engine configuration (see spec §6, §7).

use crate::error::{EngineError, EngineResult};

/// Policy governing the normalizer `N_t` used by the incremental scorer
/// (spec §4.5, §9 Open Questions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormalizerPolicy {
    /// `W + (point_id mod W) + 1`, reproducing the reference implementation
    /// exactly. Default, so the documented end-to-end scenarios stay exact.
    #[default]
    ReferenceParity,
    /// The tree's actual current point count (`sum of count[leaf]`).
    TrueWindowCount,
}

/// Validated configuration for an [`Engine`](crate::forest::Engine).
///
/// Construction performs every check from spec §7 up front so that
/// `Engine::new` never has to reject a configuration after allocating
/// arenas.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub(crate) d: usize,
    pub(crate) t: usize,
    pub(crate) h: u32,
    pub(crate) w: usize,
    pub(crate) seed: u64,
    pub(crate) normalizer: NormalizerPolicy,
}

/// Practical arena cap from spec §7: heights above this blow up the
/// flat arrays (`2^H` leaves) long before they'd help accuracy.
const MAX_HEIGHT: u32 = 20;

impl EngineConfig {
    /// Validate and build a configuration.
    ///
    /// - `d` - input dimensionality, must be `>= 1`.
    /// - `t` - number of trees in the forest, must be `>= 1`.
    /// - `h` - tree height, must be in `[1, 20]`.
    /// - `w` - reference window size, must be `>= 2`.
    /// - `seed` - seed for the deterministic RNG plane (spec §4.6).
    pub fn new(d: usize, t: usize, h: u32, w: usize, seed: u64) -> EngineResult<Self> {
        if d == 0 {
            return Err(EngineError::InvalidConfig(
                "dimension d must be at least 1".into(),
            ));
        }
        if t == 0 {
            return Err(EngineError::InvalidConfig(
                "tree count T must be at least 1".into(),
            ));
        }
        if h < 1 || h > MAX_HEIGHT {
            return Err(EngineError::InvalidConfig(format!(
                "tree height H must be in [1, {MAX_HEIGHT}], got {h}"
            )));
        }
        if w < 2 {
            return Err(EngineError::InvalidConfig(
                "window size W must be at least 2".into(),
            ));
        }
        Ok(Self {
            d,
            t,
            h,
            w,
            seed,
            normalizer: NormalizerPolicy::default(),
        })
    }

    /// Override the incremental-scorer normalizer policy (default:
    /// [`NormalizerPolicy::ReferenceParity`]).
    pub fn with_normalizer(mut self, policy: NormalizerPolicy) -> Self {
        self.normalizer = policy;
        self
    }

    pub fn dim(&self) -> usize {
        self.d
    }

    pub fn n_trees(&self) -> usize {
        self.t
    }

    pub fn height(&self) -> u32 {
        self.h
    }

    pub fn window(&self) -> usize {
        self.w
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn normalizer(&self) -> NormalizerPolicy {
        self.normalizer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_dim() {
        assert!(EngineConfig::new(0, 10, 4, 8, 1).is_err());
    }

    #[test]
    fn rejects_zero_trees() {
        assert!(EngineConfig::new(3, 0, 4, 8, 1).is_err());
    }

    #[test]
    fn rejects_bad_height() {
        assert!(EngineConfig::new(3, 10, 0, 8, 1).is_err());
        assert!(EngineConfig::new(3, 10, 21, 8, 1).is_err());
    }

    #[test]
    fn rejects_tiny_window() {
        assert!(EngineConfig::new(3, 10, 4, 1, 1).is_err());
    }

    #[test]
    fn accepts_minimal_config() {
        assert!(EngineConfig::new(1, 1, 1, 2, 0).is_ok());
    }
}
