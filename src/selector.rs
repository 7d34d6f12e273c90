//! Split selector - spec §4.2.
//!
//! Draws `(attribute, value)` reproducibly from a per-node random pair and
//! a kurtosis-weight vector. Both halves of the draw can independently
//! yield "stub" semantics (no split at this node).

/// Choose a split attribute from non-negative weights `kurt` using target
/// draw `r0 in (0, 1]`. Returns `None` if the weights sum to zero (node is
/// a stub).
///
/// Ties resolve to the lower index: inclusive right edge, exclusive left
/// edge, except at index `0` where both edges are inclusive.
pub fn choose_attribute(kurt: &[f64], r0: f64) -> Option<usize> {
    let ks: f64 = kurt.iter().sum();
    if ks == 0.0 {
        return None;
    }
    let target = r0 * ks;
    let mut cumulative = 0.0;
    for (idx, &w) in kurt.iter().enumerate() {
        cumulative += w;
        if cumulative >= target {
            return Some(idx);
        }
    }
    // Floating-point rounding can leave the running sum a hair under
    // `target` even though it mathematically equals `ks >= target`.
    Some(kurt.len() - 1)
}

/// Choose a split threshold in `(a_min, a_max]` using draw `r1 in (0, 1]`.
/// Returns `None` if the draw lands exactly on `a_min` (stub semantics),
/// which only happens when the attribute is constant over the point set.
pub fn choose_threshold(a_min: f64, a_max: f64, r1: f64) -> Option<f64> {
    let v = a_min + r1 * (a_max - a_min);
    if v == a_min { None } else { Some(v) }
}
