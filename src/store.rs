//! Point storage for the online engine.
//!
//! spec.md treats points as an immutable array the whole algorithm can
//! index into (`data[indexes[i]]` throughout `original_source`). Since the
//! engine runs over an unbounded stream rather than a fixed array, this
//! crate keeps the subset of points any tree might still reference in a
//! map keyed by point-id, pruned on every periodic rebuild (spec §4.5:
//! "on rebuild, the old arena is discarded", so no tree can reference an
//! id older than the new reference window after that point).

use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct PointStore {
    points: HashMap<u64, Vec<f64>>,
}

impl PointStore {
    pub fn new() -> Self {
        Self {
            points: HashMap::new(),
        }
    }

    pub fn insert(&mut self, id: u64, x: Vec<f64>) {
        self.points.insert(id, x);
    }

    pub fn get(&self, id: u64) -> &[f64] {
        self.points
            .get(&id)
            .expect("point id referenced by a tree must still be in the store")
    }

    /// Drop every point older than `min_id`. Safe to call once all trees
    /// that could reference it have been rebuilt past it.
    pub fn prune_below(&mut self, min_id: u64) {
        self.points.retain(|&id, _| id >= min_id);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.points.len()
    }
}
