//! Forest & Scorer, and the public `Engine` surface - spec §4.5, §6.

use std::collections::VecDeque;

use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::arena::TreeArena;
use crate::builder::build_subtree;
use crate::config::{EngineConfig, NormalizerPolicy};
use crate::error::{EngineError, EngineResult};
use crate::insert::insert_point;
use crate::rng_plane::RngPlane;
use crate::store::PointStore;

/// The online forest engine: `initialize`, `update`/`score`, and the
/// periodic windowed rebuild, all in one type (spec §1, §6).
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    trees: Vec<TreeArena>,
    rng_planes: Vec<RngPlane>,
    store: PointStore,
    /// Most recent up-to-`W` point-ids seen; doubles as the pending fill
    /// buffer before the first build and as the next reference window.
    recent_ids: VecDeque<u64>,
    next_id: u64,
    built: bool,
}

impl Engine {
    /// Allocate arenas and draw the RNG plane from `config.seed()`.
    pub fn new(config: EngineConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed());
        let internal_count = (1usize << config.height()) - 1;
        let rng_planes = (0..config.n_trees())
            .map(|_| RngPlane::draw(internal_count, &mut rng))
            .collect();
        let trees = (0..config.n_trees())
            .map(|_| TreeArena::new(config.height(), config.dim()))
            .collect();

        Self {
            trees,
            rng_planes,
            store: PointStore::new(),
            recent_ids: VecDeque::with_capacity(config.window()),
            next_id: 0,
            built: false,
            config,
        }
    }

    /// Insert `x`, perform the periodic rebuild if the point count has
    /// just hit a multiple of `W`, and return the incremental score.
    pub fn update_and_score(&mut self, x: &[f64]) -> EngineResult<f64> {
        self.validate(x)?;

        let id = self.next_id;
        self.next_id += 1;
        self.store.insert(id, x.to_vec());
        self.recent_ids.push_back(id);
        if self.recent_ids.len() > self.config.window() {
            self.recent_ids.pop_front();
        }

        if !self.built {
            if self.recent_ids.len() < self.config.window() {
                return Ok(0.0);
            }
            self.rebuild_all();
            self.built = true;
            let window_scores = self.score_window_with_ids();
            let score = window_scores
                .into_iter()
                .find(|&(window_id, _)| window_id == id)
                .map(|(_, s)| s)
                .unwrap_or(0.0);
            self.prune_store();
            return Ok(score);
        }

        let mut leaf_indices = Vec::with_capacity(self.config.n_trees());
        for i in 0..self.config.n_trees() {
            let leaf = insert_point(&mut self.trees[i], &self.store, x, id, &self.rng_planes[i]);
            leaf_indices.push(leaf);
        }
        let score = self.incremental_score(&leaf_indices, id);

        if (id + 1) % self.config.window() as u64 == 0 {
            debug!(
                "periodic rebuild at point {id}: {} trees, window size {}",
                self.config.n_trees(),
                self.config.window()
            );
            self.rebuild_all();
            self.prune_store();
        }

        Ok(score)
    }

    /// Convenience adapter over an iterator of input vectors.
    pub fn stream<'a, I>(&'a mut self, iter: I) -> impl Iterator<Item = EngineResult<f64>> + 'a
    where
        I: IntoIterator<Item = Vec<f64>> + 'a,
    {
        iter.into_iter().map(move |x| self.update_and_score(&x))
    }

    /// Batch scores (spec §4.5) for every point currently resident in the
    /// forest, ordered by ascending point-id. Only meaningful once the
    /// first build has happened (empty before that).
    pub fn score_window(&self) -> Vec<f64> {
        self.score_window_with_ids()
            .into_iter()
            .map(|(_, s)| s)
            .collect()
    }

    fn score_window_with_ids(&self) -> Vec<(u64, f64)> {
        let mut scores: std::collections::BTreeMap<u64, f64> = std::collections::BTreeMap::new();
        for tree in &self.trees {
            let n = tree.total_count();
            if n == 0 {
                continue;
            }
            for leaf in 0..tree.leaf_count() {
                let count = tree.leaf(leaf).len();
                if count == 0 {
                    continue;
                }
                let contribution = ((n as f64) / (count as f64)).ln();
                for &id in tree.leaf(leaf) {
                    *scores.entry(id).or_insert(0.0) += contribution;
                }
            }
        }
        scores.into_iter().collect()
    }

    fn incremental_score(&self, leaf_indices: &[usize], id: u64) -> f64 {
        let w = self.config.window() as u64;
        leaf_indices
            .iter()
            .enumerate()
            .map(|(i, &leaf)| {
                let tree = &self.trees[i];
                let count = tree.leaf(leaf).len() as f64;
                let n = match self.config.normalizer() {
                    NormalizerPolicy::ReferenceParity => (w + (id % w) + 1) as f64,
                    NormalizerPolicy::TrueWindowCount => tree.total_count() as f64,
                };
                (n / count).ln()
            })
            .sum()
    }

    fn rebuild_all(&mut self) {
        let ids: Vec<u64> = self.recent_ids.iter().copied().collect();
        for i in 0..self.config.n_trees() {
            self.trees[i] = TreeArena::new(self.config.height(), self.config.dim());
            build_subtree(
                &mut self.trees[i],
                &self.store,
                ids.clone(),
                0,
                0,
                &self.rng_planes[i],
                None,
            );
        }
    }

    fn prune_store(&mut self) {
        if let Some(&min_id) = self.recent_ids.front() {
            self.store.prune_below(min_id);
        }
    }

    fn validate(&self, x: &[f64]) -> EngineResult<()> {
        if x.len() != self.config.dim() {
            return Err(EngineError::DimensionMismatch {
                expected: self.config.dim(),
                got: x.len(),
            });
        }
        if x.iter().any(|v| !v.is_finite()) {
            return Err(EngineError::NonFinite);
        }
        Ok(())
    }
}
