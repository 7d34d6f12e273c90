//! Insertion engine - spec §4.4.
//!
//! Routes a new point down the tree, updating moments at each traversed
//! internal node and detecting attribute divergence against the node's
//! frozen random pair. Divergence (or landing on a stub) triggers a
//! collapse-and-rebuild of the subtree rooted there.

use log::trace;

use crate::arena::TreeArena;
use crate::builder::build_subtree;
use crate::rng_plane::RngPlane;
use crate::selector;
use crate::store::PointStore;

/// Insert `x` (assigned `new_id`) into `arena`, returning the leaf array
/// index it lands in.
pub fn insert_point(
    arena: &mut TreeArena,
    store: &PointStore,
    x: &[f64],
    new_id: u64,
    r_plane: &RngPlane,
) -> usize {
    let mut node_index = 0usize;
    let mut depth = 0u32;

    loop {
        if arena.is_leaf_address(node_index) {
            let leaf = arena.leaf_array_index(node_index);
            arena.push_leaf(leaf, new_id);
            return leaf;
        }

        if !arena.is_split(node_index) {
            trace!("stub node {node_index} at depth {depth} hit, collapsing subtree");
            let leaf_addr = arena.leaf_addr(node_index, depth);
            let mut collected = arena.take_leaf(leaf_addr);
            collected.push(new_id);
            return build_subtree(arena, store, collected, node_index, depth, r_plane, Some(x));
        }

        arena.update_moments(node_index, x);
        let weights = arena.weights(node_index);
        let (r0, _) = r_plane.get(node_index);
        let candidate = selector::choose_attribute(&weights, r0);

        if candidate != Some(arena.attr(node_index)) {
            trace!(
                "attribute divergence at node {node_index} (depth {depth}): {:?} -> {:?}, collapsing subtree",
                arena.attr(node_index),
                candidate
            );
            let (lo, hi) = arena.leaf_range(node_index, depth);
            let mut collected = Vec::new();
            for leaf in lo..=hi {
                collected.extend(arena.take_leaf(leaf));
            }
            collected.push(new_id);
            return build_subtree(arena, store, collected, node_index, depth, r_plane, Some(x));
        }

        node_index = if x[arena.attr(node_index)] <= arena.value(node_index) {
            2 * node_index + 1
        } else {
            2 * node_index + 2
        };
        depth += 1;
    }
}
