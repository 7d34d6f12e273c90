//! Tree builder (RHT) - spec §4.3.
//!
//! Recursively partitions a set of point-ids into the arena. Also doubles
//! as the "collapse-and-rebuild" routine the insertion engine calls on a
//! subtree, in which case `insertion_point` carries the new point and the
//! function reports the leaf it lands in.

use crate::arena::TreeArena;
use crate::moments::Moments;
use crate::rng_plane::RngPlane;
use crate::selector;
use crate::store::PointStore;

/// Build (or rebuild) the subtree rooted at `(node_index, depth)` from
/// `ids`, returning the leaf array index `insertion_point` landed in (the
/// return value is meaningless, and ignored, when `insertion_point` is
/// `None`).
pub fn build_subtree(
    arena: &mut TreeArena,
    store: &PointStore,
    ids: Vec<u64>,
    node_index: usize,
    depth: u32,
    r_plane: &RngPlane,
    insertion_point: Option<&[f64]>,
) -> usize {
    if depth == arena.height() || ids.len() <= 1 {
        return fill_leaf(arena, ids, node_index, depth);
    }

    let dim = arena.dim();
    let moments: Vec<Moments> = (0..dim)
        .map(|a| Moments::from_values(ids.iter().map(|&id| store.get(id)[a])))
        .collect();
    let weights: Vec<f64> = moments.iter().map(Moments::kurtosis_weight).collect();
    arena.set_moments(node_index, moments);

    let (r0, r1) = r_plane.get(node_index);
    let attribute = match selector::choose_attribute(&weights, r0) {
        Some(a) => a,
        None => {
            arena.mark_stub(node_index);
            return fill_leaf(arena, ids, node_index, depth);
        }
    };

    let (a_min, a_max) = attribute_bounds(store, &ids, attribute);
    let threshold = match selector::choose_threshold(a_min, a_max, r1) {
        Some(v) => v,
        None => {
            arena.mark_stub(node_index);
            return fill_leaf(arena, ids, node_index, depth);
        }
    };

    arena.set_split(node_index, attribute, threshold);
    let (left_ids, right_ids) = partition(store, ids, attribute, threshold);

    let left_child = 2 * node_index + 1;
    let right_child = 2 * node_index + 2;

    match insertion_point {
        Some(pt) if pt[attribute] <= threshold => {
            build_subtree(arena, store, right_ids, right_child, depth + 1, r_plane, None);
            build_subtree(
                arena,
                store,
                left_ids,
                left_child,
                depth + 1,
                r_plane,
                insertion_point,
            )
        }
        Some(_) => {
            build_subtree(arena, store, left_ids, left_child, depth + 1, r_plane, None);
            build_subtree(
                arena,
                store,
                right_ids,
                right_child,
                depth + 1,
                r_plane,
                insertion_point,
            )
        }
        None => {
            build_subtree(arena, store, left_ids, left_child, depth + 1, r_plane, None);
            build_subtree(arena, store, right_ids, right_child, depth + 1, r_plane, None);
            0
        }
    }
}

fn fill_leaf(arena: &mut TreeArena, ids: Vec<u64>, node_index: usize, depth: u32) -> usize {
    let leaf_index = arena.leaf_addr(node_index, depth);
    for id in ids {
        arena.push_leaf(leaf_index, id);
    }
    leaf_index
}

fn attribute_bounds(store: &PointStore, ids: &[u64], attribute: usize) -> (f64, f64) {
    debug_assert!(!ids.is_empty(), "caller splits only when ids.len() > 1");
    let first = store.get(ids[0])[attribute];
    ids[1..]
        .iter()
        .map(|&id| store.get(id)[attribute])
        .fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

/// Partition `ids` into (left, right) by `x[attribute] <= value`. Built on
/// an owned split rather than the reference's in-place two-pointer scan -
/// membership (and hence tree shape) is identical either way, and this
/// keeps recursion borrow-check-simple.
fn partition(store: &PointStore, ids: Vec<u64>, attribute: usize, value: f64) -> (Vec<u64>, Vec<u64>) {
    let mut left = Vec::with_capacity(ids.len());
    let mut right = Vec::new();
    for id in ids {
        if store.get(id)[attribute] <= value {
            left.push(id);
        } else {
            right.push(id);
        }
    }
    (left, right)
}
