// Per-row neighbor ranking.
//
// Candidates are ordered by the key (distance, not-self, candidate index),
// compared with `f32::total_cmp`. A candidate carrying the row's own label
// counts as distance 0.0 and wins every tie, so position 0 of the ranking is
// the self match even when another word has an identical vector. Position 0
// is then dropped by rank alone; the next `k` candidates are the neighbors.
// The key is a total order, so the result never depends on sort stability.
//
// This differs from a plain argsort over distances. With duplicate vectors
// an argsort may place the duplicate at rank 0 and the row's own entry at
// rank 1, so the word ends up listed as its own neighbor and the duplicate
// is dropped. Here the own entry always takes rank 0, the duplicate stays
// available as a neighbor, and a word never lists itself.

use std::cmp::Ordering;

use ndarray::ArrayView1;

/// One selected neighbor: candidate column index and its distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub index: usize,
    pub distance: f32,
}

#[derive(Clone, Copy)]
struct RankKey {
    distance: f32,
    not_self: bool,
    index: usize,
}

fn cmp_keys(a: &RankKey, b: &RankKey) -> Ordering {
    a.distance
        .total_cmp(&b.distance)
        .then(a.not_self.cmp(&b.not_self))
        .then(a.index.cmp(&b.index))
}

/// The first `n` candidates of the ranking for one row, best first.
pub fn rank_candidates(
    distances: ArrayView1<'_, f32>,
    row_label: &str,
    candidates: &[String],
    n: usize,
) -> Vec<Neighbor> {
    let mut keys: Vec<RankKey> = distances
        .iter()
        .zip(candidates)
        .enumerate()
        .map(|(index, (&distance, label))| {
            let is_self = label == row_label;
            RankKey {
                distance: if is_self { 0.0 } else { distance },
                not_self: !is_self,
                index,
            }
        })
        .collect();

    let n = n.min(keys.len());
    if n == 0 {
        return Vec::new();
    }
    if n < keys.len() {
        keys.select_nth_unstable_by(n - 1, cmp_keys);
        keys.truncate(n);
    }
    keys.sort_unstable_by(cmp_keys);

    keys.into_iter()
        .map(|k| Neighbor {
            index: k.index,
            distance: k.distance,
        })
        .collect()
}

/// The `k` nearest candidates after skipping rank 0.
pub fn nearest_neighbors(
    distances: ArrayView1<'_, f32>,
    row_label: &str,
    candidates: &[String],
    k: usize,
) -> Vec<Neighbor> {
    rank_candidates(distances, row_label, candidates, k.saturating_add(1))
        .into_iter()
        .skip(1)
        .collect()
}
