// Text-text (TT) network: representative word -> expansion word edges.
//
// Every representative word (each target word of the ET network) is
// expanded into its `expk` nearest candidates by cosine distance. The
// candidate pool is either the representative words themselves or the
// whole embedding vocabulary.

use std::collections::BTreeSet;

use indicatif::ProgressBar;
use rayon::prelude::*;
use tracing::{debug, info};

use super::edge::{format_similarity, Edge, EdgeSet, TT_UNIT_WEIGHT};
use crate::config::{CandidatePool, ZeroVectorPolicy};
use crate::embeddings::matrix::LabeledMatrix;
use crate::embeddings::table::EmbeddingTable;
use crate::error::Result;
use crate::similarity::cosine::{distance_to_weight, pairwise_distances};
use crate::similarity::neighbors::nearest_neighbors;

/// Settings for one TT network build.
#[derive(Debug, Clone, Copy)]
pub struct TtParams {
    /// Expansion words per representative word
    pub expk: usize,
    /// `1 - distance/2` weights instead of the unit weight `1`
    pub weighted: bool,
    pub candidates: CandidatePool,
    pub zero_vectors: ZeroVectorPolicy,
}

/// Representative words of an ET network: every edge target, sorted.
pub fn harvest_rep_words(et_network: &EdgeSet) -> Vec<String> {
    dedup_words(et_network.iter().map(|e| e.target.as_str()))
}

/// Build the TT edge set without progress reporting.
pub fn gen_tt_network(
    rep_words: &[String],
    table: &EmbeddingTable,
    params: &TtParams,
) -> Result<EdgeSet> {
    gen_tt_network_with_progress(rep_words, table, params, &ProgressBar::hidden())
}

/// Build the TT edge set, ticking `progress` once per representative word.
///
/// Every representative word must have an embedding; a missing one is a
/// `MissingKey` error. Rows are ranked in parallel and merged into one
/// ordered set, so the result does not depend on scheduling.
pub fn gen_tt_network_with_progress(
    rep_words: &[String],
    table: &EmbeddingTable,
    params: &TtParams,
    progress: &ProgressBar,
) -> Result<EdgeSet> {
    let reps = LabeledMatrix::from_table(rep_words.iter().map(String::as_str), table)?;
    let pool = match params.candidates {
        CandidatePool::Representative => reps.clone(),
        CandidatePool::Vocabulary => LabeledMatrix::vocabulary(table),
    };

    info!(
        rep_words = reps.len(),
        candidates = pool.len(),
        dim = table.dim(),
        "Computing cosine distances"
    );
    let distances = pairwise_distances(&reps, &pool, params.zero_vectors)?;

    let rows: Vec<Vec<Edge>> = (0..reps.len())
        .into_par_iter()
        .map(|row| {
            let rep = reps.label(row);
            let edges: Vec<Edge> = nearest_neighbors(distances.row(row), rep, pool.labels(), params.expk)
                .into_iter()
                .map(|n| {
                    let weight = if params.weighted {
                        format_similarity(distance_to_weight(n.distance))
                    } else {
                        TT_UNIT_WEIGHT.to_string()
                    };
                    Edge::new(rep, pool.label(n.index), weight)
                })
                .collect();
            progress.inc(1);
            edges
        })
        .collect();

    let network: EdgeSet = rows.into_iter().flatten().collect();
    debug!(
        edges = network.len(),
        expk = params.expk,
        weighted = params.weighted,
        "Generated TT network"
    );
    Ok(network)
}

/// Distinct representative words in sorted order, from any word list.
pub fn dedup_words<I, S>(words: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    words
        .into_iter()
        .map(Into::into)
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;

    fn params(expk: usize, weighted: bool) -> TtParams {
        TtParams {
            expk,
            weighted,
            candidates: CandidatePool::Representative,
            zero_vectors: ZeroVectorPolicy::Penalize,
        }
    }

    fn table() -> EmbeddingTable {
        EmbeddingTable::from_entries(vec![
            ("a", vec![1.0, 0.0]),
            ("b", vec![0.9, 0.1]),
            ("c", vec![0.0, 1.0]),
            ("d", vec![-1.0, 0.0]),
        ])
        .unwrap()
    }

    #[test]
    fn test_harvest_rep_words_sorted_unique() {
        let et: EdgeSet = vec![
            Edge::new("e2", "zebra", "1.0"),
            Edge::new("e1", "apple", "1.0"),
            Edge::new("e3", "zebra", "1.0"),
        ]
        .into_iter()
        .collect();
        assert_eq!(harvest_rep_words(&et), vec!["apple", "zebra"]);
    }

    #[test]
    fn test_symmetric_pool_neighbors() {
        let reps = dedup_words(["a", "c", "b"]);
        let net = gen_tt_network(&reps, &table(), &params(1, false)).unwrap();
        let lines: Vec<String> = net.iter().map(|e| e.to_string()).collect();
        // c is orthogonal to a and nearly so to b; b is its closer one.
        assert_eq!(lines, vec!["a b 1", "b a 1", "c b 1"]);
    }

    #[test]
    fn test_vocabulary_pool_reaches_non_representatives() {
        let reps = dedup_words(["d"]);
        let mut p = params(1, false);
        p.candidates = CandidatePool::Vocabulary;
        let net = gen_tt_network(&reps, &table(), &p).unwrap();
        let lines: Vec<String> = net.iter().map(|e| e.to_string()).collect();
        assert_eq!(lines, vec!["d c 1"]);
    }

    #[test]
    fn test_weighted_uses_rescaled_similarity() {
        let reps = dedup_words(["a", "d"]);
        let net = gen_tt_network(&reps, &table(), &params(1, true)).unwrap();
        let lines: Vec<String> = net.iter().map(|e| e.to_string()).collect();
        assert_eq!(lines, vec!["a d 0.0", "d a 0.0"]);
    }

    #[test]
    fn test_missing_rep_word_is_missing_key() {
        let reps = dedup_words(["a", "nope"]);
        let err = gen_tt_network(&reps, &table(), &params(1, false)).unwrap_err();
        assert!(matches!(err, GraphError::MissingKey { .. }));
    }

    #[test]
    fn test_empty_reps_give_empty_network() {
        let net = gen_tt_network(&[], &table(), &params(3, false)).unwrap();
        assert!(net.is_empty());
    }
}
