// Entity-text (ET) network: entity -> representative word edges.

use indicatif::ProgressBar;
use tracing::debug;

use super::edge::{format_score, Edge, EdgeSet, ET_UNIT_WEIGHT};
use crate::entities::record::EntityKeywordRecord;

/// Build the ET edge set from the first `repk` keywords of each entity.
///
/// Keywords are taken in their existing (descending score) order. The
/// weight is the TF-IDF score when `weighted`, else `1.0`. Callers are
/// expected to have filtered entities with `max_repk >= repk`, so every
/// entity contributes exactly `repk` edges before deduplication.
pub fn gen_et_network(records: &[EntityKeywordRecord], repk: usize, weighted: bool) -> EdgeSet {
    gen_et_network_with_progress(records, repk, weighted, &ProgressBar::hidden())
}

/// `gen_et_network`, ticking `progress` once per entity.
pub fn gen_et_network_with_progress(
    records: &[EntityKeywordRecord],
    repk: usize,
    weighted: bool,
    progress: &ProgressBar,
) -> EdgeSet {
    let mut network = EdgeSet::new();

    for record in records {
        for kw in record.keywords.iter().take(repk) {
            let weight = if weighted {
                format_score(kw.score)
            } else {
                ET_UNIT_WEIGHT.to_string()
            };
            network.insert(Edge::new(record.id.as_str(), kw.word.as_str(), weight));
        }
        progress.inc(1);
    }

    debug!(edges = network.len(), repk, weighted, "Generated ET network");
    network
}
