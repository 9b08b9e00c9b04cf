// Entity filter chain.
//
// Two filters, always in this order:
//
//   1. drop keywords without an embedding (record order preserved)
//   2. drop entities left with fewer than `max_repk` keywords
//
// Counting keywords before step 1 would keep entities that later turn out
// to be short, so graphs built with different `repk` values would not share
// one entity set. `FilteredEntitySet::build` is the only way to obtain a
// filtered set and it runs the steps in order.

use std::collections::HashSet;

use tracing::debug;

use super::record::EntityKeywordRecord;
use crate::embeddings::table::EmbeddingTable;

/// Anything that can answer "does this word have an embedding?".
pub trait Vocabulary {
    fn has_embedding(&self, word: &str) -> bool;
}

impl Vocabulary for HashSet<String> {
    fn has_embedding(&self, word: &str) -> bool {
        self.contains(word)
    }
}

impl Vocabulary for EmbeddingTable {
    fn has_embedding(&self, word: &str) -> bool {
        self.contains(word)
    }
}

/// Outcome of the embedding-availability filter. Counts distinct words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WordFilterStats {
    pub filtered_words: usize,
    pub total_words: usize,
}

/// Outcome of the minimum-count filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EntityFilterStats {
    pub filtered_entities: usize,
    pub total_entities: usize,
    pub max_repk: usize,
}

impl EntityFilterStats {
    pub fn remaining(&self) -> usize {
        self.total_entities - self.filtered_entities
    }
}

/// Drop every keyword that has no embedding, keeping the rest in order.
///
/// Entities are never dropped here, even if all their keywords go.
pub fn filter_words_by_embedding<V: Vocabulary + ?Sized>(
    records: Vec<EntityKeywordRecord>,
    vocab: &V,
) -> (Vec<EntityKeywordRecord>, WordFilterStats) {
    let mut seen: HashSet<String> = HashSet::new();
    let mut filtered: HashSet<String> = HashSet::new();

    let records = records
        .into_iter()
        .map(|mut record| {
            record.keywords.retain(|kw| {
                if !seen.contains(&kw.word) {
                    seen.insert(kw.word.clone());
                }
                let keep = vocab.has_embedding(&kw.word);
                if !keep && !filtered.contains(&kw.word) {
                    filtered.insert(kw.word.clone());
                }
                keep
            });
            record
        })
        .collect();

    let stats = WordFilterStats {
        filtered_words: filtered.len(),
        total_words: seen.len(),
    };
    debug!(
        filtered = stats.filtered_words,
        total = stats.total_words,
        "Filtered words without embeddings"
    );
    (records, stats)
}

/// Drop entities with strictly fewer than `max_repk` keywords.
pub fn filter_entities_by_count(
    records: Vec<EntityKeywordRecord>,
    max_repk: usize,
) -> (Vec<EntityKeywordRecord>, EntityFilterStats) {
    let total_entities = records.len();
    let kept: Vec<EntityKeywordRecord> = records
        .into_iter()
        .filter(|r| r.keywords.len() >= max_repk)
        .collect();

    let stats = EntityFilterStats {
        filtered_entities: total_entities - kept.len(),
        total_entities,
        max_repk,
    };
    debug!(
        filtered = stats.filtered_entities,
        total = stats.total_entities,
        max_repk,
        "Filtered entities with too few keywords"
    );
    (kept, stats)
}

/// Both filter reports, in the order the filters ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterReport {
    pub words: WordFilterStats,
    pub entities: EntityFilterStats,
}

/// Entities whose every keyword has an embedding and that have at least
/// `max_repk` keywords.
#[derive(Debug, Clone)]
pub struct FilteredEntitySet {
    records: Vec<EntityKeywordRecord>,
    max_repk: usize,
}

impl FilteredEntitySet {
    /// Run the filter chain: embedding availability, then minimum count.
    pub fn build<V: Vocabulary + ?Sized>(
        records: Vec<EntityKeywordRecord>,
        vocab: &V,
        max_repk: usize,
    ) -> (Self, FilterReport) {
        let (records, words) = filter_words_by_embedding(records, vocab);
        let (records, entities) = filter_entities_by_count(records, max_repk);
        (
            Self { records, max_repk },
            FilterReport { words, entities },
        )
    }

    pub fn records(&self) -> &[EntityKeywordRecord] {
        &self.records
    }

    pub fn max_repk(&self) -> usize {
        self.max_repk
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
