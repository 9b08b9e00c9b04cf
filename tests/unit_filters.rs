// Unit tests for the entity filter chain and the ET generator.
//
// Covers filter ordering, idempotence of the chain, and top-repk keyword
// selection.

use std::collections::HashSet;

use icegraph::entities::filter::{
    filter_entities_by_count, filter_words_by_embedding, FilteredEntitySet,
};
use icegraph::entities::record::EntityKeywordRecord;
use icegraph::graph::et::gen_et_network;

fn vocab(words: &[&str]) -> HashSet<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn ids(records: &[EntityKeywordRecord]) -> Vec<&str> {
    records.iter().map(|r| r.id.as_str()).collect()
}

// ============================================================
// Filter ordering
// ============================================================

#[test]
fn embedding_filter_first_drops_entity_that_falls_short() {
    // Exactly max_repk keywords, one of them without an embedding.
    let records = vec![EntityKeywordRecord::new(
        "e1",
        vec![("a", 0.9), ("b", 0.6), ("ghost", 0.3)],
    )];
    let vocab = vocab(&["a", "b"]);

    let (correct, _) = FilteredEntitySet::build(records.clone(), &vocab, 3);
    assert!(correct.is_empty(), "entity must be dropped");

    // Counting first keeps the entity even though it ends up with 2 keywords.
    let (counted, _) = filter_entities_by_count(records, 3);
    let (wrong, _) = filter_words_by_embedding(counted, &vocab);
    assert_eq!(ids(&wrong), vec!["e1"]);
    assert_eq!(wrong[0].keywords.len(), 2);
}

#[test]
fn correct_order_is_subset_of_wrong_order() {
    let records = vec![
        EntityKeywordRecord::new("full", vec![("a", 0.9), ("b", 0.5)]),
        EntityKeywordRecord::new("holey", vec![("a", 0.9), ("x", 0.5)]),
        EntityKeywordRecord::new("short", vec![("a", 0.9)]),
        EntityKeywordRecord::new("long", vec![("x", 0.9), ("a", 0.8), ("b", 0.1)]),
    ];
    let vocab = vocab(&["a", "b"]);

    let (correct, _) = FilteredEntitySet::build(records.clone(), &vocab, 2);
    let (counted, _) = filter_entities_by_count(records, 2);
    let (wrong, _) = filter_words_by_embedding(counted, &vocab);

    let wrong_ids: HashSet<&str> = ids(&wrong).into_iter().collect();
    for id in ids(correct.records()) {
        assert!(wrong_ids.contains(id), "{id} kept by correct order only");
    }
    assert_eq!(ids(correct.records()), vec!["full", "long"]);
    assert_eq!(ids(&wrong), vec!["full", "holey", "long"]);
}

// ============================================================
// Idempotence
// ============================================================

#[test]
fn filter_chain_is_idempotent() {
    let records = vec![
        EntityKeywordRecord::new("e1", vec![("a", 0.9), ("x", 0.8), ("b", 0.5)]),
        EntityKeywordRecord::new("e2", vec![("x", 0.9), ("a", 0.2)]),
        EntityKeywordRecord::new("e3", vec![("b", 0.4), ("c", 0.3), ("a", 0.1)]),
    ];
    let vocab = vocab(&["a", "b", "c"]);

    let (once, _) = FilteredEntitySet::build(records, &vocab, 2);
    let (twice, report) = FilteredEntitySet::build(once.records().to_vec(), &vocab, 2);

    assert_eq!(once.records(), twice.records());
    assert_eq!(report.words.filtered_words, 0);
    assert_eq!(report.entities.filtered_entities, 0);
}

#[test]
fn filter_report_counts_distinct_words() {
    let records = vec![
        EntityKeywordRecord::new("e1", vec![("a", 0.9), ("x", 0.8)]),
        EntityKeywordRecord::new("e2", vec![("x", 0.9), ("y", 0.2), ("a", 0.1)]),
    ];
    let (_, report) = FilteredEntitySet::build(records, &vocab(&["a"]), 1);
    assert_eq!(report.words.total_words, 3);
    assert_eq!(report.words.filtered_words, 2);
    assert_eq!(report.entities.total_entities, 2);
    assert_eq!(report.entities.remaining(), 2);
}

// ============================================================
// Top-repk selection
// ============================================================

#[test]
fn et_uses_top_repk_pairs_only() {
    let records = vec![EntityKeywordRecord::new(
        "e1",
        vec![("a", 0.9), ("b", 0.5), ("c", 0.1)],
    )];
    let (set, _) = FilteredEntitySet::build(records, &vocab(&["a", "b", "c"]), 3);

    let net = gen_et_network(set.records(), 2, true);
    let lines: Vec<String> = net.iter().map(|e| e.to_string()).collect();
    assert_eq!(lines, vec!["e1 a 0.9", "e1 b 0.5"]);
}

#[test]
fn et_same_entity_set_across_repk() {
    let records = vec![
        EntityKeywordRecord::new("e1", vec![("a", 0.9), ("b", 0.5), ("c", 0.1)]),
        EntityKeywordRecord::new("e2", vec![("b", 0.7), ("c", 0.6), ("a", 0.2)]),
        EntityKeywordRecord::new("e3", vec![("c", 0.7), ("a", 0.6)]),
    ];
    let (set, _) = FilteredEntitySet::build(records, &vocab(&["a", "b", "c"]), 3);

    for repk in 1..=3 {
        let net = gen_et_network(set.records(), repk, false);
        let sources: HashSet<&str> = net.iter().map(|e| e.source.as_str()).collect();
        assert_eq!(sources, HashSet::from(["e1", "e2"]), "repk={repk}");
        assert_eq!(net.len(), 2 * repk);
    }
}
