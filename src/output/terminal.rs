// Colored terminal summaries for the pipelines.
//
// Progress bars live in the pipeline modules; this module only prints the
// filter statistics and the closing edge counts.

use colored::Colorize;

use crate::entities::filter::{EntityFilterStats, WordFilterStats};

pub fn display_word_filter(stats: &WordFilterStats) {
    println!(
        "  Filtered {} words without embeddings out of {} words.",
        highlight(stats.filtered_words),
        stats.total_words
    );
}

pub fn display_entity_filter(stats: &EntityFilterStats) {
    println!(
        "  Filtered {} entities with less than {} representative words out of {} entities. Leaving {} entities.",
        highlight(stats.filtered_entities),
        stats.max_repk,
        stats.total_entities,
        stats.remaining().to_string().bold()
    );
}

/// One line per written network, e.g. "ET network: 1204 edges -> et.txt".
pub fn display_network_written(kind: &str, edges: usize, path: &std::path::Path) {
    println!(
        "  {} network: {} edges -> {}",
        kind,
        edges.to_string().bold(),
        path.display().to_string().dimmed()
    );
}

pub fn display_banner(text: &str) {
    println!("{}", text.bold());
}

/// Nonzero drop counts stand out; zero stays plain.
fn highlight(count: usize) -> colored::ColoredString {
    if count > 0 {
        count.to_string().yellow()
    } else {
        count.to_string().normal()
    }
}
