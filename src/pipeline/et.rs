// ET pipeline: entity info + embedding vocabulary -> ET edge list.
//
// Load entity records, drop keywords without embeddings, drop entities left
// with fewer than `max_repk` keywords, then write one edge per entity and
// top-`repk` keyword.

use std::path::PathBuf;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::embeddings::table::load_vocabulary;
use crate::entities::filter::{FilterReport, FilteredEntitySet};
use crate::entities::record::load_entity_info;
use crate::graph::et::gen_et_network_with_progress;
use crate::output::edgelist::write_edge_list;
use crate::output::terminal;

/// Inputs and settings for one ET run.
#[derive(Debug, Clone)]
pub struct EtJob {
    /// Entity info JSON
    pub load_info: PathBuf,
    /// Word embedding file (only its vocabulary is read)
    pub load_embd: PathBuf,
    /// Keywords per entity in this graph
    pub repk: usize,
    /// Keywords per entity in the largest planned graph
    pub max_repk: usize,
    pub save_et: PathBuf,
    pub weighted: bool,
}

impl EtJob {
    pub fn validate(&self) -> Result<()> {
        if self.repk > self.max_repk {
            anyhow::bail!(
                "repk ({}) must not exceed max_repk ({}); entities are only guaranteed \
                 max_repk keywords after filtering",
                self.repk,
                self.max_repk
            );
        }
        Ok(())
    }
}

/// What an ET run produced.
#[derive(Debug, Clone, Copy)]
pub struct EtSummary {
    pub report: FilterReport,
    pub entities: usize,
    pub edges: usize,
}

/// Run the ET pipeline end to end.
pub fn run(job: &EtJob) -> Result<EtSummary> {
    job.validate()?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("  {spinner} {msg}")?);

    spinner.set_message("Loading entity info...");
    let records = load_entity_info(&job.load_info)
        .with_context(|| format!("Failed to load entity info from {}", job.load_info.display()))?;

    spinner.set_message("Scanning embedding vocabulary...");
    let vocab = load_vocabulary(&job.load_embd).with_context(|| {
        format!("Failed to read embedding vocabulary from {}", job.load_embd.display())
    })?;

    spinner.set_message("Filtering entities...");
    let (entities, report) = FilteredEntitySet::build(records, &vocab, job.max_repk);
    spinner.finish_and_clear();

    terminal::display_word_filter(&report.words);
    terminal::display_entity_filter(&report.entities);

    let pb = ProgressBar::new(entities.len() as u64);
    pb.set_style(ProgressStyle::default_bar().template("  Linking [{bar:30}] {pos}/{len} entities")?);
    let network = gen_et_network_with_progress(entities.records(), job.repk, job.weighted, &pb);
    pb.finish_and_clear();

    write_edge_list(&job.save_et, &network)
        .with_context(|| format!("Failed to write ET network to {}", job.save_et.display()))?;
    terminal::display_network_written("ET", network.len(), &job.save_et);

    info!(
        entities = entities.len(),
        edges = network.len(),
        repk = job.repk,
        max_repk = entities.max_repk(),
        "ET pipeline finished"
    );

    Ok(EtSummary {
        report,
        entities: entities.len(),
        edges: network.len(),
    })
}
