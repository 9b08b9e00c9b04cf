// TT pipeline: ET edge list + word embeddings -> TT edge list.
//
// The representative words are the targets of the ET network written by the
// ET pipeline, so the two runs only share that file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::config::{CandidatePool, ZeroVectorPolicy};
use crate::embeddings::table::EmbeddingTable;
use crate::graph::tt::{gen_tt_network_with_progress, harvest_rep_words, TtParams};
use crate::output::edgelist::{read_edge_list, write_edge_list};
use crate::output::terminal;

/// Inputs and settings for one TT run.
#[derive(Debug, Clone)]
pub struct TtJob {
    pub load_embd: PathBuf,
    /// ET edge list to take representative words from
    pub load_et: PathBuf,
    /// Expansion words per representative word
    pub expk: usize,
    pub save_tt: PathBuf,
    pub weighted: bool,
    pub candidates: CandidatePool,
    pub zero_vectors: ZeroVectorPolicy,
}

/// What a TT run produced.
#[derive(Debug, Clone, Copy)]
pub struct TtSummary {
    pub rep_words: usize,
    pub edges: usize,
}

/// Run the TT pipeline end to end.
pub fn run(job: &TtJob) -> Result<TtSummary> {
    let et_network = read_edge_list(&job.load_et)
        .with_context(|| format!("Failed to read ET network from {}", job.load_et.display()))?;
    let rep_words = harvest_rep_words(&et_network);
    println!("  {} representative words in ET network", rep_words.len());

    let table = EmbeddingTable::load(&job.load_embd)
        .with_context(|| format!("Failed to load embeddings from {}", job.load_embd.display()))?;

    let params = TtParams {
        expk: job.expk,
        weighted: job.weighted,
        candidates: job.candidates,
        zero_vectors: job.zero_vectors,
    };

    let pb = ProgressBar::new(rep_words.len() as u64);
    pb.set_style(ProgressStyle::default_bar().template("  Expanding [{bar:30}] {pos}/{len} ({eta})")?);

    let network = gen_tt_network_with_progress(&rep_words, &table, &params, &pb)
        .context("Failed to compute expansion words")?;
    pb.finish_and_clear();

    write_edge_list(&job.save_tt, &network)
        .with_context(|| format!("Failed to write TT network to {}", job.save_tt.display()))?;
    terminal::display_network_written("TT", network.len(), &job.save_tt);

    info!(
        rep_words = rep_words.len(),
        edges = network.len(),
        expk = job.expk,
        candidates = ?job.candidates,
        "TT pipeline finished"
    );

    Ok(TtSummary {
        rep_words: rep_words.len(),
        edges: network.len(),
    })
}
