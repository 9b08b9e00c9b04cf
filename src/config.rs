use std::env;

use anyhow::Result;
use tracing::warn;

/// Which words a representative word may be expanded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CandidatePool {
    /// Only the representative words themselves (default): an R x R matrix.
    Representative,
    /// Every word in the embedding table: an R x V matrix, much larger.
    Vocabulary,
}

/// What to do when a cosine distance involves a zero-norm vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZeroVectorPolicy {
    /// Treat the pair as maximally distant (2.0), so it ranks last.
    Penalize,
    /// Abort the run.
    Error,
}

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded at startup via dotenvy; CLI flags take
/// precedence where both exist.
#[derive(Debug, Clone)]
pub struct Config {
    /// TT candidate pool (ICEGRAPH_CANDIDATES)
    pub candidates: CandidatePool,
    /// Zero-vector handling for cosine distance (ICEGRAPH_ZERO_VECTORS)
    pub zero_vectors: ZeroVectorPolicy,
    /// Worker threads for row-wise neighbor ranking (ICEGRAPH_THREADS).
    /// None leaves rayon's default (one per core).
    pub threads: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            candidates: CandidatePool::Representative,
            zero_vectors: ZeroVectorPolicy::Penalize,
            threads: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every variable is optional. Unrecognized values fall back to the
    /// default with a warning rather than failing the run.
    pub fn load() -> Result<Self> {
        let defaults = Self::default();

        let candidates = match env::var("ICEGRAPH_CANDIDATES").as_deref() {
            Ok("vocabulary") => CandidatePool::Vocabulary,
            Ok("representative") | Err(_) => defaults.candidates,
            Ok(other) => {
                warn!(value = other, "Unknown ICEGRAPH_CANDIDATES, using representative");
                defaults.candidates
            }
        };

        let zero_vectors = match env::var("ICEGRAPH_ZERO_VECTORS").as_deref() {
            Ok("error") => ZeroVectorPolicy::Error,
            Ok("penalize") | Err(_) => defaults.zero_vectors,
            Ok(other) => {
                warn!(value = other, "Unknown ICEGRAPH_ZERO_VECTORS, using penalize");
                defaults.zero_vectors
            }
        };

        let threads = match env::var("ICEGRAPH_THREADS") {
            Ok(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => Some(n),
                _ => {
                    warn!(value = %raw, "Invalid ICEGRAPH_THREADS, using rayon default");
                    None
                }
            },
            Err(_) => None,
        };

        Ok(Self {
            candidates,
            zero_vectors,
            threads,
        })
    }

    /// Size the global rayon pool. Only the first call in a process has
    /// any effect; later calls are ignored.
    pub fn apply_threads(&self) {
        if let Some(n) = self.threads {
            if let Err(e) = rayon::ThreadPoolBuilder::new().num_threads(n).build_global() {
                warn!(error = %e, "Could not size the rayon thread pool");
            }
        }
    }
}
