// Error taxonomy for graph construction.
//
// Library code returns `GraphError` so callers (and tests) can match on the
// failure kind. The CLI and pipelines wrap these in anyhow with context.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphError {
    /// Malformed input: bad JSON record, short embedding line, bad number.
    #[error("parse error in {} (line {line}): {reason}", .path.display())]
    Parse {
        path: PathBuf,
        /// 1-based line number; 0 when the whole document failed to parse.
        line: usize,
        reason: String,
    },

    /// An embedding vector whose length differs from the table's dimension.
    #[error(
        "dimension mismatch in {} (line {line}): expected {expected} values, found {found}",
        .path.display()
    )]
    Dimension {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A word that should have an embedding does not.
    #[error("no embedding for word {word:?}")]
    MissingKey { word: String },

    /// A zero-norm vector met the `error` zero-vector policy.
    #[error("zero-norm embedding for word {word:?}")]
    ZeroVector { word: String },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GraphError {
    pub(crate) fn parse(path: &std::path::Path, line: usize, reason: impl Into<String>) -> Self {
        GraphError::Parse {
            path: path.to_path_buf(),
            line,
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        GraphError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;
