// Word embedding table loader.
//
// File format: the first line is a header (word2vec/fastText style counts)
// and is skipped. Every following line is `word v1 v2 ... vD`, separated by
// whitespace. All vectors must share the dimension of the first data line.
// Every data line needs at least a word and one value, so a blank or
// whitespace-only line after the header is a parse error. The newline that
// ends the last line does not start another line.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{GraphError, Result};

/// Immutable word -> vector mapping, in file order.
#[derive(Debug, Clone)]
pub struct EmbeddingTable {
    dim: usize,
    words: Vec<String>,
    index: HashMap<String, usize>,
    /// Row-major, `words.len() * dim` values.
    values: Vec<f32>,
}

impl EmbeddingTable {
    /// Load an embedding table from a text file.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| GraphError::io(path, e))?;
        let table = Self::parse(BufReader::new(file), path)?;
        info!(
            words = table.len(),
            dim = table.dim,
            path = %path.display(),
            "Loaded word embeddings"
        );
        Ok(table)
    }

    /// Parse an embedding table from any reader. `path` is only used in errors.
    pub fn parse<R: BufRead>(reader: R, path: &Path) -> Result<Self> {
        let mut table = Self {
            dim: 0,
            words: Vec::new(),
            index: HashMap::new(),
            values: Vec::new(),
        };

        for (idx, line) in reader.lines().enumerate().skip(1) {
            let line = line.map_err(|e| GraphError::io(path, e))?;
            let lineno = idx + 1;
            let mut tokens = line.split_whitespace();
            let Some(word) = tokens.next() else {
                return Err(GraphError::parse(
                    path,
                    lineno,
                    "expected `word v1 ... vD`, found a blank line",
                ));
            };

            let vector = tokens
                .map(|t| {
                    t.parse::<f32>().map_err(|e| {
                        GraphError::parse(path, lineno, format!("bad value {t:?} for {word:?}: {e}"))
                    })
                })
                .collect::<Result<Vec<f32>>>()?;

            if vector.is_empty() {
                return Err(GraphError::parse(
                    path,
                    lineno,
                    format!("expected `word v1 ... vD`, found only {word:?}"),
                ));
            }

            table.insert(word, vector, path, lineno)?;
        }

        debug!(words = table.len(), dim = table.dim, "Parsed embedding table");
        Ok(table)
    }

    /// Build a table from in-memory entries, enforcing a uniform dimension.
    pub fn from_entries<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<f32>)>,
        S: Into<String>,
    {
        let path = PathBuf::from("<memory>");
        let mut table = Self {
            dim: 0,
            words: Vec::new(),
            index: HashMap::new(),
            values: Vec::new(),
        };
        for (i, (word, vector)) in entries.into_iter().enumerate() {
            let word: String = word.into();
            table.insert(&word, vector, &path, i + 1)?;
        }
        Ok(table)
    }

    fn insert(&mut self, word: &str, vector: Vec<f32>, path: &Path, line: usize) -> Result<()> {
        if self.words.is_empty() {
            self.dim = vector.len();
        } else if vector.len() != self.dim {
            return Err(GraphError::Dimension {
                path: path.to_path_buf(),
                line,
                expected: self.dim,
                found: vector.len(),
            });
        }

        // A repeated word keeps its first position but takes the later vector.
        if let Some(&row) = self.index.get(word) {
            let start = row * self.dim;
            self.values[start..start + self.dim].copy_from_slice(&vector);
        } else {
            self.index.insert(word.to_string(), self.words.len());
            self.words.push(word.to_string());
            self.values.extend_from_slice(&vector);
        }
        Ok(())
    }

    pub fn get(&self, word: &str) -> Option<&[f32]> {
        self.index.get(word).map(|&row| {
            let start = row * self.dim;
            &self.values[start..start + self.dim]
        })
    }

    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    /// Words in file order (first occurrence).
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Scan an embedding file for its vocabulary only, without parsing vectors.
///
/// Used by the ET filter, which only needs to know which words have an
/// embedding. Lines are validated for shape (at least a word and one value)
/// but the values themselves are not parsed.
pub fn load_vocabulary(path: &Path) -> Result<HashSet<String>> {
    let file = File::open(path).map_err(|e| GraphError::io(path, e))?;
    let mut vocab = HashSet::new();

    for (idx, line) in BufReader::new(file).lines().enumerate().skip(1) {
        let line = line.map_err(|e| GraphError::io(path, e))?;
        let mut tokens = line.split_whitespace();
        let Some(word) = tokens.next() else {
            return Err(GraphError::parse(
                path,
                idx + 1,
                "expected `word v1 ... vD`, found a blank line",
            ));
        };
        if tokens.next().is_none() {
            return Err(GraphError::parse(
                path,
                idx + 1,
                format!("expected `word v1 ... vD`, found only {word:?}"),
            ));
        }
        vocab.insert(word.to_string());
    }

    info!(words = vocab.len(), path = %path.display(), "Loaded embedding vocabulary");
    Ok(vocab)
}
