// Edge-list files: one `source target weight` line per edge, joined with
// newlines and written in a single pass, without a trailing newline.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::error::{GraphError, Result};
use crate::graph::edge::{Edge, EdgeSet};

/// Write `edges` to `path`, replacing any existing file.
pub fn write_edge_list(path: &Path, edges: &EdgeSet) -> Result<()> {
    let file = File::create(path).map_err(|e| GraphError::io(path, e))?;
    let mut out = BufWriter::new(file);
    write_edges(&mut out, edges).map_err(|e| GraphError::io(path, e))?;
    out.flush().map_err(|e| GraphError::io(path, e))?;

    info!(edges = edges.len(), path = %path.display(), "Wrote edge list");
    Ok(())
}

/// Write edges in set order to any writer.
pub fn write_edges<W: Write>(out: &mut W, edges: &EdgeSet) -> std::io::Result<()> {
    for (i, edge) in edges.iter().enumerate() {
        if i > 0 {
            out.write_all(b"\n")?;
        }
        write!(out, "{edge}")?;
    }
    Ok(())
}

/// Read an edge list back. Blank lines are skipped.
///
/// The weight and target are the last two whitespace-separated fields and
/// everything before them is the source, so entity ids containing spaces
/// survive the round trip. Targets are embedding words and never contain
/// whitespace.
pub fn read_edge_list(path: &Path) -> Result<EdgeSet> {
    let file = File::open(path).map_err(|e| GraphError::io(path, e))?;
    let mut edges = EdgeSet::new();

    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| GraphError::io(path, e))?;
        if line.trim().is_empty() {
            continue;
        }
        let (source, target, weight) = split_edge_line(&line).ok_or_else(|| {
            GraphError::parse(
                path,
                idx + 1,
                format!(
                    "expected `source target weight`, found {} fields",
                    line.split_whitespace().count()
                ),
            )
        })?;
        edges.insert(Edge::new(source, target, weight));
    }

    info!(edges = edges.len(), path = %path.display(), "Read edge list");
    Ok(edges)
}

/// Split `source... target weight`, peeling fields off the right.
fn split_edge_line(line: &str) -> Option<(&str, &str, &str)> {
    let (rest, weight) = line.trim().rsplit_once(char::is_whitespace)?;
    let (source, target) = rest.trim_end().rsplit_once(char::is_whitespace)?;
    let source = source.trim_end();
    if source.is_empty() {
        return None;
    }
    Some((source, target, weight))
}
