// Edges and the deduplicating edge set.
//
// An edge's identity is its formatted (source, target, weight) triple: the
// same pair with two different weights is two edges, the same triple
// produced twice is one. Weights are therefore stored already formatted.
// The set is ordered by source, then target, then weight text, so output
// is reproducible across runs.

use std::collections::BTreeSet;
use std::fmt;

/// Weight written for every unweighted ET edge.
pub const ET_UNIT_WEIGHT: &str = "1.0";

/// Weight written for every unweighted TT edge.
pub const TT_UNIT_WEIGHT: &str = "1";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub weight: String,
}

impl Edge {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        weight: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight: weight.into(),
        }
    }

    /// The weight as a number, if it parses as one.
    pub fn weight_value(&self) -> Option<f64> {
        self.weight.parse().ok()
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.source, self.target, self.weight)
    }
}

/// Shortest text that round-trips the score, always with a decimal point
/// or an exponent (`0.9`, `1.0`, `3e-05`, `1e+16`).
pub fn format_score(score: f64) -> String {
    signed_exponent(format!("{score:?}"))
}

/// Same as `format_score` for single-precision similarity weights.
pub fn format_similarity(weight: f32) -> String {
    signed_exponent(format!("{weight:?}"))
}

/// Rewrite `1e16` / `3e-5` as `1e+16` / `3e-05`: an explicit sign and at
/// least two exponent digits.
fn signed_exponent(text: String) -> String {
    let Some((mantissa, exp)) = text.split_once('e') else {
        return text;
    };
    match exp.parse::<i32>() {
        Ok(exp) => {
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
        }
        Err(_) => text,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeSet {
    edges: BTreeSet<Edge>,
}

impl EdgeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an edge; returns false if the identical triple was present.
    pub fn insert(&mut self, edge: Edge) -> bool {
        self.edges.insert(edge)
    }

    pub fn contains(&self, edge: &Edge) -> bool {
        self.edges.contains(edge)
    }

    /// Edges in (source, target, weight) order.
    pub fn iter(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

impl Extend<Edge> for EdgeSet {
    fn extend<T: IntoIterator<Item = Edge>>(&mut self, iter: T) {
        self.edges.extend(iter);
    }
}

impl FromIterator<Edge> for EdgeSet {
    fn from_iter<T: IntoIterator<Item = Edge>>(iter: T) -> Self {
        Self {
            edges: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a EdgeSet {
    type Item = &'a Edge;
    type IntoIter = std::collections::btree_set::Iter<'a, Edge>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}
