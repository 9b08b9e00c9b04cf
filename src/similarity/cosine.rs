// Cosine distance, scalar and batched.
//
// distance(u, v) = 1 - (u . v) / (|u| |v|), clamped to [0, 2].
//
// A zero-norm vector has no direction. Under `ZeroVectorPolicy::Penalize`
// any pair involving one gets MAX_DISTANCE; under `ZeroVectorPolicy::Error`
// the batch computation fails on the first zero-norm row or column.

use ndarray::{Array1, Array2, ArrayView2, Axis};
use tracing::debug;

use crate::config::ZeroVectorPolicy;
use crate::embeddings::matrix::LabeledMatrix;
use crate::error::{GraphError, Result};

/// Largest possible cosine distance (opposite directions).
pub const MAX_DISTANCE: f32 = 2.0;

fn norm_l2(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Cosine distance between two vectors of equal length.
///
/// Returns None when the lengths differ or either vector has zero norm.
pub fn cosine_distance(a: &[f32], b: &[f32]) -> Option<f32> {
    if a.len() != b.len() {
        return None;
    }
    let denom = norm_l2(a) * norm_l2(b);
    if denom == 0.0 {
        return None;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    Some((1.0 - dot / denom).clamp(0.0, MAX_DISTANCE))
}

/// Map a cosine distance in [0, 2] to a similarity weight in [0, 1].
pub fn distance_to_weight(distance: f32) -> f32 {
    1.0 - distance / 2.0
}

/// Row norms, plus the unit-length rows (zero rows stay zero).
fn normalize(m: ArrayView2<'_, f32>) -> (Array1<f32>, Array2<f32>) {
    let norms: Array1<f32> = m
        .axis_iter(Axis(0))
        .map(|row| row.iter().map(|x| x * x).sum::<f32>().sqrt())
        .collect();
    let mut unit = m.to_owned();
    for (mut row, &n) in unit.axis_iter_mut(Axis(0)).zip(norms.iter()) {
        if n > 0.0 {
            row.mapv_inplace(|x| x / n);
        }
    }
    (norms, unit)
}

fn first_zero(labels: &LabeledMatrix, norms: &Array1<f32>) -> Option<String> {
    norms
        .iter()
        .position(|&n| n == 0.0)
        .map(|i| labels.label(i).to_string())
}

/// Full rows x cols cosine distance matrix.
///
/// Entry (i, j) is the distance between row item i and column item j.
pub fn pairwise_distances(
    rows: &LabeledMatrix,
    cols: &LabeledMatrix,
    policy: ZeroVectorPolicy,
) -> Result<Array2<f32>> {
    let (row_dim, col_dim) = (rows.view().ncols(), cols.view().ncols());
    if row_dim != col_dim && !rows.is_empty() && !cols.is_empty() {
        return Err(GraphError::Dimension {
            path: "<matrix>".into(),
            line: 0,
            expected: row_dim,
            found: col_dim,
        });
    }

    let (row_norms, row_unit) = normalize(rows.view());
    let (col_norms, col_unit) = normalize(cols.view());

    if policy == ZeroVectorPolicy::Error {
        if let Some(word) = first_zero(rows, &row_norms).or_else(|| first_zero(cols, &col_norms)) {
            return Err(GraphError::ZeroVector { word });
        }
    }

    let mut distances = row_unit.dot(&col_unit.t());
    for ((i, j), d) in distances.indexed_iter_mut() {
        *d = if row_norms[i] == 0.0 || col_norms[j] == 0.0 {
            MAX_DISTANCE
        } else {
            (1.0 - *d).clamp(0.0, MAX_DISTANCE)
        };
    }

    debug!(
        rows = rows.len(),
        cols = cols.len(),
        "Computed pairwise cosine distances"
    );
    Ok(distances)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embeddings::table::EmbeddingTable;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_scalar_identical_is_zero() {
        assert!(close(cosine_distance(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).unwrap(), 0.0));
    }

    #[test]
    fn test_scalar_orthogonal_is_one() {
        assert!(close(cosine_distance(&[1.0, 0.0], &[0.0, 3.0]).unwrap(), 1.0));
    }

    #[test]
    fn test_scalar_opposite_is_two() {
        assert!(close(cosine_distance(&[1.0, 0.0], &[-1.0, 0.0]).unwrap(), 2.0));
    }

    #[test]
    fn test_scalar_zero_vector_is_none() {
        assert_eq!(cosine_distance(&[0.0, 0.0], &[1.0, 0.0]), None);
        assert_eq!(cosine_distance(&[1.0], &[1.0, 0.0]), None);
    }

    #[test]
    fn test_weight_formula_endpoints() {
        assert_eq!(distance_to_weight(0.0), 1.0);
        assert_eq!(distance_to_weight(1.0), 0.5);
        assert_eq!(distance_to_weight(2.0), 0.0);
    }

    #[test]
    fn test_pairwise_matches_scalar() {
        let table = EmbeddingTable::from_entries(vec![
            ("a", vec![1.0, 0.0]),
            ("b", vec![1.0, 1.0]),
            ("c", vec![-1.0, 0.5]),
        ])
        .unwrap();
        let m = LabeledMatrix::vocabulary(&table);
        let d = pairwise_distances(&m, &m, ZeroVectorPolicy::Penalize).unwrap();
        for (i, wi) in m.labels().iter().enumerate() {
            for (j, wj) in m.labels().iter().enumerate() {
                let expected = cosine_distance(table.get(wi).unwrap(), table.get(wj).unwrap()).unwrap();
                assert!(close(d[[i, j]], expected), "({wi}, {wj}): {} vs {expected}", d[[i, j]]);
            }
        }
    }

    #[test]
    fn test_zero_vector_penalized() {
        let table =
            EmbeddingTable::from_entries(vec![("z", vec![0.0, 0.0]), ("a", vec![1.0, 0.0])])
                .unwrap();
        let m = LabeledMatrix::vocabulary(&table);
        let d = pairwise_distances(&m, &m, ZeroVectorPolicy::Penalize).unwrap();
        assert_eq!(d[[0, 1]], MAX_DISTANCE);
        assert_eq!(d[[1, 0]], MAX_DISTANCE);
        assert!(close(d[[1, 1]], 0.0));
    }

    #[test]
    fn test_zero_vector_error_policy() {
        let table =
            EmbeddingTable::from_entries(vec![("a", vec![1.0, 0.0]), ("z", vec![0.0, 0.0])])
                .unwrap();
        let m = LabeledMatrix::vocabulary(&table);
        let err = pairwise_distances(&m, &m, ZeroVectorPolicy::Error).unwrap_err();
        match err {
            GraphError::ZeroVector { word } => assert_eq!(word, "z"),
            other => panic!("expected ZeroVector, got {other}"),
        }
    }
}
