// Labeled dense matrix: an ordered list of item labels plus an aligned
// row-per-item array, used wherever word vectors are batched for distance
// computation.

use ndarray::{Array2, ArrayView1, ArrayView2};

use super::table::EmbeddingTable;
use crate::error::{GraphError, Result};

#[derive(Debug, Clone)]
pub struct LabeledMatrix {
    labels: Vec<String>,
    matrix: Array2<f32>,
}

impl LabeledMatrix {
    /// Gather the vectors for `labels`, in the given order.
    ///
    /// Fails with `MissingKey` for the first label without an embedding.
    pub fn from_table<I, S>(labels: I, table: &EmbeddingTable) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let mut matrix = Array2::<f32>::zeros((labels.len(), table.dim()));

        for (row, label) in labels.iter().enumerate() {
            let vector = table.get(label).ok_or_else(|| GraphError::MissingKey {
                word: label.clone(),
            })?;
            matrix.row_mut(row).assign(&ArrayView1::from(vector));
        }

        Ok(Self { labels, matrix })
    }

    /// Every word of the table, in table order.
    pub fn vocabulary(table: &EmbeddingTable) -> Self {
        let labels = table.words().to_vec();
        let mut matrix = Array2::<f32>::zeros((labels.len(), table.dim()));
        for (row, label) in labels.iter().enumerate() {
            if let Some(vector) = table.get(label) {
                matrix.row_mut(row).assign(&ArrayView1::from(vector));
            }
        }
        Self { labels, matrix }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn label(&self, row: usize) -> &str {
        &self.labels[row]
    }

    pub fn view(&self) -> ArrayView2<'_, f32> {
        self.matrix.view()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
