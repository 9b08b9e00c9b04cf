// Similarity — cosine distance over word vectors and nearest-neighbor
// selection.

pub mod cosine;
pub mod neighbors;
