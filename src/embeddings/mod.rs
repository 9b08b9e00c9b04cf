// Word embeddings — the table loader and the labeled matrix used for
// batch distance computation.

pub mod matrix;
pub mod table;
