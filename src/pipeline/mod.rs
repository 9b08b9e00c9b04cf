// Pipelines — file-to-file orchestration of loading, filtering, graph
// construction and output, with progress reporting.

pub mod et;
pub mod tt;
