// icegraph: entity-text and text-text graph construction
//
// This is the library root. Each module corresponds to one stage of the
// graph construction pipeline.

pub mod config;
pub mod embeddings;
pub mod entities;
pub mod error;
pub mod graph;
pub mod output;
pub mod pipeline;
pub mod similarity;
