// Output — edge-list serialization and terminal summaries.

pub mod edgelist;
pub mod terminal;
