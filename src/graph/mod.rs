// Graph construction — the ET (entity-text) and TT (text-text) edge sets.

pub mod edge;
pub mod et;
pub mod tt;
