// Entities — keyword records and the filter chain applied before graph
// construction.

pub mod filter;
pub mod record;
