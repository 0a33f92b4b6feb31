//! Execution module
//!
//! Glue between the exchange boundary and the normalizer: prepare an order
//! (fetch rules, normalize), then submit it.

mod pipeline;
mod types;

pub use pipeline::{prepare, prepare_with_rules, submit};
pub use types::{PrepareError, PreparedOrder};
