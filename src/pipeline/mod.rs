//! Batch evaluation: requests in, recorded rows out.

pub mod runner;


pub use runner::{BatchRunner, BatchSummary, read_requests};
