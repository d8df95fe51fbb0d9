//! Pipeline orchestration for the standings generator.
//!
//! This crate ties together report selection, row extraction, HTML
//! rendering, and page writing into the per-division batch run
//! ([`pipeline::generate_all`]).

pub mod pipeline;
pub mod writer;
