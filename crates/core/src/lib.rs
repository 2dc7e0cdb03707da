//! Domain types and pure logic for the Carefully training backend.
//!
//! Everything in this crate is I/O-free: session status rules, progress
//! computation, utterance validation, the sentiment taxonomy, and the
//! deterministic feedback-score aggregation. The `db`, `llm`, and `api`
//! crates all build on these definitions.

pub mod conversation;
pub mod error;
pub mod scoring;
pub mod sentiment;
pub mod session;
pub mod types;
