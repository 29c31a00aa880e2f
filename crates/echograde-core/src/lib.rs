//! echograde-core — Answer-fidelity scoring engine and session grading.
//!
//! This crate turns a reference exercise text and a learner's response into
//! a 0–100 fidelity score, a performance band, and a pass/fail flag, and
//! aggregates those scores across a whole test.

pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod model;
pub mod normalize;
pub mod parser;
pub mod report;
pub mod results;
pub mod scorer;
pub mod scoring;
pub mod statistics;
pub mod traits;

pub use classify::{classify, Classification, PerformanceBand, PASS_THRESHOLD};
pub use scorer::Score;
pub use scoring::{score_json, score_response, score_response_opt, ScoreResult};
