//! mcqbench-core — Dataset loading, answer parsing, and accuracy scoring.
//!
//! This crate defines the question model, the provider capability trait, and
//! the sequential evaluation engine that the rest of mcqbench builds on.

pub mod dataset;
pub mod engine;
pub mod error;
pub mod model;
pub mod parser;
pub mod prompt;
pub mod report;
pub mod scoreboard;
pub mod traits;
