//! bloomly-core — Trait scoring engine, question bank, and session state.
//!
//! This crate defines the five-trait profile model, the pure scoring and
//! confidence math, the quiz session aggregator, and the key-value
//! persistence boundary that the rest of the bloomly system builds on.

pub mod error;
pub mod profile;
pub mod question;
pub mod scoring;
pub mod session;
pub mod storage;
