//! CLI command implementations.

pub mod quiz;
pub mod reset;
pub mod show;
