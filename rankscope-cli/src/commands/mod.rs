//! CLI command implementations.

pub mod config;
pub mod credits;
pub mod generate;
pub mod show;
