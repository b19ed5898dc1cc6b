//! Command implementations for the packfilter CLI
//!
//! Each command lives in its own module with its clap arguments and an
//! async `execute` entry point.

use clap::ValueEnum;

pub mod check;
pub mod config;
pub mod jars;
pub mod tree;
pub mod version;

/// Output format for per-item results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ResultFormat {
    /// One styled line per item
    #[default]
    Text,
    /// JSON array of objects
    Json,
}
