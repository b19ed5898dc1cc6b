//! # packfilter - Hierarchical include/exclude filtering for instrumentation
//!
//! packfilter decides which classes of a package tree should be instrumented.
//! Rules are package prefixes marked include or exclude; a class inherits the
//! rule of the most specific prefix that covers it.
//!
//! ## Features
//!
//! - **Segment trie**: exact, case-sensitive prefix rules with inherited defaults
//! - **Strict or permissive polarity**: skip or process everything unlisted
//! - **Self-protection**: the tracer's own namespace is never instrumented
//! - **Archive allow-list**: restrict eligible classes by load location
//! - **Layered configuration**: TOML, JSON or YAML files, environment, CLI flags
//!
//! ## Quick Start
//!
//! ```bash
//! # Which of these classes would be instrumented?
//! packfilter --include com/example --exclude com/example/gen \
//!     check com/example/Main com/example/gen/Stub java/lang/String
//!
//! # Show the rule tree built from packfilter.toml
//! packfilter tree
//! ```
//!
//! ## Library Usage
//!
//! ```
//! use packfilter::filter::ClassList;
//!
//! let list = ClassList::new(&["com/example"], &["com/example/gen"], true)
//!     .with_jars(["lib/"]);
//!
//! assert!(list.should_process("com/example/Main"));
//! assert!(!list.should_process("com/example/gen/Stub"));
//! assert!(list.is_in_jars("lib/app.jar"));
//! ```

pub mod cli;
pub mod config;
pub mod filter;
pub mod trie;

pub use cli::{Cli, Output};
pub use config::FilterConfig;
pub use filter::{ClassList, SharedClassList};
pub use trie::PackTree;

/// Result type alias for packfilter operations
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
