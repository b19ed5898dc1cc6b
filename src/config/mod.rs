//! Configuration management for packfilter
//!
//! Rules are loaded from layered sources (embedded defaults, user and
//! repository files, environment, CLI flags) and merged with figment.

pub mod core;
pub mod formats;
pub mod lint;

pub use core::{ConfigOverrides, FilterConfig};
pub use formats::ConfigFormat;
pub use lint::{ConfigWarning, RuleList, WarningKind};
