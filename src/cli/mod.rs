//! Command-line interface for packfilter
//!
//! Global flags select and extend the rule configuration; subcommands query
//! the resulting filter.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};

use crate::config::{ConfigOverrides, FilterConfig};

pub mod commands;
mod output;

pub use output::Output;

use commands::{check, config, jars, tree, version};

/// packfilter - decide which classes of a package tree get instrumented
#[derive(Parser)]
#[command(
    name = "packfilter",
    author,
    version,
    about = "Hierarchical include/exclude filter for instrumentation targets",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Run as if started in <DIR> instead of current working directory
    #[arg(short = 'C', long = "directory", global = true)]
    pub directory: Option<String>,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Use custom configuration file instead of user and repository config
    #[arg(long, value_name = "FILE", env = "PACKFILTER_CONFIG", global = true)]
    pub config: Option<String>,

    /// Package prefix to include (comma-separated or repeated)
    #[arg(short = 'i', long = "include", value_delimiter = ',', global = true)]
    pub includes: Vec<String>,

    /// Package prefix to exclude (comma-separated or repeated)
    #[arg(short = 'x', long = "exclude", value_delimiter = ',', global = true)]
    pub excludes: Vec<String>,

    /// Archive path prefix that makes a class eligible (repeatable)
    #[arg(long = "jar", global = true)]
    pub jars: Vec<String>,

    /// Skip everything not explicitly included
    #[arg(long, value_name = "BOOL", global = true)]
    pub strict_includes: Option<bool>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decide whether classes should be instrumented
    Check(check::CheckArgs),
    /// Check class file locations against the archive allow-list
    Jars(jars::JarsArgs),
    /// Print the rule tree
    Tree(tree::TreeArgs),
    /// Configuration management
    Config(config::ConfigArgs),
    /// Show version information
    Version(version::VersionArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn run(self) -> Result<()> {
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)
                .with_context(|| format!("Failed to change directory to {}", dir))?;
        }

        setup_logging(self.verbose, self.quiet);

        let output = Output::new(self.verbose > 0, self.quiet);

        match &self.command {
            Some(Commands::Check(args)) => check::execute(args, &self.load_config()?, &output).await,
            Some(Commands::Jars(args)) => jars::execute(args, &self.load_config()?, &output).await,
            Some(Commands::Tree(args)) => tree::execute(args, &self.load_config()?, &output).await,
            Some(Commands::Config(args)) => config::execute(args, &self.load_config()?, &output).await,
            Some(Commands::Version(args)) => version::execute(args).await,
            None => {
                let mut cmd = Cli::command();
                cmd.print_help()?;
                Ok(())
            }
        }
    }

    /// Rule overrides from the global flags
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            strict_includes: self.strict_includes,
            includes: self.includes.clone(),
            excludes: self.excludes.clone(),
            jars: self.jars.clone(),
        }
    }

    fn load_config(&self) -> Result<FilterConfig> {
        FilterConfig::load(self.config.as_deref(), Some(self.overrides()))
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info,figment=warn"),
            2 => tracing_subscriber::EnvFilter::new("debug,figment=warn"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    // Logs go to stderr so command output stays machine-readable
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_rule_flags_become_overrides() {
        let cli = Cli::parse_from([
            "packfilter",
            "--include",
            "a,a/a/a",
            "-x",
            "a/a",
            "--jar",
            "lib/",
            "--strict-includes",
            "false",
            "tree",
        ]);
        let overrides = cli.overrides();

        assert_eq!(overrides.includes, vec!["a", "a/a/a"]);
        assert_eq!(overrides.excludes, vec!["a/a"]);
        assert_eq!(overrides.jars, vec!["lib/"]);
        assert_eq!(overrides.strict_includes, Some(false));
    }

    #[test]
    fn test_absent_flags_leave_overrides_empty() {
        let cli = Cli::parse_from(["packfilter", "tree"]);
        let overrides = cli.overrides();

        assert!(overrides.includes.is_empty());
        assert!(overrides.strict_includes.is_none());
    }
}
