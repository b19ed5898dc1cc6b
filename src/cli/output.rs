//! Styled console output for packfilter
//!
//! Decisions and results go to stdout; diagnostics go to stderr so that
//! `check` output can be piped.

use console::style;

/// Output handler for consistent CLI formatting
pub struct Output {
    verbose: bool,
    quiet: bool,
}

impl Output {
    /// Create a new output handler
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if !self.quiet {
            eprintln!("{} {}", style("✔").green(), message);
        }
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if !self.quiet {
            eprintln!("{} {}", style("⚠").yellow(), message);
        }
    }

    /// Print a verbose message (only if verbose mode is enabled)
    pub fn verbose(&self, message: &str) {
        if self.verbose && !self.quiet {
            eprintln!("{} {}", style("ℹ").dim(), style(message).dim());
        }
    }

    /// Print a header/title
    pub fn header(&self, title: &str) {
        if !self.quiet {
            eprintln!("\n{}", style(title).bold().underlined());
        }
    }

    /// Print a key/value row
    pub fn table_row(&self, key: &str, value: &str) {
        if !self.quiet {
            eprintln!("  {:<20} {}", style(key).dim(), value);
        }
    }

    /// Print an indented message
    pub fn indent(&self, message: &str) {
        if !self.quiet {
            eprintln!("    {}", message);
        }
    }

    /// Print one decision line: `✔ process <subject>` or `✖ skip <subject>`
    pub fn decision(&self, subject: &str, accepted: bool, yes: &str, no: &str) {
        if accepted {
            println!("{} {} {}", style("✔").green(), style(yes).green(), subject);
        } else {
            println!("{} {} {}", style("✖").red(), style(no).red(), subject);
        }
    }

    /// Print raw result text to stdout
    pub fn result(&self, text: &str) {
        println!("{}", text);
    }

    /// Get quiet mode status
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }
}
