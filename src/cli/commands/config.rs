use anyhow::Result;
use clap::{Args, Subcommand};

use crate::cli::Output;
use crate::config::{ConfigFormat, FilterConfig};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Display current merged configuration
    Show {
        /// Output format: json, toml, yaml
        #[arg(short, long, default_value = "toml")]
        format: String,
    },
    /// Report suspicious rules
    Validate,
}

pub async fn execute(args: &ConfigArgs, config: &FilterConfig, output: &Output) -> Result<()> {
    match &args.command {
        ConfigCommand::Show { format } => {
            let format: ConfigFormat = format.parse()?;
            output.result(config.export(format)?.trim_end());
        }
        ConfigCommand::Validate => validate(config, output),
    }
    Ok(())
}

fn validate(config: &FilterConfig, output: &Output) {
    output.header("Validating Configuration");
    output.table_row("Includes", &config.includes.len().to_string());
    output.table_row("Excludes", &config.excludes.len().to_string());
    output.table_row("Archive prefixes", &config.jars.len().to_string());
    output.table_row("Strict includes", &config.strict_includes.to_string());

    let warnings = config.lint();
    if warnings.is_empty() {
        output.success("Configuration is valid");
        return;
    }

    output.warning(&format!("{} suspicious rule(s)", warnings.len()));
    for warning in &warnings {
        output.indent(&warning.to_string());
    }
}
