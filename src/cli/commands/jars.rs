use anyhow::Result;
use clap::Args;
use serde::Serialize;

use super::ResultFormat;
use crate::cli::Output;
use crate::config::FilterConfig;
use crate::filter::ClassList;

#[derive(Args)]
pub struct JarsArgs {
    /// Class file locations to check
    #[arg(required = true)]
    pub locations: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = ResultFormat::Text)]
    pub format: ResultFormat,
}

#[derive(Debug, Serialize)]
struct JarVerdict<'a> {
    location: &'a str,
    eligible: bool,
}

pub async fn execute(args: &JarsArgs, config: &FilterConfig, output: &Output) -> Result<()> {
    let list = ClassList::from_config(config);

    if list.jars().is_empty() {
        output.verbose("No archive prefixes configured; every location is eligible");
    }

    let verdicts: Vec<JarVerdict<'_>> = args
        .locations
        .iter()
        .map(|location| JarVerdict {
            location: location.as_str(),
            eligible: list.is_in_jars(location),
        })
        .collect();

    match args.format {
        ResultFormat::Json => output.result(&serde_json::to_string_pretty(&verdicts)?),
        ResultFormat::Text => {
            for verdict in &verdicts {
                output.decision(verdict.location, verdict.eligible, "eligible", "outside");
            }
        }
    }
    Ok(())
}
