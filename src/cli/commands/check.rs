use anyhow::{Context, Result, bail};
use clap::Args;
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::ResultFormat;
use crate::cli::Output;
use crate::config::FilterConfig;
use crate::filter::ClassList;

#[derive(Args)]
pub struct CheckArgs {
    /// Class names with '/'-separated packages (e.g. com/example/Main)
    pub classes: Vec<String>,

    /// Read additional class names from a file, one per line ('-' for stdin)
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = ResultFormat::Text)]
    pub format: ResultFormat,
}

/// Decision for one class name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub class: String,
    pub process: bool,
}

pub async fn execute(args: &CheckArgs, config: &FilterConfig, output: &Output) -> Result<()> {
    let mut classes = args.classes.clone();
    if let Some(path) = &args.file {
        classes.extend(read_class_names(path)?);
    }
    if classes.is_empty() {
        bail!("No class names given; pass them as arguments or with --file");
    }

    let list = ClassList::from_config(config);
    let verdicts = decide_all(&list, &classes);

    match args.format {
        ResultFormat::Json => output.result(&serde_json::to_string_pretty(&verdicts)?),
        ResultFormat::Text => {
            for verdict in &verdicts {
                output.decision(&verdict.class, verdict.process, "process", "skip");
            }
        }
    }

    let processed = verdicts.iter().filter(|v| v.process).count();
    output.verbose(&format!(
        "{} of {} classes would be processed",
        processed,
        verdicts.len()
    ));
    Ok(())
}

/// Evaluate every class against the same immutable filter, in parallel,
/// keeping input order
pub fn decide_all(list: &ClassList, classes: &[String]) -> Vec<Verdict> {
    classes
        .par_iter()
        .map(|class| Verdict {
            class: class.clone(),
            process: list.should_process(class.as_str()),
        })
        .collect()
}

fn read_class_names(path: &Path) -> Result<Vec<String>> {
    let content = if path.as_os_str() == "-" {
        std::io::read_to_string(std::io::stdin()).context("Failed to read class names from stdin")?
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read class list: {}", path.display()))?
    };

    Ok(parse_class_names(&content))
}

/// One name per line; blank lines and `#` comments are skipped
fn parse_class_names(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
