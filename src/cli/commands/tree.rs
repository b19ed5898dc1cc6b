use anyhow::Result;
use clap::Args;

use crate::cli::Output;
use crate::config::FilterConfig;
use crate::filter::ClassList;

#[derive(Args, Default)]
pub struct TreeArgs {}

pub async fn execute(_args: &TreeArgs, config: &FilterConfig, output: &Output) -> Result<()> {
    let list = ClassList::from_config(config);

    output.result(list.dump().trim_end());

    if !output.is_quiet() {
        output.table_row("Nodes", &list.tree().node_count().to_string());
        output.table_row(
            "Unlisted classes",
            if list.tree().decision() { "processed" } else { "skipped" },
        );
        output.table_row("Archive prefixes", &list.jars().len().to_string());
    }
    Ok(())
}
