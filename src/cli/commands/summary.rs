//! Summary command implementation.

use super::{build_engine, resolve_url};
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;

/// Run the summary command.
pub async fn run_summary(url: Option<String>, settings: Settings) -> Result<()> {
    let url = resolve_url(url, &settings)?;
    let engine = build_engine(&settings)?;

    let spinner = Output::spinner("Summarizing...");
    let response = engine.get_summary(&url).await;
    spinner.finish_and_clear();

    if response.confidence == 0.0 {
        Output::error(&response.answer);
        anyhow::bail!("failed to generate summary");
    }

    println!("\n{}\n", response.answer);

    Ok(())
}
