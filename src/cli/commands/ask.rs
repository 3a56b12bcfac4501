//! Ask command implementation.

use super::{build_engine, resolve_url, video_cap};
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;

/// Run the ask command.
pub async fn run_ask(
    question: &str,
    url: Option<String>,
    max_videos: Option<usize>,
    settings: Settings,
) -> Result<()> {
    let url = resolve_url(url, &settings)?;
    let engine = build_engine(&settings)?;

    let max_videos = video_cap(&url, max_videos, &settings);

    let spinner = Output::spinner("Analyzing videos...");
    let response = engine.answer_question(question, &url, max_videos).await;
    spinner.finish_and_clear();

    if response.confidence == 0.0 {
        Output::error(&response.answer);
        Output::info("Run 'tubeqa doctor' for diagnostics.");
        anyhow::bail!("failed to answer question");
    }

    println!("\n{}\n", response.answer);

    if !response.sources.is_empty() {
        Output::header("Sources");
        for source in &response.sources {
            Output::list_item(source);
        }
    }

    Ok(())
}
