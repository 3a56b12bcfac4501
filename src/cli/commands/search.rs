//! Search command implementation.

use super::{build_engine, resolve_url};
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;

/// Run the search command.
pub async fn run_search(
    query: &str,
    url: Option<String>,
    limit: usize,
    settings: Settings,
) -> Result<()> {
    let url = resolve_url(url, &settings)?;
    let engine = build_engine(&settings)?;

    let spinner = Output::spinner("Searching videos...");
    let videos = engine.search_videos(query, &url, Some(limit)).await;
    spinner.finish_and_clear();

    if videos.is_empty() {
        Output::info(&format!("No videos found for \"{query}\"."));
        return Ok(());
    }

    Output::header(&format!("Results for \"{query}\""));
    for (index, video) in videos.iter().enumerate() {
        Output::video_result(index + 1, video);
    }
    println!();

    Ok(())
}
