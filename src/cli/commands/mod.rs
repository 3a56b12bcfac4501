//! CLI command implementations.

mod ask;
mod config;
mod doctor;
mod search;
mod serve;
mod summary;

pub use ask::run_ask;
pub use config::run_config;
pub use doctor::run_doctor;
pub use search::run_search;
pub use serve::run_serve;
pub use summary::run_summary;

use crate::config::Settings;
use crate::llm::OllamaClient;
use crate::qa::QaEngine;
use crate::youtube::{TargetKind, YouTubeDataApi};
use anyhow::Result;
use std::sync::Arc;

/// Build the question-answering engine from settings.
pub(crate) fn build_engine(settings: &Settings) -> Result<QaEngine> {
    let api_key = settings.youtube_api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No YouTube API key configured. \
             Set youtube.api_key in the config file or the YOUTUBE_API_KEY environment variable."
        )
    })?;

    let provider = Arc::new(YouTubeDataApi::new(&api_key)?);
    let generator = Arc::new(OllamaClient::new(
        &settings.ollama.base_url,
        &settings.ollama.model,
    )?);

    Ok(QaEngine::new(provider, generator))
}

/// Resolve the target URL from the argument or the configured default.
pub(crate) fn resolve_url(url: Option<String>, settings: &Settings) -> Result<String> {
    url.or_else(|| settings.youtube.default_url.clone())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "No playlist or channel URL given. \
                 Pass --url or set youtube.default_url in the config file."
            )
        })
}

/// Pick the context video cap for the target behind `url`.
///
/// An explicit caller value wins; otherwise channels get the channel cap
/// and everything else the playlist cap.
pub(crate) fn video_cap(
    url: &str,
    max_videos: Option<usize>,
    settings: &Settings,
) -> Option<usize> {
    max_videos.or_else(|| match TargetKind::classify(url) {
        Some(TargetKind::Channel(_)) => Some(settings.qa.channel_max_videos),
        _ => Some(settings.qa.max_videos),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_cap_playlist_uses_playlist_setting() {
        let settings = Settings::default();
        let cap = video_cap(
            "https://www.youtube.com/playlist?list=PLtest",
            None,
            &settings,
        );
        assert_eq!(cap, Some(settings.qa.max_videos));
    }

    #[test]
    fn test_video_cap_channel_uses_channel_setting() {
        let mut settings = Settings::default();
        settings.qa.channel_max_videos = 35;
        let cap = video_cap("https://www.youtube.com/@somehandle", None, &settings);
        assert_eq!(cap, Some(35));
    }

    #[test]
    fn test_video_cap_explicit_value_wins() {
        let settings = Settings::default();
        let cap = video_cap("https://www.youtube.com/@somehandle", Some(3), &settings);
        assert_eq!(cap, Some(3));
    }
}
