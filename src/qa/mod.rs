//! Question answering over playlists and channels.
//!
//! The [`QaEngine`] is the single coordinating component: it classifies the
//! target URL, fetches metadata through the injected [`VideoProvider`],
//! assembles a bounded context block, and delegates reasoning to the
//! injected [`TextGenerator`].

pub mod context;

pub use context::{build_channel_context, build_playlist_context};

use crate::error::{Result, TubeqaError};
use crate::llm::TextGenerator;
use crate::models::Video;
use crate::youtube::{TargetKind, VideoProvider};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Confidence attached to every successful answer.
///
/// A deliberate fixed-value contract: confidence is not computed from
/// evidence quality, and 0.0 is the only failure marker callers get.
const ANSWER_CONFIDENCE: f32 = 0.8;

/// Maximum number of source citations attached to an answer.
const MAX_SOURCES: usize = 10;

/// Soft cap on generated answer length, in tokens.
const MAX_ANSWER_TOKENS: u32 = 300;

/// Default number of channel videos considered when the caller sets no cap.
const DEFAULT_CHANNEL_RESULTS: usize = 20;

const PLAYLIST_SUMMARY_PROMPT: &str = "Please provide a summary of this YouTube playlist. \
     What type of content is it? What can viewers expect? \
     Mention key themes, the creator, and overall style.";

const CHANNEL_SUMMARY_PROMPT: &str = "Please provide a summary of this YouTube channel. \
     What type of content does it publish? What can viewers expect? \
     Mention key themes, the creator, and overall style.";

/// An answer with source citations and a confidence score.
#[derive(Debug, Clone, Serialize)]
pub struct QaResponse {
    /// The generated answer, or a human-readable failure explanation.
    pub answer: String,
    /// Citations rendered as `"{title} (Published: {YYYY-MM-DD})"`.
    pub sources: Vec<String>,
    /// 0.8 on success, 0.0 on failure. Nothing in between.
    pub confidence: f32,
}

impl QaResponse {
    fn degraded(error: &TubeqaError) -> Self {
        Self {
            answer: format!("I encountered an error while processing your question: {error}"),
            sources: Vec::new(),
            confidence: 0.0,
        }
    }
}

/// Question-answering engine over YouTube playlists and channels.
pub struct QaEngine {
    provider: Arc<dyn VideoProvider>,
    generator: Arc<dyn TextGenerator>,
}

impl QaEngine {
    /// Create an engine from injected provider and generator instances.
    pub fn new(provider: Arc<dyn VideoProvider>, generator: Arc<dyn TextGenerator>) -> Self {
        Self { provider, generator }
    }

    /// Answer a question about the content behind `url`.
    ///
    /// This never returns an error: any failure while fetching metadata or
    /// generating text is folded into a degraded response whose only marker
    /// is `confidence == 0.0`, so callers need no error branch.
    #[instrument(skip(self), fields(question = %question))]
    pub async fn answer_question(
        &self,
        question: &str,
        url: &str,
        max_videos: Option<usize>,
    ) -> QaResponse {
        info!("Processing question: {}", question);

        match self.try_answer(question, url, max_videos).await {
            Ok(response) => response,
            Err(e) => {
                error!("Error processing question: {}", e);
                QaResponse::degraded(&e)
            }
        }
    }

    async fn try_answer(
        &self,
        question: &str,
        url: &str,
        max_videos: Option<usize>,
    ) -> Result<QaResponse> {
        let target = TargetKind::classify(url).ok_or_else(|| {
            TubeqaError::InvalidInput(format!("Not a playlist or channel URL: {url}"))
        })?;

        let (context, videos) = match target {
            TargetKind::Playlist(_) => {
                let playlist = self.provider.get_playlist(url).await?;
                info!("Loaded playlist: {} ({} videos)", playlist.title, playlist.video_count);

                let mut videos = self.provider.get_playlist_videos(url, max_videos).await?;
                videos.sort_by(|a, b| b.published_at.cmp(&a.published_at));
                info!("Analyzing {} videos", videos.len());

                (build_playlist_context(&playlist, &videos), videos)
            }
            TargetKind::Channel(_) => {
                let channel = self.provider.get_channel(url).await?;
                info!("Loaded channel: {}", channel.title);

                let limit = max_videos.unwrap_or(DEFAULT_CHANNEL_RESULTS);
                let videos = self
                    .provider
                    .search_channel_videos(url, question, Some(limit), true)
                    .await?;
                info!("Analyzing {} relevant videos", videos.len());

                (build_channel_context(&channel, &videos, question), videos)
            }
        };

        let answer = self
            .generator
            .generate_response(question, Some(&context), Some(MAX_ANSWER_TOKENS))
            .await?;

        let sources = videos
            .iter()
            .take(MAX_SOURCES)
            .map(|video| format!("{} (Published: {})", video.title, video.published_date()))
            .collect();

        info!("Generated answer: {} characters", answer.len());

        Ok(QaResponse {
            answer: answer.trim().to_string(),
            sources,
            confidence: ANSWER_CONFIDENCE,
        })
    }

    /// Summarize the playlist or channel behind `url`.
    pub async fn get_summary(&self, url: &str) -> QaResponse {
        let prompt = match TargetKind::classify(url) {
            Some(TargetKind::Channel(_)) => CHANNEL_SUMMARY_PROMPT,
            // Unclassifiable input degrades inside answer_question.
            _ => PLAYLIST_SUMMARY_PROMPT,
        };

        self.answer_question(prompt, url, None).await
    }

    /// Search for videos matching `query`.
    ///
    /// Failure mode is an empty list, not an error: a caller rendering
    /// search results has nothing useful to do with a failure reason.
    #[instrument(skip(self), fields(query = %query))]
    pub async fn search_videos(
        &self,
        query: &str,
        url: &str,
        max_results: Option<usize>,
    ) -> Vec<Video> {
        match self.try_search(query, url, max_results).await {
            Ok(videos) => videos,
            Err(e) => {
                error!("Error searching videos: {}", e);
                Vec::new()
            }
        }
    }

    async fn try_search(
        &self,
        query: &str,
        url: &str,
        max_results: Option<usize>,
    ) -> Result<Vec<Video>> {
        let target = TargetKind::classify(url).ok_or_else(|| {
            TubeqaError::InvalidInput(format!("Not a playlist or channel URL: {url}"))
        })?;

        match target {
            TargetKind::Playlist(_) => {
                let videos = self.provider.get_playlist_videos(url, None).await?;

                let query_lower = query.to_lowercase();
                let mut matches: Vec<Video> = videos
                    .into_iter()
                    .filter(|video| {
                        video.title.to_lowercase().contains(&query_lower)
                            || video.description.to_lowercase().contains(&query_lower)
                    })
                    .collect();

                matches.sort_by(|a, b| b.published_at.cmp(&a.published_at));
                if let Some(max) = max_results {
                    matches.truncate(max);
                }
                Ok(matches)
            }
            TargetKind::Channel(_) => {
                // No transcripts here: search results only need metadata,
                // and the provider's own ranking order is kept.
                self.provider
                    .search_channel_videos(url, query, max_results, false)
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Channel, Playlist};
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use std::sync::Mutex;

    const PLAYLIST_URL: &str = "https://www.youtube.com/playlist?list=PLtest123";
    const CHANNEL_URL: &str = "https://www.youtube.com/@testhandle";

    fn video(title: &str, description: &str, day: u32) -> Video {
        Video {
            id: format!("id-{day}"),
            title: title.to_string(),
            description: description.to_string(),
            channel_title: "TestChannel".to_string(),
            published_at: Utc.with_ymd_and_hms(2023, 1, day, 0, 0, 0).unwrap(),
            duration: None,
            thumbnail_url: None,
            transcript: None,
        }
    }

    fn playlist() -> Playlist {
        Playlist {
            id: "PLtest123".to_string(),
            title: "Test Gaming Playlist".to_string(),
            description: "A playlist about gaming videos".to_string(),
            channel_title: "TestChannel".to_string(),
            video_count: 10,
            published_at: Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(),
            videos: None,
        }
    }

    fn channel() -> Channel {
        Channel {
            id: "UCtest".to_string(),
            title: "Test Channel".to_string(),
            description: "Channel about games".to_string(),
            subscriber_count: Some(1000),
            video_count: Some(50),
            playlist_count: None,
            published_at: None,
            thumbnail_url: None,
            custom_url: None,
            playlists: None,
        }
    }

    struct MockProvider {
        playlist_videos: Vec<Video>,
        channel_videos: Vec<Video>,
        fail: bool,
    }

    impl MockProvider {
        fn with_videos(playlist_videos: Vec<Video>) -> Self {
            Self {
                playlist_videos,
                channel_videos: Vec::new(),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                playlist_videos: Vec::new(),
                channel_videos: Vec::new(),
                fail: true,
            }
        }

        fn check(&self) -> Result<()> {
            if self.fail {
                Err(TubeqaError::YouTubeApi("API Error".to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl VideoProvider for MockProvider {
        async fn get_playlist(&self, _url: &str) -> Result<Playlist> {
            self.check()?;
            Ok(playlist())
        }

        async fn get_playlist_videos(
            &self,
            _url: &str,
            max_results: Option<usize>,
        ) -> Result<Vec<Video>> {
            self.check()?;
            let mut videos = self.playlist_videos.clone();
            if let Some(max) = max_results {
                videos.truncate(max);
            }
            Ok(videos)
        }

        async fn get_channel(&self, _url: &str) -> Result<Channel> {
            self.check()?;
            Ok(channel())
        }

        async fn get_channel_playlists(
            &self,
            _url: &str,
            _max_results: Option<usize>,
        ) -> Result<Vec<Playlist>> {
            self.check()?;
            Ok(Vec::new())
        }

        async fn search_channel_videos(
            &self,
            _url: &str,
            _query: &str,
            max_results: Option<usize>,
            include_transcripts: bool,
        ) -> Result<Vec<Video>> {
            self.check()?;
            let mut videos = self.channel_videos.clone();
            if include_transcripts {
                videos = videos
                    .into_iter()
                    .map(|v| v.with_transcript(Some("transcript text".to_string())))
                    .collect();
            }
            if let Some(max) = max_results {
                videos.truncate(max);
            }
            Ok(videos)
        }

        async fn get_video_transcript(&self, _video_id: &str) -> Result<Option<String>> {
            self.check()?;
            Ok(None)
        }
    }

    struct MockGenerator {
        response: String,
        calls: Mutex<Vec<(String, Option<String>)>>,
    }

    impl MockGenerator {
        fn replying(response: &str) -> Self {
            Self {
                response: response.to_string(),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for MockGenerator {
        async fn generate_response(
            &self,
            prompt: &str,
            context: Option<&str>,
            _max_tokens: Option<u32>,
        ) -> Result<String> {
            self.calls
                .lock()
                .unwrap()
                .push((prompt.to_string(), context.map(|c| c.to_string())));
            Ok(self.response.clone())
        }

        async fn generate_embedding(&self, _text: &str) -> Result<Vec<f32>> {
            Ok(vec![0.0; 3])
        }

        async fn health_check(&self) -> bool {
            true
        }
    }

    fn engine(provider: MockProvider, generator: MockGenerator) -> (QaEngine, Arc<MockGenerator>) {
        let generator = Arc::new(generator);
        (
            QaEngine::new(Arc::new(provider), generator.clone()),
            generator,
        )
    }

    #[tokio::test]
    async fn test_answer_question_success() {
        let videos = vec![
            video("Epic Gaming Moment #1", "Amazing gameplay with friends", 1),
            video("Epic Gaming Moment #2", "More epic gameplay", 2),
        ];
        let (engine, _) = engine(
            MockProvider::with_videos(videos),
            MockGenerator::replying("This is a gaming playlist with epic moments."),
        );

        let result = engine
            .answer_question("What is this playlist about?", PLAYLIST_URL, None)
            .await;

        assert_eq!(result.answer, "This is a gaming playlist with epic moments.");
        assert_eq!(result.confidence, 0.8);
        assert_eq!(result.sources.len(), 2);
        // Sources are newest-first and carry the publish date.
        assert_eq!(result.sources[0], "Epic Gaming Moment #2 (Published: 2023-01-02)");
        assert_eq!(result.sources[1], "Epic Gaming Moment #1 (Published: 2023-01-01)");
    }

    #[tokio::test]
    async fn test_answer_question_caps_sources_at_ten() {
        let videos: Vec<Video> = (1..=12)
            .map(|day| video(&format!("Video {day}"), "", day))
            .collect();
        let (engine, _) = engine(
            MockProvider::with_videos(videos),
            MockGenerator::replying("answer"),
        );

        let result = engine.answer_question("q", PLAYLIST_URL, None).await;
        assert_eq!(result.sources.len(), 10);
    }

    #[tokio::test]
    async fn test_answer_question_never_raises() {
        let (engine, _) = engine(MockProvider::failing(), MockGenerator::replying("unused"));

        let result = engine.answer_question("What is this about?", PLAYLIST_URL, None).await;

        assert!(result.answer.to_lowercase().contains("error"));
        assert_eq!(result.confidence, 0.0);
        assert!(result.sources.is_empty());
    }

    #[tokio::test]
    async fn test_answer_question_unclassifiable_url_degrades() {
        let (engine, _) = engine(
            MockProvider::with_videos(Vec::new()),
            MockGenerator::replying("unused"),
        );

        let result = engine
            .answer_question("q", "https://example.com/nothing", None)
            .await;
        assert_eq!(result.confidence, 0.0);
        assert!(result.sources.is_empty());
    }

    #[tokio::test]
    async fn test_empty_generation_is_still_a_success() {
        let videos = vec![video("Only Video", "", 1)];
        let (engine, _) = engine(MockProvider::with_videos(videos), MockGenerator::replying(""));

        let result = engine.answer_question("q", PLAYLIST_URL, None).await;

        // An empty answer is not a failure; confidence stays at 0.8.
        assert_eq!(result.answer, "");
        assert_eq!(result.confidence, 0.8);
        assert_eq!(result.sources.len(), 1);
    }

    #[tokio::test]
    async fn test_channel_question_uses_relevance_search_context() {
        let mut provider = MockProvider::with_videos(Vec::new());
        provider.channel_videos = vec![video("Relevant Video", "about rust", 5)];
        let (engine, generator) = engine(provider, MockGenerator::replying("channel answer"));

        let result = engine
            .answer_question("what about rust?", CHANNEL_URL, None)
            .await;

        assert_eq!(result.answer, "channel answer");
        assert_eq!(result.confidence, 0.8);

        let calls = generator.calls.lock().unwrap();
        let context = calls[0].1.as_deref().unwrap();
        assert!(context.contains("CHANNEL INFORMATION:"));
        assert!(context.contains("VIDEOS RELEVANT TO THE QUESTION \"what about rust?\":"));
        assert!(context.contains("Transcript: transcript text"));
    }

    #[tokio::test]
    async fn test_get_summary_picks_prompt_by_target() {
        let videos = vec![video("Video", "", 1)];
        let (engine, generator) = engine(
            MockProvider::with_videos(videos),
            MockGenerator::replying("Gaming playlist summary"),
        );

        let result = engine.get_summary(PLAYLIST_URL).await;
        assert_eq!(result.answer, "Gaming playlist summary");

        let calls = generator.calls.lock().unwrap();
        let prompt = &calls[0].0;
        assert!(prompt.to_lowercase().contains("summary"));
        assert!(prompt.contains("playlist"));
    }

    #[tokio::test]
    async fn test_search_videos_substring_and_order() {
        let videos = vec![
            video("Alpha Gameplay", "intro run", 3),
            video("Beta Review", "a review", 2),
            video("Gamma Alpha Highlights", "best bits", 1),
        ];
        let (engine, _) = engine(MockProvider::with_videos(videos), MockGenerator::replying(""));

        let results = engine.search_videos("alpha", PLAYLIST_URL, None).await;

        let titles: Vec<&str> = results.iter().map(|v| v.title.as_str()).collect();
        assert_eq!(titles, vec!["Alpha Gameplay", "Gamma Alpha Highlights"]);

        // Idempotent and order-stable.
        let again = engine.search_videos("alpha", PLAYLIST_URL, None).await;
        let titles_again: Vec<&str> = again.iter().map(|v| v.title.as_str()).collect();
        assert_eq!(titles, titles_again);
    }

    #[tokio::test]
    async fn test_search_videos_matches_description() {
        let videos = vec![
            video("Epic Gaming Moment #1", "Amazing gameplay with friends", 1),
            video("Epic Gaming Moment #2", "More epic gameplay", 2),
        ];
        let (engine, _) = engine(MockProvider::with_videos(videos), MockGenerator::replying(""));

        let results = engine.search_videos("friends", PLAYLIST_URL, None).await;
        assert_eq!(results.len(), 1);
        assert!(results[0].description.contains("friends"));
    }

    #[tokio::test]
    async fn test_search_videos_respects_max_results() {
        let videos: Vec<Video> = (1..=6)
            .map(|day| video(&format!("Epic {day}"), "", day))
            .collect();
        let (engine, _) = engine(MockProvider::with_videos(videos), MockGenerator::replying(""));

        let results = engine.search_videos("epic", PLAYLIST_URL, Some(3)).await;
        assert_eq!(results.len(), 3);
        // Newest first even after truncation.
        assert_eq!(results[0].title, "Epic 6");
    }

    #[tokio::test]
    async fn test_search_videos_no_match() {
        let videos = vec![video("Epic Gaming", "", 1)];
        let (engine, _) = engine(MockProvider::with_videos(videos), MockGenerator::replying(""));

        let results = engine.search_videos("cooking", PLAYLIST_URL, None).await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_search_videos_error_yields_empty_list() {
        let (engine, _) = engine(MockProvider::failing(), MockGenerator::replying(""));

        let results = engine.search_videos("test", PLAYLIST_URL, None).await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_search_videos_channel_path_keeps_provider_order() {
        let mut provider = MockProvider::with_videos(Vec::new());
        provider.channel_videos = vec![
            video("Older But More Relevant", "", 1),
            video("Newer", "", 9),
        ];
        let (engine, _) = engine(provider, MockGenerator::replying(""));

        let results = engine.search_videos("anything", CHANNEL_URL, None).await;
        let titles: Vec<&str> = results.iter().map(|v| v.title.as_str()).collect();
        // Provider ranking is trusted; no re-sort by date.
        assert_eq!(titles, vec!["Older But More Relevant", "Newer"]);
        // And no transcripts are fetched on the search path.
        assert!(results.iter().all(|v| v.transcript.is_none()));
    }
}
