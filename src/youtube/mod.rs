//! YouTube data access for tubeqa.
//!
//! Provides a trait-based interface over the YouTube Data API v3 plus a
//! layered transcript-retrieval fallback.

mod api;
mod subtitles;
mod target;
mod transcript;

pub use api::YouTubeDataApi;
pub use subtitles::subtitle_plain_text;
pub use target::{is_channel_url, is_playlist_url, ChannelRef, TargetKind};
pub use transcript::TranscriptFetcher;

use crate::error::Result;
use crate::models::{Channel, Playlist, Video};
use async_trait::async_trait;

/// Trait for YouTube metadata and transcript providers.
#[async_trait]
pub trait VideoProvider: Send + Sync {
    /// Fetch playlist metadata.
    async fn get_playlist(&self, url: &str) -> Result<Playlist>;

    /// Fetch videos contained in a playlist, newest-first.
    async fn get_playlist_videos(
        &self,
        url: &str,
        max_results: Option<usize>,
    ) -> Result<Vec<Video>>;

    /// Fetch channel metadata.
    async fn get_channel(&self, url: &str) -> Result<Channel>;

    /// Enumerate a channel's playlists.
    async fn get_channel_playlists(
        &self,
        url: &str,
        max_results: Option<usize>,
    ) -> Result<Vec<Playlist>>;

    /// Search a channel's videos by a free-text query, in provider order.
    async fn search_channel_videos(
        &self,
        url: &str,
        query: &str,
        max_results: Option<usize>,
        include_transcripts: bool,
    ) -> Result<Vec<Video>>;

    /// Fetch a plain-text transcript for a video.
    ///
    /// `Ok(None)` means the video has no usable transcript; this is not an
    /// error and the pipeline proceeds on metadata alone.
    async fn get_video_transcript(&self, video_id: &str) -> Result<Option<String>>;
}
