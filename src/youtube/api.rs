//! YouTube Data API v3 adapter.

use super::{ChannelRef, TargetKind, TranscriptFetcher, VideoProvider};
use crate::error::{Result, TubeqaError};
use crate::models::{Channel, Playlist, Video};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

const API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// Page size limit imposed by the Data API.
const PAGE_SIZE: usize = 50;

/// Bound on channel playlist enumeration.
const PLAYLIST_ENUM_TIMEOUT: Duration = Duration::from_secs(30);

/// YouTube metadata provider backed by the Data API v3.
pub struct YouTubeDataApi {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    transcripts: TranscriptFetcher,
}

impl YouTubeDataApi {
    /// Create a new adapter with the given API key.
    pub fn new(api_key: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| TubeqaError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: API_BASE.to_string(),
            transcripts: TranscriptFetcher::new()?,
        })
    }

    /// Override the API base URL (used by tests against a local server).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        resource: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}/{}", self.base_url, resource);
        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }

    fn playlist_id(url: &str) -> Result<String> {
        match TargetKind::classify(url) {
            Some(TargetKind::Playlist(id)) => Ok(id),
            _ => Err(TubeqaError::InvalidInput(format!(
                "Not a YouTube playlist URL: {url}"
            ))),
        }
    }

    fn channel_ref(url: &str) -> Result<ChannelRef> {
        match TargetKind::classify(url) {
            Some(TargetKind::Channel(r)) => Ok(r),
            _ => Err(TubeqaError::InvalidInput(format!(
                "Not a YouTube channel URL: {url}"
            ))),
        }
    }

    /// Look up a channel resource, trying ID, handle, or username as given,
    /// and falling back to a channel search when the direct lookup finds
    /// nothing.
    async fn lookup_channel(&self, reference: &ChannelRef) -> Result<ChannelResource> {
        let (param, value, label) = match reference {
            ChannelRef::Id(id) => ("id", id.as_str(), "id"),
            ChannelRef::Handle(handle) => ("forHandle", handle.as_str(), "handle"),
            ChannelRef::Username(name) => ("forUsername", name.as_str(), "username"),
        };

        let listing: ApiList<ChannelResource> = self
            .get_json(
                "channels",
                &[("part", "snippet,statistics"), (param, value)],
            )
            .await?;

        if let Some(channel) = listing.items.into_iter().next() {
            return Ok(channel);
        }

        // Direct lookup came up empty; a channel search by name is the last
        // resort for legacy custom URLs.
        warn!("Channel lookup by {} found nothing for {:?}, trying search", label, value);
        let results: ApiList<SearchResource> = self
            .get_json(
                "search",
                &[
                    ("part", "snippet"),
                    ("type", "channel"),
                    ("maxResults", "1"),
                    ("q", value),
                ],
            )
            .await?;

        let channel_id = results
            .items
            .first()
            .and_then(|item| item.id.channel_id.clone())
            .ok_or_else(|| TubeqaError::NotFound(format!("Channel not found: {value}")))?;

        let listing: ApiList<ChannelResource> = self
            .get_json(
                "channels",
                &[("part", "snippet,statistics"), ("id", channel_id.as_str())],
            )
            .await?;

        listing
            .items
            .into_iter()
            .next()
            .ok_or_else(|| TubeqaError::NotFound(format!("Channel not found: {channel_id}")))
    }

    async fn fetch_channel_playlists(
        &self,
        channel_id: &str,
        max_results: Option<usize>,
    ) -> Result<Vec<Playlist>> {
        let mut playlists = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut params = vec![
                ("part", "snippet,contentDetails".to_string()),
                ("channelId", channel_id.to_string()),
                ("maxResults", PAGE_SIZE.to_string()),
            ];
            if let Some(token) = &page_token {
                params.push(("pageToken", token.clone()));
            }
            let params: Vec<(&str, &str)> =
                params.iter().map(|(k, v)| (*k, v.as_str())).collect();

            let page: ApiList<PlaylistResource> = self.get_json("playlists", &params).await?;

            for item in page.items {
                playlists.push(item.into_playlist());
                if let Some(max) = max_results {
                    if playlists.len() >= max {
                        return Ok(playlists);
                    }
                }
            }

            page_token = page.next_page_token;
            if page_token.is_none() {
                break;
            }
        }

        Ok(playlists)
    }
}

#[async_trait]
impl VideoProvider for YouTubeDataApi {
    #[instrument(skip(self))]
    async fn get_playlist(&self, url: &str) -> Result<Playlist> {
        let playlist_id = Self::playlist_id(url)?;

        let listing: ApiList<PlaylistResource> = self
            .get_json(
                "playlists",
                &[("part", "snippet,contentDetails"), ("id", playlist_id.as_str())],
            )
            .await?;

        listing
            .items
            .into_iter()
            .next()
            .map(PlaylistResource::into_playlist)
            .ok_or_else(|| TubeqaError::NotFound(format!("Playlist not found: {playlist_id}")))
    }

    #[instrument(skip(self))]
    async fn get_playlist_videos(
        &self,
        url: &str,
        max_results: Option<usize>,
    ) -> Result<Vec<Video>> {
        let playlist_id = Self::playlist_id(url)?;

        let mut videos = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut params = vec![
                ("part", "snippet,contentDetails".to_string()),
                ("playlistId", playlist_id.clone()),
                ("maxResults", PAGE_SIZE.to_string()),
            ];
            if let Some(token) = &page_token {
                params.push(("pageToken", token.clone()));
            }
            let params: Vec<(&str, &str)> =
                params.iter().map(|(k, v)| (*k, v.as_str())).collect();

            let page: ApiList<PlaylistItemResource> =
                self.get_json("playlistItems", &params).await?;

            for item in page.items {
                videos.push(item.into_video());
                if let Some(max) = max_results {
                    if videos.len() >= max {
                        videos.sort_by(|a, b| b.published_at.cmp(&a.published_at));
                        return Ok(videos);
                    }
                }
            }

            page_token = page.next_page_token;
            if page_token.is_none() {
                break;
            }
        }

        debug!("Fetched {} videos from playlist {}", videos.len(), playlist_id);
        videos.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(videos)
    }

    #[instrument(skip(self))]
    async fn get_channel(&self, url: &str) -> Result<Channel> {
        let reference = Self::channel_ref(url)?;
        let resource = self.lookup_channel(&reference).await?;
        Ok(resource.into_channel())
    }

    #[instrument(skip(self))]
    async fn get_channel_playlists(
        &self,
        url: &str,
        max_results: Option<usize>,
    ) -> Result<Vec<Playlist>> {
        let reference = Self::channel_ref(url)?;
        let channel_id = self.lookup_channel(&reference).await?.id;

        match tokio::time::timeout(
            PLAYLIST_ENUM_TIMEOUT,
            self.fetch_channel_playlists(&channel_id, max_results),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(TubeqaError::YouTubeApi(format!(
                "Timed out enumerating playlists for channel {channel_id}"
            ))),
        }
    }

    #[instrument(skip(self))]
    async fn search_channel_videos(
        &self,
        url: &str,
        query: &str,
        max_results: Option<usize>,
        include_transcripts: bool,
    ) -> Result<Vec<Video>> {
        let reference = Self::channel_ref(url)?;
        let channel_id = self.lookup_channel(&reference).await?.id;

        let limit = max_results.unwrap_or(PAGE_SIZE).min(PAGE_SIZE);
        let limit_str = limit.to_string();

        let results: ApiList<SearchResource> = self
            .get_json(
                "search",
                &[
                    ("part", "snippet"),
                    ("type", "video"),
                    ("order", "relevance"),
                    ("channelId", channel_id.as_str()),
                    ("maxResults", limit_str.as_str()),
                    ("q", query),
                ],
            )
            .await?;

        let mut videos: Vec<Video> = results
            .items
            .into_iter()
            .filter_map(SearchResource::into_video)
            .collect();

        if include_transcripts {
            // Transcript fetches are issued strictly sequentially; one slow
            // video must not stall the rest thanks to the tool's own bound.
            let mut enriched = Vec::with_capacity(videos.len());
            for video in videos.drain(..) {
                let transcript = self.get_video_transcript(&video.id).await?;
                enriched.push(video.with_transcript(transcript));
            }
            videos = enriched;
        }

        info!(
            "Relevance search for {:?} on channel {} returned {} videos",
            query,
            channel_id,
            videos.len()
        );
        Ok(videos)
    }

    async fn get_video_transcript(&self, video_id: &str) -> Result<Option<String>> {
        self.transcripts.fetch(video_id).await
    }
}

/// Parse an RFC 3339 timestamp, substituting the current time when the
/// upstream value is malformed.
fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => parsed.with_timezone(&Utc),
        Err(e) => {
            warn!("Unparseable timestamp {:?}: {}; substituting current time", raw, e);
            Utc::now()
        }
    }
}

// === Data API response shapes ===

#[derive(Debug, Deserialize)]
struct ApiList<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
    #[serde(rename = "nextPageToken")]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Thumbnails {
    medium: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

#[derive(Debug, Deserialize)]
struct PlaylistResource {
    id: String,
    snippet: PlaylistSnippet,
    #[serde(rename = "contentDetails")]
    content_details: PlaylistContentDetails,
}

#[derive(Debug, Deserialize)]
struct PlaylistSnippet {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(rename = "channelTitle", default)]
    channel_title: String,
    #[serde(rename = "publishedAt")]
    published_at: String,
}

#[derive(Debug, Deserialize)]
struct PlaylistContentDetails {
    #[serde(rename = "itemCount")]
    item_count: u64,
}

impl PlaylistResource {
    fn into_playlist(self) -> Playlist {
        Playlist {
            id: self.id,
            title: self.snippet.title,
            description: self.snippet.description,
            channel_title: self.snippet.channel_title,
            video_count: self.content_details.item_count,
            published_at: parse_timestamp(&self.snippet.published_at),
            videos: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PlaylistItemResource {
    snippet: VideoSnippet,
    #[serde(rename = "contentDetails")]
    content_details: PlaylistItemContentDetails,
}

#[derive(Debug, Deserialize)]
struct PlaylistItemContentDetails {
    #[serde(rename = "videoId")]
    video_id: String,
}

#[derive(Debug, Deserialize)]
struct VideoSnippet {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(rename = "channelTitle", default)]
    channel_title: String,
    #[serde(rename = "publishedAt")]
    published_at: String,
    thumbnails: Option<Thumbnails>,
}

impl PlaylistItemResource {
    fn into_video(self) -> Video {
        Video {
            id: self.content_details.video_id,
            title: self.snippet.title,
            description: self.snippet.description,
            channel_title: self.snippet.channel_title,
            published_at: parse_timestamp(&self.snippet.published_at),
            duration: None,
            thumbnail_url: self
                .snippet
                .thumbnails
                .and_then(|t| t.medium)
                .map(|t| t.url),
            transcript: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResource {
    id: SearchResultId,
    snippet: VideoSnippet,
}

#[derive(Debug, Deserialize)]
struct SearchResultId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
    #[serde(rename = "channelId")]
    channel_id: Option<String>,
}

impl SearchResource {
    fn into_video(self) -> Option<Video> {
        let video_id = self.id.video_id?;
        Some(Video {
            id: video_id,
            title: self.snippet.title,
            description: self.snippet.description,
            channel_title: self.snippet.channel_title,
            published_at: parse_timestamp(&self.snippet.published_at),
            duration: None,
            thumbnail_url: self
                .snippet
                .thumbnails
                .and_then(|t| t.medium)
                .map(|t| t.url),
            transcript: None,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ChannelResource {
    id: String,
    snippet: ChannelSnippet,
    statistics: Option<ChannelStatistics>,
}

#[derive(Debug, Deserialize)]
struct ChannelSnippet {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
    #[serde(rename = "customUrl")]
    custom_url: Option<String>,
    thumbnails: Option<Thumbnails>,
}

#[derive(Debug, Deserialize)]
struct ChannelStatistics {
    #[serde(rename = "subscriberCount")]
    subscriber_count: Option<String>,
    #[serde(rename = "videoCount")]
    video_count: Option<String>,
}

impl ChannelResource {
    fn into_channel(self) -> Channel {
        let stats = self.statistics;
        Channel {
            id: self.id,
            title: self.snippet.title,
            description: self.snippet.description,
            subscriber_count: stats
                .as_ref()
                .and_then(|s| s.subscriber_count.as_ref())
                .and_then(|c| c.parse().ok()),
            video_count: stats
                .as_ref()
                .and_then(|s| s.video_count.as_ref())
                .and_then(|c| c.parse().ok()),
            playlist_count: None,
            published_at: self.snippet.published_at.as_deref().map(parse_timestamp),
            thumbnail_url: self
                .snippet
                .thumbnails
                .and_then(|t| t.medium)
                .map(|t| t.url),
            custom_url: self.snippet.custom_url,
            playlists: None,
        }
    }
}
