//! Domain models for YouTube content.
//!
//! All types here are read-only value objects: once constructed they are
//! never mutated, and transformations produce new instances.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata for a single YouTube video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Video {
    /// YouTube video ID.
    pub id: String,
    /// Title.
    pub title: String,
    /// Description (may be empty).
    pub description: String,
    /// Name of the channel that published the video.
    pub channel_title: String,
    /// Publication timestamp.
    pub published_at: DateTime<Utc>,
    /// ISO 8601 duration (e.g., "PT4M13S"), if known.
    pub duration: Option<String>,
    /// Thumbnail URL, if available.
    pub thumbnail_url: Option<String>,
    /// Plain-text transcript, if one was fetched.
    pub transcript: Option<String>,
}

impl Video {
    /// Return a copy of this video with a transcript attached.
    pub fn with_transcript(self, transcript: Option<String>) -> Self {
        Self { transcript, ..self }
    }

    /// Publication date formatted as `YYYY-MM-DD`.
    pub fn published_date(&self) -> String {
        self.published_at.format("%Y-%m-%d").to_string()
    }

    /// Watch URL for this video.
    pub fn url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.id)
    }
}

/// Metadata for a YouTube playlist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    /// YouTube playlist ID.
    pub id: String,
    /// Title.
    pub title: String,
    /// Description (may be empty).
    pub description: String,
    /// Name of the channel that owns the playlist.
    pub channel_title: String,
    /// Declared number of videos. Populated from the API's item count and
    /// not necessarily consistent with `videos` when that list is capped.
    pub video_count: u64,
    /// Publication timestamp.
    pub published_at: DateTime<Utc>,
    /// Contained videos, populated lazily by a separate fetch.
    pub videos: Option<Vec<Video>>,
}

/// Metadata for a YouTube channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Channel {
    /// YouTube channel ID (UC...).
    pub id: String,
    /// Channel title.
    pub title: String,
    /// Channel description (may be empty).
    pub description: String,
    /// Subscriber count, if public.
    pub subscriber_count: Option<u64>,
    /// Total video count, if reported.
    pub video_count: Option<u64>,
    /// Playlist count, if known.
    pub playlist_count: Option<u64>,
    /// Channel creation timestamp, if available.
    pub published_at: Option<DateTime<Utc>>,
    /// Thumbnail URL, if available.
    pub thumbnail_url: Option<String>,
    /// Custom URL (e.g., "@handle"), if set.
    pub custom_url: Option<String>,
    /// The channel's playlists, populated lazily by a separate fetch.
    pub playlists: Option<Vec<Playlist>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_published_date_format() {
        let video = Video {
            id: "abc123def45".to_string(),
            title: "Test".to_string(),
            description: String::new(),
            channel_title: "Chan".to_string(),
            published_at: Utc.with_ymd_and_hms(2023, 4, 7, 12, 30, 0).unwrap(),
            duration: None,
            thumbnail_url: None,
            transcript: None,
        };
        assert_eq!(video.published_date(), "2023-04-07");
        assert_eq!(video.url(), "https://www.youtube.com/watch?v=abc123def45");
    }

    #[test]
    fn test_with_transcript_produces_new_instance() {
        let video = Video {
            id: "x".to_string(),
            title: "T".to_string(),
            description: String::new(),
            channel_title: "C".to_string(),
            published_at: Utc::now(),
            duration: None,
            thumbnail_url: None,
            transcript: None,
        };
        let with = video.clone().with_transcript(Some("hello".to_string()));
        assert!(video.transcript.is_none());
        assert_eq!(with.transcript.as_deref(), Some("hello"));
    }
}
