//! Context assembly for LLM prompts.
//!
//! Turns playlist or channel metadata plus a set of videos into a single
//! bounded text block. Playlists are small enough to list every supplied
//! video; channel contexts carry only question-relevant videos but include
//! transcript excerpts to compensate.

use crate::models::{Channel, Playlist, Video};

/// Maximum characters of a video description included in context.
const DESCRIPTION_EXCERPT: usize = 200;

/// Maximum characters of a transcript included in channel context.
const TRANSCRIPT_EXCERPT: usize = 500;

/// Truncate text to `max` characters, appending an ellipsis when truncated.
fn excerpt(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let truncated: String = text.chars().take(max).collect();
        format!("{truncated}...")
    } else {
        text.to_string()
    }
}

/// Build the context block for a playlist and its videos.
///
/// No video limit is applied here; the caller controls how many videos are
/// passed in.
pub fn build_playlist_context(playlist: &Playlist, videos: &[Video]) -> String {
    let mut parts = Vec::new();

    parts.push("PLAYLIST INFORMATION:".to_string());
    parts.push(format!("Title: {}", playlist.title));
    parts.push(format!("Channel: {}", playlist.channel_title));
    parts.push(format!("Total Videos: {}", playlist.video_count));
    if !playlist.description.trim().is_empty() {
        parts.push(format!("Description: {}", playlist.description));
    }
    parts.push(String::new());

    parts.push(format!("VIDEOS IN PLAYLIST (showing first {}):", videos.len()));
    for (i, video) in videos.iter().enumerate() {
        parts.push(format!("{}. {}", i + 1, video.title));
        parts.push(format!("   Published: {}", video.published_date()));
        parts.push(format!("   Channel: {}", video.channel_title));
        if !video.description.trim().is_empty() {
            parts.push(format!(
                "   Description: {}",
                excerpt(&video.description, DESCRIPTION_EXCERPT)
            ));
        }
        parts.push(String::new());
    }

    parts.join("\n")
}

/// Build the context block for a channel and its question-relevant videos.
pub fn build_channel_context(channel: &Channel, videos: &[Video], question: &str) -> String {
    let mut parts = Vec::new();

    parts.push("CHANNEL INFORMATION:".to_string());
    parts.push(format!("Title: {}", channel.title));
    if !channel.description.trim().is_empty() {
        parts.push(format!("Description: {}", channel.description));
    }
    if let Some(count) = channel.video_count {
        parts.push(format!("Total Videos: {count}"));
    }
    if let Some(count) = channel.subscriber_count {
        parts.push(format!("Subscribers: {count}"));
    }
    parts.push(String::new());

    parts.push(format!("VIDEOS RELEVANT TO THE QUESTION \"{question}\":"));
    for (i, video) in videos.iter().enumerate() {
        parts.push(format!("{}. {}", i + 1, video.title));
        parts.push(format!("   Published: {}", video.published_date()));
        if !video.description.trim().is_empty() {
            parts.push(format!(
                "   Description: {}",
                excerpt(&video.description, DESCRIPTION_EXCERPT)
            ));
        }
        if let Some(transcript) = &video.transcript {
            if !transcript.trim().is_empty() {
                parts.push(format!(
                    "   Transcript: {}",
                    excerpt(transcript, TRANSCRIPT_EXCERPT)
                ));
            }
        }
        parts.push(String::new());
    }

    parts.join("\n")
}
