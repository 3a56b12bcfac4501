//! Layered transcript retrieval.
//!
//! Transcripts are tried in a fixed preference order: a manually authored
//! English track, then an auto-generated English track, then any available
//! track, and finally yt-dlp subtitle extraction as an external fallback.
//! Each attempt produces a structured outcome so a failed strategy is
//! observable instead of silently swallowed.

use crate::error::{Result, TubeqaError};
use crate::youtube::subtitles::subtitle_plain_text;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info, warn};
use yt_transcript_rs::YouTubeTranscriptApi;

/// Bound on the external subtitle tool invocation.
const SUBTITLE_TOOL_TIMEOUT: Duration = Duration::from_secs(30);

/// A caption track advertised for a video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackInfo {
    pub language_code: String,
    pub is_generated: bool,
}

/// One step of the retrieval sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// Fetch the listed track with this language code.
    Track {
        language_code: String,
        description: &'static str,
    },
    /// Shell out to yt-dlp for subtitle files.
    SubtitleTool,
}

/// Outcome of a single retrieval attempt.
#[derive(Debug)]
enum AttemptOutcome {
    /// A non-empty transcript was retrieved.
    Fetched(String),
    /// The strategy completed but yielded nothing usable.
    Absent,
    /// The strategy itself failed.
    Failed(String),
}

/// Build the ordered track attempts from the advertised caption tracks.
///
/// Preference order: manual English, auto-generated English, then the first
/// track in any language. Duplicate language codes are only tried once.
pub fn plan_track_attempts(tracks: &[TrackInfo]) -> Vec<Strategy> {
    let manual_en = tracks
        .iter()
        .find(|t| !t.is_generated && t.language_code.starts_with("en"))
        .map(|t| (t.language_code.as_str(), "manual English transcript"));
    let generated_en = tracks
        .iter()
        .find(|t| t.is_generated && t.language_code.starts_with("en"))
        .map(|t| (t.language_code.as_str(), "auto-generated English transcript"));
    let first_any = tracks
        .first()
        .map(|t| (t.language_code.as_str(), "first available transcript"));

    let mut attempts: Vec<Strategy> = Vec::new();
    for (code, description) in [manual_en, generated_en, first_any].into_iter().flatten() {
        // Fetching goes by language code, so an already-planned code would
        // repeat the identical request.
        let duplicate = attempts.iter().any(
            |s| matches!(s, Strategy::Track { language_code, .. } if language_code == code),
        );
        if !duplicate {
            attempts.push(Strategy::Track {
                language_code: code.to_string(),
                description,
            });
        }
    }

    attempts
}

/// Fetches transcripts with the layered fallback policy.
pub struct TranscriptFetcher {
    api: YouTubeTranscriptApi,
}

impl TranscriptFetcher {
    pub fn new() -> Result<Self> {
        let api = YouTubeTranscriptApi::new(None, None, None)
            .map_err(|e| TubeqaError::Transcript(format!("Failed to create transcript API: {e}")))?;
        Ok(Self { api })
    }

    /// Fetch a plain-text transcript for a video.
    ///
    /// Returns `Ok(None)` when no strategy produced a usable transcript; a
    /// whitespace-only result counts as no transcript.
    pub async fn fetch(&self, video_id: &str) -> Result<Option<String>> {
        let mut strategies = match self.list_tracks(video_id).await {
            Ok(tracks) => plan_track_attempts(&tracks),
            Err(e) => {
                warn!("Could not list transcripts for {}: {}", video_id, e);
                Vec::new()
            }
        };
        strategies.push(Strategy::SubtitleTool);

        let text =
            first_fetched(video_id, strategies, |strategy| self.attempt(video_id, strategy)).await;
        if text.is_none() {
            info!("No transcript available for video {}", video_id);
        }
        Ok(text)
    }

    async fn list_tracks(&self, video_id: &str) -> Result<Vec<TrackInfo>> {
        let list = self
            .api
            .list_transcripts(video_id)
            .await
            .map_err(|e| TubeqaError::Transcript(e.to_string()))?;

        Ok(list
            .transcripts()
            .map(|t| TrackInfo {
                language_code: t.language_code().to_string(),
                is_generated: t.is_generated(),
            })
            .collect())
    }

    async fn attempt(&self, video_id: &str, strategy: Strategy) -> AttemptOutcome {
        match &strategy {
            Strategy::Track {
                language_code,
                description,
            } => {
                debug!("Trying {} ({}) for {}", description, language_code, video_id);
                match self
                    .api
                    .fetch_transcript(video_id, &[language_code.as_str()], false)
                    .await
                {
                    Ok(transcript) => {
                        let text = transcript.text();
                        let text = text.trim();
                        if text.is_empty() {
                            AttemptOutcome::Absent
                        } else {
                            AttemptOutcome::Fetched(text.to_string())
                        }
                    }
                    Err(e) => AttemptOutcome::Failed(e.to_string()),
                }
            }
            Strategy::SubtitleTool => match self.fetch_via_tool(video_id).await {
                Ok(Some(text)) => AttemptOutcome::Fetched(text),
                Ok(None) => AttemptOutcome::Absent,
                Err(e) => AttemptOutcome::Failed(e.to_string()),
            },
        }
    }

    /// Extract subtitles with yt-dlp and strip them down to plain text.
    async fn fetch_via_tool(&self, video_id: &str) -> Result<Option<String>> {
        let url = format!("https://www.youtube.com/watch?v={}", video_id);
        let temp_dir = tempfile::tempdir()?;

        let run = Command::new("yt-dlp")
            .args([
                "--write-auto-subs",
                "--write-subs",
                "--sub-langs",
                "en",
                "--skip-download",
                "--output",
                "%(id)s.%(ext)s",
                &url,
            ])
            .current_dir(temp_dir.path())
            .output();

        let output = match tokio::time::timeout(SUBTITLE_TOOL_TIMEOUT, run).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(TubeqaError::ToolNotFound("yt-dlp".to_string()));
            }
            Ok(Err(e)) => {
                return Err(TubeqaError::ToolFailed(format!("yt-dlp execution failed: {e}")));
            }
            Err(_) => {
                warn!("yt-dlp timed out for video {}", video_id);
                return Ok(None);
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!("yt-dlp failed for {}: {}", video_id, stderr.trim());
            return Ok(None);
        }

        let subtitle_path = match find_subtitle_file(temp_dir.path(), video_id)? {
            Some(path) => path,
            None => {
                debug!("No subtitle files produced for {}", video_id);
                return Ok(None);
            }
        };

        let content = std::fs::read_to_string(&subtitle_path)?;
        let text = subtitle_plain_text(&content);
        if text.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(text))
        }
    }
}

/// Walk the strategies in order, returning the first fetched transcript.
///
/// Absent and failed outcomes both fall through to the next strategy; a
/// failure is logged with its reason rather than aborting the sequence.
async fn first_fetched<F, Fut>(
    video_id: &str,
    strategies: Vec<Strategy>,
    mut attempt: F,
) -> Option<String>
where
    F: FnMut(Strategy) -> Fut,
    Fut: std::future::Future<Output = AttemptOutcome>,
{
    for strategy in strategies {
        let label = format!("{:?}", strategy);
        match attempt(strategy).await {
            AttemptOutcome::Fetched(text) => {
                info!("Transcript for {} via {}: {} characters", video_id, label, text.len());
                return Some(text);
            }
            AttemptOutcome::Absent => {
                debug!("No transcript for {} via {}", video_id, label);
            }
            AttemptOutcome::Failed(reason) => {
                warn!("Transcript attempt {} for {} failed: {}", label, video_id, reason);
            }
        }
    }

    None
}

/// Locate a subtitle file written for the video, preferring VTT over SRT.
fn find_subtitle_file(dir: &std::path::Path, video_id: &str) -> Result<Option<std::path::PathBuf>> {
    let mut srt_fallback = None;

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if !name.starts_with(video_id) {
            continue;
        }
        if name.ends_with(".vtt") {
            return Ok(Some(entry.path()));
        }
        if name.ends_with(".srt") {
            srt_fallback = Some(entry.path());
        }
    }

    Ok(srt_fallback)
}
