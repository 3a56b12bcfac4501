//! URL classification for playlists and channels.

use regex::Regex;
use std::sync::OnceLock;

fn playlist_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"list=([A-Za-z0-9_-]+)").expect("invalid regex"))
}

fn channel_id_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"/channel/([A-Za-z0-9_-]+)").expect("invalid regex"))
}

fn handle_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"/@([A-Za-z0-9_.-]+)").expect("invalid regex"))
}

fn named_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"/(?:c|user)/([A-Za-z0-9_.-]+)").expect("invalid regex"))
}

/// How a channel is referenced in a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelRef {
    /// Canonical channel ID (`/channel/UC...`).
    Id(String),
    /// Handle (`/@name`).
    Handle(String),
    /// Legacy custom or user name (`/c/name`, `/user/name`).
    Username(String),
}

/// The kind of content a URL points at.
///
/// Produced once by [`TargetKind::classify`] and pattern-matched everywhere,
/// so no caller re-tests the raw URL string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetKind {
    Playlist(String),
    Channel(ChannelRef),
}

impl TargetKind {
    /// Classify a URL or bare ID as a playlist or channel target.
    ///
    /// The playlist marker (`list=`) takes precedence over channel path
    /// shapes when both are present in the same URL.
    pub fn classify(input: &str) -> Option<TargetKind> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        if let Some(caps) = playlist_re().captures(input) {
            return Some(TargetKind::Playlist(caps[1].to_string()));
        }

        if let Some(caps) = channel_id_re().captures(input) {
            return Some(TargetKind::Channel(ChannelRef::Id(caps[1].to_string())));
        }

        if let Some(caps) = handle_re().captures(input) {
            return Some(TargetKind::Channel(ChannelRef::Handle(caps[1].to_string())));
        }

        if let Some(caps) = named_re().captures(input) {
            return Some(TargetKind::Channel(ChannelRef::Username(
                caps[1].to_string(),
            )));
        }

        // Bare identifiers, for callers that already hold an ID.
        if !input.contains('/') {
            if let Some(handle) = input.strip_prefix('@') {
                return Some(TargetKind::Channel(ChannelRef::Handle(handle.to_string())));
            }
            if input.starts_with("UC") && input.len() == 24 {
                return Some(TargetKind::Channel(ChannelRef::Id(input.to_string())));
            }
            if input.starts_with("PL") || input.starts_with("UU") || input.starts_with("OL") {
                return Some(TargetKind::Playlist(input.to_string()));
            }
        }

        None
    }
}

/// Whether the input refers to a playlist.
pub fn is_playlist_url(input: &str) -> bool {
    matches!(TargetKind::classify(input), Some(TargetKind::Playlist(_)))
}

/// Whether the input refers to a channel.
pub fn is_channel_url(input: &str) -> bool {
    matches!(TargetKind::classify(input), Some(TargetKind::Channel(_)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_playlist_url() {
        assert_eq!(
            TargetKind::classify("https://www.youtube.com/playlist?list=PLtest123"),
            Some(TargetKind::Playlist("PLtest123".to_string()))
        );
        assert_eq!(
            TargetKind::classify("https://www.youtube.com/watch?v=abc&list=PLxyz"),
            Some(TargetKind::Playlist("PLxyz".to_string()))
        );
    }

    #[test]
    fn test_classify_channel_shapes() {
        assert_eq!(
            TargetKind::classify("https://www.youtube.com/channel/UCabcdefghijklmnopqrstuv"),
            Some(TargetKind::Channel(ChannelRef::Id(
                "UCabcdefghijklmnopqrstuv".to_string()
            )))
        );
        assert_eq!(
            TargetKind::classify("https://www.youtube.com/@somehandle"),
            Some(TargetKind::Channel(ChannelRef::Handle(
                "somehandle".to_string()
            )))
        );
        assert_eq!(
            TargetKind::classify("https://www.youtube.com/c/SomeName"),
            Some(TargetKind::Channel(ChannelRef::Username(
                "SomeName".to_string()
            )))
        );
        assert_eq!(
            TargetKind::classify("https://www.youtube.com/user/oldname"),
            Some(TargetKind::Channel(ChannelRef::Username(
                "oldname".to_string()
            )))
        );
    }

    #[test]
    fn test_playlist_marker_takes_precedence() {
        // Both markers present: the playlist wins.
        let url = "https://www.youtube.com/@handle/videos?list=PLboth";
        assert_eq!(
            TargetKind::classify(url),
            Some(TargetKind::Playlist("PLboth".to_string()))
        );
        assert!(is_playlist_url(url));
        assert!(!is_channel_url(url));
    }

    #[test]
    fn test_bare_identifiers() {
        assert_eq!(
            TargetKind::classify("PLabc_def-123"),
            Some(TargetKind::Playlist("PLabc_def-123".to_string()))
        );
        assert_eq!(
            TargetKind::classify("@handle"),
            Some(TargetKind::Channel(ChannelRef::Handle("handle".to_string())))
        );
        assert_eq!(
            TargetKind::classify("UCabcdefghijklmnopqrstuv"),
            Some(TargetKind::Channel(ChannelRef::Id(
                "UCabcdefghijklmnopqrstuv".to_string()
            )))
        );
    }

    #[test]
    fn test_unclassifiable_input() {
        assert_eq!(TargetKind::classify("https://example.com/watch"), None);
        assert_eq!(TargetKind::classify(""), None);
        assert_eq!(TargetKind::classify("not a url"), None);
    }
}
