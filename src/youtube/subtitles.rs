//! Plain-text extraction from VTT and SRT subtitle files.

use regex::Regex;
use std::sync::OnceLock;

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]+>").expect("invalid regex"))
}

/// Extract plain text from VTT or SRT subtitle content.
///
/// Drops cue timing lines, cue numbering, headers, and markup tags, and
/// joins the remaining text lines with single spaces.
pub fn subtitle_plain_text(content: &str) -> String {
    let tag_re = tag_re();
    let mut text_lines = Vec::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty()
            || line.starts_with("WEBVTT")
            || line.starts_with("NOTE")
            || line.contains("-->")
            || line.chars().all(|c| c.is_ascii_digit())
            || line.starts_with('<')
        {
            continue;
        }

        let line = tag_re.replace_all(line, "");
        let line = line.trim();
        if !line.is_empty() {
            text_lines.push(line.to_string());
        }
    }

    text_lines.join(" ")
}
