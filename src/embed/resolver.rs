//! YouTube URL recognition
//!
//! Maps a parsed URL to a canonical video id and an optional start offset.
//! Every rejection is logged and returned as `None`; callers never see the
//! reason, only the log does.
//!
//! Recognised shapes:
//! - `https://www.youtube.com/watch?v=<id>` (also `/?v=<id>`)
//! - `https://www.youtube.com/shorts/<id>`
//! - `https://www.youtube.com/embed/<id>`
//! - `https://youtu.be/<id>`

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use url::{Url, form_urlencoded};

static VIDEO_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("Failed to compile video id regex")
});

static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(\d+)h)?(?:(\d+)m)?(?:(\d+)s)?$").expect("Failed to compile duration regex")
});

/// Start-time parameter names, highest precedence first
const START_TIME_PARAMS: [&str; 3] = ["start", "t", "time_continue"];

/// An 11-character YouTube video id over `[A-Za-z0-9_-]`.
///
/// The only way to obtain one is [`VideoId::parse`], so a value of this type
/// always satisfies the pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    /// Validate a candidate id
    pub fn parse(candidate: &str) -> Option<Self> {
        VIDEO_ID_RE
            .is_match(candidate)
            .then(|| Self(candidate.to_string()))
    }

    /// Borrow the id
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Result of resolving a YouTube link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedVideoReference {
    /// Canonical video id
    pub video_id: VideoId,
    /// Offset into the video; `None` plays from the start
    pub start_time_seconds: Option<u64>,
}

/// True for `youtube.com`, `youtu.be` and their subdomains.
///
/// Matches whole labels only, so `evilyoutube.com` and
/// `youtube.com.example.com` are rejected.
pub fn is_youtube_host(host: &str) -> bool {
    let host = host.to_ascii_lowercase();
    host_in_domain(&host, "youtube.com") || host_in_domain(&host, "youtu.be")
}

fn host_in_domain(host: &str, domain: &str) -> bool {
    host == domain
        || host
            .strip_suffix(domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

/// Resolve a URL into a video reference
pub fn resolve(url: &Url) -> Option<ParsedVideoReference> {
    let video_id = extract_video_id(url)?;
    Some(ParsedVideoReference {
        video_id,
        start_time_seconds: extract_start_time_seconds(url),
    })
}

/// Extract the video id from a YouTube URL
pub fn extract_video_id(url: &Url) -> Option<VideoId> {
    let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
    if !is_youtube_host(&host) {
        log::debug!("Not a YouTube host: {}", url);
        return None;
    }

    let segments: Vec<&str> = url
        .path_segments()
        .map(|s| s.filter(|seg| !seg.is_empty()).collect())
        .unwrap_or_default();

    let candidate = if host_in_domain(&host, "youtube.com") {
        match segments.as_slice() {
            ["shorts", id, ..] | ["embed", id, ..] => Some(id.to_string()),
            ["watch", ..] | [] => query_value(url, "v"),
            _ => None,
        }
    } else {
        segments.first().map(|id| id.to_string())
    };

    let Some(candidate) = candidate.filter(|c| !c.is_empty()) else {
        log::warn!("Could not extract video ID from {}", url);
        return None;
    };

    match VideoId::parse(&candidate) {
        Some(id) => Some(id),
        None => {
            log::warn!("Invalid video ID format for {}: {}", url, candidate);
            None
        }
    }
}

fn query_value(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.into_owned())
}

/// Extract a start offset from the query, falling back to the fragment.
///
/// Within each source `start` beats `t`, which beats `time_continue`. A
/// present value that fails to parse hands over to the next name.
pub fn extract_start_time_seconds(url: &Url) -> Option<u64> {
    let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    if let Some(seconds) = first_start_time(&query, "query") {
        return Some(seconds);
    }

    let fragment = url.fragment().unwrap_or_default();
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
    let fragment = fragment.strip_prefix('?').unwrap_or(fragment);
    if fragment.is_empty() {
        return None;
    }

    // Broken escapes are kept literally, so one bad pair never hides the others
    let pairs: Vec<(String, String)> = form_urlencoded::parse(fragment.as_bytes())
        .into_owned()
        .collect();
    first_start_time(&pairs, "fragment")
}

fn first_start_time(pairs: &[(String, String)], origin: &str) -> Option<u64> {
    START_TIME_PARAMS.iter().find_map(|name| {
        let (_, value) = pairs.iter().find(|(k, _)| k.as_str() == *name)?;
        parse_start_time_value(value, &format!("{} parameter \"{}\"", origin, name))
    })
}

/// Parse a start-time value into seconds.
///
/// Accepts a plain integer (`"90"`) or an `h`/`m`/`s` duration
/// (`"1h2m3s"`, case-insensitive). `source` names the parameter for
/// diagnostics.
pub fn parse_start_time_value(raw: &str, source: &str) -> Option<u64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        log::warn!("Ignoring {}: value is empty", source);
        return None;
    }

    let digits = trimmed.strip_prefix('-').unwrap_or(trimmed);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        return match trimmed.parse::<i64>() {
            Ok(seconds) if seconds >= 0 => Some(seconds.unsigned_abs()),
            _ => {
                log::warn!(
                    "Ignoring {}: value must be a non-negative integer (received \"{}\")",
                    source,
                    raw
                );
                None
            }
        };
    }

    let normalized = trimmed.to_ascii_lowercase();
    if let Some(caps) = DURATION_RE.captures(&normalized) {
        let parts = [caps.get(1), caps.get(2), caps.get(3)];
        if parts.iter().any(Option::is_some) {
            let total = parts
                .iter()
                .zip([3600u64, 60, 1])
                .try_fold(0u64, |acc, (part, unit)| {
                    let value = match part {
                        Some(m) => m.as_str().parse::<u64>().ok()?,
                        None => 0,
                    };
                    acc.checked_add(value.checked_mul(unit)?)
                });
            if total.is_none() {
                log::warn!(
                    "Ignoring {}: calculated invalid duration from \"{}\"",
                    source,
                    raw
                );
            }
            return total;
        }
    }

    log::warn!("Unrecognized time format for {}: \"{}\"", source, raw);
    None
}
