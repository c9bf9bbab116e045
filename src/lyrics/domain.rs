//! Internal domain models for lyrics lookup.
//!
//! These types are OUR types - they don't change when the provider's API changes.
//! All provider responses get converted into these types via the adapter.
//! They serialize to the camelCase shapes the lyrics panel consumes.

use serde::{Deserialize, Serialize, Serializer};

/// Text shown in place of lyrics for instrumental tracks
pub const INSTRUMENTAL_MARKER: &str = "♪ Instrumental ♪";

/// Text substituted for empty synced lines
pub const NOTE_GLYPH: &str = "♪";

/// Start-time literal emitted for the instrumental marker line.
///
/// Consumers compare against the string, so it stays a string at the boundary.
pub const INSTRUMENTAL_START_TIME: &str = "0000";

/// A language known to the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageEntry {
    /// Two-letter code (the provider calls it `language_iso_code_1`)
    pub iso_code2: String,
    /// Three-letter code, unique within the table
    pub iso_code3: String,
    /// Human-readable name
    pub display_name: String,
}

/// Caller-supplied description of the track to look up
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackQuery {
    pub title: String,
    pub artist: String,
    pub album: String,
    /// Track length in milliseconds
    pub duration_ms: u64,
    /// The host's identifier for the track (e.g. a `spotify:track:` URI)
    pub external_track_id: String,
}

impl TrackQuery {
    /// Duration in (fractional) seconds, as the provider expects it
    pub fn duration_secs(&self) -> f64 {
        self.duration_ms as f64 / 1000.0
    }
}

/// When a lyric line starts
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StartTime {
    /// Milliseconds from the start of the track
    Millis(f64),
    /// The instrumental marker's `"0000"` literal
    Instrumental,
}

impl StartTime {
    /// Start time in milliseconds; the instrumental marker starts at zero
    pub fn as_millis(&self) -> f64 {
        match self {
            StartTime::Millis(ms) => *ms,
            StartTime::Instrumental => 0.0,
        }
    }
}

impl Serialize for StartTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            StartTime::Millis(ms) => serializer.serialize_f64(*ms),
            StartTime::Instrumental => serializer.serialize_str(INSTRUMENTAL_START_TIME),
        }
    }
}

/// One line of lyrics. Synced lines carry a start time; unsynced lines have none at all.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LyricLine {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<StartTime>,
}

impl LyricLine {
    pub fn synced(text: impl Into<String>, start_ms: f64) -> Self {
        Self {
            text: text.into(),
            start_time: Some(StartTime::Millis(start_ms)),
        }
    }

    pub fn unsynced(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            start_time: None,
        }
    }
}

/// A single word of a karaoke line
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KaraokeWord {
    pub word: String,
    /// How long the word is highlighted, in milliseconds (derived)
    pub duration_ms: f64,
}

/// A word-synced line
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KaraokeLine {
    pub start_time_ms: f64,
    pub words: Vec<KaraokeWord>,
}

/// A completed crowd translation available for a track
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrowdTranslationTask {
    /// The provider's common-track id
    pub track_id: u64,
    pub from_language_name: String,
    pub to_language_name: String,
    pub to_iso_code3: String,
    pub to_iso_code2: String,
}

/// Lyrics translated into one language, aligned line-for-line with the source lines
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslatedLyrics {
    pub track_id: u64,
    pub from_language_name: String,
    pub to_language_name: String,
    pub iso_code3: String,
    pub lines: Vec<LyricLine>,
}

/// Why a lookup could not produce lyrics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// The matcher reported a non-success status (or was missing)
    Status,
    /// The provider refuses to show these lyrics
    Restricted,
    /// The request itself failed
    Transport,
}

/// Structured failure shown directly in the lyrics panel.
///
/// Serializes to `{"error": ..., "uri": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{error}")]
pub struct LookupFailure {
    pub error: String,
    /// The external track id of the query that failed
    pub uri: String,
    #[serde(skip)]
    pub reason: FailureReason,
}

impl LookupFailure {
    pub const RESTRICTED_MESSAGE: &'static str =
        "Unfortunately we're not authorized to show these lyrics.";

    pub fn status(mode: &str, uri: impl Into<String>) -> Self {
        Self {
            error: format!("Requested error: {}", mode),
            uri: uri.into(),
            reason: FailureReason::Status,
        }
    }

    pub fn restricted(uri: impl Into<String>) -> Self {
        Self {
            error: Self::RESTRICTED_MESSAGE.to_string(),
            uri: uri.into(),
            reason: FailureReason::Restricted,
        }
    }

    pub fn transport(error: &LyricsError, uri: impl Into<String>) -> Self {
        Self {
            error: format!("Requested error: {}", error),
            uri: uri.into(),
            reason: FailureReason::Transport,
        }
    }
}

/// Errors that can occur talking to the lyrics provider
#[derive(Debug, Clone, thiserror::Error)]
pub enum LyricsError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),
}
