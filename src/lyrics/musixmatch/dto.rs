//! Musixmatch desktop API Data Transfer Objects
//!
//! These types match what the `apic-desktop.musixmatch.com/ws/1.1` endpoints return,
//! limited to the fields we actually read.
//! DO NOT use these types outside the musixmatch module - convert to domain types.
//!
//! Every response is wrapped in the same envelope:
//! ```json
//! {
//!   "message": {
//!     "header": {"status_code": 200, "execute_time": 0.01},
//!     "body": { ... }
//!   }
//! }
//! ```
//!
//! ## API Quirks
//!
//! - An empty `body` is sent as `[]` rather than `{}` or `null`. Bodies are
//!   deserialized leniently: anything that doesn't match the expected shape is `None`.
//! - Boolean flags (`has_richsync`, `instrumental`, `restricted`, ...) arrive as `0`/`1`.
//! - Any field may be `null` instead of missing; both decode to the field's default.
//! - Subtitle and richsync bodies are JSON documents embedded as strings.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Status code the provider uses for success (inside the envelope, not HTTP)
pub const STATUS_OK: u32 = 200;

/// Response envelope shared by every endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(bound = "T: DeserializeOwned")]
pub struct Envelope<T> {
    pub message: Message<T>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(bound = "T: DeserializeOwned")]
pub struct Message<T> {
    #[serde(default, deserialize_with = "nullable")]
    pub header: Header,
    #[serde(default = "none", deserialize_with = "lenient")]
    pub body: Option<T>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Header {
    #[serde(default, deserialize_with = "nullable")]
    pub status_code: u32,
    /// Reason reported alongside a failure (e.g. `"auth_failed"`)
    pub mode: Option<String>,
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        self.message.header.status_code == STATUS_OK
    }

    pub fn status_code(&self) -> u32 {
        self.message.header.status_code
    }

    pub fn mode(&self) -> &str {
        self.message.header.mode.as_deref().unwrap_or("unknown")
    }

    pub fn body(&self) -> Option<&T> {
        self.message.body.as_ref()
    }

    pub fn into_body(self) -> Option<T> {
        self.message.body
    }
}

// ============================================================================
// macro.subtitles.get
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct MacroBody {
    pub macro_calls: MacroCalls,
}

/// Sub-results of the composite call, keyed by sub-call name
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MacroCalls {
    #[serde(rename = "matcher.track.get")]
    pub matcher: Option<Envelope<TrackBody>>,
    #[serde(rename = "track.lyrics.get")]
    pub lyrics: Option<Envelope<LyricsBody>>,
    #[serde(rename = "track.subtitles.get")]
    pub subtitles: Option<Envelope<SubtitlesBody>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackBody {
    pub track: Track,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Track {
    #[serde(default, deserialize_with = "nullable")]
    pub commontrack_id: u64,
    /// Length in seconds
    #[serde(default, deserialize_with = "nullable")]
    pub track_length: f64,
    #[serde(default, deserialize_with = "flag")]
    pub has_lyrics: bool,
    #[serde(default, deserialize_with = "flag")]
    pub has_lyrics_crowd: bool,
    #[serde(default, deserialize_with = "flag")]
    pub has_subtitles: bool,
    #[serde(default, deserialize_with = "flag")]
    pub has_richsync: bool,
    #[serde(default, deserialize_with = "flag")]
    pub instrumental: bool,
    /// Only present when requested with `part=track_lyrics_translation_status`
    #[serde(default, deserialize_with = "nullable")]
    pub track_lyrics_translation_status: Vec<TranslationStatus>,
}

/// Crowd translation progress for one language pair
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TranslationStatus {
    /// Source language, ISO-3
    #[serde(default, deserialize_with = "nullable")]
    pub from: String,
    /// Target language, ISO-3
    #[serde(default, deserialize_with = "nullable")]
    pub to: String,
    /// Completion ratio, 1 when fully translated
    #[serde(default, deserialize_with = "nullable")]
    pub perc: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LyricsBody {
    pub lyrics: Lyrics,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Lyrics {
    pub lyrics_body: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    pub restricted: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubtitlesBody {
    #[serde(default, deserialize_with = "nullable")]
    pub subtitle_list: Vec<SubtitleItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubtitleItem {
    pub subtitle: Subtitle,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Subtitle {
    /// JSON-encoded `Vec<SubtitleLine>`
    #[serde(default, deserialize_with = "nullable")]
    pub subtitle_body: String,
}

/// One entry of the embedded subtitle body
#[derive(Debug, Clone, Deserialize)]
pub struct SubtitleLine {
    #[serde(default, deserialize_with = "nullable")]
    pub text: String,
    #[serde(default, deserialize_with = "nullable")]
    pub time: SubtitleTime,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubtitleTime {
    /// Seconds from the start of the track
    #[serde(default, deserialize_with = "nullable")]
    pub total: f64,
}

// ============================================================================
// track.richsync.get
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct RichsyncBody {
    pub richsync: Richsync,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Richsync {
    /// JSON-encoded `Vec<RichsyncLine>`
    #[serde(default, deserialize_with = "nullable")]
    pub richsync_body: String,
}

/// One line of the embedded richsync body
#[derive(Debug, Clone, Deserialize)]
pub struct RichsyncLine {
    /// Line start, seconds
    #[serde(default, deserialize_with = "nullable")]
    pub ts: f64,
    /// Line end, seconds
    #[serde(default, deserialize_with = "nullable")]
    pub te: f64,
    /// Words (and the spaces between them)
    #[serde(default, deserialize_with = "nullable")]
    pub l: Vec<RichsyncWord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RichsyncWord {
    /// Literal text
    #[serde(default, deserialize_with = "nullable")]
    pub c: String,
    /// Offset from the line start, seconds
    #[serde(default)]
    pub o: Option<f64>,
}

// ============================================================================
// languages.get
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct LanguagesBody {
    #[serde(default, deserialize_with = "nullable")]
    pub language_list: Vec<LanguageItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LanguageItem {
    pub language: Language,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Language {
    #[serde(default, deserialize_with = "nullable")]
    pub language_iso_code_1: String,
    #[serde(default, deserialize_with = "nullable")]
    pub language_iso_code_3: String,
    #[serde(default, deserialize_with = "nullable")]
    pub language_name: String,
}

// ============================================================================
// crowd.track.translations.get
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct TranslationsBody {
    #[serde(default, deserialize_with = "nullable")]
    pub translations_list: Vec<TranslationItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranslationItem {
    pub translation: Translation,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Translation {
    /// The translated text
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    pub subtitle_matched_line: Option<String>,
    pub matched_line: Option<String>,
    pub snippet: Option<String>,
}

// ============================================================================
// Deserialization helpers
// ============================================================================

fn none<T>() -> Option<T> {
    None
}

/// Parse a body if it has the expected shape, otherwise treat it as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Like `#[serde(default)]`, but an explicit `null` also yields the default.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accept `true`/`false`, `0`/`1` or `"0"`/`"1"`.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        _ => false,
    })
}

// ============================================================================
// CONTRACT TESTS
// These verify our DTOs match what the real API returns.
// If these fail, the API has changed and we need to update our DTOs.
// ============================================================================
