//! Test utilities and fixtures for lyrics-minder tests.
//!
//! Builders for provider JSON payloads, so tests only spell out the fields
//! they care about.
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils;
//!
//! let bundle = test_utils::bundle(test_utils::macro_response(
//!     test_utils::track(json!({"has_subtitles": 1})),
//!     None,
//!     Some(test_utils::subtitle_body(&[("Hello", 1.0)])),
//! ));
//! ```

use serde_json::{Value, json};

use crate::lyrics::TrackMetadataBundle;
use crate::lyrics::domain::{LanguageEntry, TrackQuery};
use crate::lyrics::musixmatch::{adapter, dto};

/// `commontrack_id` of the fixture track
pub const COMMONTRACK_ID: u64 = 5920049;

/// A query for the fixture track
pub fn query() -> TrackQuery {
    TrackQuery {
        title: "Bohemian Rhapsody".to_string(),
        artist: "Queen".to_string(),
        album: "A Night at the Opera".to_string(),
        duration_ms: 354_500,
        external_track_id: "spotify:track:7tFiyTwD0nx5a1eklYtX2J".to_string(),
    }
}

/// Wrap a body in the provider's envelope
pub fn envelope(status_code: u32, body: Value) -> Value {
    json!({
        "message": {
            "header": {"status_code": status_code, "execute_time": 0.01},
            "body": body
        }
    })
}

/// Matcher track JSON with every flag off, with `overrides` applied on top
pub fn track(overrides: Value) -> Value {
    let mut track = json!({
        "track_id": 84584600,
        "commontrack_id": COMMONTRACK_ID,
        "track_name": "Bohemian Rhapsody",
        "artist_name": "Queen",
        "track_length": 354,
        "has_lyrics": 0,
        "has_lyrics_crowd": 0,
        "has_subtitles": 0,
        "has_richsync": 0,
        "instrumental": 0
    });

    if let (Some(base), Value::Object(extra)) = (track.as_object_mut(), overrides) {
        base.extend(extra);
    }

    track
}

/// A composite lookup response with a successful matcher
pub fn macro_response(track: Value, lyrics: Option<Value>, subtitle_body: Option<String>) -> Value {
    let mut calls = serde_json::Map::new();
    calls.insert(
        "matcher.track.get".to_string(),
        envelope(200, json!({"track": track})),
    );

    calls.insert(
        "track.lyrics.get".to_string(),
        match lyrics {
            Some(lyrics) => envelope(200, json!({"lyrics": lyrics})),
            None => envelope(404, json!([])),
        },
    );

    calls.insert(
        "track.subtitles.get".to_string(),
        match subtitle_body {
            Some(body) => envelope(
                200,
                json!({"subtitle_list": [{"subtitle": {"subtitle_body": body}}]}),
            ),
            None => envelope(404, json!([])),
        },
    );

    envelope(200, json!({"macro_calls": calls}))
}

/// Embedded subtitle body from `(text, seconds)` pairs
pub fn subtitle_body(lines: &[(&str, f64)]) -> String {
    let lines: Vec<Value> = lines
        .iter()
        .map(|(text, total)| json!({"text": text, "time": {"total": total}}))
        .collect();
    Value::Array(lines).to_string()
}

/// Parse a composite response the way the client does
pub fn parse(response: Value) -> dto::Envelope<dto::MacroBody> {
    serde_json::from_value(response).expect("Fixture should parse as a macro response")
}

/// A checked bundle from a composite response
pub fn bundle(response: Value) -> TrackMetadataBundle {
    adapter::check_lookup(parse(response), &query().external_track_id)
        .expect("Fixture should be a usable bundle")
}

/// The language table served by [`languages_response`]
pub fn languages() -> Vec<LanguageEntry> {
    [
        ("en", "eng", "English"),
        ("it", "ita", "Italian"),
        ("es", "spa", "Spanish"),
    ]
    .into_iter()
    .map(|(code2, code3, name)| LanguageEntry {
        iso_code2: code2.to_string(),
        iso_code3: code3.to_string(),
        display_name: name.to_string(),
    })
    .collect()
}

pub fn languages_response() -> Value {
    let list: Vec<Value> = languages()
        .into_iter()
        .map(|l| {
            json!({"language": {
                "language_iso_code_1": l.iso_code2,
                "language_iso_code_3": l.iso_code3,
                "language_name": l.display_name
            }})
        })
        .collect();
    envelope(200, json!({"language_list": list}))
}

/// Translations list from `(description, subtitle_matched_line, matched_line, snippet)`
pub fn translations_response(
    entries: &[(&str, Option<&str>, Option<&str>, Option<&str>)],
) -> Value {
    let list: Vec<Value> = entries
        .iter()
        .map(|(description, subtitle_matched_line, matched_line, snippet)| {
            json!({"translation": {
                "description": description,
                "subtitle_matched_line": subtitle_matched_line,
                "matched_line": matched_line,
                "snippet": snippet
            }})
        })
        .collect();
    envelope(200, json!({"translations_list": list}))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_overrides_apply() {
        let t = track(json!({"instrumental": 1, "extra": "x"}));
        assert_eq!(t["instrumental"], json!(1));
        assert_eq!(t["extra"], json!("x"));
        assert_eq!(t["commontrack_id"], json!(COMMONTRACK_ID));
    }

    #[test]
    fn test_macro_response_is_usable() {
        let b = bundle(macro_response(track(json!({})), None, None));
        assert_eq!(b.commontrack_id(), Some(COMMONTRACK_ID));
        assert!(!b.is_instrumental());
    }

    #[test]
    fn test_translations_response_parses() {
        let response = translations_response(&[("Ciao", None, Some("Hello"), None)]);
        let envelope: dto::Envelope<dto::TranslationsBody> =
            serde_json::from_value(response).unwrap();
        let list = envelope.into_body().unwrap().translations_list;
        assert_eq!(list[0].translation.matched_line.as_deref(), Some("Hello"));
        assert!(list[0].translation.snippet.is_none());
    }
}
