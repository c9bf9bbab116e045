//! Adapter layer: Convert Musixmatch DTOs to domain models
//!
//! This is the ONLY place where DTO types are converted to domain types.
//! Everything here is pure; the client does the fetching and hands the
//! parsed payloads over.

use super::dto;
use crate::lyrics::domain::{
    CrowdTranslationTask, INSTRUMENTAL_MARKER, KaraokeLine, KaraokeWord, LanguageEntry,
    LookupFailure, LyricLine, NOTE_GLYPH, StartTime, TranslatedLyrics,
};

/// Result of a successful composite lookup.
///
/// Holds the provider's sub-results for the remaining extractors to interpret.
/// Only produced once the matcher succeeded and the lyrics aren't restricted.
#[derive(Debug, Clone)]
pub struct TrackMetadataBundle {
    calls: dto::MacroCalls,
    uri: String,
}

impl TrackMetadataBundle {
    /// The external track id this bundle was looked up with
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// The provider's common-track id, if the track was matched
    pub fn commontrack_id(&self) -> Option<u64> {
        self.track().map(|t| t.commontrack_id)
    }

    pub fn is_instrumental(&self) -> bool {
        self.track().is_some_and(|t| t.instrumental)
    }

    /// Matched track metadata, if present
    pub(crate) fn track(&self) -> Option<&dto::Track> {
        self.calls
            .matcher
            .as_ref()
            .and_then(|m| m.body())
            .map(|b| &b.track)
    }

    fn lyrics(&self) -> Option<&dto::Lyrics> {
        self.calls
            .lyrics
            .as_ref()
            .and_then(|l| l.body())
            .map(|b| &b.lyrics)
    }

    fn subtitle_body(&self) -> Option<&str> {
        self.calls
            .subtitles
            .as_ref()
            .and_then(|s| s.body())
            .and_then(|b| b.subtitle_list.first())
            .map(|item| item.subtitle.subtitle_body.as_str())
    }
}

/// Validate a composite lookup response.
///
/// Restricted lyrics win over everything else; otherwise a missing or failed
/// matcher sub-result makes the response unusable.
pub fn check_lookup(
    response: dto::Envelope<dto::MacroBody>,
    uri: &str,
) -> Result<TrackMetadataBundle, LookupFailure> {
    let outer_mode = response.mode().to_string();

    let Some(body) = response.into_body() else {
        return Err(LookupFailure::status(&outer_mode, uri));
    };

    let bundle = TrackMetadataBundle {
        calls: body.macro_calls,
        uri: uri.to_string(),
    };

    if bundle.lyrics().is_some_and(|l| l.restricted) {
        return Err(LookupFailure::restricted(uri));
    }

    match &bundle.calls.matcher {
        None => Err(LookupFailure::status(&outer_mode, uri)),
        Some(matcher) if !matcher.is_success() => Err(LookupFailure::status(matcher.mode(), uri)),
        Some(_) => Ok(bundle),
    }
}

/// Convert the language list, `None` if the body is missing
pub fn to_language_entries(body: Option<dto::LanguagesBody>) -> Option<Vec<LanguageEntry>> {
    let body = body?;
    Some(
        body.language_list
            .into_iter()
            .map(|item| LanguageEntry {
                iso_code2: item.language.language_iso_code_1,
                iso_code3: item.language.language_iso_code_3,
                display_name: item.language.language_name,
            })
            .collect(),
    )
}

/// Parse a richsync body into karaoke lines.
///
/// The provider gives word offsets but no durations. A word lasts until the next
/// word's offset; the last word of a line lasts until the line end, computed as
/// `end - (offset + start)`. That formula mixes the line-relative offset with the
/// absolute line times and is kept exactly as the desktop app computes it.
///
/// A word whose successor has no offset is timed like a last word. A word with
/// no offset of its own starts at offset zero.
pub fn karaoke_lines(richsync_body: &str) -> Option<Vec<KaraokeLine>> {
    let lines: Vec<dto::RichsyncLine> = match serde_json::from_str(richsync_body) {
        Ok(lines) => lines,
        Err(e) => {
            tracing::warn!("Malformed richsync body: {}", e);
            return None;
        }
    };

    Some(lines.iter().map(to_karaoke_line).collect())
}

fn to_karaoke_line(line: &dto::RichsyncLine) -> KaraokeLine {
    let start_time_ms = line.ts * 1000.0;
    let end_time_ms = line.te * 1000.0;

    let words = line
        .l
        .iter()
        .enumerate()
        .map(|(index, word)| {
            let offset_ms = word.o.unwrap_or_default() * 1000.0;
            // a next word without an offset times out like the last word
            let duration_ms = match line.l.get(index + 1).and_then(|next| next.o) {
                Some(next_offset) => next_offset * 1000.0 - offset_ms,
                None => end_time_ms - (offset_ms + start_time_ms),
            };
            KaraokeWord {
                word: word.c.clone(),
                duration_ms,
            }
        })
        .collect();

    KaraokeLine {
        start_time_ms,
        words,
    }
}

/// Time-synced lines from the subtitle sub-result
pub fn synced_lines(bundle: &TrackMetadataBundle) -> Option<Vec<LyricLine>> {
    let track = bundle.track()?;

    if track.instrumental {
        return Some(vec![LyricLine {
            text: INSTRUMENTAL_MARKER.to_string(),
            start_time: Some(StartTime::Instrumental),
        }]);
    }

    if !track.has_subtitles {
        return None;
    }

    let body = bundle.subtitle_body()?;
    let lines: Vec<dto::SubtitleLine> = match serde_json::from_str(body) {
        Ok(lines) => lines,
        Err(e) => {
            tracing::warn!("Malformed subtitle body: {}", e);
            return None;
        }
    };

    Some(
        lines
            .into_iter()
            .map(|line| {
                let text = if line.text.is_empty() {
                    NOTE_GLYPH.to_string()
                } else {
                    line.text
                };
                LyricLine::synced(text, line.time.total * 1000.0)
            })
            .collect(),
    )
}

/// Plain lines from the lyrics sub-result
pub fn unsynced_lines(bundle: &TrackMetadataBundle) -> Option<Vec<LyricLine>> {
    let track = bundle.track()?;

    if track.instrumental {
        return Some(vec![LyricLine::unsynced(INSTRUMENTAL_MARKER)]);
    }

    if !(track.has_lyrics || track.has_lyrics_crowd) {
        return None;
    }

    let body = bundle
        .lyrics()
        .and_then(|l| l.lyrics_body.as_deref())
        .filter(|b| !b.is_empty())?;

    Some(body.split('\n').map(LyricLine::unsynced).collect())
}

/// Translation status entries that are fully translated, in provider order
pub fn completed_translations(track: &dto::Track) -> Vec<&dto::TranslationStatus> {
    track
        .track_lyrics_translation_status
        .iter()
        .filter(|status| status.perc >= 1.0)
        .collect()
}

/// Resolve completed translations against the language table.
///
/// Entries whose target language is unknown are dropped. An unknown source
/// language falls back to its raw code.
pub fn crowd_translation_tasks(
    track_id: u64,
    completed: &[&dto::TranslationStatus],
    languages: &[LanguageEntry],
) -> Vec<CrowdTranslationTask> {
    completed
        .iter()
        .filter_map(|status| {
            let Some(target) = find_language(languages, &status.to) else {
                tracing::debug!(from = %status.from, to = %status.to, "Failed to find language code");
                return None;
            };
            let from_language_name = find_language(languages, &status.from)
                .map(|l| l.display_name.clone())
                .unwrap_or_else(|| status.from.clone());

            Some(CrowdTranslationTask {
                track_id,
                from_language_name,
                to_language_name: target.display_name.clone(),
                to_iso_code3: target.iso_code3.clone(),
                to_iso_code2: target.iso_code2.clone(),
            })
        })
        .collect()
}

fn find_language<'a>(languages: &'a [LanguageEntry], iso_code3: &str) -> Option<&'a LanguageEntry> {
    languages.iter().find(|l| l.iso_code3 == iso_code3)
}

/// Replace each line's text with its translation, keeping timing and order.
///
/// Matching is by exact text, trying `subtitle_matched_line` across all entries
/// first, then `matched_line`, then `snippet`. Unmatched lines pass through.
pub fn align_translations(
    task: &CrowdTranslationTask,
    lines: &[LyricLine],
    translations: &[dto::TranslationItem],
) -> TranslatedLyrics {
    let lines = lines
        .iter()
        .map(|line| match find_translation(translations, &line.text) {
            Some(translation) => LyricLine {
                text: translation.description.clone(),
                start_time: line.start_time,
            },
            None => line.clone(),
        })
        .collect();

    TranslatedLyrics {
        track_id: task.track_id,
        from_language_name: task.from_language_name.clone(),
        to_language_name: task.to_language_name.clone(),
        iso_code3: task.to_iso_code3.clone(),
        lines,
    }
}

fn find_translation<'a>(
    translations: &'a [dto::TranslationItem],
    text: &str,
) -> Option<&'a dto::Translation> {
    let fields: [fn(&dto::Translation) -> Option<&str>; 3] = [
        |t| t.subtitle_matched_line.as_deref(),
        |t| t.matched_line.as_deref(),
        |t| t.snippet.as_deref(),
    ];

    fields.iter().find_map(|field| {
        translations
            .iter()
            .map(|item| &item.translation)
            .find(|t| field(t) == Some(text))
    })
}
