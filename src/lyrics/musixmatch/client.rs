//! Musixmatch desktop API client
//!
//! Talks to the same endpoints the Musixmatch desktop app uses, authenticated with
//! a user token. Every operation issues at most one request of its own and then
//! hands the payload to the adapter. Failures never escape as errors except from
//! [`MusixmatchClient::find_lyrics`], which reports a [`LookupFailure`] for display.
//!
//! ## API Quirks
//!
//! The provider answers HTTP 200 even when a call fails; the real status code lives
//! in `message.header.status_code` of each envelope. The composite lookup nests a
//! full envelope per sub-call, and each one is checked separately.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use super::adapter::{self, TrackMetadataBundle};
use super::dto;
use super::endpoint::{self, Endpoint, TRANSLATION_PAGE_SIZE};
use crate::lyrics::cache::LanguageCache;
use crate::lyrics::domain::{
    CrowdTranslationTask, KaraokeLine, LanguageEntry, LookupFailure, LyricLine, LyricsError,
    TrackQuery, TranslatedLyrics,
};
use crate::lyrics::traits::{HttpTransport, Transport};

/// Musixmatch API client
pub struct MusixmatchClient<T = HttpTransport> {
    transport: T,
    token: String,
    base_url: String,
    languages: Arc<LanguageCache>,
}

impl MusixmatchClient<HttpTransport> {
    /// Create a client using the default HTTP transport
    pub fn new(token: impl Into<String>) -> Result<Self, LyricsError> {
        Ok(Self::with_transport(HttpTransport::new()?, token))
    }
}

impl<T: Transport> MusixmatchClient<T> {
    /// Create a client on top of any transport, with a private language cache
    pub fn with_transport(transport: T, token: impl Into<String>) -> Self {
        Self {
            transport,
            token: token.into(),
            base_url: endpoint::DEFAULT_BASE_URL.to_string(),
            languages: Arc::new(LanguageCache::new()),
        }
    }

    /// Point the client at a different API root
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Share a language cache with other clients
    pub fn with_language_cache(mut self, cache: Arc<LanguageCache>) -> Self {
        self.languages = cache;
        self
    }

    pub fn language_cache(&self) -> &Arc<LanguageCache> {
        &self.languages
    }

    /// The provider's language table.
    ///
    /// Fetched on first use and cached for the life of the cache. A failed fetch
    /// returns an empty table and is not cached, so the next call retries.
    pub async fn get_languages(&self) -> Arc<[LanguageEntry]> {
        if let Some(cached) = self.languages.get() {
            tracing::debug!("Musixmatch languages cache hit");
            return cached;
        }

        let params = [
            ("get_romanized_info", "1".to_string()),
            ("usertoken", self.token.clone()),
        ];

        let envelope = match self
            .fetch::<dto::LanguagesBody>(Endpoint::Languages, &params)
            .await
        {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::warn!("Musixmatch language list request failed: {}", e);
                return Arc::from(Vec::new());
            }
        };

        if !envelope.is_success() {
            tracing::warn!(
                status = envelope.status_code(),
                mode = envelope.mode(),
                "Musixmatch language list request was rejected"
            );
            return Arc::from(Vec::new());
        }

        match adapter::to_language_entries(envelope.into_body()) {
            Some(entries) => {
                tracing::debug!(count = entries.len(), "Cached Musixmatch languages");
                self.languages.store(entries)
            }
            None => {
                tracing::warn!("Musixmatch language list response had no body");
                Arc::from(Vec::new())
            }
        }
    }

    /// Look up a track's metadata, lyrics, subtitles and translation status in one call
    pub async fn find_lyrics(
        &self,
        query: &TrackQuery,
    ) -> Result<TrackMetadataBundle, LookupFailure> {
        let duration = query.duration_secs();

        let params = [
            ("q_album", query.album.clone()),
            ("q_artist", query.artist.clone()),
            ("q_artists", query.artist.clone()),
            ("q_track", query.title.clone()),
            ("track_spotify_id", query.external_track_id.clone()),
            ("q_duration", duration.to_string()),
            ("f_subtitle_length", (duration.floor() as u64).to_string()),
            ("usertoken", self.token.clone()),
            ("part", "track_lyrics_translation_status".to_string()),
        ];

        tracing::debug!(
            title = %query.title,
            artist = %query.artist,
            uri = %query.external_track_id,
            "Looking up lyrics"
        );

        match self
            .fetch::<dto::MacroBody>(Endpoint::MacroSubtitles, &params)
            .await
        {
            Ok(envelope) => adapter::check_lookup(envelope, &query.external_track_id),
            Err(e) => {
                tracing::warn!("Musixmatch lookup failed: {}", e);
                Err(LookupFailure::transport(&e, query.external_track_id.clone()))
            }
        }
    }

    /// Word-synced lines, fetched with one extra request.
    ///
    /// `None` when the track wasn't matched, has no richsync, is instrumental, or
    /// the richsync request fails.
    pub async fn get_karaoke(&self, bundle: &TrackMetadataBundle) -> Option<Vec<KaraokeLine>> {
        let track = bundle.track()?;

        if !track.has_richsync || track.instrumental {
            return None;
        }

        let length = track.track_length.to_string();
        let params = [
            ("f_subtitle_length", length.clone()),
            ("q_duration", length),
            ("commontrack_id", track.commontrack_id.to_string()),
            ("usertoken", self.token.clone()),
        ];

        let envelope = match self
            .fetch::<dto::RichsyncBody>(Endpoint::Richsync, &params)
            .await
        {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::warn!("Musixmatch richsync request failed: {}", e);
                return None;
            }
        };

        if !envelope.is_success() {
            tracing::debug!(status = envelope.status_code(), "No richsync for track");
            return None;
        }

        let body = envelope.into_body()?;
        adapter::karaoke_lines(&body.richsync.richsync_body)
    }

    /// Time-synced lines from the bundle
    pub fn get_synced(&self, bundle: &TrackMetadataBundle) -> Option<Vec<LyricLine>> {
        adapter::synced_lines(bundle)
    }

    /// Plain lines from the bundle
    pub fn get_unsynced(&self, bundle: &TrackMetadataBundle) -> Option<Vec<LyricLine>> {
        adapter::unsynced_lines(bundle)
    }

    /// Completed crowd translations available for the track.
    ///
    /// `None` when there are none, or when the language table can't be loaded.
    pub async fn get_crowd_translation(
        &self,
        bundle: &TrackMetadataBundle,
    ) -> Option<Vec<CrowdTranslationTask>> {
        let track = bundle.track()?;

        let completed = adapter::completed_translations(track);
        if completed.is_empty() {
            return None;
        }

        let languages = self.get_languages().await;
        if languages.is_empty() {
            tracing::warn!(
                commontrack_id = track.commontrack_id,
                "Failed to get languages data, even though translations exist"
            );
            return None;
        }

        Some(adapter::crowd_translation_tasks(
            track.commontrack_id,
            &completed,
            &languages,
        ))
    }

    /// Fetch one language's crowd translations and align them with `lines`.
    ///
    /// Only the first page is read. The result always has one line per input
    /// line; if the request fails, every line passes through untranslated.
    pub async fn fetch_translations_for_language(
        &self,
        task: &CrowdTranslationTask,
        lines: &[LyricLine],
    ) -> TranslatedLyrics {
        let params = [
            ("page", "1".to_string()),
            ("page_size", TRANSLATION_PAGE_SIZE.to_string()),
            ("commontrack_id", task.track_id.to_string()),
            ("selected_language", task.to_iso_code2.clone()),
            ("usertoken", self.token.clone()),
        ];

        let translations = match self
            .fetch::<dto::TranslationsBody>(Endpoint::CrowdTranslations, &params)
            .await
        {
            Ok(envelope) => envelope
                .into_body()
                .map(|body| body.translations_list)
                .unwrap_or_default(),
            Err(e) => {
                tracing::warn!(
                    language = %task.to_iso_code3,
                    "Failed to get translation body: {}",
                    e
                );
                Vec::new()
            }
        };

        adapter::align_translations(task, lines, &translations)
    }

    /// Send a request and decode the envelope
    async fn fetch<B: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        params: &[(&str, String)],
    ) -> Result<dto::Envelope<B>, LyricsError> {
        let url = endpoint::build_url(&self.base_url, endpoint, params);
        tracing::debug!(endpoint = endpoint.path(), "Musixmatch request");

        let value = self.transport.get_json(&url, &endpoint::HEADERS).await?;

        serde_json::from_value(value).map_err(|e| LyricsError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lyrics::domain::FailureReason;
    use crate::lyrics::traits::mocks::MockTransport;
    use crate::test_utils;
    use serde_json::json;

    fn client(mock: MockTransport) -> MusixmatchClient<MockTransport> {
        MusixmatchClient::with_transport(mock, "test-token").with_base_url("http://mxm.test")
    }

    fn translated_track() -> serde_json::Value {
        test_utils::track(json!({
            "track_lyrics_translation_status": [
                {"from": "eng", "to": "ita", "perc": 1},
                {"from": "eng", "to": "deu", "perc": 0.5}
            ]
        }))
    }

    #[test]
    fn test_client_creation() {
        let client = MusixmatchClient::new("tok").unwrap();
        assert_eq!(client.base_url, endpoint::DEFAULT_BASE_URL);
        assert_eq!(client.token, "tok");
    }

    // ------------------------------------------------------------------
    // get_languages
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_languages_cached_after_success() {
        let mock = MockTransport::new()
            .respond(Endpoint::Languages, test_utils::languages_response());
        let client = client(mock);

        let first = client.get_languages().await;
        let second = client.get_languages().await;

        assert_eq!(first.len(), test_utils::languages().len());
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(client.transport.calls_to(Endpoint::Languages), 1);
    }

    #[tokio::test]
    async fn test_languages_retry_after_failure() {
        let mock = MockTransport::new()
            .respond(Endpoint::Languages, test_utils::envelope(401, json!([])))
            .respond(Endpoint::Languages, test_utils::languages_response());
        let client = client(mock);

        let first = client.get_languages().await;
        assert!(first.is_empty());
        assert!(!client.language_cache().is_populated());

        let second = client.get_languages().await;
        assert!(!second.is_empty());
        assert_eq!(client.transport.calls_to(Endpoint::Languages), 2);
    }

    #[tokio::test]
    async fn test_languages_transport_failure_not_cached() {
        let mock = MockTransport::new()
            .fail(Endpoint::Languages, LyricsError::Network("offline".to_string()));
        let client = client(mock);

        assert!(client.get_languages().await.is_empty());
        assert!(client.get_languages().await.is_empty());
        assert_eq!(client.transport.calls_to(Endpoint::Languages), 2);
    }

    #[tokio::test]
    async fn test_shared_language_cache() {
        let cache = Arc::new(LanguageCache::new());
        let first = client(
            MockTransport::new().respond(Endpoint::Languages, test_utils::languages_response()),
        )
        .with_language_cache(Arc::clone(&cache));
        let second = client(MockTransport::new()).with_language_cache(Arc::clone(&cache));

        first.get_languages().await;
        let languages = second.get_languages().await;

        assert!(!languages.is_empty());
        assert_eq!(second.transport.calls_to(Endpoint::Languages), 0);
    }

    #[tokio::test]
    async fn test_languages_url() {
        let mock = MockTransport::new()
            .respond(Endpoint::Languages, test_utils::languages_response());
        let client = client(mock);

        client.get_languages().await;

        assert_eq!(
            client.transport.last_url(Endpoint::Languages).as_deref(),
            Some("http://mxm.test/languages.get?format=json&app_id=web-desktop-app-v1.0&get_romanized_info=1&usertoken=test-token")
        );
    }

    // ------------------------------------------------------------------
    // find_lyrics
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_find_lyrics_builds_query() {
        let mock = MockTransport::new().respond(
            Endpoint::MacroSubtitles,
            test_utils::macro_response(test_utils::track(json!({})), None, None),
        );
        let client = client(mock);

        let bundle = client.find_lyrics(&test_utils::query()).await.unwrap();

        assert_eq!(bundle.uri(), test_utils::query().external_track_id);
        let url = client.transport.last_url(Endpoint::MacroSubtitles).unwrap();
        assert!(url.starts_with(
            "http://mxm.test/macro.subtitles.get?format=json&namespace=lyrics_richsynched&subtitle_format=mxm&app_id=web-desktop-app-v1.0&"
        ));
        assert!(url.contains(
            "&q_album=A%20Night%20at%20the%20Opera&q_artist=Queen&q_artists=Queen&q_track=Bohemian%20Rhapsody"
        ));
        assert!(url.contains("&track_spotify_id=spotify%3Atrack%3A7tFiyTwD0nx5a1eklYtX2J"));
        assert!(url.contains("&q_duration=354.5&f_subtitle_length=354&"));
        assert!(url.ends_with("&usertoken=test-token&part=track_lyrics_translation_status"));
    }

    #[tokio::test]
    async fn test_find_lyrics_matcher_failure() {
        let response = json!({
            "message": {
                "header": {"status_code": 200},
                "body": {"macro_calls": {
                    "matcher.track.get": {"message": {"header": {"status_code": 401, "mode": "auth_failed"}}}
                }}
            }
        });
        let client = client(MockTransport::new().respond(Endpoint::MacroSubtitles, response));

        let failure = client.find_lyrics(&test_utils::query()).await.unwrap_err();

        assert_eq!(failure.error, "Requested error: auth_failed");
        assert_eq!(failure.uri, test_utils::query().external_track_id);
        assert_eq!(failure.reason, FailureReason::Status);
    }

    #[tokio::test]
    async fn test_find_lyrics_restricted() {
        let response = test_utils::macro_response(
            test_utils::track(json!({"has_lyrics": 1})),
            Some(json!({"lyrics_body": "...", "restricted": 1})),
            None,
        );
        let client = client(MockTransport::new().respond(Endpoint::MacroSubtitles, response));

        let failure = client.find_lyrics(&test_utils::query()).await.unwrap_err();

        assert_eq!(
            serde_json::to_value(&failure).unwrap(),
            json!({
                "error": "Unfortunately we're not authorized to show these lyrics.",
                "uri": "spotify:track:7tFiyTwD0nx5a1eklYtX2J"
            })
        );
    }

    #[tokio::test]
    async fn test_find_lyrics_transport_failure() {
        let client = client(
            MockTransport::new().fail(Endpoint::MacroSubtitles, LyricsError::Network("timeout".to_string())),
        );

        let failure = client.find_lyrics(&test_utils::query()).await.unwrap_err();

        assert_eq!(failure.reason, FailureReason::Transport);
        assert!(failure.error.contains("timeout"));
        assert_eq!(failure.uri, test_utils::query().external_track_id);
    }

    // ------------------------------------------------------------------
    // get_karaoke
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_get_karaoke_fetches_richsync() {
        let richsync = json!([
            {"ts": 0.5, "te": 2.0, "l": [{"c": "Is", "o": 0}, {"c": " ", "o": 0.2}, {"c": "this", "o": 0.4}]}
        ])
        .to_string();
        let mock = MockTransport::new().respond(
            Endpoint::Richsync,
            test_utils::envelope(200, json!({"richsync": {"richsync_body": richsync}})),
        );
        let client = client(mock);
        let bundle = test_utils::bundle(test_utils::macro_response(
            test_utils::track(json!({"has_richsync": 1, "track_length": 355})),
            None,
            None,
        ));

        let lines = client.get_karaoke(&bundle).await.unwrap();

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].start_time_ms, 500.0);
        assert_eq!(lines[0].words.len(), 3);
        assert_eq!(lines[0].words[2].duration_ms, 2000.0 - (400.0 + 500.0));

        let url = client.transport.last_url(Endpoint::Richsync).unwrap();
        assert!(url.ends_with(&format!(
            "&f_subtitle_length=355&q_duration=355&commontrack_id={}&usertoken=test-token",
            test_utils::COMMONTRACK_ID
        )));
    }

    #[tokio::test]
    async fn test_get_karaoke_skips_without_richsync() {
        let client = client(MockTransport::new());
        let bundle = test_utils::bundle(test_utils::macro_response(
            test_utils::track(json!({"has_richsync": 0})),
            None,
            None,
        ));

        assert!(client.get_karaoke(&bundle).await.is_none());
        assert_eq!(client.transport.calls_to(Endpoint::Richsync), 0);
    }

    #[tokio::test]
    async fn test_get_karaoke_skips_instrumental() {
        let client = client(MockTransport::new());
        let bundle = test_utils::bundle(test_utils::macro_response(
            test_utils::track(json!({"has_richsync": 1, "instrumental": 1})),
            None,
            None,
        ));

        assert!(client.get_karaoke(&bundle).await.is_none());
        assert_eq!(client.transport.calls_to(Endpoint::Richsync), 0);
    }

    #[tokio::test]
    async fn test_get_karaoke_non_success_status() {
        let client = client(
            MockTransport::new().respond(Endpoint::Richsync, test_utils::envelope(404, json!([]))),
        );
        let bundle = test_utils::bundle(test_utils::macro_response(
            test_utils::track(json!({"has_richsync": 1})),
            None,
            None,
        ));

        assert!(client.get_karaoke(&bundle).await.is_none());
    }

    // ------------------------------------------------------------------
    // get_crowd_translation
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_get_crowd_translation() {
        let client = client(
            MockTransport::new().respond(Endpoint::Languages, test_utils::languages_response()),
        );
        let bundle = test_utils::bundle(test_utils::macro_response(translated_track(), None, None));

        let tasks = client.get_crowd_translation(&bundle).await.unwrap();

        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].track_id, test_utils::COMMONTRACK_ID);
        assert_eq!(tasks[0].from_language_name, "English");
        assert_eq!(tasks[0].to_language_name, "Italian");
        assert_eq!(tasks[0].to_iso_code2, "it");
    }

    #[tokio::test]
    async fn test_get_crowd_translation_none_complete() {
        let client = client(MockTransport::new());
        let bundle = test_utils::bundle(test_utils::macro_response(
            test_utils::track(json!({
                "track_lyrics_translation_status": [{"from": "eng", "to": "ita", "perc": 0.9}]
            })),
            None,
            None,
        ));

        assert_eq!(client.get_crowd_translation(&bundle).await, None);
        assert_eq!(client.transport.calls_to(Endpoint::Languages), 0);
    }

    #[tokio::test]
    async fn test_get_crowd_translation_no_status_list() {
        let client = client(MockTransport::new());
        let bundle = test_utils::bundle(test_utils::macro_response(
            test_utils::track(json!({})),
            None,
            None,
        ));

        assert!(client.get_crowd_translation(&bundle).await.is_none());
    }

    #[tokio::test]
    async fn test_get_crowd_translation_language_load_failure() {
        let client = client(
            MockTransport::new().respond(Endpoint::Languages, test_utils::envelope(500, json!([]))),
        );
        let bundle = test_utils::bundle(test_utils::macro_response(translated_track(), None, None));

        assert!(client.get_crowd_translation(&bundle).await.is_none());
    }

    #[tokio::test]
    async fn test_get_crowd_translation_unknown_target_skipped() {
        let client = client(
            MockTransport::new().respond(Endpoint::Languages, test_utils::languages_response()),
        );
        let bundle = test_utils::bundle(test_utils::macro_response(
            test_utils::track(json!({
                "track_lyrics_translation_status": [{"from": "eng", "to": "tlh", "perc": 1}]
            })),
            None,
            None,
        ));

        assert_eq!(client.get_crowd_translation(&bundle).await, Some(vec![]));
    }

    // ------------------------------------------------------------------
    // fetch_translations_for_language
    // ------------------------------------------------------------------

    fn italian() -> CrowdTranslationTask {
        CrowdTranslationTask {
            track_id: 99,
            from_language_name: "English".to_string(),
            to_language_name: "Italian".to_string(),
            to_iso_code3: "ita".to_string(),
            to_iso_code2: "it".to_string(),
        }
    }

    #[tokio::test]
    async fn test_fetch_translations_aligns_lines() {
        let mock = MockTransport::new().respond(
            Endpoint::CrowdTranslations,
            test_utils::translations_response(&[
                ("È la vita reale?", Some("Is this the real life?"), None, None),
                ("unused", None, Some("Not in the song"), None),
            ]),
        );
        let client = client(mock);
        let lines = vec![
            LyricLine::synced("Is this the real life?", 600.0),
            LyricLine::synced("Is this just fantasy?", 4100.0),
        ];

        let result = client.fetch_translations_for_language(&italian(), &lines).await;

        assert_eq!(result.track_id, 99);
        assert_eq!(result.iso_code3, "ita");
        assert_eq!(result.lines.len(), 2);
        assert_eq!(result.lines[0], LyricLine::synced("È la vita reale?", 600.0));
        assert_eq!(result.lines[1], lines[1]);

        let url = client.transport.last_url(Endpoint::CrowdTranslations).unwrap();
        assert_eq!(
            url,
            "http://mxm.test/crowd.track.translations.get?app_id=web-desktop-app-v1.0&page=1&page_size=100&commontrack_id=99&selected_language=it&usertoken=test-token"
        );
    }

    #[tokio::test]
    async fn test_fetch_translations_failure_passes_lines_through() {
        let client = client(MockTransport::new().fail(
            Endpoint::CrowdTranslations,
            LyricsError::Network("reset".to_string()),
        ));
        let lines = vec![LyricLine::synced("a", 1.0), LyricLine::synced("b", 2.0)];

        let result = client.fetch_translations_for_language(&italian(), &lines).await;

        assert_eq!(result.lines, lines);
    }

    #[tokio::test]
    async fn test_fetch_translations_empty_input() {
        let client = client(MockTransport::new().respond(
            Endpoint::CrowdTranslations,
            test_utils::translations_response(&[("x", Some("y"), None, None)]),
        ));

        let result = client.fetch_translations_for_language(&italian(), &[]).await;

        assert!(result.lines.is_empty());
    }
}
