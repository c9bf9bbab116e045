//! Lyrics service - runs the whole lookup chain for one track
//!
//! This is the high-level API a lyrics panel calls:
//! 1. Look up the track (metadata, lyrics, subtitles, translation status)
//! 2. Fetch word-level timings if the track has them
//! 3. Extract synced and plain lines
//! 4. Discover completed crowd translations and fetch each one
//!
//! Requests are issued one after another; nothing runs in parallel.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::config::Config;
use crate::error::Result;
use crate::lyrics::cache::LanguageCache;
use crate::lyrics::domain::{KaraokeLine, LookupFailure, LyricLine, TrackQuery, TranslatedLyrics};
use crate::lyrics::musixmatch::MusixmatchClient;
use crate::lyrics::musixmatch::endpoint::DEFAULT_BASE_URL;
use crate::lyrics::traits::{HttpTransport, Transport};

/// Configuration for the lyrics service
#[derive(Debug, Clone)]
pub struct LyricsConfig {
    /// Musixmatch user token (sent as `usertoken`)
    pub token: String,
    /// API root
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for LyricsConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: HttpTransport::DEFAULT_TIMEOUT,
        }
    }
}

impl From<&Config> for LyricsConfig {
    fn from(config: &Config) -> Self {
        Self {
            token: config.musixmatch_token(),
            base_url: config.provider.base_url.clone(),
            timeout: Duration::from_secs(config.provider.timeout_secs),
        }
    }
}

/// Everything found for one track
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lyrics {
    /// External track id of the query
    pub uri: String,
    pub karaoke: Option<Vec<KaraokeLine>>,
    pub synced: Option<Vec<LyricLine>>,
    pub unsynced: Option<Vec<LyricLine>>,
    /// One entry per completed crowd translation
    pub translations: Vec<TranslatedLyrics>,
}

impl Lyrics {
    /// True when there is nothing to display
    pub fn is_empty(&self) -> bool {
        self.karaoke.is_none() && self.synced.is_none() && self.unsynced.is_none()
    }
}

/// Service for fetching and normalizing lyrics
pub struct LyricsService<T = HttpTransport> {
    client: MusixmatchClient<T>,
}

impl LyricsService<HttpTransport> {
    /// Create a service with the default HTTP transport
    pub fn new(config: LyricsConfig) -> Result<Self> {
        if config.token.is_empty() {
            tracing::warn!("No Musixmatch token configured; lookups will likely be rejected");
        }

        let transport = HttpTransport::with_timeout(config.timeout)?;
        let client =
            MusixmatchClient::with_transport(transport, config.token).with_base_url(config.base_url);

        Ok(Self { client })
    }

    /// Create a service from the application configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(LyricsConfig::from(config))
    }
}

impl<T: Transport> LyricsService<T> {
    /// Wrap an existing client
    pub fn with_client(client: MusixmatchClient<T>) -> Self {
        Self { client }
    }

    /// Share the language table with other services
    pub fn with_language_cache(self, cache: Arc<LanguageCache>) -> Self {
        Self {
            client: self.client.with_language_cache(cache),
        }
    }

    pub fn client(&self) -> &MusixmatchClient<T> {
        &self.client
    }

    /// Look up everything displayable for a track.
    ///
    /// Fails only when the track can't be matched or its lyrics are restricted;
    /// every later step degrades to "not available".
    pub async fn lookup(&self, query: &TrackQuery) -> std::result::Result<Lyrics, LookupFailure> {
        let bundle = self.client.find_lyrics(query).await?;

        let karaoke = self.client.get_karaoke(&bundle).await;
        let synced = self.client.get_synced(&bundle);
        let unsynced = self.client.get_unsynced(&bundle);

        let mut translations = Vec::new();
        let source_lines = synced.as_deref().or(unsynced.as_deref());

        if let Some(lines) = source_lines
            && let Some(tasks) = self.client.get_crowd_translation(&bundle).await
        {
            for task in &tasks {
                translations.push(self.client.fetch_translations_for_language(task, lines).await);
            }
        }

        let lyrics = Lyrics {
            uri: bundle.uri().to_string(),
            karaoke,
            synced,
            unsynced,
            translations,
        };

        tracing::info!(
            uri = %lyrics.uri,
            karaoke = lyrics.karaoke.is_some(),
            synced = lyrics.synced.is_some(),
            unsynced = lyrics.unsynced.is_some(),
            translations = lyrics.translations.len(),
            "Lyrics lookup finished"
        );

        Ok(lyrics)
    }
}
