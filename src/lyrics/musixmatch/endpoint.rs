//! Endpoint paths and query assembly for the Musixmatch desktop API.
//!
//! Each endpoint has a fixed prefix of flags that the desktop app always sends,
//! followed by the per-call parameters in insertion order. Keys are sent verbatim,
//! values are percent-encoded.

/// Default API root
pub const DEFAULT_BASE_URL: &str = "https://apic-desktop.musixmatch.com/ws/1.1";

/// Headers sent with every request
pub const HEADERS: [(&str, &str); 2] = [
    ("authority", "apic-desktop.musixmatch.com"),
    ("cookie", "x-mxm-token-guid="),
];

/// Crowd translations are fetched as a single page of this size
pub const TRANSLATION_PAGE_SIZE: u32 = 100;

const APP_ID: &str = "app_id=web-desktop-app-v1.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `languages.get`
    Languages,
    /// `macro.subtitles.get` - matcher, lyrics, subtitles in one call
    MacroSubtitles,
    /// `track.richsync.get` - word-level timings
    Richsync,
    /// `crowd.track.translations.get`
    CrowdTranslations,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Languages => "languages.get",
            Endpoint::MacroSubtitles => "macro.subtitles.get",
            Endpoint::Richsync => "track.richsync.get",
            Endpoint::CrowdTranslations => "crowd.track.translations.get",
        }
    }

    /// Flags sent before the per-call parameters
    fn fixed_query(self) -> String {
        match self {
            Endpoint::Languages => format!("format=json&{}", APP_ID),
            Endpoint::MacroSubtitles => format!(
                "format=json&namespace=lyrics_richsynched&subtitle_format=mxm&{}",
                APP_ID
            ),
            Endpoint::Richsync => format!("format=json&subtitle_format=mxm&{}", APP_ID),
            Endpoint::CrowdTranslations => APP_ID.to_string(),
        }
    }
}

/// Build the full request URL for an endpoint
pub fn build_url(base_url: &str, endpoint: Endpoint, params: &[(&str, String)]) -> String {
    let mut url = format!(
        "{}/{}?{}",
        base_url.trim_end_matches('/'),
        endpoint.path(),
        endpoint.fixed_query()
    );

    for (key, value) in params {
        url.push('&');
        url.push_str(key);
        url.push('=');
        url.push_str(&urlencoding::encode(value));
    }

    url
}
