//! Lyrics lookup - fetches lyrics from Musixmatch and normalizes them for display.
//!
//! # Architecture
//!
//! This module follows a clean separation between:
//! - **Domain models** (`domain.rs`) - The line, karaoke and translation records the UI consumes
//! - **API DTOs** (`musixmatch/dto.rs`) - Exact API response shapes
//! - **Adapter** (`musixmatch/adapter.rs`) - Converts DTOs to domain models
//! - **Client** (`musixmatch/client.rs`) - One method per provider operation
//! - **Transport** (`traits.rs`) - The HTTP seam, mockable in tests
//! - **Cache** (`cache.rs`) - The language table, fetched once and shared
//! - **Service** (`service.rs`) - Runs the whole chain for one track
//!
//! Missing data is never an error: extractors return `None` when the provider
//! has nothing to offer. Only the initial lookup can fail, with a
//! [`LookupFailure`] meant to be shown to the user as-is.
//!
//! # Usage
//!
//! ```ignore
//! use lyrics_minder::lyrics::{LyricsService, LyricsConfig, TrackQuery};
//!
//! let service = LyricsService::new(LyricsConfig {
//!     token: "your-usertoken".to_string(),
//!     ..Default::default()
//! })?;
//!
//! match service.lookup(&query).await {
//!     Ok(lyrics) => println!("{} synced lines", lyrics.synced.map_or(0, |l| l.len())),
//!     Err(failure) => println!("{}", failure.error),
//! }
//! ```

pub mod cache;
pub mod domain;
pub mod musixmatch;
pub mod service;
pub mod traits;

pub use cache::LanguageCache;
pub use domain::{
    CrowdTranslationTask, FailureReason, KaraokeLine, KaraokeWord, LanguageEntry, LookupFailure,
    LyricLine, LyricsError, StartTime, TrackQuery, TranslatedLyrics,
};
pub use musixmatch::{MusixmatchClient, TrackMetadataBundle};
pub use service::{Lyrics, LyricsConfig, LyricsService};
pub use traits::{HttpTransport, Transport};
