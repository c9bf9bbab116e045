//! Lyrics Minder - fetch and normalize Musixmatch lyrics for a player UI.
//!
//! Given a track's title, artist, album and duration, [`lyrics::LyricsService`]
//! returns whatever the provider has: word-timed karaoke lines, line-synced
//! lyrics, plain lyrics and completed crowd translations aligned to the
//! original lines.
//!
//! Ambient pieces:
//! - [`config`] - TOML config file plus `MUSIXMATCH_USERTOKEN` override
//! - [`error`] - crate-wide error aggregation
//! - [`logging`] - optional tracing subscriber setup

pub mod config;
pub mod error;
pub mod logging;
pub mod lyrics;

#[cfg(test)]
pub mod test_utils;
