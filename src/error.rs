//! Crate-wide error types.
//!
//! Module-level code uses specific error types via `thiserror`
//! ([`LyricsError`], [`ConfigError`]); this module aggregates them for
//! hosts that want one error type.
//!
//! # Design
//!
//! - [`Error`] wraps each module error through `#[from]`, so `?` just works
//! - [`LookupFailure`] converts too, for hosts that treat a failed lookup as an error
//!
//! # Example
//!
//! ```ignore
//! use lyrics_minder::error::{Result, ResultExt};
//!
//! fn start() -> Result<LyricsService> {
//!     let config = config::load();
//!     LyricsService::from_config(&config).with_context("starting lyrics service")
//! }
//! ```

use crate::config::ConfigError;
use crate::lyrics::{LookupFailure, LyricsError};

pub type Result<T> = std::result::Result<T, Error>;

/// Any failure this crate can report.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Talking to the provider failed
    #[error("Lyrics provider: {0}")]
    Lyrics(#[from] LyricsError),

    /// Lookup rejected by the provider
    #[error("Lookup failed for {}: {}", .0.uri, .0.error)]
    Lookup(#[from] LookupFailure),

    #[error("Settings: {0}")]
    Config(#[from] ConfigError),

    /// Another error, with a note on what was being attempted
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Wrap with a description of the failed operation
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}

/// Attach a description of what was being attempted to any failure
/// that converts into [`Error`].
pub trait ResultExt<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::context(e.into(), ctx))
    }
}
