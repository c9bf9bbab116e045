//! Musixmatch integration
//!
//! Uses the desktop app's endpoints with a user token. See [`client`] for the
//! quirks of the API.

pub mod adapter;
mod client;
pub mod dto;
pub mod endpoint;

pub use adapter::TrackMetadataBundle;
pub use client::MusixmatchClient;
