//! In-memory language table cache.
//!
//! The provider's language list never changes while we run, so it is fetched once
//! and kept. A failed fetch stores nothing and the next lookup tries again.
//! There's no expiry and no invalidation.
//!
//! The cache is an ordinary value: share it with `Arc` between clients that should
//! see the same table. Concurrent first lookups may each fetch and store; the last
//! store wins, which is harmless because the table is the same every time.

use std::sync::Arc;

use parking_lot::RwLock;

use super::domain::LanguageEntry;

/// Language table, populated by the first successful fetch
#[derive(Debug, Default)]
pub struct LanguageCache {
    languages: RwLock<Option<Arc<[LanguageEntry]>>>,
}

impl LanguageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached table, if a fetch has succeeded
    pub fn get(&self) -> Option<Arc<[LanguageEntry]>> {
        self.languages.read().clone()
    }

    /// Store a successfully fetched table and return the shared copy
    pub fn store(&self, languages: Vec<LanguageEntry>) -> Arc<[LanguageEntry]> {
        let languages: Arc<[LanguageEntry]> = languages.into();
        *self.languages.write() = Some(Arc::clone(&languages));
        languages
    }

    pub fn is_populated(&self) -> bool {
        self.languages.read().is_some()
    }
}
