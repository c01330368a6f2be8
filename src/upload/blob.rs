//! Transient object URLs
//!
//! Previews reference file contents through `blob:` URLs handed out by a
//! [`BlobRegistry`]. A URL stays resolvable until it is revoked, so callers
//! that replace a preview must revoke the old URL or the registry grows
//! with every selection.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

const URL_PREFIX: &str = "blob:allview/";

/// Opaque reference to bytes held by a [`BlobRegistry`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ObjectUrl(String);

impl ObjectUrl {
    /// URL as a string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Owner of every live object URL of a session
#[derive(Debug, Default)]
pub struct BlobRegistry {
    next_id: u64,
    entries: HashMap<ObjectUrl, Arc<[u8]>>,
}

impl BlobRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register bytes and return a fresh URL for them
    pub fn create(&mut self, bytes: Arc<[u8]>) -> ObjectUrl {
        self.next_id += 1;
        let url = ObjectUrl(format!("{URL_PREFIX}{}", self.next_id));
        self.entries.insert(url.clone(), bytes);
        url
    }

    /// Look up the bytes behind a URL
    #[must_use]
    pub fn resolve(&self, url: &ObjectUrl) -> Option<&[u8]> {
        self.entries.get(url).map(AsRef::as_ref)
    }

    /// Release a URL
    ///
    /// Returns `false` if the URL was unknown or already revoked.
    pub fn revoke(&mut self, url: &ObjectUrl) -> bool {
        self.entries.remove(url).is_some()
    }

    /// Number of URLs not yet revoked
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_resolve() {
        let mut registry = BlobRegistry::new();
        let url = registry.create(Arc::from(&b"payload"[..]));

        assert!(url.as_str().starts_with("blob:"));
        assert_eq!(registry.resolve(&url), Some(&b"payload"[..]));
    }

    #[test]
    fn test_urls_are_unique() {
        let mut registry = BlobRegistry::new();
        let bytes: Arc<[u8]> = Arc::from(&b"same"[..]);
        let a = registry.create(Arc::clone(&bytes));
        let b = registry.create(bytes);

        assert_ne!(a, b);
        assert_eq!(registry.live_count(), 2);
    }

    #[test]
    fn test_revoke() {
        let mut registry = BlobRegistry::new();
        let url = registry.create(Arc::from(&b"x"[..]));

        assert!(registry.revoke(&url));
        assert!(!registry.revoke(&url));
        assert!(registry.resolve(&url).is_none());
        assert_eq!(registry.live_count(), 0);
    }
}
