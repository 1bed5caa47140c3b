use std::sync::atomic::{AtomicU64, Ordering};

/// A document version tag, that always increments overall like version of a software
///
/// Every accepted change for any document takes a fresh tag from one shared
/// counter, so tags for a single document are strictly increasing. A rebuild
/// result is only kept if its tag is still the newest one requested for
/// its document; completion order does not matter.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct DocumentVersion(pub u64);

/// Source of [`DocumentVersion`] tags
#[derive(Debug, Default)]
pub struct VersionCounter {
    next: AtomicU64,
}

impl VersionCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the next tag, starting at 1
    pub fn next_version(&self) -> DocumentVersion {
        DocumentVersion(self.next.fetch_add(1, Ordering::Relaxed) + 1)
    }
}
