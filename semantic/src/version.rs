use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Modification counter shared between a document and readers of its tree.
///
/// Writers bump it after every structural change; a reader that captured an
/// older value knows its tree is stale.
#[derive(Debug, Clone, Default)]
pub struct DocumentVersion(Arc<AtomicU64>);

impl DocumentVersion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> u64 {
        self.0.load(Ordering::Acquire)
    }

    /// Records a modification and returns the new version.
    pub fn bump(&self) -> u64 {
        self.0.fetch_add(1, Ordering::AcqRel) + 1
    }
}
