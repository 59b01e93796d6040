use semantic::DocumentVersion;
use thiserror::Error;

/// The tree a derivation was reading has been modified underneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("document changed during completion (read at version {expected}, now at {actual})")]
pub struct Canceled {
    pub expected: u64,
    pub actual: u64,
}

/// Read scope for one completion request.
///
/// Holds the document version the tree was taken at; every stage calls
/// [`ReadScope::check`] before touching the tree again.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ReadScope<'a> {
    version: &'a DocumentVersion,
    stamp: u64,
}

impl<'a> ReadScope<'a> {
    pub(crate) fn new(version: &'a DocumentVersion, stamp: u64) -> Self {
        Self { version, stamp }
    }

    pub(crate) fn check(&self) -> Result<(), Canceled> {
        let actual = self.version.current();
        if actual == self.stamp {
            Ok(())
        } else {
            Err(Canceled {
                expected: self.stamp,
                actual,
            })
        }
    }
}
