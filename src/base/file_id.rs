//! File identifiers.

/// Identifier of a document loaded into an [`AnalysisHost`](crate::ide::AnalysisHost).
///
/// Ids are handed out by the host and never reused while the host lives,
/// so a stale id simply fails to resolve instead of pointing at another file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileId(u32);

impl FileId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn index(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for FileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "file#{}", self.0)
    }
}
