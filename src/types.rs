use serde::{Deserialize, Serialize};

/// A file whose content could not be emitted because reading it failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFailure {
    /// Path relative to the scan root.
    pub path: String,
    /// The underlying error text.
    pub message: String,
}

/// Summary of one completed scan.
///
/// Fatal problems are returned as errors instead; everything recorded here
/// happened while the scan kept going.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    /// Files whose bytes were written to the output.
    pub files_emitted: usize,
    /// Files shown with a skip annotation (binary, private key, symlink).
    pub files_skipped: usize,
    /// Per-file read failures, in traversal order.
    pub failures: Vec<FileFailure>,
    /// Token total of the tree and all emitted content, when counting was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<usize>,
}

impl ScanReport {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}
