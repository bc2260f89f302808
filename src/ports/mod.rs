// Ports - Interface definitions (contracts)

use std::path::{Path, PathBuf};

use crate::domain::model::ChapterRecord;
use crate::error::MatchVideoResult;

/// Result of probing a video's container metadata
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProbeReport {
    /// Chapter records in container order
    pub chapters: Vec<ChapterRecord>,
    /// Error reported by the backend, if the probe did not succeed
    pub error: Option<String>,
}

/// Port for the external media tool.
///
/// Every call blocks until the backend has finished. Implementations stream-copy
/// and never re-encode.
pub trait MediaBackend: Send + Sync {
    /// Read container metadata, including chapter records
    fn probe(&self, video: &Path) -> MatchVideoResult<ProbeReport>;

    /// Dump the full container metadata in the backend's text format
    fn extract_metadata_text(&self, video: &Path) -> MatchVideoResult<String>;

    /// Copy `input` to `output` replacing its container metadata with `metadata`.
    ///
    /// `output` must not be the same file as `input`.
    fn rewrite_with_metadata(&self, input: &Path, metadata: &str, output: &Path)
        -> MatchVideoResult<()>;

    /// Copy `input` to `output` without chapter records
    fn strip_chapters(&self, input: &Path, output: &Path) -> MatchVideoResult<()>;

    /// Copy the `[start, end]` seconds of `input` to `output`
    fn cut_range(&self, input: &Path, output: &Path, start: f64, end: f64)
        -> MatchVideoResult<()>;

    /// Concatenate `inputs` in order into `output`; inputs must share codec parameters
    fn concat(&self, inputs: &[PathBuf], output: &Path) -> MatchVideoResult<()>;
}
