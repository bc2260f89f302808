//! Scoped working directory for intermediate media files

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::MatchVideoResult;

const DEFAULT_EXTENSION: &str = "mp4";

/// Temporary directory holding every intermediate artifact of one operation.
///
/// Artifacts carry the source video's extension so the backend picks the same
/// container. Dropping the workspace removes the directory and everything in it.
pub struct Workspace {
    temp_dir: TempDir,
    extension: String,
}

impl Workspace {
    /// Create a workspace for processing `source`, under `root` or the system temp dir
    pub fn new(source: &Path, root: Option<&Path>) -> MatchVideoResult<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("match-video-");
        let temp_dir = match root {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };

        let extension = source
            .extension()
            .map(|ext| ext.to_string_lossy().to_string())
            .filter(|ext| !ext.is_empty())
            .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());

        Ok(Self {
            temp_dir,
            extension,
        })
    }

    /// Get the workspace directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Path for a media artifact named `stem`
    pub fn media_file(&self, stem: &str) -> PathBuf {
        self.temp_dir
            .path()
            .join(format!("{}.{}", stem, self.extension))
    }

    /// Path for the `index`-th extracted clip
    pub fn clip_file(&self, index: usize) -> PathBuf {
        self.media_file(&format!("clip-{:04}", index))
    }
}
