// Anchor interactor - Reads and writes the anchors stored in a video

use std::fs;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::codec::AnchorCodec;
use crate::domain::model::Anchor;
use crate::error::{MatchVideoError, MatchVideoResult};
use crate::ports::MediaBackend;

/// Interactor for anchor persistence
pub struct AnchorInteractor {
    backend: Arc<dyn MediaBackend>,
}

impl AnchorInteractor {
    /// Create new anchor interactor with injected backend
    pub fn new(backend: Arc<dyn MediaBackend>) -> Self {
        Self { backend }
    }

    /// Read the anchors stored in `video`'s chapter metadata, in stored order
    pub fn read_anchors(&self, video: &Path) -> MatchVideoResult<Vec<Anchor>> {
        let report = self.backend.probe(video)?;

        if let Some(message) = report.error {
            return Err(MatchVideoError::MetadataRead {
                path: video.to_path_buf(),
                message,
            });
        }

        let anchors = AnchorCodec::read(&report.chapters)?;
        debug!(video = %video.display(), count = anchors.len(), "Read anchors");
        for anchor in &anchors {
            debug!(%anchor, "Anchor");
        }
        Ok(anchors)
    }

    /// Write `anchors` into the metadata of `input`, saving the result to `output`.
    ///
    /// Any anchors already present are replaced. `output` may be `input` itself,
    /// in which case the video is rewritten next to it and renamed over it.
    pub fn write_anchors(
        &self,
        input: &Path,
        output: &Path,
        anchors: &[Anchor],
    ) -> MatchVideoResult<()> {
        let existing = self.backend.extract_metadata_text(input)?;

        match AnchorCodec::chapters_from_metadata(&existing) {
            Ok(chapters) if !chapters.is_empty() => {
                info!(count = chapters.len(), "Replacing existing chapters")
            }
            Ok(_) => {}
            Err(e) => debug!(error = %e, "Existing chapter metadata not readable"),
        }

        let updated = AnchorCodec::write(anchors, &existing);

        if is_same_file(input, output)? {
            self.rewrite_in_place(input, &updated)?;
        } else {
            self.backend.rewrite_with_metadata(input, &updated, output)?;
        }

        info!(
            input = %input.display(),
            output = %output.display(),
            count = anchors.len(),
            "Wrote anchors"
        );
        Ok(())
    }

    /// Replace the anchors of `input` with the start of each half.
    ///
    /// Writes to `output`, or back to `input` when no output is given.
    pub fn set_half_starts(
        &self,
        input: &Path,
        output: Option<&Path>,
        first_half_start: f64,
        second_half_start: f64,
    ) -> MatchVideoResult<Vec<Anchor>> {
        let anchors = vec![
            Anchor::period_start(1, first_half_start)?,
            Anchor::period_start(2, second_half_start)?,
        ];

        self.write_anchors(input, output.unwrap_or(input), &anchors)?;
        Ok(anchors)
    }

    // The backend cannot write over its own input: rewrite into a sibling
    // temp file and rename it over the original.
    fn rewrite_in_place(&self, video: &Path, metadata: &str) -> MatchVideoResult<()> {
        let parent = match video.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let suffix = video
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();

        let intermediate = tempfile::Builder::new()
            .prefix(".match-video-")
            .suffix(&suffix)
            .tempfile_in(parent)?;
        debug!(intermediate = %intermediate.path().display(), "Rewriting through intermediate file");

        self.backend
            .rewrite_with_metadata(video, metadata, intermediate.path())?;
        intermediate
            .persist(video)
            .map_err(|e| MatchVideoError::Io(e.error))?;

        Ok(())
    }
}

fn is_same_file(input: &Path, output: &Path) -> MatchVideoResult<bool> {
    if !output.exists() {
        return Ok(false);
    }
    Ok(fs::canonicalize(input)? == fs::canonicalize(output)?)
}
