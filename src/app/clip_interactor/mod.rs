// Clip interactor - Orchestrates clip extraction by period and match clock

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::app::anchor_interactor::AnchorInteractor;
use crate::domain::errors::DomainError;
use crate::domain::model::{Anchor, ClipRange, VideoRange};
use crate::domain::rules::TimeResolver;
use crate::error::MatchVideoResult;
use crate::ports::MediaBackend;
use crate::utils::workspace::Workspace;

const SANS_CHAPTERS: &str = "sans-chapters";
const CONCATENATED: &str = "clips";

/// Interactor for clip extraction.
///
/// Every call works inside its own `Workspace`; intermediate files are gone when
/// the call returns, whether it succeeded or not.
pub struct ClipInteractor {
    backend: Arc<dyn MediaBackend>,
    anchors: Arc<AnchorInteractor>,
    temp_root: Option<PathBuf>,
}

impl ClipInteractor {
    /// Create new clip interactor with injected backend
    pub fn new(
        backend: Arc<dyn MediaBackend>,
        anchors: Arc<AnchorInteractor>,
        temp_root: Option<PathBuf>,
    ) -> Self {
        Self {
            backend,
            anchors,
            temp_root,
        }
    }

    /// Extract the clip covering `range` and return its bytes
    pub fn get_clip(&self, video: &Path, range: &ClipRange) -> MatchVideoResult<Vec<u8>> {
        let anchors = self.load_anchors(video)?;
        let times = TimeResolver::resolve(&anchors, range)?;

        info!(
            video = %video.display(),
            period = range.period,
            start_clock = range.start_clock,
            end_clock = range.end_clock,
            "Extracting clip"
        );

        let workspace = Workspace::new(video, self.temp_root.as_deref())?;
        debug!(workspace = %workspace.path().display(), "Created workspace");
        let sans_chapters = self.strip_chapters(video, &workspace)?;

        let clip = workspace.clip_file(0);
        self.extract(&sans_chapters, &clip, &times)?;

        Ok(fs::read(&clip)?)
    }

    /// Extract every range in order and return the clips stitched together.
    ///
    /// All ranges are resolved before any media work starts, so an unresolvable
    /// range fails the call without touching the backend. This differs from
    /// resolving and cutting one range at a time: a bad later range no longer
    /// costs the strip and the earlier cuts. The error returned is the same.
    pub fn get_clips(&self, video: &Path, ranges: &[ClipRange]) -> MatchVideoResult<Vec<u8>> {
        if ranges.is_empty() {
            return Err(DomainError::BadArgs("No clip ranges requested".to_string()).into());
        }

        let anchors = self.load_anchors(video)?;
        let times = TimeResolver::resolve_all(&anchors, ranges)?;

        info!(video = %video.display(), clips = ranges.len(), "Extracting clips");

        let workspace = Workspace::new(video, self.temp_root.as_deref())?;
        debug!(workspace = %workspace.path().display(), "Created workspace");
        let sans_chapters = self.strip_chapters(video, &workspace)?;

        let mut clips = Vec::with_capacity(times.len());
        for (index, video_range) in times.iter().enumerate() {
            let clip = workspace.clip_file(index);
            self.extract(&sans_chapters, &clip, video_range)?;
            clips.push(clip);
        }

        let output = workspace.media_file(CONCATENATED);
        debug!(inputs = clips.len(), output = %output.display(), "Concatenating clips");
        self.backend.concat(&clips, &output)?;

        Ok(fs::read(&output)?)
    }

    fn load_anchors(&self, video: &Path) -> MatchVideoResult<Vec<Anchor>> {
        let anchors = self.anchors.read_anchors(video)?;
        if anchors.is_empty() {
            return Err(DomainError::NoAnchorsSet {
                video: video.display().to_string(),
            }
            .into());
        }
        Ok(anchors)
    }

    // Stream-copy cuts are unreliable while the input still carries chapters
    fn strip_chapters(&self, video: &Path, workspace: &Workspace) -> MatchVideoResult<PathBuf> {
        let output = workspace.media_file(SANS_CHAPTERS);
        debug!(output = %output.display(), "Stripping chapters");
        self.backend.strip_chapters(video, &output)?;
        Ok(output)
    }

    fn extract(&self, input: &Path, output: &Path, times: &VideoRange) -> MatchVideoResult<()> {
        debug!(
            start = times.start,
            end = times.end,
            duration = times.duration(),
            output = %output.display(),
            "Cutting range"
        );
        self.backend.cut_range(input, output, times.start, times.end)
    }
}
