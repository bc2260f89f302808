// Domain rules - Match clock to video time resolution

use tracing::warn;

use crate::domain::errors::*;
use crate::domain::model::*;

/// Resolves match-clock ranges to video-time ranges from a set of anchors
pub struct TimeResolver;

impl TimeResolver {
    /// Map `range` onto the video timeline.
    ///
    /// The start is located by linear offset from the last anchor in the period
    /// whose clock is at or before `range.start_clock`; the end is the start plus
    /// the range duration. Clocks past the last anchor extrapolate, and no check
    /// is made against the video's length.
    ///
    /// An anchor falling strictly inside the range is *not* taken into account
    /// for the end, so a range spanning a discontinuity resolves to the wrong end
    /// time. This is logged as a warning rather than corrected.
    pub fn resolve(anchors: &[Anchor], range: &ClipRange) -> Result<VideoRange, DomainError> {
        let last_anchor = Self::last_anchor_at_or_before(anchors, range.period, range.start_clock)
            .ok_or(DomainError::NoAnchorBeforeTime {
                period: range.period,
                clock: range.start_clock,
            })?;

        let start_offset = range.start_clock - last_anchor.clock();
        let start = last_anchor.video_time() + start_offset;
        let end = start + range.duration();

        if let Some(inner) = Self::first_anchor_inside(anchors, range) {
            warn!(
                period = range.period,
                start_clock = range.start_clock,
                end_clock = range.end_clock,
                discontinuity_clock = inner.clock(),
                "Clip range spans a discontinuity anchor; end time is extrapolated from the start anchor"
            );
        }

        Ok(VideoRange::new(start, end))
    }

    /// Resolve each range in order, failing on the first unresolvable one
    pub fn resolve_all(
        anchors: &[Anchor],
        ranges: &[ClipRange],
    ) -> Result<Vec<VideoRange>, DomainError> {
        ranges
            .iter()
            .map(|range| Self::resolve(anchors, range))
            .collect()
    }

    /// The anchor with the greatest clock at or before `clock` within `period`
    fn last_anchor_at_or_before(anchors: &[Anchor], period: u32, clock: f64) -> Option<&Anchor> {
        anchors
            .iter()
            .filter(|anchor| anchor.period() == period && anchor.clock() <= clock)
            .max_by(|a, b| a.clock().total_cmp(&b.clock()))
    }

    fn first_anchor_inside<'a>(anchors: &'a [Anchor], range: &ClipRange) -> Option<&'a Anchor> {
        anchors.iter().find(|anchor| {
            anchor.period() == range.period
                && anchor.clock() > range.start_clock
                && anchor.clock() < range.end_clock
        })
    }
}
