// Domain models - Core types and data structures

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

// Chapter timestamps are signed 64-bit milliseconds
const MAX_VIDEO_TIME_MS: f64 = i64::MAX as f64;

/// Correspondence point between match time and video time.
///
/// `period` identifies a match segment (half, overtime period, ...), `clock` is
/// seconds since the start of that period in match time and `video_time` is
/// seconds from the start of the video file. Several anchors may share a period;
/// the later ones mark discontinuities such as a broadcast dropout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Anchor {
    period: u32,
    clock: f64,
    video_time: f64,
}

impl Anchor {
    /// Create a new anchor, rejecting a zero period, negative or non-finite times
    /// and video times whose millisecond value does not fit a chapter timestamp
    pub fn new(period: u32, clock: f64, video_time: f64) -> Result<Self, DomainError> {
        if period == 0 {
            return Err(DomainError::InvalidAnchor(
                "period must be a positive integer".to_string(),
            ));
        }
        if !clock.is_finite() || clock < 0.0 {
            return Err(DomainError::InvalidAnchor(format!(
                "clock must be a non-negative number of seconds, got {}",
                clock
            )));
        }
        if !video_time.is_finite() || video_time < 0.0 {
            return Err(DomainError::InvalidAnchor(format!(
                "video time must be a non-negative number of seconds, got {}",
                video_time
            )));
        }
        if (video_time * 1000.0).round() >= MAX_VIDEO_TIME_MS {
            return Err(DomainError::InvalidAnchor(format!(
                "video time {} is beyond the chapter timestamp range",
                video_time
            )));
        }

        Ok(Self {
            period,
            clock,
            video_time,
        })
    }

    /// Anchor marking the start of a period at the given video time
    pub fn period_start(period: u32, video_time: f64) -> Result<Self, DomainError> {
        Self::new(period, 0.0, video_time)
    }

    pub fn period(&self) -> u32 {
        self.period
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn video_time(&self) -> f64 {
        self.video_time
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "period {} at {:.3}s -> {:.3}s in video",
            self.period, self.clock, self.video_time
        )
    }
}

/// A match-clock range within a single period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipRange {
    pub period: u32,
    pub start_clock: f64,
    pub end_clock: f64,
}

impl ClipRange {
    /// Create a new clip range
    pub fn new(period: u32, start_clock: f64, end_clock: f64) -> Self {
        Self {
            period,
            start_clock,
            end_clock,
        }
    }

    /// Length of the range in match seconds
    pub fn duration(&self) -> f64 {
        self.end_clock - self.start_clock
    }
}

/// A range in the underlying video's timeline, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VideoRange {
    pub start: f64,
    pub end: f64,
}

impl VideoRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Container chapter record as reported by the media backend
#[derive(Debug, Clone, PartialEq)]
pub struct ChapterRecord {
    /// Chapter start, in seconds from the start of the video
    pub start_time: f64,
    /// Chapter title tag (empty when the chapter carries none)
    pub title: String,
}

impl ChapterRecord {
    pub fn new(start_time: f64, title: impl Into<String>) -> Self {
        Self {
            start_time,
            title: title.into(),
        }
    }
}
