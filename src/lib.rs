//! match-video library
//!
//! Maps match time (period + seconds since the period started) to positions in
//! a broadcast video and extracts clips accordingly.
//!
//! A video carries a sparse list of [`Anchor`]s, stored as chapters in its own
//! container metadata. Each anchor pins a match clock in a period to a video
//! time; extra anchors within a period mark discontinuities such as a broadcast
//! dropout. Clips are located by linear offset from the last anchor at or before
//! the requested start.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use match_video::{AppContainer, ClipRange, Config};
//!
//! let container = AppContainer::new(&Config::default())?;
//! let video = Path::new("broadcast.mp4");
//!
//! container
//!     .anchor_interactor()
//!     .set_half_starts(video, None, 35.0, 3710.0)?;
//!
//! let kickoff = container
//!     .clip_interactor()
//!     .get_clip(video, &ClipRange::new(1, 0.0, 60.0))?;
//! std::fs::write("kickoff.mp4", kickoff)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod adapters;
pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use adapters::{Config, ConfigOverrides, FfmpegBackend, LogFormat};
pub use app::{AnchorInteractor, AppContainer, ClipInteractor};
pub use domain::codec::AnchorCodec;
pub use domain::errors::DomainError;
pub use domain::model::{Anchor, ChapterRecord, ClipRange, VideoRange};
pub use domain::rules::TimeResolver;
pub use error::{MatchVideoError, MatchVideoResult};
pub use ports::{MediaBackend, ProbeReport};
