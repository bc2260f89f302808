use std::path::PathBuf;
use std::sync::Arc;

use crate::adapters::{Config, FfmpegBackend};
use crate::app::{anchor_interactor::AnchorInteractor, clip_interactor::ClipInteractor};
use crate::error::MatchVideoResult;
use crate::ports::MediaBackend;

/// Wires the interactors to a media backend
pub struct AppContainer {
    anchor_interactor: Arc<AnchorInteractor>,
    clip_interactor: Arc<ClipInteractor>,
}

impl AppContainer {
    /// Build the container around the ffmpeg backend described by `config`
    pub fn new(config: &Config) -> MatchVideoResult<Self> {
        let backend = Arc::new(FfmpegBackend::new(config)?);
        Ok(Self::with_backend(backend, config.temp_dir.clone()))
    }

    /// Build the container around any backend
    pub fn with_backend(backend: Arc<dyn MediaBackend>, temp_root: Option<PathBuf>) -> Self {
        let anchor_interactor = Arc::new(AnchorInteractor::new(Arc::clone(&backend)));
        let clip_interactor = Arc::new(ClipInteractor::new(
            backend,
            Arc::clone(&anchor_interactor),
            temp_root,
        ));

        Self {
            anchor_interactor,
            clip_interactor,
        }
    }

    pub fn anchor_interactor(&self) -> Arc<AnchorInteractor> {
        Arc::clone(&self.anchor_interactor)
    }

    pub fn clip_interactor(&self) -> Arc<ClipInteractor> {
        Arc::clone(&self.clip_interactor)
    }
}
