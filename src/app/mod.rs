// Application layer - Use case interactors

pub mod anchor_interactor;
pub mod clip_interactor;
pub mod container;

// Re-export interactors
pub use anchor_interactor::AnchorInteractor;
pub use clip_interactor::ClipInteractor;
pub use container::AppContainer;
