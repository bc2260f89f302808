// Domain layer - Anchors, the anchor codec and time resolution

pub mod codec;
pub mod errors;
pub mod model;
pub mod rules;
