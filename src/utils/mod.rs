//! Common utilities and helpers

pub mod time;
pub mod workspace;
