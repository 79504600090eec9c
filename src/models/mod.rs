//! Core data models for the pitch dashboard.

mod ids;
mod pitch;
mod pitcher;
mod summary;

pub use ids::*;
pub use pitch::*;
pub use pitcher::*;
pub use summary::*;
