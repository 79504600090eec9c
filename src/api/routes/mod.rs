//! Route handlers, grouped by resource.

pub mod pitchers;
pub mod system;
