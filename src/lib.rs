//! # Pitch Dashboard
//!
//! Per-pitcher, per-pitch-type statistics over a read-only SQLite pitch store.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (pitch events, pitchers, summaries)
//! - **calculate**: In-process aggregation of pitch events into summaries
//! - **storage**: The injected pitch store handle (SQLite, in-memory)
//! - **resolve**: Pitcher token resolution (id, then display name)
//! - **roster**: The fixed pitcher allow-list
//! - **api**: REST API endpoints
//! - **client**: Dashboard logic: headline stats, sorting, demo fallback
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod client;
pub mod config;
pub mod models;
pub mod resolve;
pub mod roster;
pub mod storage;

pub use models::*;
