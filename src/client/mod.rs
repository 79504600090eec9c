//! Dashboard side of the system.
//!
//! Talks to the API, derives headline numbers from the summary rows,
//! sorts the table in memory and substitutes demo data whenever the real
//! pipeline cannot produce rows, so a selected pitcher always has a table.

pub mod combine;
pub mod dashboard;
pub mod demo;
pub mod format;
pub mod sort;

pub use combine::derive_headline;
pub use dashboard::{
    ClientError, Dashboard, DataSource, HttpPitchApi, PitchApi, PitcherList, SelectionTicket,
    SummaryFetch, SummaryView, DEMO_ADVISORY,
};
pub use demo::generate_demo;
pub use sort::{sort_summaries, SortDirection, SortState};
