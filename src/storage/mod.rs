//! Read-only access to the pitch store.
//!
//! The store holds two tables:
//! - `players`: `player_id`, `name_use`, `name_last`
//! - `pitches`: one row per pitched ball, keyed to `players` by `pitcher_id`
//!
//! Everything above this module talks to a [`PitchStore`] handle that is
//! constructed once at startup and injected through the API state.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::{Pitcher, PitchTypeSummary};

/// Errors that can occur while reading the pitch store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Data source unavailable: {0}")]
    Unavailable(String),
}

/// A sample row from the `pitches` table, column name to value.
pub type SampleRow = Map<String, Value>;

/// Read-only queries against the pitch store.
///
/// All identifier and name arguments are bound as query parameters.
pub trait PitchStore: Send + Sync {
    /// Cheap round trip to check the store is reachable.
    fn ping(&self) -> Result<(), StorageError>;

    /// Look up a pitcher by exact `player_id`.
    fn pitcher_by_id(&self, id: i64) -> Result<Option<Pitcher>, StorageError>;

    /// Look up a pitcher by exact, case-sensitive display name.
    fn pitcher_by_name(&self, name: &str) -> Result<Option<Pitcher>, StorageError>;

    /// Pitchers whose display name is in `names` and who have at least one pitch,
    /// ordered by name.
    fn roster_pitchers(&self, names: &[String]) -> Result<Vec<Pitcher>, StorageError>;

    /// Per-pitch-type summary for one pitcher, ordered by count descending.
    fn pitch_summary(&self, pitcher_id: i64) -> Result<Vec<PitchTypeSummary>, StorageError>;

    /// Names of the tables in the store.
    fn table_names(&self) -> Result<Vec<String>, StorageError>;

    /// Column names of `table`, in declaration order.
    fn column_names(&self, table: &str) -> Result<Vec<String>, StorageError>;

    /// The first `limit` rows of `pitches`.
    fn sample_pitches(&self, limit: usize) -> Result<Vec<SampleRow>, StorageError>;

    /// Distinct pitch type labels present in `pitches`.
    fn pitch_types(&self) -> Result<Vec<String>, StorageError>;
}

/// Column layout of the `players` table.
pub const PLAYER_COLUMNS: [&str; 3] = ["player_id", "name_use", "name_last"];

/// Column layout of the `pitches` table.
pub const PITCH_COLUMNS: [&str; 9] = [
    "pitch_id",
    "pitcher_id",
    "pitch_type",
    "release_speed",
    "horizontal_break",
    "induced_vertical_break",
    "spin_rate",
    "hit_exit_speed",
    "hit_launch_angle",
];

#[cfg(test)]
pub(crate) mod fixtures {
    //! SQLite fixtures shared by store and API tests.

    use std::path::Path;

    use rusqlite::{params, Connection};

    use crate::models::{PitchEvent, Pitcher};

    /// Split a display name at its first space into `(name_use, name_last)`.
    fn split_name(name: &str) -> (&str, &str) {
        name.split_once(' ').unwrap_or((name, ""))
    }

    /// Write a fresh pitch database at `path`.
    pub fn write_sqlite(path: &Path, pitchers: &[Pitcher], events: &[PitchEvent]) {
        let conn = Connection::open(path).unwrap();
        conn.execute_batch(
            "CREATE TABLE players (
                player_id INTEGER PRIMARY KEY,
                name_use TEXT NOT NULL,
                name_last TEXT NOT NULL
             );
             CREATE TABLE pitches (
                pitch_id INTEGER PRIMARY KEY,
                pitcher_id INTEGER NOT NULL REFERENCES players(player_id),
                pitch_type TEXT NOT NULL,
                release_speed REAL NOT NULL,
                horizontal_break REAL NOT NULL,
                induced_vertical_break REAL NOT NULL,
                spin_rate REAL NOT NULL,
                hit_exit_speed REAL,
                hit_launch_angle REAL
             );",
        )
        .unwrap();

        for p in pitchers {
            let (name_use, name_last) = split_name(&p.name);
            conn.execute(
                "INSERT INTO players (player_id, name_use, name_last) VALUES (?1, ?2, ?3)",
                params![p.id, name_use, name_last],
            )
            .unwrap();
        }

        for e in events {
            conn.execute(
                "INSERT INTO pitches (pitcher_id, pitch_type, release_speed, horizontal_break,
                    induced_vertical_break, spin_rate, hit_exit_speed, hit_launch_angle)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    e.pitcher_id,
                    e.pitch_type,
                    e.release_speed,
                    e.horizontal_break,
                    e.induced_vertical_break,
                    e.spin_rate,
                    e.hit_exit_speed,
                    e.hit_launch_angle
                ],
            )
            .unwrap();
        }
    }

    /// Logan Webb (id 657277): 300 fastballs averaging 95.0 and 100 sliders at 85.0,
    /// some of them put in play. Carlos Rodón (id 607074) exists with no pitches.
    pub fn webb_dataset() -> (Vec<Pitcher>, Vec<PitchEvent>) {
        let pitchers = vec![
            Pitcher::new(657277, "Logan Webb"),
            Pitcher::new(607074, "Carlos Rodón"),
            Pitcher::new(111111, "Not Rostered"),
        ];
        let mut events = Vec::new();
        for i in 0..300 {
            let speed = if i % 2 == 0 { 94.5 } else { 95.5 };
            let mut e = PitchEvent::new(657277, "Fastball", speed, -9.0, 15.0, 2250.0);
            if i % 10 == 0 {
                e = e.with_contact(98.0, 12.0);
            }
            events.push(e);
        }
        for _ in 0..100 {
            events.push(PitchEvent::new(657277, "Slider", 85.0, 6.5, 0.5, 2550.0));
        }
        events.push(PitchEvent::new(111111, "Changeup", 83.0, -13.0, 5.0, 1700.0));
        (pitchers, events)
    }
}
