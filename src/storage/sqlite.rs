//! SQLite-backed pitch store.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::types::ValueRef;
use rusqlite::{params, params_from_iter, Connection, OpenFlags, Row};
use serde_json::{Number, Value};
use tracing::{debug, info};

use super::{PitchStore, SampleRow, StorageError};
use crate::models::{Pitcher, PitchTypeSummary};

/// Grouped summary for one pitcher in a single pass.
///
/// `SUM(COUNT(*)) OVER ()` is the pitcher's total across all groups, so the
/// usage share needs no second query. `AVG` skips NULLs, which keeps the
/// batted-ball averages restricted to pitches put in play and NULL when none were.
const SUMMARY_SQL: &str = "
    SELECT
        pitch_type,
        COUNT(*) AS pitch_count,
        ROUND(COUNT(*) * 100.0 / SUM(COUNT(*)) OVER (), 2) AS usage_percentage,
        ROUND(AVG(release_speed), 2) AS avg_speed,
        ROUND(AVG(horizontal_break), 2) AS avg_horizontal_break,
        ROUND(AVG(induced_vertical_break), 2) AS avg_induced_vertical_break,
        ROUND(AVG(spin_rate), 2) AS avg_spin_rate,
        ROUND(AVG(hit_exit_speed), 2) AS avg_exit_speed,
        ROUND(AVG(hit_launch_angle), 2) AS avg_launch_angle
    FROM pitches
    WHERE pitcher_id = ?1
    GROUP BY pitch_type
    ORDER BY pitch_count DESC, MIN(rowid) ASC";

const PLAYER_SQL: &str = "player_id, name_use, name_last";

/// Must stay in step with [`Pitcher::display_name`].
const DISPLAY_NAME_SQL: &str = "name_use || ' ' || name_last";

/// Read-only SQLite pitch store.
///
/// A single connection guarded by a mutex; requests query it one at a time.
/// The connection is closed when the store is dropped.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open an existing database read-only. Fails if the file is missing.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(StorageError::Unavailable(format!(
                "database file not found: {}",
                path.display()
            )));
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        conn.execute_batch("PRAGMA query_only = ON")?;

        info!("Opened pitch store at {}", path.display());
        Ok(Self::from_connection(conn))
    }

    /// Wrap an already-open connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn
            .lock()
            .map_err(|_| StorageError::Unavailable("connection lock poisoned".to_string()))
    }

    /// Expects `player_id, name_use, name_last` in that order.
    fn pitcher_from_row(row: &Row<'_>) -> rusqlite::Result<Pitcher> {
        let name_use: String = row.get(1)?;
        let name_last: String = row.get(2)?;
        Ok(Pitcher::new(
            row.get(0)?,
            Pitcher::display_name(&name_use, &name_last),
        ))
    }

    fn summary_from_row(row: &Row<'_>) -> rusqlite::Result<PitchTypeSummary> {
        Ok(PitchTypeSummary {
            pitch_type: row.get(0)?,
            count: row.get(1)?,
            usage_percentage: row.get(2)?,
            avg_speed: row.get(3)?,
            avg_horizontal_break: row.get(4)?,
            avg_induced_vertical_break: row.get(5)?,
            avg_spin_rate: row.get(6)?,
            avg_exit_speed: row.get(7)?,
            avg_launch_angle: row.get(8)?,
        })
    }
}

fn value_to_json(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
        ValueRef::Text(t) => Value::String(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => Value::String(format!("<{} bytes>", b.len())),
    }
}

impl PitchStore for SqliteStore {
    fn ping(&self) -> Result<(), StorageError> {
        let conn = self.conn()?;
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
        Ok(())
    }

    fn pitcher_by_id(&self, id: i64) -> Result<Option<Pitcher>, StorageError> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {} FROM players WHERE player_id = ?1 LIMIT 1",
            PLAYER_SQL
        );
        let mut stmt = conn.prepare(&sql)?;
        let mut rows = stmt.query_map(params![id], Self::pitcher_from_row)?;
        Ok(rows.next().transpose()?)
    }

    fn pitcher_by_name(&self, name: &str) -> Result<Option<Pitcher>, StorageError> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {} FROM players WHERE {} = ?1 ORDER BY player_id LIMIT 1",
            PLAYER_SQL, DISPLAY_NAME_SQL
        );
        let mut stmt = conn.prepare(&sql)?;
        let mut rows = stmt.query_map(params![name], Self::pitcher_from_row)?;
        Ok(rows.next().transpose()?)
    }

    fn roster_pitchers(&self, names: &[String]) -> Result<Vec<Pitcher>, StorageError> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; names.len()].join(",");
        let sql = format!(
            "SELECT {0} FROM players
             WHERE player_id IN (SELECT pitcher_id FROM pitches)
               AND {1} IN ({2})
             ORDER BY {1}",
            PLAYER_SQL, DISPLAY_NAME_SQL, placeholders
        );

        let conn = self.conn()?;
        let mut stmt = conn.prepare(&sql)?;
        let pitchers = stmt
            .query_map(params_from_iter(names.iter()), Self::pitcher_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        debug!("Matched {} of {} roster names", pitchers.len(), names.len());
        Ok(pitchers)
    }

    fn pitch_summary(&self, pitcher_id: i64) -> Result<Vec<PitchTypeSummary>, StorageError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(SUMMARY_SQL)?;
        let rows = stmt
            .query_map(params![pitcher_id], Self::summary_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn table_names(&self) -> Result<Vec<String>, StorageError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type = 'table'")?;
        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(names)
    }

    fn column_names(&self, table: &str) -> Result<Vec<String>, StorageError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1) ORDER BY cid")?;
        let names = stmt
            .query_map(params![table], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(names)
    }

    fn sample_pitches(&self, limit: usize) -> Result<Vec<SampleRow>, StorageError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT * FROM pitches LIMIT ?1")?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

        let mut rows = stmt.query(params![limit as i64])?;
        let mut samples = Vec::new();
        while let Some(row) = rows.next()? {
            let mut sample = SampleRow::new();
            for (i, column) in columns.iter().enumerate() {
                sample.insert(column.clone(), value_to_json(row.get_ref(i)?));
            }
            samples.push(sample);
        }
        Ok(samples)
    }

    fn pitch_types(&self) -> Result<Vec<String>, StorageError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT DISTINCT pitch_type FROM pitches")?;
        let types = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(types)
    }
}
