//! In-memory pitch store.
//!
//! Backs tests and offline runs with the same contract as [`super::SqliteStore`].
//! Aggregation goes through [`crate::calculate`] instead of SQL.

use std::collections::HashSet;

use serde_json::Value;

use super::{PitchStore, SampleRow, StorageError, PITCH_COLUMNS, PLAYER_COLUMNS};
use crate::calculate::summarize_pitcher;
use crate::models::{PitchEvent, Pitcher, PitchTypeSummary};

/// Pitch store held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pitchers: Vec<Pitcher>,
    events: Vec<PitchEvent>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn new(pitchers: Vec<Pitcher>, events: Vec<PitchEvent>) -> Self {
        Self {
            pitchers,
            events,
            unavailable: false,
        }
    }

    /// A store whose every query fails, as if the database were unreachable.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Default::default()
        }
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.unavailable {
            Err(StorageError::Unavailable(
                "in-memory store marked unavailable".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

impl PitchStore for MemoryStore {
    fn ping(&self) -> Result<(), StorageError> {
        self.check()
    }

    fn pitcher_by_id(&self, id: i64) -> Result<Option<Pitcher>, StorageError> {
        self.check()?;
        Ok(self.pitchers.iter().find(|p| p.id == id).cloned())
    }

    fn pitcher_by_name(&self, name: &str) -> Result<Option<Pitcher>, StorageError> {
        self.check()?;
        Ok(self
            .pitchers
            .iter()
            .filter(|p| p.name == name)
            .min_by_key(|p| p.id)
            .cloned())
    }

    fn roster_pitchers(&self, names: &[String]) -> Result<Vec<Pitcher>, StorageError> {
        self.check()?;
        let pitched: HashSet<i64> = self.events.iter().map(|e| e.pitcher_id).collect();
        let mut found: Vec<Pitcher> = self
            .pitchers
            .iter()
            .filter(|p| pitched.contains(&p.id) && names.contains(&p.name))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        found.dedup();
        Ok(found)
    }

    fn pitch_summary(&self, pitcher_id: i64) -> Result<Vec<PitchTypeSummary>, StorageError> {
        self.check()?;
        Ok(summarize_pitcher(&self.events, pitcher_id))
    }

    fn table_names(&self) -> Result<Vec<String>, StorageError> {
        self.check()?;
        Ok(vec!["players".to_string(), "pitches".to_string()])
    }

    fn column_names(&self, table: &str) -> Result<Vec<String>, StorageError> {
        self.check()?;
        let columns: &[&str] = match table {
            "players" => &PLAYER_COLUMNS,
            "pitches" => &PITCH_COLUMNS,
            _ => &[],
        };
        Ok(columns.iter().map(|c| c.to_string()).collect())
    }

    fn sample_pitches(&self, limit: usize) -> Result<Vec<SampleRow>, StorageError> {
        self.check()?;
        let samples = self
            .events
            .iter()
            .take(limit)
            .enumerate()
            .map(|(i, event)| {
                let mut row = match serde_json::to_value(event) {
                    Ok(Value::Object(map)) => map,
                    _ => SampleRow::new(),
                };
                row.insert("pitch_id".to_string(), Value::from(i as i64 + 1));
                row
            })
            .collect();
        Ok(samples)
    }

    fn pitch_types(&self) -> Result<Vec<String>, StorageError> {
        self.check()?;
        let mut seen = HashSet::new();
        Ok(self
            .events
            .iter()
            .filter(|e| seen.insert(e.pitch_type.as_str()))
            .map(|e| e.pitch_type.clone())
            .collect())
    }
}
