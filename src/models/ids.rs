//! Pitcher list identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a pitcher list entry.
///
/// Real rows carry the numeric `player_id` and serialize as a JSON number.
/// The fallback roster uses `pitcher_N` strings that do not exist in the store.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListingId {
    Player(i64),
    Placeholder(String),
}

impl ListingId {
    /// Placeholder id for the 1-based roster position.
    pub fn placeholder(position: usize) -> Self {
        Self::Placeholder(format!("pitcher_{}", position))
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player(id) => write!(f, "{}", id),
            Self::Placeholder(s) => write!(f, "{}", s),
        }
    }
}

impl fmt::Debug for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ListingId({})", self)
    }
}

impl From<i64> for ListingId {
    fn from(id: i64) -> Self {
        Self::Player(id)
    }
}
