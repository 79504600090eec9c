//! Pitcher records and list entries.

use serde::{Deserialize, Serialize};

use super::ListingId;

/// A pitcher from the `players` table.
///
/// Serialized as `{player_id, name}` for the details endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pitcher {
    #[serde(rename = "player_id")]
    pub id: i64,
    pub name: String,
}

impl Pitcher {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Build the display name the way the store does: `name_use || ' ' || name_last`.
    pub fn display_name(name_use: &str, name_last: &str) -> String {
        format!("{} {}", name_use, name_last)
    }
}

/// An entry in the pitcher picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitcherListing {
    pub id: ListingId,
    pub name: String,
}

impl PitcherListing {
    /// Token used to request this pitcher's summary: the id, or the name for placeholders.
    pub fn lookup_token(&self) -> String {
        if self.id.is_placeholder() {
            self.name.clone()
        } else {
            self.id.to_string()
        }
    }
}

impl From<Pitcher> for PitcherListing {
    fn from(p: Pitcher) -> Self {
        Self {
            id: p.id.into(),
            name: p.name,
        }
    }
}
