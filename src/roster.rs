//! The fixed allow-list of pitchers offered by the dashboard.

use crate::models::{ListingId, PitcherListing};

/// Display names offered in the pitcher picker.
pub const DEFAULT_ROSTER: [&str; 10] = [
    "Logan Webb",
    "Carlos Rodón",
    "Garrett Crochet",
    "Zac Gallen",
    "Max Fried",
    "Jake Irvin",
    "MacKenzie Gore",
    "Brad Lord",
    "Jose A. Ferrer",
    "Matt Waldron",
];

pub fn default_roster() -> Vec<String> {
    DEFAULT_ROSTER.iter().map(|s| s.to_string()).collect()
}

/// Listing used when the store cannot supply real pitchers:
/// `pitcher_1` .. `pitcher_N` in roster order.
pub fn placeholder_listing(names: &[String]) -> Vec<PitcherListing> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| PitcherListing {
            id: ListingId::placeholder(i + 1),
            name: name.clone(),
        })
        .collect()
}
