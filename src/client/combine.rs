//! Headline numbers recombined from per-pitch-type summaries.

use crate::models::{HeadlineStats, PitchTypeSummary};

/// Count-weighted mean of `value` across `rows`.
fn weighted_mean(
    rows: &[PitchTypeSummary],
    total: u32,
    value: impl Fn(&PitchTypeSummary) -> f64,
) -> f64 {
    rows.iter().map(|r| value(r) * r.count as f64).sum::<f64>() / total as f64
}

/// Derive the headline cards from a full summary set.
///
/// Returns `None` for an empty set. The primary pitch is recomputed rather
/// than taken from the first row, since rows may arrive re-sorted; among
/// equal counts the earliest row wins. Averages are weighted by count so they
/// equal the per-event mean, not the mean of per-type averages.
pub fn derive_headline(rows: &[PitchTypeSummary]) -> Option<HeadlineStats> {
    let total: u32 = rows.iter().map(|r| r.count).sum();
    if total == 0 {
        return None;
    }

    let primary = rows
        .iter()
        .reduce(|best, r| if r.count > best.count { r } else { best })?;

    Some(HeadlineStats {
        primary_pitch: primary.pitch_type.clone(),
        primary_usage: primary.usage_percentage,
        weighted_avg_velocity: weighted_mean(rows, total, |r| r.avg_speed),
        weighted_avg_spin: weighted_mean(rows, total, |r| r.avg_spin_rate),
        total_pitches: total,
        pitch_types: rows.len(),
    })
}
