//! Pitch aggregation engine.
//!
//! Rolls raw pitch events up into one [`PitchTypeSummary`] per pitch type.
//! This is the in-process counterpart of the grouped SQL query in
//! [`crate::storage::SqliteStore`]; both must agree row for row.

use std::collections::HashMap;

use crate::models::{PitchEvent, PitchTypeSummary};

/// Round to 2 decimal places the way SQLite `ROUND(x, 2)` does.
///
/// The decision is made on the exact decimal expansion of the double, half
/// away from zero. `2.675` is stored as `2.67499999...` and rounds down, while
/// scaling by 100 first would carry it up to `2.68`.
pub fn round2(value: f64) -> f64 {
    // Past 2^53 there are no fractional digits left to round
    if !value.is_finite() || value.abs() >= 9_007_199_254_740_992.0 {
        return value;
    }

    let expansion = format!("{:.20}", value.abs());
    let (whole, fraction) = expansion.split_once('.').unwrap_or((&expansion, ""));
    let whole: u64 = whole.parse().unwrap_or(0);
    let digits: Vec<u64> = fraction
        .bytes()
        .take(3)
        .map(|b| u64::from(b.saturating_sub(b'0')))
        .chain(std::iter::repeat(0))
        .take(3)
        .collect();

    let mut cents = u128::from(whole) * 100 + u128::from(digits[0] * 10 + digits[1]);
    if digits[2] >= 5 {
        cents += 1;
    }

    let rounded = cents as f64 / 100.0;
    if value.is_sign_negative() {
        -rounded
    } else {
        rounded
    }
}

/// Share of `total` taken by `count`, in percent, 2 decimals.
pub fn usage_percentage(count: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        round2(count as f64 * 100.0 / total as f64)
    }
}

/// Running sums for one pitch type.
#[derive(Debug, Default)]
struct GroupAccumulator {
    count: u32,
    speed: f64,
    horizontal_break: f64,
    induced_vertical_break: f64,
    spin_rate: f64,
    exit_speed: f64,
    exit_speed_n: u32,
    launch_angle: f64,
    launch_angle_n: u32,
}

impl GroupAccumulator {
    fn push(&mut self, event: &PitchEvent) {
        self.count += 1;
        self.speed += event.release_speed;
        self.horizontal_break += event.horizontal_break;
        self.induced_vertical_break += event.induced_vertical_break;
        self.spin_rate += event.spin_rate;
        if let Some(v) = event.hit_exit_speed {
            self.exit_speed += v;
            self.exit_speed_n += 1;
        }
        if let Some(v) = event.hit_launch_angle {
            self.launch_angle += v;
            self.launch_angle_n += 1;
        }
    }

    fn finish(self, pitch_type: String, total: u32) -> PitchTypeSummary {
        let n = self.count as f64;
        PitchTypeSummary {
            pitch_type,
            count: self.count,
            usage_percentage: usage_percentage(self.count, total),
            avg_speed: round2(self.speed / n),
            avg_horizontal_break: round2(self.horizontal_break / n),
            avg_induced_vertical_break: round2(self.induced_vertical_break / n),
            avg_spin_rate: round2(self.spin_rate / n),
            avg_exit_speed: mean_of_present(self.exit_speed, self.exit_speed_n),
            avg_launch_angle: mean_of_present(self.launch_angle, self.launch_angle_n),
        }
    }
}

fn mean_of_present(sum: f64, n: u32) -> Option<f64> {
    if n == 0 {
        None
    } else {
        Some(round2(sum / n as f64))
    }
}

/// Summarize one pitcher's events.
///
/// The caller passes only that pitcher's events. Rows come back ordered by
/// count descending; equal counts keep first-seen order. No events yields an
/// empty vector.
pub fn summarize(events: &[PitchEvent]) -> Vec<PitchTypeSummary> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(String, GroupAccumulator)> = Vec::new();

    for event in events {
        let slot = *index.entry(event.pitch_type.as_str()).or_insert_with(|| {
            groups.push((event.pitch_type.clone(), GroupAccumulator::default()));
            groups.len() - 1
        });
        groups[slot].1.push(event);
    }

    let total = events.len() as u32;
    let mut rows: Vec<PitchTypeSummary> = groups
        .into_iter()
        .map(|(pitch_type, acc)| acc.finish(pitch_type, total))
        .collect();

    // Stable: ties stay in first-seen order
    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows
}

/// Summarize the events of `pitcher_id` out of a mixed event set.
pub fn summarize_pitcher(events: &[PitchEvent], pitcher_id: i64) -> Vec<PitchTypeSummary> {
    let own: Vec<PitchEvent> = events
        .iter()
        .filter(|e| e.pitcher_id == pitcher_id)
        .cloned()
        .collect();
    summarize(&own)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fastballs_and_sliders() -> Vec<PitchEvent> {
        let mut events = Vec::new();
        for i in 0..300 {
            // 94.0 / 96.0 alternating, mean 95.0
            let speed = if i % 2 == 0 { 94.0 } else { 96.0 };
            events.push(PitchEvent::new(1, "Fastball", speed, -8.0, 16.0, 2300.0));
        }
        for _ in 0..100 {
            events.push(PitchEvent::new(1, "Slider", 85.0, 5.0, 1.0, 2500.0));
        }
        events
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(92.456), 92.46);
        assert_eq!(round2(10.0), 10.0);
        assert_eq!(round2(0.0), 0.0);
        // Exactly representable halves go away from zero
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(-0.125), -0.13);
        // Stored just above the half-way point
        assert_eq!(round2(2300.005), 2300.01);
        assert_eq!(round2(8.345), 8.35);
    }

    #[test]
    fn test_round2_uses_stored_decimal_value() {
        // Each literal is stored just below the half-way point
        assert_eq!(round2(2.675), 2.67);
        assert_eq!(round2(1.115), 1.11);
        assert_eq!(round2(92.455), 92.45);
        assert_eq!(round2(1.005), 1.0);
        assert_eq!(round2(-3.335), -3.33);
    }

    #[test]
    fn test_round2_passes_through_non_finite() {
        assert!(round2(f64::NAN).is_nan());
        assert_eq!(round2(f64::INFINITY), f64::INFINITY);
        assert_eq!(round2(1e300), 1e300);
    }

    #[test]
    fn test_usage_percentage() {
        assert_eq!(usage_percentage(300, 400), 75.0);
        assert_eq!(usage_percentage(1, 3), 33.33);
        assert_eq!(usage_percentage(0, 0), 0.0);
    }

    #[test]
    fn test_summarize_two_pitch_types() {
        let rows = summarize(&fastballs_and_sliders());

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].pitch_type, "Fastball");
        assert_eq!(rows[0].count, 300);
        assert_eq!(rows[0].usage_percentage, 75.0);
        assert_eq!(rows[0].avg_speed, 95.0);
        assert_eq!(rows[1].pitch_type, "Slider");
        assert_eq!(rows[1].count, 100);
        assert_eq!(rows[1].usage_percentage, 25.0);
        assert_eq!(rows[1].avg_speed, 85.0);
    }

    #[test]
    fn test_counts_sum_to_event_total() {
        let events = fastballs_and_sliders();
        let rows = summarize(&events);
        let total: u32 = rows.iter().map(|r| r.count).sum();
        assert_eq!(total as usize, events.len());
    }

    #[test]
    fn test_usage_sums_to_100_within_rounding() {
        let mut events = Vec::new();
        for (pitch_type, n) in [("Sinker", 7), ("Changeup", 5), ("Sweeper", 3)] {
            for _ in 0..n {
                events.push(PitchEvent::new(2, pitch_type, 90.0, 0.0, 0.0, 2200.0));
            }
        }
        let rows = summarize(&events);
        let usage: f64 = rows.iter().map(|r| r.usage_percentage).sum();
        assert!((usage - 100.0).abs() <= 0.1, "usage summed to {}", usage);
    }

    #[test]
    fn test_batted_ball_averages_skip_missing() {
        let events = vec![
            PitchEvent::new(1, "Sinker", 93.0, -15.0, 7.0, 2100.0).with_contact(100.0, 10.0),
            PitchEvent::new(1, "Sinker", 93.0, -15.0, 7.0, 2100.0),
            PitchEvent::new(1, "Sinker", 93.0, -15.0, 7.0, 2100.0).with_contact(90.0, 20.0),
        ];
        let rows = summarize(&events);
        assert_eq!(rows[0].avg_exit_speed, Some(95.0));
        assert_eq!(rows[0].avg_launch_angle, Some(15.0));
    }

    #[test]
    fn test_batted_ball_averages_absent_not_zero() {
        let events = vec![PitchEvent::new(1, "Curveball", 79.0, 6.0, -12.0, 2700.0)];
        let rows = summarize(&events);
        assert_eq!(rows[0].avg_exit_speed, None);
        assert_eq!(rows[0].avg_launch_angle, None);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let events = vec![
            PitchEvent::new(1, "Cutter", 89.0, 2.0, 9.0, 2400.0),
            PitchEvent::new(1, "Changeup", 84.0, -12.0, 6.0, 1800.0),
            PitchEvent::new(1, "Changeup", 84.0, -12.0, 6.0, 1800.0),
            PitchEvent::new(1, "Cutter", 89.0, 2.0, 9.0, 2400.0),
        ];
        let rows = summarize(&events);
        let order: Vec<&str> = rows.iter().map(|r| r.pitch_type.as_str()).collect();
        assert_eq!(order, vec!["Cutter", "Changeup"]);
    }

    #[test]
    fn test_empty_input_yields_empty() {
        assert!(summarize(&[]).is_empty());
    }

    #[test]
    fn test_summarize_pitcher_filters_other_pitchers() {
        let mut events = fastballs_and_sliders();
        events.push(PitchEvent::new(2, "Knuckleball", 70.0, 0.0, 0.0, 300.0));
        let rows = summarize_pitcher(&events, 1);
        assert!(rows.iter().all(|r| r.pitch_type != "Knuckleball"));
        assert_eq!(summarize_pitcher(&events, 2).len(), 1);
        assert!(summarize_pitcher(&events, 3).is_empty());
    }
}
