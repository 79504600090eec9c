//! Synthetic summary rows for when the real data source is unreachable or empty.
//!
//! Rows are structurally valid but random. Callers must flag them as demo data.

use rand::Rng;
use tracing::debug;

use crate::calculate::round2;
use crate::models::PitchTypeSummary;

/// Pitch types every demo summary covers.
pub const DEMO_PITCH_TYPES: [&str; 5] =
    ["4-Seam Fastball", "Slider", "Changeup", "Curveball", "Sinker"];

/// Usage range for all rows but the last, in hundredths of a percent.
///
/// Four draws below 25% keep the remainder assigned to the last row positive.
const USAGE_HUNDREDTHS: std::ops::Range<u32> = 1000..2500;

/// Generate one demo row per entry of [`DEMO_PITCH_TYPES`].
///
/// Usage percentages are drawn in whole hundredths and the last row takes the
/// remainder, so they sum to exactly 100.00. Rows whose usage is not positive
/// are dropped.
pub fn generate_demo<R: Rng>(pitcher_name: &str, rng: &mut R) -> Vec<PitchTypeSummary> {
    debug!(pitcher = pitcher_name, "Generating demo pitch summary");

    let mut remaining: i64 = 10_000;
    let mut rows = Vec::with_capacity(DEMO_PITCH_TYPES.len());

    for (i, pitch_type) in DEMO_PITCH_TYPES.iter().enumerate() {
        let is_last = i == DEMO_PITCH_TYPES.len() - 1;
        let usage_hundredths = if is_last {
            remaining
        } else {
            rng.gen_range(USAGE_HUNDREDTHS) as i64
        };
        remaining -= usage_hundredths;

        rows.push(PitchTypeSummary {
            pitch_type: pitch_type.to_string(),
            count: rng.gen_range(100..600),
            usage_percentage: usage_hundredths as f64 / 100.0,
            avg_speed: round2(rng.gen_range(85.0..95.0)),
            avg_horizontal_break: round2(rng.gen_range(-10.0..10.0)),
            avg_induced_vertical_break: round2(rng.gen_range(-10.0..10.0)),
            avg_spin_rate: rng.gen_range(2000..2500) as f64,
            avg_exit_speed: Some(round2(rng.gen_range(82.0..97.0))),
            avg_launch_angle: Some(round2(rng.gen_range(5.0..35.0))),
        });
    }

    rows.retain(|r| r.usage_percentage > 0.0);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn hundredths(rows: &[PitchTypeSummary]) -> i64 {
        rows.iter()
            .map(|r| (r.usage_percentage * 100.0).round() as i64)
            .sum()
    }

    #[test]
    fn test_demo_covers_palette() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let rows = generate_demo("Logan Webb", &mut rng);
        let types: Vec<&str> = rows.iter().map(|r| r.pitch_type.as_str()).collect();
        assert_eq!(types, DEMO_PITCH_TYPES.to_vec());
    }

    #[test]
    fn test_demo_usage_sums_to_exactly_100() {
        for seed in 0..200 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let rows = generate_demo("Zac Gallen", &mut rng);
            assert_eq!(hundredths(&rows), 10_000, "seed {}", seed);
            let sum: f64 = rows.iter().map(|r| r.usage_percentage).sum();
            assert!((sum - 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_demo_fields_within_bounds() {
        for seed in 0..200 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            for r in generate_demo("Max Fried", &mut rng) {
                assert!(r.usage_percentage > 0.0 && r.usage_percentage <= 60.0);
                assert!((100..600).contains(&r.count));
                assert!((85.0..=95.0).contains(&r.avg_speed));
                assert!((-10.0..=10.0).contains(&r.avg_horizontal_break));
                assert!((-10.0..=10.0).contains(&r.avg_induced_vertical_break));
                assert!((2000.0..2500.0).contains(&r.avg_spin_rate));
                assert!((82.0..=97.0).contains(&r.avg_exit_speed.unwrap()));
                assert!((5.0..=35.0).contains(&r.avg_launch_angle.unwrap()));
            }
        }
    }

    #[test]
    fn test_demo_is_deterministic_for_a_seed() {
        let a = generate_demo("Brad Lord", &mut ChaCha8Rng::seed_from_u64(7));
        let b = generate_demo("Brad Lord", &mut ChaCha8Rng::seed_from_u64(7));
        assert_eq!(a, b);
    }
}
