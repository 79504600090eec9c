//! Text rendering of summary cells, headline cards and the table.

use crate::models::{HeadlineStats, PitchTypeSummary, SummaryField};

const NOT_AVAILABLE: &str = "N/A";

/// Integer with thousands separators, e.g. `1,234`.
pub fn format_count(value: u32) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn format_percentage(value: f64) -> String {
    format!("{:.1}%", value)
}

pub fn format_speed(value: f64) -> String {
    format!("{:.1} mph", value)
}

pub fn format_break(value: f64) -> String {
    format!("{:.1} in", value)
}

pub fn format_spin(value: f64) -> String {
    format!("{} rpm", value.round() as i64)
}

pub fn format_angle(value: f64) -> String {
    format!("{:.1}°", value)
}

fn or_na(value: Option<f64>, f: fn(f64) -> String) -> String {
    value.map(f).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Display text of one table cell.
pub fn format_cell(row: &PitchTypeSummary, field: SummaryField) -> String {
    match field {
        SummaryField::PitchType => row.pitch_type.clone(),
        SummaryField::PitchCount => format_count(row.count),
        SummaryField::UsagePercentage => format_percentage(row.usage_percentage),
        SummaryField::AvgSpeed => format_speed(row.avg_speed),
        SummaryField::AvgHorizontalBreak => format_break(row.avg_horizontal_break),
        SummaryField::AvgInducedVerticalBreak => format_break(row.avg_induced_vertical_break),
        SummaryField::AvgSpinRate => format_spin(row.avg_spin_rate),
        SummaryField::AvgExitSpeed => or_na(row.avg_exit_speed, format_speed),
        SummaryField::AvgLaunchAngle => or_na(row.avg_launch_angle, format_angle),
    }
}

/// The three headline cards as `(title, value, caption)`.
pub fn headline_cards(stats: &HeadlineStats) -> [(&'static str, String, String); 3] {
    [
        (
            "Primary Pitch",
            stats.primary_pitch.clone(),
            format!("{}% usage", stats.primary_usage),
        ),
        (
            "Average Velocity",
            format_speed(stats.weighted_avg_velocity),
            "Across all pitches".to_string(),
        ),
        (
            "Average Spin Rate",
            format_spin(stats.weighted_avg_spin),
            "Weighted average".to_string(),
        ),
    ]
}

/// Plain-text table with one header line and one line per row.
pub fn render_table(rows: &[PitchTypeSummary]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|r| SummaryField::ALL.iter().map(|f| format_cell(r, *f)).collect())
        .collect();

    let widths: Vec<usize> = SummaryField::ALL
        .iter()
        .enumerate()
        .map(|(i, f)| {
            cells
                .iter()
                .map(|line| line[i].chars().count())
                .chain(std::iter::once(f.label().chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let header: Vec<String> = SummaryField::ALL
        .iter()
        .zip(&widths)
        .map(|(f, w)| format!("{:<w$}", f.label(), w = *w))
        .collect();
    out.push_str(header.join("  ").trim_end());
    out.push('\n');

    for line in &cells {
        let padded: Vec<String> = line
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:<w$}", c, w = *w))
            .collect();
        out.push_str(padded.join("  ").trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> PitchTypeSummary {
        PitchTypeSummary {
            pitch_type: "Sinker".to_string(),
            count: 1234,
            usage_percentage: 41.237,
            avg_speed: 92.96,
            avg_horizontal_break: -15.04,
            avg_induced_vertical_break: 7.5,
            avg_spin_rate: 2101.6,
            avg_exit_speed: None,
            avg_launch_angle: Some(11.94),
        }
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1234), "1,234");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn test_format_cells() {
        let r = row();
        assert_eq!(format_cell(&r, SummaryField::PitchCount), "1,234");
        assert_eq!(format_cell(&r, SummaryField::UsagePercentage), "41.2%");
        assert_eq!(format_cell(&r, SummaryField::AvgSpeed), "93.0 mph");
        assert_eq!(format_cell(&r, SummaryField::AvgHorizontalBreak), "-15.0 in");
        assert_eq!(format_cell(&r, SummaryField::AvgSpinRate), "2102 rpm");
        assert_eq!(format_cell(&r, SummaryField::AvgExitSpeed), "N/A");
        assert_eq!(format_cell(&r, SummaryField::AvgLaunchAngle), "11.9°");
    }

    #[test]
    fn test_headline_cards() {
        let stats = HeadlineStats {
            primary_pitch: "Fastball".to_string(),
            primary_usage: 75.0,
            weighted_avg_velocity: 92.5,
            weighted_avg_spin: 2350.4,
            total_pitches: 400,
            pitch_types: 2,
        };
        let cards = headline_cards(&stats);
        assert_eq!(cards[0].1, "Fastball");
        assert_eq!(cards[0].2, "75% usage");
        assert_eq!(cards[1].1, "92.5 mph");
        assert_eq!(cards[2].1, "2350 rpm");
    }

    #[test]
    fn test_render_table() {
        let table = render_table(&[row()]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Pitch Type"));
        assert!(lines[0].ends_with("Launch Angle"));
        assert!(lines[1].starts_with("Sinker"));
        assert!(lines[1].contains("N/A"));
    }
}
