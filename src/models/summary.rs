//! Per-pitch-type summary rows and the headline numbers derived from them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Aggregated statistics for one pitch type of one pitcher.
///
/// Recomputed per request; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitchTypeSummary {
    pub pitch_type: String,

    /// Number of events in the group (always >= 1)
    #[serde(rename = "pitch_count")]
    pub count: u32,

    /// Share of the pitcher's total, 0-100, 2 decimals
    pub usage_percentage: f64,

    pub avg_speed: f64,
    pub avg_horizontal_break: f64,
    pub avg_induced_vertical_break: f64,
    pub avg_spin_rate: f64,

    /// Absent when no event in the group was put in play
    pub avg_exit_speed: Option<f64>,

    /// Absent when no event in the group was put in play
    pub avg_launch_angle: Option<f64>,
}

/// A sortable column of the summary table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryField {
    PitchType,
    PitchCount,
    UsagePercentage,
    AvgSpeed,
    AvgHorizontalBreak,
    AvgInducedVerticalBreak,
    AvgSpinRate,
    AvgExitSpeed,
    AvgLaunchAngle,
}

/// Value of one cell, as seen by the sorter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(Option<f64>),
}

impl SummaryField {
    pub const ALL: [SummaryField; 9] = [
        SummaryField::PitchType,
        SummaryField::PitchCount,
        SummaryField::UsagePercentage,
        SummaryField::AvgSpeed,
        SummaryField::AvgHorizontalBreak,
        SummaryField::AvgInducedVerticalBreak,
        SummaryField::AvgSpinRate,
        SummaryField::AvgExitSpeed,
        SummaryField::AvgLaunchAngle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryField::PitchType => "pitch_type",
            SummaryField::PitchCount => "pitch_count",
            SummaryField::UsagePercentage => "usage_percentage",
            SummaryField::AvgSpeed => "avg_speed",
            SummaryField::AvgHorizontalBreak => "avg_horizontal_break",
            SummaryField::AvgInducedVerticalBreak => "avg_induced_vertical_break",
            SummaryField::AvgSpinRate => "avg_spin_rate",
            SummaryField::AvgExitSpeed => "avg_exit_speed",
            SummaryField::AvgLaunchAngle => "avg_launch_angle",
        }
    }

    /// Column header shown in the table.
    pub fn label(&self) -> &'static str {
        match self {
            SummaryField::PitchType => "Pitch Type",
            SummaryField::PitchCount => "Count",
            SummaryField::UsagePercentage => "Usage %",
            SummaryField::AvgSpeed => "Avg Speed",
            SummaryField::AvgHorizontalBreak => "H-Break",
            SummaryField::AvgInducedVerticalBreak => "V-Break",
            SummaryField::AvgSpinRate => "Spin Rate",
            SummaryField::AvgExitSpeed => "Exit Velo",
            SummaryField::AvgLaunchAngle => "Launch Angle",
        }
    }
}

impl fmt::Display for SummaryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SummaryField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SummaryField::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| format!("unknown summary field: {}", s))
    }
}

impl PitchTypeSummary {
    /// Read one column of this row.
    pub fn field(&self, field: SummaryField) -> FieldValue<'_> {
        match field {
            SummaryField::PitchType => FieldValue::Text(&self.pitch_type),
            SummaryField::PitchCount => FieldValue::Number(Some(self.count as f64)),
            SummaryField::UsagePercentage => FieldValue::Number(Some(self.usage_percentage)),
            SummaryField::AvgSpeed => FieldValue::Number(Some(self.avg_speed)),
            SummaryField::AvgHorizontalBreak => FieldValue::Number(Some(self.avg_horizontal_break)),
            SummaryField::AvgInducedVerticalBreak => {
                FieldValue::Number(Some(self.avg_induced_vertical_break))
            }
            SummaryField::AvgSpinRate => FieldValue::Number(Some(self.avg_spin_rate)),
            SummaryField::AvgExitSpeed => FieldValue::Number(self.avg_exit_speed),
            SummaryField::AvgLaunchAngle => FieldValue::Number(self.avg_launch_angle),
        }
    }
}

/// Headline cards computed on the dashboard from a full summary set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadlineStats {
    pub primary_pitch: String,
    pub primary_usage: f64,

    /// Count-weighted mean of per-type average speed
    pub weighted_avg_velocity: f64,

    /// Count-weighted mean of per-type average spin
    pub weighted_avg_spin: f64,

    pub total_pitches: u32,
    pub pitch_types: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> PitchTypeSummary {
        PitchTypeSummary {
            pitch_type: "Slider".to_string(),
            count: 100,
            usage_percentage: 25.0,
            avg_speed: 85.0,
            avg_horizontal_break: 4.1,
            avg_induced_vertical_break: 1.2,
            avg_spin_rate: 2450.0,
            avg_exit_speed: None,
            avg_launch_angle: None,
        }
    }

    #[test]
    fn test_wire_field_names() {
        let json = serde_json::to_value(row()).unwrap();
        assert_eq!(json["pitch_count"], 100);
        assert_eq!(json["usage_percentage"], 25.0);
        assert!(json["avg_exit_speed"].is_null());
        assert!(json.get("count").is_none());
    }

    #[test]
    fn test_field_names_round_trip() {
        for field in SummaryField::ALL {
            assert_eq!(field.as_str().parse::<SummaryField>().unwrap(), field);
        }
        assert!("spin".parse::<SummaryField>().is_err());
    }

    #[test]
    fn test_field_access() {
        let r = row();
        assert_eq!(r.field(SummaryField::PitchType), FieldValue::Text("Slider"));
        assert_eq!(r.field(SummaryField::PitchCount), FieldValue::Number(Some(100.0)));
        assert_eq!(r.field(SummaryField::AvgExitSpeed), FieldValue::Number(None));
    }
}
