//! Raw pitch events as stored in the `pitches` table.

use serde::{Deserialize, Serialize};

/// One pitched ball. Read-only; owned by the pitch store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitchEvent {
    pub pitcher_id: i64,

    /// Categorical label, e.g. "Slider"
    pub pitch_type: String,

    /// Release speed in mph
    pub release_speed: f64,

    /// Horizontal break in inches
    pub horizontal_break: f64,

    /// Induced vertical break in inches
    pub induced_vertical_break: f64,

    /// Spin rate in rpm
    pub spin_rate: f64,

    /// Exit speed, present only if the pitch was put in play
    pub hit_exit_speed: Option<f64>,

    /// Launch angle, present only if the pitch was put in play
    pub hit_launch_angle: Option<f64>,
}

impl PitchEvent {
    /// Create an event with no batted-ball outcome.
    pub fn new(
        pitcher_id: i64,
        pitch_type: impl Into<String>,
        release_speed: f64,
        horizontal_break: f64,
        induced_vertical_break: f64,
        spin_rate: f64,
    ) -> Self {
        Self {
            pitcher_id,
            pitch_type: pitch_type.into(),
            release_speed,
            horizontal_break,
            induced_vertical_break,
            spin_rate,
            hit_exit_speed: None,
            hit_launch_angle: None,
        }
    }

    /// Attach a batted-ball outcome.
    pub fn with_contact(mut self, exit_speed: f64, launch_angle: f64) -> Self {
        self.hit_exit_speed = Some(exit_speed);
        self.hit_launch_angle = Some(launch_angle);
        self
    }
}
