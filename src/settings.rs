//! Engine settings
//!
//! Canvas dimensions, marble tuning and round progression. Loaded from JSON by
//! the host application; every field falls back to its default when omitted.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;

/// Engine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Canvas ===
    /// Canvas width in canvas-local units
    pub canvas_width: f32,
    /// Canvas height in canvas-local units
    pub canvas_height: f32,

    // === Marbles ===
    /// Radius of every marble
    pub marble_radius: f32,
    /// Velocity components are drawn from [-1, 1] * speed_scale
    pub speed_scale: f32,

    // === Feedback ===
    /// How long an overlap notice stays visible (ms)
    pub notice_duration_ms: f64,

    // === Progression ===
    /// Marbles in round 1
    pub initial_marbles: u32,
    /// Marbles added per subsequent round
    pub marbles_per_round: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,

            marble_radius: MARBLE_RADIUS,
            speed_scale: SPEED_SCALE,

            notice_duration_ms: NOTICE_DURATION_MS,

            initial_marbles: INITIAL_MARBLES,
            marbles_per_round: MARBLES_PER_ROUND,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        log::info!(
            "Loaded settings: canvas {}x{}, marble radius {}",
            settings.canvas_width,
            settings.canvas_height,
            settings.marble_radius
        );
        Ok(settings)
    }

    /// Serialize settings to JSON
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject geometry that would make the simulation meaningless
    pub fn validate(&self) -> Result<(), SettingsError> {
        let checks = [
            ("canvas_width", self.canvas_width as f64),
            ("canvas_height", self.canvas_height as f64),
            ("marble_radius", self.marble_radius as f64),
            ("notice_duration_ms", self.notice_duration_ms),
        ];
        for (field, value) in checks {
            if value.is_nan() || value <= 0.0 {
                return Err(SettingsError::NotPositive { field, value });
            }
        }
        Ok(())
    }

    /// Number of marbles in the given (1-based) round
    pub fn marbles_for_round(&self, round: u32) -> u32 {
        self.initial_marbles + round.saturating_sub(1) * self.marbles_per_round
    }
}
