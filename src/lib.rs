//! Free Sets - partition geometry and win-condition engine
//!
//! Core modules:
//! - `sim`: Round simulation (enclosure validation, marble physics, counting, scoring)
//! - `settings`: Engine configuration
//! - `telemetry`: Round record payload for the external data recorder
//! - `error`: Recoverable error types for every engine operation

pub mod error;
pub mod settings;
pub mod sim;
pub mod telemetry;

pub use error::{EnclosureError, SettingsError, SimulationError};
pub use settings::Settings;
pub use telemetry::RoundRecord;

use glam::Vec2;

/// Engine configuration constants
pub mod consts {
    /// Canvas dimensions (canvas-local units)
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Marble defaults
    pub const MARBLE_RADIUS: f32 = 10.0;
    /// Velocity components are drawn from [-1, 1] * SPEED_SCALE
    pub const SPEED_SCALE: f32 = 10.0;

    /// How long an overlap notice stays visible
    pub const NOTICE_DURATION_MS: f64 = 3000.0;
    pub const OVERLAP_NOTICE: &str = "Shapes cannot overlap! Try drawing elsewhere.";

    /// Round progression
    pub const INITIAL_MARBLES: u32 = 12;
    pub const MARBLES_PER_ROUND: u32 = 6;
}

/// Convert raw `[x, y]` pointer samples into canvas points
pub fn stroke_from_samples(samples: &[[f32; 2]]) -> Vec<Vec2> {
    samples.iter().map(|&[x, y]| Vec2::new(x, y)).collect()
}

/// Wall-clock time in milliseconds since the Unix epoch
pub fn now_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}
