//! Error types
//!
//! Nothing in the engine is fatal. Every error describes an operation that was
//! refused with the round left exactly as it was.

use thiserror::Error;

/// Why a drawn stroke was not accepted as an enclosure
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EnclosureError {
    #[error("stroke has {got} points, an enclosure needs at least 3")]
    TooFewPoints { got: usize },
    #[error("stroke overlaps or nests with enclosure {existing}")]
    Overlaps { existing: u32 },
    #[error("all {required} enclosures for this round are already drawn")]
    CapacityReached { required: u32 },
    #[error("enclosures can only be drawn before the simulation starts")]
    DrawingClosed,
}

impl EnclosureError {
    /// Whether the player should see a transient notice for this rejection.
    ///
    /// Only overlaps are surfaced; short strokes and strokes past the cap are
    /// dropped silently.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, EnclosureError::Overlaps { .. })
    }
}

/// Simulation state-machine misuse and unmet preconditions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    #[error("please draw {required} enclosures before starting the simulation ({drawn} drawn)")]
    NotEnoughEnclosures { drawn: u32, required: u32 },
    #[error("simulation is already running")]
    AlreadyRunning,
    #[error("simulation is not running")]
    NotRunning,
    #[error("simulation has not been stopped yet")]
    NotStopped,
    #[error("this round's simulation already ran")]
    RoundFinished,
    #[error("this round was already evaluated")]
    AlreadyEvaluated,
}

/// Configuration loading failures
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("setting '{field}' must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },
}
