//! Round simulation module
//!
//! All engine logic lives here. This module must stay pure:
//! - One `Round` context, passed explicitly to every operation
//! - Seeded RNG only (or an injected `UniformSource`)
//! - Stable iteration order (by marble and enclosure ID)
//! - No rendering, input or I/O dependencies

pub mod enclosure;
pub mod geometry;
pub mod poisson;
pub mod population;
pub mod rules;
pub mod state;
pub mod tick;

pub use enclosure::{add_enclosure, check_stroke};
pub use geometry::{
    point_in_polygon, polygon_area, polygon_perimeter, polygons_overlap, segments_intersect,
};
pub use poisson::{SequenceSource, UniformSource, poisson};
pub use population::{count_populations, owning_enclosure};
pub use rules::{
    WinConditionResult, evaluate_win_condition, finish_round, finish_round_with, is_sum_free,
};
pub use state::{
    Enclosure, GameMode, Marble, Notice, Round, RoundConfig, RoundPhase, RoundTiming,
};
pub use tick::{spawn_marbles, start_simulation, step_marble, stop_simulation, tick};
