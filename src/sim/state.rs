//! Round state and core simulation types
//!
//! Everything the engine knows lives in a single `Round`. The host creates
//! one per round (or calls `retry`) and passes it to each operation.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rules::WinConditionResult;
use crate::settings::Settings;

/// Which free-set condition the round is scored against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameMode {
    /// No pairwise sum may land in the set
    #[default]
    Sum,
    /// rpois(a) + rpois(b) per pair
    OuterDist,
    /// rpois(a + b) per pair
    InnerDist,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Sum => "sum",
            GameMode::OuterDist => "outerDist",
            GameMode::InnerDist => "innerDist",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sum" => Some(GameMode::Sum),
            "outerdist" | "outer" => Some(GameMode::OuterDist),
            "innerdist" | "inner" => Some(GameMode::InnerDist),
            _ => None,
        }
    }

    /// Human-readable mode name
    pub fn display_name(&self) -> &'static str {
        match self {
            GameMode::Sum => "Sum Free Set",
            GameMode::OuterDist => "Outer Distribution",
            GameMode::InnerDist => "Inner Distribution",
        }
    }

    /// Label for the derived set in the result display
    pub fn operation_label(&self) -> &'static str {
        match self {
            GameMode::Sum => "S + S",
            GameMode::OuterDist => "rpois(a) + rpois(b) for all a,b in S",
            GameMode::InnerDist => "rpois(a + b) for all a,b in S",
        }
    }

    /// Whether evaluation consumes randomness
    pub fn is_randomized(&self) -> bool {
        *self != GameMode::Sum
    }
}

/// Per-round configuration, fixed for the round's duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundConfig {
    /// 1-based round number
    pub round_number: u32,
    /// Total marbles spawned this round
    pub marble_count: u32,
    /// Enclosures the player must draw (round number + 1)
    pub required_enclosures: u32,
    pub mode: GameMode,
}

impl RoundConfig {
    /// Derive the configuration for a given round number
    pub fn for_round(round_number: u32, mode: GameMode, settings: &Settings) -> Self {
        let round_number = round_number.max(1);
        Self {
            round_number,
            marble_count: settings.marbles_for_round(round_number),
            required_enclosures: round_number + 1,
            mode,
        }
    }
}

/// A marble bouncing around the canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marble {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Where the marble was spawned this round
    pub start: Vec2,
}

impl Marble {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            id,
            pos,
            vel,
            radius,
            start: pos,
        }
    }

    /// Straight-line displacement from the spawn point
    pub fn displacement(&self) -> f32 {
        self.start.distance(self.pos)
    }
}

/// A closed polygon drawn by the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enclosure {
    pub id: u32,
    /// Implicitly closed (last vertex joins the first)
    pub vertices: Vec<Vec2>,
    /// Filled in by the population counter after the simulation stops
    pub marble_count: u32,
    pub area: f32,
    pub perimeter: f32,
    /// Wall-clock time the stroke was completed (ms)
    pub draw_time_ms: f64,
}

/// Transient user-facing message that clears itself
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub message: String,
    pub expires_at_ms: f64,
}

impl Notice {
    pub fn is_active(&self, now_ms: f64) -> bool {
        now_ms < self.expires_at_ms
    }
}

/// Where the round is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Simulator idle, player drawing enclosures
    Drawing,
    /// Simulator ticking once per frame
    Running,
    /// Simulator idle again, marble positions frozen
    Stopped,
}

/// Wall-clock timestamps for the round (ms)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundTiming {
    pub start_ms: f64,
    pub sim_start_ms: Option<f64>,
    pub sim_end_ms: Option<f64>,
}

/// Complete state for one round
#[derive(Debug, Clone)]
pub struct Round {
    pub config: RoundConfig,
    pub settings: Settings,
    /// Seed the round RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: RoundPhase,
    /// Marbles (sorted by id)
    pub marbles: Vec<Marble>,
    /// Accepted enclosures (sorted by id)
    pub enclosures: Vec<Enclosure>,
    /// Simulation ticks since `start_simulation`
    pub ticks: u64,
    /// Attempts at this round, starting at 1
    pub attempts: u32,
    pub timing: RoundTiming,
    /// Verdict, once evaluated
    pub result: Option<WinConditionResult>,
    pub(crate) notice: Option<Notice>,
    next_enclosure_id: u32,
}

impl Round {
    /// Create a round and place its marbles
    pub fn new(config: RoundConfig, settings: Settings, seed: u64, now_ms: f64) -> Self {
        let mut round = Self {
            config,
            settings,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: RoundPhase::Drawing,
            marbles: Vec::new(),
            enclosures: Vec::new(),
            ticks: 0,
            attempts: 1,
            timing: RoundTiming::default(),
            result: None,
            notice: None,
            next_enclosure_id: 0,
        };
        round.reset(now_ms);
        log::info!(
            "Round {} ({}) started: {} marbles, {} enclosures required",
            config.round_number,
            config.mode.as_str(),
            config.marble_count,
            config.required_enclosures
        );
        round
    }

    /// Start another attempt with the same configuration
    pub fn retry(&mut self, now_ms: f64) {
        self.attempts += 1;
        self.reset(now_ms);
        log::info!(
            "Round {} attempt {}",
            self.config.round_number,
            self.attempts
        );
    }

    fn reset(&mut self, now_ms: f64) {
        self.phase = RoundPhase::Drawing;
        self.enclosures.clear();
        self.next_enclosure_id = 0;
        self.ticks = 0;
        self.result = None;
        self.notice = None;
        self.timing = RoundTiming {
            start_ms: now_ms,
            ..Default::default()
        };
        super::tick::spawn_marbles(self);
    }

    /// Allocate the next sequential enclosure ID
    pub(crate) fn next_enclosure_id(&mut self) -> u32 {
        let id = self.next_enclosure_id;
        self.next_enclosure_id += 1;
        id
    }

    /// The current notice, if it hasn't expired
    pub fn notice(&self, now_ms: f64) -> Option<&Notice> {
        self.notice.as_ref().filter(|n| n.is_active(now_ms))
    }

    pub fn is_running(&self) -> bool {
        self.phase == RoundPhase::Running
    }

    /// Enclosures still to draw before the simulation may start
    pub fn enclosures_remaining(&self) -> u32 {
        self.config
            .required_enclosures
            .saturating_sub(self.enclosures.len() as u32)
    }

    /// Marble counts in enclosure id order
    pub fn count_set(&self) -> Vec<u32> {
        self.enclosures.iter().map(|e| e.marble_count).collect()
    }
}
