//! Round record for the external data recorder
//!
//! The engine only builds the payload. Sending and storing it is the host's
//! job. Field names follow the recorder's camelCase JSON contract.

use serde::{Deserialize, Serialize};

use crate::sim::{GameMode, Round};

/// A canvas point as the recorder expects it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    pub x: f32,
    pub y: f32,
}

impl From<glam::Vec2> for PointRecord {
    fn from(v: glam::Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

/// Start and end of one marble's run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarbleTrace {
    pub id: u32,
    pub start_x: f32,
    pub start_y: f32,
    pub end_x: f32,
    pub end_y: f32,
    pub start_time: f64,
    pub end_time: f64,
    /// Straight-line distance from start to end
    pub total_distance: f32,
}

/// One enclosure as drawn and counted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnclosureRecord {
    pub id: u32,
    pub vertices: Vec<PointRecord>,
    pub area: f32,
    pub perimeter: f32,
    pub draw_time: f64,
    pub marble_count: u32,
}

/// Everything recorded about a finished round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundRecord {
    pub round_number: u32,
    pub game_mode: GameMode,
    pub marble_count: u32,
    pub partition_count: u32,
    pub start_time: f64,
    pub end_time: f64,
    pub sim_start_time: f64,
    pub sim_end_time: f64,
    pub marbles: Vec<MarbleTrace>,
    pub partitions: Vec<EnclosureRecord>,
    pub marble_counts: Vec<u32>,
    pub operation_set: Vec<u64>,
    pub overlapping_elements: Vec<u64>,
    pub is_winner: bool,
    pub attempts: u32,
}

impl RoundRecord {
    /// Build the record for an evaluated round; `None` until a verdict exists
    pub fn from_round(round: &Round, now_ms: f64) -> Option<Self> {
        let result = round.result.as_ref()?;
        let sim_start = round.timing.sim_start_ms.unwrap_or(0.0);
        let sim_end = round.timing.sim_end_ms.unwrap_or(0.0);

        let marbles = round
            .marbles
            .iter()
            .map(|m| MarbleTrace {
                id: m.id,
                start_x: m.start.x,
                start_y: m.start.y,
                end_x: m.pos.x,
                end_y: m.pos.y,
                start_time: sim_start,
                end_time: sim_end,
                total_distance: m.displacement(),
            })
            .collect();

        let partitions = round
            .enclosures
            .iter()
            .map(|e| EnclosureRecord {
                id: e.id,
                vertices: e.vertices.iter().copied().map(PointRecord::from).collect(),
                area: e.area,
                perimeter: e.perimeter,
                draw_time: e.draw_time_ms,
                marble_count: e.marble_count,
            })
            .collect();

        Some(Self {
            round_number: round.config.round_number,
            game_mode: round.config.mode,
            marble_count: round.config.marble_count,
            partition_count: round.config.required_enclosures,
            start_time: round.timing.start_ms,
            end_time: now_ms,
            sim_start_time: sim_start,
            sim_end_time: sim_end,
            marbles,
            partitions,
            marble_counts: result.count_set.clone(),
            operation_set: result.derived_set.iter().copied().collect(),
            overlapping_elements: result.overlap.iter().copied().collect(),
            is_winner: result.is_winner,
            attempts: round.attempts,
        })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
