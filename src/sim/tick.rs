//! Marble physics, one tick per animation frame
//!
//! Marbles move in straight lines and reflect off the canvas walls. They do not
//! collide with each other or with enclosures.

use glam::Vec2;
use rand::Rng;

use super::state::{Marble, Round, RoundPhase};
use crate::error::SimulationError;

/// Place `config.marble_count` marbles uniformly over the canvas
///
/// Spawn positions are not inset by the radius; the walls only come into play
/// once the marbles move.
pub fn spawn_marbles(round: &mut Round) {
    let width = round.settings.canvas_width;
    let height = round.settings.canvas_height;
    let speed = round.settings.speed_scale;
    let radius = round.settings.marble_radius;

    round.marbles.clear();
    for id in 0..round.config.marble_count {
        let pos = Vec2::new(
            round.rng.random::<f32>() * width,
            round.rng.random::<f32>() * height,
        );
        let vel = Vec2::new(
            (round.rng.random::<f32>() - 0.5) * 2.0 * speed,
            (round.rng.random::<f32>() - 0.5) * 2.0 * speed,
        );
        round.marbles.push(Marble::new(id, pos, vel, radius));
    }
    log::debug!("Spawned {} marbles", round.marbles.len());
}

/// Advance one marble by one tick inside a `width` x `height` canvas
///
/// Each axis is handled independently: if the tentative position puts the
/// marble's edge at or past a wall, that velocity component flips and the
/// position is recomputed from the old one with the flipped velocity.
pub fn step_marble(marble: &mut Marble, width: f32, height: f32) {
    let r = marble.radius;
    let mut next = marble.pos + marble.vel;

    if next.x - r <= 0.0 || next.x + r >= width {
        marble.vel.x = -marble.vel.x;
        next.x = marble.pos.x + marble.vel.x;
    }
    if next.y - r <= 0.0 || next.y + r >= height {
        marble.vel.y = -marble.vel.y;
        next.y = marble.pos.y + marble.vel.y;
    }

    marble.pos = next;
}

/// Begin simulating. Requires every enclosure to be drawn.
pub fn start_simulation(round: &mut Round, now_ms: f64) -> Result<(), SimulationError> {
    match round.phase {
        RoundPhase::Drawing => {}
        RoundPhase::Running => return Err(SimulationError::AlreadyRunning),
        RoundPhase::Stopped => return Err(SimulationError::RoundFinished),
    }

    let drawn = round.enclosures.len() as u32;
    let required = round.config.required_enclosures;
    if drawn < required {
        log::warn!("Simulation refused: {}/{} enclosures drawn", drawn, required);
        return Err(SimulationError::NotEnoughEnclosures { drawn, required });
    }

    round.phase = RoundPhase::Running;
    round.ticks = 0;
    round.timing.sim_start_ms = Some(now_ms);
    log::info!("Simulation started with {} marbles", round.marbles.len());
    Ok(())
}

/// Advance the simulation by one frame
///
/// Does nothing unless the round is running. Returns the marble positions.
pub fn tick(round: &mut Round) -> &[Marble] {
    if round.phase != RoundPhase::Running {
        return &round.marbles;
    }

    let width = round.settings.canvas_width;
    let height = round.settings.canvas_height;
    for marble in &mut round.marbles {
        step_marble(marble, width, height);
    }
    round.ticks += 1;

    if round.ticks % 600 == 0 {
        log::debug!("Simulation tick {}", round.ticks);
    }

    &round.marbles
}

/// Stop simulating and freeze the marbles where they are
pub fn stop_simulation(round: &mut Round, now_ms: f64) -> Result<&[Marble], SimulationError> {
    if round.phase != RoundPhase::Running {
        return Err(SimulationError::NotRunning);
    }

    round.phase = RoundPhase::Stopped;
    round.timing.sim_end_ms = Some(now_ms);
    log::info!("Simulation stopped after {} ticks", round.ticks);
    Ok(&round.marbles)
}
