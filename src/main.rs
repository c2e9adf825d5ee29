//! Free Sets headless driver
//!
//! Plays rounds without a UI: draws the required enclosures as side-by-side
//! strips, simulates for a random number of frames, scores the round and
//! prints each round record as JSON.
//!
//! Usage: `free-sets [sum|outerDist|innerDist] [seed]`
//! Set `FREE_SETS_SETTINGS` to a JSON file to override the defaults.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    if let Err(e) = native::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The engine is driven by the host page on the web
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use glam::Vec2;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use free_sets::sim::{
        GameMode, Round, RoundConfig, add_enclosure, finish_round, start_simulation,
        stop_simulation, tick,
    };
    use free_sets::{RoundRecord, Settings, now_ms, stroke_from_samples};

    /// Give up after this many rounds even on a winning streak
    const MAX_ROUNDS: u32 = 10;
    /// Gap left between neighbouring strips
    const STRIP_GAP: f32 = 8.0;

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        let mut args = std::env::args().skip(1);
        let mode = match args.next() {
            Some(name) => GameMode::from_name(&name).ok_or(format!("unknown game mode '{name}'"))?,
            None => GameMode::Sum,
        };
        let seed = match args.next() {
            Some(s) => s.parse::<u64>()?,
            None => now_ms() as u64,
        };

        let settings = match std::env::var("FREE_SETS_SETTINGS") {
            Ok(path) => Settings::from_json(&std::fs::read_to_string(path)?)?,
            Err(_) => Settings::default(),
        };

        log::info!("Free Sets ({}) starting with seed {}", mode.display_name(), seed);
        let mut driver_rng = Pcg32::seed_from_u64(seed ^ 0x5EED);

        for round_number in 1..=MAX_ROUNDS {
            let config = RoundConfig::for_round(round_number, mode, &settings);
            let round_seed = seed.wrapping_add(round_number as u64);
            let mut round = Round::new(config, settings.clone(), round_seed, now_ms());

            for stroke in strips(config.required_enclosures, &settings) {
                add_enclosure(&mut round, &stroke, now_ms())?;
            }

            start_simulation(&mut round, now_ms())?;
            let frames = driver_rng.random_range(60..600);
            for _ in 0..frames {
                tick(&mut round);
            }
            stop_simulation(&mut round, now_ms())?;

            let result = finish_round(&mut round)?;
            if let Some(record) = RoundRecord::from_round(&round, now_ms()) {
                println!("{}", record.to_json()?);
            }

            if !result.is_winner {
                println!("{}", result.explanation());
                println!("Game over after round {round_number}");
                return Ok(());
            }
            println!("Round {round_number} won: {:?}", result.count_set);
        }

        println!("Stopped after {MAX_ROUNDS} winning rounds");
        Ok(())
    }

    /// `count` disjoint vertical strips covering the canvas, traced the way
    /// pointer samples would arrive
    fn strips(count: u32, settings: &Settings) -> Vec<Vec<Vec2>> {
        let width = settings.canvas_width / count as f32;
        let top = STRIP_GAP;
        let bottom = settings.canvas_height - STRIP_GAP;
        (0..count)
            .map(|i| {
                let left = i as f32 * width + STRIP_GAP / 2.0;
                let right = (i + 1) as f32 * width - STRIP_GAP / 2.0;
                stroke_from_samples(&[[left, top], [right, top], [right, bottom], [left, bottom]])
            })
            .collect()
    }
}
