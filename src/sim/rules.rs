//! Win-condition evaluation
//!
//! Each mode maps every unordered index pair (i <= j) of the count set to a
//! value. The player wins when none of those values is itself a count.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::poisson::{UniformSource, poisson};
use super::population::count_populations;
use super::state::{GameMode, Round, RoundPhase};
use crate::error::SimulationError;

/// Verdict for one round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinConditionResult {
    pub mode: GameMode,
    /// Marble counts in enclosure id order (repeats allowed)
    pub count_set: Vec<u32>,
    /// Deduplicated operator outputs, widened so pair sums never overflow
    pub derived_set: BTreeSet<u64>,
    /// Derived values that are also counts
    pub overlap: BTreeSet<u64>,
    pub is_winner: bool,
}

impl WinConditionResult {
    /// Distinct counts, ascending
    pub fn distinct_counts(&self) -> BTreeSet<u64> {
        self.count_set.iter().map(|&c| c as u64).collect()
    }

    /// Why the set failed, or an empty string for a win
    pub fn explanation(&self) -> String {
        if self.is_winner {
            return String::new();
        }
        let kind = match self.mode {
            GameMode::Sum => "sum-free",
            GameMode::OuterDist | GameMode::InnerDist => "Poisson distribution-free",
        };
        let elements: Vec<String> = self.overlap.iter().map(u64::to_string).collect();
        format!(
            "Your set is not a valid {kind} set because the following elements appear in both sets: {}",
            elements.join(", ")
        )
    }
}

/// Apply the mode's operator to one pair
fn pair_value<S: UniformSource + ?Sized>(mode: GameMode, a: u32, b: u32, source: &mut S) -> u64 {
    match mode {
        GameMode::Sum => a as u64 + b as u64,
        GameMode::OuterDist => {
            poisson(a as f64, source) as u64 + poisson(b as f64, source) as u64
        }
        GameMode::InnerDist => poisson(a as f64 + b as f64, source) as u64,
    }
}

/// Score a count set under the given mode
///
/// Pairs are visited in (i, j) order with i <= j, so a scripted source sees
/// its samples consumed in that order. `Sum` never touches the source.
pub fn evaluate_win_condition<S: UniformSource + ?Sized>(
    counts: &[u32],
    mode: GameMode,
    source: &mut S,
) -> WinConditionResult {
    let mut derived_set = BTreeSet::new();
    for i in 0..counts.len() {
        for j in i..counts.len() {
            derived_set.insert(pair_value(mode, counts[i], counts[j], source));
        }
    }

    let distinct: BTreeSet<u64> = counts.iter().map(|&c| c as u64).collect();
    let overlap: BTreeSet<u64> = derived_set.intersection(&distinct).copied().collect();
    let is_winner = overlap.is_empty();

    log::debug!(
        "{} over {:?}: derived {:?}, overlap {:?}",
        mode.as_str(),
        counts,
        derived_set,
        overlap
    );

    WinConditionResult {
        mode,
        count_set: counts.to_vec(),
        derived_set,
        overlap,
        is_winner,
    }
}

/// Deterministic sum-free check
pub fn is_sum_free(counts: &[u32]) -> bool {
    // Sum mode never draws, any source will do
    let mut unused = super::poisson::SequenceSource::new(Vec::new());
    evaluate_win_condition(counts, GameMode::Sum, &mut unused).is_winner
}

/// Count marbles and score a stopped round using the round's own RNG
pub fn finish_round(round: &mut Round) -> Result<WinConditionResult, SimulationError> {
    let mut rng = round.rng.clone();
    let result = finish_round_with(round, &mut rng);
    round.rng = rng;
    result
}

/// Count marbles and score a stopped round with an explicit random source
///
/// Populations are written exactly once per round; a second call is refused.
pub fn finish_round_with<S: UniformSource + ?Sized>(
    round: &mut Round,
    source: &mut S,
) -> Result<WinConditionResult, SimulationError> {
    if round.phase != RoundPhase::Stopped {
        return Err(SimulationError::NotStopped);
    }
    if round.result.is_some() {
        return Err(SimulationError::AlreadyEvaluated);
    }

    let counts = count_populations(&mut round.enclosures, &round.marbles);
    let result = evaluate_win_condition(&counts, round.config.mode, source);
    log::info!(
        "Round {} {}: counts {:?}, overlap {:?}",
        round.config.round_number,
        if result.is_winner { "won" } else { "lost" },
        result.count_set,
        result.overlap
    );
    round.result = Some(result.clone());
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::poisson::SequenceSource;

    fn set(values: &[u64]) -> BTreeSet<u64> {
        values.iter().copied().collect()
    }

    fn sum(counts: &[u32]) -> WinConditionResult {
        let mut source = SequenceSource::new(Vec::new());
        let result = evaluate_win_condition(counts, GameMode::Sum, &mut source);
        assert_eq!(source.draws, 0);
        result
    }

    #[test]
    fn test_sum_one_two_four() {
        let result = sum(&[1, 2, 4]);
        assert_eq!(result.derived_set, set(&[2, 3, 4, 5, 6, 8]));
        // 2 = 1 + 1 and 4 = 2 + 2 are both counts; {2, 4} rather than {4},
        // see DESIGN.md open question 3
        assert_eq!(result.overlap, set(&[2, 4]));
        assert!(!result.is_winner);
    }

    #[test]
    fn test_sum_one_two_loses() {
        let result = sum(&[1, 2]);
        assert_eq!(result.derived_set, set(&[2, 3, 4]));
        assert_eq!(result.overlap, set(&[2]));
        assert!(!result.is_winner);
    }

    #[test]
    fn test_sum_three_five_wins() {
        let result = sum(&[3, 5]);
        assert_eq!(result.derived_set, set(&[6, 8, 10]));
        assert!(result.overlap.is_empty());
        assert!(result.is_winner);
        assert!(result.explanation().is_empty());
    }

    #[test]
    fn test_zero_count_always_loses_sum() {
        // 0 + 0 = 0
        let result = sum(&[0, 7]);
        assert!(result.overlap.contains(&0));
        assert!(!is_sum_free(&[0, 7]));
    }

    #[test]
    fn test_repeated_counts() {
        let result = sum(&[3, 3]);
        assert_eq!(result.count_set, vec![3, 3]);
        assert_eq!(result.derived_set, set(&[6]));
        assert_eq!(result.distinct_counts(), set(&[3]));
        assert!(result.is_winner);
    }

    #[test]
    fn test_empty_counts_win_trivially() {
        let result = sum(&[]);
        assert!(result.derived_set.is_empty());
        assert!(result.is_winner);
    }

    #[test]
    fn test_outer_dist_scripted() {
        // Every sample 0.0 ends each draw at once, so each Poisson(>0) is 0
        // and zero counts short-circuit without drawing
        let mut source = SequenceSource::new(vec![0.0]);
        let result = evaluate_win_condition(&[0, 4], GameMode::OuterDist, &mut source);
        assert_eq!(result.derived_set, set(&[0]));
        assert_eq!(result.overlap, set(&[0]));
        assert!(!result.is_winner);
        // pairs (0,0) (0,4) (4,4): draws for 4 once, then twice
        assert_eq!(source.draws, 3);
    }

    #[test]
    fn test_outer_dist_draws_two_per_pair() {
        let mut source = SequenceSource::new(vec![0.0]);
        evaluate_win_condition(&[2, 3, 5], GameMode::OuterDist, &mut source);
        assert_eq!(source.draws, 12);
    }

    #[test]
    fn test_inner_dist_draws_one_per_pair() {
        let mut source = SequenceSource::new(vec![0.0]);
        evaluate_win_condition(&[2, 3, 5], GameMode::InnerDist, &mut source);
        assert_eq!(source.draws, 6);
    }

    #[test]
    fn test_inner_dist_scripted_exact() {
        // lambda = 2: limit ~ 0.135. Samples 0.5, 0.5, 0.5 -> 0.125 => 2
        let mut source = SequenceSource::new(vec![0.5]);
        let result = evaluate_win_condition(&[1], GameMode::InnerDist, &mut source);
        assert_eq!(result.derived_set, set(&[2]));
        assert!(result.is_winner);

        // Same samples against counts {1, 2}: pairs (1,1)->2, (1,2)->?, (2,2)->?
        // lambda = 3: limit ~ 0.0498, 0.5^5 = 0.03125 => 4
        // lambda = 4: limit ~ 0.0183, 0.5^6 = 0.015625 => 5
        let mut source = SequenceSource::new(vec![0.5]);
        let result = evaluate_win_condition(&[1, 2], GameMode::InnerDist, &mut source);
        assert_eq!(result.derived_set, set(&[2, 4, 5]));
        assert_eq!(result.overlap, set(&[2]));
        assert!(!result.is_winner);
        assert!(result.explanation().contains("Poisson"));
    }

    #[test]
    fn test_sum_of_large_counts_does_not_overflow() {
        let big = u32::MAX / 2 + 1;
        let result = sum(&[big, 1]);
        assert!(result.derived_set.contains(&(big as u64 * 2)));
        assert!(result.derived_set.contains(&(big as u64 + 1)));

        let result = sum(&[u32::MAX, 1]);
        assert_eq!(result.derived_set, set(&[2, u32::MAX as u64 + 1, u32::MAX as u64 * 2]));
        assert!(result.is_winner);
    }

    #[test]
    fn test_inner_dist_large_counts_do_not_overflow() {
        // A 0.0 sample ends every draw at once, whatever the rate
        let mut source = SequenceSource::new(vec![0.0]);
        let result = evaluate_win_condition(&[u32::MAX, 1], GameMode::InnerDist, &mut source);
        assert_eq!(result.derived_set, set(&[0]));
        assert_eq!(source.draws, 3);
        assert!(result.is_winner);

        let mut source = SequenceSource::new(vec![0.0]);
        let result = evaluate_win_condition(&[u32::MAX, u32::MAX], GameMode::OuterDist, &mut source);
        assert_eq!(result.derived_set, set(&[0]));
    }

    #[test]
    fn test_explanation_lists_overlap() {
        let result = sum(&[1, 2, 4]);
        let text = result.explanation();
        assert!(text.contains("sum-free"));
        assert!(text.ends_with("2, 4"));
    }

    fn stopped_round(mode: GameMode, marbles: &[(f32, f32)]) -> Round {
        use crate::settings::Settings;
        use crate::sim::state::{Enclosure, Marble, RoundConfig};
        use glam::Vec2;

        let settings = Settings::default();
        let config = RoundConfig::for_round(1, mode, &settings);
        let mut round = Round::new(config, settings, 5, 0.0);
        for (id, x) in [(0u32, 0.0f32), (1, 200.0)] {
            round.enclosures.push(Enclosure {
                id,
                vertices: vec![
                    Vec2::new(x, 0.0),
                    Vec2::new(x + 100.0, 0.0),
                    Vec2::new(x + 100.0, 100.0),
                    Vec2::new(x, 100.0),
                ],
                marble_count: 0,
                area: 10_000.0,
                perimeter: 400.0,
                draw_time_ms: 0.0,
            });
        }
        round.marbles = marbles
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Marble::new(i as u32, Vec2::new(x, y), Vec2::ZERO, 10.0))
            .collect();
        round.phase = RoundPhase::Stopped;
        round
    }

    #[test]
    fn test_finish_round_sum() {
        // Three marbles in the first box, five in the second, one outside
        let mut marbles = vec![(10.0, 10.0), (20.0, 20.0), (30.0, 30.0)];
        marbles.extend([(210.0, 10.0), (220.0, 20.0), (230.0, 30.0), (240.0, 40.0), (250.0, 50.0)]);
        marbles.push((500.0, 500.0));
        let mut round = stopped_round(GameMode::Sum, &marbles);

        let result = finish_round(&mut round).unwrap();
        assert_eq!(result.count_set, vec![3, 5]);
        assert!(result.is_winner);
        assert_eq!(round.count_set(), vec![3, 5]);
        assert_eq!(round.result.as_ref(), Some(&result));
    }

    #[test]
    fn test_finish_round_only_once() {
        let mut round = stopped_round(GameMode::InnerDist, &[(10.0, 10.0)]);
        finish_round(&mut round).unwrap();
        assert_eq!(finish_round(&mut round), Err(SimulationError::AlreadyEvaluated));
    }

    #[test]
    fn test_finish_round_requires_stop() {
        let mut round = stopped_round(GameMode::Sum, &[]);
        round.phase = RoundPhase::Running;
        assert_eq!(finish_round(&mut round), Err(SimulationError::NotStopped));
        assert!(round.result.is_none());
    }

    #[test]
    fn test_finish_round_with_scripted_source() {
        // counts [1, 0]; every Poisson(>0) draw ends on the first 0.0 sample
        let mut round = stopped_round(GameMode::OuterDist, &[(50.0, 50.0)]);
        let mut source = SequenceSource::new(vec![0.0]);
        let result = finish_round_with(&mut round, &mut source).unwrap();
        assert_eq!(result.count_set, vec![1, 0]);
        assert_eq!(result.derived_set, set(&[0]));
        assert_eq!(result.overlap, set(&[0]));
        assert!(!result.is_winner);
    }
}
