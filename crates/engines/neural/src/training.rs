//! Training data from random play.

use chess_core::{GameState, RulesError, Scorer};
use rand::Rng;
use tracing::debug;

use crate::features::board_features;
use crate::network::Sample;
use crate::scorer::OUTPUT_SCALE;

/// Collects `count` labelled positions by playing between 0 and
/// `max_random_moves` random moves from `start`.
///
/// Positions where the game is over are skipped; collection gives up after
/// `10 * count` skipped walks. Each target is
/// `scorer / 1000`, matching the network's output scale. `start` is restored
/// before returning.
pub fn collect_training_positions<G, S, R>(
    start: &mut G,
    count: usize,
    max_random_moves: usize,
    scorer: &S,
    rng: &mut R,
) -> Result<Vec<Sample>, RulesError>
where
    G: GameState,
    S: Scorer<G> + ?Sized,
    R: Rng,
{
    let mut samples = Vec::with_capacity(count);
    let mut skipped = 0usize;

    while samples.len() < count {
        if start.is_terminal() || skipped > count * 10 {
            break;
        }

        let num_moves = rng.gen_range(0..=max_random_moves);
        let mut pushed = 0;
        let walked = random_walk(start, num_moves, rng, &mut pushed);

        if walked.is_ok() {
            if start.is_terminal() {
                skipped += 1;
            } else {
                let target = scorer.score(&*start) / OUTPUT_SCALE;
                samples.push(Sample::new(board_features(&*start), target));
            }
        }

        for _ in 0..pushed {
            start.pop()?;
        }
        walked?;
    }

    debug!(collected = samples.len(), skipped, "training positions");
    Ok(samples)
}

fn random_walk<G: GameState, R: Rng>(
    pos: &mut G,
    num_moves: usize,
    rng: &mut R,
    pushed: &mut usize,
) -> Result<(), RulesError> {
    for _ in 0..num_moves {
        let moves = pos.legal_moves();
        if moves.is_empty() || pos.is_terminal() {
            break;
        }
        pos.push(moves[rng.gen_range(0..moves.len())])?;
        *pushed += 1;
    }
    Ok(())
}
