//! Minimax search with alpha-beta pruning

use chess_core::{Color, GameState, RulesError, Scorer, SearchResult};
use tracing::{debug, warn};

/// Searches the position and returns the best move with its root evaluation.
///
/// White maximizes and Black minimizes the White-positive score. Depth 0
/// evaluates the root immediately and proposes no move. With `alpha_beta`
/// off the full tree is searched; the chosen move and score are identical
/// either way.
///
/// The position is restored before returning, also when an error is
/// propagated from the rules engine.
pub fn pick_best_move<G, S>(
    pos: &mut G,
    depth: u8,
    alpha_beta: bool,
    scorer: &S,
    nodes: &mut u64,
) -> Result<SearchResult<G::Move>, RulesError>
where
    G: GameState,
    S: Scorer<G> + ?Sized,
{
    let start_nodes = *nodes;

    if depth == 0 {
        *nodes += 1;
        return Ok(SearchResult::no_move(scorer.score(pos), *nodes - start_nodes));
    }

    let moves = pos.legal_moves();
    if moves.is_empty() {
        *nodes += 1;
        return Ok(SearchResult::no_move(scorer.score(pos), *nodes - start_nodes));
    }

    let maximizing = pos.side_to_move() == Color::White;
    let mut best_move = None;
    let mut best_score = worst_for(maximizing);
    let mut first_score = best_score;
    let mut alpha = f64::NEG_INFINITY;
    let mut beta = f64::INFINITY;

    for (i, &mv) in moves.iter().enumerate() {
        pos.push(mv)?;
        let value = minimax(pos, depth - 1, alpha, beta, alpha_beta, scorer, nodes);
        pos.pop()?;
        let value = value?;
        if i == 0 {
            first_score = value;
        }

        // Strict comparison keeps the first of equally scored moves.
        let improves = if maximizing {
            value > best_score
        } else {
            value < best_score
        };
        if improves {
            best_score = value;
            best_move = Some(mv);
        }

        if maximizing {
            alpha = alpha.max(value);
        } else {
            beta = beta.min(value);
        }
    }

    if best_move.is_none() {
        warn!(
            fen = %pos.to_notation(),
            "no root move improved on the initial bound, falling back to the first legal move"
        );
        best_move = Some(moves[0]);
        best_score = first_score;
    }

    if let Some(mv) = best_move {
        debug!(
            depth,
            alpha_beta,
            nodes = *nodes - start_nodes,
            score = best_score,
            best = %pos.move_to_short(mv),
            "minimax search complete"
        );
    }

    Ok(SearchResult {
        best_move,
        score: best_score,
        nodes: *nodes - start_nodes,
    })
}

fn worst_for(maximizing: bool) -> f64 {
    if maximizing {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    }
}

/// Recursive minimax. Every push is matched by a pop before the result,
/// including an error, is handed upward.
fn minimax<G, S>(
    pos: &mut G,
    depth: u8,
    mut alpha: f64,
    mut beta: f64,
    alpha_beta: bool,
    scorer: &S,
    nodes: &mut u64,
) -> Result<f64, RulesError>
where
    G: GameState,
    S: Scorer<G> + ?Sized,
{
    *nodes += 1;

    if depth == 0 || pos.is_terminal() {
        return Ok(scorer.score(pos));
    }

    let maximizing = pos.side_to_move() == Color::White;
    let mut best = worst_for(maximizing);

    for mv in pos.legal_moves() {
        pos.push(mv)?;
        let value = minimax(pos, depth - 1, alpha, beta, alpha_beta, scorer, nodes);
        pos.pop()?;
        let value = value?;

        if maximizing {
            best = best.max(value);
            alpha = alpha.max(value);
        } else {
            best = best.min(value);
            beta = beta.min(value);
        }

        if alpha_beta && alpha >= beta {
            break; // cutoff
        }
    }

    Ok(best)
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
