//! The Search Agent: move selection via depth-limited alpha-beta minimax
//! with quiescence, built on the Rules Engine's make/unmake and legal-move
//! APIs. [`select_move`] is the top-level routine; it is the only function
//! this module exposes beyond [`Difficulty`], everything else (ordering,
//! killers, the minimax/quiescence recursion) is an implementation detail
//! reached through it.

mod killers;
mod minimax;
mod ordering;

use crate::chess::{legal_moves, Color, Move, Position};
use killers::KillerMoves;
use minimax::minimax;
use ordering::order_moves;

/// The three preconfigured strength profiles. This is the search agent's
/// entire configuration surface — a plain enum, not a file- or env-based
/// configuration layer, since the crate persists nothing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Beginner,
    Medium,
    Pro,
}

/// The nominal search depth and quiescence/killer settings for one profile.
struct Profile {
    depth: u32,
    quiescence: bool,
}

impl Difficulty {
    const fn profile(self) -> Profile {
        match self {
            Self::Beginner => Profile {
                depth: 2,
                quiescence: false,
            },
            Self::Medium => Profile {
                depth: 4,
                quiescence: true,
            },
            Self::Pro => Profile {
                depth: 6,
                quiescence: true,
            },
        }
    }
}

/// Depth used by Pro's root-move prescoring pass: a depth-4 evaluation of
/// each root move to score it before the full-depth search runs.
const PRO_PRESCORE_DEPTH: u32 = 4;

/// Selects a move for `position`'s side to move at the given strength.
/// Mutates `position` during search but restores it via unmake on every
/// return path, so it is bit-identical to its state on entry once this
/// returns. Returns `None` iff there are no legal moves (terminal position).
#[must_use]
pub fn select_move(position: &mut Position, difficulty: Difficulty) -> Option<Move> {
    let profile = difficulty.profile();
    let root_moves: Vec<Move> = legal_moves(position).into_iter().collect();
    if root_moves.is_empty() {
        return None;
    }

    let maximizing = position.side_to_move() == Color::White;
    let mut killers = KillerMoves::new();

    let ordered = if difficulty == Difficulty::Pro {
        prescored_root_order(position, root_moves, maximizing)
    } else {
        let mut moves = root_moves;
        order_moves(position.board(), &mut moves, 0, &killers);
        moves
    };

    let mut alpha = i32::MIN;
    let mut beta = i32::MAX;
    let mut best_move = None;
    let mut best_score = if maximizing { i32::MIN } else { i32::MAX };

    for mv in ordered {
        position.make_move(mv);
        let score = minimax(
            position,
            profile.depth - 1,
            alpha,
            beta,
            !maximizing,
            profile.quiescence,
            profile.depth,
            &mut killers,
        );
        position.undo_move();

        let improves = if maximizing {
            score > best_score
        } else {
            score < best_score
        };
        if improves || best_move.is_none() {
            best_score = score;
            best_move = Some(mv);
        }
        if maximizing {
            alpha = alpha.max(best_score);
        } else {
            beta = beta.min(best_score);
        }
    }

    log::debug!(
        "get_bot_move: difficulty={difficulty:?} depth={} chosen={best_move:?} score={best_score}",
        profile.depth
    );
    best_move
}

/// Pro's two-stage ordering: score each root move with a depth-4 search,
/// then sort the root list by that score so the full depth-6 search (run by
/// the caller, sharing one (alpha, beta) window across moves) visits the
/// most promising moves first.
fn prescored_root_order(position: &mut Position, moves: Vec<Move>, maximizing: bool) -> Vec<Move> {
    let mut scored: Vec<(Move, i32)> = moves
        .into_iter()
        .map(|mv| {
            position.make_move(mv);
            let mut scratch_killers = KillerMoves::new();
            let score = minimax(
                position,
                PRO_PRESCORE_DEPTH - 1,
                i32::MIN,
                i32::MAX,
                !maximizing,
                true,
                PRO_PRESCORE_DEPTH,
                &mut scratch_killers,
            );
            position.undo_move();
            (mv, score)
        })
        .collect();

    if maximizing {
        scored.sort_by_key(|&(_, score)| std::cmp::Reverse(score));
    } else {
        scored.sort_by_key(|&(_, score)| score);
    }
    scored.into_iter().map(|(mv, _)| mv).collect()
}
