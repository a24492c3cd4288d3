//! Alpha-beta minimax with a quiescence extension.
//!
//! Both routines mutate `position` in place via
//! [`crate::chess::Position::make_move`] and
//! [`crate::chess::Position::undo_move`], restoring it on every return path
//! — including beta cutoffs and terminal-detection unwinds — so the caller's
//! position is bit-identical once the top-level search returns.

use crate::chess::{legal_captures_and_promotions, legal_moves, Move, Position};
use crate::evaluation::evaluate;
use crate::search::killers::KillerMoves;
use crate::search::ordering::order_moves;

/// Score assigned to a forced mate, reduced by `ply` so the search prefers
/// faster mates for the opponent and slower ones for itself.
pub(crate) const MATE_SCORE: i32 = 99_999;

/// Quiescence search's own horizon, independent of the root search depth.
const QUIESCENCE_BUDGET: u32 = 6;

/// `depth == 0` defers to [`quiescence`] when `use_quiescence` is set, else
/// to the static evaluation directly.
#[allow(clippy::too_many_arguments)]
pub(crate) fn minimax(
    position: &mut Position,
    depth: u32,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
    use_quiescence: bool,
    max_depth: u32,
    killers: &mut KillerMoves,
) -> i32 {
    if depth == 0 {
        return if use_quiescence {
            quiescence(position, alpha, beta, maximizing, QUIESCENCE_BUDGET)
        } else {
            evaluate(position)
        };
    }

    let moves = legal_moves(position);
    if moves.is_empty() {
        return terminal_score(position, max_depth - depth, maximizing);
    }

    let ply = (max_depth - depth) as usize;
    let mut ordered: Vec<Move> = moves.into_iter().collect();
    order_moves(position.board(), &mut ordered, ply, killers);

    if maximizing {
        let mut best = i32::MIN;
        for mv in ordered {
            position.make_move(mv);
            let score = minimax(position, depth - 1, alpha, beta, false, use_quiescence, max_depth, killers);
            position.undo_move();
            best = best.max(score);
            alpha = alpha.max(score);
            if alpha >= beta {
                if mv.is_quiet() {
                    killers.record(ply, mv);
                }
                break;
            }
        }
        best
    } else {
        let mut best = i32::MAX;
        for mv in ordered {
            position.make_move(mv);
            let score = minimax(position, depth - 1, alpha, beta, true, use_quiescence, max_depth, killers);
            position.undo_move();
            best = best.min(score);
            beta = beta.min(score);
            if alpha >= beta {
                if mv.is_quiet() {
                    killers.record(ply, mv);
                }
                break;
            }
        }
        best
    }
}

/// Terminal scoring: checkmate in favor of whoever is *not* to move, scaled
/// so shallower mates score higher in absolute value; stalemate is 0.
fn terminal_score(position: &Position, ply: u32, maximizing: bool) -> i32 {
    let to_move = position.side_to_move();
    if position.board().is_in_check(to_move) {
        let mate_for_mover = -(MATE_SCORE - ply as i32);
        if maximizing {
            mate_for_mover
        } else {
            -mate_for_mover
        }
    } else {
        0
    }
}

/// A bounded capture/promotion-only extension past the nominal horizon.
/// `stand_pat` (the static eval) is used as a lower bound for the maximizer
/// or an upper bound for the minimizer, so a side never has to make a losing
/// capture to avoid a worse score than simply stopping.
fn quiescence(position: &mut Position, mut alpha: i32, mut beta: i32, maximizing: bool, budget: u32) -> i32 {
    let stand_pat = evaluate(position);

    if maximizing {
        if stand_pat >= beta {
            return stand_pat;
        }
        alpha = alpha.max(stand_pat);
    } else {
        if stand_pat <= alpha {
            return stand_pat;
        }
        beta = beta.min(stand_pat);
    }

    if budget == 0 {
        return stand_pat;
    }

    let captures = legal_captures_and_promotions(position);
    if captures.is_empty() {
        return stand_pat;
    }

    let mut ordered: Vec<Move> = captures.into_iter().collect();
    let no_killers = KillerMoves::new();
    order_moves(position.board(), &mut ordered, 0, &no_killers);

    if maximizing {
        let mut best = stand_pat;
        for mv in ordered {
            position.make_move(mv);
            let score = quiescence(position, alpha, beta, false, budget - 1);
            position.undo_move();
            best = best.max(score);
            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }
        best
    } else {
        let mut best = stand_pat;
        for mv in ordered {
            position.make_move(mv);
            let score = quiescence(position, alpha, beta, true, budget - 1);
            position.undo_move();
            best = best.min(score);
            beta = beta.min(score);
            if alpha >= beta {
                break;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::{Board, Color, Piece, PieceKind, Square};

    #[test]
    fn quiescence_on_quiet_position_returns_stand_pat() {
        let mut position = Position::new_game();
        let eval = evaluate(&position);
        assert_eq!(
            quiescence(&mut position, i32::MIN, i32::MAX, true, QUIESCENCE_BUDGET),
            eval
        );
    }

    #[test]
    fn minimax_restores_position_on_every_return_path() {
        let mut position = Position::new_game();
        let before = position.clone();
        let mut killers = KillerMoves::new();
        minimax(&mut position, 2, i32::MIN, i32::MAX, true, false, 2, &mut killers);
        assert_eq!(position.board(), before.board());
        assert_eq!(position.side_to_move(), before.side_to_move());
        assert_eq!(position.undo_depth(), before.undo_depth());
    }

    #[test]
    fn depth_zero_without_quiescence_is_plain_evaluation() {
        let mut position = Position::new_game();
        let mut killers = KillerMoves::new();
        let eval = evaluate(&position);
        assert_eq!(
            minimax(&mut position, 0, i32::MIN, i32::MAX, true, false, 0, &mut killers),
            eval
        );
    }

    #[test]
    fn mate_in_one_scores_a_terminal_mate_value() {
        // White: Ke1, Rd1. Black: Kg8, pawns f7/g7/h7 boxing in their own
        // king. Rd1-d8# is a back-rank mate in one.
        let mut board = Board::empty();
        board.set(Square::new(7, 4), Some(Piece::new(Color::White, PieceKind::King)));
        board.set(Square::new(7, 3), Some(Piece::new(Color::White, PieceKind::Rook)));
        board.set(Square::new(0, 6), Some(Piece::new(Color::Black, PieceKind::King)));
        board.set(Square::new(1, 5), Some(Piece::new(Color::Black, PieceKind::Pawn)));
        board.set(Square::new(1, 6), Some(Piece::new(Color::Black, PieceKind::Pawn)));
        board.set(Square::new(1, 7), Some(Piece::new(Color::Black, PieceKind::Pawn)));
        let mut position = Position::from_board(board, Color::White);
        let mut killers = KillerMoves::new();
        // Depth 2 so the recursion reaches Black's (empty) move list one ply
        // after White's mating move; depth 0 never re-checks terminality.
        let score = minimax(&mut position, 2, i32::MIN, i32::MAX, true, false, 2, &mut killers);
        assert!(score > MATE_SCORE - 100);
    }
}
