//! The single error type the Rules Engine uses: one that documents an
//! invariant violation rather than a recoverable condition.

use crate::chess::core::Move;

/// Raised (as a `debug_assert!` message, never as a `Result`) when a caller
/// hands [`crate::chess::position::Position::make_move`] a move that was
/// not present in the position's own legal-move set. This is undefined
/// behavior from the caller's standpoint: debug builds catch it early with
/// this message, release builds compile the check out entirely.
#[derive(thiserror::Error, Debug)]
pub(crate) enum IllegalMoveError {
    #[error("move {0:?} is not legal in the current position; callers must only submit moves returned by legal_moves_from or get_bot_move")]
    NotLegal(Move),
}
