//! The thin facade a UI collaborator calls. Everything here is a
//! direct pass-through to [`crate::chess`] and [`crate::search`]; this
//! module exists so external callers depend on one surface rather than
//! reaching into the Rules Engine and Search Agent directly, giving the
//! external interface exactly one place it is implemented.

use crate::chess::{self, Board, Color, MakeMoveResult, Move, Piece, Position, Square};
use crate::search::{self, Difficulty};

/// The standard initial position.
#[must_use]
pub fn new_game() -> Position {
    Position::new_game()
}

/// Legal moves originating from one square.
#[must_use]
pub fn legal_moves_from(position: &Position, square: Square) -> Vec<Move> {
    chess::legal_moves_from(position, square).into_iter().collect()
}

/// Every legal move for the side to move.
#[must_use]
pub fn all_legal_moves(position: &Position) -> Vec<Move> {
    chess::legal_moves(position).into_iter().collect()
}

/// Applies `mv` to `position`, returning its notation, any capture, and
/// whether the game ended. `mv` must come from [`legal_moves_from`],
/// [`all_legal_moves`] or [`get_bot_move`].
pub fn make_move(position: &mut Position, mv: Move) -> MakeMoveResult {
    position.make_move(mv)
}

/// Reverses the most recent move. `false` if there is nothing to undo.
pub fn undo_move(position: &mut Position) -> bool {
    position.undo_move()
}

/// Whether `side`'s king is currently attacked.
#[must_use]
pub fn is_in_check(board: &Board, side: Color) -> bool {
    board.is_in_check(side)
}

/// Locates `side`'s king on the board.
#[must_use]
pub fn find_king(board: &Board, side: Color) -> Option<Square> {
    board.find_king(side)
}

/// Whether any piece of the side opposing `defender_side` attacks `square`.
#[must_use]
pub fn is_square_attacked(board: &Board, square: Square, defender_side: Color) -> bool {
    board.is_square_attacked(square, defender_side)
}

/// Unicode glyph for a piece, for terminal or text display.
#[must_use]
pub fn piece_unicode(piece: Piece) -> char {
    piece.unicode()
}

/// Centipawn value of a piece kind, for display purposes.
#[must_use]
pub fn piece_value(piece: Piece) -> i32 {
    piece.kind.value()
}

/// Selects and plays a move for `position`'s side to move at the given
/// strength. Mutates `position` during search but restores it via unmake on
/// every return path, so it is bit-identical to its state on entry once this
/// returns.
#[must_use]
pub fn get_bot_move(position: &mut Position, difficulty: Difficulty) -> Option<Move> {
    search::select_move(position, difficulty)
}
