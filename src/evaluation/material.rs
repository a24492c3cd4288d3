//! Material balance and the bishop-pair bonus.

use crate::chess::{Board, Color, PieceKind};

const BISHOP_PAIR_BONUS: i32 = 50;

/// Signed material balance plus the bishop-pair bonus for each side that
/// holds two or more bishops.
#[must_use]
pub(super) fn material_and_bishop_pair(board: &Board) -> i32 {
    let mut score = 0;
    for (_, piece) in board.occupied() {
        let sign = match piece.color {
            Color::White => 1,
            Color::Black => -1,
        };
        score += sign * piece.kind.value();
    }

    if board.count(Color::White, PieceKind::Bishop) >= 2 {
        score += BISHOP_PAIR_BONUS;
    }
    if board.count(Color::Black, PieceKind::Bishop) >= 2 {
        score -= BISHOP_PAIR_BONUS;
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_board_is_material_balanced() {
        assert_eq!(material_and_bishop_pair(&Board::starting()), 0);
    }

    #[test]
    fn extra_white_knight_is_worth_a_knight() {
        use crate::chess::{Piece, Square};
        let mut board = Board::starting();
        board.set(Square::new(4, 4), Some(Piece::new(Color::White, PieceKind::Knight)));
        assert_eq!(material_and_bishop_pair(&board), PieceKind::Knight.value());
    }

    #[test]
    fn bishop_pair_bonus_applies_once_per_side() {
        use crate::chess::{Piece, Square};
        let mut board = Board::empty();
        board.set(Square::new(7, 4), Some(Piece::new(Color::White, PieceKind::King)));
        board.set(Square::new(0, 4), Some(Piece::new(Color::Black, PieceKind::King)));
        board.set(Square::new(7, 2), Some(Piece::new(Color::White, PieceKind::Bishop)));
        board.set(Square::new(7, 5), Some(Piece::new(Color::White, PieceKind::Bishop)));
        let without_pair = material_and_bishop_pair(&board) - PieceKind::Bishop.value() * 2;
        assert_eq!(without_pair, BISHOP_PAIR_BONUS);
    }
}
