//! King safety (non-endgame only): a pawn shield check on the three files
//! around each king.

use crate::chess::{Board, Color, PieceKind, Square};

const SHIELD_BONUS: i32 = 15;
const SHIELD_PENALTY: i32 = 15;

/// For each of the three files around a king, +15 if a friendly pawn sits
/// one rank in front, else -15. Signed from White's perspective; a side
/// missing its king (never reached by legal play) contributes 0.
#[must_use]
pub(super) fn king_safety_score(board: &Board) -> i32 {
    let mut score = 0;
    if let Some(king) = board.find_king(Color::White) {
        score += shield_score(board, Color::White, king);
    }
    if let Some(king) = board.find_king(Color::Black) {
        score -= shield_score(board, Color::Black, king);
    }
    score
}

fn shield_score(board: &Board, color: Color, king: Square) -> i32 {
    let shield_row = king.row as i32 + color.pawn_direction() as i32;
    let mut score = 0;
    for file in [king.col as i32 - 1, king.col as i32, king.col as i32 + 1] {
        if !(0..8).contains(&file) || !(0..8).contains(&shield_row) {
            continue;
        }
        let shielded = board
            .at(Square::new(shield_row as u8, file as u8))
            .is_some_and(|p| p.color == color && p.kind == PieceKind::Pawn);
        score += if shielded { SHIELD_BONUS } else { -SHIELD_PENALTY };
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::Piece;

    #[test]
    fn starting_board_king_shields_are_symmetric() {
        assert_eq!(king_safety_score(&Board::starting()), 0);
    }

    #[test]
    fn castled_king_with_full_shield_scores_positively() {
        let mut board = Board::empty();
        board.set(Square::new(7, 6), Some(Piece::new(Color::White, PieceKind::King)));
        board.set(Square::new(6, 5), Some(Piece::new(Color::White, PieceKind::Pawn)));
        board.set(Square::new(6, 6), Some(Piece::new(Color::White, PieceKind::Pawn)));
        board.set(Square::new(6, 7), Some(Piece::new(Color::White, PieceKind::Pawn)));
        assert_eq!(king_safety_score(&board), 3 * SHIELD_BONUS);
    }

    #[test]
    fn exposed_king_scores_negatively() {
        let mut board = Board::empty();
        board.set(Square::new(7, 6), Some(Piece::new(Color::White, PieceKind::King)));
        assert_eq!(king_safety_score(&board), -3 * SHIELD_PENALTY);
    }
}
