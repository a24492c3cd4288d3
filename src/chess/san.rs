//! Standard Algebraic Notation construction. Notation is built from
//! the position *before* the move is applied, since disambiguation depends
//! on the legal-move set at that point; the "+"/"#" suffix is appended
//! afterwards by [`crate::chess::position::Position::make_move`] once
//! check/checkmate is known.

use crate::chess::core::{Move, PieceKind};
use crate::chess::movegen::MoveList;
use crate::chess::position::Position;

/// Builds the SAN for `mv` in `position`, using `legal_moves` (the full
/// legal-move set of `position` before `mv` is applied) for disambiguation.
/// Does not include the trailing "+"/"#" suffix.
#[must_use]
pub(crate) fn build(position: &Position, mv: Move, legal_moves: &MoveList) -> String {
    if mv.castle_king {
        return "O-O".to_string();
    }
    if mv.castle_queen {
        return "O-O-O".to_string();
    }

    let moving_piece = position
        .board()
        .at(mv.from)
        .expect("san::build: empty `from` square");

    let mut notation = String::new();
    if moving_piece.kind == PieceKind::Pawn {
        if mv.capture {
            notation.push(mv.from.file_letter());
        }
    } else {
        notation.push(moving_piece.kind.letter());
        notation.push_str(&disambiguation(position, mv, moving_piece.kind, legal_moves));
    }

    if mv.capture {
        notation.push('x');
    }
    notation.push_str(&mv.to.to_string());

    if let Some(promotion) = mv.promotion {
        notation.push('=');
        notation.push(promotion.letter());
    }

    notation
}

/// Disambiguation when another same-kind piece of the same color can
/// legally move to the same destination: prefer the file letter; if files
/// collide, use the rank digit; if both collide, use both.
fn disambiguation(
    position: &Position,
    mv: Move,
    kind: PieceKind,
    legal_moves: &MoveList,
) -> String {
    let competitors: Vec<Move> = legal_moves
        .iter()
        .filter(|candidate| {
            candidate.to == mv.to
                && candidate.from != mv.from
                && position
                    .board()
                    .at(candidate.from)
                    .is_some_and(|piece| piece.kind == kind)
        })
        .copied()
        .collect();

    if competitors.is_empty() {
        return String::new();
    }

    let file_collides = competitors.iter().any(|m| m.from.col == mv.from.col);
    let rank_collides = competitors.iter().any(|m| m.from.row == mv.from.row);

    if !file_collides {
        mv.from.file_letter().to_string()
    } else if !rank_collides {
        mv.from.rank_digit().to_string()
    } else {
        format!("{}{}", mv.from.file_letter(), mv.from.rank_digit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::core::Square;

    #[test]
    fn pawn_push_has_no_piece_letter() {
        let position = Position::new_game();
        let legal = crate::chess::movegen::legal_moves(&position);
        let mv = legal
            .iter()
            .find(|m| m.from == Square::new(6, 4) && m.to == Square::new(5, 4))
            .copied()
            .unwrap();
        assert_eq!(build(&position, mv, &legal), "e3");
    }

    #[test]
    fn knight_opening_move_has_piece_letter_and_no_disambiguation() {
        let position = Position::new_game();
        let legal = crate::chess::movegen::legal_moves(&position);
        let mv = legal
            .iter()
            .find(|m| m.from == Square::new(7, 1) && m.to == Square::new(5, 2))
            .copied()
            .unwrap();
        assert_eq!(build(&position, mv, &legal), "Nc3");
    }
}
