//! Pseudo-legal move generation and the legality filter.
//!
//! Pseudo-legal generation only consults the board, the side to move, the
//! en-passant target and castling rights — never the move history or move
//! list, which keeps it reusable from both the top-level API and the search
//! agent's quiescence search.

use arrayvec::ArrayVec;

use crate::chess::board::Board;
use crate::chess::core::{Color, Move, Piece, PieceKind, Square};
use crate::chess::position::Position;

/// Upper bound on the number of pseudo-legal moves in any position reachable
/// from ordinary play, with headroom; [`arrayvec::ArrayVec::push`] panics on
/// overflow so this is kept generous rather than exact.
pub const MAX_MOVES: usize = 256;

/// A bounded move list, sized so the search's hot loop never allocates.
pub type MoveList = ArrayVec<Move, MAX_MOVES>;

/// All pseudo-legal moves for the side to move.
#[must_use]
pub(crate) fn pseudo_legal_moves(position: &Position) -> MoveList {
    let mut moves = MoveList::new();
    let mover = position.side_to_move();
    for (square, piece) in position.board().occupied() {
        if piece.color != mover {
            continue;
        }
        match piece.kind {
            PieceKind::Pawn => generate_pawn_moves(position, square, mover, &mut moves),
            PieceKind::Knight => generate_knight_moves(position.board(), square, mover, &mut moves),
            PieceKind::Bishop => generate_slider_moves(position.board(), square, mover, &DIAGONALS, &mut moves),
            PieceKind::Rook => generate_slider_moves(position.board(), square, mover, &ORTHOGONALS, &mut moves),
            PieceKind::Queen => {
                generate_slider_moves(position.board(), square, mover, &DIAGONALS, &mut moves);
                generate_slider_moves(position.board(), square, mover, &ORTHOGONALS, &mut moves);
            },
            PieceKind::King => generate_king_moves(position, square, mover, &mut moves),
        }
    }
    moves
}

/// All legal moves for the side to move: pseudo-legal moves filtered by
/// whether the mover's king is attacked afterwards.
#[must_use]
pub fn legal_moves(position: &Position) -> MoveList {
    let mover = position.side_to_move();
    pseudo_legal_moves(position)
        .into_iter()
        .filter(|&candidate| is_legal(position, candidate, mover))
        .collect()
}

/// Legal moves whose `from` square is `square`.
#[must_use]
pub fn legal_moves_from(position: &Position, square: Square) -> MoveList {
    legal_moves(position)
        .into_iter()
        .filter(|mv| mv.from == square)
        .collect()
}

/// Only the legal captures and promotions, used by quiescence search.
#[must_use]
pub(crate) fn legal_captures_and_promotions(position: &Position) -> MoveList {
    legal_moves(position)
        .into_iter()
        .filter(|mv| mv.capture || mv.promotion.is_some())
        .collect()
}

fn is_legal(position: &Position, candidate: Move, mover: Color) -> bool {
    let mut scratch = *position.board();
    apply_move_to_board(&mut scratch, candidate, mover);
    !scratch.is_in_check(mover)
}

/// Applies a move's effect to `board` in place: moves the piece, relocates
/// the rook for castling, removes the en-passant victim, and substitutes the
/// promoted piece. Returns the piece that was captured, if any (the
/// en-passant victim for en-passant captures). Does not touch castling
/// rights, clocks, move counters or notation — those belong to
/// [`Position::make_move`].
pub(crate) fn apply_move_to_board(board: &mut Board, mv: Move, mover: Color) -> Option<Piece> {
    let moving_piece = board.at(mv.from).expect("apply_move_to_board: empty `from` square");

    let captured = if mv.en_passant {
        let victim_square = Square::new(mv.from.row, mv.to.col);
        let victim = board.at(victim_square);
        board.set(victim_square, None);
        victim
    } else {
        board.at(mv.to)
    };

    board.set(mv.from, None);
    let placed = if let Some(promotion) = mv.promotion {
        Piece::new(mover, promotion)
    } else {
        moving_piece
    };
    board.set(mv.to, Some(placed));

    if mv.castle_king || mv.castle_queen {
        let back_rank = mover.back_rank();
        let (rook_from_col, rook_to_col) = if mv.castle_king { (7, 5) } else { (0, 3) };
        let rook = board.at(Square::new(back_rank, rook_from_col));
        board.set(Square::new(back_rank, rook_from_col), None);
        board.set(Square::new(back_rank, rook_to_col), rook);
    }

    captured
}

const DIAGONALS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const ORTHOGONALS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];
const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

fn generate_pawn_moves(position: &Position, square: Square, mover: Color, moves: &mut MoveList) {
    let board = position.board();
    let forward = mover.pawn_direction();
    let promotion_row = mover.promotion_row();

    let push_row = square.row as i8 + forward;
    if let Some(push_square) = Square::try_from_offsets(push_row, square.col as i8) {
        if board.at(push_square).is_none() {
            push_pawn_move(moves, square, push_square, promotion_row, false);

            if square.row == mover.pawn_start_row() {
                let double_row = square.row as i8 + 2 * forward;
                // `try_from_offsets` is redundant here (double pushes never
                // leave the board) but keeps this branch uniform with the
                // rest of the generator.
                if let Some(double_square) = Square::try_from_offsets(double_row, square.col as i8) {
                    if board.at(double_square).is_none() {
                        let mut mv = Move::quiet(square, double_square);
                        mv.double_push = true;
                        moves.push(mv);
                    }
                }
            }
        }
    }

    for dc in [-1i8, 1] {
        let Some(capture_square) = Square::try_from_offsets(push_row, square.col as i8 + dc) else {
            continue;
        };
        if let Some(target) = board.at(capture_square) {
            if target.color != mover {
                push_pawn_move(moves, square, capture_square, promotion_row, true);
            }
        } else if position.en_passant_target() == Some(capture_square) {
            let mut mv = Move::quiet(square, capture_square).with_capture(true);
            mv.en_passant = true;
            moves.push(mv);
        }
    }
}

fn push_pawn_move(moves: &mut MoveList, from: Square, to: Square, promotion_row: u8, capture: bool) {
    let base = Move::quiet(from, to).with_capture(capture);
    if to.row == promotion_row {
        for kind in PieceKind::PROMOTION_KINDS {
            moves.push(base.with_promotion(kind));
        }
    } else {
        moves.push(base);
    }
}

fn generate_knight_moves(board: &Board, square: Square, mover: Color, moves: &mut MoveList) {
    step_moves(board, square, mover, &KNIGHT_OFFSETS, moves);
}

fn generate_king_moves(position: &Position, square: Square, mover: Color, moves: &mut MoveList) {
    let board = position.board();
    step_moves(board, square, mover, &KING_OFFSETS, moves);

    if square != Square::new(mover.back_rank(), 4) {
        return;
    }
    let back_rank = mover.back_rank();
    let rights = position.castling_rights();

    if rights.contains(crate::chess::core::CastlingRights::kingside(mover))
        && board.at(Square::new(back_rank, 5)).is_none()
        && board.at(Square::new(back_rank, 6)).is_none()
        && !board.is_square_attacked(square, mover)
        && !board.is_square_attacked(Square::new(back_rank, 5), mover)
        && !board.is_square_attacked(Square::new(back_rank, 6), mover)
    {
        let mut mv = Move::quiet(square, Square::new(back_rank, 6));
        mv.castle_king = true;
        moves.push(mv);
    }

    if rights.contains(crate::chess::core::CastlingRights::queenside(mover))
        && board.at(Square::new(back_rank, 1)).is_none()
        && board.at(Square::new(back_rank, 2)).is_none()
        && board.at(Square::new(back_rank, 3)).is_none()
        && !board.is_square_attacked(square, mover)
        && !board.is_square_attacked(Square::new(back_rank, 3), mover)
        && !board.is_square_attacked(Square::new(back_rank, 2), mover)
    {
        let mut mv = Move::quiet(square, Square::new(back_rank, 2));
        mv.castle_queen = true;
        moves.push(mv);
    }
}

fn step_moves(board: &Board, square: Square, mover: Color, offsets: &[(i8, i8)], moves: &mut MoveList) {
    for &(dr, dc) in offsets {
        let Some(dest) = Square::try_from_offsets(square.row as i8 + dr, square.col as i8 + dc) else {
            continue;
        };
        match board.at(dest) {
            None => moves.push(Move::quiet(square, dest)),
            Some(target) if target.color != mover => {
                moves.push(Move::quiet(square, dest).with_capture(true));
            },
            Some(_) => {},
        }
    }
}

fn generate_slider_moves(
    board: &Board,
    square: Square,
    mover: Color,
    directions: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &(dr, dc) in directions {
        let mut row = square.row as i8 + dr;
        let mut col = square.col as i8 + dc;
        while Square::in_bounds(row, col) {
            let dest = Square::new(row as u8, col as u8);
            match board.at(dest) {
                None => moves.push(Move::quiet(square, dest)),
                Some(target) => {
                    if target.color != mover {
                        moves.push(Move::quiet(square, dest).with_capture(true));
                    }
                    break;
                },
            }
            row += dr;
            col += dc;
        }
    }
}
