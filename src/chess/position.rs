//! [`Position`]: the complete, mutable game state. Make/unmake are the only
//! operations that mutate it.

use crate::chess::board::Board;
use crate::chess::core::{CastlingRights, Color, Move, Piece, PieceKind, Square};
use crate::chess::error::IllegalMoveError;
use crate::chess::movegen::{self, MoveList};
use crate::chess::san;

/// The outcome of a finished game, or [`GameResult::Unset`] while play
/// continues.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum GameResult {
    #[default]
    Unset,
    WhiteWins,
    BlackWins,
    Draw,
}

/// What [`Position::make_move`] reports back to the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MakeMoveResult {
    pub notation: String,
    pub captured: Option<Piece>,
    pub in_check: bool,
    pub is_game_over: bool,
    pub result: GameResult,
}

/// A delta record sufficient to reverse one ply: lighter than a deep board
/// copy, so `make_move`/`undo_move` do not allocate on the search hot path.
#[derive(Copy, Clone, Debug)]
struct Undo {
    mv: Move,
    moved_piece: Piece,
    captured: Option<Piece>,
    prior_castling_rights: CastlingRights,
    prior_en_passant_target: Option<Square>,
    prior_halfmove_clock: u32,
    prior_fullmove_number: u32,
    prior_side_to_move: Color,
}

/// The complete state required to compute and resume play. See the data
/// model in the specification for the field-by-field contract.
#[derive(Clone, Debug)]
pub struct Position {
    board: Board,
    side_to_move: Color,
    castling_rights: CastlingRights,
    en_passant_target: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,
    captured_white: Vec<Piece>,
    captured_black: Vec<Piece>,
    move_list: Vec<String>,
    undo_stack: Vec<Undo>,
    is_game_over: bool,
    result: GameResult,
}

impl Position {
    /// The standard initial position.
    #[must_use]
    pub fn new_game() -> Self {
        Self {
            board: Board::starting(),
            side_to_move: Color::White,
            castling_rights: CastlingRights::default(),
            en_passant_target: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            captured_white: Vec::new(),
            captured_black: Vec::new(),
            move_list: Vec::new(),
            undo_stack: Vec::new(),
            is_game_over: false,
            result: GameResult::Unset,
        }
    }

    /// Builds a position directly from a board and side to move, with no
    /// castling rights or en-passant target. Intended for tests and for the
    /// search agent's curated evaluation/tactics positions; never exposed as
    /// a FEN/PGN import boundary.
    #[must_use]
    pub fn from_board(board: Board, side_to_move: Color) -> Self {
        Self {
            board,
            side_to_move,
            castling_rights: CastlingRights::empty(),
            en_passant_target: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            captured_white: Vec::new(),
            captured_black: Vec::new(),
            move_list: Vec::new(),
            undo_stack: Vec::new(),
            is_game_over: false,
            result: GameResult::Unset,
        }
    }

    /// Grants castling rights on a position built with [`Position::from_board`];
    /// used by tests that set up castling scenarios without the full move
    /// history that would normally establish those rights.
    #[must_use]
    pub fn with_castling_rights(mut self, rights: CastlingRights) -> Self {
        self.castling_rights = rights;
        self
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Alias matching the UI collaborator's `pos.turn` field.
    #[must_use]
    pub fn turn(&self) -> Color {
        self.side_to_move
    }

    #[must_use]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[must_use]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }

    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[must_use]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    #[must_use]
    pub fn captured_white(&self) -> &[Piece] {
        &self.captured_white
    }

    #[must_use]
    pub fn captured_black(&self) -> &[Piece] {
        &self.captured_black
    }

    #[must_use]
    pub fn move_list(&self) -> &[String] {
        &self.move_list
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.is_game_over
    }

    #[must_use]
    pub fn result(&self) -> GameResult {
        self.result
    }

    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Applies a legal move. `mv` must come from [`legal_moves_from`] or
    /// [`crate::engine::get_bot_move`]: passing anything else is an
    /// invariant violation the core is free to abort on, and in debug builds
    /// will.
    ///
    /// [`legal_moves_from`]: crate::chess::movegen::legal_moves_from
    #[allow(clippy::missing_panics_doc)]
    pub fn make_move(&mut self, mv: Move) -> MakeMoveResult {
        let mover = self.side_to_move;
        let pre_legal = movegen::legal_moves(self);
        debug_assert!(
            pre_legal.contains(&mv),
            "{}",
            IllegalMoveError::NotLegal(mv)
        );

        let mut notation = san::build(self, mv, &pre_legal);
        let moved_piece = self
            .board
            .at(mv.from)
            .expect("make_move: empty `from` square");

        let snapshot = Undo {
            mv,
            moved_piece,
            captured: None,
            prior_castling_rights: self.castling_rights,
            prior_en_passant_target: self.en_passant_target,
            prior_halfmove_clock: self.halfmove_clock,
            prior_fullmove_number: self.fullmove_number,
            prior_side_to_move: self.side_to_move,
        };

        let captured = self.apply_ply(mv, mover, moved_piece);
        if let Some(piece) = captured {
            match piece.color {
                Color::White => self.captured_white.push(piece),
                Color::Black => self.captured_black.push(piece),
            }
        }
        self.undo_stack.push(Undo { captured, ..snapshot });

        let opponent = mover.opposite();
        let opponent_moves = movegen::legal_moves(self);
        let in_check = self.board.is_in_check(opponent);
        let checkmate = opponent_moves.is_empty() && in_check;
        let stalemate = opponent_moves.is_empty() && !in_check;

        let (is_game_over, result) = if checkmate {
            (true, Self::winner(mover))
        } else if stalemate {
            (true, GameResult::Draw)
        } else if is_insufficient_material(&self.board) {
            (true, GameResult::Draw)
        } else if self.halfmove_clock >= 100 {
            (true, GameResult::Draw)
        } else {
            (false, GameResult::Unset)
        };

        if checkmate {
            notation.push('#');
        } else if in_check {
            notation.push('+');
        }

        self.is_game_over = is_game_over;
        self.result = result;
        self.move_list.push(notation.clone());
        log::debug!(
            "ply {}: {notation} (game_over={is_game_over}, result={result:?})",
            self.undo_stack.len()
        );

        MakeMoveResult {
            notation,
            captured,
            in_check,
            is_game_over,
            result,
        }
    }

    /// Reverses the most recent `make_move`. Returns `false` (not an error)
    /// if there is nothing to undo.
    pub fn undo_move(&mut self) -> bool {
        let Some(undo) = self.undo_stack.pop() else {
            return false;
        };
        let mover = undo.prior_side_to_move;
        let mv = undo.mv;

        if mv.castle_king || mv.castle_queen {
            let back_rank = mover.back_rank();
            let (rook_from_col, rook_to_col) = if mv.castle_king { (7, 5) } else { (0, 3) };
            let rook = self.board.at(Square::new(back_rank, rook_to_col));
            self.board.set(Square::new(back_rank, rook_to_col), None);
            self.board.set(Square::new(back_rank, rook_from_col), rook);
        }

        if mv.en_passant {
            let victim_square = Square::new(mv.from.row, mv.to.col);
            self.board.set(mv.to, None);
            self.board.set(victim_square, undo.captured);
        } else {
            self.board.set(mv.to, undo.captured);
        }
        self.board.set(mv.from, Some(undo.moved_piece));

        if let Some(piece) = undo.captured {
            match piece.color {
                Color::White => {
                    self.captured_white.pop();
                },
                Color::Black => {
                    self.captured_black.pop();
                },
            }
        }

        self.castling_rights = undo.prior_castling_rights;
        self.en_passant_target = undo.prior_en_passant_target;
        self.halfmove_clock = undo.prior_halfmove_clock;
        self.fullmove_number = undo.prior_fullmove_number;
        self.side_to_move = undo.prior_side_to_move;
        self.is_game_over = false;
        self.result = GameResult::Unset;
        self.move_list.pop();
        true
    }

    /// Mutates board, castling rights, en-passant target and clocks for one
    /// ply, without touching notation, captured-piece lists, the undo stack
    /// or terminal detection. Shared by `make_move` and [`perft`], which
    /// needs the board effect but not the bookkeeping.
    fn apply_ply(&mut self, mv: Move, mover: Color, moved_piece: Piece) -> Option<Piece> {
        let captured = movegen::apply_move_to_board(&mut self.board, mv, mover);
        self.castling_rights =
            updated_castling_rights(self.castling_rights, mover, mv, moved_piece, captured);
        self.en_passant_target = mv
            .double_push
            .then(|| Square::new((mv.from.row + mv.to.row) / 2, mv.from.col));
        let resets_clock = moved_piece.kind == PieceKind::Pawn || captured.is_some();
        self.halfmove_clock = if resets_clock {
            0
        } else {
            self.halfmove_clock + 1
        };
        if mover == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = mover.opposite();
        captured
    }

    /// Legal move counts for White and for Black, in that order, used by the
    /// mobility evaluation term: temporarily swap `side_to_move` and count
    /// legal moves for each side. Since evaluation only ever holds a shared
    /// reference, this swaps on a clone rather than mutating and restoring
    /// `self` in place; the externally observable result (two move counts,
    /// `self` untouched) is the same.
    #[must_use]
    pub(crate) fn legal_move_counts(&self) -> (usize, usize) {
        let own = movegen::legal_moves(self).len();
        let mut flipped = self.clone();
        flipped.side_to_move = self.side_to_move.opposite();
        let other = movegen::legal_moves(&flipped).len();
        match self.side_to_move {
            Color::White => (own, other),
            Color::Black => (other, own),
        }
    }

    fn winner(mover: Color) -> GameResult {
        match mover {
            Color::White => GameResult::WhiteWins,
            Color::Black => GameResult::BlackWins,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new_game()
    }
}

fn updated_castling_rights(
    old: CastlingRights,
    mover: Color,
    mv: Move,
    moved_piece: Piece,
    captured: Option<Piece>,
) -> CastlingRights {
    let mut rights = old;
    if moved_piece.kind == PieceKind::King {
        rights.remove(CastlingRights::for_color(mover));
    }
    if moved_piece.kind == PieceKind::Rook {
        if mv.from == Square::new(mover.back_rank(), 0) {
            rights.remove(CastlingRights::queenside(mover));
        }
        if mv.from == Square::new(mover.back_rank(), 7) {
            rights.remove(CastlingRights::kingside(mover));
        }
    }
    if let Some(piece) = captured {
        if piece.kind == PieceKind::Rook {
            let opponent = mover.opposite();
            if mv.to == Square::new(opponent.back_rank(), 0) {
                rights.remove(CastlingRights::queenside(opponent));
            }
            if mv.to == Square::new(opponent.back_rank(), 7) {
                rights.remove(CastlingRights::kingside(opponent));
            }
        }
    }
    rights
}

/// Draw by insufficient material. Sufficient material is the default; only
/// three combinations count as insufficient: bare kings, king plus one minor
/// against a bare king, and king plus bishop against king plus
/// same-colored bishop.
#[must_use]
pub(crate) fn is_insufficient_material(board: &Board) -> bool {
    let mut white_knights = 0u32;
    let mut black_knights = 0u32;
    let mut white_bishops_on_light = 0u32;
    let mut white_bishops_on_dark = 0u32;
    let mut black_bishops_on_light = 0u32;
    let mut black_bishops_on_dark = 0u32;

    for (square, piece) in board.occupied() {
        match piece.kind {
            PieceKind::King => {},
            PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
            PieceKind::Knight => match piece.color {
                Color::White => white_knights += 1,
                Color::Black => black_knights += 1,
            },
            PieceKind::Bishop => {
                let light = square_is_light(square);
                match (piece.color, light) {
                    (Color::White, true) => white_bishops_on_light += 1,
                    (Color::White, false) => white_bishops_on_dark += 1,
                    (Color::Black, true) => black_bishops_on_light += 1,
                    (Color::Black, false) => black_bishops_on_dark += 1,
                }
            },
        }
    }

    let white_minors = white_knights + white_bishops_on_light + white_bishops_on_dark;
    let black_minors = black_knights + black_bishops_on_light + black_bishops_on_dark;

    match (white_minors, black_minors) {
        (0, 0) | (1, 0) | (0, 1) => true,
        (1, 1) => {
            let both_bishops = white_knights == 0 && black_knights == 0;
            both_bishops
                && ((white_bishops_on_light == 1 && black_bishops_on_light == 1)
                    || (white_bishops_on_dark == 1 && black_bishops_on_dark == 1))
        },
        _ => false,
    }
}

fn square_is_light(square: Square) -> bool {
    (square.row + square.col) % 2 != 0
}

/// Counts leaf nodes at `depth` plies from `position`, generating, applying
/// and unwinding every legal move recursively. A correctness cross-check for
/// move generation, not part of the external interface.
#[must_use]
pub fn perft(position: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = movegen::legal_moves(position);
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .iter()
        .map(|&mv| {
            let mover = position.side_to_move;
            let moved_piece = position
                .board
                .at(mv.from)
                .expect("perft: empty `from` square");
            let mut next = position.clone();
            next.apply_ply(mv, mover, moved_piece);
            perft(&next, depth - 1)
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_game_has_full_castling_rights_and_no_en_passant() {
        let position = Position::new_game();
        assert_eq!(position.castling_rights(), CastlingRights::all());
        assert_eq!(position.en_passant_target(), None);
        assert_eq!(position.fullmove_number(), 1);
        assert_eq!(position.halfmove_clock(), 0);
    }

    #[test]
    fn perft_matches_well_known_starting_position_counts() {
        let position = Position::new_game();
        assert_eq!(perft(&position, 1), 20);
        assert_eq!(perft(&position, 2), 400);
        assert_eq!(perft(&position, 3), 8_902);
        assert_eq!(perft(&position, 4), 197_281);
    }

    #[test]
    fn make_then_undo_restores_the_position_exactly() {
        let mut position = Position::new_game();
        let before = position.clone();
        let mv = movegen::legal_moves(&position)[0];
        position.make_move(mv);
        assert!(position.undo_move());
        assert_eq!(position.board(), before.board());
        assert_eq!(position.side_to_move(), before.side_to_move());
        assert_eq!(position.castling_rights(), before.castling_rights());
        assert_eq!(position.en_passant_target(), before.en_passant_target());
        assert_eq!(position.halfmove_clock(), before.halfmove_clock());
        assert_eq!(position.move_list(), before.move_list());
        assert_eq!(position.is_game_over(), before.is_game_over());
        assert_eq!(position.result(), before.result());
    }

    #[test]
    fn undo_on_empty_stack_returns_false() {
        let mut position = Position::new_game();
        assert!(!position.undo_move());
    }

    #[test]
    fn double_push_sets_en_passant_target_behind_the_pawn() {
        let mut position = Position::new_game();
        let e4 = movegen::legal_moves(&position)
            .into_iter()
            .find(|m| m.from == Square::new(6, 4) && m.to == Square::new(4, 4))
            .unwrap();
        position.make_move(e4);
        assert_eq!(position.en_passant_target(), Some(Square::new(5, 4)));
        let a6 = movegen::legal_moves(&position)
            .into_iter()
            .find(|m| m.from == Square::new(1, 0) && m.to == Square::new(2, 0))
            .unwrap();
        position.make_move(a6);
        assert_eq!(position.en_passant_target(), None);
    }

    #[test]
    fn insufficient_material_same_color_bishops_is_a_draw() {
        use crate::chess::core::PieceKind::{Bishop, King};
        let mut board = Board::empty();
        board.set(Square::new(7, 4), Some(Piece::new(Color::White, King)));
        board.set(Square::new(0, 4), Some(Piece::new(Color::Black, King)));
        board.set(Square::new(7, 2), Some(Piece::new(Color::White, Bishop)));
        board.set(Square::new(0, 5), Some(Piece::new(Color::Black, Bishop)));
        // c1 (row7,col2) and f8 (row0,col5) are both dark squares.
        assert!(is_insufficient_material(&board));
    }

    #[test]
    fn insufficient_material_opposite_color_bishops_is_sufficient() {
        use crate::chess::core::PieceKind::{Bishop, King};
        let mut board = Board::empty();
        board.set(Square::new(7, 4), Some(Piece::new(Color::White, King)));
        board.set(Square::new(0, 4), Some(Piece::new(Color::Black, King)));
        board.set(Square::new(7, 2), Some(Piece::new(Color::White, Bishop)));
        board.set(Square::new(0, 3), Some(Piece::new(Color::Black, Bishop)));
        assert!(!is_insufficient_material(&board));
    }
}
