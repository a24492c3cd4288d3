//! The 8x8 grid and the square-attack query that both move generation and
//! the legality filter are built on.

use crate::chess::core::{Color, Piece, PieceKind, Square};

/// An 8x8 grid of optional pieces. Row 0 is Black's back rank, row 7 is
/// White's back rank, column 0 is the a-file.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Board {
    /// An empty board.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            squares: [[None; 8]; 8],
        }
    }

    /// The standard initial arrangement.
    #[must_use]
    pub fn starting() -> Self {
        let mut board = Self::empty();
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for col in 0..8u8 {
            board.set(
                Square::new(0, col),
                Some(Piece::new(Color::Black, BACK_RANK[col as usize])),
            );
            board.set(
                Square::new(1, col),
                Some(Piece::new(Color::Black, PieceKind::Pawn)),
            );
            board.set(
                Square::new(6, col),
                Some(Piece::new(Color::White, PieceKind::Pawn)),
            );
            board.set(
                Square::new(7, col),
                Some(Piece::new(Color::White, BACK_RANK[col as usize])),
            );
        }
        board
    }

    #[must_use]
    pub fn at(&self, square: Square) -> Option<Piece> {
        self.squares[square.row as usize][square.col as usize]
    }

    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.row as usize][square.col as usize] = piece;
    }

    /// Iterates over every occupied square in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        (0..8u8).flat_map(move |row| {
            (0..8u8).filter_map(move |col| {
                let square = Square::new(row, col);
                self.at(square).map(|piece| (square, piece))
            })
        })
    }

    /// Locates `color`'s king. Per invariant I1 this is always `Some` for a
    /// board reached by legal play, but boards constructed ad hoc by tests
    /// may violate it, so callers get an `Option` rather than a panic.
    #[must_use]
    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.occupied()
            .find(|(_, piece)| piece.color == color && piece.kind == PieceKind::King)
            .map(|(square, _)| square)
    }

    /// Counts pieces of a given color and kind, used by evaluation terms and
    /// by the insufficient-material check.
    #[must_use]
    pub fn count(&self, color: Color, kind: PieceKind) -> usize {
        self.occupied()
            .filter(|(_, piece)| piece.color == color && piece.kind == kind)
            .count()
    }

    /// Whether `defender`'s king is currently attacked. Returns `false` (not
    /// a panic) if `defender` has no king on this board.
    #[must_use]
    pub fn is_in_check(&self, defender: Color) -> bool {
        match self.find_king(defender) {
            Some(king_square) => self.is_square_attacked(king_square, defender),
            None => false,
        }
    }

    /// Returns true iff any piece of the color opposing `defender` attacks
    /// `square`. This is a pure function of the board and does not consult
    /// en-passant target or castling rights.
    #[must_use]
    pub fn is_square_attacked(&self, square: Square, defender: Color) -> bool {
        let attacker = defender.opposite();

        if self.pawn_attacks(square, defender, attacker) {
            return true;
        }
        if self.knight_attacks(square, attacker) {
            return true;
        }
        if self.king_attacks(square, attacker) {
            return true;
        }
        if self.slides_attack(
            square,
            attacker,
            &[(-1, -1), (-1, 1), (1, -1), (1, 1)],
            &[PieceKind::Bishop, PieceKind::Queen],
        ) {
            return true;
        }
        if self.slides_attack(
            square,
            attacker,
            &[(-1, 0), (1, 0), (0, -1), (0, 1)],
            &[PieceKind::Rook, PieceKind::Queen],
        ) {
            return true;
        }
        false
    }

    fn pawn_attacks(&self, square: Square, defender: Color, attacker: Color) -> bool {
        // A pawn attacking `square` sits one step back along the attacker's
        // own forward direction, i.e. the defender's forward direction,
        // diagonally adjacent.
        let forward = defender.pawn_direction();
        for dc in [-1i8, 1] {
            if let Some(origin) =
                Square::try_from_offsets(square.row as i8 - forward, square.col as i8 + dc)
            {
                if let Some(piece) = self.at(origin) {
                    if piece.color == attacker && piece.kind == PieceKind::Pawn {
                        return true;
                    }
                }
            }
        }
        false
    }

    fn knight_attacks(&self, square: Square, attacker: Color) -> bool {
        const OFFSETS: [(i8, i8); 8] = [
            (-2, -1),
            (-2, 1),
            (-1, -2),
            (-1, 2),
            (1, -2),
            (1, 2),
            (2, -1),
            (2, 1),
        ];
        OFFSETS.iter().any(|&(dr, dc)| {
            Square::try_from_offsets(square.row as i8 + dr, square.col as i8 + dc).is_some_and(
                |origin| {
                    self.at(origin)
                        .is_some_and(|p| p.color == attacker && p.kind == PieceKind::Knight)
                },
            )
        })
    }

    fn king_attacks(&self, square: Square, attacker: Color) -> bool {
        const OFFSETS: [(i8, i8); 8] = [
            (-1, -1),
            (-1, 0),
            (-1, 1),
            (0, -1),
            (0, 1),
            (1, -1),
            (1, 0),
            (1, 1),
        ];
        OFFSETS.iter().any(|&(dr, dc)| {
            Square::try_from_offsets(square.row as i8 + dr, square.col as i8 + dc).is_some_and(
                |origin| {
                    self.at(origin)
                        .is_some_and(|p| p.color == attacker && p.kind == PieceKind::King)
                },
            )
        })
    }

    /// Projects rays from `square` along `directions` and checks whether the
    /// first occupied square hit along each ray is an enemy piece of one of
    /// `kinds`.
    fn slides_attack(
        &self,
        square: Square,
        attacker: Color,
        directions: &[(i8, i8)],
        kinds: &[PieceKind],
    ) -> bool {
        for &(dr, dc) in directions {
            let mut row = square.row as i8 + dr;
            let mut col = square.col as i8 + dc;
            while Square::in_bounds(row, col) {
                let here = Square::new(row as u8, col as u8);
                if let Some(piece) = self.at(here) {
                    if piece.color == attacker && kinds.contains(&piece.kind) {
                        return true;
                    }
                    break;
                }
                row += dr;
                col += dc;
            }
        }
        false
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::starting()
    }
}
