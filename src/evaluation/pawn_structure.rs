//! Pawn-structure terms: doubled, isolated and passed pawns, plus the rook
//! open/semi-open file bonus which is keyed off the same per-file pawn
//! counts.

use crate::chess::{Board, Color, PieceKind};

const DOUBLED_PAWN_PENALTY: i32 = 15;
const ISOLATED_PAWN_PENALTY: i32 = 20;
const PASSED_PAWN_UNIT: i32 = 15;
const ROOK_OPEN_FILE_BONUS: i32 = 25;
const ROOK_SEMI_OPEN_FILE_BONUS: i32 = 15;

/// Per-file pawn counts and the most advanced row, kept separately for each
/// color so passed/doubled/isolated checks can all share one pass over the
/// board.
struct PawnFiles {
    /// Number of pawns on each file, per color.
    count: [[u32; 8]; 2],
    /// The most advanced (lowest row for White, highest row for Black) pawn
    /// on each file, per color; `None` if the file is empty for that color.
    most_advanced: [[Option<u8>; 8]; 2],
}

impl PawnFiles {
    fn build(board: &Board) -> Self {
        let mut count = [[0u32; 8]; 2];
        let mut most_advanced: [[Option<u8>; 8]; 2] = [[None; 8]; 2];
        for (square, piece) in board.occupied() {
            if piece.kind != PieceKind::Pawn {
                continue;
            }
            let side = color_index(piece.color);
            let file = square.col as usize;
            count[side][file] += 1;
            let better = match (most_advanced[side][file], piece.color) {
                (None, _) => true,
                (Some(existing), Color::White) => square.row < existing,
                (Some(existing), Color::Black) => square.row > existing,
            };
            if better {
                most_advanced[side][file] = Some(square.row);
            }
        }
        Self { count, most_advanced }
    }

    fn count_at(&self, color: Color, file: i32) -> u32 {
        if !(0..8).contains(&file) {
            return 0;
        }
        self.count[color_index(color)][file as usize]
    }
}

const fn color_index(color: Color) -> usize {
    match color {
        Color::White => 0,
        Color::Black => 1,
    }
}

/// Doubled, isolated and passed pawn terms, signed from White's perspective.
#[must_use]
pub(super) fn pawn_structure_score(board: &Board) -> i32 {
    let files = PawnFiles::build(board);
    let mut score = 0;

    for color in [Color::White, Color::Black] {
        let sign = sign_for(color);
        for file in 0..8i32 {
            let on_file = files.count_at(color, file);
            if on_file == 0 {
                continue;
            }
            if on_file > 1 {
                score += sign * DOUBLED_PAWN_PENALTY * (on_file as i32 - 1);
            }
            let has_neighbor =
                files.count_at(color, file - 1) > 0 || files.count_at(color, file + 1) > 0;
            if !has_neighbor {
                score += sign * ISOLATED_PAWN_PENALTY;
            }
        }
    }

    score += passed_pawn_score(board, &files);
    score
}

/// Passed pawns: for each file with a friendly pawn, take the most advanced
/// one and check whether no enemy pawn sits on the same or an adjacent file
/// between it and promotion.
fn passed_pawn_score(board: &Board, files: &PawnFiles) -> i32 {
    let mut score = 0;
    for color in [Color::White, Color::Black] {
        let side = color_index(color);
        let enemy = color.opposite();
        for file in 0..8usize {
            let Some(row) = files.most_advanced[side][file] else {
                continue;
            };
            if is_passed(board, color, enemy, row, file as i32) {
                let advancement = match color {
                    Color::White => 7 - row as i32,
                    Color::Black => row as i32,
                };
                score += sign_for(color) * PASSED_PAWN_UNIT * advancement;
            }
        }
    }
    score
}

fn is_passed(board: &Board, color: Color, enemy: Color, row: u8, file: i32) -> bool {
    let (start, end) = match color {
        Color::White => (0i32, row as i32 - 1),
        Color::Black => (row as i32 + 1, 7),
    };
    if start > end {
        return true;
    }
    for check_file in [file - 1, file, file + 1] {
        if !(0..8).contains(&check_file) {
            continue;
        }
        for check_row in start..=end {
            if board
                .at(crate::chess::Square::new(check_row as u8, check_file as u8))
                .is_some_and(|p| p.color == enemy && p.kind == PieceKind::Pawn)
            {
                return false;
            }
        }
    }
    true
}

/// Rook file bonus: open file (no pawns of either color) or semi-open (no
/// friendly pawns, some enemy pawns).
#[must_use]
pub(super) fn rook_file_score(board: &Board) -> i32 {
    let files = PawnFiles::build(board);
    let mut score = 0;
    for (square, piece) in board.occupied() {
        if piece.kind != PieceKind::Rook {
            continue;
        }
        let file = square.col as i32;
        let friendly = files.count_at(piece.color, file);
        let enemy = files.count_at(piece.color.opposite(), file);
        let bonus = if friendly == 0 && enemy == 0 {
            ROOK_OPEN_FILE_BONUS
        } else if friendly == 0 {
            ROOK_SEMI_OPEN_FILE_BONUS
        } else {
            0
        };
        score += sign_for(piece.color) * bonus;
    }
    score
}

const fn sign_for(color: Color) -> i32 {
    match color {
        Color::White => 1,
        Color::Black => -1,
    }
}
