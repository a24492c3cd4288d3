//! A thin terminal harness for manually exercising [`chesscore`]: not part
//! of the library's external interface, purely a development aid for trying
//! out the Rules Engine and Search Agent from a shell.

use std::io::{self, BufRead, Write};

use chesscore::chess::{GameResult, Move, Position, Square};
use chesscore::engine;
use chesscore::search::Difficulty;
use clap::{Parser, ValueEnum};

/// Play a game of chess against the bundled search agent from a terminal.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Strength of the bot's moves.
    #[arg(long, value_enum, default_value_t = BotStrength::Medium)]
    difficulty: BotStrength,

    /// Play Black instead of White (the bot moves first).
    #[arg(long)]
    black: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum BotStrength {
    Beginner,
    Medium,
    Pro,
}

impl From<BotStrength> for Difficulty {
    fn from(value: BotStrength) -> Self {
        match value {
            BotStrength::Beginner => Self::Beginner,
            BotStrength::Medium => Self::Medium,
            BotStrength::Pro => Self::Pro,
        }
    }
}

fn main() {
    let args = Args::parse();
    let difficulty = Difficulty::from(args.difficulty);
    let human_color = if args.black {
        chesscore::chess::Color::Black
    } else {
        chesscore::chess::Color::White
    };

    let mut position = engine::new_game();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print_board(&position);
        if position.is_game_over() {
            println!("Game over: {:?}", position.result());
            break;
        }

        let mv = if position.side_to_move() == human_color {
            match read_human_move(&mut lines, &position) {
                Some(mv) => mv,
                None => break,
            }
        } else {
            println!("bot ({difficulty:?}) is thinking...");
            match engine::get_bot_move(&mut position, difficulty) {
                Some(mv) => mv,
                None => break,
            }
        };

        let result = engine::make_move(&mut position, mv);
        println!("{}", result.notation);
        if result.is_game_over {
            print_result(result.result);
            break;
        }
    }
}

fn read_human_move(
    lines: &mut io::Lines<io::StdinLock<'_>>,
    position: &Position,
) -> Option<Move> {
    loop {
        print!("your move (e.g. e2e4, or 'quit'): ");
        io::stdout().flush().ok();
        let line = lines.next()?.ok()?;
        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") {
            return None;
        }
        match parse_coordinate_move(line, position) {
            Some(mv) => return Some(mv),
            None => println!("not a legal move, try again"),
        }
    }
}

/// Parses `e2e4`-style input (and `e7e8q`-style promotions) into a legal
/// move, if one matches.
fn parse_coordinate_move(input: &str, position: &Position) -> Option<Move> {
    let bytes = input.as_bytes();
    if bytes.len() < 4 {
        return None;
    }
    let from = parse_square(&input[0..2])?;
    let to = parse_square(&input[2..4])?;
    let promotion_letter = input.chars().nth(4);

    engine::legal_moves_from(position, from).into_iter().find(|mv| {
        mv.to == to
            && match (mv.promotion, promotion_letter) {
                (None, None) => true,
                (Some(kind), Some(letter)) => kind.letter().to_ascii_lowercase() == letter.to_ascii_lowercase(),
                _ => false,
            }
    })
}

fn parse_square(text: &str) -> Option<Square> {
    let mut chars = text.chars();
    let file = chars.next()?;
    let rank = chars.next()?;
    if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
        return None;
    }
    let col = file as u8 - b'a';
    let row = 8 - (rank as u8 - b'0');
    Some(Square::new(row, col))
}

fn print_board(position: &Position) {
    for row in 0..8u8 {
        print!("{} ", 8 - row);
        for col in 0..8u8 {
            let square = Square::new(row, col);
            let glyph = position.board().at(square).map_or('.', |p| engine::piece_unicode(p));
            print!("{glyph} ");
        }
        println!();
    }
    println!("  a b c d e f g h");
}

fn print_result(result: GameResult) {
    match result {
        GameResult::WhiteWins => println!("White wins!"),
        GameResult::BlackWins => println!("Black wins!"),
        GameResult::Draw => println!("Draw."),
        GameResult::Unset => {},
    }
}
