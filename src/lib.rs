//! Rules-complete chess engine and a depth-limited alpha-beta search agent.
//!
//! - [`chess`] is the Rules Engine: board representation, pseudo-legal move
//!   generation, the legality filter, make/unmake, algebraic notation and
//!   terminal-state detection.
//! - [`evaluation`] is the Search Agent's static evaluation function.
//! - [`search`] is the Search Agent's alpha-beta minimax with quiescence and
//!   move ordering, exposed through three preconfigured strength profiles.
//! - [`engine`] is the thin facade a UI collaborator calls: it is the only
//!   module external callers should depend on directly.
//!
//! This crate intentionally does not implement opening books, transposition
//! tables, endgame tablebases, time-managed search, multi-threaded search,
//! network play, FEN/PGN import-export, threefold-repetition detection or
//! persistence of any kind. See each module's documentation for the
//! rationale.

pub mod chess;
pub mod engine;
pub mod evaluation;
pub mod search;
