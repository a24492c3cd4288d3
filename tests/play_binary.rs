//! Smoke-tests the `play` demo binary (not part of the external interface,
//! a development harness only) with an `assert_cmd`-based integration test.

use assert_cmd::Command;
use predicates::str::contains;

const BINARY_NAME: &str = "play";

#[test]
fn prints_the_starting_board_and_prompts_for_a_move() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).expect("binary should be built");

    cmd.write_stdin("quit\n")
        .assert()
        .success()
        .stdout(contains("a b c d e f g h"))
        .stdout(contains("your move"));
}

#[test]
fn rejects_an_illegal_move_then_accepts_quit() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).expect("binary should be built");

    cmd.write_stdin("e2e5\nquit\n")
        .assert()
        .success()
        .stdout(contains("not a legal move"));
}

#[test]
fn bot_moves_first_when_playing_black() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).expect("binary should be built");

    cmd.arg("--black")
        .arg("--difficulty")
        .arg("beginner")
        .write_stdin("quit\n")
        .assert()
        .success()
        .stdout(contains("bot (Beginner) is thinking"));
}
