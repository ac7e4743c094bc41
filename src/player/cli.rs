#![cfg(feature = "std")]

use std::io::{self, BufRead, Write};
use std::string::String;

use crate::core::{rules, Board, GameSnapshot, Move, MoveError, MoveOutcome, Side, COLS, ROWS};
use rand::rngs::SmallRng;

use super::Player;

/// Human player typing moves on stdin, e.g. `a3 a4`.
pub struct CliPlayer;

impl CliPlayer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CliPlayer {
    fn default() -> Self {
        Self::new()
    }
}

pub fn coord_to_string(r: usize, c: usize) -> String {
    let col = (b'a' + c as u8) as char;
    format!("{}{}", col, r + 1)
}

/// Parse a cell such as `c7` (column letter, 1-based row).
pub fn parse_coord(input: &str) -> Result<(usize, usize), String> {
    let mut chars = input.chars();
    let col_ch = chars
        .next()
        .ok_or("Empty input")?
        .to_ascii_lowercase();
    if !col_ch.is_ascii_alphabetic() {
        return Err(format!("Invalid column '{}' - must be a letter a-g", col_ch));
    }
    let col = (col_ch as u8).wrapping_sub(b'a') as usize;
    if col >= COLS {
        return Err(format!("Column '{}' out of bounds - must be a-g", col_ch));
    }
    let row_str: String = chars.collect();
    let row: usize = row_str
        .parse()
        .map_err(|_| format!("Invalid row '{}' - must be a number 1-9", row_str))?;
    if row == 0 || row > ROWS {
        return Err(format!("Row {} out of bounds - must be 1-9", row));
    }
    Ok((row - 1, col))
}

/// Parse a move such as `a3 a4` or `a3a4`.
pub fn parse_move(input: &str) -> Result<Move, String> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    let (from, to) = match parts.as_slice() {
        [from, to] => (parse_coord(from)?, parse_coord(to)?),
        [joined] if joined.len() >= 4 => {
            let split = joined[1..]
                .find(|c: char| c.is_ascii_alphabetic())
                .map(|i| i + 1)
                .ok_or("Expected two cells, e.g. a3 a4")?;
            (parse_coord(&joined[..split])?, parse_coord(&joined[split..])?)
        }
        _ => return Err("Expected two cells, e.g. a3 a4".to_string()),
    };
    Ok(Move { from, to })
}

fn side_label(side: Side) -> &'static str {
    match side {
        Side::First => "First (upper case)",
        Side::Second => "Second (lower case)",
    }
}

/// Print the board with a legend and the captured-piece ledger.
pub fn print_game(game: &GameSnapshot) {
    println!("\n{}", game.board);
    println!("    Legend: ~=river  #=trap  @=den");
    for side in [Side::First, Side::Second] {
        let taken: Vec<&str> = game.captured_by(side).iter().map(|p| p.animal.name()).collect();
        println!("    {} captured: [{}]", side_label(side), taken.join(", "));
    }
}

fn print_legal_moves(board: &Board, side: Side) {
    let moves = rules::legal_moves(board, side);
    let list: Vec<String> = moves
        .iter()
        .map(|m| format!("{}-{}", coord_to_string(m.from.0, m.from.1), coord_to_string(m.to.0, m.to.1)))
        .collect();
    println!("Legal moves: {}", list.join(" "));
}

fn print_help() {
    println!("\nEnter a move as two cells, e.g. 'a3 a4' (column a-g, row 1-9).");
    println!("  moves  - list all legal moves");
    println!("  board  - print the board again");
    println!("  help   - show this help\n");
}

impl Player for CliPlayer {
    fn select_move(&mut self, _rng: &mut SmallRng, game: &GameSnapshot) -> Option<Move> {
        print_game(game);
        let stdin = io::stdin();
        loop {
            print!("{} to move> ", side_label(game.current));
            io::stdout().flush().ok();
            let mut line = String::new();
            match stdin.lock().read_line(&mut line) {
                Ok(0) | Err(_) => return None,
                Ok(_) => {}
            }
            let line = line.trim();
            match line {
                "" => continue,
                "help" => print_help(),
                "moves" => print_legal_moves(&game.board, game.current),
                "board" => print_game(game),
                _ => match parse_move(line) {
                    Ok(mv) => match rules::validate_move(&game.board, game.current, mv) {
                        Ok(_) => return Some(mv),
                        Err(e) => println!("✗ Illegal move: {}", e),
                    },
                    Err(e) => println!("✗ {}", e),
                },
            }
        }
    }

    fn handle_rejected_move(&mut self, mv: Move, reason: MoveError) {
        println!("✗ Move {} rejected: {}", mv, reason);
    }

    fn handle_move_result(&mut self, _mv: Move, outcome: &MoveOutcome) {
        if let Some(captured) = outcome.captured() {
            if outcome.attacker_survived() {
                println!("✓ Captured the enemy {}", captured.animal);
            } else {
                println!("✓ Your {} and the enemy {} destroyed each other", outcome.effect.attacker.animal, captured.animal);
            }
        }
    }

    fn handle_opponent_move(&mut self, mv: Move, outcome: &MoveOutcome) {
        println!(
            "Opponent moved {} {} -> {}",
            outcome.effect.attacker.animal,
            coord_to_string(mv.from.0, mv.from.1),
            coord_to_string(mv.to.0, mv.to.1)
        );
        if let Some(captured) = outcome.captured() {
            println!("  and took your {}", captured.animal);
        }
    }
}
