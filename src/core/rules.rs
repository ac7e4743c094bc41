//! Rules engine: move generation, capture adjudication, move application and
//! win detection. All functions are pure over a [`Board`] except
//! [`apply_move`]/[`undo_move`], which mutate it in place.

use alloc::vec::Vec;

use super::board::Board;
use super::common::{Animal, Move, MoveError, Piece, Side, Terrain, WinReason};
use super::config::{den_of, CellSet};

/// Up, down, left, right.
const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// What a committed move did to the board. Doubles as the undo record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveEffect {
    pub mv: Move,
    pub attacker: Piece,
    pub captured: Option<Piece>,
    /// False only on mutual destruction, when the destination ends empty.
    pub attacker_survived: bool,
}

fn step(pos: (usize, usize), dir: (isize, isize)) -> Option<(usize, usize)> {
    let row = pos.0.checked_add_signed(dir.0)?;
    let col = pos.1.checked_add_signed(dir.1)?;
    Board::in_bounds(row, col).then_some((row, col))
}

/// Landing cell of a lion/tiger leap from `from` in direction `dir`, if the
/// piece stands at the river's edge and no rat sits anywhere in the crossing.
pub fn leap_target(board: &Board, from: (usize, usize), dir: (isize, isize)) -> Option<(usize, usize)> {
    let piece = board.piece_at(from.0, from.1)?;
    if !piece.animal.can_leap() {
        return None;
    }
    let mut pos = step(from, dir)?;
    let mut crossed = 0;
    while board.terrain(pos.0, pos.1)?.is_river() {
        if matches!(board.piece_at(pos.0, pos.1), Some(p) if p.animal == Animal::Rat) {
            return None;
        }
        crossed += 1;
        pos = step(pos, dir)?;
    }
    (crossed > 0).then_some(pos)
}

/// Destination reached by moving in `dir`: a leap when one is available,
/// otherwise the adjacent cell.
fn target_in_direction(board: &Board, from: (usize, usize), dir: (isize, isize)) -> Option<(usize, usize)> {
    leap_target(board, from, dir).or_else(|| step(from, dir))
}

/// Whether `attacker` may end its move on a cell of `terrain` held by
/// `defender`. An empty cell is always allowed.
pub fn can_capture(attacker: Piece, defender: Option<Piece>, terrain: Terrain) -> bool {
    let Some(defender) = defender else {
        return true;
    };
    if defender.owner == attacker.owner {
        return false;
    }
    if let Terrain::Trap(owner) = terrain {
        if owner == attacker.owner {
            return true;
        }
    }
    match (attacker.animal, defender.animal) {
        (Animal::Rat, Animal::Elephant) => return true,
        (Animal::Elephant, Animal::Rat) => return false,
        _ => {}
    }
    if terrain.is_river() {
        return attacker.animal == Animal::Rat && defender.animal == Animal::Rat;
    }
    attacker.power() >= defender.power()
}

/// Terrain and occupancy checks on a destination the piece can physically reach.
fn check_destination(board: &Board, piece: Piece, to: (usize, usize)) -> Result<(), MoveError> {
    let cell = board.cell(to.0, to.1).ok_or(MoveError::OutOfBounds)?;
    if matches!(cell.piece, Some(p) if p.owner == piece.owner) {
        return Err(MoveError::OwnPiece);
    }
    if cell.terrain == Terrain::Den(piece.owner) {
        return Err(MoveError::OwnDen);
    }
    if cell.terrain.is_river() && piece.animal != Animal::Rat {
        return Err(MoveError::RiverForbidden);
    }
    if !can_capture(piece, cell.piece, cell.terrain) {
        return Err(MoveError::CannotCapture);
    }
    Ok(())
}

/// Every cell the piece on (row, col) may move to. Empty for an empty cell.
pub fn legal_moves_from(board: &Board, row: usize, col: usize) -> CellSet {
    let mut set = CellSet::new();
    let Some(piece) = board.piece_at(row, col) else {
        return set;
    };
    for dir in DIRECTIONS {
        if let Some(to) = target_in_direction(board, (row, col), dir) {
            if check_destination(board, piece, to).is_ok() {
                set.set(to.0, to.1).ok();
            }
        }
    }
    set
}

/// All legal moves for `side`, grouped by piece in row-major order.
pub fn legal_moves(board: &Board, side: Side) -> Vec<Move> {
    let mut moves = Vec::new();
    for ((r, c), _) in board.pieces(side) {
        for (tr, tc) in legal_moves_from(board, r, c).iter_set_bits() {
            moves.push(Move::new(r, c, tr, tc));
        }
    }
    moves
}

/// Whether `side` has at least one legal move.
pub fn has_legal_move(board: &Board, side: Side) -> bool {
    board
        .pieces(side)
        .any(|((r, c), _)| !legal_moves_from(board, r, c).is_empty())
}

/// Check `mv` for `side` and return the moving piece on success.
pub fn validate_move(board: &Board, side: Side, mv: Move) -> Result<Piece, MoveError> {
    if !Board::in_bounds(mv.from.0, mv.from.1) || !Board::in_bounds(mv.to.0, mv.to.1) {
        return Err(MoveError::OutOfBounds);
    }
    let piece = board.piece_at(mv.from.0, mv.from.1).ok_or(MoveError::NoPiece)?;
    if piece.owner != side {
        return Err(MoveError::NotYourPiece);
    }
    let reachable = DIRECTIONS
        .iter()
        .any(|&dir| target_in_direction(board, mv.from, dir) == Some(mv.to));
    if !reachable {
        return Err(MoveError::Unreachable);
    }
    check_destination(board, piece, mv.to)?;
    Ok(piece)
}

/// Validate `mv` for the owner of the moving piece and apply it.
pub fn apply_move(board: &mut Board, mv: Move) -> Result<MoveEffect, MoveError> {
    let owner = board
        .piece_at(mv.from.0, mv.from.1)
        .ok_or(MoveError::NoPiece)?
        .owner;
    validate_move(board, owner, mv)?;
    apply_unchecked(board, mv)
}

/// Relocate the piece without legality checks. Equal powers destroy both
/// pieces, wherever the defender stands.
pub(crate) fn apply_unchecked(board: &mut Board, mv: Move) -> Result<MoveEffect, MoveError> {
    let attacker = board
        .piece_at(mv.from.0, mv.from.1)
        .ok_or(MoveError::NoPiece)?;
    if !Board::in_bounds(mv.to.0, mv.to.1) {
        return Err(MoveError::OutOfBounds);
    }
    let captured = board.piece_at(mv.to.0, mv.to.1);
    let attacker_survived = captured.map_or(true, |defender| defender.power() != attacker.power());
    board.set_piece(mv.from, None);
    board.set_piece(mv.to, attacker_survived.then_some(attacker));
    Ok(MoveEffect {
        mv,
        attacker,
        captured,
        attacker_survived,
    })
}

/// Exact inverse of [`apply_move`], restoring both pieces after a mutual
/// destruction.
pub fn undo_move(board: &mut Board, effect: &MoveEffect) {
    board.set_piece(effect.mv.from, Some(effect.attacker));
    board.set_piece(effect.mv.to, effect.captured);
}

/// Winner of the position, if any: a piece in the opposing den, or a side
/// with no pieces left.
pub fn check_win(board: &Board) -> Option<(Side, WinReason)> {
    for side in [Side::First, Side::Second] {
        let (r, c) = den_of(side);
        if let Some(p) = board.piece_at(r, c) {
            if p.owner != side {
                return Some((p.owner, WinReason::ReachedDen));
            }
        }
    }
    let first = board.piece_count(Side::First);
    let second = board.piece_count(Side::Second);
    match (first, second) {
        (0, 0) => None,
        (0, _) => Some((Side::Second, WinReason::CapturedAll)),
        (_, 0) => Some((Side::First, WinReason::CapturedAll)),
        _ => None,
    }
}

/// Result of the game right after `mover` played. Extends [`check_win`]:
/// when the last two pieces destroy each other the mover wins, and an
/// opponent left without a legal move loses.
pub fn outcome_after(board: &Board, mover: Side) -> Option<(Side, WinReason)> {
    if let Some(win) = check_win(board) {
        return Some(win);
    }
    if board.piece_count(mover.opponent()) == 0 {
        return Some((mover, WinReason::CapturedAll));
    }
    if !has_legal_move(board, mover.opponent()) {
        return Some((mover, WinReason::NoLegalMoves));
    }
    None
}
