use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use super::board::Board;
use super::common::{Move, MoveError, Piece, Side, WinReason};
use super::config::CellSet;
use super::rules::{self, MoveEffect};

/// Lifecycle of a game. `Finished` is terminal until [`GameSession::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    Playing,
    Finished,
}

/// Entry of the append-only move history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveRecord {
    pub side: Side,
    pub effect: MoveEffect,
}

/// Read-only copy of the whole session state handed to observers, players
/// and the search engine.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GameSnapshot {
    pub board: Board,
    pub current: Side,
    pub phase: Phase,
    pub selection: Option<(usize, usize)>,
    pub legal_moves: Vec<(usize, usize)>,
    /// Pieces captured by each side, indexed by [`Side::index`].
    pub captured: [Vec<Piece>; 2],
    pub history: Vec<MoveRecord>,
    pub winner: Option<(Side, WinReason)>,
    pub generation: u64,
}

impl GameSnapshot {
    pub fn captured_by(&self, side: Side) -> &[Piece] {
        &self.captured[side.index()]
    }

    /// Token identifying the turn this snapshot was taken on.
    pub fn turn_token(&self) -> TurnToken {
        TurnToken {
            generation: self.generation,
            ply: self.history.len(),
        }
    }
}

/// Notifications emitted by a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// Emitted after every successful mutation.
    StateChanged(GameSnapshot),
    /// Emitted once per game, right after the final `StateChanged`.
    GameOver { winner: Side, reason: WinReason },
}

/// Result of a committed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub effect: MoveEffect,
    pub winner: Option<(Side, WinReason)>,
}

impl MoveOutcome {
    pub fn captured(&self) -> Option<Piece> {
        self.effect.captured
    }

    pub fn attacker_survived(&self) -> bool {
        self.effect.attacker_survived
    }
}

/// Result of clicking a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    Selected,
    Deselected,
    Moved(MoveOutcome),
    /// Nothing changed.
    Ignored,
}

/// Identifies one turn of one game. Moves computed for a stale token are
/// refused by [`GameSession::commit_if_current`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TurnToken {
    generation: u64,
    ply: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&GameEvent) + Send>;

/// Owns the board and all turn state; the only place moves are committed.
pub struct GameSession {
    board: Board,
    current: Side,
    phase: Phase,
    selection: Option<(usize, usize)>,
    selection_moves: CellSet,
    captured: [Vec<Piece>; 2],
    history: Vec<MoveRecord>,
    winner: Option<(Side, WinReason)>,
    generation: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_listener: u64,
}

impl GameSession {
    /// New game in the starting position, first player to move.
    pub fn new() -> Self {
        Self::from_position(Board::new(), Side::First)
    }

    /// New game from an arbitrary position.
    pub fn from_position(board: Board, to_move: Side) -> Self {
        Self {
            board,
            current: to_move,
            phase: Phase::Playing,
            selection: None,
            selection_moves: CellSet::new(),
            captured: [Vec::new(), Vec::new()],
            history: Vec::new(),
            winner: None,
            generation: 0,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Side {
        self.current
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn selection(&self) -> Option<(usize, usize)> {
        self.selection
    }

    /// Destinations of the selected piece; empty without a selection.
    pub fn legal_moves_for_selection(&self) -> Vec<(usize, usize)> {
        self.selection_moves.iter_set_bits().collect()
    }

    pub fn captured_by(&self, side: Side) -> &[Piece] {
        &self.captured[side.index()]
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn winner(&self) -> Option<(Side, WinReason)> {
        self.winner
    }

    pub fn turn_token(&self) -> TurnToken {
        TurnToken {
            generation: self.generation,
            ply: self.history.len(),
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board,
            current: self.current,
            phase: self.phase,
            selection: self.selection,
            legal_moves: self.legal_moves_for_selection(),
            captured: self.captured.clone(),
            history: self.history.clone(),
            winner: self.winner,
            generation: self.generation,
        }
    }

    /// Register a listener for state-change and game-over notifications.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&GameEvent) + Send + 'static,
    {
        let id = SubscriptionId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` if the id was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    fn emit(&mut self, event: GameEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }

    fn emit_state(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        self.emit(GameEvent::StateChanged(snapshot));
    }

    fn clear_selection(&mut self) {
        self.selection = None;
        self.selection_moves = CellSet::new();
    }

    /// Click on a cell: select an own piece, toggle the current selection off,
    /// or move the selected piece to a legal destination.
    pub fn select_cell(&mut self, row: usize, col: usize) -> SelectOutcome {
        if self.phase != Phase::Playing || !Board::in_bounds(row, col) {
            return SelectOutcome::Ignored;
        }
        if let Some(from) = self.selection {
            if from == (row, col) {
                self.clear_selection();
                self.emit_state();
                return SelectOutcome::Deselected;
            }
            if self.selection_moves.contains(row, col) {
                return match self.commit_move(Move { from, to: (row, col) }) {
                    Ok(outcome) => SelectOutcome::Moved(outcome),
                    Err(_) => SelectOutcome::Ignored,
                };
            }
        }
        match self.board.piece_at(row, col) {
            Some(p) if p.owner == self.current => {
                self.selection = Some((row, col));
                self.selection_moves = rules::legal_moves_from(&self.board, row, col);
                self.emit_state();
                SelectOutcome::Selected
            }
            _ => SelectOutcome::Ignored,
        }
    }

    /// Validate and apply a move for the player to move. A rejected move
    /// leaves the session untouched.
    pub fn commit_move(&mut self, mv: Move) -> Result<MoveOutcome, MoveError> {
        if self.phase != Phase::Playing {
            return Err(MoveError::GameOver);
        }
        if let Err(e) = rules::validate_move(&self.board, self.current, mv) {
            log::debug!("rejected {} for {}: {}", mv, self.current, e);
            return Err(e);
        }
        let mover = self.current;
        let effect = rules::apply_unchecked(&mut self.board, mv)?;
        if let Some(captured) = effect.captured {
            self.captured[mover.index()].push(captured);
            if !effect.attacker_survived {
                self.captured[captured.owner.index()].push(effect.attacker);
            }
        }
        self.history.push(MoveRecord { side: mover, effect });
        self.clear_selection();
        log::debug!("{} played {} {}", mover, effect.attacker.animal, mv);

        let winner = rules::outcome_after(&self.board, mover);
        match winner {
            Some((side, reason)) => {
                self.phase = Phase::Finished;
                self.winner = winner;
                log::info!("game over: {} wins ({})", side, reason);
                self.emit_state();
                self.emit(GameEvent::GameOver {
                    winner: side,
                    reason,
                });
            }
            None => {
                self.current = mover.opponent();
                self.emit_state();
            }
        }
        Ok(MoveOutcome { effect, winner })
    }

    /// Commit `mv` only if the session is still on the turn `token` was taken on.
    pub fn commit_if_current(&mut self, token: TurnToken, mv: Move) -> Result<MoveOutcome, MoveError> {
        if token != self.turn_token() {
            return Err(MoveError::StaleTurn);
        }
        self.commit_move(mv)
    }

    /// Start a fresh game. Subscriptions survive; everything else is rebuilt.
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.current = Side::First;
        self.phase = Phase::Playing;
        self.clear_selection();
        self.captured = [Vec::new(), Vec::new()];
        self.history.clear();
        self.winner = None;
        self.generation += 1;
        self.emit_state();
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GameSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameSession")
            .field("current", &self.current)
            .field("phase", &self.phase)
            .field("selection", &self.selection)
            .field("plies", &self.history.len())
            .field("winner", &self.winner)
            .field("board", &self.board)
            .finish()
    }
}
