//! Search engine: static evaluation plus minimax with alpha-beta pruning.
//! Works on a private copy of the board using apply/undo, so no allocation
//! happens per node apart from the move lists.

use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use rand::Rng;

use super::board::Board;
use super::common::{Move, MoveError, Side};
use super::config::{
    den_of, piece_value, positional_value, DifficultySettings, EASY, HARD, MATERIAL_WEIGHT,
    MEDIUM, MOBILITY_WEIGHT, WIN_SCORE,
};
use super::rules;

/// Strength of the computer opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Difficulty {
    /// Uniformly random legal moves.
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const fn settings(self) -> DifficultySettings {
        match self {
            Difficulty::Easy => EASY,
            Difficulty::Medium => MEDIUM,
            Difficulty::Hard => HARD,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
            .into_iter()
            .find(|d| match d {
                Difficulty::Easy => s.eq_ignore_ascii_case("easy"),
                Difficulty::Medium => s.eq_ignore_ascii_case("medium"),
                Difficulty::Hard => s.eq_ignore_ascii_case("hard"),
            })
            .ok_or("difficulty must be one of easy, medium, hard")
    }
}

/// Optional node budget for latency-sensitive callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchLimits {
    pub max_nodes: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// Best root move, `None` if there was none or the budget ran out first.
    pub best: Option<Move>,
    pub score: i32,
    pub nodes: u64,
    /// False when the node budget cut the search short.
    pub completed: bool,
}

/// Static score of `board` from `perspective`'s point of view. Decided
/// positions score ±[`WIN_SCORE`].
pub fn evaluate(board: &Board, perspective: Side) -> i32 {
    if let Some((winner, _)) = rules::check_win(board) {
        return if winner == perspective { WIN_SCORE } else { -WIN_SCORE };
    }
    let mut score = 0;
    let mut counts = [0i32; 2];
    for side in [Side::First, Side::Second] {
        let sign = if side == perspective { 1 } else { -1 };
        for ((r, c), piece) in board.pieces(side) {
            score += sign * (piece_value(piece.animal) + positional_value(side, r, c));
            counts[side.index()] += 1;
        }
    }
    score += (counts[perspective.index()] - counts[perspective.opponent().index()]) * MATERIAL_WEIGHT;
    score + mobility(board, perspective) as i32 * MOBILITY_WEIGHT
}

/// Number of legal moves available to `side`.
pub fn mobility(board: &Board, side: Side) -> usize {
    board
        .pieces(side)
        .map(|((r, c), _)| rules::legal_moves_from(board, r, c).count_ones())
        .sum()
}

/// Legal moves with captures first, otherwise in generation order.
fn ordered_moves(board: &Board, side: Side) -> Vec<Move> {
    let mut moves = rules::legal_moves(board, side);
    moves.sort_by_key(|mv| board.piece_at(mv.to.0, mv.to.1).is_none());
    moves
}

struct Searcher<'a, R: Rng + ?Sized> {
    me: Side,
    jitter: i32,
    max_nodes: Option<u64>,
    nodes: u64,
    aborted: bool,
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> Searcher<'a, R> {
    fn jitter(&mut self) -> i32 {
        if self.jitter == 0 {
            0
        } else {
            self.rng.random_range(-self.jitter..=self.jitter)
        }
    }

    /// Leaf noise. Decided scores stay exact.
    fn with_jitter(&mut self, score: i32) -> i32 {
        if score.abs() >= WIN_SCORE {
            score
        } else {
            score + self.jitter()
        }
    }

    fn win_score(&self, winner: Side, depth: u32) -> i32 {
        let score = WIN_SCORE + depth as i32;
        if winner == self.me {
            score
        } else {
            -score
        }
    }

    fn minimax(
        &mut self,
        board: &mut Board,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        to_move: Side,
    ) -> Result<i32, MoveError> {
        self.nodes += 1;
        if matches!(self.max_nodes, Some(max) if self.nodes > max) {
            self.aborted = true;
            return Ok(0);
        }
        if depth == 0 {
            let score = evaluate(board, self.me);
            return Ok(self.with_jitter(score));
        }
        let moves = ordered_moves(board, to_move);
        if moves.is_empty() {
            // Unable to move loses.
            return Ok(self.win_score(to_move.opponent(), depth));
        }

        let maximizing = to_move == self.me;
        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        for mv in moves {
            let effect = rules::apply_unchecked(board, mv)?;
            let score = match rules::outcome_after(board, to_move) {
                Some((winner, _)) => self.win_score(winner, depth),
                None => self.minimax(board, depth - 1, alpha, beta, to_move.opponent())?,
            };
            rules::undo_move(board, &effect);
            if self.aborted {
                return Ok(best);
            }

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }
            if beta <= alpha {
                break;
            }
        }
        Ok(best)
    }
}

/// Minimax with alpha-beta pruning to `settings.depth` plies for `side`.
/// Ties keep the first move evaluated.
pub fn search<R: Rng + ?Sized>(
    board: &Board,
    side: Side,
    settings: DifficultySettings,
    limits: SearchLimits,
    rng: &mut R,
) -> Result<SearchResult, MoveError> {
    let depth = settings.depth.max(1);
    let mut work = *board;
    let mut searcher = Searcher {
        me: side,
        jitter: settings.jitter,
        max_nodes: limits.max_nodes,
        nodes: 0,
        aborted: false,
        rng,
    };

    let mut best = None;
    let mut best_score = i32::MIN;
    let mut alpha = i32::MIN;
    for mv in ordered_moves(&work, side) {
        let effect = rules::apply_unchecked(&mut work, mv)?;
        let score = match rules::outcome_after(&work, side) {
            Some((winner, _)) => searcher.win_score(winner, depth),
            None => searcher.minimax(&mut work, depth - 1, alpha, i32::MAX, side.opponent())?,
        };
        rules::undo_move(&mut work, &effect);
        if searcher.aborted {
            break;
        }
        if best.is_none() || score > best_score {
            best = Some(mv);
            best_score = score;
        }
        alpha = alpha.max(score);
    }

    log::debug!(
        "search for {} depth {}: {} nodes, best {:?} ({})",
        side,
        depth,
        searcher.nodes,
        best,
        best_score
    );
    Ok(SearchResult {
        best,
        score: best_score,
        nodes: searcher.nodes,
        completed: !searcher.aborted,
    })
}

/// One-ply heuristic: capture value, advance towards the enemy den, plus noise.
pub fn greedy_move<R: Rng + ?Sized>(board: &Board, side: Side, rng: &mut R) -> Option<Move> {
    let (den_row, den_col) = den_of(side.opponent());
    let mut best = None;
    let mut best_score = i32::MIN;
    for mv in rules::legal_moves(board, side) {
        let Some(attacker) = board.piece_at(mv.from.0, mv.from.1) else {
            continue;
        };
        let mut score = 0;
        if let Some(defender) = board.piece_at(mv.to.0, mv.to.1) {
            let attack = piece_value(attacker.animal);
            let defend = piece_value(defender.animal);
            score += if attacker.power() == defender.power() {
                (defend - attack) / 2
            } else {
                defend * 2
            };
        }
        let before = mv.from.0.abs_diff(den_row);
        let after = mv.to.0.abs_diff(den_row);
        if after < before {
            score += 10;
        }
        let dist = (after + mv.to.1.abs_diff(den_col)) as i32;
        score += (10 - dist) * 5;
        score += rng.random_range(-10..=10);
        if score > best_score {
            best_score = score;
            best = Some(mv);
        }
    }
    best
}

fn random_move<R: Rng + ?Sized>(moves: &[Move], rng: &mut R) -> Option<Move> {
    if moves.is_empty() {
        None
    } else {
        Some(moves[rng.random_range(0..moves.len())])
    }
}

/// Pick a move for `side` at the given difficulty. `None` means the side has
/// no legal move.
pub fn choose_move<R: Rng + ?Sized>(
    board: &Board,
    side: Side,
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<Move> {
    choose_move_with_limits(board, side, difficulty, SearchLimits::default(), rng)
}

/// [`choose_move`] with a node budget. When the budget runs out before any
/// root move is fully searched, the one-ply heuristic is used instead.
pub fn choose_move_with_limits<R: Rng + ?Sized>(
    board: &Board,
    side: Side,
    difficulty: Difficulty,
    limits: SearchLimits,
    rng: &mut R,
) -> Option<Move> {
    let moves = rules::legal_moves(board, side);
    if moves.is_empty() {
        log::info!("no move available for {}", side);
        return None;
    }
    if difficulty == Difficulty::Easy {
        return random_move(&moves, rng);
    }
    match search(board, side, difficulty.settings(), limits, rng) {
        Ok(SearchResult {
            best: Some(mv),
            completed,
            nodes,
            ..
        }) => {
            if !completed {
                log::warn!("node budget hit after {} nodes, playing best searched move", nodes);
            }
            Some(mv)
        }
        Ok(result) => {
            log::warn!(
                "node budget hit after {} nodes before any root move finished, using greedy move",
                result.nodes
            );
            greedy_move(board, side, rng)
        }
        Err(e) => {
            log::warn!("search failed ({}), playing a random move", e);
            random_move(&moves, rng)
        }
    }
}
