//! The rules pipeline: pseudo-legal generation, king safety, perft, and a
//! read-only snapshot for presentation layers.

mod movegen;
mod perft;
mod safety;

pub use safety::{Check, KingSafety, Pin};

use crate::chess_move::Move;
use crate::error::RulesError;
use crate::feedback::{CheckInfo, FeedbackSource};
use crate::game_state::{Color, GameState, GameStatus, Square};

/// Current position snapshot for feedback and display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnView {
    legal_moves: Vec<Move>,
    selected: Option<Square>,
    side_to_move: Color,
    king_square: Square,
    checkers: Vec<Square>,
    status: GameStatus,
}

impl TurnView {
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }
}

impl FeedbackSource for TurnView {
    fn legal_moves(&self) -> &[Move] {
        &self.legal_moves
    }

    fn selected_square(&self) -> Option<Square> {
        self.selected
    }

    fn check_info(&self) -> Option<CheckInfo> {
        if self.checkers.is_empty() {
            None
        } else {
            Some(CheckInfo {
                king_square: self.king_square,
                checkers: self.checkers.clone(),
            })
        }
    }
}

impl GameState {
    /// Snapshot of everything a presentation layer needs for one frame.
    pub fn view(&self, selected: Option<Square>) -> TurnView {
        let legal_moves = self.valid_moves();
        let safety = self.pins_and_checks();
        let status = match (legal_moves.is_empty(), safety.in_check) {
            (true, true) => GameStatus::Checkmate,
            (true, false) => GameStatus::Stalemate,
            (false, true) => GameStatus::Check,
            (false, false) => GameStatus::Ongoing,
        };
        TurnView {
            legal_moves,
            selected,
            side_to_move: self.side_to_move,
            king_square: self.king_square(self.side_to_move),
            checkers: safety.checks.iter().map(|check| check.square).collect(),
            status,
        }
    }

    /// The legal move between two squares, if there is one.
    pub fn legal_move(&self, origin: Square, destination: Square) -> Option<Move> {
        let candidate = Move::new(origin, destination, &self.board).ok()?;
        self.valid_moves().into_iter().find(|mv| *mv == candidate)
    }

    /// Plays the move between two squares if it is legal.
    ///
    /// This is the entry point for callers that only hold two squares (a click
    /// pair, a typed coordinate). Illegal requests leave the state untouched.
    pub fn play(&mut self, origin: Square, destination: Square) -> Result<Move, RulesError> {
        if self.board[origin].is_none() {
            return Err(RulesError::EmptySquare(origin));
        }
        let mv = self
            .legal_move(origin, destination)
            .ok_or(RulesError::IllegalMove {
                origin,
                destination,
            })?;
        self.make_move(mv)?;
        Ok(mv)
    }
}
