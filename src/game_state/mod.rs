mod board;
mod fen;
mod piece;
mod square;

use std::fmt;

pub use board::Board;
pub use fen::FenError;
pub use piece::{Color, Piece, PieceKind};
pub use square::{BOARD_SIZE, Square, SquareParseError};

use crate::chess_move::Move;
use crate::error::RulesError;

/// Outcome of the position for the side to move, derived on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// Legal moves exist and the king is safe.
    Ongoing,
    /// Legal moves exist but the king is attacked.
    Check,
    /// No legal moves, king attacked.
    Checkmate,
    /// No legal moves, king not attacked.
    Stalemate,
}

/// Authoritative game model: board, turn, history and king trackers.
///
/// The move-generation and legality pipeline lives in
/// [`game_logic`](crate::game_logic) as further `impl GameState` blocks.
#[derive(Clone, PartialEq, Eq)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) side_to_move: Color,
    pub(crate) move_log: Vec<Move>,
    pub(crate) white_king: Square,
    pub(crate) black_king: Square,
    /// Side that moved first, needed to derive full-move numbers.
    pub(crate) first_to_move: Color,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Standard starting position, white to move.
    pub fn new() -> Self {
        Self {
            board: Board::starting_position(),
            side_to_move: Color::White,
            move_log: Vec::new(),
            white_king: Square::at(7, 4),
            black_king: Square::at(0, 4),
            first_to_move: Color::White,
        }
    }

    /// Takes ownership of a set-up board. Each side needs exactly one king,
    /// and the side not to move must not be in check.
    pub fn from_board(board: Board, side_to_move: Color) -> Result<Self, RulesError> {
        let white_king = board.find_king(Color::White)?;
        let black_king = board.find_king(Color::Black)?;
        let state = Self {
            board,
            side_to_move,
            move_log: Vec::new(),
            white_king,
            black_king,
            first_to_move: side_to_move,
        };
        if state.opponent_in_check() {
            return Err(RulesError::OpponentInCheck {
                color: side_to_move.opponent(),
            });
        }
        Ok(state)
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board[square]
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Executed moves, oldest first.
    #[inline]
    pub fn move_log(&self) -> &[Move] {
        &self.move_log
    }

    #[inline]
    pub fn last_move(&self) -> Option<&Move> {
        self.move_log.last()
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        match color {
            Color::White => self.white_king,
            Color::Black => self.black_king,
        }
    }

    /// Executes `mv` without any legality check.
    ///
    /// The move must still describe the current board: its moved piece must sit
    /// on the origin and its captured snapshot on the destination. A stale move
    /// is rejected with [`RulesError::PreconditionViolation`] and nothing is
    /// changed.
    pub fn make_move(&mut self, mv: Move) -> Result<(), RulesError> {
        let found_moved = self.board[mv.origin()];
        let found_captured = self.board[mv.destination()];
        if found_moved != Some(mv.piece_moved()) || found_captured != mv.piece_captured() {
            log::warn!("rejecting stale move {mv}");
            return Err(RulesError::PreconditionViolation {
                origin: mv.origin(),
                destination: mv.destination(),
                expected_moved: mv.piece_moved(),
                found_moved,
                expected_captured: mv.piece_captured(),
                found_captured,
            });
        }

        self.apply(mv);
        Ok(())
    }

    /// Reverts the last executed move. Does nothing on an empty history.
    pub fn undo_move(&mut self) -> Option<Move> {
        let mv = self.move_log.pop()?;

        self.board.set(mv.origin(), Some(mv.piece_moved()));
        self.board.set(mv.destination(), mv.piece_captured());
        self.side_to_move = self.side_to_move.opponent();
        if mv.piece_moved().kind == PieceKind::King {
            self.set_king_square(mv.piece_moved().color, mv.origin());
        }

        log::debug!("undo {mv}");
        Some(mv)
    }

    /// Unchecked state transition shared by `make_move` and perft.
    pub(crate) fn apply(&mut self, mv: Move) {
        self.board.set(mv.origin(), None);
        self.board.set(mv.destination(), Some(mv.piece_moved()));
        self.move_log.push(mv);
        self.side_to_move = self.side_to_move.opponent();
        if mv.piece_moved().kind == PieceKind::King {
            self.set_king_square(mv.piece_moved().color, mv.destination());
        }

        log::debug!("make {mv}");
    }

    fn set_king_square(&mut self, color: Color, square: Square) {
        match color {
            Color::White => self.white_king = square,
            Color::Black => self.black_king = square,
        }
    }

    /// Full-move number of the position, starting at 1.
    pub fn fullmove_number(&self) -> usize {
        let offset = usize::from(self.first_to_move == Color::Black);
        1 + (self.move_log.len() + offset) / 2
    }
}

impl fmt::Debug for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameState")
            .field("position", &self.fen())
            .field("moves", &self.move_log.len())
            .finish()
    }
}
