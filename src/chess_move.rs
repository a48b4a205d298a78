use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::RulesError;
use crate::game_state::{Board, Piece, Square};

/// A single piece relocation, captured against the board it was built from.
///
/// The captured piece is a snapshot taken at construction and never
/// recomputed. Equality and hashing only consider origin, destination and the
/// moved piece, so a move built from user input compares equal to the
/// generated legal move for the same squares.
#[derive(Debug, Clone, Copy)]
pub struct Move {
    origin: Square,
    destination: Square,
    piece_moved: Piece,
    piece_captured: Option<Piece>,
}

impl Move {
    /// Builds a move from two squares, snapshotting both from `board`.
    pub fn new(origin: Square, destination: Square, board: &Board) -> Result<Self, RulesError> {
        let piece_moved = board[origin].ok_or(RulesError::EmptySquare(origin))?;
        Ok(Self::from_parts(
            origin,
            destination,
            piece_moved,
            board[destination],
        ))
    }

    /// Builds a move from raw `(row, col)` pairs.
    pub fn from_coords(
        origin: (usize, usize),
        destination: (usize, usize),
        board: &Board,
    ) -> Result<Self, RulesError> {
        let origin = Square::new(origin.0, origin.1)?;
        let destination = Square::new(destination.0, destination.1)?;
        Self::new(origin, destination, board)
    }

    pub(crate) const fn from_parts(
        origin: Square,
        destination: Square,
        piece_moved: Piece,
        piece_captured: Option<Piece>,
    ) -> Self {
        Self {
            origin,
            destination,
            piece_moved,
            piece_captured,
        }
    }

    #[inline]
    pub fn origin(&self) -> Square {
        self.origin
    }

    #[inline]
    pub fn destination(&self) -> Square {
        self.destination
    }

    #[inline]
    pub fn piece_moved(&self) -> Piece {
        self.piece_moved
    }

    #[inline]
    pub fn piece_captured(&self) -> Option<Piece> {
        self.piece_captured
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.piece_captured.is_some()
    }

    /// Row/column delta from origin to destination.
    pub(crate) fn delta(&self) -> (i8, i8) {
        (
            self.destination.row() as i8 - self.origin.row() as i8,
            self.destination.col() as i8 - self.origin.col() as i8,
        )
    }

    /// Notation such as `p e2 -> p e4`.
    pub fn notation(&self) -> String {
        self.to_string()
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.origin == other.origin
            && self.destination == other.destination
            && self.piece_moved == other.piece_moved
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.origin.hash(state);
        self.destination.hash(state);
        self.piece_moved.hash(state);
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = self.piece_moved.kind.letter();
        write!(
            f,
            "{letter} {} -> {letter} {}",
            self.origin, self.destination
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::game_state::{Color, PieceKind};

    fn sq(s: &str) -> Square {
        s.parse().expect("test square is invalid")
    }

    #[test]
    fn snapshots_moved_and_captured_pieces() {
        let mut board = Board::starting_position();
        board.set(sq("d3"), Some(Piece::new(Color::Black, PieceKind::Knight)));

        let mv = Move::new(sq("e2"), sq("d3"), &board).unwrap();

        assert_eq!(mv.piece_moved(), Piece::new(Color::White, PieceKind::Pawn));
        assert_eq!(
            mv.piece_captured(),
            Some(Piece::new(Color::Black, PieceKind::Knight))
        );
        assert!(mv.is_capture());
    }

    #[test]
    fn captured_snapshot_survives_board_changes() {
        let mut board = Board::starting_position();
        let mv = Move::new(sq("e2"), sq("e4"), &board).unwrap();

        board.set(sq("e4"), Some(Piece::new(Color::Black, PieceKind::Queen)));

        assert_eq!(mv.piece_captured(), None);
    }

    #[test]
    fn notation_for_pawn_double_step() {
        let board = Board::starting_position();
        let mv = Move::from_coords((6, 4), (4, 4), &board).unwrap();
        assert_eq!(mv.notation(), "p e2 -> p e4");
    }

    #[test]
    fn notation_uses_uppercase_for_pieces() {
        let board = Board::starting_position();
        let mv = Move::new(sq("g8"), sq("f6"), &board).unwrap();
        assert_eq!(mv.to_string(), "N g8 -> N f6");
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        let board = Board::starting_position();
        assert_eq!(
            Move::from_coords((6, 4), (4, 8), &board),
            Err(RulesError::InvalidSquare { row: 4, col: 8 })
        );
        assert_eq!(
            Move::from_coords((9, 0), (4, 4), &board),
            Err(RulesError::InvalidSquare { row: 9, col: 0 })
        );
    }

    #[test]
    fn rejects_empty_origin() {
        let board = Board::starting_position();
        assert_eq!(
            Move::new(sq("e4"), sq("e5"), &board),
            Err(RulesError::EmptySquare(sq("e4")))
        );
    }

    #[test]
    fn equality_ignores_captured_piece() {
        let board = Board::starting_position();
        let mut other = board.clone();
        other.set(sq("e4"), Some(Piece::new(Color::Black, PieceKind::Pawn)));

        let quiet = Move::new(sq("e2"), sq("e4"), &board).unwrap();
        let capture = Move::new(sq("e2"), sq("e4"), &other).unwrap();

        assert_eq!(quiet, capture);
        let set: HashSet<_> = [quiet, capture].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn equality_checks_moved_piece() {
        let board = Board::starting_position();
        let mut other = board.clone();
        other.set(sq("e2"), Some(Piece::new(Color::White, PieceKind::Queen)));

        let pawn = Move::new(sq("e2"), sq("e4"), &board).unwrap();
        let queen = Move::new(sq("e2"), sq("e4"), &other).unwrap();

        assert_ne!(pawn, queen);
    }
}
