use thiserror::Error;

use crate::game_state::{Color, Piece, Square};

/// Errors returned by the rules layer.
///
/// Every rejected command leaves the [`GameState`](crate::GameState) untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RulesError {
    /// A coordinate outside `0..8` was passed where a square was expected.
    #[error("square ({row}, {col}) is outside the board")]
    InvalidSquare { row: usize, col: usize },

    /// A move was constructed from a square holding no piece.
    #[error("no piece on {0}")]
    EmptySquare(Square),

    /// The move was built against a board that has since changed.
    #[error(
        "stale move {origin}->{destination}: expected {expected_moved:?} / {expected_captured:?}, \
         found {found_moved:?} / {found_captured:?}"
    )]
    PreconditionViolation {
        origin: Square,
        destination: Square,
        expected_moved: Piece,
        found_moved: Option<Piece>,
        expected_captured: Option<Piece>,
        found_captured: Option<Piece>,
    },

    /// The requested move is not in the current legal-move set.
    #[error("illegal move {origin}->{destination}")]
    IllegalMove {
        origin: Square,
        destination: Square,
    },

    /// A position must hold exactly one king per color.
    #[error("expected exactly one {color} king, found {found}")]
    KingCount { color: Color, found: usize },

    /// The side that just moved left its own king attacked.
    #[error("{color} king is in check but it is not {color}'s turn")]
    OpponentInCheck { color: Color },
}
