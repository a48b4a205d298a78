use std::ops::Index;

use super::{BOARD_SIZE, Color, Piece, PieceKind, Square};
use crate::error::RulesError;

const BACK_RANK: [PieceKind; BOARD_SIZE] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// 8×8 grid of square contents, indexed `[row][col]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::starting_position()
    }
}

impl Board {
    /// A board with no pieces.
    pub const fn empty() -> Self {
        Self {
            squares: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// The standard initial setup, black on rows 0-1 and white on rows 6-7.
    pub fn starting_position() -> Self {
        let mut board = Self::empty();
        for (col, kind) in BACK_RANK.into_iter().enumerate() {
            board.squares[0][col] = Some(Piece::new(Color::Black, kind));
            board.squares[1][col] = Some(Piece::new(Color::Black, PieceKind::Pawn));
            board.squares[6][col] = Some(Piece::new(Color::White, PieceKind::Pawn));
            board.squares[7][col] = Some(Piece::new(Color::White, kind));
        }
        board
    }

    #[inline]
    pub fn get(&self, square: Square) -> Option<Piece> {
        self.squares[square.row()][square.col()]
    }

    /// Square contents by raw coordinates, rejecting out-of-range input.
    pub fn piece_at(&self, row: usize, col: usize) -> Result<Option<Piece>, RulesError> {
        Square::new(row, col).map(|square| self.get(square))
    }

    /// Place or clear a piece. Only used while setting up a position; once a
    /// board belongs to a game it changes through make/undo alone.
    #[inline]
    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.row()][square.col()] = piece;
    }

    /// The raw grid, row 0 first.
    #[inline]
    pub fn rows(&self) -> &[[Option<Piece>; BOARD_SIZE]; BOARD_SIZE] {
        &self.squares
    }

    /// Occupied squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|square| self.get(square).map(|piece| (square, piece)))
    }

    /// Locate the single king of `color`.
    pub(crate) fn find_king(&self, color: Color) -> Result<Square, RulesError> {
        let king = Piece::new(color, PieceKind::King);
        let mut kings = self.pieces().filter(|&(_, piece)| piece == king);
        match (kings.next(), kings.count()) {
            (Some((square, _)), 0) => Ok(square),
            (first, rest) => Err(RulesError::KingCount {
                color,
                found: usize::from(first.is_some()) + rest,
            }),
        }
    }
}

impl Index<Square> for Board {
    type Output = Option<Piece>;

    fn index(&self, square: Square) -> &Self::Output {
        &self.squares[square.row()][square.col()]
    }
}
