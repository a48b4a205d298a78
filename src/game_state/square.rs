use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::error::RulesError;

/// Number of rows and columns on the board.
pub const BOARD_SIZE: usize = 8;

/// A single square on the board, addressed by (row, column).
///
/// Row 0 is the black back rank (rank 8), row 7 the white back rank
/// (rank 1). Column 0 is the a-file, column 7 the h-file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Creates a square, rejecting coordinates outside `0..8`.
    pub fn new(row: usize, col: usize) -> Result<Self, RulesError> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Ok(Self::at(row as u8, col as u8))
        } else {
            Err(RulesError::InvalidSquare { row, col })
        }
    }

    /// Caller guarantees both coordinates are in range.
    pub(crate) const fn at(row: u8, col: u8) -> Self {
        debug_assert!(row < 8 && col < 8);
        Self { row, col }
    }

    #[inline]
    pub const fn row(self) -> usize {
        self.row as usize
    }

    #[inline]
    pub const fn col(self) -> usize {
        self.col as usize
    }

    /// The file letter, `'a'..='h'`.
    pub fn file(self) -> char {
        (b'a' + self.col) as char
    }

    /// The rank number, 1-8 (row 7 is rank 1).
    pub fn rank(self) -> u8 {
        8 - self.row
    }

    /// Steps by a (row, column) delta, or `None` when that leaves the board.
    pub fn offset(self, (dr, dc): (i8, i8)) -> Option<Self> {
        let row = self.row as i8 + dr;
        let col = self.col as i8 + dc;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Self::at(row as u8, col as u8))
        } else {
            None
        }
    }

    /// All 64 squares in row-major order, a8 first.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|row| (0..8u8).map(move |col| Square::at(row, col)))
    }
}

/// Parse algebraic notation like "e4" into a Square.
///
/// # Examples
/// ```
/// # use chess_rules::Square;
/// let square: Square = "e2".parse().unwrap();
/// assert_eq!((square.row(), square.col()), (6, 4));
/// ```
impl FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(SquareParseError::WrongLength);
        };

        let file = file.to_ascii_lowercase();
        if !('a'..='h').contains(&file) {
            return Err(SquareParseError::BadFile);
        }
        let rank = rank
            .to_digit(10)
            .filter(|r| (1..=8).contains(r))
            .ok_or(SquareParseError::BadRank)?;

        Ok(Square::at(8 - rank as u8, file as u8 - b'a'))
    }
}

/// Display square in algebraic notation (e.g., "e4").
impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

/// Error type for parsing square notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SquareParseError {
    #[error("square must be 2 characters (e.g., 'e4')")]
    WrongLength,
    #[error("file must be a-h")]
    BadFile,
    #[error("rank must be 1-8")]
    BadRank,
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_square_creation() {
        assert!(Square::new(0, 0).is_ok());
        assert!(Square::new(7, 7).is_ok());
        assert_eq!(
            Square::new(8, 0),
            Err(RulesError::InvalidSquare { row: 8, col: 0 })
        );
        assert_eq!(
            Square::new(3, 255),
            Err(RulesError::InvalidSquare { row: 3, col: 255 })
        );
    }

    #[test_case(7, 0, "a1")]
    #[test_case(7, 7, "h1")]
    #[test_case(0, 0, "a8")]
    #[test_case(6, 4, "e2")]
    #[test_case(4, 4, "e4")]
    fn test_square_display(row: usize, col: usize, expected: &str) {
        let square = Square::new(row, col).unwrap();
        assert_eq!(square.to_string(), expected);
        assert_eq!(expected.parse::<Square>().unwrap(), square);
    }

    #[test]
    fn test_square_from_str_case_insensitive() {
        assert_eq!("E4".parse::<Square>(), "e4".parse::<Square>());
    }

    #[test_case("", SquareParseError::WrongLength)]
    #[test_case("a", SquareParseError::WrongLength)]
    #[test_case("abc", SquareParseError::WrongLength)]
    #[test_case("a9", SquareParseError::BadRank)]
    #[test_case("a0", SquareParseError::BadRank)]
    #[test_case("i1", SquareParseError::BadFile)]
    fn test_square_from_str_invalid(input: &str, expected: SquareParseError) {
        assert_eq!(input.parse::<Square>(), Err(expected));
    }

    #[test]
    fn test_offset_stops_at_edges() {
        let a8 = Square::at(0, 0);
        assert_eq!(a8.offset((-1, 0)), None);
        assert_eq!(a8.offset((0, -1)), None);
        assert_eq!(a8.offset((1, 2)), Some(Square::at(1, 2)));

        let h1 = Square::at(7, 7);
        assert_eq!(h1.offset((1, 1)), None);
    }

    #[test]
    fn test_all_is_row_major() {
        let squares: Vec<_> = Square::all().collect();
        assert_eq!(squares.len(), 64);
        assert_eq!(squares[0].to_string(), "a8");
        assert_eq!(squares[8].to_string(), "a7");
        assert_eq!(squares[63].to_string(), "h1");
    }
}
