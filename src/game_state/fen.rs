use thiserror::Error;

use super::{BOARD_SIZE, Board, Color, GameState, Piece, Square};
use crate::error::RulesError;

/// Error when loading a position from FEN.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("FEN needs at least placement and side to move")]
    MissingFields,
    #[error("placement must have 8 ranks, found {0}")]
    RankCount(usize),
    #[error("rank {rank} does not describe exactly 8 squares")]
    RankLength { rank: u8 },
    #[error("unknown piece letter '{0}'")]
    UnknownPiece(char),
    #[error("side to move must be 'w' or 'b', found '{0}'")]
    SideToMove(String),
    #[error(transparent)]
    Position(#[from] RulesError),
}

impl GameState {
    /// Loads a position from FEN.
    ///
    /// Only placement and side to move are used. Castling, en passant and the
    /// clocks are accepted but ignored, since those rules are not modelled.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let mut fields = fen.split_whitespace();
        let (Some(placement), Some(side)) = (fields.next(), fields.next()) else {
            return Err(FenError::MissingFields);
        };

        let board = parse_placement(placement)?;
        let side_to_move = match side {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::SideToMove(other.to_string())),
        };

        let ignored: Vec<&str> = fields.take(2).filter(|f| *f != "-").collect();
        if !ignored.is_empty() {
            log::debug!("ignoring unsupported FEN fields {ignored:?}");
        }

        let state = GameState::from_board(board, side_to_move)?;
        log::debug!("loaded position {}", state.fen());
        Ok(state)
    }

    /// Renders the position as FEN. Castling and en passant are always `-`.
    pub fn fen(&self) -> String {
        let side = match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        };
        format!(
            "{} {side} - - 0 {}",
            placement(&self.board),
            self.fullmove_number()
        )
    }
}

fn parse_placement(placement: &str) -> Result<Board, FenError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != BOARD_SIZE {
        return Err(FenError::RankCount(ranks.len()));
    }

    let mut board = Board::empty();
    for (row, rank_str) in ranks.into_iter().enumerate() {
        let rank = (BOARD_SIZE - row) as u8;
        let mut col = 0usize;
        for ch in rank_str.chars() {
            if let Some(skip) = ch.to_digit(10) {
                if !(1..=BOARD_SIZE as u32).contains(&skip) {
                    return Err(FenError::RankLength { rank });
                }
                col += skip as usize;
                continue;
            }
            let piece = Piece::from_fen_char(ch).ok_or(FenError::UnknownPiece(ch))?;
            if col >= BOARD_SIZE {
                return Err(FenError::RankLength { rank });
            }
            board.set(Square::at(row as u8, col as u8), Some(piece));
            col += 1;
        }
        if col != BOARD_SIZE {
            return Err(FenError::RankLength { rank });
        }
    }
    Ok(board)
}

fn placement(board: &Board) -> String {
    let mut out = String::with_capacity(72);
    for (row, cells) in board.rows().iter().enumerate() {
        if row > 0 {
            out.push('/');
        }
        let mut empty = 0;
        for cell in cells {
            match cell {
                Some(piece) => {
                    if empty > 0 {
                        out.push_str(&empty.to_string());
                        empty = 0;
                    }
                    out.push(piece.fen_char());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            out.push_str(&empty.to_string());
        }
    }
    out
}
