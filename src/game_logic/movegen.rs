//! Pseudo-legal move generation.
//!
//! Everything here reads a [`Board`] and an explicit perspective color. King
//! safety is ignored at this layer; see [`super::safety`].

use crate::chess_move::Move;
use crate::game_state::{Board, Color, GameState, Piece, PieceKind, Square};

pub(crate) const ORTHOGONAL: [(i8, i8); 4] = [(-1, 0), (0, -1), (1, 0), (0, 1)];
pub(crate) const DIAGONAL: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];
const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, 0),
    (0, -1),
    (1, 0),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

impl GameState {
    /// Every pseudo-legal move for the side to move, in row-major order.
    pub fn all_possible_moves(&self) -> Vec<Move> {
        pseudo_legal_moves(&self.board, self.side_to_move)
    }

    /// Pseudo-legal moves for `perspective`, whoever is actually to move.
    pub fn pseudo_legal_moves(&self, perspective: Color) -> Vec<Move> {
        pseudo_legal_moves(&self.board, perspective)
    }
}

pub(crate) fn pseudo_legal_moves(board: &Board, perspective: Color) -> Vec<Move> {
    let mut moves = Vec::with_capacity(48);
    for (square, piece) in board.pieces() {
        if piece.color == perspective {
            piece_moves(board, square, piece, &mut moves);
        }
    }
    moves
}

/// Appends the candidate moves of the piece standing on `square`.
pub(crate) fn piece_moves(board: &Board, square: Square, piece: Piece, moves: &mut Vec<Move>) {
    match piece.kind {
        PieceKind::Pawn => pawn_moves(board, square, piece, moves),
        PieceKind::Rook => slide(board, square, piece, &ORTHOGONAL, moves),
        PieceKind::Bishop => slide(board, square, piece, &DIAGONAL, moves),
        PieceKind::Queen => {
            slide(board, square, piece, &ORTHOGONAL, moves);
            slide(board, square, piece, &DIAGONAL, moves);
        }
        PieceKind::Knight => step(board, square, piece, &KNIGHT_OFFSETS, moves),
        PieceKind::King => step(board, square, piece, &KING_OFFSETS, moves),
    }
}

fn pawn_moves(board: &Board, square: Square, pawn: Piece, moves: &mut Vec<Move>) {
    let dir = pawn.color.pawn_direction();

    if let Some(one) = square.offset((dir, 0))
        && board[one].is_none()
    {
        moves.push(Move::from_parts(square, one, pawn, None));

        if square.row() == pawn.color.pawn_start_row()
            && let Some(two) = one.offset((dir, 0))
            && board[two].is_none()
        {
            moves.push(Move::from_parts(square, two, pawn, None));
        }
    }

    for dc in [-1, 1] {
        let Some(target) = square.offset((dir, dc)) else {
            continue;
        };
        if let Some(victim) = board[target]
            && victim.color != pawn.color
        {
            moves.push(Move::from_parts(square, target, pawn, Some(victim)));
        }
    }
}

/// Ray casting for rooks, bishops and queens.
fn slide(board: &Board, square: Square, piece: Piece, dirs: &[(i8, i8)], moves: &mut Vec<Move>) {
    for &dir in dirs {
        let mut current = square;
        while let Some(next) = current.offset(dir) {
            match board[next] {
                None => moves.push(Move::from_parts(square, next, piece, None)),
                Some(other) => {
                    if other.color != piece.color {
                        moves.push(Move::from_parts(square, next, piece, Some(other)));
                    }
                    break;
                }
            }
            current = next;
        }
    }
}

/// Single-step movers: knights and kings.
fn step(board: &Board, square: Square, piece: Piece, offsets: &[(i8, i8)], moves: &mut Vec<Move>) {
    for &offset in offsets {
        let Some(target) = square.offset(offset) else {
            continue;
        };
        match board[target] {
            Some(other) if other.color == piece.color => {}
            captured => moves.push(Move::from_parts(square, target, piece, captured)),
        }
    }
}
