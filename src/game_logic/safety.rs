//! King safety: pins, checks, attacked squares and the legal-move filter.

use super::movegen::{DIAGONAL, KNIGHT_OFFSETS, ORTHOGONAL, pseudo_legal_moves};
use crate::chess_move::Move;
use crate::game_state::{Board, Color, GameState, GameStatus, PieceKind, Square};

/// A friendly piece that may only move along `direction` (seen from the king).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pin {
    pub square: Square,
    pub direction: (i8, i8),
}

/// An enemy piece attacking the king.
///
/// `direction` is the ray from the king towards the checker, or the knight
/// offset for knight checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Check {
    pub square: Square,
    pub direction: (i8, i8),
}

/// Result of scanning outward from the king of the side to move.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KingSafety {
    pub in_check: bool,
    pub pins: Vec<Pin>,
    pub checks: Vec<Check>,
}

impl KingSafety {
    fn pin_on(&self, square: Square) -> Option<&Pin> {
        self.pins.iter().find(|pin| pin.square == square)
    }
}

impl GameState {
    /// Casts the eight rays and the knight offsets around the king of the side
    /// to move, collecting pins and checks.
    pub fn pins_and_checks(&self) -> KingSafety {
        let us = self.side_to_move;
        scan_king(&self.board, self.king_square(us), us)
    }

    /// Legal moves for the side to move.
    pub fn valid_moves(&self) -> Vec<Move> {
        let us = self.side_to_move;
        let king = self.king_square(us);
        let safety = self.pins_and_checks();

        // None: no restriction. Some: non-king moves must land on one of these.
        let allowed_targets: Option<Vec<Square>> = match safety.checks.as_slice() {
            [] => None,
            [check] => Some(check_resolutions(&self.board, king, check)),
            _ => Some(Vec::new()),
        };

        let moves: Vec<Move> = self
            .all_possible_moves()
            .into_iter()
            .filter(|mv| {
                if mv.piece_moved().kind == PieceKind::King {
                    return king_move_is_safe(&self.board, mv, us);
                }
                if let Some(pin) = safety.pin_on(mv.origin())
                    && !is_collinear(mv.delta(), pin.direction)
                {
                    return false;
                }
                allowed_targets
                    .as_ref()
                    .is_none_or(|targets| targets.contains(&mv.destination()))
            })
            .collect();

        log::trace!(
            "{} legal moves for {us} ({} pins, {} checks)",
            moves.len(),
            safety.pins.len(),
            safety.checks.len()
        );
        moves
    }

    /// Reference implementation of [`valid_moves`](Self::valid_moves): plays
    /// every pseudo-legal move on a scratch board and tests the king.
    pub fn valid_moves_brute_force(&self) -> Vec<Move> {
        let us = self.side_to_move;
        self.all_possible_moves()
            .into_iter()
            .filter(|mv| {
                let mut scratch = self.board.clone();
                scratch.set(mv.origin(), None);
                scratch.set(mv.destination(), Some(mv.piece_moved()));
                let king = if mv.piece_moved().kind == PieceKind::King {
                    mv.destination()
                } else {
                    self.king_square(us)
                };
                !square_attacked_by(&scratch, king, us.opponent())
            })
            .collect()
    }

    /// Whether the king of the side that just moved is attacked. Never true
    /// for a position reached through legal play.
    pub(crate) fn opponent_in_check(&self) -> bool {
        let them = self.side_to_move.opponent();
        square_attacked_by(&self.board, self.king_square(them), self.side_to_move)
    }

    /// Whether the king of the side to move is attacked.
    pub fn in_check(&self) -> bool {
        self.square_under_attack(self.king_square(self.side_to_move))
    }

    /// Whether the opponent of the side to move has a pseudo-legal move onto
    /// `square`. The opponent's moves are generated from its own perspective;
    /// the turn is never flipped.
    pub fn square_under_attack(&self, square: Square) -> bool {
        square_attacked_by(&self.board, square, self.side_to_move.opponent())
    }

    /// Checkmate, stalemate or an ongoing game, recomputed from scratch.
    pub fn status(&self) -> GameStatus {
        let in_check = self.in_check();
        match (self.valid_moves().is_empty(), in_check) {
            (true, true) => GameStatus::Checkmate,
            (true, false) => GameStatus::Stalemate,
            (false, true) => GameStatus::Check,
            (false, false) => GameStatus::Ongoing,
        }
    }

    #[inline]
    pub fn is_checkmate(&self) -> bool {
        self.status() == GameStatus::Checkmate
    }

    #[inline]
    pub fn is_stalemate(&self) -> bool {
        self.status() == GameStatus::Stalemate
    }
}

pub(crate) fn square_attacked_by(board: &Board, square: Square, attacker: Color) -> bool {
    pseudo_legal_moves(board, attacker)
        .iter()
        .any(|mv| mv.destination() == square)
}

fn scan_king(board: &Board, king: Square, us: Color) -> KingSafety {
    let mut safety = KingSafety::default();

    let rays = ORTHOGONAL
        .iter()
        .map(|&d| (d, true))
        .chain(DIAGONAL.iter().map(|&d| (d, false)));

    for (dir, orthogonal) in rays {
        let mut candidate: Option<Square> = None;
        let mut current = king;
        let mut distance = 0;
        while let Some(next) = current.offset(dir) {
            current = next;
            distance += 1;
            let Some(piece) = board[next] else {
                continue;
            };

            if piece.color == us {
                if candidate.is_some() {
                    break;
                }
                candidate = Some(next);
                continue;
            }

            let attacks_along_ray = match piece.kind {
                PieceKind::Rook => orthogonal,
                PieceKind::Bishop => !orthogonal,
                PieceKind::Queen => true,
                // An enemy pawn captures towards the king: it sits one row
                // "behind" in its own direction of travel.
                PieceKind::Pawn => {
                    distance == 1 && !orthogonal && dir.0 == -piece.color.pawn_direction()
                }
                PieceKind::King => distance == 1,
                PieceKind::Knight => false,
            };
            if attacks_along_ray {
                match candidate {
                    None => safety.checks.push(Check {
                        square: next,
                        direction: dir,
                    }),
                    Some(pinned) => safety.pins.push(Pin {
                        square: pinned,
                        direction: dir,
                    }),
                }
            }
            break;
        }
    }

    for offset in KNIGHT_OFFSETS {
        if let Some(target) = king.offset(offset)
            && let Some(piece) = board[target]
            && piece.color != us
            && piece.kind == PieceKind::Knight
        {
            safety.checks.push(Check {
                square: target,
                direction: offset,
            });
        }
    }

    safety.in_check = !safety.checks.is_empty();
    safety
}

/// Squares a non-king move may land on to answer a single check: the checker
/// itself, plus the squares between it and the king for sliding checks.
fn check_resolutions(board: &Board, king: Square, check: &Check) -> Vec<Square> {
    let knight_check = board[check.square].is_some_and(|p| p.kind == PieceKind::Knight);
    if knight_check {
        return vec![check.square];
    }

    let mut squares = Vec::new();
    let mut current = king;
    while let Some(next) = current.offset(check.direction) {
        squares.push(next);
        if next == check.square {
            break;
        }
        current = next;
    }
    squares
}

fn king_move_is_safe(board: &Board, mv: &Move, us: Color) -> bool {
    let mut scratch = board.clone();
    scratch.set(mv.origin(), None);
    scratch.set(mv.destination(), Some(mv.piece_moved()));
    !square_attacked_by(&scratch, mv.destination(), us.opponent())
}

/// Whether a move delta lies on the line through `direction`.
fn is_collinear((dr, dc): (i8, i8), (pr, pc): (i8, i8)) -> bool {
    dr * pc == dc * pr
}
