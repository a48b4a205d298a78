use crate::chess_move::Move;
use crate::game_state::Square;

/// Type of visual feedback for an individual square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SquareFeedback {
    /// Legal destination of the selected piece
    Destination,
    /// Moving here captures an opponent piece
    Capture,
    /// The selected piece
    Origin,
    /// King of the side to move, currently attacked
    Check,
    /// Opponent piece giving check
    Checker,
}

/// Contains the set of squares and their associated feedback types for the current position.
///
/// `BoardFeedback` is computed by `compute_feedback()` and consumed by a
/// [`BoardDisplay`](crate::BoardDisplay) to highlight squares for the player.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoardFeedback {
    squares: Vec<(Square, SquareFeedback)>,
}

impl BoardFeedback {
    /// Create empty feedback (no highlights)
    #[inline]
    pub const fn new() -> Self {
        Self {
            squares: Vec::new(),
        }
    }

    #[inline]
    pub fn squares(&self) -> &[(Square, SquareFeedback)] {
        &self.squares
    }

    /// Get feedback for a specific square, if any
    #[inline]
    pub fn get(&self, square: Square) -> Option<SquareFeedback> {
        self.squares
            .iter()
            .find(|(sq, _)| *sq == square)
            .map(|(_, feedback)| *feedback)
    }

    /// Set feedback for a square, replacing any previous entry
    pub fn set(&mut self, square: Square, feedback: SquareFeedback) {
        match self.squares.iter_mut().find(|(sq, _)| *sq == square) {
            Some(entry) => entry.1 = feedback,
            None => self.squares.push((square, feedback)),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }
}

impl From<Vec<(Square, SquareFeedback)>> for BoardFeedback {
    fn from(squares: Vec<(Square, SquareFeedback)>) -> Self {
        Self { squares }
    }
}

/// The attacked king and the pieces attacking it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckInfo {
    pub king_square: Square,
    pub checkers: Vec<Square>,
}

/// Game state information needed to compute feedback
///
/// This trait defines what the feedback system needs from the rules engine.
pub trait FeedbackSource {
    /// All legal moves in the current position
    fn legal_moves(&self) -> &[Move];

    /// Square the player has selected, if any
    fn selected_square(&self) -> Option<Square>;

    /// `Some` while the side to move is in check
    fn check_info(&self) -> Option<CheckInfo>;
}

/// Compute visual feedback based on current game state.
///
/// - Square selected: the square itself plus its legal destinations
/// - Nothing selected while in check: the king and every checker
/// - Otherwise nothing
pub fn compute_feedback(source: &impl FeedbackSource) -> BoardFeedback {
    match (source.selected_square(), source.check_info()) {
        (Some(from), _) => show_destinations_for(source.legal_moves(), from),
        (None, Some(check)) => show_check(&check),
        (None, None) => BoardFeedback::default(),
    }
}

fn show_destinations_for(legal_moves: &[Move], from: Square) -> BoardFeedback {
    let mut feedback = BoardFeedback::new();
    feedback.set(from, SquareFeedback::Origin);
    for (square, kind) in legal_moves
        .iter()
        .filter(|mv| mv.origin() == from)
        .map(classify_move)
    {
        feedback.set(square, kind);
    }
    feedback
}

fn show_check(check: &CheckInfo) -> BoardFeedback {
    let mut feedback = BoardFeedback::new();
    feedback.set(check.king_square, SquareFeedback::Check);
    for &square in &check.checkers {
        feedback.set(square, SquareFeedback::Checker);
    }
    feedback
}

/// Classify a move as either a capture or regular destination
fn classify_move(mv: &Move) -> (Square, SquareFeedback) {
    if mv.is_capture() {
        (mv.destination(), SquareFeedback::Capture)
    } else {
        (mv.destination(), SquareFeedback::Destination)
    }
}
