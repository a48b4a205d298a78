//! Chess rules engine: board state, legal-move generation with pin and check
//! analysis, checkmate and stalemate detection, and reversible move history.
//!
//! ```
//! use chess_rules::{GameState, GameStatus};
//!
//! let mut game = GameState::new();
//! game.play("f2".parse()?, "f3".parse()?)?;
//! game.play("e7".parse()?, "e5".parse()?)?;
//! game.play("g2".parse()?, "g4".parse()?)?;
//! game.play("d8".parse()?, "h4".parse()?)?;
//! assert_eq!(game.status(), GameStatus::Checkmate);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod chess_move;
pub mod error;
pub mod feedback;
pub mod game_logic;
pub mod game_state;
pub mod terminal;

pub use chess_move::Move;
pub use error::RulesError;
pub use game_logic::{Check, KingSafety, Pin, TurnView};
pub use game_state::{
    BOARD_SIZE, Board, Color, FenError, GameState, GameStatus, Piece, PieceKind, Square,
    SquareParseError,
};

/// Trait for displaying the board and its feedback to the player.
///
/// Abstracts over output devices so the game loop does not care whether it
/// draws to a terminal or something else.
pub trait BoardDisplay {
    /// Error type for display update failures.
    type Error: std::fmt::Debug + std::fmt::Display;

    /// Show the given position with feedback highlights.
    ///
    /// Implementations map [`feedback::SquareFeedback`] variants to
    /// device-specific output (terminal colors, etc.).
    fn show(
        &mut self,
        board: &Board,
        feedback: &feedback::BoardFeedback,
    ) -> Result<(), Self::Error>;
}
