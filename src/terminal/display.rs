use std::io::{self, Write};

use crate::BoardDisplay;
use crate::feedback::{BoardFeedback, SquareFeedback};
use crate::game_state::{BOARD_SIZE, Board, Square};

/// Terminal-based board display.
///
/// Renders the board as an 8×8 grid of piece letters with ANSI color-coded
/// squares matching the feedback type (destinations, captures, etc.).
/// Writes to stdout unless built with [`TerminalDisplay::with_writer`].
#[derive(Debug)]
pub struct TerminalDisplay<W = io::Stdout> {
    out: W,
}

impl TerminalDisplay {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for TerminalDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalDisplay<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    /// Underlying writer, for text printed around the board.
    #[inline]
    pub fn writer(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Error type for terminal display operations.
#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error("failed to write to terminal: {0}")]
    Io(#[from] io::Error),
}

impl<W: Write> BoardDisplay for TerminalDisplay<W> {
    type Error = DisplayError;

    fn show(&mut self, board: &Board, feedback: &BoardFeedback) -> Result<(), Self::Error> {
        render_board(&mut self.out, board, feedback)
    }
}

/// Render board and feedback to any writer.
fn render_board(
    w: &mut impl Write,
    board: &Board,
    feedback: &BoardFeedback,
) -> Result<(), DisplayError> {
    for row in 0..BOARD_SIZE as u8 {
        write!(w, " {} ", BOARD_SIZE as u8 - row)?;
        for col in 0..BOARD_SIZE as u8 {
            let square = Square::at(row, col);
            let symbol = board[square].map_or('·', |piece| piece.fen_char());
            write!(w, "{}", format_square(symbol, feedback.get(square)))?;
        }
        writeln!(w)?;
    }
    writeln!(w, "    a  b  c  d  e  f  g  h")?;
    w.flush()?;
    Ok(())
}

/// Wrap a cell in the ANSI background for its feedback variant.
fn format_square(symbol: char, feedback: Option<SquareFeedback>) -> String {
    let background = match feedback {
        Some(SquareFeedback::Destination) => "44",
        Some(SquareFeedback::Capture) => "41",
        Some(SquareFeedback::Origin) => "42",
        Some(SquareFeedback::Check) => "45",
        Some(SquareFeedback::Checker) => "43",
        None => return format!(" {symbol} "),
    };
    format!("\x1b[{background}m {symbol} \x1b[0m")
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn render_to_string(board: &Board, feedback: &BoardFeedback) -> String {
        let mut display = TerminalDisplay::with_writer(Vec::new());
        display
            .show(board, feedback)
            .expect("rendering to buffer should succeed");
        String::from_utf8(display.into_inner()).expect("output should be valid UTF-8")
    }

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn show_empty_feedback_contains_all_ranks() {
        let output = render_to_string(&Board::empty(), &BoardFeedback::new());

        for rank in '1'..='8' {
            assert!(
                output.contains(rank),
                "output should contain rank label '{rank}'"
            );
        }
    }

    #[test]
    fn show_empty_feedback_contains_file_labels() {
        let output = render_to_string(&Board::empty(), &BoardFeedback::new());

        assert!(
            output.contains("a  b  c  d  e  f  g  h"),
            "output should contain file labels"
        );
    }

    #[test]
    fn rank_eight_is_printed_first() {
        let output = render_to_string(&Board::starting_position(), &BoardFeedback::new());
        let first = output.lines().next().unwrap();

        assert_eq!(first, " 8  r  n  b  q  k  b  n  r ");
        assert!(output.lines().nth(7).unwrap().starts_with(" 1  R "));
    }

    #[test_case("e4", SquareFeedback::Destination, "\x1b[44m"; "destination is blue")]
    #[test_case("d5", SquareFeedback::Capture, "\x1b[41m"; "capture is red")]
    #[test_case("e2", SquareFeedback::Origin, "\x1b[42m"; "origin is green")]
    #[test_case("e8", SquareFeedback::Check, "\x1b[45m"; "check is magenta")]
    #[test_case("h5", SquareFeedback::Checker, "\x1b[43m"; "checker is yellow")]
    fn feedback_background(square: &str, kind: SquareFeedback, code: &str) {
        let mut feedback = BoardFeedback::new();
        feedback.set(sq(square), kind);

        let output = render_to_string(&Board::starting_position(), &feedback);

        assert!(output.contains(code), "{kind:?} should use {code:?}");
    }

    #[test]
    fn highlighted_cell_keeps_piece_letter() {
        let mut feedback = BoardFeedback::new();
        feedback.set(sq("e2"), SquareFeedback::Origin);

        let output = render_to_string(&Board::starting_position(), &feedback);

        assert!(output.contains("\x1b[42m P \x1b[0m"));
    }

    #[test]
    fn empty_feedback_has_no_ansi_codes() {
        let output = render_to_string(&Board::starting_position(), &BoardFeedback::new());

        assert!(
            !output.contains("\x1b[4"),
            "empty feedback should have no ANSI background codes"
        );
    }
}
