use std::io::{self, Write};

use super::display::{DisplayError, TerminalDisplay};
use super::script::parse_move;
use crate::BoardDisplay;
use crate::feedback::compute_feedback;
use crate::game_state::{GameState, GameStatus, Square};

/// Clears the screen and moves cursor to top-left.
#[inline]
fn clear_screen() {
    print!("\x1B[2J\x1B[H");
}

/// What the loop should do after a command.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Redraw(Option<String>),
    Message(String),
    Quit,
}

/// Game plus the player's current selection.
#[derive(Debug)]
struct Session {
    game: GameState,
    selected: Option<Square>,
}

impl Session {
    fn new(game: GameState) -> Self {
        Self {
            game,
            selected: None,
        }
    }

    fn execute(&mut self, input: &str) -> Flow {
        let parts: Vec<&str> = input.split_whitespace().collect();
        let Some(&command) = parts.first() else {
            return Flow::Redraw(None);
        };

        match command {
            "s" => match parts.get(1).map(|s| s.parse::<Square>()) {
                Some(Ok(square)) => {
                    self.selected = Some(square);
                    Flow::Redraw(None)
                }
                Some(Err(e)) => Flow::Message(format!("Invalid square: {e}")),
                None => Flow::Message("Usage: s <square>".into()),
            },
            "u" => {
                self.selected = None;
                match self.game.undo_move() {
                    Some(mv) => Flow::Redraw(Some(format!("↩️  Undid {mv}"))),
                    None => Flow::Redraw(Some("Nothing to undo".into())),
                }
            }
            "load" => {
                let fen = input.trim_start().trim_start_matches("load").trim();
                if fen.is_empty() {
                    return Flow::Message("Usage: load <fen> | load startpos".into());
                }
                let loaded = if fen == "startpos" {
                    Ok(GameState::new())
                } else {
                    GameState::from_fen(fen)
                };
                match loaded {
                    Ok(game) => {
                        *self = Session::new(game);
                        Flow::Redraw(Some("✅ Position loaded from FEN".into()))
                    }
                    Err(e) => Flow::Message(format!("❌ Invalid FEN: {e}")),
                }
            }
            "r" => {
                *self = Session::new(GameState::new());
                Flow::Redraw(Some("🔄 Reset to initial state".into()))
            }
            "p" => Flow::Redraw(None),
            "q" => Flow::Quit,
            token => match parse_move(token) {
                Ok((from, to)) => match self.game.play(from, to) {
                    Ok(_) => {
                        self.selected = None;
                        Flow::Redraw(None)
                    }
                    Err(e) => Flow::Message(format!("❌ {e}")),
                },
                Err(_) => Flow::Message("Unknown command".into()),
            },
        }
    }

    /// Draws the complete interface: help text, status line and board.
    fn draw<W: Write>(&self, display: &mut TerminalDisplay<W>) -> Result<(), DisplayError> {
        let view = self.game.view(self.selected);
        let feedback = compute_feedback(&view);

        let w = display.writer();
        writeln!(w, "♟️  Chess Rules Terminal")?;
        writeln!(w)?;
        writeln!(
            w,
            "Commands: <from><to> | s <square> | u (undo) | load <fen> | r (reset) | p (refresh) | q (quit)"
        )?;
        writeln!(w)?;
        display.show(self.game.board(), &feedback)?;

        let w = display.writer();
        writeln!(w)?;
        let status = match view.status() {
            GameStatus::Ongoing => "",
            GameStatus::Check => " (check)",
            GameStatus::Checkmate => " (checkmate)",
            GameStatus::Stalemate => " (stalemate)",
        };
        writeln!(w, "{} to move{status}", view.side_to_move())?;
        if let Some(mv) = self.game.last_move() {
            writeln!(w, "Last move: {mv}")?;
        }
        writeln!(w, "FEN: {}", self.game.fen())?;
        Ok(())
    }
}

/// Runs an interactive terminal for playing moves against the rules engine.
///
/// Starts from `fen` if given, otherwise from the standard position. An
/// unreadable FEN falls back to the standard position with a warning.
pub fn run_interactive_terminal(fen: Option<&str>) {
    let game = match fen.map(GameState::from_fen) {
        Some(Ok(game)) => game,
        Some(Err(e)) => {
            log::warn!("ignoring start position: {e}");
            eprintln!("Invalid FEN ({e}), starting from the initial position");
            GameState::new()
        }
        None => GameState::new(),
    };
    let mut session = Session::new(game);
    let mut display = TerminalDisplay::new();

    clear_screen();
    if let Err(e) = session.draw(&mut display) {
        eprintln!("Failed to draw board: {}", e);
        return;
    }

    loop {
        print!("> ");
        if let Err(e) = io::stdout().flush() {
            eprintln!("Failed to flush stdout: {}", e);
            break;
        }

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("Failed to read input: {}", e);
                break;
            }
        }

        match session.execute(&input) {
            Flow::Redraw(note) => {
                clear_screen();
                if let Err(e) = session.draw(&mut display) {
                    eprintln!("Failed to draw board: {}", e);
                    break;
                }
                if let Some(note) = note {
                    println!("\n{note}");
                }
            }
            Flow::Message(message) => println!("{message}"),
            Flow::Quit => break,
        }
    }
}
