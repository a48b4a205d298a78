use std::collections::VecDeque;

use thiserror::Error;

use crate::chess_move::Move;
use crate::error::RulesError;
use crate::game_state::{GameState, Square};

/// Error when parsing or playing a move script.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("invalid move notation: '{0}'")]
    Parse(String),
    #[error(transparent)]
    Rules(#[from] RulesError),
}

/// A queue of coordinate moves fed into a [`GameState`].
///
/// New script can be appended at any time for interactive use.
#[derive(Debug, Clone, Default)]
pub struct MoveScript {
    pending: VecDeque<(Square, Square)>,
}

impl MoveScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and queue additional script for execution.
    ///
    /// Format:
    /// - A move is two squares written together (e.g., "e2e4")
    /// - Whitespace or periods separate moves
    ///
    /// Examples:
    /// - `"e2e4 e7e5"` - two moves
    /// - `"e2e4. e7e5. g1f3."` - same with move-number style periods
    pub fn push_script(&mut self, script: &str) -> Result<(), ScriptError> {
        let moves = parse_script(script)?;
        self.pending.extend(moves);
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Play the next pending move. Returns `None` when the queue is empty.
    ///
    /// A rejected move is consumed and reported; the game is left untouched.
    pub fn play_next(&mut self, game: &mut GameState) -> Option<Result<Move, ScriptError>> {
        let (from, to) = self.pending.pop_front()?;
        Some(game.play(from, to).map_err(ScriptError::from))
    }

    /// Play all pending moves, calling `on_move` after each one.
    ///
    /// Stops at the first rejected move and clears whatever remains queued.
    pub fn drain<F>(&mut self, game: &mut GameState, mut on_move: F) -> Result<(), ScriptError>
    where
        F: FnMut(&GameState, Move),
    {
        while let Some(result) = self.play_next(game) {
            match result {
                Ok(mv) => on_move(game, mv),
                Err(e) => {
                    self.pending.clear();
                    return Err(e);
                }
            }
        }
        Ok(())
    }
}

fn parse_script(script: &str) -> Result<Vec<(Square, Square)>, ScriptError> {
    script
        .split(|c: char| c.is_whitespace() || c == '.')
        .filter(|token| !token.is_empty())
        .map(parse_move)
        .collect()
}

/// Parse a single coordinate move such as `e2e4`.
pub(crate) fn parse_move(token: &str) -> Result<(Square, Square), ScriptError> {
    let parse_error = || ScriptError::Parse(token.to_string());
    if !token.is_ascii() || token.len() != 4 {
        return Err(parse_error());
    }
    let (from, to) = token.split_at(2);
    let from = from.parse().map_err(|_| parse_error())?;
    let to = to.parse().map_err(|_| parse_error())?;
    Ok((from, to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("e2e4 zz"; "bad square")]
    #[test_case("e2e"; "short move")]
    #[test_case("e2e4e5"; "long move")]
    #[test_case("e2 e4"; "split squares")]
    fn test_parse_error(script: &str) {
        let mut moves = MoveScript::new();
        assert!(matches!(
            moves.push_script(script),
            Err(ScriptError::Parse(_))
        ));
        assert!(moves.is_empty());
    }

    #[test]
    fn test_parse_error_names_token() {
        let mut moves = MoveScript::new();
        let result = moves.push_script("e2e4.  zz99.");
        assert_eq!(result, Err(ScriptError::Parse("zz99".to_string())));
    }

    #[test]
    fn test_parse_error_does_not_modify_queue() {
        let mut moves = MoveScript::new();
        moves.push_script("e2e4. ").unwrap();

        assert!(moves.push_script("xx.").is_err());

        assert_eq!(moves.len(), 1);
        let mut game = GameState::new();
        let mv = moves.play_next(&mut game).unwrap().unwrap();
        assert_eq!(mv.notation(), "p e2 -> p e4");
    }

    #[test]
    fn test_drain_plays_in_order() {
        let mut moves = MoveScript::new();
        moves.push_script("e2e4 e7e5. g1f3").unwrap();
        let mut game = GameState::new();
        let mut played = Vec::new();

        moves
            .drain(&mut game, |_, mv| played.push(mv.to_string()))
            .unwrap();

        assert_eq!(
            played,
            ["p e2 -> p e4", "p e7 -> p e5", "N g1 -> N f3"]
        );
        assert_eq!(game.move_log().len(), 3);
        assert!(moves.is_empty());
    }

    #[test]
    fn test_drain_stops_at_illegal_move() {
        let mut moves = MoveScript::new();
        moves.push_script("e2e4 e2e4 d7d5").unwrap();
        let mut game = GameState::new();

        let result = moves.drain(&mut game, |_, _| {});

        assert!(matches!(
            result,
            Err(ScriptError::Rules(RulesError::EmptySquare(_)))
        ));
        assert_eq!(game.move_log().len(), 1);
        assert!(moves.is_empty());
    }

    #[test]
    fn test_play_next_on_empty_queue() {
        let mut game = GameState::new();
        assert!(MoveScript::new().play_next(&mut game).is_none());
    }
}
