use crate::game_state::GameState;

impl GameState {
    /// Counts the leaf nodes of the legal-move tree `depth` plies deep.
    ///
    /// Runs make/undo on `self`, which is restored before returning.
    pub fn perft(&mut self, depth: u32) -> u64 {
        if depth == 0 {
            return 1;
        }

        let moves = self.valid_moves();
        if depth == 1 {
            return moves.len() as u64;
        }

        let mut nodes = 0;
        for mv in moves {
            self.apply(mv);
            nodes += self.perft(depth - 1);
            self.undo_move();
        }
        nodes
    }

    /// Per-move node counts at the root, sorted by coordinate notation.
    pub fn perft_divide(&mut self, depth: u32) -> Vec<(String, u64)> {
        let mut out: Vec<(String, u64)> = self
            .valid_moves()
            .into_iter()
            .map(|mv| {
                self.apply(mv);
                let nodes = self.perft(depth.saturating_sub(1));
                self.undo_move();
                (format!("{}{}", mv.origin(), mv.destination()), nodes)
            })
            .collect();
        out.sort();
        out
    }
}
