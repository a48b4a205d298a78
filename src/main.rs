fn main() {
    let fen = std::env::args().nth(1);
    chess_rules::terminal::run_interactive_terminal(fen.as_deref());
}
