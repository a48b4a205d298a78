//! Terminal front-end: board rendering, move scripts and the interactive loop.

mod display;
mod script;
mod session;

pub use display::{DisplayError, TerminalDisplay};
pub use script::{MoveScript, ScriptError};
pub use session::run_interactive_terminal;
