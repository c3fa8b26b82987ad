// ABOUTME: Version, banner, and REPL constants

pub const VERSION: &str = "0.0.0.0.1";
pub const WELCOME_MESSAGE: &str = "qlisp Version 0.0.0.0.1";
pub const WELCOME_FOOTER: &str = "Press Ctrl+c to Exit";
pub const PROMPT: &str = "qlisp> ";
pub const HISTORY_FILE: &str = ".qlisp_history";
