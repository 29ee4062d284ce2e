// Library interface for wordle-game
// This allows integration tests to access internal modules

pub mod board;
pub mod cli;
pub mod event_log;
pub mod game_state;
pub mod logging;
pub mod scoring;
pub mod tui;
pub mod word;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use board::{Board, Cell, MAX_GUESSES, Row, current_word};
pub use event_log::{EventLog, Severity};
pub use game_state::{
    Game, GameInterface, GameStatus, Key, KeyOutcome, Notice, Rejection, SessionSummary,
    Submission, UserAction, game_loop,
};
pub use scoring::{Classification, pattern_string, score_guess};
pub use word::{WORD_LENGTH, Word, WordError};
pub use wordbank::{SecretPicker, load_wordbank_from_file, load_wordbank_from_str};
