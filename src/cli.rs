use crate::board::Row;
use crate::game_state::{Game, GameInterface, Key, KeyOutcome, Notice, UserAction};
use crate::word::Word;
use crate::wordbank::{DEFAULT_SECRET, SecretPicker};
use clap::Parser;
use std::collections::VecDeque;
use std::io::BufRead;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

pub const DEFAULT_NOTIFY_DELAY_MS: u64 = 500;

/// Wordle game options
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited wordbank file
    #[arg(short = 'i', long = "input")]
    pub wordbank_path: Option<PathBuf>,

    /// Secret word to guess (defaults to WORDS)
    #[arg(short = 's', long, conflicts_with = "daily")]
    pub secret: Option<Word>,

    /// Pick the secret word from the wordbank by today's date
    #[arg(long)]
    pub daily: bool,

    /// Line-based play on stdin instead of the full-screen interface
    #[arg(long)]
    pub plain: bool,

    /// Delay before the win/lose message, in milliseconds
    #[arg(long, default_value_t = DEFAULT_NOTIFY_DELAY_MS)]
    pub notify_delay_ms: u64,

    /// Where to write the log (defaults to the user data directory)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn notify_delay(&self) -> Duration {
        Duration::from_millis(self.notify_delay_ms)
    }

    /// Build the secret picker from the options. `None` if `--daily` has no words to pick from.
    pub fn secret_picker(&self, wordbank: Vec<Word>) -> Option<SecretPicker> {
        if self.daily {
            return SecretPicker::today(wordbank);
        }
        let secret = match self.secret {
            Some(word) => word,
            None => Word::new(DEFAULT_SECRET).ok()?,
        };
        Some(SecretPicker::fixed(secret))
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// UI Input/Output functions

/// Translate one whitespace-separated input token into actions.
///
/// A whole five-letter word is typed letter by letter and submitted.
pub fn parse_token(token: &str) -> Vec<UserAction> {
    match token.to_uppercase().as_str() {
        "EXIT" | "QUIT" => vec![UserAction::Exit],
        "NEW" | "NEXT" => vec![UserAction::NewGame],
        "CLEAR" => vec![UserAction::ClearLog],
        upper => {
            if let Some(key) = Key::parse(upper) {
                return vec![UserAction::Key(key)];
            }
            match Word::new(upper) {
                Ok(word) => word
                    .letters()
                    .map(|c| UserAction::Key(Key::Letter(c)))
                    .chain(std::iter::once(UserAction::Key(Key::Enter)))
                    .collect(),
                Err(_) => Vec::new(),
            }
        }
    }
}

/// `C R A N E  XYXXG` for scored rows, `W O R _ _` while typing.
pub fn format_row(row: &Row) -> String {
    let letters: Vec<String> = row
        .cells()
        .iter()
        .map(|c| c.letter.unwrap_or('_').to_string())
        .collect();
    let mut line = letters.join(" ");
    if row.is_scored() {
        let pattern: String = row
            .cells()
            .iter()
            .filter_map(|c| c.classification.map(|k| k.to_char()))
            .collect();
        line.push_str("  ");
        line.push_str(&pattern);
    }
    line
}

pub fn display_board(game: &Game) {
    for row in &game.board().rows()[..game.active_row()] {
        println!("{}", format_row(row));
    }
}

pub fn display_exit_message() {
    println!("Exiting.");
}

/// Line-mode implementation of the `GameInterface` trait.
pub struct CliInterface<R: BufRead> {
    reader: R,
    pending: VecDeque<UserAction>,
    notify_delay: Duration,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self::with_delay(reader, Duration::ZERO)
    }

    pub fn with_delay(reader: R, notify_delay: Duration) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
            notify_delay,
        }
    }

    fn fill_pending(&mut self) -> bool {
        let mut input = String::new();
        match self.reader.read_line(&mut input) {
            Ok(0) => return false,
            Ok(_) => {}
            Err(e) => {
                log::warn!("Failed to read input: {e}");
                return false;
            }
        }
        for token in input.split_whitespace() {
            let actions = parse_token(token);
            if actions.is_empty() {
                println!("Ignoring '{token}'.");
            }
            self.pending.extend(actions);
        }
        true
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn display_new_game(&mut self, _game: &Game) {
        println!("\nNew game started. Guess the 5-letter word in 6 tries.");
        println!(
            "Type letters, 'backspace', 'enter', or a whole word. 'new' restarts, 'clear' empties the log, 'exit' quits."
        );
    }

    fn read_action(&mut self, _game: &Game) -> Option<UserAction> {
        if self.pending.is_empty() && !self.fill_pending() {
            return Some(UserAction::Exit);
        }
        self.pending.pop_front()
    }

    fn display_outcome(&mut self, game: &Game, outcome: &KeyOutcome) {
        match outcome {
            KeyOutcome::Ignored => {
                println!("The game is over. Type 'new' to play again or 'exit' to quit.");
            }
            KeyOutcome::Updated => {}
            KeyOutcome::Rejected(rejection) => println!("{rejection}"),
            KeyOutcome::Submitted(_) => display_board(game),
        }
    }

    fn announce(&mut self, notice: Notice) {
        if !self.notify_delay.is_zero() {
            thread::sleep(self.notify_delay);
        }
        println!("{notice}");
    }

    fn display_log_cleared(&mut self, _game: &Game) {
        println!("Debug log cleared.");
    }

    fn display_exit_message(&mut self) {
        display_exit_message();
    }
}
