use crate::board::{self, Board, MAX_GUESSES};
use crate::event_log::EventLog;
use crate::scoring::{Classification, pattern_string, score_guess};
use crate::wordbank::SecretPicker;
use crate::word::{WORD_LENGTH, Word};
use crate::{debug_log, info_log};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// Why an operation was refused. The game is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    RowFull,
    NothingToDelete,
    IncompleteRow { letters: usize },
    GameOver,
    NotALetter(char),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RowFull => write!(f, "Row is full, press ENTER to submit"),
            Self::NothingToDelete => write!(f, "Nothing to delete"),
            Self::IncompleteRow { letters } => {
                write!(f, "Guess must be exactly {WORD_LENGTH} letters ({letters} entered)")
            }
            Self::GameOver => write!(f, "Game is over"),
            Self::NotALetter(c) => write!(f, "Only letters are allowed ('{c}' is not a letter)"),
        }
    }
}

impl std::error::Error for Rejection {}

/// A recognized key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Letter(char),
    Backspace,
    Enter,
}

impl Key {
    /// Parse a key name case-insensitively. Unrecognized keys yield `None`.
    pub fn parse(token: &str) -> Option<Self> {
        let upper = token.trim().to_uppercase();
        match upper.as_str() {
            "BACKSPACE" => Some(Self::Backspace),
            "ENTER" => Some(Self::Enter),
            _ => {
                let mut chars = upper.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_uppercase() => Some(Self::Letter(c)),
                    _ => None,
                }
            }
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Letter(c) => write!(f, "{c}"),
            Self::Backspace => f.write_str("BACKSPACE"),
            Self::Enter => f.write_str("ENTER"),
        }
    }
}

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub guess: Word,
    pub classifications: [Classification; WORD_LENGTH],
    pub status: GameStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    Ignored,
    Updated,
    Submitted(Submission),
    Rejected(Rejection),
}

/// Win/lose announcement shown once a game ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Won { attempts: usize },
    Lost { secret: Word },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Won { attempts: 1 } => write!(f, "Congratulations! You guessed it in 1 try!"),
            Self::Won { attempts } => {
                write!(f, "Congratulations! You guessed it in {attempts} tries!")
            }
            Self::Lost { secret } => write!(f, "Game over! The word was {secret}."),
        }
    }
}

/// Board, turn cursor, and status of a single game.
#[derive(Debug, Clone)]
pub struct Game {
    secret: Word,
    board: Board,
    active_row: usize,
    active_column: usize,
    status: GameStatus,
    log: EventLog,
}

impl Game {
    pub fn new(secret: Word) -> Self {
        info_log!("Game::new() - secret word: {}", secret);
        let mut log = EventLog::new();
        log.success("Game initialized successfully!");
        log.info(format!("Target word: {secret}"));
        log.info("Try typing letters, pressing Backspace, or Enter");
        Self {
            secret,
            board: Board::new(),
            active_row: 0,
            active_column: 0,
            status: GameStatus::InProgress,
            log,
        }
    }

    pub fn secret(&self) -> &Word {
        &self.secret
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn active_row(&self) -> usize {
        self.active_row
    }

    pub fn active_column(&self) -> usize {
        self.active_column
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn log_mut(&mut self) -> &mut EventLog {
        &mut self.log
    }

    /// Letters typed into the active row. Empty once the game is over.
    pub fn current_word(&self) -> String {
        if self.active_row < MAX_GUESSES {
            board::current_word(self.board.row(self.active_row))
        } else {
            String::new()
        }
    }

    pub fn notice(&self) -> Option<Notice> {
        match self.status {
            GameStatus::InProgress => None,
            GameStatus::Won => Some(Notice::Won {
                attempts: self.active_row,
            }),
            GameStatus::Lost => Some(Notice::Lost {
                secret: self.secret,
            }),
        }
    }

    /// Best classification seen for each letter `A..=Z` in scored rows.
    pub fn letter_hints(&self) -> [Option<Classification>; 26] {
        let mut hints = [None; 26];
        for row in &self.board.rows()[..self.active_row] {
            for cell in row.cells() {
                let (Some(letter), Some(classification)) = (cell.letter, cell.classification)
                else {
                    continue;
                };
                let slot: &mut Option<Classification> = &mut hints[(letter as u8 - b'A') as usize];
                if slot.is_none_or(|seen| classification.rank() > seen.rank()) {
                    *slot = Some(classification);
                }
            }
        }
        hints
    }

    fn reject<T>(&mut self, rejection: Rejection) -> Result<T, Rejection> {
        self.log.error(rejection.to_string());
        Err(rejection)
    }

    fn ensure_in_progress(&mut self) -> Result<(), Rejection> {
        if self.is_over() {
            return self.reject(Rejection::GameOver);
        }
        Ok(())
    }

    pub fn add_letter(&mut self, letter: char) -> Result<(), Rejection> {
        self.ensure_in_progress()?;
        self.log.info(format!("add_letter(\"{letter}\") called"));
        if !letter.is_ascii_alphabetic() {
            return self.reject(Rejection::NotALetter(letter));
        }
        if self.active_column >= WORD_LENGTH {
            return self.reject(Rejection::RowFull);
        }

        let letter = letter.to_ascii_uppercase();
        self.board
            .row_mut(self.active_row)
            .set_letter(self.active_column, letter);
        self.log.success(format!(
            "Tile ({}, {}) set to {letter}",
            self.active_row, self.active_column
        ));
        self.active_column += 1;
        self.log
            .info(format!("Current word progress: {}", self.current_word()));
        Ok(())
    }

    pub fn delete_letter(&mut self) -> Result<(), Rejection> {
        self.ensure_in_progress()?;
        self.log.info("delete_letter() called");
        if self.active_column == 0 {
            return self.reject(Rejection::NothingToDelete);
        }

        self.active_column -= 1;
        self.board
            .row_mut(self.active_row)
            .clear_letter(self.active_column);
        self.log.success(format!(
            "Tile ({}, {}) cleared",
            self.active_row, self.active_column
        ));
        self.log
            .info(format!("Current word progress: {}", self.current_word()));
        Ok(())
    }

    pub fn submit_guess(&mut self) -> Result<Submission, Rejection> {
        self.ensure_in_progress()?;
        self.log.info("submit_guess() called");
        if self.active_column < WORD_LENGTH {
            return self.reject(Rejection::IncompleteRow {
                letters: self.active_column,
            });
        }
        let Some(guess) = self.board.row(self.active_row).to_word() else {
            return self.reject(Rejection::IncompleteRow {
                letters: self.active_column,
            });
        };

        let classifications = score_guess(&guess, &self.secret);
        self.board.row_mut(self.active_row).apply(&classifications);
        self.log.info(format!(
            "Guess {} scored {}",
            guess,
            pattern_string(&classifications)
        ));

        self.active_row += 1;
        self.active_column = 0;
        self.status = if guess == self.secret {
            GameStatus::Won
        } else if self.active_row >= MAX_GUESSES {
            GameStatus::Lost
        } else {
            GameStatus::InProgress
        };

        match self.status {
            GameStatus::Won => self.log.success(format!(
                "Solved in {} of {MAX_GUESSES} attempts",
                self.active_row
            )),
            GameStatus::Lost => self
                .log
                .warning(format!("Out of attempts, the word was {}", self.secret)),
            GameStatus::InProgress => self.log.info(format!(
                "Moving to row {} of {MAX_GUESSES}",
                self.active_row + 1
            )),
        }

        Ok(Submission {
            guess,
            classifications,
            status: self.status,
        })
    }

    /// Dispatch one key press. Keys are ignored once the game is over.
    pub fn handle_key(&mut self, key: Key) -> KeyOutcome {
        if self.is_over() {
            debug_log!("handle_key() - game over, ignoring {:?}", key);
            return KeyOutcome::Ignored;
        }
        debug_log!("handle_key() - {:?}", key);
        self.log.info(format!("Key \"{key}\" pressed"));

        let result = match key {
            Key::Backspace => self.delete_letter().map(|()| KeyOutcome::Updated),
            Key::Enter => self.submit_guess().map(KeyOutcome::Submitted),
            Key::Letter(c) => self.add_letter(c).map(|()| KeyOutcome::Updated),
        };
        result.unwrap_or_else(KeyOutcome::Rejected)
    }
}

/// Something the player asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    Key(Key),
    NewGame,
    /// Empty the game's event log.
    ClearLog,
    Exit,
}

/// Games finished during one `game_loop` run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub won: usize,
    pub lost: usize,
}

/// Front end driven by `game_loop`.
pub trait GameInterface {
    fn display_new_game(&mut self, game: &Game);
    /// Next player action. `None` means nothing happened yet.
    fn read_action(&mut self, game: &Game) -> Option<UserAction>;
    fn display_outcome(&mut self, game: &Game, outcome: &KeyOutcome);
    /// Announce the end of a game. May be deferred by the front end.
    fn announce(&mut self, notice: Notice);
    fn display_log_cleared(&mut self, game: &Game);
    fn display_exit_message(&mut self);
}

pub fn game_loop<I: GameInterface>(picker: &mut SecretPicker, interface: &mut I) -> SessionSummary {
    let mut summary = SessionSummary::default();
    let mut game = Game::new(picker.next_secret());
    interface.display_new_game(&game);

    loop {
        let Some(action) = interface.read_action(&game) else {
            continue;
        };
        match action {
            UserAction::Exit => {
                interface.display_exit_message();
                break;
            }
            UserAction::NewGame => {
                game = Game::new(picker.next_secret());
                interface.display_new_game(&game);
            }
            UserAction::ClearLog => {
                game.log_mut().clear();
                interface.display_log_cleared(&game);
            }
            UserAction::Key(key) => {
                let outcome = game.handle_key(key);
                interface.display_outcome(&game, &outcome);
                if let KeyOutcome::Submitted(submission) = &outcome
                    && let Some(notice) = game.notice()
                {
                    match submission.status {
                        GameStatus::Won => summary.won += 1,
                        GameStatus::Lost => summary.lost += 1,
                        GameStatus::InProgress => {}
                    }
                    interface.announce(notice);
                }
            }
        }
    }
    summary
}
