use crate::word::Word;
use chrono::{Local, NaiveDate};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

pub const EMBEDDED_WORDBANK: &str = include_str!("resources/wordbank.txt");

pub const DEFAULT_SECRET: &str = "WORDS";

pub fn load_wordbank_from_str(data: &str) -> Vec<Word> {
    data.lines().filter_map(|line| Word::new(line).ok()).collect()
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<Word>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        if let Ok(word) = Word::new(&line?) {
            words.push(word);
        }
    }
    Ok(words)
}

/// Days between 1970-01-01 and `date`, clamped at zero.
pub fn day_number(date: NaiveDate) -> usize {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or(NaiveDate::MIN);
    usize::try_from(date.signed_duration_since(epoch).num_days()).unwrap_or(0)
}

/// Chooses the secret word for each new game.
///
/// Holds at least one word. A fixed picker holds exactly one.
#[derive(Debug, Clone)]
pub struct SecretPicker {
    words: Vec<Word>,
    next: usize,
}

impl SecretPicker {
    /// Every game uses `secret`.
    pub fn fixed(secret: Word) -> Self {
        Self {
            words: vec![secret],
            next: 0,
        }
    }

    /// Starts at the word for `date` and walks forward on each new game.
    /// Returns `None` for an empty word bank.
    pub fn daily(words: Vec<Word>, date: NaiveDate) -> Option<Self> {
        if words.is_empty() {
            return None;
        }
        let next = day_number(date) % words.len();
        Some(Self { words, next })
    }

    pub fn today(words: Vec<Word>) -> Option<Self> {
        Self::daily(words, Local::now().date_naive())
    }

    pub fn next_secret(&mut self) -> Word {
        let word = self.words[self.next];
        self.next = (self.next + 1) % self.words.len();
        word
    }
}
