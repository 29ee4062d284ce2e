use std::fmt;

pub const WORD_LENGTH: usize = 5;

/// A five-letter word, always stored as uppercase ASCII.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Word([u8; WORD_LENGTH]);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordError {
    WrongLength(usize),
    NotAlphabetic(char),
}

impl fmt::Display for WordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongLength(len) => {
                write!(f, "word must be exactly {WORD_LENGTH} letters, got {len}")
            }
            Self::NotAlphabetic(c) => write!(f, "'{c}' is not a letter"),
        }
    }
}

impl std::error::Error for WordError {}

impl Word {
    /// Parse a word, accepting any letter case.
    pub fn new(s: &str) -> Result<Self, WordError> {
        let s = s.trim();
        let len = s.chars().count();
        if len != WORD_LENGTH {
            return Err(WordError::WrongLength(len));
        }
        let mut letters = [0u8; WORD_LENGTH];
        for (slot, c) in letters.iter_mut().zip(s.chars()) {
            if !c.is_ascii_alphabetic() {
                return Err(WordError::NotAlphabetic(c));
            }
            *slot = c.to_ascii_uppercase() as u8;
        }
        Ok(Self(letters))
    }

    pub fn from_letters(letters: [char; WORD_LENGTH]) -> Option<Self> {
        let mut bytes = [0u8; WORD_LENGTH];
        for (slot, c) in bytes.iter_mut().zip(letters) {
            if !c.is_ascii_alphabetic() {
                return None;
            }
            *slot = c.to_ascii_uppercase() as u8;
        }
        Some(Self(bytes))
    }

    pub fn letter(&self, index: usize) -> char {
        self.0[index] as char
    }

    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().map(|&b| b as char)
    }

    /// Alphabet index (0 for 'A') of the letter at `index`.
    pub(crate) fn slot(&self, index: usize) -> usize {
        (self.0[index] - b'A') as usize
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.letters() {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Word {
    type Err = WordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uppercases() {
        let word = Word::new("crane").unwrap();
        assert_eq!(word.to_string(), "CRANE");
        assert_eq!(word.letter(0), 'C');
    }

    #[test]
    fn test_new_trims_whitespace() {
        assert_eq!(Word::new("  slate \n").unwrap().to_string(), "SLATE");
    }

    #[test]
    fn test_new_rejects_wrong_length() {
        assert_eq!(Word::new("CRAN"), Err(WordError::WrongLength(4)));
        assert_eq!(Word::new("CRANES"), Err(WordError::WrongLength(6)));
        assert_eq!(Word::new(""), Err(WordError::WrongLength(0)));
    }

    #[test]
    fn test_new_rejects_non_letters() {
        assert_eq!(Word::new("CR4NE"), Err(WordError::NotAlphabetic('4')));
        assert_eq!(Word::new("CR NE"), Err(WordError::NotAlphabetic(' ')));
    }

    #[test]
    fn test_from_letters() {
        let word = Word::from_letters(['w', 'o', 'r', 'd', 's']).unwrap();
        assert_eq!(word.to_string(), "WORDS");
        assert!(Word::from_letters(['W', 'O', 'R', 'D', ' ']).is_none());
    }

    #[test]
    fn test_slot() {
        let word = Word::new("AZBYC").unwrap();
        assert_eq!(word.slot(0), 0);
        assert_eq!(word.slot(1), 25);
    }
}
