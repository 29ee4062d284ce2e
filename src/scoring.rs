use crate::word::{WORD_LENGTH, Word};

/// Per-letter result of scoring a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    Correct, // Green
    Present, // Yellow
    Absent,  // Gray
}

impl Classification {
    pub fn to_char(self) -> char {
        match self {
            Self::Correct => 'G',
            Self::Present => 'Y',
            Self::Absent => 'X',
        }
    }

    /// Higher rank wins when merging hints for the same letter.
    pub(crate) fn rank(self) -> u8 {
        match self {
            Self::Correct => 2,
            Self::Present => 1,
            Self::Absent => 0,
        }
    }
}

/// Score `guess` against `secret`.
///
/// Exact matches are resolved first and removed from the secret's letter
/// pool. The remaining positions are then checked left to right; each one
/// that finds its letter in the pool takes a single occurrence from it, so a
/// repeated guess letter is only credited as often as the secret has it.
#[must_use]
pub fn score_guess(guess: &Word, secret: &Word) -> [Classification; WORD_LENGTH] {
    let mut result = [Classification::Absent; WORD_LENGTH];
    let mut pool = [0u8; 26];

    // First pass: greens
    for i in 0..WORD_LENGTH {
        if guess.letter(i) == secret.letter(i) {
            result[i] = Classification::Correct;
        } else {
            pool[secret.slot(i)] += 1;
        }
    }

    // Second pass: yellows
    for i in 0..WORD_LENGTH {
        if result[i] == Classification::Correct {
            continue;
        }
        let remaining = &mut pool[guess.slot(i)];
        if *remaining > 0 {
            result[i] = Classification::Present;
            *remaining -= 1;
        }
    }
    result
}

/// Render classifications as a `G`/`Y`/`X` string.
pub fn pattern_string(classifications: &[Classification]) -> String {
    classifications.iter().map(|c| c.to_char()).collect()
}
