use crate::scoring::Classification;
use crate::word::{WORD_LENGTH, Word};

pub const MAX_GUESSES: usize = 6;

/// One tile of the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cell {
    pub letter: Option<char>,
    pub classification: Option<Classification>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: [Cell; WORD_LENGTH],
}

impl Row {
    pub fn cells(&self) -> &[Cell; WORD_LENGTH] {
        &self.cells
    }

    pub fn cell(&self, column: usize) -> &Cell {
        &self.cells[column]
    }

    pub fn is_scored(&self) -> bool {
        self.cells.iter().all(|c| c.classification.is_some())
    }

    pub(crate) fn set_letter(&mut self, column: usize, letter: char) {
        self.cells[column].letter = Some(letter);
    }

    pub(crate) fn clear_letter(&mut self, column: usize) {
        self.cells[column].letter = None;
    }

    /// Record the scoring result. Rows are scored once.
    pub(crate) fn apply(&mut self, classifications: &[Classification; WORD_LENGTH]) {
        debug_assert!(!self.is_scored(), "row scored twice");
        for (cell, &classification) in self.cells.iter_mut().zip(classifications) {
            cell.classification = Some(classification);
        }
    }

    /// The row as a `Word`, if every cell holds a letter.
    pub fn to_word(&self) -> Option<Word> {
        let mut letters = [' '; WORD_LENGTH];
        for (slot, cell) in letters.iter_mut().zip(&self.cells) {
            *slot = cell.letter?;
        }
        Word::from_letters(letters)
    }
}

/// Letters typed into `row` so far, in order.
pub fn current_word(row: &Row) -> String {
    row.cells.iter().filter_map(|c| c.letter).collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    rows: [Row; MAX_GUESSES],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[Row; MAX_GUESSES] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> &Row {
        &self.rows[index]
    }

    pub(crate) fn row_mut(&mut self, index: usize) -> &mut Row {
        &mut self.rows[index]
    }
}
