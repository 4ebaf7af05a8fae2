use crate::data::Word;
use crate::hint::Hint;
use crate::results::{HintSequence, WordleError};
use std::fmt;

/// Maximum number of guesses in a game.
pub const MAX_GUESSES: usize = 6;

/// Whether a game is still being played, or how it ended.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum GameState {
    InProgress,
    Won,
    Lost,
}

/// A recorded game: one answer, up to six guesses, and everything the guesses
/// have revealed so far.
///
/// Each turn keeps both forms of its feedback: the displayable
/// [`HintSequence`] and the [`Hint`] constraint, with the constraints
/// additionally merged into one accumulated hint so compliance queries see
/// every turn at once.
pub struct Game {
    answer: Word,
    guesses: Vec<Word>,
    hints: Vec<Hint>,
    sequences: Vec<HintSequence>,
    merged: Hint,
}

impl Game {
    pub fn new(answer: Word) -> Game {
        Game {
            answer,
            guesses: Vec::new(),
            hints: Vec::new(),
            sequences: Vec::new(),
            merged: Hint::new(),
        }
    }

    /// Plays a guess and returns its feedback.
    ///
    /// Fails with [`WordleError::IllegalQuery`] if the game is already won or
    /// lost.
    pub fn guess(&mut self, guess: Word) -> Result<HintSequence, WordleError> {
        if self.state() != GameState::InProgress {
            return Err(WordleError::IllegalQuery(
                "can't guess because the game is over",
            ));
        }
        let hint = Hint::from_pair(&guess, &self.answer);
        let sequence = HintSequence::from_pair(&guess, &self.answer);
        self.merged.merge(&hint);
        self.hints.push(hint);
        self.sequences.push(sequence);
        self.guesses.push(guess);
        Ok(sequence)
    }

    pub fn num_guesses(&self) -> usize {
        self.guesses.len()
    }

    pub fn state(&self) -> GameState {
        match self.guesses.last() {
            None => GameState::InProgress,
            Some(last) if last == &self.answer => GameState::Won,
            Some(_) if self.guesses.len() == MAX_GUESSES => GameState::Lost,
            Some(_) => GameState::InProgress,
        }
    }

    /// Returns whether the word satisfies everything guessed so far.
    ///
    /// Fails with [`WordleError::IllegalQuery`] if no guesses have been made:
    /// there is nothing to comply with.
    pub fn is_compliant(&self, word: &Word) -> Result<bool, WordleError> {
        if self.guesses.is_empty() {
            return Err(WordleError::IllegalQuery(
                "can't determine compliance because no guesses have been made",
            ));
        }
        Ok(self.merged.is_satisfied_by(word))
    }

    /// Removes the last guess and rebuilds the accumulated constraint from
    /// the turns that remain.
    ///
    /// Fails with [`WordleError::IllegalQuery`] if there is nothing to undo.
    pub fn undo(&mut self) -> Result<(), WordleError> {
        if self.guesses.is_empty() {
            return Err(WordleError::IllegalQuery("there is nothing to undo"));
        }
        self.guesses.pop();
        self.hints.pop();
        self.sequences.pop();
        self.merged = Hint::new();
        for hint in &self.hints {
            self.merged.merge(hint);
        }
        Ok(())
    }

    /// The turns played so far, oldest first.
    pub fn history(&self) -> impl Iterator<Item = (&Word, &HintSequence)> {
        self.guesses.iter().zip(self.sequences.iter())
    }

    /// The accumulated constraint of every turn so far.
    pub fn accumulated_hint(&self) -> &Hint {
        &self.merged
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Answer: {}", self.answer)?;
        for (guess, sequence) in self.history() {
            writeln!(f, "{} -> {}", guess, sequence)?;
        }
        Ok(())
    }
}
