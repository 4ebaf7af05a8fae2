use crate::data::{Word, WORD_LENGTH};
use std::fmt;
use std::io;

/// The feedback for a single letter of a guess.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LetterResult {
    /// The letter is in the answer, at this position.
    Correct,
    /// The letter is in the answer, but not at this position.
    PresentNotHere,
    /// The letter is not in the answer.
    NotPresent,
}

impl LetterResult {
    /// The colored square used to display this result.
    pub fn symbol(&self) -> char {
        match self {
            LetterResult::Correct => '🟩',
            LetterResult::PresentNotHere => '🟨',
            LetterResult::NotPresent => '⬛',
        }
    }

    /// The digit used in the numeric form of a hint sequence.
    pub fn digit(&self) -> char {
        match self {
            LetterResult::NotPresent => '1',
            LetterResult::PresentNotHere => '2',
            LetterResult::Correct => '3',
        }
    }

    fn from_digit(digit: char) -> Option<LetterResult> {
        match digit {
            '1' => Some(LetterResult::NotPresent),
            '2' => Some(LetterResult::PresentNotHere),
            '3' => Some(LetterResult::Correct),
            _ => None,
        }
    }
}

/// Indicates that an error occurred while loading words or interpreting input.
#[derive(Debug)]
pub enum WordleError {
    /// A vocabulary entry was not a 5-letter lowercase word.
    InvalidWord(String),
    /// A loaded vocabulary list did not have the expected number of words.
    VocabularyCountMismatch {
        list: &'static str,
        expected: usize,
        actual: usize,
    },
    /// A user-supplied hint string had the wrong length or an out-of-range digit.
    InvalidHintSequence(String),
    /// A query violated a precondition, e.g. undoing a game with no history.
    IllegalQuery(&'static str),
    /// An I/O error occurred while reading a vocabulary list.
    Io(io::Error),
}

impl fmt::Display for WordleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WordleError::InvalidWord(word) => {
                write!(f, "invalid word {:?}: must be 5 lowercase letters", word)
            }
            WordleError::VocabularyCountMismatch {
                list,
                expected,
                actual,
            } => write!(f, "expected {} {}, found {}", expected, list, actual),
            WordleError::InvalidHintSequence(input) => write!(
                f,
                "invalid hint sequence {:?}: must be 5 digits, each 1 (absent), 2 (present), or 3 (correct)",
                input
            ),
            WordleError::IllegalQuery(message) => write!(f, "illegal query: {}", message),
            WordleError::Io(error) => write!(f, "{}", error),
        }
    }
}

impl std::error::Error for WordleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WordleError::Io(error) => Some(error),
            _ => None,
        }
    }
}

impl From<io::Error> for WordleError {
    fn from(error: io::Error) -> WordleError {
        WordleError::Io(error)
    }
}

/// The 5-symbol feedback a guess earns against an answer, in guess order.
///
/// This is the human-facing form of a turn's feedback: it can be derived from
/// a guess/answer pair, parsed from a 5-digit string, and displayed as colored
/// squares. The constraint form used for filtering and caching is
/// [`Hint`](crate::Hint).
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HintSequence {
    letters: [LetterResult; WORD_LENGTH],
}

impl HintSequence {
    /// Determines the feedback the given guess earns against the given answer.
    ///
    /// Matches are capped by the answer's remaining letter count: correct
    /// positions consume their letter first, then each remaining guess letter
    /// claims at most one unconsumed occurrence, scanning left to right.
    pub fn from_pair(guess: &Word, answer: &Word) -> HintSequence {
        let mut letters = [LetterResult::NotPresent; WORD_LENGTH];
        let mut unclaimed = [0u8; 26];
        for position in 0..WORD_LENGTH {
            if guess.letter(position) == answer.letter(position) {
                letters[position] = LetterResult::Correct;
            } else {
                unclaimed[(answer.letter(position) - b'a') as usize] += 1;
            }
        }
        for (position, result) in letters.iter_mut().enumerate() {
            if *result == LetterResult::Correct {
                continue;
            }
            let remaining = &mut unclaimed[(guess.letter(position) - b'a') as usize];
            if *remaining > 0 {
                *remaining -= 1;
                *result = LetterResult::PresentNotHere;
            }
        }
        HintSequence { letters }
    }

    /// Parses a hint sequence from its 5-digit numeric form, where `1` is
    /// absent, `2` is present elsewhere, and `3` is correct.
    pub fn from_digits(digits: &str) -> Result<HintSequence, WordleError> {
        let mut letters = [LetterResult::NotPresent; WORD_LENGTH];
        let mut count = 0;
        for (index, digit) in digits.chars().enumerate() {
            if index >= WORD_LENGTH {
                return Err(WordleError::InvalidHintSequence(digits.to_string()));
            }
            letters[index] = LetterResult::from_digit(digit)
                .ok_or_else(|| WordleError::InvalidHintSequence(digits.to_string()))?;
            count += 1;
        }
        if count != WORD_LENGTH {
            return Err(WordleError::InvalidHintSequence(digits.to_string()));
        }
        Ok(HintSequence { letters })
    }

    /// Constructs a sequence directly from per-letter results.
    pub fn from_letters(letters: [LetterResult; WORD_LENGTH]) -> HintSequence {
        HintSequence { letters }
    }

    /// The per-letter results in guess order.
    pub fn letters(&self) -> &[LetterResult; WORD_LENGTH] {
        &self.letters
    }

    /// Returns the numeric form of this sequence, e.g. `"31211"`.
    pub fn digits(&self) -> String {
        self.letters.iter().map(LetterResult::digit).collect()
    }

    /// Returns `true` iff every letter is correct.
    pub fn is_all_correct(&self) -> bool {
        self.letters
            .iter()
            .all(|letter| *letter == LetterResult::Correct)
    }
}

impl fmt::Display for HintSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for letter in &self.letters {
            write!(f, "{}", letter.symbol())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str) -> Word {
        Word::new(text).unwrap()
    }

    #[test]
    fn sequence_all_correct() {
        let sequence = HintSequence::from_pair(&word("crane"), &word("crane"));

        assert!(sequence.is_all_correct());
        assert_eq!(sequence.digits(), "33333");
    }

    #[test]
    fn sequence_mixed() {
        let sequence = HintSequence::from_pair(&word("piano"), &word("amino"));

        assert_eq!(
            *sequence.letters(),
            [
                LetterResult::NotPresent,
                LetterResult::PresentNotHere,
                LetterResult::PresentNotHere,
                LetterResult::Correct,
                LetterResult::Correct,
            ]
        );
    }

    #[test]
    fn sequence_caps_repeated_guess_letters() {
        // One 'e' in the answer: the first unconsumed 'e' goes yellow, the
        // second goes gray.
        let sequence = HintSequence::from_pair(&word("speed"), &word("abide"));

        assert_eq!(
            *sequence.letters(),
            [
                LetterResult::NotPresent,
                LetterResult::NotPresent,
                LetterResult::PresentNotHere,
                LetterResult::NotPresent,
                LetterResult::PresentNotHere,
            ]
        );
    }

    #[test]
    fn sequence_correct_positions_claim_first() {
        // The green 'e' at position 4 claims one of the answer's two 'e's,
        // leaving only one for the unplaced 'e's at positions 1 and 3.
        let sequence = HintSequence::from_pair(&word("melee"), &word("eagle"));

        assert_eq!(
            *sequence.letters(),
            [
                LetterResult::NotPresent,
                LetterResult::PresentNotHere,
                LetterResult::PresentNotHere,
                LetterResult::NotPresent,
                LetterResult::Correct,
            ]
        );
    }

    #[test]
    fn sequence_digit_round_trip() {
        let sequence = HintSequence::from_digits("31211").unwrap();

        assert_eq!(sequence.digits(), "31211");
        assert_eq!(format!("{}", sequence), "🟩⬛🟨⬛⬛");
    }
}
