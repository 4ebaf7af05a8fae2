use crate::results::WordleError;
use std::fmt;
use std::io::BufRead;
use std::sync::Arc;

/// Number of letters in every word.
pub const WORD_LENGTH: usize = 5;
/// Number of letters in the supported alphabet (`a`-`z`).
pub const NUM_LETTERS: usize = 26;
/// Size of the published legal-guess list.
pub const NUM_GUESSES: usize = 12972;
/// Size of the published answer list.
pub const NUM_ANSWERS: usize = 2315;

/// A validated 5-letter lowercase word.
///
/// Construction caches the data the scoring and constraint code keeps asking
/// for: per-letter occurrence counts, a 26-bit presence vector, and whether
/// any letter repeats.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Word {
    text: Box<str>,
    letters: [u8; WORD_LENGTH],
    counts: [u8; NUM_LETTERS],
    mask: u32,
    has_repeat: bool,
}

impl Word {
    /// Validates and constructs a word.
    ///
    /// Fails with [`WordleError::InvalidWord`] if the text is not exactly 5
    /// characters or contains anything outside `a`-`z`.
    pub fn new(text: &str) -> Result<Word, WordleError> {
        let bytes = text.as_bytes();
        if bytes.len() != WORD_LENGTH || !bytes.iter().all(u8::is_ascii_lowercase) {
            return Err(WordleError::InvalidWord(text.to_string()));
        }
        let mut letters = [0u8; WORD_LENGTH];
        letters.copy_from_slice(bytes);
        let mut counts = [0u8; NUM_LETTERS];
        let mut mask = 0u32;
        let mut has_repeat = false;
        for &letter in &letters {
            let index = (letter - b'a') as usize;
            counts[index] += 1;
            if counts[index] > 1 {
                has_repeat = true;
            }
            mask |= 1 << index;
        }
        Ok(Word {
            text: text.into(),
            letters,
            counts,
            mask,
            has_repeat,
        })
    }

    /// The word's text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The letter at the given position (0-4), as a byte.
    pub fn letter(&self, position: usize) -> u8 {
        self.letters[position]
    }

    /// The number of times the given letter occurs in this word.
    pub fn count(&self, letter: u8) -> u8 {
        self.counts[(letter - b'a') as usize]
    }

    /// Returns `true` iff the given letter occurs in this word.
    pub fn contains(&self, letter: u8) -> bool {
        self.mask & (1 << (letter - b'a')) != 0
    }

    /// The distinct letters of this word with their occurrence counts.
    pub fn letter_counts(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .map(|(index, count)| (b'a' + index as u8, *count))
    }

    /// The 26-bit presence vector of this word's letters.
    pub fn mask(&self) -> u32 {
        self.mask
    }

    /// Returns `true` iff any letter occurs more than once.
    pub fn has_repeat(&self) -> bool {
        self.has_repeat
    }

    /// Returns `true` iff this word shares a letter with the given presence
    /// vector.
    pub fn overlaps(&self, mask: u32) -> bool {
        self.mask & mask != 0
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Index of an answer in the canonical answer table.
///
/// All pools reference answers through these handles, so equality and hashing
/// are equality of indices into the one table built at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnswerId(u16);

impl AnswerId {
    pub(crate) fn new(index: usize) -> AnswerId {
        AnswerId(index as u16)
    }

    /// The position of this answer in the canonical table.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The two fixed word lists the analysis runs over: legal guesses and
/// possible answers.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    guesses: Arc<[Word]>,
    answers: Arc<[Word]>,
}

impl Vocabulary {
    /// Reads both vocabularies, one word per line, skipping blank lines.
    ///
    /// Fails with [`WordleError::VocabularyCountMismatch`] if either list
    /// does not contain exactly the expected number of words, before any
    /// analysis can run against the wrong vocabulary.
    pub fn from_readers<G: BufRead, A: BufRead>(
        guess_reader: G,
        answer_reader: A,
        expected_guesses: usize,
        expected_answers: usize,
    ) -> Result<Vocabulary, WordleError> {
        Ok(Vocabulary {
            guesses: read_words(guess_reader, "guesses", expected_guesses)?.into(),
            answers: read_words(answer_reader, "answers", expected_answers)?.into(),
        })
    }

    /// Constructs a vocabulary from in-memory word lists.
    pub fn from_iterators<G, A, S, T>(guesses: G, answers: A) -> Result<Vocabulary, WordleError>
    where
        G: IntoIterator<Item = S>,
        A: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let guesses: Vec<Word> = guesses
            .into_iter()
            .map(|word| Word::new(word.as_ref()))
            .collect::<Result<_, _>>()?;
        let answers: Vec<Word> = answers
            .into_iter()
            .map(|word| Word::new(word.as_ref()))
            .collect::<Result<_, _>>()?;
        Ok(Vocabulary {
            guesses: guesses.into(),
            answers: answers.into(),
        })
    }

    /// The legal-guess list.
    pub fn guesses(&self) -> &[Word] {
        &self.guesses
    }

    /// The possible-answer list.
    pub fn answers(&self) -> &[Word] {
        &self.answers
    }

    /// A shared handle to the canonical answer table.
    pub fn answer_table(&self) -> Arc<[Word]> {
        Arc::clone(&self.answers)
    }

    /// Finds the index of the given guess word, if it is legal.
    pub fn guess_index(&self, word: &str) -> Option<usize> {
        self.guesses.iter().position(|guess| guess.as_str() == word)
    }

    /// Finds the handle of the given answer word, if it is a possible answer.
    pub fn answer_id(&self, word: &str) -> Option<AnswerId> {
        self.answers
            .iter()
            .position(|answer| answer.as_str() == word)
            .map(AnswerId::new)
    }
}

fn read_words<R: BufRead>(
    reader: R,
    list: &'static str,
    expected: usize,
) -> Result<Vec<Word>, WordleError> {
    let mut words = Vec::with_capacity(expected);
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if words.len() == expected {
            return Err(WordleError::VocabularyCountMismatch {
                list,
                expected,
                actual: expected + 1,
            });
        }
        words.push(Word::new(trimmed)?);
    }
    if words.len() != expected {
        return Err(WordleError::VocabularyCountMismatch {
            list,
            expected,
            actual: words.len(),
        });
    }
    Ok(words)
}
