use crate::data::{Word, NUM_LETTERS, WORD_LENGTH};

const ALL_POSITIONS: u8 = (1 << WORD_LENGTH) - 1;

/// The consolidated constraint for a letter that appears more than once in a
/// generating guess and is present in the answer.
///
/// Flat per-position bookkeeping cannot express what such a guess reveals:
/// the feedback bounds how many times the letter occurs. `min_count` is that
/// bound; it is exact (rather than a lower bound) iff at least one occurrence
/// of the letter in the guess was graded absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RepeatedLetter {
    letter: u8,
    fixed_mask: u8,
    excluded_mask: u8,
    min_count: u8,
    exact: bool,
}

impl RepeatedLetter {
    /// The letter this record constrains, as a byte.
    pub fn letter(&self) -> u8 {
        self.letter
    }

    /// Bitmask of positions that must hold the letter.
    pub fn fixed_positions(&self) -> u8 {
        self.fixed_mask
    }

    /// Bitmask of positions that must not hold the letter.
    pub fn excluded_positions(&self) -> u8 {
        self.excluded_mask
    }

    /// The minimum number of occurrences in the answer.
    pub fn min_count(&self) -> u8 {
        self.min_count
    }

    /// Whether `min_count` is the exact occurrence count.
    pub fn is_exact(&self) -> bool {
        self.exact
    }

    fn is_satisfied_by(&self, word: &Word) -> bool {
        for position in 0..WORD_LENGTH {
            if self.fixed_mask & (1 << position) != 0 && word.letter(position) != self.letter {
                return false;
            }
        }
        // Count occurrences at positions neither fixed nor excluded; the
        // fixed positions already account for the rest of the requirement.
        let mut found = 0u8;
        for position in 0..WORD_LENGTH {
            let bit = 1 << position;
            if (self.fixed_mask | self.excluded_mask) & bit != 0 {
                continue;
            }
            if word.letter(position) == self.letter {
                found += 1;
            }
        }
        let owed = self
            .min_count
            .saturating_sub(self.fixed_mask.count_ones() as u8);
        if self.exact {
            found == owed
        } else {
            found >= owed
        }
    }

    fn merge(&mut self, other: &RepeatedLetter) {
        self.fixed_mask |= other.fixed_mask;
        self.excluded_mask |= other.excluded_mask;
        self.min_count = self.min_count.max(other.min_count);
        self.exact |= other.exact;
        self.normalize();
    }

    /// Keeps the count consistent with the position masks, and pins the last
    /// open position when every other position is ruled out while an
    /// occurrence is still owed.
    fn normalize(&mut self) {
        self.min_count = self.min_count.max(self.fixed_mask.count_ones() as u8);
        let covered = self.fixed_mask | self.excluded_mask;
        if covered.count_ones() as usize == WORD_LENGTH - 1
            && self.min_count > self.fixed_mask.count_ones() as u8
        {
            self.fixed_mask |= ALL_POSITIONS & !covered;
            self.min_count = self.min_count.max(self.fixed_mask.count_ones() as u8);
        }
    }
}

/// Everything one or more guesses reveal about a single answer.
///
/// A hint classifies letters as fixed to a position (green), present but
/// excluded from specific positions (yellow), or absent (gray), with
/// [`RepeatedLetter`] records taking over both roles for letters the
/// generating guess repeats. Hints from successive guesses against the same
/// answer can be merged, and two guesses produce equal hints exactly when
/// they reveal the same information, which is what makes hints usable as
/// cache and partition keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Hint {
    fixed: [Option<u8>; WORD_LENGTH],
    excluded: [u8; NUM_LETTERS],
    absent: u32,
    repeats: Vec<RepeatedLetter>,
}

impl Hint {
    /// Creates a hint with no information.
    pub fn new() -> Hint {
        Hint::default()
    }

    /// Derives the constraint the given guess earns against the given answer.
    ///
    /// Matching runs in three passes: exact positions first, then each
    /// remaining guess letter claims at most one unconsumed occurrence in the
    /// answer (scanning positions in ascending order), then everything still
    /// unclaimed is graded absent. Letters the guess repeats are consolidated
    /// into [`RepeatedLetter`] records afterwards.
    pub fn from_pair(guess: &Word, answer: &Word) -> Hint {
        let mut hint = Hint::new();
        let mut claimed = [false; WORD_LENGTH];
        let mut unclaimed = [0u8; NUM_LETTERS];
        for position in 0..WORD_LENGTH {
            let letter = guess.letter(position);
            if letter == answer.letter(position) {
                hint.fixed[position] = Some(letter);
                claimed[position] = true;
            } else {
                unclaimed[(answer.letter(position) - b'a') as usize] += 1;
            }
        }
        for position in 0..WORD_LENGTH {
            if claimed[position] {
                continue;
            }
            let letter = guess.letter(position);
            let remaining = &mut unclaimed[(letter - b'a') as usize];
            if *remaining > 0 {
                *remaining -= 1;
                hint.excluded[(letter - b'a') as usize] |= 1 << position;
                claimed[position] = true;
            }
        }
        for position in 0..WORD_LENGTH {
            if !claimed[position] {
                hint.absent |= 1 << (guess.letter(position) - b'a');
            }
        }
        hint.consolidate_repeats(guess);
        hint
    }

    /// Moves every letter the guess repeats out of the flat maps and into a
    /// dedicated record, capturing the occurrence bound the flat maps lose.
    fn consolidate_repeats(&mut self, guess: &Word) {
        for (letter, count) in guess.letter_counts() {
            if count < 2 {
                continue;
            }
            let index = (letter - b'a') as usize;
            let mut fixed_mask = 0u8;
            for position in 0..WORD_LENGTH {
                if self.fixed[position] == Some(letter) {
                    fixed_mask |= 1 << position;
                }
            }
            let excluded_mask = self.excluded[index];
            if fixed_mask == 0 && excluded_mask == 0 {
                // Not in the answer at all: plain absence already covers it.
                continue;
            }
            for position in 0..WORD_LENGTH {
                if self.fixed[position] == Some(letter) {
                    self.fixed[position] = None;
                }
            }
            self.excluded[index] = 0;
            let exact = self.absent & (1 << index) != 0;
            self.absent &= !(1 << index);
            self.insert_repeat(RepeatedLetter {
                letter,
                fixed_mask,
                excluded_mask,
                min_count: fixed_mask.count_ones() as u8 + excluded_mask.count_ones() as u8,
                exact,
            });
        }
    }

    /// Returns `true` iff the given word satisfies everything this hint has
    /// established.
    pub fn is_satisfied_by(&self, word: &Word) -> bool {
        for (position, required) in self.fixed.iter().enumerate() {
            if let Some(letter) = required {
                if word.letter(position) != *letter {
                    return false;
                }
            }
        }
        for (index, excluded_mask) in self.excluded.iter().enumerate() {
            if *excluded_mask == 0 {
                continue;
            }
            let letter = b'a' + index as u8;
            let found = (0..WORD_LENGTH).any(|position| {
                word.letter(position) == letter && excluded_mask & (1 << position) == 0
            });
            if !found {
                return false;
            }
        }
        if word.mask() & self.absent != 0 {
            return false;
        }
        self.repeats.iter().all(|repeat| repeat.is_satisfied_by(word))
    }

    /// Adds everything the other hint has established to this one.
    ///
    /// Merging assumes both hints were derived against the same answer; it
    /// never fails. A letter excluded from all but one position is promoted
    /// to fixed at the remaining position, and repeated-letter records absorb
    /// any flat classification of their letter from either side.
    pub fn merge(&mut self, other: &Hint) {
        for position in 0..WORD_LENGTH {
            if let Some(letter) = other.fixed[position] {
                match self.repeat_index(letter) {
                    Some(index) => {
                        let repeat = &mut self.repeats[index];
                        repeat.fixed_mask |= 1 << position;
                        repeat.normalize();
                    }
                    None => self.fixed[position] = Some(letter),
                }
            }
        }
        for index in 0..NUM_LETTERS {
            let mask = other.excluded[index];
            if mask == 0 {
                continue;
            }
            match self.repeat_index(b'a' + index as u8) {
                Some(repeat_index) => {
                    let repeat = &mut self.repeats[repeat_index];
                    repeat.excluded_mask |= mask;
                    repeat.normalize();
                }
                None => self.excluded[index] |= mask,
            }
        }
        self.absent |= other.absent;
        for repeat in &other.repeats {
            self.absorb_repeat(repeat);
        }
        self.promote_excluded();
    }

    /// Merges an incoming repeated-letter record, folding in whatever flat
    /// state this hint holds for the same letter. Records take precedence
    /// over the flat maps.
    fn absorb_repeat(&mut self, incoming: &RepeatedLetter) {
        if let Some(index) = self.repeat_index(incoming.letter) {
            self.repeats[index].merge(incoming);
            return;
        }
        let mut merged = *incoming;
        let index = (merged.letter - b'a') as usize;
        for position in 0..WORD_LENGTH {
            if self.fixed[position] == Some(merged.letter) {
                merged.fixed_mask |= 1 << position;
                self.fixed[position] = None;
            }
        }
        merged.excluded_mask |= self.excluded[index];
        self.excluded[index] = 0;
        self.absent &= !(1 << index);
        merged.normalize();
        self.insert_repeat(merged);
    }

    /// Promotes flat yellow letters with four excluded positions to green at
    /// the one remaining position, keeping merged multi-turn hints maximally
    /// specific.
    fn promote_excluded(&mut self) {
        for index in 0..NUM_LETTERS {
            if self.excluded[index].count_ones() as usize == WORD_LENGTH - 1 {
                let position = (ALL_POSITIONS & !self.excluded[index]).trailing_zeros() as usize;
                self.fixed[position] = Some(b'a' + index as u8);
                self.excluded[index] = 0;
            }
        }
    }

    fn repeat_index(&self, letter: u8) -> Option<usize> {
        self.repeats.iter().position(|repeat| repeat.letter == letter)
    }

    // Records stay sorted by letter so equal hints hash equally regardless of
    // how they were built.
    fn insert_repeat(&mut self, repeat: RepeatedLetter) {
        let position = self
            .repeats
            .partition_point(|existing| existing.letter < repeat.letter);
        self.repeats.insert(position, repeat);
    }

    /// The letter fixed at the given position, if known. Letters governed by
    /// a repeated-letter record are reported through [`Hint::repeat`].
    pub fn fixed_at(&self, position: usize) -> Option<u8> {
        self.fixed[position]
    }

    /// Bitmask of positions the given letter is excluded from, if the letter
    /// is tracked as present.
    pub fn excluded_positions(&self, letter: u8) -> u8 {
        self.excluded[(letter - b'a') as usize]
    }

    /// Returns `true` iff the given letter is known absent from the answer.
    pub fn is_absent(&self, letter: u8) -> bool {
        self.absent & (1 << (letter - b'a')) != 0
    }

    /// The consolidated record for the given letter, if one exists.
    pub fn repeat(&self, letter: u8) -> Option<&RepeatedLetter> {
        self.repeats.iter().find(|repeat| repeat.letter == letter)
    }
}
