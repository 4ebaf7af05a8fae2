use crate::data::{AnswerId, Vocabulary, Word, NUM_LETTERS, WORD_LENGTH};
use crate::hint::Hint;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// An immutable group of candidate answers with aggregate letter statistics.
///
/// The root pool holds every possible answer; child pools are only ever
/// produced by [`AnswerPool::partition`] or [`AnswerPool::filtered`]. Members
/// are handles into the one canonical answer table, and the frequency vector
/// is always the elementwise sum of the members' letter counts.
#[derive(Debug, Clone)]
pub struct AnswerPool {
    table: Arc<[Word]>,
    members: Vec<AnswerId>,
    char_freqs: [u32; NUM_LETTERS],
}

impl AnswerPool {
    /// Builds the root pool over the vocabulary's full answer list.
    pub fn root(vocabulary: &Vocabulary) -> AnswerPool {
        let table = vocabulary.answer_table();
        let members = (0..table.len()).map(AnswerId::new).collect();
        AnswerPool::with_members(table, members)
    }

    fn with_members(table: Arc<[Word]>, members: Vec<AnswerId>) -> AnswerPool {
        let mut char_freqs = [0u32; NUM_LETTERS];
        for id in &members {
            for (letter, count) in table[id.index()].letter_counts() {
                char_freqs[(letter - b'a') as usize] += count as u32;
            }
        }
        AnswerPool {
            table,
            members,
            char_freqs,
        }
    }

    /// The number of answers in this pool.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` iff the pool has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The member handles, in table order for the root pool and in parent
    /// order for child pools.
    pub fn members(&self) -> &[AnswerId] {
        &self.members
    }

    /// Resolves a member handle to its word.
    pub fn answer(&self, id: AnswerId) -> &Word {
        &self.table[id.index()]
    }

    /// The member words.
    pub fn answers(&self) -> impl Iterator<Item = &Word> {
        self.members.iter().map(|id| &self.table[id.index()])
    }

    /// Total occurrences of the given letter across all members.
    pub fn char_frequency(&self, letter: u8) -> u32 {
        self.char_freqs[(letter - b'a') as usize]
    }

    /// The number of distinct hints the guess produces across this pool: how
    /// finely one turn of this guess divides the remaining answers.
    pub fn divisiveness(&self, guess: &Word) -> usize {
        let mut hints = HashSet::new();
        for answer in self.answers() {
            hints.insert(Hint::from_pair(guess, answer));
        }
        hints.len()
    }

    /// Sums the pool-wide frequency of each guess letter, weighted by how
    /// often the guess repeats it.
    pub fn char_frequency_score(&self, guess: &Word) -> u32 {
        guess
            .letter_counts()
            .map(|(letter, count)| self.char_frequency(letter) * count as u32)
            .sum()
    }

    /// Sums the pool-wide frequency of each distinct guess letter, so guesses
    /// that repeat a common letter score no extra.
    pub fn char_set_frequency_score(&self, guess: &Word) -> u32 {
        guess
            .letter_counts()
            .map(|(letter, _)| self.char_frequency(letter))
            .sum()
    }

    /// Returns `true` iff the guess shares no letters with any member: a turn
    /// spent on it reveals nothing.
    pub fn is_useless(&self, guess: &Word) -> bool {
        self.char_frequency_score(guess) == 0
    }

    /// Scores the guess 2 points per member letter matched in place and 1
    /// point per member letter matched out of place.
    pub fn positional_score(&self, guess: &Word) -> u32 {
        let mut score = 0;
        for answer in self.answers() {
            for position in 0..WORD_LENGTH {
                let letter = guess.letter(position);
                if letter == answer.letter(position) {
                    score += 1;
                }
                if answer.contains(letter) {
                    score += 1;
                }
            }
        }
        score
    }

    /// The number of members the given hint rules out.
    pub fn num_eliminated_by(&self, hint: &Hint) -> u64 {
        self.answers()
            .filter(|answer| !hint.is_satisfied_by(answer))
            .count() as u64
    }

    /// Sums, over every member, how many other members the merged hint of the
    /// given guesses against that member would rule out.
    ///
    /// Distinct hints are far fewer than members, so eliminations are cached
    /// per hint value; the cache changes the cost, never the result.
    pub fn total_eliminations(&self, guesses: &[&Word]) -> u64 {
        let mut eliminations_by_hint: HashMap<Hint, u64> = HashMap::new();
        let mut total = 0;
        for answer in self.answers() {
            let mut merged = Hint::new();
            for guess in guesses {
                merged.merge(&Hint::from_pair(guess, answer));
            }
            total += *eliminations_by_hint
                .entry(merged)
                .or_insert_with_key(|hint| self.num_eliminated_by(hint));
        }
        total
    }

    /// The members that satisfy the given hint, as a child pool.
    pub fn filtered(&self, hint: &Hint) -> AnswerPool {
        let members = self
            .members
            .iter()
            .copied()
            .filter(|id| hint.is_satisfied_by(&self.table[id.index()]))
            .collect();
        AnswerPool::with_members(Arc::clone(&self.table), members)
    }

    /// Splits the pool into one child per distinct hint the guess produces,
    /// discarding the hints themselves: one level of the decision tree the
    /// guess induces.
    pub fn partition(&self, guess: &Word) -> Vec<AnswerPool> {
        let mut groups: HashMap<Hint, Vec<AnswerId>> = HashMap::new();
        for &id in &self.members {
            let hint = Hint::from_pair(guess, &self.table[id.index()]);
            groups.entry(hint).or_default().push(id);
        }
        groups
            .into_values()
            .map(|members| AnswerPool::with_members(Arc::clone(&self.table), members))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(answers: &[&str]) -> AnswerPool {
        let vocabulary = Vocabulary::from_iterators(answers.iter(), answers.iter()).unwrap();
        AnswerPool::root(&vocabulary)
    }

    fn word(text: &str) -> Word {
        Word::new(text).unwrap()
    }

    #[test]
    fn frequency_vector_sums_members() {
        let pool = pool(&["hello", "halls"]);

        assert_eq!(pool.char_frequency(b'h'), 2);
        assert_eq!(pool.char_frequency(b'l'), 4);
        assert_eq!(pool.char_frequency(b'o'), 1);
        assert_eq!(pool.char_frequency(b'z'), 0);
    }

    #[test]
    fn frequency_scores_weight_repeats_differently() {
        let pool = pool(&["hello", "halls"]);

        // 'l' counts three times in the guess for the plain score, once for
        // the set score.
        assert_eq!(pool.char_frequency_score(&word("lolls")), 4 * 3 + 1 + 1);
        assert_eq!(pool.char_set_frequency_score(&word("lolls")), 4 + 1 + 1);
    }

    #[test]
    fn useless_guess_shares_no_letters() {
        let pool = pool(&["hello", "halls"]);

        assert!(pool.is_useless(&word("minty")));
        assert!(!pool.is_useless(&word("lofty")));
    }

    #[test]
    fn positional_score_rewards_placement() {
        let pool = pool(&["hello", "halls"]);

        // "hello" against itself: 5 in place + 5 present = 10; against
        // "halls": 3 in place ('h' and both 'l's) + those 3 present = 6.
        assert_eq!(pool.positional_score(&word("hello")), 10 + 6);
    }

    #[test]
    fn filtered_keeps_compliant_members() {
        let pool = pool(&["hello", "halls", "dolly"]);
        let hint = Hint::from_pair(&word("hired"), &word("hello"));

        let child = pool.filtered(&hint);

        assert_eq!(
            child.answers().map(Word::as_str).collect::<Vec<_>>(),
            vec!["hello"]
        );
    }

    #[test]
    fn eliminations_count_noncompliant_members() {
        let pool = pool(&["hello", "halls", "dolly"]);
        let hint = Hint::from_pair(&word("hired"), &word("hello"));

        assert_eq!(pool.num_eliminated_by(&hint), 2);
    }
}
