use crate::data::{Vocabulary, Word};
use crate::game::MAX_GUESSES;
use crate::hint::Hint;
use crate::pool::AnswerPool;
use crate::results::{HintSequence, WordleError};
use rayon::prelude::*;
use std::collections::HashMap;
use std::fmt;

/// Brute-force opening search over a fixed vocabulary.
///
/// Rankings and combination scores are all computed against the root answer
/// pool. The combinatorial searches parallelize their outer loop; every task
/// builds its own hint cache, so nothing is shared or locked.
pub struct OpeningSearch {
    vocabulary: Vocabulary,
    root: AnswerPool,
}

impl OpeningSearch {
    pub fn new(vocabulary: Vocabulary) -> OpeningSearch {
        let root = AnswerPool::root(&vocabulary);
        OpeningSearch { vocabulary, root }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn root_pool(&self) -> &AnswerPool {
        &self.root
    }

    /// The top `n` repeat-free guesses by positional score against the full
    /// answer pool.
    pub fn rank_openers(&self, n: usize) -> Vec<&Word> {
        let mut scored: Vec<(usize, u32)> = self
            .vocabulary
            .guesses()
            .par_iter()
            .enumerate()
            .filter(|(_, guess)| !guess.has_repeat())
            .map(|(index, guess)| (index, self.root.positional_score(guess)))
            .collect();
        scored.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        scored
            .into_iter()
            .take(n)
            .map(|(index, _)| &self.vocabulary.guesses()[index])
            .collect()
    }

    /// The top `n` repeat-free guesses sharing no letter with the given
    /// previous guesses, by distinct-letter frequency. Useful for predicting
    /// a second or third opener once the first is settled.
    pub fn rank_next_openers(&self, n: usize, previous: &[&Word]) -> Vec<&Word> {
        let used = previous.iter().fold(0u32, |mask, guess| mask | guess.mask());
        let mut scored: Vec<(usize, u32)> = self
            .vocabulary
            .guesses()
            .iter()
            .enumerate()
            .filter(|(_, guess)| !guess.has_repeat() && !guess.overlaps(used))
            .map(|(index, guess)| (index, self.root.char_set_frequency_score(guess)))
            .collect();
        scored.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        scored
            .into_iter()
            .take(n)
            .map(|(index, _)| &self.vocabulary.guesses()[index])
            .collect()
    }

    /// Finds the letter-disjoint pair among the top `num_candidates` openers
    /// with the most total eliminations.
    pub fn best_pair(&self, num_candidates: usize) -> Option<ComboScore> {
        let candidates = self.rank_openers(num_candidates);
        (0..candidates.len())
            .into_par_iter()
            .map(|i| {
                let first = candidates[i];
                let mut best: Option<ComboScore> = None;
                for &second in &candidates[i + 1..] {
                    if second.overlaps(first.mask()) {
                        continue;
                    }
                    let eliminations = self.root.total_eliminations(&[first, second]);
                    best = pick_better(
                        best,
                        ComboScore::new(
                            vec![first.clone(), second.clone()],
                            eliminations,
                            self.root.len(),
                        ),
                    );
                }
                best
            })
            .reduce(|| None, merge_better)
    }

    /// Finds the letter-disjoint triple among the top `num_candidates`
    /// openers with the most total eliminations.
    pub fn best_triple(&self, num_candidates: usize) -> Option<ComboScore> {
        let candidates = self.rank_openers(num_candidates);
        (0..candidates.len())
            .into_par_iter()
            .map(|i| {
                let first = candidates[i];
                let mut best: Option<ComboScore> = None;
                for j in i + 1..candidates.len() {
                    let second = candidates[j];
                    if second.overlaps(first.mask()) {
                        continue;
                    }
                    let used = first.mask() | second.mask();
                    for &third in &candidates[j + 1..] {
                        if third.overlaps(used) {
                            continue;
                        }
                        let eliminations =
                            self.root.total_eliminations(&[first, second, third]);
                        best = pick_better(
                            best,
                            ComboScore::new(
                                vec![first.clone(), second.clone(), third.clone()],
                                eliminations,
                                self.root.len(),
                            ),
                        );
                    }
                }
                best
            })
            .reduce(|| None, merge_better)
    }

    /// Scores an arbitrary opening sequence against the root pool.
    pub fn opening_info(&self, words: &[&str]) -> Result<ComboScore, WordleError> {
        let guesses: Vec<Word> = words
            .iter()
            .map(|word| Word::new(word))
            .collect::<Result<_, _>>()?;
        let refs: Vec<&Word> = guesses.iter().collect();
        let eliminations = self.root.total_eliminations(&refs);
        Ok(ComboScore::new(guesses, eliminations, self.root.len()))
    }

    /// Builds the full second-guess book for a fixed first guess: one entry
    /// per distinct first-turn hint, holding the sub-pool of answers still
    /// possible and the vocabulary guess that eliminates the most of them.
    ///
    /// A singleton sub-pool's best second guess is trivially its member.
    /// Entries are sorted by descending sub-pool size.
    pub fn opening_book(&self, first_guess: &Word) -> Vec<Opening> {
        let answers = self.vocabulary.answers();
        let mut seen = vec![false; answers.len()];
        let mut openings = Vec::new();
        for (index, answer) in answers.iter().enumerate() {
            if seen[index] {
                continue;
            }
            let first_hint = Hint::from_pair(first_guess, answer);
            let sub_pool = self.root.filtered(&first_hint);
            for id in sub_pool.members() {
                seen[id.index()] = true;
            }
            let (second_guess, eliminations) = self.best_second_guess(&sub_pool);
            openings.push(Opening {
                first_hint: HintSequence::from_pair(first_guess, answer),
                second_guess,
                eliminations,
                root_size: self.root.len(),
                pool: sub_pool,
            });
        }
        openings.sort_by(|a, b| b.pool.len().cmp(&a.pool.len()));
        openings
    }

    fn best_second_guess(&self, sub_pool: &AnswerPool) -> (Word, u64) {
        if sub_pool.len() == 1 {
            return (sub_pool.answer(sub_pool.members()[0]).clone(), 0);
        }
        self.vocabulary
            .guesses()
            .par_iter()
            .map(|guess| (guess, sub_pool.total_eliminations(&[guess])))
            .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.as_str().cmp(a.0.as_str())))
            .map(|(guess, eliminations)| (guess.clone(), eliminations))
            .unwrap_or_else(|| (sub_pool.answer(sub_pool.members()[0]).clone(), 0))
    }
}

fn pick_better(best: Option<ComboScore>, candidate: ComboScore) -> Option<ComboScore> {
    match best {
        None => Some(candidate),
        Some(best) => Some(if candidate.outranks(&best) {
            candidate
        } else {
            best
        }),
    }
}

fn merge_better(a: Option<ComboScore>, b: Option<ComboScore>) -> Option<ComboScore> {
    match (a, b) {
        (Some(a), Some(b)) => Some(if b.outranks(&a) { b } else { a }),
        (a, None) => a,
        (None, b) => b,
    }
}

/// A guess combination with its total eliminations against a pool.
#[derive(Debug, Clone)]
pub struct ComboScore {
    guesses: Vec<Word>,
    eliminations: u64,
    average_remaining: f64,
}

impl ComboScore {
    fn new(guesses: Vec<Word>, eliminations: u64, pool_size: usize) -> ComboScore {
        let average_remaining = if pool_size == 0 {
            0.0
        } else {
            pool_size as f64 - eliminations as f64 / pool_size as f64
        };
        ComboScore {
            guesses,
            eliminations,
            average_remaining,
        }
    }

    pub fn guesses(&self) -> &[Word] {
        &self.guesses
    }

    pub fn eliminations(&self) -> u64 {
        self.eliminations
    }

    /// The average number of answers left after playing this combination.
    pub fn average_remaining(&self) -> f64 {
        self.average_remaining
    }

    // Ties break toward the lexicographically first combination so parallel
    // searches return the same result every run.
    fn outranks(&self, other: &ComboScore) -> bool {
        let words = |combo: &ComboScore| {
            combo
                .guesses
                .iter()
                .map(|guess| guess.as_str().to_string())
                .collect::<Vec<_>>()
        };
        self.eliminations > other.eliminations
            || (self.eliminations == other.eliminations && words(self) < words(other))
    }
}

impl fmt::Display for ComboScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let words: Vec<&str> = self.guesses.iter().map(Word::as_str).collect();
        write!(
            f,
            "The opening ({}) leaves an average of {:.2} words ({} eliminations)",
            words.join(", "),
            self.average_remaining,
            self.eliminations
        )
    }
}

/// One line of the opening book: a first-turn hint, the best second guess for
/// it, and the answers still possible.
#[derive(Debug, Clone)]
pub struct Opening {
    first_hint: HintSequence,
    second_guess: Word,
    eliminations: u64,
    root_size: usize,
    pool: AnswerPool,
}

impl Opening {
    pub fn first_hint(&self) -> &HintSequence {
        &self.first_hint
    }

    pub fn second_guess(&self) -> &Word {
        &self.second_guess
    }

    /// Total eliminations the second guess achieves over the sub-pool; zero
    /// for singleton sub-pools.
    pub fn second_guess_eliminations(&self) -> u64 {
        self.eliminations
    }

    pub fn pool(&self) -> &AnswerPool {
        &self.pool
    }
}

impl fmt::Display for Opening {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = if self.pool.len() == 2 {
            let members = self.pool.members();
            format!(
                "{} or {}",
                self.pool.answer(members[0]),
                self.pool.answer(members[1])
            )
        } else {
            let percent = 100 * self.pool.len() / self.root_size;
            if percent > 0 {
                format!("{}%", percent)
            } else {
                format!("{}", self.pool.len())
            }
        };
        write!(f, "{} -> {} ({})", self.first_hint, self.second_guess, suffix)
    }
}

/// Per-guess, per-turn elimination counts, aggregated by the report layer.
///
/// Guesses are identified by their index in the legal-guess list; turns run
/// 0 to 5. Keeping the tally outside the word types keeps those immutable.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EliminationTally {
    eliminations: HashMap<usize, [u64; MAX_GUESSES]>,
}

impl EliminationTally {
    pub fn new() -> EliminationTally {
        EliminationTally::default()
    }

    /// Adds eliminations for the given guess at the given turn (0-5).
    pub fn record(&mut self, guess_index: usize, turn: usize, eliminations: u64) {
        self.eliminations.entry(guess_index).or_default()[turn] += eliminations;
    }

    /// The eliminations recorded for the given guess at the given turn.
    pub fn eliminations(&self, guess_index: usize, turn: usize) -> u64 {
        self.eliminations
            .get(&guess_index)
            .map_or(0, |per_turn| per_turn[turn])
    }

    /// The eliminations recorded for the given guess across all turns.
    pub fn total(&self, guess_index: usize) -> u64 {
        self.eliminations
            .get(&guess_index)
            .map_or(0, |per_turn| per_turn.iter().sum())
    }

    /// The recorded guess indices, in no particular order.
    pub fn guesses(&self) -> impl Iterator<Item = usize> + '_ {
        self.eliminations.keys().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tally_accumulates_per_turn() {
        let mut tally = EliminationTally::new();

        tally.record(7, 0, 100);
        tally.record(7, 0, 50);
        tally.record(7, 1, 25);
        tally.record(3, 5, 1);

        assert_eq!(tally.eliminations(7, 0), 150);
        assert_eq!(tally.eliminations(7, 1), 25);
        assert_eq!(tally.eliminations(7, 2), 0);
        assert_eq!(tally.total(7), 175);
        assert_eq!(tally.total(3), 1);
        assert_eq!(tally.total(9), 0);
        let mut guesses: Vec<usize> = tally.guesses().collect();
        guesses.sort_unstable();
        assert_eq!(guesses, vec![3, 7]);
    }

    fn opening(pool_words: &[&str], root_size: usize) -> Opening {
        let vocabulary =
            Vocabulary::from_iterators(pool_words.iter(), pool_words.iter()).unwrap();
        let pool = AnswerPool::root(&vocabulary);
        let first = Word::new("slate").unwrap();
        Opening {
            first_hint: HintSequence::from_pair(&first, &Word::new(pool_words[0]).unwrap()),
            second_guess: Word::new("crony").unwrap(),
            eliminations: 0,
            root_size,
            pool,
        }
    }

    #[test]
    fn opening_display_two_answers() {
        let opening = opening(&["moist", "hoist"], 2315);

        assert!(format!("{}", opening).ends_with("-> crony (moist or hoist)"));
    }

    #[test]
    fn opening_display_small_count() {
        let opening = opening(&["moist", "hoist", "foist"], 2315);

        assert!(format!("{}", opening).ends_with("-> crony (3)"));
    }

    #[test]
    fn opening_display_percentage() {
        let opening = opening(&["moist", "hoist", "foist"], 100);

        assert!(format!("{}", opening).ends_with("-> crony (3%)"));
    }

    #[test]
    fn opening_accessors() {
        let opening = opening(&["moist"], 2315);

        assert_eq!(opening.second_guess().as_str(), "crony");
        assert_eq!(opening.pool().len(), 1);
        assert_eq!(opening.second_guess_eliminations(), 0);
        assert_eq!(
            opening.pool().answers().next().unwrap().as_str(),
            "moist"
        );
    }
}
