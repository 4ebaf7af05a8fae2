use wordle_openings::*;

use std::collections::HashSet;

const ANSWERS: &[&str] = &[
    "hello", "halls", "dolly", "happy", "windy", "speed", "abide", "eagle", "steel", "crane",
];

fn make_pool(answers: &[&str]) -> AnswerPool {
    let vocabulary = Vocabulary::from_iterators(answers.iter(), answers.iter()).unwrap();
    AnswerPool::root(&vocabulary)
}

fn word(text: &str) -> Word {
    Word::new(text).unwrap()
}

/// The cache-free reference computation for total eliminations.
fn total_eliminations_uncached(pool: &AnswerPool, guesses: &[&Word]) -> u64 {
    pool.answers()
        .map(|answer| {
            let mut merged = Hint::new();
            for guess in guesses {
                merged.merge(&Hint::from_pair(guess, answer));
            }
            pool.answers()
                .filter(|other| !merged.is_satisfied_by(other))
                .count() as u64
        })
        .sum()
}

#[test]
fn divisiveness_stays_within_pool_bounds() {
    let pool = make_pool(ANSWERS);
    for guess in ["slate", "hello", "fuzzy", "qajaq"] {
        let divisiveness = pool.divisiveness(&word(guess));
        assert!(divisiveness >= 1, "{} produced no hints", guess);
        assert!(
            divisiveness <= pool.len(),
            "{} produced more hints than answers",
            guess
        );
    }
}

#[test]
fn divisiveness_is_one_for_an_uninformative_guess() {
    let pool = make_pool(&["hello", "halls"]);

    // No letter of the guess appears in any member, so every member yields
    // the same all-absent hint.
    assert_eq!(pool.divisiveness(&word("squid")), 1);
    assert!(pool.is_useless(&word("squid")));
}

#[test]
fn divisiveness_equals_pool_size_when_fully_discriminating() {
    let pool = make_pool(&["ababa", "babab", "ccccc"]);

    assert_eq!(pool.divisiveness(&word("ababa")), pool.len());
}

#[test]
fn partition_children_cover_the_pool_exactly() {
    let pool = make_pool(ANSWERS);
    for guess in ["slate", "hello", "speed", "qajaq"] {
        let children = pool.partition(&word(guess));

        let mut seen: HashSet<AnswerId> = HashSet::new();
        for child in &children {
            assert!(!child.is_empty(), "{} produced an empty child", guess);
            for id in child.members() {
                assert!(
                    seen.insert(*id),
                    "{} put answer {} in two children",
                    guess,
                    child.answer(*id)
                );
            }
        }
        assert_eq!(
            children.iter().map(AnswerPool::len).sum::<usize>(),
            pool.len()
        );
        assert_eq!(seen.len(), pool.len());
        assert_eq!(children.len(), pool.divisiveness(&word(guess)));
    }
}

#[test]
fn partition_preserves_frequency_invariant() {
    let pool = make_pool(ANSWERS);
    for child in pool.partition(&word("slate")) {
        for letter in b'a'..=b'z' {
            let expected: u32 = child
                .answers()
                .map(|answer| answer.count(letter) as u32)
                .sum();
            assert_eq!(child.char_frequency(letter), expected);
        }
    }
}

#[test]
fn cached_total_eliminations_matches_uncached() {
    let pool = make_pool(ANSWERS);
    let combos: &[&[&str]] = &[
        &["slate"],
        &["hello"],
        &["speed"],
        &["slate", "crony"],
        &["hello", "windy"],
        &["slate", "crony", "dumpy"],
    ];
    for combo in combos {
        let guesses: Vec<Word> = combo.iter().map(|text| word(text)).collect();
        let refs: Vec<&Word> = guesses.iter().collect();

        assert_eq!(
            pool.total_eliminations(&refs),
            total_eliminations_uncached(&pool, &refs),
            "cache changed the result for {:?}",
            combo
        );
    }
}

#[test]
fn total_eliminations_of_a_discriminating_guess_is_maximal() {
    let pool = make_pool(&["ababa", "babab", "ccccc"]);

    // Every hint isolates its answer, eliminating the other two.
    assert_eq!(pool.total_eliminations(&[&word("ababa")]), 6);
}
