#[macro_use]
extern crate assert_matches;

use wordle_openings::*;

use std::io::Cursor;

#[test]
fn vocabulary_from_readers_succeeds() -> Result<(), WordleError> {
    let guesses = Cursor::new(String::from("\naback\n abase\nabate\n"));
    let answers = Cursor::new(String::from("abase\nabate\n"));

    let vocabulary = Vocabulary::from_readers(guesses, answers, 3, 2)?;

    assert_eq!(vocabulary.guesses().len(), 3);
    assert_eq!(vocabulary.answers().len(), 2);
    assert_eq!(vocabulary.guesses()[1].as_str(), "abase");
    assert_eq!(vocabulary.guess_index("abate"), Some(2));
    assert_eq!(vocabulary.guess_index("zonal"), None);
    Ok(())
}

#[test]
fn vocabulary_too_few_words_fails() {
    let guesses = Cursor::new(String::from("aback\nabase\n"));
    let answers = Cursor::new(String::from("abase\n"));

    assert_matches!(
        Vocabulary::from_readers(guesses, answers, 3, 1),
        Err(WordleError::VocabularyCountMismatch {
            list: "guesses",
            expected: 3,
            actual: 2,
        })
    );
}

#[test]
fn vocabulary_too_many_words_fails() {
    let guesses = Cursor::new(String::from("aback\nabase\n"));
    let answers = Cursor::new(String::from("abase\nabate\n"));

    assert_matches!(
        Vocabulary::from_readers(guesses, answers, 2, 1),
        Err(WordleError::VocabularyCountMismatch {
            list: "answers",
            ..
        })
    );
}

#[test]
fn vocabulary_invalid_word_fails() {
    let guesses = Cursor::new(String::from("aback\nabcdef\n"));
    let answers = Cursor::new(String::from("abase\n"));

    assert_matches!(
        Vocabulary::from_readers(guesses, answers, 2, 1),
        Err(WordleError::InvalidWord(word)) if word == "abcdef"
    );
}

#[test]
fn vocabulary_from_iterators_succeeds() -> Result<(), WordleError> {
    let vocabulary =
        Vocabulary::from_iterators(vec!["aback", "abase"], vec!["abase".to_string()])?;

    assert_eq!(vocabulary.guesses().len(), 2);
    assert_eq!(vocabulary.answers().len(), 1);
    Ok(())
}

#[test]
fn answer_ids_index_the_canonical_table() -> Result<(), WordleError> {
    let vocabulary = Vocabulary::from_iterators(
        vec!["aback", "abase", "abate"],
        vec!["abase", "abate"],
    )?;

    let id = vocabulary.answer_id("abate").expect("known answer");
    assert_eq!(id.index(), 1);
    assert_eq!(vocabulary.answers()[id.index()].as_str(), "abate");
    assert_eq!(vocabulary.answer_id("aback"), None);
    Ok(())
}
