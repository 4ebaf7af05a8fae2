use clap::{Parser, Subcommand};
use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::time::Instant;
use wordle_openings::*;

/// Offline Wordle opening analysis: rank openers, search opening pairs and
/// triples, and build second-guess opening books.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Path to the legal-guess list, with one word on each line.
    #[clap(short = 'g', long, default_value = "io/guesses.txt")]
    guesses_file: String,

    /// Path to the possible-answer list, with one word on each line.
    #[clap(short = 'a', long, default_value = "io/answers.txt")]
    answers_file: String,

    /// Expected size of the legal-guess list.
    #[clap(long, default_value_t = NUM_GUESSES)]
    num_guesses: usize,

    /// Expected size of the possible-answer list.
    #[clap(long, default_value_t = NUM_ANSWERS)]
    num_answers: usize,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank opening guesses by positional score.
    Openers {
        /// How many guesses to report.
        #[clap(short = 'n', long, default_value_t = 10)]
        count: usize,
    },
    /// Rank follow-up openers that share no letters with the given guesses.
    NextOpeners {
        /// How many guesses to report.
        #[clap(short = 'n', long, default_value_t = 10)]
        count: usize,
        /// The opening guesses already chosen.
        previous: Vec<String>,
    },
    /// Find the best letter-disjoint opening pair among the top candidates.
    Pair {
        /// How many top openers to combine.
        #[clap(short = 'c', long, default_value_t = 100)]
        candidates: usize,
    },
    /// Find the best letter-disjoint opening triple among the top candidates.
    Triple {
        /// How many top openers to combine.
        #[clap(short = 'c', long, default_value_t = 50)]
        candidates: usize,
    },
    /// Build the second-guess opening book for a fixed first guess and write
    /// it to <first-guess>-openings.txt.
    Openings { first_guess: String },
    /// Report the total eliminations for a fixed opening sequence.
    Info { words: Vec<String> },
}

fn main() -> Result<(), Box<dyn Error>> {
    let start_time = Instant::now();
    let args = Args::parse();

    let guesses_reader = io::BufReader::new(File::open(&args.guesses_file)?);
    let answers_reader = io::BufReader::new(File::open(&args.answers_file)?);
    let vocabulary = Vocabulary::from_readers(
        guesses_reader,
        answers_reader,
        args.num_guesses,
        args.num_answers,
    )?;
    println!(
        "Loaded {} guesses and {} answers.",
        vocabulary.guesses().len(),
        vocabulary.answers().len()
    );
    let search = OpeningSearch::new(vocabulary);

    match &args.command {
        Command::Openers { count } => run_openers(&search, *count),
        Command::NextOpeners { count, previous } => run_next_openers(&search, *count, previous)?,
        Command::Pair { candidates } => run_pair(&search, *candidates),
        Command::Triple { candidates } => run_triple(&search, *candidates),
        Command::Openings { first_guess } => run_openings(&search, first_guess)?,
        Command::Info { words } => run_info(&search, words)?,
    }

    println!(
        "Command executed in {:.3}s.",
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}

fn run_openers(search: &OpeningSearch, count: usize) {
    for guess in search.rank_openers(count) {
        println!(
            "{}\t(positional score {})",
            guess,
            search.root_pool().positional_score(guess)
        );
    }
}

fn run_next_openers(
    search: &OpeningSearch,
    count: usize,
    previous: &[String],
) -> Result<(), WordleError> {
    let previous: Vec<Word> = previous
        .iter()
        .map(|word| Word::new(word))
        .collect::<Result<_, _>>()?;
    let refs: Vec<&Word> = previous.iter().collect();
    for guess in search.rank_next_openers(count, &refs) {
        println!(
            "{}\t(letter frequency score {})",
            guess,
            search.root_pool().char_set_frequency_score(guess)
        );
    }
    Ok(())
}

fn run_pair(search: &OpeningSearch, candidates: usize) {
    println!("Scoring pairs from the top {} openers...", candidates);
    match search.best_pair(candidates) {
        Some(best) => println!("{}", best),
        None => println!("No letter-disjoint pair found."),
    }
}

fn run_triple(search: &OpeningSearch, candidates: usize) {
    println!("Scoring triples from the top {} openers...", candidates);
    match search.best_triple(candidates) {
        Some(best) => println!("{}", best),
        None => println!("No letter-disjoint triple found."),
    }
}

fn run_openings(search: &OpeningSearch, first_guess: &str) -> Result<(), Box<dyn Error>> {
    let first = Word::new(first_guess)?;
    println!("Building the opening book for \"{}\"...", first);
    let book = search.opening_book(&first);

    let path = format!("{}-openings.txt", first);
    let mut writer = BufWriter::new(File::create(&path)?);
    for opening in &book {
        writeln!(writer, "{}", opening)?;
    }
    writer.flush()?;
    println!("Wrote {} openings to {}.", book.len(), path);

    let mut tally = EliminationTally::new();
    for opening in &book {
        if let Some(index) = search.vocabulary().guess_index(opening.second_guess().as_str()) {
            tally.record(index, 1, opening.second_guess_eliminations());
        }
    }
    let mut totals: Vec<(usize, u64)> = tally
        .guesses()
        .map(|index| (index, tally.total(index)))
        .collect();
    totals.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    println!("Top second guesses by eliminations:");
    for (index, eliminations) in totals.iter().take(5) {
        println!(
            "\t{} ({} eliminations)",
            search.vocabulary().guesses()[*index],
            eliminations
        );
    }
    Ok(())
}

fn run_info(search: &OpeningSearch, words: &[String]) -> Result<(), WordleError> {
    let words: Vec<&str> = words.iter().map(String::as_str).collect();
    println!("{}", search.opening_info(&words)?);
    Ok(())
}
