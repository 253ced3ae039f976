//! `bench_local.rs`: quick local timing runner (no Criterion)
//!
//! PURPOSE
//! -------
//! - Fast, ad-hoc timing for a handful of pattern, anagram and cryptarithm
//!   queries on *your* machine.
//! - Loads the word list once, then runs each case several times and reports the median.
//! - Always requests 100 results per case, to keep comparisons simple.
//!
//! HOW TO RUN
//! ----------
//! - Optimized build:                `cargo run --bin bench_local --release`
//! - Multiple repeats:               `cargo run --bin bench_local --release -- -r 5`
//! - Print a few results:            `cargo run --bin bench_local --release -- -p 5`
//! - Weighted list (`count word`):   `cargo run --bin bench_local --release -- -w counts.txt --counts`
//! - See all flags:                  `cargo run --bin bench_local -- --help`
//!
//! NOTES
//! -----
//! - This is *not* Criterion. It's quick and convenient, not statistically rigorous.
//! - Cases live in `get_cases()` below.
//! - I/O (printing) is kept outside the timed section.
//! - One warm-up run per case is done (not included in timing).
//! - Set `WORDPLAY_DEBUG` for debug logging; `RUST_LOG` overrides it.

use clap::Parser;
use std::error::Error;
use std::hint::black_box;
use std::time::Instant;

use wordplay::anagram::{phrase_anagrams, permute_fragments, AnagramQuery, LetterBag};
use wordplay::budget::SearchOptions;
use wordplay::pattern::{find_matches, Pattern};
use wordplay::solver::{complete_from_word_list, Cryptarithm};
use wordplay::word_list::WordList;

/// Simple local benchmark runner: load word list once, time several queries.
#[derive(Parser, Debug)]
#[command(author, version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"), about, long_about = None)]
struct Cli {
    /// Path to the word list file (word;score per line, or `count word` with --counts)
    #[arg(
        short,
        long,
        default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/test_word_list.txt")
    )]
    word_list: String,

    /// Read the word list as `count word` lines instead of `word;score`
    #[arg(long)]
    counts: bool,

    /// Minimum score filter (word;score lists only)
    #[arg(short = 'm', long, default_value_t = 50)]
    min_score: i32,

    /// Number of repeats per case (use >1 to reduce noise; median is reported)
    #[arg(short = 'r', long = "repeats", default_value_t = 1)]
    num_repeats: usize,

    /// Print up to this many results per case (0 = print none)
    #[arg(short = 'p', long = "print", default_value_t = 0)]
    print_limit: usize,
}

/// The fixed number of results we request per case.
const NUM_RESULTS: usize = 100;

/// One benchmark query. The summary shows `name()` as the case label.
#[derive(Clone, Debug)]
enum Case {
    Pattern(&'static str),
    Anagram(&'static str),
    Subanagram(&'static str, usize),
    Phrase(&'static str, usize),
    Permute(&'static [&'static str]),
    Cryptarithm(&'static str),
    Complete(&'static [&'static str], &'static str),
}

impl Case {
    fn name(&self) -> String {
        match self {
            Case::Pattern(p) => format!("match {p}"),
            Case::Anagram(letters) => format!("anagram {letters}"),
            Case::Subanagram(letters, min) => format!("subanagram {letters} (>= {min})"),
            Case::Phrase(letters, words) => format!("phrase {letters} (<= {words} words)"),
            Case::Permute(fragments) => format!("permute {}", fragments.join(" ")),
            Case::Cryptarithm(eq) => format!("solve {eq}"),
            Case::Complete(terms, pattern) => format!("complete {} = {pattern}", terms.join(" + ")),
        }
    }

    /// Run the query and render each result as a line of text.
    fn run(&self, wl: &WordList, opts: &SearchOptions) -> Result<Vec<String>, Box<dyn Error>> {
        let lines = match self {
            Case::Pattern(p) => {
                let pattern: Pattern = p.parse()?;
                find_matches(&pattern, wl, opts).matches.into_values()
            }
            Case::Anagram(letters) => {
                let bag: LetterBag = letters.parse()?;
                AnagramQuery::new(bag).find(wl, opts).matches.into_values()
            }
            Case::Subanagram(letters, min) => {
                let bag: LetterBag = letters.parse()?;
                let max = bag.len();
                AnagramQuery::new(bag).subsets(*min, max).find(wl, opts).matches.into_values()
            }
            Case::Phrase(letters, max_words) => {
                let bag: LetterBag = letters.parse()?;
                phrase_anagrams(&bag, wl, *max_words, opts).matches.into_values()
            }
            Case::Permute(fragments) => permute_fragments(fragments, wl, opts)?.matches.into_values(),
            Case::Cryptarithm(eq) => {
                let puzzle: Cryptarithm = eq.parse()?;
                let result = puzzle.solve(opts)?;
                result.solutions.iter().map(|s| puzzle.render(s)).collect()
            }
            Case::Complete(terms, pattern) => {
                let pattern: Pattern = pattern.parse()?;
                complete_from_word_list(terms, &pattern, wl, opts)?
                    .completions
                    .into_iter()
                    .map(|c| c.rendered)
                    .collect()
            }
        };
        Ok(lines)
    }
}

/// Edit/add new cases here.
fn get_cases() -> Vec<Case> {
    vec![
        Case::Pattern("l.x"),
        Case::Pattern("ABBA"),
        Case::Pattern("s*ing"),
        Case::Pattern("#@#@#"),
        Case::Pattern("A*A"),
        Case::Anagram("listen"),
        Case::Anagram("st.r"),
        Case::Subanagram("painters", 5),
        Case::Phrase("dormitory", 2),
        Case::Permute(&["st", "ing", "ray"]),
        Case::Cryptarithm("SEND + MORE = MONEY"),
        Case::Cryptarithm("TO + GO = OUT"),
        Case::Complete(&["send", "more"], "mo*"),
    ]
}

/// Small helper: robust central tendency for small samples.
fn median(mut xs: Vec<f64>) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.sort_by(f64::total_cmp);
    let n = xs.len();
    if n % 2 == 1 {
        xs[n / 2]
    } else {
        0.5 * (xs[n / 2 - 1] + xs[n / 2])
    }
}

const MAX_NAME_LEN: usize = 40;

fn main() -> Result<(), Box<dyn Error>> {
    /// One row in the benchmark summary: (case name, median seconds, number of results).
    type SummaryRow = (String, f64, usize);

    let cli = Cli::parse();
    wordplay::log::init_logger(std::env::var_os("WORDPLAY_DEBUG").is_some());

    // Load the word list once. This I/O is *not* included in per-case timing.
    eprintln!("Loading word list from: {}", cli.word_list);
    let t_load = Instant::now();
    let wl = if cli.counts {
        WordList::load_counts_from_path(&cli.word_list)?
    } else {
        WordList::load_scored_from_path(&cli.word_list, cli.min_score)?
    };
    eprintln!("Loaded {} words in {:.3}s", wl.len(), t_load.elapsed().as_secs_f64());

    let opts = SearchOptions::default().with_limit(NUM_RESULTS);
    let cases = get_cases();
    let mut summary: Vec<SummaryRow> = Vec::with_capacity(cases.len());

    for (idx, case) in cases.iter().enumerate() {
        let name = case.name();
        eprintln!("\n[{:02}] {}", idx + 1, name);

        // One *warm-up* execution per case; its timing is ignored.
        if let Err(e) = case.run(&wl, &opts) {
            eprintln!("  ✗ Warm-up failed: {e}");
            continue;
        }

        let mut times = Vec::with_capacity(cli.num_repeats);
        let mut last_results: Vec<String> = Vec::new();

        for rep in 0..cli.num_repeats {
            // Keep only the *core* operation inside the timed region.
            let t_run = Instant::now();
            let results = match case.run(black_box(&wl), &opts) {
                Ok(results) => results,
                Err(e) => {
                    eprintln!("  ✗ Run {}/{} failed: {e}", rep + 1, cli.num_repeats);
                    continue;
                }
            };
            let run_secs = t_run.elapsed().as_secs_f64();

            // Prevent the compiler from proving the result unused and eliding work.
            let _keep = black_box(results.len());

            times.push(run_secs);
            last_results = results;

            eprintln!(
                "  run {:>2}/{:>2}: {:.3}s ({} {})",
                rep + 1,
                cli.num_repeats,
                run_secs,
                last_results.len(),
                pluralizer(last_results.len(), "result".into(), None),
            );
        }

        let med = median(times);

        // Optionally print a few results from the *last* run (outside timing).
        for line in last_results.iter().take(cli.print_limit) {
            println!("{line}");
        }

        eprintln!(
            "  → median {med:.3}s over {} run(s); last run produced {} {}.",
            cli.num_repeats,
            last_results.len(),
            pluralizer(last_results.len(), "result".into(), None),
        );

        summary.push((name, med, last_results.len()));
    }

    // Compact summary at the end for a quick scan across all cases.
    eprintln!("\n==== Summary ====");
    eprintln!("{:<MAX_NAME_LEN$} | {:>10} | {:>9}", "case", "median (s)", "# results");
    eprintln!("{:-<MAX_NAME_LEN$}-+-{:-<10}-+-{:-<9}", "", "", "");
    for (name, med, num_results) in &summary {
        // Trim very long names for readability in the summary.
        let display = if name.chars().count() > MAX_NAME_LEN {
            format!("{}…", name.chars().take(MAX_NAME_LEN - 1).collect::<String>())
        } else {
            name.clone()
        };
        eprintln!("{display:<MAX_NAME_LEN$} | {med:>10.3} | {num_results:>9}");
    }

    Ok(())
}

fn pluralizer(count: usize, singular: String, plural: Option<String>) -> String {
    if count == 1 {
        singular
    } else {
        plural.unwrap_or_else(|| singular + "s")
    }
}
