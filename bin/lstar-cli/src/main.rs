use clap::{Parser, ValueEnum};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use lstar_learning::learn_with_table;

/// A handful of built-in membership oracles, so the learner can be exercised from the
/// command line without writing Rust (spec §6: "a thin external wrapper").
#[derive(Copy, Clone, Debug, ValueEnum)]
enum Example {
    /// Accepts w iff #a(w) and #b(w) are both even.
    BothEven,
    /// Accepts w iff w ends with "ab".
    EndsWithAb,
    /// Accepts w iff the third symbol from the end is '1'.
    ThirdFromEndIsOne,
    /// Accepts every string.
    AcceptAll,
    /// Accepts no string.
    AcceptNone,
}

#[derive(Parser, Debug)]
#[command(
    name = "lstar-cli",
    about = "Learn a minimal DFA for a built-in example language via Angluin's L*"
)]
struct Args {
    /// Which built-in language to learn.
    #[arg(value_enum)]
    example: Example,

    /// Cap on counterexample search length (must be >= 2 if given).
    #[arg(long)]
    max_ce_len: Option<usize>,

    /// Cap on the number of oracle invocations spent per counterexample search.
    #[arg(long)]
    max_ce_searches: Option<usize>,
}

fn oracle_for(example: Example) -> (Vec<char>, Box<dyn Fn(&[char]) -> bool>) {
    match example {
        Example::BothEven => (
            vec!['a', 'b'],
            Box::new(|w: &[char]| {
                w.iter().filter(|&&c| c == 'a').count() % 2 == 0
                    && w.iter().filter(|&&c| c == 'b').count() % 2 == 0
            }),
        ),
        Example::EndsWithAb => (
            vec!['a', 'b'],
            Box::new(|w: &[char]| w.len() >= 2 && w[w.len() - 2] == 'a' && w[w.len() - 1] == 'b'),
        ),
        Example::ThirdFromEndIsOne => (
            vec!['0', '1'],
            Box::new(|w: &[char]| w.len() >= 3 && w[w.len() - 3] == '1'),
        ),
        Example::AcceptAll => (vec!['a'], Box::new(|_: &[char]| true)),
        Example::AcceptNone => (vec!['a', 'b'], Box::new(|_: &[char]| false)),
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(tracing_subscriber::filter::LevelFilter::INFO),
        )
        .init();

    let args = Args::parse();
    let (symbols, predicate) = oracle_for(args.example);

    match learn_with_table(
        symbols,
        move |w: &[char]| predicate(w),
        args.max_ce_len,
        args.max_ce_searches,
    ) {
        Ok((dfa, table)) => {
            tracing::info!(states = dfa.num_states(), "learning finished");
            println!("{dfa}");
            tracing::debug!(%table, "final observation table");
        }
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}
