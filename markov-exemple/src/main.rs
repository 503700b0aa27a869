mod io;

use std::path::PathBuf;

use clap::Parser;
use markov_core::MarkovGenerator;
use markov_core::model::config::GeneratorConfig;

/// Trains a Markov chain on a text file (one phrase per line) and prints
/// generated lines.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Corpus file, one phrase per line
    corpus: PathBuf,

    /// Optional JSON config file (order, ensure_unique, max_tokens, attempts_per_line)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of preceding tokens used as context (overrides the config)
    #[arg(short, long)]
    order: Option<usize>,

    /// Number of lines to generate
    #[arg(short, long, default_value_t = 10)]
    lines: usize,

    /// Text every generated line starts with
    #[arg(short, long, default_value = "")]
    seed: String,

    /// Reject lines that repeat a learned phrase or an earlier line
    #[arg(short, long)]
    unique: bool,

    /// Learn the corpus on all CPU cores
    #[arg(long)]
    parallel: bool,

    /// Print the N busiest chain states after training
    #[arg(long, value_name = "N")]
    stats: Option<usize>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    // Config file first, command line flags on top
    let mut config = match &args.config {
        Some(path) => io::read_config(path)?,
        None => GeneratorConfig::default(),
    };
    if let Some(order) = args.order {
        config.set_order(order)?;
    }
    if args.unique {
        config.ensure_unique = true;
    }

    let generator = MarkovGenerator::with_config(config)?;

    let phrases = io::read_phrases(&args.corpus)?;
    log::info!("read {} phrases from {}", phrases.len(), args.corpus.display());
    if args.parallel {
        generator.learn_parallel(&phrases);
    } else {
        generator.learn_many(&phrases);
    }
    println!(
        "Learned {} phrases into {} states (order {})",
        generator.source_phrase_count(),
        generator.chain_size(),
        generator.order()
    );

    if let Some(top) = args.stats {
        for state in generator.statistics().into_iter().take(top) {
            let next: Vec<String> = state
                .next
                .iter()
                .map(|(token, count)| format!("{token:?}x{count}"))
                .collect();
            println!("{} -> {}", state.key, next.join(", "));
        }
    }

    let mut walk = generator.walk(args.lines, &args.seed)?;
    for (i, line) in walk.by_ref().enumerate() {
        println!("Generated line {}: {}", i + 1, line);
    }
    if walk.is_short() {
        println!(
            "Only {} of {} lines could be generated in {} attempts",
            walk.produced(),
            walk.requested(),
            walk.attempts()
        );
    }

    Ok(())
}
