//! CLI application for matching a measured face against a dataset.
//!
//! Usage:
//!   ratio-face                                        # Prompt for measurements
//!   ratio-face --measurements 22,15,11,6.5,5,4.5      # Measurements on the command line
//!   ratio-face -m 22,15,11,6.5,5,4.5 --diagnostics    # Show every entry's score
//!   ratio-face -m 22,15,11,6.5,5,4.5 --json -o out.json

use clap::Parser;
use ratio_face::{
    input::{parse_measurements, prompt_measurements},
    load_ratios,
    report::{format_human_readable, format_json, format_ranking},
    MatchEngine,
};
use std::io;
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "ratio-face")]
#[command(author, version, about = "Facial ratio matching", long_about = None)]
struct Args {
    /// Dataset file (`.bz2` files are decompressed)
    #[arg(short, long, default_value = "data/faces.txt")]
    dataset: PathBuf,

    /// Query measurements as a comma separated list of six numbers
    #[arg(short, long)]
    measurements: Option<String>,

    /// Print the score of every dataset entry
    #[arg(long)]
    diagnostics: bool,

    /// Also list the N best-ranked entries
    #[arg(long, value_name = "N")]
    top: Option<usize>,

    /// Output as JSON
    #[arg(short, long)]
    json: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::WARN })
        .with_target(false)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> ratio_face::Result<()> {
    let dataset = load_ratios(&args.dataset)?;

    let measurements = match &args.measurements {
        Some(list) => parse_measurements(list)?,
        None => prompt_measurements(io::stdin().lock(), io::stdout())?,
    };
    debug!(?measurements, "query measurements");

    let query = measurements.ratios();
    let engine = MatchEngine::new(&dataset).with_diagnostics(args.diagnostics);
    let result = engine.find_best_match(&query)?;
    debug!(label = %result.label, score = result.score, "best match");

    let ranked = match args.top {
        Some(n) => {
            let mut ranked = engine.rank(&query)?;
            ranked.truncate(n);
            Some(ranked)
        }
        None => None,
    };

    let output_str = if args.json {
        format_json(&result, ranked.as_deref())?
    } else {
        let mut s = format_human_readable(&result);
        if let Some(ranked) = &ranked {
            s.push_str(&format!("\nTop {}:\n", ranked.len()));
            s.push_str(&format_ranking(ranked, ranked.len()));
        }
        s
    };

    if let Some(ref path) = args.output {
        std::fs::write(path, &output_str)?;
        debug!(path = %path.display(), "output written");
    } else {
        print!("{}", output_str);
    }

    Ok(())
}
