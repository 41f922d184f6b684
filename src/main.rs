use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use orgcast::puzzle::{read_expected, PuzzleReader};
use orgcast::{classify, EngineChoice, EventEngine, Solver, SolverConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "orgcast", about = "Bounded broadcasts and weighted reads over company hierarchies")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Solve every puzzle in an input file.
    Solve {
        /// Puzzle input file.
        input: PathBuf,
        /// Expected answers (one per line); any mismatch is an error.
        #[arg(long)]
        expected: Option<PathBuf>,
        /// Engine to run: auto, deep or shallow.
        #[arg(long, default_value_t = EngineChoice::Auto)]
        engine: EngineChoice,
        /// Sampling interval for ancestor skip summaries (default: √ of the max depth).
        #[arg(long)]
        interval: Option<usize>,
    },
    /// Report depth statistics and the engine the heuristic picks.
    Classify {
        /// Puzzle input file.
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            input,
            expected,
            engine,
            interval,
        } => {
            let mut config = SolverConfig::default().with_engine(engine);
            if let Some(interval) = interval {
                config = config.with_summary_interval(interval);
            }
            run_solve(input, expected, config)?
        }
        Commands::Classify { input } => run_classify(input)?,
    }

    Ok(())
}

fn run_solve(input: PathBuf, expected: Option<PathBuf>, config: SolverConfig) -> Result<()> {
    let overall_start = Instant::now();
    let reader = PuzzleReader::open(&input)
        .with_context(|| format!("failed to open puzzle file {}", input.display()))?;

    let answers = match &expected {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open answers file {}", path.display()))?;
            Some(read_expected(BufReader::new(file))?)
        }
        None => None,
    };

    for (idx, puzzle) in reader.enumerate() {
        let case = idx + 1;
        let puzzle = puzzle.with_context(|| format!("failed to read puzzle {case}"))?;

        let prep_start = Instant::now();
        let company = puzzle
            .company()
            .with_context(|| format!("puzzle {case} has a malformed hierarchy"))?;
        let mut engine = Solver::new(&company, config.clone())
            .prepare()
            .with_context(|| format!("puzzle {case}: engine setup failed"))?;
        info!(case, elapsed = ?prep_start.elapsed(), engine = %engine.kind(), "prep time");

        let calc_start = Instant::now();
        let value = engine
            .process(&puzzle.events)
            .with_context(|| format!("puzzle {case} failed"))?;
        info!(case, elapsed = ?calc_start.elapsed(), "calculation time");

        println!("Case #{}: {}", case, value);

        if let Some(answers) = &answers {
            match answers.get(idx) {
                Some(&want) if want == value => {}
                Some(&want) => bail!("puzzle {case}: got {value}, expected {want}"),
                None => bail!("puzzle {case}: no expected answer available"),
            }
        }
    }

    info!(elapsed = ?overall_start.elapsed(), "total run time");
    Ok(())
}

fn run_classify(input: PathBuf) -> Result<()> {
    let reader = PuzzleReader::open(&input)
        .with_context(|| format!("failed to open puzzle file {}", input.display()))?;

    for (idx, puzzle) in reader.enumerate() {
        let case = idx + 1;
        let puzzle = puzzle.with_context(|| format!("failed to read puzzle {case}"))?;
        let company = puzzle
            .company()
            .with_context(|| format!("puzzle {case} has a malformed hierarchy"))?;
        let report = classify(&company);

        println!(
            "Case #{}: employees={}\taverage_depth={:.2}\tmax_depth={}\tengine={}",
            case, report.num_employees, report.average_depth, report.max_depth, report.kind
        );
    }

    Ok(())
}
