//! Wordle Solver - CLI
//!
//! Console front end with three modes: solve (suggestions for a puzzle played
//! elsewhere), play (a Wordle game) and test (batch evaluation).

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use wordlesolve::{
    commands::{Console, TestOptions, run_play, run_solve, run_test},
    config::Settings,
    solver::CycleError,
    wordlists::{DEFAULT_PLAY_GUESS_FREQ, WordList},
};

#[derive(Parser)]
#[command(
    name = "wordlesolve",
    about = "Wordle helper suggesting guesses from letter frequency and position statistics",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Settings file (default: wordlesolve.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Word list with one `WORD FREQUENCY` entry per line
    #[arg(short = 'w', long, global = true)]
    words: Option<PathBuf>,

    /// Hard mode: every guess must use all revealed hints
    #[arg(long, global = true)]
    hard: bool,

    /// Minimum frequency of words used as guesses
    #[arg(short = 'g', long, global = true)]
    guess_freq: Option<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Suggest guesses for a puzzle played elsewhere (default)
    Solve,

    /// Play Wordle in the console
    Play {
        /// Minimum frequency of words picked as solutions
        #[arg(long)]
        solution_freq: Option<f64>,

        /// Seed for picking solutions
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Solve many puzzles automatically and report statistics
    Test {
        /// Minimum frequency of sampled solutions
        #[arg(long)]
        solution_freq: Option<f64>,

        /// Number of random solutions to test, 0 for all
        #[arg(short = 'c', long, default_value_t = 1)]
        count: usize,

        /// Solutions to test instead of a random sample
        #[arg(long, num_args = 1..)]
        solutions: Vec<String>,

        /// File with one solution per line
        #[arg(short = 'f', long)]
        file: Option<PathBuf>,

        /// Show each solution's guesses (-v) and round details (-vv)
        #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
        verbosity: u8,

        /// Seed for sampling solutions
        #[arg(long)]
        seed: Option<u64>,

        /// Worker threads (default: one per CPU)
        #[arg(short = 'j', long)]
        jobs: Option<usize>,
    },
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive("wordlesolve=warn".parse()?)
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

/// Settings file merged with command-line overrides
fn settings(cli: &Cli, command: &Commands) -> Result<Settings> {
    let mut settings =
        Settings::discover(cli.config.as_deref()).context("failed to load settings")?;

    if let Some(path) = &cli.words {
        settings.words = Some(path.clone());
    }
    if let Some(freq) = cli.guess_freq {
        settings.guess_freq = freq;
    }
    settings.hard |= cli.hard;

    match command {
        Commands::Solve => {}
        Commands::Play {
            solution_freq,
            seed,
        } => {
            settings.solution_freq = solution_freq.unwrap_or(settings.solution_freq);
            settings.seed = seed.or(settings.seed);
            // Any listed word is a valid guess unless -g says otherwise
            if cli.guess_freq.is_none() {
                settings.guess_freq = DEFAULT_PLAY_GUESS_FREQ;
            }
        }
        Commands::Test {
            solution_freq,
            seed,
            jobs,
            ..
        } => {
            settings.solution_freq = solution_freq.unwrap_or(settings.solution_freq);
            settings.seed = seed.or(settings.seed);
            settings.jobs = jobs.or(settings.jobs);
        }
    }

    settings.validate().context("invalid settings")?;
    Ok(settings)
}

fn load_words(settings: &Settings) -> Result<WordList> {
    match &settings.words {
        Some(path) => WordList::load(path)
            .with_context(|| format!("failed to load word list {}", path.display())),
        None => Ok(WordList::embedded()),
    }
}

fn rng(seed: Option<u64>) -> StdRng {
    seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64)
}

/// End of input at a prompt quits quietly
fn quit_on_eof(result: Result<()>) -> Result<()> {
    match result {
        Err(err) if matches!(err.downcast_ref::<CycleError>(), Some(CycleError::InputClosed)) => {
            println!();
            Ok(())
        }
        other => other,
    }
}

fn main() -> Result<()> {
    init_logging()?;
    let cli = Cli::parse();

    let command = cli.command.as_ref().unwrap_or(&Commands::Solve);
    let settings = settings(&cli, command)?;
    debug!(?settings, "starting");

    let list = load_words(&settings)?;
    let guesses = list.with_min_frequency(settings.guess_freq);

    match command {
        Commands::Solve => quit_on_eof(run_solve(
            &mut Console::stdio(),
            &guesses,
            list.frequencies(),
            settings.hard,
        )),
        Commands::Play { .. } => {
            let solutions = list.with_min_frequency(settings.solution_freq);
            quit_on_eof(run_play(
                &mut Console::stdio(),
                &guesses,
                &solutions,
                settings.hard,
                &mut rng(settings.seed),
            ))
        }
        Commands::Test {
            count,
            solutions,
            file,
            verbosity,
            ..
        } => {
            let options = TestOptions {
                solutions: solutions.clone(),
                file: file.clone(),
                count: *count,
                solution_freq: settings.solution_freq,
                verbosity: *verbosity,
                hard: settings.hard,
                jobs: settings.jobs,
            };
            run_test(
                &mut io::stdout().lock(),
                &list,
                settings.guess_freq,
                &options,
                &mut rng(settings.seed),
                true,
            )?;
            Ok(())
        }
    }
}
