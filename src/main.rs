use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use fce_score::accounts::{self, AccountError};
use fce_score::config::{self, Config};
use fce_score::history;
use fce_score::input::{RawScores, RawScoresText};
use fce_score::output;
use fce_score::scoring::{self, Paper, ScoringConfig};
use fce_score::store::FileStore;

const EXIT_SUCCESS: i32 = 0;
const EXIT_AUTH: i32 = 1;
const EXIT_CONFIG: i32 = 4;
const EXIT_STORAGE: i32 = 5;

// Raw scores as entered. Anything that is not a non-negative number counts
// as 0, and values above a part's maximum are capped.
#[derive(Args, Debug, Default)]
struct ScoreArgs {
    /// Reading & Use of English part 1 (max 8)
    #[arg(long, value_name = "N", allow_hyphen_values = true)]
    rue1: Option<String>,
    /// Reading & Use of English part 2 (max 8)
    #[arg(long, value_name = "N", allow_hyphen_values = true)]
    rue2: Option<String>,
    /// Reading & Use of English part 3 (max 8)
    #[arg(long, value_name = "N", allow_hyphen_values = true)]
    rue3: Option<String>,
    /// Reading & Use of English part 4 (max 6, 2 points each)
    #[arg(long, value_name = "N", allow_hyphen_values = true)]
    rue4: Option<String>,
    /// Reading & Use of English part 5 (max 6, 2 points each)
    #[arg(long, value_name = "N", allow_hyphen_values = true)]
    rue5: Option<String>,
    /// Reading & Use of English part 6 (max 6, 2 points each)
    #[arg(long, value_name = "N", allow_hyphen_values = true)]
    rue6: Option<String>,
    /// Reading & Use of English part 7 (max 10)
    #[arg(long, value_name = "N", allow_hyphen_values = true)]
    rue7: Option<String>,
    /// Writing total (max 40)
    #[arg(long, value_name = "N", allow_hyphen_values = true)]
    writing: Option<String>,
    /// Listening part 1 (max 8)
    #[arg(long, value_name = "N", allow_hyphen_values = true)]
    listening1: Option<String>,
    /// Listening part 2 (max 10)
    #[arg(long, value_name = "N", allow_hyphen_values = true)]
    listening2: Option<String>,
    /// Listening part 3 (max 5)
    #[arg(long, value_name = "N", allow_hyphen_values = true)]
    listening3: Option<String>,
    /// Listening part 4 (max 7)
    #[arg(long, value_name = "N", allow_hyphen_values = true)]
    listening4: Option<String>,
    /// Speaking total (max 60)
    #[arg(long, value_name = "N", allow_hyphen_values = true)]
    speaking: Option<String>,
}

impl ScoreArgs {
    fn into_text(self) -> RawScoresText {
        RawScoresText {
            reading_and_use_of_english: [
                self.rue1, self.rue2, self.rue3, self.rue4, self.rue5, self.rue6, self.rue7,
            ]
            .map(Option::unwrap_or_default),
            writing: self.writing.unwrap_or_default(),
            listening: [self.listening1, self.listening2, self.listening3, self.listening4]
                .map(Option::unwrap_or_default),
            speaking: self.speaking.unwrap_or_default(),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert raw scores to scale scores, grade and CEFR
    Calculate {
        #[command(flatten)]
        scores: ScoreArgs,

        /// Save the result to the logged-in user's history
        #[arg(long)]
        save: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// List saved scores (newest first)
    History {
        /// Show one saved score in detail
        #[arg(long, value_name = "ID", conflicts_with = "clear")]
        show: Option<u64>,

        /// Delete all saved scores for the logged-in user
        #[arg(long)]
        clear: bool,
    },
    /// Create an account and log in
    Register {
        username: String,

        /// Password (otherwise read from FCE_SCORE_PASSWORD or prompted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Log in to an existing account
    Login {
        username: String,

        /// Password (otherwise read from FCE_SCORE_PASSWORD or prompted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Log out
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Create a config file interactively
    Init,
    /// Check the config file and print the effective conversion points
    Validate,
}

#[derive(Parser, Debug)]
#[command(name = "fce-score")]
#[command(about = "B2 First (FCE) score calculator", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/fce-score/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "fce_score=debug" } else { "fce_score=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Commands::Init = cli.command {
        if let Err(e) = config::init::run_init_wizard(cli.config) {
            eprintln!("Init failed: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
        std::process::exit(EXIT_SUCCESS);
    }

    // Load config
    let config = match config::load_config(cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate scoring config at startup
    let effective_scoring = config.effective_scoring();
    if let Err(errors) = scoring::validate_scoring(&effective_scoring) {
        eprintln!("Scoring config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let mut store = match config::resolve_data_dir(&config) {
        Ok(dir) => FileStore::new(dir),
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    tracing::debug!(data_dir = %store.dir().display(), "using data directory");

    let use_colors = output::should_use_colors();
    let verbose = cli.verbose;

    let result = match cli.command {
        Commands::Calculate { scores, save, json } => {
            run_calculate(&mut store, &effective_scoring, scores, save, json, use_colors, verbose)
        }
        Commands::History { show, clear } => run_history(&mut store, show, clear, use_colors),
        Commands::Register { username, password } => {
            resolve_password(password, true).and_then(|pw| {
                let user = accounts::register(&mut store, &username, &pw)?;
                println!("Registered and logged in as {}.", user);
                Ok(())
            })
        }
        Commands::Login { username, password } => {
            resolve_password(password, false).and_then(|pw| {
                let user = accounts::login(&mut store, &username, &pw)?;
                println!("Welcome, {}!", user);
                Ok(())
            })
        }
        Commands::Logout => accounts::logout(&mut store)
            .map(|was_logged_in| {
                if was_logged_in {
                    println!("Logged out.");
                } else {
                    println!("Not logged in.");
                }
            })
            .map_err(Into::into),
        Commands::Whoami => accounts::require_user(&store)
            .map(|user| println!("{}", user))
            .map_err(Into::into),
        Commands::Validate => {
            run_validate(&config, &effective_scoring);
            Ok(())
        }
        Commands::Init => Ok(()),
    };

    if let Err(e) = result {
        let (code, prefix) = classify_error(&e);
        eprintln!("{}: {:#}", prefix, e);
        std::process::exit(code);
    }

    std::process::exit(EXIT_SUCCESS);
}

fn classify_error(err: &anyhow::Error) -> (i32, &'static str) {
    match err.downcast_ref::<AccountError>() {
        Some(AccountError::Store(_)) => (EXIT_STORAGE, "Storage error"),
        Some(_) => (EXIT_AUTH, "Account error"),
        None if err.downcast_ref::<UsageError>().is_some() => (EXIT_CONFIG, "Error"),
        None => (EXIT_STORAGE, "Storage error"),
    }
}

/// Bad arguments detected after parsing (e.g. an unknown history id)
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct UsageError(String);

fn resolve_password(flag: Option<String>, confirm: bool) -> Result<String> {
    if let Some(pw) = flag.or_else(accounts::password_from_env) {
        return Ok(pw);
    }
    accounts::prompt_for_password(confirm)
        .map_err(|e| anyhow::Error::new(AccountError::MissingCredentials).context(e.to_string()))
}

fn run_calculate(
    store: &mut FileStore,
    scoring: &ScoringConfig,
    scores: ScoreArgs,
    save: bool,
    json: bool,
    use_colors: bool,
    verbose: bool,
) -> Result<()> {
    // Check the session before doing any work so --save fails fast
    let user = if save {
        Some(accounts::require_user(&*store)?)
    } else {
        None
    };

    let raw = RawScores::from_text(&scores.into_text());
    let result = scoring::calculate_score(&raw, scoring);

    if json {
        let rendered = serde_json::to_string_pretty(&result.scores).context("Failed to encode result")?;
        println!("{}", rendered);
    } else {
        println!("{}", output::format_results(&result.scores, use_colors));
    }

    if verbose {
        eprintln!("Conversion:");
        eprintln!("{}", output::format_breakdown(&result.breakdown));
    }

    if let Some(user) = user {
        let mut state = history::load_history(&*store)?;
        let record = state.add(&user, raw, result.scores, Utc::now());
        history::save_history(store, &state)?;
        tracing::info!(user = %user, id = record.id, "saved score");
        if json {
            eprintln!("Saved as score #{}.", record.id);
        } else {
            println!();
            println!("Saved as score #{}.", record.id);
        }
    }

    Ok(())
}

fn run_history(store: &mut FileStore, show: Option<u64>, clear: bool, use_colors: bool) -> Result<()> {
    let user = accounts::require_user(&*store)?;
    let mut state = history::load_history(&*store)?;

    if clear {
        let removed = state.clear(&user);
        history::save_history(store, &state)?;
        println!("Removed {} saved score(s).", removed);
        return Ok(());
    }

    match show {
        Some(id) => {
            let record = state
                .find(&user, id)
                .ok_or_else(|| UsageError(format!("No saved score with id {}", id)))?;
            println!("{}", output::format_record_detail(record, use_colors));
        }
        None => {
            let records = state.records_for(&user);
            println!("{}", output::format_history_table(&records, use_colors));
        }
    }

    Ok(())
}

fn run_validate(config: &Config, scoring: &ScoringConfig) {
    match &config.data_dir {
        Some(dir) => println!("Data directory: {}", dir.display()),
        None => println!("Data directory: (default)"),
    }
    println!("Conversion points:");
    for paper in Paper::ALL {
        let p = scoring.paper(paper);
        println!(
            "  {:<24}  low {:>2}  pass {:>2}  high {:>2}  total {:>2}",
            paper.label(),
            p.low,
            p.pass,
            p.high,
            p.total
        );
    }
    println!("Config OK.");
}
