//! quizrace CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "quizrace", version, about = "Timed command-line quiz runner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a timed quiz
    Run {
        /// CSV file of question,answer rows (default: ./problems.csv)
        #[arg(long, alias = "problems_path")]
        problems_path: Option<PathBuf>,

        /// Time limit for the whole quiz in seconds (default: 30)
        #[arg(long, alias = "time_limit", allow_negative_numbers = true)]
        time_limit: Option<i64>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print a per-question review table after the score
        #[arg(long)]
        review: bool,
    },

    /// Validate a problems file
    Validate {
        /// CSV file of question,answer rows
        #[arg(long, alias = "problems_path", default_value = "./problems.csv")]
        problems_path: PathBuf,
    },

    /// Create a starter config and problems file
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("quizrace=warn")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            problems_path,
            time_limit,
            config,
            review,
        } => commands::run::execute(problems_path, time_limit, config, review).await,
        Commands::Validate { problems_path } => commands::validate::execute(problems_path),
        Commands::Init => commands::init::execute(),
    };

    // A read abandoned on timeout parks a blocking stdin thread; exiting here
    // keeps runtime shutdown from waiting for the user to press enter.
    match result {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}
