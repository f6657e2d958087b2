//! quizforge CLI — serve the quiz API or work with a knowledge base offline.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "quizforge",
    version,
    about = "Exam question generator and keyword-coverage grader"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the HTTP API
    Serve {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Knowledge base JSON (overrides config)
        #[arg(long)]
        kb: Option<PathBuf>,

        /// Listen address (overrides config), e.g. "0.0.0.0:8000"
        #[arg(long)]
        bind: Option<String>,
    },

    /// Validate a knowledge base file
    Validate {
        /// Knowledge base JSON
        #[arg(long)]
        kb: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Generate questions and print them
    Generate {
        /// Knowledge base JSON (overrides config)
        #[arg(long)]
        kb: Option<PathBuf>,

        /// Number of questions
        #[arg(long, default_value = "1", allow_hyphen_values = true)]
        count: i64,

        /// Restrict to these problems (comma-separated or repeated)
        #[arg(long, value_delimiter = ',')]
        problem: Vec<String>,

        /// Seed for reproducible selection (may be negative)
        #[arg(long, allow_hyphen_values = true)]
        seed: Option<i64>,

        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Generate a question for a problem and grade an answer against it
    Grade {
        /// Knowledge base JSON (overrides config)
        #[arg(long)]
        kb: Option<PathBuf>,

        /// Problem to ask about
        #[arg(long)]
        problem: String,

        /// Answer text to grade
        #[arg(long)]
        answer: String,

        /// Seed for reproducible instance selection
        #[arg(long, allow_hyphen_values = true)]
        seed: Option<i64>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizforge=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve { config, kb, bind } => commands::serve::execute(config, kb, bind).await,
        Commands::Validate { kb, config } => commands::validate::execute(kb, config),
        Commands::Generate {
            kb,
            count,
            problem,
            seed,
            format,
            config,
        } => commands::generate::execute(kb, count, problem, seed, format, config),
        Commands::Grade {
            kb,
            problem,
            answer,
            seed,
            config,
        } => commands::grade::execute(kb, problem, answer, seed, config),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
