//! mockexam CLI — interactive multiple-choice quiz runner.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;
mod quiz;

#[derive(Parser)]
#[command(name = "mockexam", version, about = "Interactive multiple-choice mock exams")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a test interactively
    Run {
        /// Test name, loaded from <tests-dir>/<NAME>.txt (built-in questions if omitted)
        name: Option<String>,

        /// Load questions from a JSON course file instead
        #[arg(long, conflicts_with = "name")]
        json: Option<PathBuf>,

        /// Shuffle question order
        #[arg(long)]
        shuffle: bool,

        /// Directory containing test files
        #[arg(long)]
        tests_dir: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check test files for format errors
    Validate {
        /// Test file (.txt or .json) or directory of .txt files
        path: PathBuf,
    },

    /// List available tests
    List {
        /// Directory containing test files
        #[arg(long)]
        tests_dir: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter config and example test
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mockexam=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            name,
            json,
            shuffle,
            tests_dir,
            config,
        } => commands::run::execute(name, json, shuffle, tests_dir, config),
        Commands::Validate { path } => commands::validate::execute(path),
        Commands::List { tests_dir, config } => commands::list::execute(tests_dir, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
