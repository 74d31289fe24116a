//! classcrave CLI: generate, check and grade practice sets.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(
    name = "classcrave",
    version,
    about = "Deterministic practice sets for the ClassCrave classroom"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the practice set for an assignment
    Generate {
        /// Path to an assignment .toml file
        #[arg(long)]
        assignment: PathBuf,

        /// Seed string (a fresh random seed is used if omitted)
        #[arg(long)]
        seed: Option<String>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Include answers in text output
        #[arg(long)]
        show_answers: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check one answer against a generated question
    Check {
        /// Path to an assignment .toml file
        #[arg(long)]
        assignment: PathBuf,

        /// Seed the practice set was generated from
        #[arg(long)]
        seed: String,

        /// Question id (1-based position)
        #[arg(long)]
        question: String,

        /// Submitted answer, exactly as entered
        #[arg(long, allow_hyphen_values = true)]
        answer: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Grade a full attempt and save a report
    Grade {
        /// Path to an assignment .toml file
        #[arg(long)]
        assignment: PathBuf,

        /// Seed the practice set was generated from
        #[arg(long)]
        seed: String,

        /// JSON object mapping question id to submitted answer
        #[arg(long)]
        answers: PathBuf,

        /// Student identifier recorded in the report
        #[arg(long)]
        student: Option<String>,

        /// Attempts the student has already completed
        #[arg(long, default_value = "0")]
        prior_attempts: u32,

        /// Output directory (defaults to the configured output_dir)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Compare two attempt reports
    Compare {
        /// Earlier attempt report JSON
        #[arg(long)]
        previous: PathBuf,

        /// Later attempt report JSON
        #[arg(long)]
        current: PathBuf,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Validate assignment TOML files
    Validate {
        /// Path to assignment file or directory
        #[arg(long)]
        assignment: PathBuf,
    },

    /// List available question templates
    Templates,

    /// Create starter config and example assignment
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("classcrave=info".parse().expect("valid directive"))
                .add_directive("classcrave_core=info".parse().expect("valid directive")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            assignment,
            seed,
            format,
            show_answers,
            config,
        } => commands::generate::execute(assignment, seed, format, show_answers, config),
        Commands::Check {
            assignment,
            seed,
            question,
            answer,
            config,
        } => commands::check::execute(assignment, seed, question, answer, config),
        Commands::Grade {
            assignment,
            seed,
            answers,
            student,
            prior_attempts,
            output,
            config,
        } => commands::grade::execute(
            assignment,
            seed,
            answers,
            student,
            prior_attempts,
            output,
            config,
        ),
        Commands::Compare {
            previous,
            current,
            format,
        } => commands::compare::execute(previous, current, format),
        Commands::Validate { assignment } => commands::validate::execute(assignment),
        Commands::Templates => commands::templates::execute(),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
