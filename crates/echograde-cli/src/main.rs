//! echograde CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "echograde",
    version,
    about = "Reading and dictation answer grader"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a single response against a reference text
    Score {
        /// The reference exercise text
        #[arg(long)]
        reference: String,

        /// The learner's transcript or typed answer
        #[arg(long, default_value = "")]
        candidate: String,

        /// Show how the score was computed
        #[arg(long)]
        explain: bool,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Grade an answer sheet against an exercise set
    Grade {
        /// Path to .toml exercise set or directory
        #[arg(long)]
        exercises: PathBuf,

        /// Path to .toml or .json answer sheet
        #[arg(long)]
        answers: PathBuf,

        /// Exercise set ID when --exercises holds more than one set
        #[arg(long)]
        set: Option<String>,

        /// Output directory for the JSON report
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long)]
        format: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate exercise set TOML files
    Validate {
        /// Path to exercise set file or directory
        #[arg(long)]
        exercises: PathBuf,
    },

    /// Compare two grade reports
    Compare {
        /// Earlier report JSON
        #[arg(long)]
        baseline: PathBuf,

        /// Later report JSON
        #[arg(long)]
        current: PathBuf,

        /// Score change (in points) that counts as significant
        #[arg(long, default_value = "5")]
        threshold: u8,

        /// Exit code 1 if regressions found
        #[arg(long)]
        fail_on_regression: bool,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Create starter config, exercise set, and answer sheet
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("echograde=info".parse().expect("static directive")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Score {
            reference,
            candidate,
            explain,
            format,
        } => commands::score::execute(reference, candidate, explain, format),
        Commands::Grade {
            exercises,
            answers,
            set,
            output,
            format,
            config,
        } => commands::grade::execute(exercises, answers, set, output, format, config),
        Commands::Validate { exercises } => commands::validate::execute(exercises),
        Commands::Compare {
            baseline,
            current,
            threshold,
            fail_on_regression,
            format,
        } => commands::compare::execute(baseline, current, threshold, fail_on_regression, format),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
