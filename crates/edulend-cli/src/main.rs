mod commands;
mod input;
mod output;
mod telemetry;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::learn_score::{GradeArgs, LearnScoreArgs, RateBandArgs, RiskArgs};
use commands::lending::{LenderReturnArgs, LoanReturnArgs};

/// LearnScore assessment and loan rate advice
#[derive(Parser)]
#[command(
    name = "edulend",
    version,
    about = "LearnScore assessment and loan rate advice",
    long_about = "Compute a student's LearnScore from academic, repayment, scholarship \
                  and community counters, classify it into a grade and risk tier, and \
                  derive interest-rate advice and simple-interest loan returns."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true, env = "EDULEND_OUTPUT")]
    output: OutputFormat,

    /// Log filter used when RUST_LOG is unset (e.g. "debug", "edulend_core=debug")
    #[arg(long, default_value = "warn", global = true, env = "EDULEND_LOG")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full LearnScore assessment
    LearnScore(LearnScoreArgs),
    /// Letter grade for a total LearnScore
    Grade(GradeArgs),
    /// Lender risk tier for a total LearnScore
    Risk(RiskArgs),
    /// Recommended interest-rate band and suggested rate for a LearnScore
    RateBand(RateBandArgs),
    /// Simple-interest repayment figures for a loan request
    LoanReturn(LoanReturnArgs),
    /// Expected return for a lender funding a loan
    LenderReturn(LenderReturnArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = telemetry::init(&cli.log_level) {
        eprintln!("{}: {}", "error".red().bold(), e);
        process::exit(1);
    }

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::LearnScore(args) => commands::learn_score::run_learn_score(args),
        Commands::Grade(args) => commands::learn_score::run_grade(args),
        Commands::Risk(args) => commands::learn_score::run_risk(args),
        Commands::RateBand(args) => commands::learn_score::run_rate_band(args),
        Commands::LoanReturn(args) => commands::lending::run_loan_return(args),
        Commands::LenderReturn(args) => commands::lending::run_lender_return(args),
        Commands::Version => {
            println!("edulend {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
