mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::financing::{LoanCompareArgs, MortgageArgs};
use commands::property::{AnalyzeArgs, BreakEvenArgs, GrowthArgs, HoldingPeriodArgs, RentToEmiArgs};

/// Residential property investment analysis
#[derive(Parser)]
#[command(
    name = "realty",
    version,
    about = "Residential property investment analysis",
    long_about = "A CLI for analysing buy-to-let residential property with decimal precision. \
                  Computes mortgage terms, rental yields, cash flow, break-even horizons, \
                  capital growth, holding-period returns and a 0-10 investment score."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Full investment analysis (financing, yields, break-even, growth, score)
    Analyze(AnalyzeArgs),
    /// Monthly payment and loan terms for one purchase
    Mortgage(MortgageArgs),
    /// Compare loan terms across down payment levels
    LoanCompare(LoanCompareArgs),
    /// Project capital growth, optionally against alternative rates
    Growth(GrowthArgs),
    /// Profit and ROI over standard holding periods
    HoldingPeriod(HoldingPeriodArgs),
    /// Months to positive cash flow and years to total-return break-even
    BreakEven(BreakEvenArgs),
    /// How much of the loan instalment the rent covers
    RentToEmi(RentToEmiArgs),
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

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("realty=debug,realty_core=debug"))
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("realty=info,realty_core=info"))
    };

    // stdout carries the result; logs go to stderr
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Analyze(args) => commands::property::run_analyze(args),
        Commands::Mortgage(args) => commands::financing::run_mortgage(args),
        Commands::LoanCompare(args) => commands::financing::run_loan_compare(args),
        Commands::Growth(args) => commands::property::run_growth(args),
        Commands::HoldingPeriod(args) => commands::property::run_holding_period(args),
        Commands::BreakEven(args) => commands::property::run_break_even(args),
        Commands::RentToEmi(args) => commands::property::run_rent_to_emi(args),
        Commands::Version => {
            println!("realty {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
