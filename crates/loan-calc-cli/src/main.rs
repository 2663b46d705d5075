mod commands;
mod input;
mod output;

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::process;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use loan_calc_core::calculator::DerivationResult;
use loan_calc_core::{ComputationOutput, LoanCalcError};

use commands::calculate::LoanArgs;

/// Printed on stdout for every rejected input.
const INCORRECT_PARAMETERS: &str = "Incorrect parameters";

/// Annuity and differentiated loan repayment calculator
#[derive(Parser)]
#[command(
    name = "loancalc",
    version,
    about = "Annuity and differentiated loan repayment calculator",
    long_about = "Derives the missing one of payment, principal and number of months for an \
                  annuity loan, or prints the month-by-month schedule of a differentiated \
                  loan, together with the total overpayment."
)]
struct Cli {
    #[command(flatten)]
    loan: LoanArgs,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    output: OutputFormat,

    /// Exit non-zero on errors and reject results that are not finite
    #[arg(long)]
    strict: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Table,
    Csv,
    Minimal,
}

/// How a run ended, before anything is printed.
#[derive(Debug)]
enum Outcome {
    Derived(Box<ComputationOutput<DerivationResult>>),
    /// Annuity parameters that match no derivation: silent success.
    NoMatch,
    Rejected(LoanCalcError),
}

/// A parsed invocation and its outcome.
#[derive(Debug)]
struct Evaluation {
    outcome: Outcome,
    strict: bool,
    format: OutputFormat,
}

/// Text written by a run and its exit status.
#[derive(Debug, PartialEq, Eq)]
struct RunReport {
    stdout: Vec<String>,
    stderr: Option<String>,
    exit_code: i32,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Parse and calculate without printing. `Err` only for `--help`/`--version`.
fn evaluate(args: &[String]) -> Result<Evaluation, clap::Error> {
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            return Err(e);
        }
        Err(e) => {
            return Ok(Evaluation {
                outcome: Outcome::Rejected(LoanCalcError::InvalidInput {
                    field: "arguments".into(),
                    reason: e.kind().to_string(),
                }),
                strict: input::args::has_flag(args, "--strict"),
                format: OutputFormat::Text,
            });
        }
    };

    if cli.verbose {
        debug!("Verbose mode enabled");
    }

    let outcome = match commands::calculate::run_calculate(&cli.loan, args, cli.strict) {
        Ok(Some(out)) => Outcome::Derived(Box::new(out)),
        Ok(None) => Outcome::NoMatch,
        Err(e) => Outcome::Rejected(e),
    };

    Ok(Evaluation {
        outcome,
        strict: cli.strict,
        format: cli.output,
    })
}

/// What the text format prints for an outcome, and the exit status.
fn report(outcome: &Outcome, strict: bool) -> RunReport {
    match outcome {
        Outcome::Derived(out) => RunReport {
            stdout: out.result.text_lines(),
            stderr: None,
            exit_code: 0,
        },
        Outcome::NoMatch => RunReport {
            stdout: Vec::new(),
            stderr: None,
            exit_code: 0,
        },
        Outcome::Rejected(err) => RunReport {
            stdout: if err.is_invalid_input() {
                vec![INCORRECT_PARAMETERS.to_string()]
            } else {
                Vec::new()
            },
            stderr: strict.then(|| format!("{}: {}", "error".red().bold(), err)),
            exit_code: if strict { 1 } else { 0 },
        },
    }
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    init_tracing(input::args::has_flag(&args, "--verbose") || input::args::has_flag(&args, "-v"));

    let evaluation = match evaluate(&args) {
        Ok(evaluation) => evaluation,
        Err(e) => e.exit(),
    };

    if let (Outcome::Derived(out), false) =
        (&evaluation.outcome, evaluation.format == OutputFormat::Text)
    {
        if let Err(e) = output::format_output(&evaluation.format, out) {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
        process::exit(0);
    }

    if let Outcome::Rejected(err) = &evaluation.outcome {
        debug!(%err, "run rejected");
    }

    let run = report(&evaluation.outcome, evaluation.strict);
    for line in &run.stdout {
        println!("{}", line);
    }
    if let Some(message) = &run.stderr {
        eprintln!("{}", message);
    }
    process::exit(run.exit_code);
}
