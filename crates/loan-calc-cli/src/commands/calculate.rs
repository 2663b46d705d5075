use clap::Args;
use tracing::debug;

use loan_calc_core::calculator::{self, CalculatorOptions, DerivationResult};
use loan_calc_core::{ComputationOutput, LoanCalcError, LoanCalcResult, RawLoanInput};

use crate::input;

/// Loan parameters. Omitted amounts default to 0, which means "derive this".
#[derive(Args, Debug)]
pub struct LoanArgs {
    /// Payment model: "annuity" or "diff"
    #[arg(long = "type")]
    pub payment_type: Option<String>,

    /// Monthly payment (annuity only)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub payment: f64,

    /// Loan principal
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub principal: f64,

    /// Number of monthly periods
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub periods: f64,

    /// Annual nominal interest rate in percent (e.g. 10 for 10%)
    #[arg(long, allow_negative_numbers = true)]
    pub interest: Option<f64>,
}

impl From<&LoanArgs> for RawLoanInput {
    fn from(args: &LoanArgs) -> Self {
        RawLoanInput {
            payment_type: args.payment_type.clone(),
            payment: args.payment,
            principal: args.principal,
            periods: args.periods,
            interest: args.interest,
        }
    }
}

pub fn run_calculate(
    args: &LoanArgs,
    raw_args: &[String],
    strict: bool,
) -> LoanCalcResult<Option<ComputationOutput<DerivationResult>>> {
    input::args::check_arity(raw_args).map_err(|reason| LoanCalcError::InvalidInput {
        field: "arguments".into(),
        reason,
    })?;

    let raw = RawLoanInput::from(args);
    debug!(?raw, strict, "calculating");
    calculator::calculate(&raw, &CalculatorOptions { strict })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(tokens: &[&str]) -> Vec<String> {
        std::iter::once("loancalc")
            .chain(tokens.iter().copied())
            .map(String::from)
            .collect()
    }

    fn loan(payment_type: &str, payment: f64, principal: f64, periods: f64) -> LoanArgs {
        LoanArgs {
            payment_type: Some(payment_type.into()),
            payment,
            principal,
            periods,
            interest: Some(10.0),
        }
    }

    #[test]
    fn test_arity_failure_is_invalid_input() {
        let args = argv(&["--type=annuity", "--principal=1000", "--interest=10"]);
        let err = run_calculate(&loan("annuity", 0.0, 1000.0, 0.0), &args, false).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_runs_payment_derivation() {
        let args = argv(&[
            "--type=annuity",
            "--principal=1000000",
            "--periods=10",
            "--interest=10",
        ]);
        let out = run_calculate(&loan("annuity", 0.0, 1_000_000.0, 10.0), &args, false)
            .unwrap()
            .unwrap();
        assert_eq!(
            out.result.text_lines(),
            vec!["Your annuity payment = 104641!", "Overpayment = 46410"]
        );
    }
}
