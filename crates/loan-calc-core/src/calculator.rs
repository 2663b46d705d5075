use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, warn};

use crate::annuity;
use crate::differentiated::{self, SchedulePayment};
use crate::error::LoanCalcError;
use crate::types::*;
use crate::validation::{self, Derivation};
use crate::LoanCalcResult;

/// Behaviour switches for [`calculate`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CalculatorOptions {
    /// Reject the unmatched annuity combination and non-finite results
    /// instead of passing them through.
    pub strict: bool,
}

/// Result of a single derivation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DerivationResult {
    NumberOfPeriods { months: f64, overpayment: Money },
    MonthlyPayment { payment: Money, overpayment: Money },
    Principal { principal: Money, overpayment: Money },
    Schedule {
        payments: Vec<SchedulePayment>,
        overpayment: Money,
    },
}

impl DerivationResult {
    pub fn overpayment(&self) -> Money {
        match self {
            DerivationResult::NumberOfPeriods { overpayment, .. }
            | DerivationResult::MonthlyPayment { overpayment, .. }
            | DerivationResult::Principal { overpayment, .. }
            | DerivationResult::Schedule { overpayment, .. } => *overpayment,
        }
    }

    /// Every scalar the result reports, labelled, for finiteness checks.
    fn scalars(&self) -> Vec<(&'static str, f64)> {
        let mut values = match self {
            DerivationResult::NumberOfPeriods { months, .. } => vec![("months", *months)],
            DerivationResult::MonthlyPayment { payment, .. } => vec![("payment", *payment)],
            DerivationResult::Principal { principal, .. } => vec![("principal", *principal)],
            DerivationResult::Schedule { payments, .. } => payments
                .iter()
                .map(|p| ("schedule payment", p.payment))
                .collect(),
        };
        values.push(("overpayment", self.overpayment()));
        values
    }
}

/// Run one derivation.
pub fn derive(derivation: &Derivation) -> DerivationResult {
    match *derivation {
        Derivation::NumberOfPeriods {
            payment,
            principal,
            interest_rate,
        } => {
            let out = annuity::derive_periods(payment, principal, interest_rate);
            DerivationResult::NumberOfPeriods {
                months: out.months,
                overpayment: out.overpayment,
            }
        }
        Derivation::MonthlyPayment {
            principal,
            periods,
            interest_rate,
        } => {
            let out = annuity::derive_payment(principal, periods, interest_rate);
            DerivationResult::MonthlyPayment {
                payment: out.payment,
                overpayment: out.overpayment,
            }
        }
        Derivation::Principal {
            payment,
            periods,
            interest_rate,
        } => {
            let out = annuity::derive_principal(payment, periods, interest_rate);
            DerivationResult::Principal {
                principal: out.principal,
                overpayment: out.overpayment,
            }
        }
        Derivation::DifferentiatedSchedule {
            principal,
            periods,
            interest_rate,
        } => {
            let out = differentiated::derive_schedule(principal, periods, interest_rate);
            DerivationResult::Schedule {
                payments: out.payments,
                overpayment: out.overpayment,
            }
        }
    }
}

fn methodology(derivation: &Derivation) -> &'static str {
    match derivation {
        Derivation::NumberOfPeriods { .. } => {
            "Annuity term: n = ceil(ln(A / (A - i*P)) / ln(1 + i)), i = rate/1200"
        }
        Derivation::MonthlyPayment { .. } => {
            "Annuity payment: A = ceil(P * i*(1+i)^n / ((1+i)^n - 1)), i = rate/12/100"
        }
        Derivation::Principal { .. } => {
            "Annuity principal: P = trunc(A / (i*(1+i)^n / ((1+i)^n - 1))), i = rate/12/100"
        }
        Derivation::DifferentiatedSchedule { .. } => {
            "Differentiated: D_k = ceil(P/n + i*(P - P*(k-1)/n)), i = rate/12/100"
        }
    }
}

/// Validate raw inputs, pick a derivation and run it.
///
/// Returns `Ok(None)` for the annuity combination that matches no
/// derivation, unless `options.strict` is set.
pub fn calculate(
    raw: &RawLoanInput,
    options: &CalculatorOptions,
) -> LoanCalcResult<Option<ComputationOutput<DerivationResult>>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let params = validation::parse_parameters(raw)?;
    debug!(payment_type = %params.payment_type, "validated loan parameters");
    let derivation = match validation::select_derivation(&params)? {
        Some(d) => d,
        None if options.strict => {
            return Err(LoanCalcError::InvalidInput {
                field: "parameters".into(),
                reason: "exactly one of payment, principal and periods must be omitted".into(),
            });
        }
        None => {
            debug!(?params, "no derivation matches the supplied parameters");
            return Ok(None);
        }
    };

    if let Derivation::DifferentiatedSchedule { periods, .. } = derivation {
        if periods.fract() != 0.0 {
            warnings.push(format!(
                "Fractional period count {periods} truncated to {} scheduled payments",
                periods.trunc()
            ));
        }
    }

    let result = derive(&derivation);

    for (label, value) in result.scalars() {
        if value.is_finite() {
            continue;
        }
        if options.strict {
            return Err(LoanCalcError::DomainError {
                context: label.into(),
                value,
            });
        }
        warn!(label, value, "non-finite value in derivation result");
        warnings.push(format!("{label} is not finite ({value})"));
    }

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        methodology(&derivation),
        &params,
        warnings,
        elapsed,
        result,
    )
    .map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(kind: &str, payment: f64, principal: f64, periods: f64, interest: f64) -> RawLoanInput {
        RawLoanInput {
            payment_type: Some(kind.into()),
            payment,
            principal,
            periods,
            interest: Some(interest),
        }
    }

    const LENIENT: CalculatorOptions = CalculatorOptions { strict: false };
    const STRICT: CalculatorOptions = CalculatorOptions { strict: true };

    #[test]
    fn test_payment_derivation() {
        let out = calculate(&raw("annuity", 0.0, 1_000_000.0, 10.0, 10.0), &LENIENT)
            .unwrap()
            .unwrap();
        assert_eq!(
            out.result,
            DerivationResult::MonthlyPayment {
                payment: 104_641.0,
                overpayment: 46_410.0,
            }
        );
        assert!(out.warnings.is_empty());
        assert_eq!(out.assumptions["principal"], 1_000_000.0);
    }

    #[test]
    fn test_fallthrough_lenient_vs_strict() {
        let input = raw("annuity", 100.0, 1_000.0, 12.0, 10.0);
        assert!(calculate(&input, &LENIENT).unwrap().is_none());
        assert!(calculate(&input, &STRICT).unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_non_finite_lenient_warns() {
        let out = calculate(&raw("annuity", 5.0, 1_000.0, 0.0, 12.0), &LENIENT)
            .unwrap()
            .unwrap();
        match out.result {
            DerivationResult::NumberOfPeriods { months, .. } => assert!(months.is_nan()),
            other => panic!("unexpected result {other:?}"),
        }
        assert_eq!(out.warnings.len(), 2);
    }

    #[test]
    fn test_non_finite_strict_is_domain_error() {
        let err = calculate(&raw("annuity", 5.0, 1_000.0, 0.0, 12.0), &STRICT).unwrap_err();
        assert!(matches!(err, LoanCalcError::DomainError { .. }));
    }

    #[test]
    fn test_fractional_diff_periods_warn() {
        let out = calculate(&raw("diff", 0.0, 1_000.0, 3.5, 10.0), &LENIENT)
            .unwrap()
            .unwrap();
        match &out.result {
            DerivationResult::Schedule { payments, .. } => assert_eq!(payments.len(), 3),
            other => panic!("unexpected result {other:?}"),
        }
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_invalid_input_is_error_in_both_modes() {
        let input = raw("foo", 0.0, 1_000.0, 12.0, 10.0);
        assert!(calculate(&input, &LENIENT).unwrap_err().is_invalid_input());
        assert!(calculate(&input, &STRICT).unwrap_err().is_invalid_input());
    }
}
