use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::LoanCalcError;
use crate::types::*;
use crate::LoanCalcResult;

/// Which unknown a set of loan parameters asks for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Derivation {
    /// Annuity: payment and principal known, solve for months
    NumberOfPeriods {
        payment: Money,
        principal: Money,
        interest_rate: Percent,
    },
    /// Annuity: principal and months known, solve for payment
    MonthlyPayment {
        principal: Money,
        periods: Periods,
        interest_rate: Percent,
    },
    /// Annuity: payment and months known, solve for principal
    Principal {
        payment: Money,
        periods: Periods,
        interest_rate: Percent,
    },
    /// Differentiated: month-by-month schedule
    DifferentiatedSchedule {
        principal: Money,
        periods: Periods,
        interest_rate: Percent,
    },
}

fn invalid(field: &str, reason: &str) -> LoanCalcError {
    LoanCalcError::InvalidInput {
        field: field.into(),
        reason: reason.into(),
    }
}

/// Zero means "not supplied" on the command line.
fn supplied(value: f64) -> Option<f64> {
    if value == 0.0 {
        None
    } else {
        Some(value)
    }
}

/// Range-check raw command-line values and replace the zero sentinel.
pub fn parse_parameters(raw: &RawLoanInput) -> LoanCalcResult<LoanParameters> {
    let interest_rate = match raw.interest {
        Some(rate) if rate > 0.0 => rate,
        Some(_) => return Err(invalid("interest", "interest rate must be positive")),
        None => return Err(invalid("interest", "interest rate is required")),
    };

    // NaN fails every comparison, so test for "not >= 0" rather than "< 0".
    for (field, value) in [
        ("principal", raw.principal),
        ("payment", raw.payment),
        ("periods", raw.periods),
    ] {
        if !(value >= 0.0) {
            return Err(invalid(field, "must not be negative"));
        }
    }

    let payment_type: PaymentType = raw
        .payment_type
        .as_deref()
        .ok_or_else(|| invalid("type", "payment type is required"))?
        .parse()?;

    Ok(LoanParameters {
        payment_type,
        payment: supplied(raw.payment),
        principal: supplied(raw.principal),
        periods: supplied(raw.periods),
        interest_rate,
    })
}

/// Choose the derivation for validated parameters.
///
/// `Ok(None)` is the annuity combination that matches no derivation
/// (every quantity supplied, or more than one missing). Callers decide
/// whether that is silent or an error.
pub fn select_derivation(params: &LoanParameters) -> LoanCalcResult<Option<Derivation>> {
    let interest_rate = params.interest_rate;

    let derivation = match params.payment_type {
        PaymentType::Differentiated => {
            if params.payment.is_some() {
                return Err(invalid("payment", "differentiated loans derive their own payments"));
            }
            let periods = params
                .periods
                .ok_or_else(|| invalid("periods", "differentiated loans need a period count"))?;
            Some(Derivation::DifferentiatedSchedule {
                principal: params.principal.unwrap_or(0.0),
                periods,
                interest_rate,
            })
        }
        PaymentType::Annuity => match (params.payment, params.principal, params.periods) {
            (Some(payment), Some(principal), None) => Some(Derivation::NumberOfPeriods {
                payment,
                principal,
                interest_rate,
            }),
            (None, Some(principal), Some(periods)) => Some(Derivation::MonthlyPayment {
                principal,
                periods,
                interest_rate,
            }),
            (Some(payment), None, Some(periods)) => Some(Derivation::Principal {
                payment,
                periods,
                interest_rate,
            }),
            _ => None,
        },
    };

    debug!(?derivation, "selected derivation");
    Ok(derivation)
}

/// Full validator: range checks, then dispatch.
pub fn validate(raw: &RawLoanInput) -> LoanCalcResult<Option<Derivation>> {
    let params = parse_parameters(raw)?;
    select_derivation(&params)
}
