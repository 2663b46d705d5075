//! Annuity derivations: given two of payment, principal and months,
//! solve for the third.
//!
//! Every function evaluates its formula in the same operation order and
//! applies the same rounding step as the reference calculator, so results
//! match to the last unit. Non-finite intermediate values are returned as-is;
//! rejecting them is the caller's decision.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::*;

/// Months needed to repay `principal` at a fixed `payment`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodsOutput {
    pub months: f64,
    pub overpayment: Money,
}

/// Fixed monthly payment that amortises `principal`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaymentOutput {
    pub payment: Money,
    pub overpayment: Money,
}

/// Largest principal a fixed payment amortises
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrincipalOutput {
    pub principal: Money,
    pub overpayment: Money,
}

/// n = ceil(ln(A / (A - i*P)) / ln(1 + i))
///
/// Non-finite when `payment <= i * principal`: the loan never amortises.
pub fn derive_periods(payment: Money, principal: Money, interest: Percent) -> PeriodsOutput {
    // Written as one division here; the other formulas divide twice.
    let i = interest / (12.0 * 100.0);
    let months = ((payment / (payment - i * principal)).ln() / (1.0 + i).ln()).ceil();
    let overpayment = (payment * months - principal).ceil();
    debug!(payment, principal, interest, months, "derived number of periods");
    PeriodsOutput {
        months,
        overpayment,
    }
}

/// A = ceil(P * (r * (1+r)^n) / ((1+r)^n - 1))
pub fn derive_payment(principal: Money, periods: Periods, interest: Percent) -> PaymentOutput {
    let r = monthly_rate(interest);
    let growth = (1.0 + r).powf(periods);
    let payment = (principal * (r * growth) / (growth - 1.0)).ceil();
    let overpayment = (payment * periods - principal).ceil();
    debug!(principal, periods, interest, payment, "derived annuity payment");
    PaymentOutput {
        payment,
        overpayment,
    }
}

/// P = trunc(A / (r * (1+r)^n / ((1+r)^n - 1)))
///
/// Truncated toward zero, unlike the other two derivations.
pub fn derive_principal(payment: Money, periods: Periods, interest: Percent) -> PrincipalOutput {
    let r = monthly_rate(interest);
    let growth = (1.0 + r).powf(periods);
    let principal = (payment / (r * growth / (growth - 1.0))).trunc();
    let overpayment = (payment * periods - principal).ceil();
    debug!(payment, periods, interest, principal, "derived loan principal");
    PrincipalOutput {
        principal,
        overpayment,
    }
}
