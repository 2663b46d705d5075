use crate::calculator::DerivationResult;
use crate::duration::duration_phrase;

/// Whole-number rendering. Non-finite values print as "NaN" / "inf".
pub fn format_amount(value: f64) -> String {
    format!("{value:.0}")
}

fn term_phrase(months: f64) -> String {
    if months.is_finite() && months >= 0.0 {
        duration_phrase(months as u64)
    } else {
        format!("{} months", format_amount(months))
    }
}

impl DerivationResult {
    /// Plain-text report lines, in print order.
    pub fn text_lines(&self) -> Vec<String> {
        let mut lines = match self {
            DerivationResult::NumberOfPeriods { months, .. } => {
                vec![format!("It will take {} to repay this loan!", term_phrase(*months))]
            }
            DerivationResult::MonthlyPayment { payment, .. } => {
                vec![format!("Your annuity payment = {}!", format_amount(*payment))]
            }
            DerivationResult::Principal { principal, .. } => {
                vec![format!("Your loan principal = {}!", format_amount(*principal))]
            }
            DerivationResult::Schedule { payments, .. } => {
                let mut rows: Vec<String> = payments
                    .iter()
                    .map(|p| format!("Month {}: payment is {}", p.month, format_amount(p.payment)))
                    .collect();
                rows.push(String::new());
                rows
            }
        };
        lines.push(format!("Overpayment = {}", format_amount(self.overpayment())));
        lines
    }
}
