use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::*;

/// One row of a differentiated repayment schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SchedulePayment {
    pub month: u32,
    pub payment: Money,
}

/// Lazily generated differentiated schedule.
///
/// Yields `trunc(periods)` payments in ascending month order. Cloning a fresh
/// schedule restarts it; nothing beyond the month index is carried between
/// steps.
#[derive(Debug, Clone)]
pub struct DifferentiatedSchedule {
    principal: Money,
    periods: Periods,
    rate: Rate,
    count: u32,
    next_month: u64,
}

impl DifferentiatedSchedule {
    pub fn new(principal: Money, periods: Periods, interest: Percent) -> Self {
        Self {
            principal,
            periods,
            rate: monthly_rate(interest),
            // Saturating float-to-int cast: fractional months are dropped.
            count: periods as u32,
            next_month: 1,
        }
    }

    /// Number of payments the full schedule yields.
    pub fn months(&self) -> u32 {
        self.count
    }

    /// D_k = ceil(P/n + r * (P - P*(k-1)/n))
    fn payment_for(&self, month: u64) -> Money {
        let repaid = self.principal * (month - 1) as f64 / self.periods;
        (self.principal / self.periods + self.rate * (self.principal - repaid)).ceil()
    }
}

impl Iterator for DifferentiatedSchedule {
    type Item = SchedulePayment;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_month > u64::from(self.count) {
            return None;
        }
        let month = self.next_month;
        self.next_month += 1;
        Some(SchedulePayment {
            month: month as u32,
            payment: self.payment_for(month),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (u64::from(self.count) + 1).saturating_sub(self.next_month) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DifferentiatedSchedule {}

/// Collected schedule with its overpayment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifferentiatedOutput {
    pub payments: Vec<SchedulePayment>,
    pub overpayment: Money,
}

/// Overpayment over already-rounded payments: ceil(sum(D_k) - P).
pub fn overpayment(payments: &[SchedulePayment], principal: Money) -> Money {
    let total: Money = payments.iter().map(|p| p.payment).sum();
    (total - principal).ceil()
}

/// Build the full schedule and its overpayment.
pub fn derive_schedule(principal: Money, periods: Periods, interest: Percent) -> DifferentiatedOutput {
    let payments: Vec<SchedulePayment> =
        DifferentiatedSchedule::new(principal, periods, interest).collect();
    let overpayment = overpayment(&payments, principal);
    debug!(
        principal,
        periods,
        interest,
        months = payments.len(),
        overpayment,
        "derived differentiated schedule"
    );
    DifferentiatedOutput {
        payments,
        overpayment,
    }
}
