use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LoanCalcError;
use crate::LoanCalcResult;

/// Monetary amounts. Every rounding rule is defined over double precision.
pub type Money = f64;

/// Annual nominal interest rate as a percentage (10 = 10%).
pub type Percent = f64;

/// Monthly rate as a decimal (0.0083 = 0.83% per month).
pub type Rate = f64;

/// Period counts in months. Fractional counts are accepted on input.
pub type Periods = f64;

/// Repayment model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentType {
    /// Fixed total payment every period
    #[serde(rename = "annuity")]
    Annuity,
    /// Fixed principal portion, declining interest
    #[serde(rename = "diff")]
    Differentiated,
}

impl PaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentType::Annuity => "annuity",
            PaymentType::Differentiated => "diff",
        }
    }
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentType {
    type Err = LoanCalcError;

    /// Only the exact lowercase tags are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "annuity" => Ok(PaymentType::Annuity),
            "diff" => Ok(PaymentType::Differentiated),
            other => Err(LoanCalcError::InvalidInput {
                field: "type".into(),
                reason: format!("unknown payment type '{other}', expected 'diff' or 'annuity'"),
            }),
        }
    }
}

/// Loan inputs exactly as they arrive from the command line.
///
/// `payment`, `principal` and `periods` use `0.0` for "not supplied".
/// `payment_type` and `interest` are `None` when the flag is absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawLoanInput {
    pub payment_type: Option<String>,
    pub payment: Money,
    pub principal: Money,
    pub periods: Periods,
    pub interest: Option<Percent>,
}

/// Validated loan parameters with the zero sentinel replaced by `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    pub payment_type: PaymentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub periods: Option<Periods>,
    pub interest_rate: Percent,
}

/// Monthly rate used by the payment, principal and schedule formulas.
pub fn monthly_rate(interest: Percent) -> Rate {
    interest / 12.0 / 100.0
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

impl<T: Serialize> ComputationOutput<T> {
    /// The whole envelope as JSON. Non-finite numbers become `null`.
    pub fn to_json(&self) -> LoanCalcResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> LoanCalcResult<ComputationOutput<T>> {
    Ok(ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions)?,
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "f64".to_string(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_type_parses_exact_tags() {
        assert_eq!("annuity".parse::<PaymentType>().unwrap(), PaymentType::Annuity);
        assert_eq!("diff".parse::<PaymentType>().unwrap(), PaymentType::Differentiated);
    }

    #[test]
    fn test_payment_type_rejects_other_spellings() {
        for tag in ["foo", "Annuity", "DIFF", "differentiated", ""] {
            assert!(tag.parse::<PaymentType>().is_err(), "accepted {tag:?}");
        }
    }

    #[test]
    fn test_monthly_rate() {
        assert_eq!(monthly_rate(12.0), 0.01);
    }

    #[test]
    fn test_assumptions_omit_unset_fields() {
        let params = LoanParameters {
            payment_type: PaymentType::Annuity,
            payment: None,
            principal: Some(1000.0),
            periods: Some(10.0),
            interest_rate: 10.0,
        };
        let out = with_metadata("test", &params, vec![], 0, 1u8).unwrap();
        assert!(out.assumptions.get("payment").is_none());
        assert_eq!(out.assumptions["payment_type"], "annuity");
        assert_eq!(out.metadata.precision, "f64");
    }

    #[test]
    fn test_unserializable_assumptions_are_serialization_errors() {
        use std::collections::HashMap;

        // JSON object keys must be strings.
        let mut by_pair = HashMap::new();
        by_pair.insert((1u8, 2u8), 3u8);
        let err = with_metadata("test", &by_pair, vec![], 0, 1u8).unwrap_err();
        assert!(matches!(err, LoanCalcError::SerializationError(_)));
    }

    #[test]
    fn test_to_json_maps_nan_to_null() {
        let out = with_metadata("test", &(), vec![], 0, f64::NAN).unwrap();
        let value = out.to_json().unwrap();
        assert!(value["result"].is_null());
        assert_eq!(value["methodology"], "test");
    }

    #[test]
    fn test_payment_type_display_matches_tag() {
        assert_eq!(PaymentType::Annuity.to_string(), "annuity");
        assert_eq!(PaymentType::Differentiated.to_string(), "diff");
        assert_eq!(
            PaymentType::Differentiated.as_str().parse::<PaymentType>().unwrap(),
            PaymentType::Differentiated
        );
    }
}
