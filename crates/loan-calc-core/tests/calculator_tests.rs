use loan_calc_core::calculator::{calculate, CalculatorOptions, DerivationResult};
use loan_calc_core::{LoanCalcError, RawLoanInput};
use pretty_assertions::assert_eq;

fn input(kind: &str, payment: f64, principal: f64, periods: f64, interest: f64) -> RawLoanInput {
    RawLoanInput {
        payment_type: Some(kind.into()),
        payment,
        principal,
        periods,
        interest: Some(interest),
    }
}

fn lines(raw: &RawLoanInput) -> Vec<String> {
    calculate(raw, &CalculatorOptions::default())
        .unwrap()
        .map(|out| out.result.text_lines())
        .unwrap_or_default()
}

#[test]
fn test_annuity_payment_report() {
    assert_eq!(
        lines(&input("annuity", 0.0, 1_000_000.0, 60.0, 10.0)),
        vec!["Your annuity payment = 21248!", "Overpayment = 274880"]
    );
}

#[test]
fn test_annuity_principal_report() {
    assert_eq!(
        lines(&input("annuity", 8_721.8, 0.0, 120.0, 5.6)),
        vec!["Your loan principal = 800000!", "Overpayment = 246616"]
    );
}

#[test]
fn test_annuity_periods_report() {
    assert_eq!(
        lines(&input("annuity", 23_000.0, 500_000.0, 0.0, 7.8)),
        vec!["It will take 2 years to repay this loan!", "Overpayment = 52000"]
    );
}

#[test]
fn test_differentiated_report() {
    let out = lines(&input("diff", 0.0, 1_000_000.0, 10.0, 10.0));
    assert_eq!(out.len(), 12);
    assert_eq!(out[0], "Month 1: payment is 108334");
    assert_eq!(out[9], "Month 10: payment is 100834");
    assert_eq!(out[10], "");
    assert_eq!(out[11], "Overpayment = 45837");
}

#[test]
fn test_incorrect_parameter_scenarios() {
    let cases = [
        input("annuity", 0.0, 1_000.0, 12.0, 0.0),
        input("annuity", 0.0, -5.0, 12.0, 10.0),
        input("foo", 0.0, 1_000.0, 12.0, 10.0),
        input("diff", 100.0, 1_000.0, 12.0, 10.0),
    ];
    for raw in &cases {
        let err = calculate(raw, &CalculatorOptions::default()).unwrap_err();
        assert!(
            matches!(err, LoanCalcError::InvalidInput { .. }),
            "{raw:?} gave {err}"
        );
    }
}

#[test]
fn test_unmatched_annuity_is_silent_by_default() {
    let raw = input("annuity", 0.0, 0.0, 12.0, 10.0);
    assert!(lines(&raw).is_empty());
    assert!(calculate(&raw, &CalculatorOptions { strict: true }).is_err());
}

#[test]
fn test_json_envelope_shape() {
    let out = calculate(
        &input("annuity", 0.0, 1_000_000.0, 10.0, 10.0),
        &CalculatorOptions::default(),
    )
    .unwrap()
    .unwrap();
    let value = serde_json::to_value(&out).unwrap();
    assert_eq!(value["result"]["kind"], "monthly_payment");
    assert_eq!(value["result"]["payment"], 104_641.0);
    assert_eq!(value["assumptions"]["payment_type"], "annuity");
    assert!(matches!(out.result, DerivationResult::MonthlyPayment { .. }));
}
