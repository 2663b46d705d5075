use loan_calc_core::calculator::DerivationResult;

/// Print the calculator's plain-text report.
pub fn print_text(result: &DerivationResult) {
    for line in result.text_lines() {
        println!("{}", line);
    }
}
