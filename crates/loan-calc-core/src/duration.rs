/// Render a month count as "1 month", "2 years", "1 year and 3 months", ...
///
/// The remaining-months part is always plural; it can only be 1..=11.
pub fn duration_phrase(months: u64) -> String {
    let years = months / 12;
    let rest = months % 12;
    let year_word = if years == 1 { "year" } else { "years" };

    match (years, rest) {
        (0, 1) => "1 month".to_string(),
        (0, n) => format!("{n} months"),
        (y, 0) => format!("{y} {year_word}"),
        (y, n) => format!("{y} {year_word} and {n} months"),
    }
}
