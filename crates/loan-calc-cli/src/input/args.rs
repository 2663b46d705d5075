/// Loan-parameter token slots every invocation must fill, program name excluded.
pub const REQUIRED_LOAN_SLOTS: usize = 4;

/// Flags that configure the tool rather than the loan. `true` when the flag
/// takes its value from the following token.
const AMBIENT_FLAGS: [(&str, bool); 4] = [
    ("--output", true),
    ("--strict", false),
    ("--verbose", false),
    ("-v", false),
];

fn is_flag(token: &str, flag: &str) -> bool {
    token == flag
        || token
            .strip_prefix(flag)
            .is_some_and(|rest| rest.starts_with('='))
}

/// Raw token slots left once ambient flags (and their values) are removed.
///
/// Every remaining token is a slot, so `--type annuity` fills two of them.
pub fn loan_slots(args: &[String]) -> Vec<&str> {
    let mut slots = Vec::new();
    let mut tokens = args.iter().skip(1).map(String::as_str);
    while let Some(token) = tokens.next() {
        match AMBIENT_FLAGS.iter().find(|(flag, _)| is_flag(token, flag)) {
            Some((flag, true)) if token == *flag => {
                tokens.next();
            }
            Some(_) => {}
            None => slots.push(token),
        }
    }
    slots
}

/// True when `flag` appears as its own token or in `--flag=value` form.
pub fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().skip(1).any(|token| is_flag(token, flag))
}

/// Fixed-arity check applied before any loan value is looked at.
pub fn check_arity(args: &[String]) -> Result<(), String> {
    let found = loan_slots(args).len();
    if found == REQUIRED_LOAN_SLOTS {
        Ok(())
    } else {
        Err(format!(
            "expected {REQUIRED_LOAN_SLOTS} loan parameter arguments, found {found}"
        ))
    }
}
