// Small formatting helpers shared by the engine's diagnostics.

pub fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// Number of flags set in a described result, handy for one-line summaries.
pub fn count_raised(flags: &[(&'static str, bool)]) -> usize {
    flags.iter().filter(|(_, raised)| *raised).count()
}
