//! Calendar token expansion for daily-note patterns

use chrono::NaiveDate;

/// Special note name that stands for today's daily note
pub const DAILY_REFERENCE: &str = "@daily";

/// Supported tokens, longest first within each family so `YYYY` wins over `YY`
/// and `MMMM` over `MMM` over `MM`.
const TOKENS: [(&str, &str); 6] = [
    ("YYYY", "%Y"),
    ("YY", "%y"),
    ("MMMM", "%B"),
    ("MMM", "%b"),
    ("MM", "%m"),
    ("DD", "%d"),
];

/// Expand `YYYY`, `YY`, `MMMM`, `MMM`, `MM` and `DD` in `pattern` for `date`.
///
/// Expanded text is never rescanned, so a month name like `March` is safe even
/// though it starts with `M`.
pub fn expand_date_pattern(pattern: &str, date: NaiveDate) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut rest = pattern;

    'scan: while !rest.is_empty() {
        for (token, spec) in TOKENS {
            if let Some(after) = rest.strip_prefix(token) {
                out.push_str(&date.format(spec).to_string());
                rest = after;
                continue 'scan;
            }
        }
        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            out.push(c);
        }
        rest = chars.as_str();
    }
    out
}

/// Check if the note name is the `@daily` reference
pub fn is_daily_reference(note_name: &str) -> bool {
    note_name == DAILY_REFERENCE
}
