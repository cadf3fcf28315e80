// src/app/utils.rs
use chrono::{Datelike, Local};
use once_cell::sync::Lazy;

/// Year dropdown choices: the 50 most recent years, newest first.
/// Computed once; the session does not straddle New Year's Eve meaningfully.
pub(crate) static YEAR_OPTIONS: Lazy<Vec<i32>> = Lazy::new(|| {
    let current = Local::now().year();
    (0..50).map(|i| current - i).collect()
});

/// Leading 4-digit year of a TMDB `release_date` ("1999-03-31").
pub(crate) fn release_year(date: &str) -> Option<i32> {
    let head = date.split('-').next()?;
    if head.len() != 4 {
        return None;
    }
    head.parse().ok()
}

pub(crate) fn format_runtime(minutes: u32) -> String {
    let h = minutes / 60;
    let m = minutes % 60;
    if h == 0 {
        format!("{m}m")
    } else {
        format!("{h}h {m:02}m")
    }
}

/// Dollar amount with thousands separators, e.g. `$63,000,000`.
pub(crate) fn format_money(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');
    let offset = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - offset) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{format_money, format_runtime, release_year, YEAR_OPTIONS};

    #[test]
    fn release_year_parses_leading_digits() {
        assert_eq!(release_year("1999-03-31"), Some(1999));
        assert_eq!(release_year("2026"), Some(2026));
        assert_eq!(release_year(""), None);
        assert_eq!(release_year("99-03-31"), None);
    }

    #[test]
    fn runtime_formats_hours_and_minutes() {
        assert_eq!(format_runtime(45), "45m");
        assert_eq!(format_runtime(60), "1h 00m");
        assert_eq!(format_runtime(136), "2h 16m");
    }

    #[test]
    fn money_groups_thousands() {
        assert_eq!(format_money(0), "$0");
        assert_eq!(format_money(950), "$950");
        assert_eq!(format_money(63_000_000), "$63,000,000");
        assert_eq!(format_money(463_517_383), "$463,517,383");
    }

    #[test]
    fn year_options_are_fifty_descending() {
        assert_eq!(YEAR_OPTIONS.len(), 50);
        assert!(YEAR_OPTIONS.windows(2).all(|w| w[0] == w[1] + 1));
    }
}
