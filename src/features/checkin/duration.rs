//! Human duration expression parsing
//!
//! Parses cadence strings like `45s`, `2 Min`, `1hour` into seconds.

use regex::Regex;
use std::sync::OnceLock;

/// Minimum cadence accepted for a check-in session.
///
/// Enforced by the session registry, not by the parser itself.
pub const MIN_DURATION_SECS: u64 = 30;

static DURATION_RE: OnceLock<Regex> = OnceLock::new();

fn duration_re() -> &'static Regex {
    DURATION_RE.get_or_init(|| {
        Regex::new(r"(?i)^(\d+)\s*(s|secs?|seconds?|m|mins?|minutes?|h|hrs?|hours?|d|days?)")
            .expect("duration regex is valid")
    })
}

/// Parse a duration expression into seconds.
///
/// The expression must start with an integer followed by a unit token
/// (abbreviated or full, singular or plural, any case). Trailing text is
/// ignored. Returns `None` when the string does not begin with a recognized
/// number+unit pair.
pub fn parse_duration(input: &str) -> Option<u64> {
    let caps = duration_re().captures(input.trim())?;
    let value: u64 = caps[1].parse().ok()?;
    // The leading character is enough to classify the unit: s/m/h/d.
    let multiplier = match caps[2].chars().next()?.to_ascii_lowercase() {
        's' => 1,
        'm' => 60,
        'h' => 3600,
        'd' => 86400,
        _ => return None,
    };
    value.checked_mul(multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration_units() {
        assert_eq!(parse_duration("30s"), Some(30));
        assert_eq!(parse_duration("5m"), Some(300));
        assert_eq!(parse_duration("2h"), Some(7200));
        assert_eq!(parse_duration("1d"), Some(86400));
    }

    #[test]
    fn test_parse_duration_full_words_and_case() {
        assert_eq!(parse_duration("45 seconds"), Some(45));
        assert_eq!(parse_duration("2 Min"), Some(120));
        assert_eq!(parse_duration("1hour"), Some(3600));
        assert_eq!(parse_duration("3 DAYS"), Some(259200));
        assert_eq!(parse_duration("10 secs"), Some(10));
        assert_eq!(parse_duration("7 hrs"), Some(25200));
    }

    #[test]
    fn test_parse_duration_trailing_text_ignored() {
        assert_eq!(parse_duration("45s please"), Some(45));
        assert_eq!(parse_duration("5 minutes, thanks"), Some(300));
    }

    #[test]
    fn test_parse_duration_no_match() {
        assert_eq!(parse_duration("xyz"), None);
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("soon"), None);
        // Not anchored at a number+unit pair
        assert_eq!(parse_duration("wait 45s"), None);
        assert_eq!(parse_duration("45"), None);
        assert_eq!(parse_duration("45x"), None);
    }

    #[test]
    fn test_parse_duration_overflow() {
        assert_eq!(parse_duration("99999999999999999999s"), None);
        assert_eq!(parse_duration("18446744073709551615d"), None);
    }
}
