//! Phone number detection

use regex::Regex;

/// North American numbering plan pattern. Capture groups, in order:
/// country code, parenthesised area code, bare area code, exchange,
/// subscriber number, extension. Exchanges never start with 0 or 1.
const PHONE_PATTERN: &str = concat!(
    r"(?:(?:\+?([1-9]|[0-9][0-9]|[0-9][0-9][0-9])\s*(?:[.-]\s*)?)?",
    r"(?:\(\s*([2-9]1[02-9]|[2-9][02-8]1|[2-9][02-8][02-9])\s*\)",
    r"|([0-9][1-9]|[0-9]1[02-9]|[2-9][02-8]1|[2-9][02-8][02-9]))\s*(?:[.-]\s*)?)?",
    r"([2-9]1[02-9]|[2-9][02-9]1|[2-9][02-9]{2})\s*(?:[.-]\s*)?",
    r"([0-9]{4})",
    r"(?:\s*(?:#|x\.?|ext\.?|extension)\s*(\d+))?",
);

/// Numbers longer than this carry a country code
const NATIONAL_NUMBER_DIGITS: usize = 10;

pub struct PhoneExtractor {
    pattern: Regex,
}

impl Default for PhoneExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PhoneExtractor {
    pub fn new() -> Self {
        let pattern = Regex::new(PHONE_PATTERN).expect("Invalid phone regex");
        Self { pattern }
    }

    /// First number in document order, as the concatenation of its captured
    /// digit groups; prefixed with `+` when a country code was captured.
    pub fn extract(&self, text: &str) -> Option<String> {
        let captures = self.pattern.captures(text)?;
        let number: String = captures
            .iter()
            .skip(1)
            .flatten()
            .map(|group| group.as_str())
            .collect();

        if number.chars().count() > NATIONAL_NUMBER_DIGITS {
            Some(format!("+{}", number))
        } else {
            Some(number)
        }
    }
}
