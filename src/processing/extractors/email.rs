//! Email address detection

use regex::Regex;

/// Best-effort `local@domain.tld` matcher; not an RFC 5322 validator.
pub struct EmailExtractor {
    pattern: Regex,
}

impl Default for EmailExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl EmailExtractor {
    pub fn new() -> Self {
        // The domain part may run across whitespace; `extract` keeps only
        // the first whitespace-delimited token of the match.
        let pattern = Regex::new(r"[^@|\s]+@[^@]+\.[^@|\s]+").expect("Invalid email regex");
        Self { pattern }
    }

    /// First address in document order
    pub fn extract(&self, text: &str) -> Option<String> {
        let candidate = self.pattern.find(text)?.as_str();
        let address = candidate.split_whitespace().next()?.trim_matches(';');

        if address.is_empty() {
            None
        } else {
            Some(address.to_string())
        }
    }
}
