//! Collapse decoded document text into a single whitespace-normalised line

/// Drop blank lines, turn tabs into spaces and join what is left with a
/// single space. CRLF endings are treated like LF.
pub fn normalize_text(raw: &str) -> String {
    raw.split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.trim_end_matches('\r').replace('\t', " "))
        .collect::<Vec<_>>()
        .join(" ")
}
