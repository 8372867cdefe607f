//! Candidate name detection

use crate::processing::analyzer::{AnalyzedText, PartOfSpeech};

/// The first two adjacent proper nouns, as written in the source (original
/// spacing kept). Later pairs are never considered, so an employer's name
/// printed above the candidate's wins.
pub fn extract_name(analyzed: &AnalyzedText<'_>) -> Option<String> {
    analyzed
        .tokens()
        .windows(2)
        .find(|pair| pair[0].pos == PartOfSpeech::PropN && pair[1].pos == PartOfSpeech::PropN)
        .map(|pair| analyzed.slice(pair[0].start, pair[1].end()).to_string())
}
