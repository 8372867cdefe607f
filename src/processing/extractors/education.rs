//! Degree keyword and graduation year detection

use crate::config::{EducationMatchPolicy, DEFAULT_EDUCATION_KEYWORDS};
use crate::processing::analyzer::AnalyzedText;
use crate::processing::stop_words::stop_word_set;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Characters ignored when comparing a word with the keyword list
const IGNORED_PUNCTUATION: &[char] = &['?', '|', '$', '.', '!', ','];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub year: Option<String>,
}

struct KeywordMatch {
    keyword: String,
    sentence: usize,
    window: String,
}

pub struct EducationExtractor {
    keywords: HashSet<String>,
    stop_words: HashSet<String>,
    policy: EducationMatchPolicy,
    year_pattern: Regex,
}

impl Default for EducationExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_EDUCATION_KEYWORDS, EducationMatchPolicy::default())
    }
}

impl EducationExtractor {
    pub fn new<I, S>(keywords: I, policy: EducationMatchPolicy) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_uppercase())
            .filter(|k| !k.is_empty())
            .collect();
        let year_pattern = Regex::new(r"(?:19|20)[0-9]{2}").expect("Invalid year regex");

        Self {
            keywords,
            stop_words: stop_word_set(),
            policy,
            year_pattern,
        }
    }

    /// Degree keywords in sentence order, each with the first year found in
    /// its sentence or the one right after it.
    pub fn extract(&self, analyzed: &AnalyzedText<'_>) -> Vec<EducationEntry> {
        let sentences: Vec<&str> = analyzed.sentences().iter().map(|s| s.text).collect();
        let mut matches: Vec<KeywordMatch> = Vec::new();

        for (index, sentence) in sentences.iter().enumerate() {
            for word in sentence.split_whitespace() {
                let Some(keyword) = self.match_keyword(word) else {
                    continue;
                };
                // The last sentence has no successor to borrow a year from.
                let window = match sentences.get(index + 1) {
                    Some(next) => format!("{}{}", sentence, next),
                    None => sentence.to_string(),
                };
                self.record(
                    &mut matches,
                    KeywordMatch {
                        keyword,
                        sentence: index,
                        window,
                    },
                );
            }
        }

        matches
            .into_iter()
            .map(|m| EducationEntry {
                year: self
                    .year_pattern
                    .find(&m.window)
                    .map(|year| year.as_str().to_string()),
                degree: m.keyword,
            })
            .collect()
    }

    /// Returns the keyword as written, minus surrounding punctuation
    fn match_keyword(&self, word: &str) -> Option<String> {
        let trimmed = word.trim_matches(IGNORED_PUNCTUATION);
        if trimmed.is_empty() || self.stop_words.contains(word) || self.stop_words.contains(trimmed) {
            return None;
        }

        let stripped: String = word
            .chars()
            .filter(|c| !IGNORED_PUNCTUATION.contains(c))
            .collect();
        let is_degree = self.keywords.contains(&stripped.to_uppercase())
            || self.keywords.contains(&trimmed.to_uppercase());

        is_degree.then(|| trimmed.to_string())
    }

    fn record(&self, matches: &mut Vec<KeywordMatch>, found: KeywordMatch) {
        match self.policy {
            EducationMatchPolicy::LastPerKeyword => {
                // Keeps the keyword's first position, takes the newest window.
                match matches.iter_mut().find(|m| m.keyword == found.keyword) {
                    Some(existing) => *existing = found,
                    None => matches.push(found),
                }
            }
            EducationMatchPolicy::AllOccurrences => {
                let repeated = matches
                    .iter()
                    .any(|m| m.keyword == found.keyword && m.sentence == found.sentence);
                if !repeated {
                    matches.push(found);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::analyzer::{RuleAnalyzer, TextAnalyzer};

    fn education_of(text: &str, policy: EducationMatchPolicy) -> Vec<EducationEntry> {
        let extractor = EducationExtractor::new(DEFAULT_EDUCATION_KEYWORDS, policy);
        extractor.extract(&RuleAnalyzer::new().analyze(text))
    }

    fn entry(degree: &str, year: Option<&str>) -> EducationEntry {
        EducationEntry {
            degree: degree.to_string(),
            year: year.map(str::to_string),
        }
    }

    #[test]
    fn test_degree_with_year() {
        let found = education_of(
            "I completed my B.TECH in 2015. It was great.",
            EducationMatchPolicy::LastPerKeyword,
        );
        assert_eq!(found, vec![entry("B.TECH", Some("2015"))]);
    }

    #[test]
    fn test_degree_without_year() {
        let found = education_of("Holds an MS from a state university.", EducationMatchPolicy::LastPerKeyword);
        assert_eq!(found, vec![entry("MS", None)]);
    }

    #[test]
    fn test_year_taken_from_following_sentence() {
        let found = education_of("Finished HSC. Graduated 2009.", EducationMatchPolicy::LastPerKeyword);
        assert_eq!(found, vec![entry("HSC", Some("2009"))]);
    }

    #[test]
    fn test_match_in_last_sentence_uses_that_sentence_alone() {
        let found = education_of("Worked at Acme in 2018. Studied SSC", EducationMatchPolicy::LastPerKeyword);
        assert_eq!(found, vec![entry("SSC", None)]);
    }

    #[test]
    fn test_stop_words_are_not_degrees() {
        // `me` is a stop word while `ME` is a degree.
        let found = education_of("Call me. Earned an ME in 2012.", EducationMatchPolicy::LastPerKeyword);
        assert_eq!(found, vec![entry("ME", Some("2012"))]);
    }

    #[test]
    fn test_last_occurrence_wins_per_keyword() {
        let text = "SSC in 2008. Then HSC in 2010. Retook SSC in 2011.";
        let found = education_of(text, EducationMatchPolicy::LastPerKeyword);
        assert_eq!(found, vec![entry("SSC", Some("2011")), entry("HSC", Some("2010"))]);
    }

    #[test]
    fn test_all_occurrences_policy() {
        let text = "SSC in 2008. Then HSC in 2010. Retook SSC in 2011.";
        let found = education_of(text, EducationMatchPolicy::AllOccurrences);
        assert_eq!(
            found,
            vec![
                entry("SSC", Some("2008")),
                entry("HSC", Some("2010")),
                entry("SSC", Some("2011")),
            ]
        );
    }

    #[test]
    fn test_spellings_of_one_degree_are_kept_apart() {
        // Entries are keyed by the trimmed word as written, so `BE` and
        // `B.E.` stay separate even though both strip to `BE`.
        let text = "Earned a BE in 2010. Later a B.E. in 2012.";
        let found = education_of(text, EducationMatchPolicy::LastPerKeyword);
        assert_eq!(found, vec![entry("BE", Some("2010")), entry("B.E", Some("2012"))]);
    }

    #[test]
    fn test_surrounding_punctuation_is_trimmed() {
        let found = education_of("Degrees: B.E., M.S, 2014.", EducationMatchPolicy::LastPerKeyword);
        let degrees: Vec<_> = found.iter().map(|e| e.degree.as_str()).collect();
        assert_eq!(degrees, vec!["B.E", "M.S"]);
        assert!(found.iter().all(|e| e.year.as_deref() == Some("2014")));
    }
}
