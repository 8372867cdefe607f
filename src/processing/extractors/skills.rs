//! Dictionary-driven skill matching

use crate::input::taxonomy::SkillTaxonomy;
use crate::processing::analyzer::AnalyzedText;
use std::collections::{BTreeSet, HashSet};

/// Skills named in the text, matched case-insensitively against the
/// taxonomy. Single words come from non-stop tokens, multi-word skills from
/// noun phrases. Each skill appears once, capitalised.
pub fn extract_skills(analyzed: &AnalyzedText<'_>, taxonomy: &SkillTaxonomy) -> BTreeSet<String> {
    let mut found: HashSet<String> = HashSet::new();

    for token in analyzed.tokens().iter().filter(|t| !t.is_stop) {
        let word = token.text.to_lowercase();
        if taxonomy.contains(&word) {
            found.insert(word);
        }
    }

    for phrase in analyzed.noun_phrases() {
        let phrase = phrase.text.trim().to_lowercase();
        if taxonomy.contains(&phrase) {
            found.insert(phrase);
        }
    }

    found.iter().map(|skill| capitalize(skill)).collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
