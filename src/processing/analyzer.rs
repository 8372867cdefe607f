//! Token and sentence analysis
//!
//! Extractors only depend on [`AnalyzedText`]: word tokens carrying a
//! stop-word flag and a coarse part-of-speech tag, noun-phrase spans and
//! sentence spans, all borrowed from the normalised text. Any
//! [`TextAnalyzer`] producing that view can be plugged into the parser.
//! [`RuleAnalyzer`] is the built-in implementation: Unicode segmentation
//! plus a small closed-class lexicon and suffix rules.

use crate::processing::stop_words::stop_word_set;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use unicode_segmentation::UnicodeSegmentation;

/// Coarse universal part-of-speech tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartOfSpeech {
    Adj,
    Adp,
    Adv,
    Aux,
    CConj,
    Det,
    Noun,
    Num,
    Part,
    Pron,
    PropN,
    Punct,
    SConj,
    Verb,
}

impl PartOfSpeech {
    fn is_nominal(self) -> bool {
        matches!(self, PartOfSpeech::Adj | PartOfSpeech::Noun | PartOfSpeech::PropN)
    }

    fn is_noun(self) -> bool {
        matches!(self, PartOfSpeech::Noun | PartOfSpeech::PropN)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    /// Byte offset into the analysed text
    pub start: usize,
    pub is_stop: bool,
    pub pos: PartOfSpeech,
}

impl Token<'_> {
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }
}

/// A literal slice of the analysed text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span<'a> {
    pub text: &'a str,
    pub start: usize,
}

impl Span<'_> {
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }
}

/// Read-only analysis of one normalised document
#[derive(Debug, Clone)]
pub struct AnalyzedText<'a> {
    text: &'a str,
    tokens: Vec<Token<'a>>,
    noun_phrases: Vec<Span<'a>>,
    sentences: Vec<Span<'a>>,
}

impl<'a> AnalyzedText<'a> {
    pub fn new(
        text: &'a str,
        tokens: Vec<Token<'a>>,
        noun_phrases: Vec<Span<'a>>,
        sentences: Vec<Span<'a>>,
    ) -> Self {
        Self {
            text,
            tokens,
            noun_phrases,
            sentences,
        }
    }

    pub fn tokens(&self) -> &[Token<'a>] {
        &self.tokens
    }

    pub fn noun_phrases(&self) -> &[Span<'a>] {
        &self.noun_phrases
    }

    pub fn sentences(&self) -> &[Span<'a>] {
        &self.sentences
    }

    /// Source text between two byte offsets, spacing included
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.text[start..end]
    }
}

/// Produces the token, noun-phrase and sentence views of a text.
///
/// Implementations are shared between concurrent parses and must not hold
/// per-document state.
pub trait TextAnalyzer: Send + Sync {
    fn analyze<'a>(&self, text: &'a str) -> AnalyzedText<'a>;
}

const ADJECTIVE_SUFFIXES: &[&str] = &["ous", "ful", "ive", "able", "ible", "al", "ic", "less"];

pub struct RuleAnalyzer {
    stop_words: HashSet<String>,
}

impl Default for RuleAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleAnalyzer {
    pub fn new() -> Self {
        Self {
            stop_words: stop_word_set(),
        }
    }

    /// Extend the stop list; entries are compared lower-cased
    pub fn with_stop_words<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stop_words
            .extend(extra.into_iter().map(|s| s.as_ref().to_lowercase()));
        self
    }

    pub fn tokenize<'a>(&self, text: &'a str) -> Vec<Token<'a>> {
        text.split_word_bound_indices()
            .filter(|(_, word)| !word.trim().is_empty())
            .map(|(start, word)| Token {
                text: word,
                start,
                is_stop: self.stop_words.contains(&word.to_lowercase()),
                pos: Self::tag(word),
            })
            .collect()
    }

    pub fn split_sentences<'a>(&self, text: &'a str) -> Vec<Span<'a>> {
        text.split_sentence_bound_indices()
            .filter_map(|(start, sentence)| {
                let trimmed = sentence.trim();
                if trimmed.is_empty() {
                    return None;
                }
                let leading = sentence.len() - sentence.trim_start().len();
                Some(Span {
                    text: trimmed,
                    start: start + leading,
                })
            })
            .collect()
    }

    /// Maximal runs of adjectives and nouns within a sentence, cut back to
    /// end on a noun.
    pub fn noun_phrases<'a>(
        &self,
        text: &'a str,
        tokens: &[Token<'a>],
        sentences: &[Span<'a>],
    ) -> Vec<Span<'a>> {
        let sentence_starts: BTreeSet<usize> = sentences.iter().map(|s| s.start).collect();
        let sentence_of = |offset: usize| sentence_starts.range(..=offset).next_back().copied();
        let mut phrases = Vec::new();
        let mut run: Option<(usize, Option<usize>)> = None;
        let mut current_sentence = None;

        let flush = |run: &mut Option<(usize, Option<usize>)>, phrases: &mut Vec<Span<'a>>| {
            if let Some((start, Some(end))) = run.take() {
                phrases.push(Span {
                    text: &text[start..end],
                    start,
                });
            }
        };

        for token in tokens {
            let sentence = sentence_of(token.start);
            if sentence != current_sentence || !token.pos.is_nominal() {
                flush(&mut run, &mut phrases);
            }
            current_sentence = sentence;

            if token.pos.is_nominal() {
                let (_, last_noun) = run.get_or_insert((token.start, None));
                if token.pos.is_noun() {
                    *last_noun = Some(token.end());
                }
            }
        }
        flush(&mut run, &mut phrases);

        phrases
    }

    fn tag(word: &str) -> PartOfSpeech {
        if !word.chars().any(char::is_alphanumeric) {
            return PartOfSpeech::Punct;
        }
        if !word.chars().any(char::is_alphabetic) {
            return PartOfSpeech::Num;
        }

        let lower = word.to_lowercase();
        if let Some(pos) = Self::closed_class(&lower) {
            return pos;
        }
        if word.chars().next().is_some_and(char::is_uppercase) {
            return PartOfSpeech::PropN;
        }
        if lower.len() > 4 && lower.ends_with("ly") {
            return PartOfSpeech::Adv;
        }
        if ADJECTIVE_SUFFIXES
            .iter()
            .any(|suffix| lower.len() > suffix.len() + 2 && lower.ends_with(suffix))
        {
            return PartOfSpeech::Adj;
        }
        if lower.len() > 4 && lower.ends_with("ed") {
            return PartOfSpeech::Verb;
        }
        PartOfSpeech::Noun
    }

    fn closed_class(lower: &str) -> Option<PartOfSpeech> {
        let pos = match lower {
            "a" | "an" | "the" | "this" | "that" | "these" | "those" | "each" | "every"
            | "some" | "any" | "no" | "all" | "both" | "either" | "neither" | "another"
            | "such" | "what" | "which" | "whose" => PartOfSpeech::Det,
            "i" | "me" | "my" | "myself" | "we" | "us" | "our" | "ours" | "ourselves"
            | "you" | "your" | "yours" | "yourself" | "yourselves" | "he" | "him" | "his"
            | "himself" | "she" | "her" | "hers" | "herself" | "it" | "its" | "itself"
            | "they" | "them" | "their" | "theirs" | "themselves" | "who" | "whom" => {
                PartOfSpeech::Pron
            }
            "of" | "at" | "by" | "for" | "with" | "about" | "against" | "between" | "into"
            | "through" | "during" | "before" | "after" | "above" | "below" | "to" | "from"
            | "up" | "down" | "in" | "out" | "on" | "off" | "over" | "under" | "across"
            | "along" | "among" | "around" | "within" | "without" | "via" | "per" | "upon"
            | "toward" | "towards" => PartOfSpeech::Adp,
            "and" | "or" | "but" | "nor" | "yet" => PartOfSpeech::CConj,
            "if" | "because" | "as" | "until" | "while" | "although" | "though" | "since"
            | "unless" | "whereas" | "whether" | "than" => PartOfSpeech::SConj,
            "am" | "is" | "are" | "was" | "were" | "be" | "been" | "being" | "have" | "has"
            | "had" | "having" | "do" | "does" | "did" | "doing" | "will" | "would"
            | "shall" | "should" | "can" | "could" | "may" | "might" | "must" => {
                PartOfSpeech::Aux
            }
            "not" | "n't" | "'s" => PartOfSpeech::Part,
            "very" | "too" | "so" | "also" | "just" | "only" | "then" | "here" | "there"
            | "when" | "where" | "why" | "how" | "again" | "once" | "now" => PartOfSpeech::Adv,
            _ => return None,
        };
        Some(pos)
    }
}

impl TextAnalyzer for RuleAnalyzer {
    fn analyze<'a>(&self, text: &'a str) -> AnalyzedText<'a> {
        let tokens = self.tokenize(text);
        let sentences = self.split_sentences(text);
        let noun_phrases = self.noun_phrases(text, &tokens, &sentences);
        AnalyzedText::new(text, tokens, noun_phrases, sentences)
    }
}
