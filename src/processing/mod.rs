//! Text normalisation, analysis and field extraction

pub mod analyzer;
pub mod batch;
pub mod extractors;
pub mod normalizer;
pub mod parser;
pub mod stop_words;

pub use analyzer::{AnalyzedText, RuleAnalyzer, TextAnalyzer};
pub use batch::{BatchRunner, DocumentOutcome, Outcome};
pub use parser::{ParseResult, ResumeParser};
