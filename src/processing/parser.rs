//! Resume parsing pipeline: decode, normalise, analyse once, then run every
//! field extractor over the shared analysis.

use crate::config::ExtractionConfig;
use crate::error::{Result, ResumeParserError};
use crate::input::manager::InputManager;
use crate::input::taxonomy::SkillTaxonomy;
use crate::processing::analyzer::TextAnalyzer;
use crate::processing::extractors::{
    extract_name, extract_skills, EducationEntry, EducationExtractor, EmailExtractor,
    PhoneExtractor,
};
use crate::processing::normalizer::normalize_text;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;
use tokio::task;

/// Structured fields recovered from one resume
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub skills: BTreeSet<String>,
    pub education: Vec<EducationEntry>,
}

impl ParseResult {
    /// True when no extractor found anything
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self.email.is_none()
            && self.skills.is_empty()
            && self.education.is_empty()
    }
}

/// Runs the extraction pipeline. Holds only read-only state, so one instance
/// can serve concurrent parses behind an `Arc`.
pub struct ResumeParser {
    analyzer: Arc<dyn TextAnalyzer>,
    taxonomy: Arc<SkillTaxonomy>,
    email: EmailExtractor,
    phone: PhoneExtractor,
    education: EducationExtractor,
}

impl ResumeParser {
    pub fn new(analyzer: Arc<dyn TextAnalyzer>, taxonomy: Arc<SkillTaxonomy>) -> Self {
        Self {
            analyzer,
            taxonomy,
            email: EmailExtractor::new(),
            phone: PhoneExtractor::new(),
            education: EducationExtractor::default(),
        }
    }

    pub fn from_config(
        config: &ExtractionConfig,
        analyzer: Arc<dyn TextAnalyzer>,
        taxonomy: Arc<SkillTaxonomy>,
    ) -> Self {
        Self::new(analyzer, taxonomy).with_education(EducationExtractor::new(
            &config.education_keywords,
            config.education_matches,
        ))
    }

    pub fn with_education(mut self, education: EducationExtractor) -> Self {
        self.education = education;
        self
    }

    /// Parse decoded document text
    pub fn parse_text(&self, raw: &str) -> ParseResult {
        let normalized = normalize_text(raw);
        self.parse_normalized(&normalized)
    }

    /// Parse text that already went through [`normalize_text`]
    pub fn parse_normalized(&self, normalized: &str) -> ParseResult {
        let analyzed = self.analyzer.analyze(normalized);
        debug!(
            "Analysed {} tokens, {} noun phrases, {} sentences",
            analyzed.tokens().len(),
            analyzed.noun_phrases().len(),
            analyzed.sentences().len()
        );

        ParseResult {
            name: extract_name(&analyzed),
            phone: self.phone.extract(normalized),
            email: self.email.extract(normalized),
            skills: extract_skills(&analyzed, &self.taxonomy),
            education: self.education.extract(&analyzed),
        }
    }

    /// Decode a document by its extension and parse it. Analysis runs on a
    /// blocking task; a panicking analyzer surfaces as `Extraction`.
    pub async fn parse_document(self: &Arc<Self>, path: &Path) -> Result<ParseResult> {
        let raw = InputManager::decode(path).await?;

        let parser = Arc::clone(self);
        let result = task::spawn_blocking(move || parser.parse_text(&raw))
            .await
            .map_err(|e| {
                ResumeParserError::Extraction(format!("{}: {}", path.display(), e))
            })?;

        debug!("Parsed {}: {} skills", path.display(), result.skills.len());
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EducationMatchPolicy;
    use crate::processing::analyzer::RuleAnalyzer;
    use tempfile::tempdir;

    fn parser() -> ResumeParser {
        ResumeParser::new(
            Arc::new(RuleAnalyzer::new()),
            Arc::new(SkillTaxonomy::from_skills(["python", "machine learning", "docker"])),
        )
    }

    #[test]
    fn test_full_resume() {
        let raw = "Jane Doe\n\n\tjane.doe@example.com;\t+1 212-555-0199\n\
                   Skilled in Python and machine learning.\n\
                   I completed my B.TECH in 2015. It was great.\n";

        let result = parser().parse_text(raw);

        assert_eq!(result.name.as_deref(), Some("Jane Doe"));
        assert_eq!(result.email.as_deref(), Some("jane.doe@example.com"));
        assert_eq!(result.phone.as_deref(), Some("+12125550199"));
        assert!(result.skills.contains("Python"));
        assert!(result.skills.contains("Machine learning"));
        assert!(!result.skills.contains("Docker"));
        assert_eq!(
            result.education,
            vec![EducationEntry {
                degree: "B.TECH".to_string(),
                year: Some("2015".to_string()),
            }]
        );
    }

    #[test]
    fn test_nothing_found_is_not_an_error() {
        let result = parser().parse_text("nothing useful here, just lowercase words.");
        assert!(result.is_empty());
        assert_eq!(result, ParseResult::default());
    }

    #[test]
    fn test_empty_document() {
        assert!(parser().parse_text("").is_empty());
    }

    #[test]
    fn test_education_policy_from_config() {
        let config = ExtractionConfig {
            education_keywords: vec!["PhD".to_string()],
            education_matches: EducationMatchPolicy::AllOccurrences,
        };
        let parser = ResumeParser::from_config(
            &config,
            Arc::new(RuleAnalyzer::new()),
            Arc::new(SkillTaxonomy::from_skills(["rust"])),
        );

        let result = parser.parse_text("PhD in 2001. Second PhD in 2005.");
        let years: Vec<_> = result.education.iter().map(|e| e.year.as_deref()).collect();
        assert_eq!(years, vec![Some("2001"), Some("2005")]);
    }

    #[tokio::test]
    async fn test_unsupported_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("resume.odt");
        std::fs::write(&path, "Jane Doe").unwrap();

        let result = Arc::new(parser()).parse_document(&path).await;
        assert!(matches!(result, Err(ResumeParserError::UnsupportedFormat(_))));
    }

    #[tokio::test]
    async fn test_text_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("resume.txt");
        std::fs::write(&path, "Jane Doe\nDocker and Python\n").unwrap();

        let result = Arc::new(parser()).parse_document(&path).await.unwrap();
        assert_eq!(result.name.as_deref(), Some("Jane Doe"));
        assert_eq!(result.skills.len(), 2);
    }
}
