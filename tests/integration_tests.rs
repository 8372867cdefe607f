//! Integration tests for the resume parser

use resume_parser::config::OutputFormat;
use resume_parser::error::{ErrorKind, ResumeParserError};
use resume_parser::input::manager::InputManager;
use resume_parser::input::{collect_documents, SkillTaxonomy};
use resume_parser::output::{BatchReport, ReportGenerator};
use resume_parser::processing::{BatchRunner, ResumeParser, RuleAnalyzer};
use std::path::Path;
use std::sync::Arc;

fn parser() -> Arc<ResumeParser> {
    let taxonomy = SkillTaxonomy::from_csv_path(Path::new("tests/fixtures/skills.csv")).unwrap();
    Arc::new(ResumeParser::new(Arc::new(RuleAnalyzer::new()), Arc::new(taxonomy)))
}

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text = InputManager::decode(path).await.unwrap();
    assert!(text.contains("Jane Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("B.TECH"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let path = Path::new("tests/fixtures/sample_resume.md");

    let text = InputManager::decode(path).await.unwrap();
    assert!(text.contains("Jane Doe"));
    assert!(text.contains("Kubernetes"));
    // Markup is gone
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
}

#[tokio::test]
async fn test_text_extraction_from_pdf() {
    let path = Path::new("tests/fixtures/sample_resume.pdf");

    let text = InputManager::decode(path).await.unwrap();
    assert!(text.contains("Jane Doe"));
    assert!(text.contains("B.TECH"));
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let path = Path::new("tests/fixtures/unsupported.xyz");

    let result = InputManager::decode(path).await;
    assert!(matches!(result, Err(ResumeParserError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let path = Path::new("tests/fixtures/nonexistent.txt");

    let result = InputManager::decode(path).await;
    assert!(matches!(result, Err(ResumeParserError::InvalidInput(_))));
}

#[test]
fn test_missing_taxonomy_is_fatal() {
    let err = SkillTaxonomy::from_csv_path(Path::new("tests/fixtures/missing.csv")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TaxonomyLoad);
    assert!(err.is_fatal());
}

#[tokio::test]
async fn test_parse_text_resume() {
    let result = parser()
        .parse_document(Path::new("tests/fixtures/sample_resume.txt"))
        .await
        .unwrap();

    assert_eq!(result.name.as_deref(), Some("Jane Doe"));
    assert_eq!(result.email.as_deref(), Some("jane.doe@example.com"));
    assert_eq!(result.phone.as_deref(), Some("2125550199"));
    for skill in ["Rust", "Python", "Docker", "Machine learning"] {
        assert!(result.skills.contains(skill), "missing skill {}", skill);
    }
    assert!(!result.skills.contains("Kubernetes"));
    assert_eq!(result.education.len(), 1);
    assert_eq!(result.education[0].degree, "B.TECH");
    assert_eq!(result.education[0].year.as_deref(), Some("2015"));
}

#[tokio::test]
async fn test_parse_markdown_resume() {
    let result = parser()
        .parse_document(Path::new("tests/fixtures/sample_resume.md"))
        .await
        .unwrap();

    assert_eq!(result.name.as_deref(), Some("Jane Doe"));
    assert_eq!(result.phone.as_deref(), Some("+12125550199"));
    assert!(result.skills.contains("Kubernetes"));
    assert_eq!(result.education[0].degree, "MS");
    assert_eq!(result.education[0].year.as_deref(), Some("2018"));
}

#[tokio::test]
async fn test_parse_pdf_resume() {
    let result = parser()
        .parse_document(Path::new("tests/fixtures/sample_resume.pdf"))
        .await
        .unwrap();

    assert_eq!(result.name.as_deref(), Some("Jane Doe"));
    assert!(result.skills.contains("Rust"));
    assert_eq!(result.education[0].degree, "B.TECH");
    assert_eq!(result.education[0].year.as_deref(), Some("2015"));
}

#[tokio::test]
async fn test_malformed_pdf_fails_only_that_document() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("a.txt");
    let broken = dir.path().join("b.pdf");
    std::fs::copy("tests/fixtures/sample_resume.txt", &good).unwrap();
    std::fs::write(&broken, "%PDF-1.4\nthis is not a real document").unwrap();

    let err = parser().parse_document(&broken).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DecodeFailure);

    let outcomes = BatchRunner::new(parser(), 2).run(vec![good, broken]).await;
    assert_eq!(outcomes.len(), 2);
    assert!(outcomes[0].parsed().is_some());
    assert_eq!(outcomes[1].failure().unwrap().kind, ErrorKind::DecodeFailure);
}

#[tokio::test]
async fn test_batch_continues_past_bad_documents() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::copy("tests/fixtures/sample_resume.txt", dir.path().join("a.txt")).unwrap();
    std::fs::copy("tests/fixtures/sample_resume.md", dir.path().join("b.md")).unwrap();
    std::fs::write(dir.path().join("c.rtf"), "{\\rtf1 Jane Doe}").unwrap();
    std::fs::create_dir(dir.path().join("nested")).unwrap();
    std::fs::copy("tests/fixtures/sample_resume.txt", dir.path().join("nested").join("d.txt")).unwrap();

    let flat = collect_documents(dir.path(), false).unwrap();
    assert_eq!(flat.len(), 3);

    let documents = collect_documents(dir.path(), true).unwrap();
    assert_eq!(documents.len(), 4);

    let runner = BatchRunner::new(parser(), 2);
    let outcomes = runner.run(documents).await;
    let report = BatchReport::new(outcomes, 0, 6);

    assert_eq!(report.summary.total, 4);
    assert_eq!(report.summary.parsed, 3);
    assert_eq!(report.summary.failed, 1);

    let failed = report
        .documents
        .iter()
        .find_map(|d| d.failure())
        .unwrap();
    assert_eq!(failed.kind, ErrorKind::UnsupportedFormat);

    let json = ReportGenerator::with_options(false, false, true)
        .generate_report(&report, &OutputFormat::Json)
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["summary"]["parsed"], 3);
}
