//! Text extraction from the supported document containers

use crate::error::{Result, ResumeParserError};
use pulldown_cmark::{Event, Parser, Tag};
use quick_xml::events::Event as XmlEvent;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use std::path::Path;
use tokio::fs;
use tokio::task;

/// Path of the main body part inside a WordprocessingML package
const DOCX_BODY_PART: &str = "word/document.xml";

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;
        let decoded = task::spawn_blocking(move || Self::extract_from_bytes(&bytes))
            .await
            .map_err(|e| {
                ResumeParserError::DecodeFailure(format!(
                    "PDF decoder aborted on '{}': {}",
                    path.display(),
                    e
                ))
            })?;

        decoded.map_err(|e| match e {
            ResumeParserError::DecodeFailure(msg) => ResumeParserError::DecodeFailure(format!(
                "Failed to extract text from PDF '{}': {}",
                path.display(),
                msg
            )),
            other => other,
        })
    }
}

impl PdfExtractor {
    /// Blocking; `pdf_extract` may panic on malformed input, so callers run
    /// this on a blocking task.
    pub fn extract_from_bytes(bytes: &[u8]) -> Result<String> {
        pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| ResumeParserError::DecodeFailure(e.to_string()))
    }
}

pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;
        Self::extract_from_bytes(&bytes).map_err(|e| match e {
            ResumeParserError::DecodeFailure(msg) => ResumeParserError::DecodeFailure(format!(
                "Failed to extract text from DOCX '{}': {}",
                path.display(),
                msg
            )),
            other => other,
        })
    }
}

impl DocxExtractor {
    /// Unpack the body part and flatten it to text: one line per paragraph,
    /// `w:tab` as a tab character.
    pub fn extract_from_bytes(bytes: &[u8]) -> Result<String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| ResumeParserError::DecodeFailure(format!("not a zip container: {}", e)))?;

        let mut xml = String::new();
        archive
            .by_name(DOCX_BODY_PART)
            .map_err(|e| ResumeParserError::DecodeFailure(format!("{} missing: {}", DOCX_BODY_PART, e)))?
            .read_to_string(&mut xml)?;

        Self::body_text(&xml)
    }

    fn body_text(xml: &str) -> Result<String> {
        let mut reader = Reader::from_str(xml);
        let mut text = String::new();
        let mut in_run_text = false;
        let mut in_tab_stops = false;

        loop {
            match reader.read_event() {
                Ok(XmlEvent::Start(e)) => match e.name().as_ref() {
                    b"w:t" => in_run_text = true,
                    b"w:tabs" => in_tab_stops = true,
                    _ => {}
                },
                Ok(XmlEvent::End(e)) => match e.name().as_ref() {
                    b"w:t" => in_run_text = false,
                    b"w:tabs" => in_tab_stops = false,
                    b"w:p" => text.push('\n'),
                    _ => {}
                },
                Ok(XmlEvent::Empty(e)) => match e.name().as_ref() {
                    b"w:tab" if !in_tab_stops => text.push('\t'),
                    b"w:br" | b"w:cr" => text.push('\n'),
                    _ => {}
                },
                Ok(XmlEvent::Text(t)) if in_run_text => {
                    let unescaped = t.unescape().map_err(|e| {
                        ResumeParserError::DecodeFailure(format!("bad text node: {}", e))
                    })?;
                    text.push_str(&unescaped);
                }
                Ok(XmlEvent::Eof) => break,
                Err(e) => {
                    return Err(ResumeParserError::DecodeFailure(format!(
                        "malformed document XML at byte {}: {}",
                        reader.buffer_position(),
                        e
                    )))
                }
                _ => {}
            }
        }

        Ok(text)
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path).await?;
        Ok(content)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path).await?;
        Ok(Self::markdown_to_text(&markdown_content))
    }
}

impl MarkdownExtractor {
    pub fn markdown_to_text(markdown: &str) -> String {
        let mut text = String::new();

        for event in Parser::new(markdown) {
            match event {
                Event::Text(t) | Event::Code(t) => text.push_str(&t),
                Event::SoftBreak | Event::HardBreak => text.push('\n'),
                Event::End(Tag::Paragraph)
                | Event::End(Tag::Heading(..))
                | Event::End(Tag::Item)
                | Event::End(Tag::CodeBlock(_)) => text.push('\n'),
                _ => {}
            }
        }

        text
    }
}
