//! Input manager for handling different file types

use crate::error::{Result, ResumeParserError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{
    DocxExtractor, MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor,
};
use log::debug;
use std::path::{Path, PathBuf};

/// Routes a document to the decoder for its file type
pub struct InputManager;

impl InputManager {
    /// Decode one document to raw text
    pub async fn decode(path: &Path) -> Result<String> {
        // Unsupported extensions are reported before touching the filesystem.
        let file_type = FileType::from_path(path);
        if !file_type.is_supported() {
            return Err(unsupported(path));
        }

        if !path.is_file() {
            return Err(ResumeParserError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let text = match file_type {
            FileType::Pdf => {
                debug!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            }
            FileType::Docx => {
                debug!("Extracting text from DOCX: {}", path.display());
                DocxExtractor.extract(path).await?
            }
            FileType::Text => {
                debug!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                debug!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            FileType::Unknown => return Err(unsupported(path)),
        };

        Ok(text)
    }
}

fn unsupported(path: &Path) -> ResumeParserError {
    ResumeParserError::UnsupportedFormat(format!("Unsupported file type for: {}", path.display()))
}

/// List the documents under `path`: the file itself, or the regular files of
/// a directory sorted by path. Unsupported files are kept so the batch can
/// report them.
pub fn collect_documents(path: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        return Err(ResumeParserError::InvalidInput(format!(
            "Path does not exist: {}",
            path.display()
        )));
    }

    let mut files = Vec::new();
    let mut pending = vec![path.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in std::fs::read_dir(&dir)? {
            let entry_path = entry?.path();
            if entry_path.is_file() {
                files.push(entry_path);
            } else if recursive && entry_path.is_dir() {
                pending.push(entry_path);
            }
        }
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_collect_single_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("cv.txt");
        std::fs::write(&file, "Jane Doe").unwrap();

        assert_eq!(collect_documents(&file, false).unwrap(), vec![file]);
    }

    #[test]
    fn test_collect_directory_sorted_and_flat_by_default() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("b.pdf"), "").unwrap();
        std::fs::write(dir.path().join("a.docx"), "").unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested").join("c.txt"), "").unwrap();

        let flat = collect_documents(dir.path(), false).unwrap();
        let names: Vec<_> = flat
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.docx", "b.pdf"]);

        let deep = collect_documents(dir.path(), true).unwrap();
        assert_eq!(deep.len(), 3);
    }

    #[tokio::test]
    async fn test_decode_reports_format_before_existence() {
        let dir = tempdir().unwrap();
        let result = InputManager::decode(&dir.path().join("missing.xyz")).await;
        assert!(matches!(result, Err(ResumeParserError::UnsupportedFormat(_))));

        let result = InputManager::decode(&dir.path().join("missing.txt")).await;
        assert!(matches!(result, Err(ResumeParserError::InvalidInput(_))));
    }

    #[test]
    fn test_collect_missing_path() {
        let dir = tempdir().unwrap();
        assert!(collect_documents(&dir.path().join("nope"), false).is_err());
    }
}
