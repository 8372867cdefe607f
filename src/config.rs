//! Configuration management for the resume parser

use crate::error::{Result, ResumeParserError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub taxonomy: TaxonomyConfig,
    pub extraction: ExtractionConfig,
    pub batch: BatchConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaxonomyConfig {
    /// Skill table used when `--skills` is not given
    pub skills_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    pub education_keywords: Vec<String>,
    pub education_matches: EducationMatchPolicy,
}

/// How repeated degree keywords across sentences are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EducationMatchPolicy {
    /// One entry per keyword; the last sentence it appears in supplies the year
    #[default]
    LastPerKeyword,
    /// One entry per matching sentence, in document order
    AllOccurrences,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    pub max_concurrency: usize,
    pub recursive: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
    pub pretty_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

pub const DEFAULT_EDUCATION_KEYWORDS: &[&str] = &[
    "BE", "B.E.", "B.E", "BS", "B.S",
    "ME", "M.E", "M.E.", "MS", "M.S",
    "BTECH", "B.TECH", "M.TECH", "MTECH",
    "SSC", "HSC", "CBSE", "ICSE", "X", "XII",
    "B.Sc", "B.SC",
];

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            education_keywords: DEFAULT_EDUCATION_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
            education_matches: EducationMatchPolicy::default(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            taxonomy: TaxonomyConfig::default(),
            extraction: ExtractionConfig::default(),
            batch: BatchConfig {
                max_concurrency: 4,
                recursive: false,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                color_output: true,
                pretty_json: true,
            },
        }
    }
}

impl Config {
    /// Load the user configuration, writing the defaults on first use
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    /// Load an explicit configuration file; a missing file is an error
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ResumeParserError::Configuration(format!(
                "Failed to read config '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| ResumeParserError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ResumeParserError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-parser")
            .join("config.toml")
    }

    fn validate(&self) -> Result<()> {
        if self.batch.max_concurrency == 0 {
            return Err(ResumeParserError::Configuration(
                "batch.max_concurrency must be at least 1".to_string(),
            ));
        }
        if self.extraction.education_keywords.is_empty() {
            return Err(ResumeParserError::Configuration(
                "extraction.education_keywords must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_round_trip_through_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.extraction.education_matches = EducationMatchPolicy::AllOccurrences;
        config.batch.max_concurrency = 8;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.extraction.education_matches, EducationMatchPolicy::AllOccurrences);
        assert_eq!(loaded.batch.max_concurrency, 8);
        assert_eq!(loaded.extraction.education_keywords.len(), DEFAULT_EDUCATION_KEYWORDS.len());
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let dir = tempdir().unwrap();
        let result = Config::load_from(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ResumeParserError::Configuration(_))));
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.batch.max_concurrency = 0;
        config.save_to(&path).unwrap();

        assert!(Config::load_from(&path).is_err());
    }
}
