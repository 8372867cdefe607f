//! Skill taxonomy loading
//!
//! A taxonomy is a table whose header row names the canonical skills; the
//! rows underneath are ignored.

use crate::error::{Result, ResumeParserError};
use log::info;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

/// Lower-cased canonical skill names, read-only once loaded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillTaxonomy {
    skills: HashSet<String>,
}

impl SkillTaxonomy {
    pub fn from_skills<I, S>(skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let skills = skills
            .into_iter()
            .map(|s| s.as_ref().trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        Self { skills }
    }

    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(|e| {
            ResumeParserError::TaxonomyLoad(format!("Cannot open '{}': {}", path.display(), e))
        })?;
        let taxonomy = Self::from_csv_reader(file).map_err(|e| match e {
            ResumeParserError::TaxonomyLoad(msg) => {
                ResumeParserError::TaxonomyLoad(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })?;

        info!("Loaded {} skills from {}", taxonomy.len(), path.display());
        Ok(taxonomy)
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|e| ResumeParserError::TaxonomyLoad(format!("unreadable header row: {}", e)))?;

        let taxonomy = Self::from_skills(headers.iter());
        if taxonomy.is_empty() {
            return Err(ResumeParserError::TaxonomyLoad(
                "header row names no skills".to_string(),
            ));
        }
        Ok(taxonomy)
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.skills.contains(skill)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}
