//! News articles and job openings shown by the listing screens.

use crate::listing::Searchable;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const EMBEDDED_CATALOG: &str = include_str!("../assets/catalog.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{kind} #{index} has a blank title")]
    BlankTitle { kind: &'static str, index: usize },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    pub date: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub summary: String,
}

impl Searchable for NewsArticle {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str()]
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JobOpening {
    pub title: String,
    pub location: String,
    #[serde(default)]
    pub department: String,
    #[serde(default = "default_employment_type")]
    pub employment_type: String,
}

impl Searchable for JobOpening {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.location.as_str()]
    }
}

fn default_employment_type() -> String {
    "Full-time".to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub news: Vec<NewsArticle>,
    #[serde(default)]
    pub jobs: Vec<JobOpening>,
}

impl Catalog {
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&json)?;
        log::info!(
            "event=catalog_load status=ok path={} news={} jobs={}",
            path.display(),
            catalog.news.len(),
            catalog.jobs.len()
        );
        Ok(catalog)
    }

    /// The catalog bundled with the binary.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if let Some(index) = self.news.iter().position(|a| a.title.trim().is_empty()) {
            return Err(CatalogError::BlankTitle { kind: "news article", index });
        }
        if let Some(index) = self.jobs.iter().position(|j| j.title.trim().is_empty()) {
            return Err(CatalogError::BlankTitle { kind: "job opening", index });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_catalog_parses() {
        let catalog = Catalog::embedded().unwrap();
        assert!(catalog.news.len() > 3);
        assert!(!catalog.jobs.is_empty());
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let catalog = Catalog::from_json("{}").unwrap();
        assert!(catalog.news.is_empty());
        assert!(catalog.jobs.is_empty());
    }

    #[test]
    fn employment_type_defaults_to_full_time() {
        let catalog =
            Catalog::from_json(r#"{"jobs":[{"title":"Branch Manager","location":"Thrissur"}]}"#)
                .unwrap();
        assert_eq!(catalog.jobs[0].employment_type, "Full-time");
        assert_eq!(catalog.jobs[0].search_fields(), vec!["Branch Manager", "Thrissur"]);
    }

    #[test]
    fn blank_title_is_rejected() {
        let err = Catalog::from_json(r#"{"news":[{"title":"  ","date":"2024-01-01"}]}"#)
            .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::BlankTitle { kind: "news article", index: 0 }
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            Catalog::from_json("{\"news\": ["),
            Err(CatalogError::Parse(_))
        ));
    }
}
