//! Publication representation

use labdata_bibtex::EntryType;
use serde::{Deserialize, Serialize};

use super::Author;
use crate::text::format_authors_string;

/// One formatted bibliographic entry
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    pub bib_id: String,
    /// Markdown
    pub title: String,
    /// Byline order
    pub authors: Vec<Author>,
    /// 0 when absent or unparseable
    pub year: i32,
    pub venue: String,
    pub category: String,
    pub entry_type: EntryType,
    #[serde(rename = "abstract", default)]
    pub abstract_text: Option<String>,
    /// Markdown
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub pdf_url: Option<String>,
    #[serde(default)]
    pub doi_url: Option<String>,
    #[serde(default)]
    pub arxiv_url: Option<String>,
    /// Never set together with `video_url`
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    /// Source order, duplicates kept
    #[serde(default)]
    pub project_ids: Vec<String>,
}

impl Publication {
    /// Create a publication with only the required fields
    pub fn new(bib_id: impl Into<String>, title: impl Into<String>, year: i32) -> Self {
        Self {
            bib_id: bib_id.into(),
            title: title.into(),
            authors: Vec::new(),
            year,
            venue: year.to_string(),
            category: String::new(),
            entry_type: EntryType::Misc,
            abstract_text: None,
            note: None,
            pdf_url: None,
            doi_url: None,
            arxiv_url: None,
            url: None,
            video_url: None,
            project_ids: Vec::new(),
        }
    }

    /// Builder method to set the byline
    pub fn with_authors(mut self, authors: Vec<Author>) -> Self {
        self.authors = authors;
        self
    }

    /// Builder method to set the category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Builder method to tag projects
    pub fn with_projects<I, S>(mut self, project_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.project_ids = project_ids.into_iter().map(Into::into).collect();
        self
    }

    /// Byline formatted for display, e.g. "A, B, and C"
    pub fn authors_string(&self) -> String {
        format_authors_string(&self.authors)
    }

    /// Person ids of resolved authors, in byline order
    pub fn person_ids(&self) -> impl Iterator<Item = &str> {
        self.authors.iter().filter_map(Author::person_id)
    }
}
