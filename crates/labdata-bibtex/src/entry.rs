//! Raw BibTeX record types

use serde::{Deserialize, Serialize};

/// Bibliographic entry type.
///
/// Only the types that drive venue formatting get their own variant; every
/// other tag is carried verbatim (lowercased) in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum EntryType {
    Article,
    InProceedings,
    PhdThesis,
    MastersThesis,
    TechReport,
    Misc,
    Other(String),
}

impl EntryType {
    /// Parse an entry type tag (case-insensitive)
    pub fn parse(tag: &str) -> Self {
        let lower = tag.trim().to_lowercase();
        match lower.as_str() {
            "article" => Self::Article,
            "inproceedings" | "conference" => Self::InProceedings,
            "phdthesis" => Self::PhdThesis,
            "mastersthesis" => Self::MastersThesis,
            "techreport" => Self::TechReport,
            "misc" => Self::Misc,
            _ => Self::Other(lower),
        }
    }

    /// Canonical lowercase tag
    pub fn as_str(&self) -> &str {
        match self {
            Self::Article => "article",
            Self::InProceedings => "inproceedings",
            Self::PhdThesis => "phdthesis",
            Self::MastersThesis => "mastersthesis",
            Self::TechReport => "techreport",
            Self::Misc => "misc",
            Self::Other(tag) => tag,
        }
    }
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for EntryType {
    fn from(tag: String) -> Self {
        Self::parse(&tag)
    }
}

impl From<EntryType> for String {
    fn from(entry_type: EntryType) -> Self {
        entry_type.as_str().to_string()
    }
}

/// A single field (key-value pair). Keys are stored lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BibField {
    pub key: String,
    pub value: String,
}

/// A parsed BibTeX record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BibEntry {
    pub cite_key: String,
    pub entry_type: EntryType,
    pub fields: Vec<BibField>,
    /// 1-based line of the `@` that opened the record
    pub line: u32,
}

impl BibEntry {
    pub fn new(cite_key: impl Into<String>, entry_type: EntryType) -> Self {
        Self {
            cite_key: cite_key.into(),
            entry_type,
            fields: Vec::new(),
            line: 0,
        }
    }

    /// Add a field. A repeated key replaces the earlier value in place.
    pub fn add_field(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into().to_lowercase();
        let value = value.into();
        match self.fields.iter_mut().find(|f| f.key == key) {
            Some(existing) => existing.value = value,
            None => self.fields.push(BibField { key, value }),
        }
    }

    /// Builder form of [`BibEntry::add_field`]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_field(key, value);
        self
    }

    /// Get a field value by key (case-insensitive)
    pub fn get(&self, key: &str) -> Option<&str> {
        let key_lower = key.to_lowercase();
        self.fields
            .iter()
            .find(|f| f.key == key_lower)
            .map(|f| f.value.as_str())
    }

    /// Get a field value, treating blank values as absent
    pub fn get_nonblank(&self, key: &str) -> Option<&str> {
        self.get(key).map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn title(&self) -> Option<&str> {
        self.get("title")
    }

    pub fn author(&self) -> Option<&str> {
        self.get("author")
    }

    pub fn year(&self) -> Option<&str> {
        self.get("year")
    }
}
