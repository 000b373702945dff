//! The assembled data set

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Person, Project, Publication};

/// An external co-author aggregated across publications
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collaborator {
    pub name: String,
    /// Distinct publications naming this author
    pub publication_count: usize,
    pub last_year: i32,
}

/// Lab metadata carried through from configuration
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LabInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Any other keys, with their values kept as written
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Publications, people, projects and collaborators with all
/// cross-references filled in
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LabData {
    pub publications: Vec<Publication>,
    pub people: Vec<Person>,
    pub projects: Vec<Project>,
    #[serde(default)]
    pub collaborators: Vec<Collaborator>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lab: Option<LabInfo>,
}

impl LabData {
    pub fn publication(&self, bib_id: &str) -> Option<&Publication> {
        self.publications.iter().find(|p| p.bib_id == bib_id)
    }

    pub fn person(&self, id: &str) -> Option<&Person> {
        self.people.iter().find(|p| p.id == id)
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }
}
