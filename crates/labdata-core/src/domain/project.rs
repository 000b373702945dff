//! Research project representation

use serde::{Deserialize, Serialize};

pub const STATUS_ACTIVE: &str = "active";

fn default_status() -> String {
    STATUS_ACTIVE.to_string()
}

/// A research project or theme
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,

    /// Publications tagging this project
    #[serde(default)]
    pub publication_ids: Vec<String>,
    /// Sorted union of resolved authors on those publications
    #[serde(default)]
    pub people_ids: Vec<String>,
}

impl Project {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            website: None,
            status: default_status(),
            publication_ids: Vec::new(),
            people_ids: Vec::new(),
        }
    }
}
