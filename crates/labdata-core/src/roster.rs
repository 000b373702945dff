//! People and project roster loaders
//!
//! Rosters are YAML lists of records:
//!
//! ```yaml
//! - id: "jsmith"
//!   name: "John Smith"
//!   aliases: ["J. Smith"]
//!   role: "pi"
//!   status: "current"
//! ```
//!
//! A missing roster file is not an error and yields an empty list.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::domain::{Person, Project, STATUS_ACTIVE, STATUS_CURRENT};
use crate::error::{LabDataError, Result};

/// YAML representation of a person
#[derive(Debug, Deserialize)]
struct PersonRecord {
    id: String,
    name: String,
    #[serde(default)]
    aliases: Vec<String>,
    role: Option<String>,
    status: Option<String>,
    photo: Option<String>,
    website: Option<String>,
    email: Option<String>,
    start_year: Option<i32>,
    end_year: Option<i32>,
    degree: Option<String>,
    thesis_title: Option<String>,
    current_position: Option<String>,
}

impl From<PersonRecord> for Person {
    fn from(record: PersonRecord) -> Self {
        Person {
            role: record.role,
            status: record.status.unwrap_or_else(|| STATUS_CURRENT.to_string()),
            photo: record.photo,
            website: record.website,
            email: record.email,
            start_year: record.start_year,
            end_year: record.end_year,
            degree: record.degree,
            thesis_title: record.thesis_title,
            current_position: record.current_position,
            aliases: record.aliases,
            ..Person::new(record.id, record.name)
        }
    }
}

/// YAML representation of a project
#[derive(Debug, Deserialize)]
struct ProjectRecord {
    id: String,
    title: String,
    description: Option<String>,
    website: Option<String>,
    status: Option<String>,
}

impl From<ProjectRecord> for Project {
    fn from(record: ProjectRecord) -> Self {
        Project {
            description: record.description,
            website: record.website,
            status: record.status.unwrap_or_else(|| STATUS_ACTIVE.to_string()),
            ..Project::new(record.id, record.title)
        }
    }
}

/// Load people in file order
pub fn load_people(path: &Path) -> Result<Vec<Person>> {
    let records: Vec<PersonRecord> = load_records(path)?;
    Ok(records.into_iter().map(Person::from).collect())
}

/// Load projects in file order
pub fn load_projects(path: &Path) -> Result<Vec<Project>> {
    let records: Vec<ProjectRecord> = load_records(path)?;
    Ok(records.into_iter().map(Project::from).collect())
}

fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        tracing::warn!(path = %path.display(), "Roster file not found, using an empty roster");
        return Ok(Vec::new());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| LabDataError::io(path, e))?;
    let parse_error = |message: String| LabDataError::RosterParse {
        path: path.to_path_buf(),
        message,
    };

    let document: serde_yaml::Value =
        serde_yaml::from_str(&contents).map_err(|e| parse_error(e.to_string()))?;
    match document {
        serde_yaml::Value::Null => Ok(Vec::new()),
        serde_yaml::Value::Sequence(_) => {
            serde_yaml::from_value(document).map_err(|e| parse_error(e.to_string()))
        }
        _ => {
            tracing::warn!(path = %path.display(), "Roster file is not a list, ignoring it");
            Ok(Vec::new())
        }
    }
}
