//! Author representation

use serde::{Deserialize, Serialize};

/// Whether a byline name has been linked to a roster person.
///
/// Serializes as a nullable `person_id`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum Resolution {
    #[default]
    Unresolved,
    Resolved {
        person_id: String,
    },
}

impl Resolution {
    pub fn person_id(&self) -> Option<&str> {
        match self {
            Self::Unresolved => None,
            Self::Resolved { person_id } => Some(person_id),
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }
}

impl From<Option<String>> for Resolution {
    fn from(person_id: Option<String>) -> Self {
        match person_id {
            Some(person_id) => Self::Resolved { person_id },
            None => Self::Unresolved,
        }
    }
}

impl From<Resolution> for Option<String> {
    fn from(resolution: Resolution) -> Self {
        match resolution {
            Resolution::Unresolved => None,
            Resolution::Resolved { person_id } => Some(person_id),
        }
    }
}

/// A name as it appears on a publication's byline
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Display form, e.g. "J. A. Smith<sup>1</sup>"
    pub name: String,
    #[serde(rename = "person_id", default)]
    pub resolution: Resolution,
}

impl Author {
    /// Create an unresolved author
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resolution: Resolution::Unresolved,
        }
    }

    /// Builder method to link the author to a person
    pub fn resolved_to(mut self, person_id: impl Into<String>) -> Self {
        self.resolution = Resolution::Resolved {
            person_id: person_id.into(),
        };
        self
    }

    pub fn person_id(&self) -> Option<&str> {
        self.resolution.person_id()
    }

    pub fn is_resolved(&self) -> bool {
        self.resolution.is_resolved()
    }
}
