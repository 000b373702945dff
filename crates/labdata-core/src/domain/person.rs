//! Lab member representation

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

pub const STATUS_CURRENT: &str = "current";
pub const STATUS_ALUMNI: &str = "alumni";

fn default_status() -> String {
    STATUS_CURRENT.to_string()
}

/// A lab member, current or alumni.
///
/// `publication_ids` and `publication_count` are back-links computed from
/// publications and never read from a roster.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Person {
    pub id: String,
    pub name: String,
    /// Alternate spellings used for matching
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub start_year: Option<i32>,

    // Alumni-only
    #[serde(default)]
    pub end_year: Option<i32>,
    #[serde(default)]
    pub degree: Option<String>,
    #[serde(default)]
    pub thesis_title: Option<String>,
    #[serde(default)]
    pub current_position: Option<String>,

    #[serde(default)]
    pub publication_count: usize,
    #[serde(default)]
    pub publication_ids: Vec<String>,
}

impl Person {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            aliases: Vec::new(),
            role: None,
            status: default_status(),
            photo: None,
            website: None,
            email: None,
            start_year: None,
            end_year: None,
            degree: None,
            thesis_title: None,
            current_position: None,
            publication_count: 0,
            publication_ids: Vec::new(),
        }
    }

    /// Builder method to add an alias
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Builder method to set the status
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn is_alumni(&self) -> bool {
        self.status == STATUS_ALUMNI
    }
}

/// Dictionary projection: unset optional fields are omitted, alumni fields
/// appear only for alumni and `publication_ids` only when non-empty.
impl Serialize for Person {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("id", &self.id)?;
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("role", &self.role)?;
        map.serialize_entry("status", &self.status)?;
        map.serialize_entry("website", &self.website)?;
        map.serialize_entry("publication_count", &self.publication_count)?;

        if let Some(photo) = &self.photo {
            map.serialize_entry("photo", photo)?;
        }
        if let Some(email) = &self.email {
            map.serialize_entry("email", email)?;
        }
        if let Some(start_year) = self.start_year {
            map.serialize_entry("start_year", &start_year)?;
        }

        if self.is_alumni() {
            if let Some(end_year) = self.end_year {
                map.serialize_entry("end_year", &end_year)?;
            }
            if let Some(degree) = &self.degree {
                map.serialize_entry("degree", degree)?;
            }
            if let Some(thesis_title) = &self.thesis_title {
                map.serialize_entry("thesis_title", thesis_title)?;
            }
            if let Some(current_position) = &self.current_position {
                map.serialize_entry("current_position", current_position)?;
            }
        }

        if !self.publication_ids.is_empty() {
            map.serialize_entry("publication_ids", &self.publication_ids)?;
        }

        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_current_member_projection() {
        let mut person = Person::new("jsmith", "John Smith").with_alias("J. Smith");
        person.role = Some("pi".to_string());
        person.end_year = Some(2030);

        let value = serde_json::to_value(&person).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "jsmith",
                "name": "John Smith",
                "role": "pi",
                "status": "current",
                "website": null,
                "publication_count": 0,
            })
        );
    }

    #[test]
    fn test_alumni_projection_includes_alumni_fields() {
        let mut person = Person::new("jdoe", "Jane Doe").with_status("alumni");
        person.end_year = Some(2023);
        person.degree = Some("PhD".to_string());
        person.start_year = Some(2018);
        person.publication_ids = vec!["doe2023planning".to_string()];
        person.publication_count = 1;

        let value = serde_json::to_value(&person).unwrap();
        assert_eq!(value["end_year"], 2023);
        assert_eq!(value["degree"], "PhD");
        assert_eq!(value["start_year"], 2018);
        assert_eq!(value["publication_ids"], json!(["doe2023planning"]));
        assert!(value.get("thesis_title").is_none());
    }

    #[test]
    fn test_deserialize_defaults() {
        let person: Person = serde_yaml::from_str("id: x\nname: X Y\n").unwrap();
        assert_eq!(person.status, STATUS_CURRENT);
        assert!(person.aliases.is_empty());
        assert_eq!(person.publication_count, 0);
    }
}
