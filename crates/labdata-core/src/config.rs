//! Configuration for labdata
//!
//! A single file (`lab.yaml`, or `lab.toml`) names the BibTeX sources, the
//! roster files, the PDF location and resolver tuning:
//!
//! ```yaml
//! lab:
//!   name: "My Lab"
//!   website: "https://mylab.edu"
//!
//! bib_dir: "data/bib"
//! bib_files:
//!   - name: "journal.bib"
//!     category: "Journal Papers"
//!   - name: "conference.bib"
//!     category: "Conference Papers"
//!
//! pdf_base_url: "https://mylab.edu/pdfs"
//! people_file: "data/people.yaml"
//! projects_file: "data/projects.yaml"
//!
//! resolver:
//!   fuzzy_threshold: 0.85
//!   similarity: indel
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::LabInfo;
use crate::error::{LabDataError, Result};
use crate::formatter::EntryFormatter;
use crate::resolver::SimilarityMetric;

/// Default minimum similarity for a fuzzy author match
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.85;

/// One BibTeX source file and the category label its entries receive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BibFile {
    pub name: String,
    pub category: String,
}

impl BibFile {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
        }
    }
}

/// Author resolution tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Minimum ratio for a fuzzy match, in `[0, 1]`
    pub fuzzy_threshold: f64,
    pub similarity: SimilarityMetric,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            similarity: SimilarityMetric::default(),
        }
    }
}

/// Pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabDataConfig {
    /// Directory holding the BibTeX files
    pub bib_dir: PathBuf,
    /// Sources in processing order
    pub bib_files: Vec<BibFile>,
    /// URL or local directory holding `<bib_id>.pdf` files, emitted as written
    #[serde(default)]
    pub pdf_base_url: Option<String>,
    /// A local `pdf_base_url` anchored at the config file's directory, used
    /// only to check which PDFs exist
    #[serde(skip)]
    pub pdf_dir: Option<PathBuf>,
    #[serde(default)]
    pub people_file: Option<PathBuf>,
    #[serde(default)]
    pub projects_file: Option<PathBuf>,
    #[serde(default)]
    pub lab: Option<LabInfo>,
    #[serde(default)]
    pub resolver: ResolverConfig,
}

impl Default for LabDataConfig {
    fn default() -> Self {
        Self {
            bib_dir: PathBuf::from("."),
            bib_files: Vec::new(),
            pdf_base_url: None,
            pdf_dir: None,
            people_file: None,
            projects_file: None,
            lab: None,
            resolver: ResolverConfig::default(),
        }
    }
}

impl LabDataConfig {
    /// Create a configuration for the given sources
    pub fn new(bib_dir: impl Into<PathBuf>, bib_files: Vec<BibFile>) -> Self {
        Self {
            bib_dir: bib_dir.into(),
            bib_files,
            ..Self::default()
        }
    }

    /// Load from a YAML string
    pub fn from_yaml(yaml_str: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml_str)
    }

    /// Load from a TOML string
    pub fn from_toml(toml_str: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Load, resolve relative paths against the file's directory, and validate.
    ///
    /// `.toml` files are read as TOML, everything else as YAML.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(LabDataError::ConfigNotFound(path.to_path_buf()));
        }

        let contents = std::fs::read_to_string(path).map_err(|e| LabDataError::io(path, e))?;
        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let parsed = if is_toml {
            Self::from_toml(&contents).map_err(|e| e.to_string())
        } else {
            Self::from_yaml(&contents).map_err(|e| e.to_string())
        };
        let mut config = parsed.map_err(|message| LabDataError::ConfigParse {
            path: path.to_path_buf(),
            message,
        })?;

        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        config.validate()?;

        tracing::debug!(path = %path.display(), sources = config.bib_files.len(), "Loaded configuration");
        Ok(config)
    }

    /// Anchor relative paths at `base`.
    ///
    /// `pdf_base_url` itself is never rewritten; a local one gets an
    /// anchored `pdf_dir` for existence checks.
    pub fn resolve_paths(&mut self, base: &Path) {
        self.bib_dir = anchor(base, &self.bib_dir);
        if let Some(people) = &self.people_file {
            self.people_file = Some(anchor(base, people));
        }
        if let Some(projects) = &self.projects_file {
            self.projects_file = Some(anchor(base, projects));
        }
        self.pdf_dir = self
            .pdf_base_url
            .as_deref()
            .map(str::trim)
            .filter(|pdf_base| !pdf_base.is_empty() && !is_remote(pdf_base))
            .map(|pdf_base| anchor(base, Path::new(pdf_base)));
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.bib_files.is_empty() {
            return Err(LabDataError::InvalidConfig(
                "bib_files must name at least one source".to_string(),
            ));
        }

        let threshold = self.resolver.fuzzy_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(LabDataError::InvalidConfig(format!(
                "resolver.fuzzy_threshold must be between 0.0 and 1.0, got {threshold}"
            )));
        }

        Ok(())
    }

    /// Formatter carrying the PDF settings
    pub fn entry_formatter(&self) -> EntryFormatter {
        let formatter = EntryFormatter::new(self.pdf_base_url.clone());
        match &self.pdf_dir {
            Some(dir) => formatter.with_pdf_dir(dir),
            None => formatter,
        }
    }

    /// Path of one source file
    pub fn bib_path(&self, bib_file: &BibFile) -> PathBuf {
        self.bib_dir.join(&bib_file.name)
    }

    /// Categories in source order, first occurrence only
    pub fn category_order(&self) -> Vec<&str> {
        let mut order: Vec<&str> = Vec::new();
        for bib_file in &self.bib_files {
            if !order.contains(&bib_file.category.as_str()) {
                order.push(&bib_file.category);
            }
        }
        order
    }
}

fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

fn anchor(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const YAML: &str = r#"
lab:
  name: "Personal Robotics Lab"
  website: "https://prl.example.edu"
bib_dir: "bib"
bib_files:
  - name: "journal.bib"
    category: "Journal Papers"
  - name: "conference.bib"
    category: "Conference Papers"
  - name: "workshop.bib"
    category: "Journal Papers"
pdf_base_url: "pdfs"
people_file: "people.yaml"
"#;

    #[test]
    fn test_from_yaml_defaults() {
        let config = LabDataConfig::from_yaml(YAML).unwrap();
        assert_eq!(config.bib_files.len(), 3);
        assert_eq!(config.bib_files[0], BibFile::new("journal.bib", "Journal Papers"));
        assert_eq!(config.projects_file, None);
        assert_eq!(config.resolver, ResolverConfig::default());
        assert_eq!(config.resolver.fuzzy_threshold, DEFAULT_FUZZY_THRESHOLD);
        assert_eq!(
            config.lab.as_ref().and_then(|l| l.name.as_deref()),
            Some("Personal Robotics Lab")
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_category_order_dedups() {
        let config = LabDataConfig::from_yaml(YAML).unwrap();
        assert_eq!(
            config.category_order(),
            vec!["Journal Papers", "Conference Papers"]
        );
    }

    #[test]
    fn test_from_toml() {
        let toml_str = r#"
bib_dir = "bib"
pdf_base_url = "https://prl.example.edu/pdfs"

[[bib_files]]
name = "journal.bib"
category = "Journal Papers"

[resolver]
fuzzy_threshold = 0.9
similarity = "levenshtein"
"#;
        let config = LabDataConfig::from_toml(toml_str).unwrap();
        assert_eq!(config.resolver.fuzzy_threshold, 0.9);
        assert_eq!(config.resolver.similarity, SimilarityMetric::Levenshtein);
    }

    #[test]
    fn test_from_file_resolves_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lab.yaml");
        fs::write(&path, YAML).unwrap();

        let config = LabDataConfig::from_file(&path).unwrap();
        assert_eq!(config.bib_dir, dir.path().join("bib"));
        assert_eq!(config.people_file, Some(dir.path().join("people.yaml")));
        assert_eq!(config.pdf_base_url.as_deref(), Some("pdfs"));
        assert_eq!(config.pdf_dir, Some(dir.path().join("pdfs")));
        assert_eq!(
            config.bib_path(&config.bib_files[1]),
            dir.path().join("bib").join("conference.bib")
        );
    }

    #[test]
    fn test_remote_pdf_base_untouched() {
        let mut config = LabDataConfig::new("bib", vec![BibFile::new("a.bib", "A")]);
        config.pdf_base_url = Some("https://prl.example.edu/pdfs".to_string());
        config.resolve_paths(Path::new("/srv/site"));
        assert_eq!(
            config.pdf_base_url.as_deref(),
            Some("https://prl.example.edu/pdfs")
        );
        assert_eq!(config.pdf_dir, None);
        assert_eq!(config.bib_dir, PathBuf::from("/srv/site/bib"));
    }

    #[test]
    fn test_missing_file() {
        let err = LabDataConfig::from_file(Path::new("/nonexistent/lab.yaml")).unwrap_err();
        assert!(matches!(err, LabDataError::ConfigNotFound(_)));
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lab.yaml");
        fs::write(&path, "bib_files: [unclosed").unwrap();

        let err = LabDataConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, LabDataError::ConfigParse { .. }));
        assert!(err.is_input_error());
    }

    #[test]
    fn test_missing_bib_dir_is_parse_error() {
        assert!(LabDataConfig::from_yaml("bib_files: []").is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = LabDataConfig::default();
        assert!(config.validate().is_err());

        config.bib_files.push(BibFile::new("a.bib", "A"));
        config.resolver.fuzzy_threshold = 1.5;
        assert!(matches!(
            config.validate(),
            Err(LabDataError::InvalidConfig(_))
        ));

        config.resolver.fuzzy_threshold = f64::NAN;
        assert!(config.validate().is_err());
    }
}
