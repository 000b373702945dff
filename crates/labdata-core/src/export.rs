//! YAML and JSON export of the assembled data set
//!
//! Both formats serialize [`LabData`] directly: block-style YAML and
//! pretty-printed JSON, with non-ASCII text written verbatim.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::domain::LabData;
use crate::error::{LabDataError, Result, SerializationError};

/// Output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Yaml,
    Json,
}

impl ExportFormat {
    /// Infer the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown export format `{other}` (expected yaml or json)")),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

pub fn to_yaml_string(data: &LabData) -> Result<String> {
    serde_yaml::to_string(data).map_err(|e| SerializationError::from(e).into())
}

/// Two-space indented JSON
pub fn to_json_string(data: &LabData) -> Result<String> {
    serde_json::to_string_pretty(data).map_err(|e| SerializationError::from(e).into())
}

pub fn export_to_yaml(data: &LabData, path: &Path) -> Result<()> {
    write_output(path, &to_yaml_string(data)?)
}

pub fn export_to_json(data: &LabData, path: &Path) -> Result<()> {
    let mut json = to_json_string(data)?;
    json.push('\n');
    write_output(path, &json)
}

/// Write `data` to `path`, creating parent directories
pub fn export(data: &LabData, path: &Path, format: ExportFormat) -> Result<()> {
    match format {
        ExportFormat::Yaml => export_to_yaml(data, path),
        ExportFormat::Json => export_to_json(data, path),
    }?;
    tracing::info!(path = %path.display(), %format, "Exported lab data");
    Ok(())
}

fn write_output(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| LabDataError::io(parent, e))?;
    }
    std::fs::write(path, contents).map_err(|e| LabDataError::io(path, e))
}
