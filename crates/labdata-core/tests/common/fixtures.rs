//! Test fixture loading utilities

use std::path::PathBuf;

use labdata_core::LabDataConfig;

/// Get the path to a fixture file
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_fixtures")
        .join(name)
}

/// Load a fixture file as a string
#[allow(dead_code)]
pub fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name))
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", name))
}

/// Load the sample lab configuration
#[allow(dead_code)]
pub fn load_lab_config() -> LabDataConfig {
    LabDataConfig::from_file(&fixture_path("lab.yaml"))
        .unwrap_or_else(|e| panic!("Failed to load lab.yaml: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_path() {
        let path = fixture_path("bib/journal.bib");
        assert!(path.to_string_lossy().contains("test_fixtures"));
    }

    #[test]
    fn test_load_bib_fixture() {
        let content = load_fixture("bib/journal.bib");
        assert!(content.contains("@article"));
    }
}
