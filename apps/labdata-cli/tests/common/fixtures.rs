//! Test fixture loading utilities

use std::path::PathBuf;

/// The sample lab shared with labdata-core's integration tests
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../crates/labdata-core/test_fixtures")
        .join(name)
}

/// Write a configuration into `dir` pointing at the shared fixtures
#[allow(dead_code)]
pub fn write_config(dir: &std::path::Path, extra: &str) -> PathBuf {
    let config = format!(
        "bib_dir: {bib}\nbib_files:\n  - name: journal.bib\n    category: Journal Papers\n  - name: conference.bib\n    category: Conference Papers\n{extra}",
        bib = fixture_path("bib").display(),
    );
    let path = dir.join("lab.yaml");
    std::fs::write(&path, config)
        .unwrap_or_else(|e| panic!("Failed to write config {}: {}", path.display(), e));
    path
}
