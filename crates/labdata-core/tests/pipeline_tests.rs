//! End-to-end pipeline tests over the sample lab in `test_fixtures/`

mod common;

use common::fixtures::{fixture_path, load_lab_config};
use labdata_core::{
    assemble, assemble_with_diagnostics, export, group_by_year_and_category,
    publications_for_project, resolve_projects, Collaborator, EntryType, ExportFormat, LabData,
    LabDataConfig, LabDataError,
};

fn person_ids<'a>(data: &'a LabData, bib_id: &str) -> Vec<Option<&'a str>> {
    data.publication(bib_id)
        .unwrap()
        .authors
        .iter()
        .map(|a| a.person_id())
        .collect()
}

// === Ingestion and formatting ===

#[test]
fn test_publications_sorted_newest_first() {
    let data = assemble(&load_lab_config()).unwrap();
    let ids: Vec<&str> = data.publications.iter().map(|p| p.bib_id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["smith2024feeding", "smith2023navigation", "jonsson2022grasping"]
    );
}

#[test]
fn test_article_fields() {
    let data = assemble(&load_lab_config()).unwrap();
    let p = data.publication("smith2024feeding").unwrap();

    assert_eq!(p.title, "Robot-Assisted Feeding in Zürich Care Homes");
    assert_eq!(p.entry_type, EntryType::Article);
    assert_eq!(p.category, "Journal Papers");
    assert_eq!(p.venue, "*IEEE Robotics and Automation Letters*, 9(4), 2024");
    assert_eq!(p.doi_url.as_deref(), Some("https://doi.org/10.1109/LRA.2024.0001"));
    assert_eq!(
        p.pdf_url.as_deref(),
        Some("https://prl.example.edu/pdfs/smith2024feeding.pdf")
    );
    assert_eq!(
        p.video_url.as_deref(),
        Some("https://www.youtube.com/watch?v=abc123")
    );
    assert_eq!(p.url, None);
}

#[test]
fn test_local_pdf_base_emitted_as_configured() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("pdfs")).unwrap();
    std::fs::write(dir.path().join("pdfs/smith2024feeding.pdf"), b"%PDF").unwrap();
    let config_path = dir.path().join("lab.yaml");
    std::fs::write(
        &config_path,
        format!(
            "bib_dir: {}\nbib_files:\n  - name: journal.bib\n    category: Journal Papers\npdf_base_url: pdfs\n",
            fixture_path("bib").display()
        ),
    )
    .unwrap();

    let config = LabDataConfig::from_file(&config_path).unwrap();
    let data = assemble(&config).unwrap();

    assert_eq!(
        data.publication("smith2024feeding").unwrap().pdf_url.as_deref(),
        Some("pdfs/smith2024feeding.pdf")
    );
    assert!(data
        .publications
        .iter()
        .filter(|p| p.bib_id != "smith2024feeding")
        .all(|p| p.pdf_url.is_none()));
}

#[test]
fn test_inproceedings_fields() {
    let data = assemble(&load_lab_config()).unwrap();
    let p = data.publication("smith2023navigation").unwrap();

    assert_eq!(p.title, "Learning to Navigate *Dense* Crowds");
    assert_eq!(
        p.venue,
        "*Proceedings of the IEEE International Conference on Robotics and Automation*, 2023"
    );
    assert_eq!(p.note.as_deref(), Some("**Best Paper Award**"));
    assert_eq!(p.project_ids, vec!["robotfeeding", "navigation"]);
    assert_eq!(p.authors_string(), "J. A. Smith and M. Chen");
}

#[test]
fn test_math_and_arxiv() {
    let data = assemble(&load_lab_config()).unwrap();
    let p = data.publication("jonsson2022grasping").unwrap();

    assert_eq!(p.title, "Grasping in Clutter with $\\alpha$-Shapes");
    assert_eq!(p.arxiv_url.as_deref(), Some("https://arxiv.org/abs/2201.01234"));
    assert_eq!(p.url.as_deref(), Some("https://example.org/grasping"));
    assert_eq!(p.video_url, None);
}

// === Resolution ===

#[test]
fn test_exact_and_fuzzy_resolve_to_same_person() {
    let result = assemble_with_diagnostics(&load_lab_config()).unwrap();
    let data = &result.data;

    assert_eq!(person_ids(data, "smith2024feeding"), vec![Some("jsmith")]);
    assert_eq!(
        person_ids(data, "smith2023navigation"),
        vec![Some("jsmith"), Some("mchen")]
    );
    assert_eq!(person_ids(data, "jonsson2022grasping"), vec![None]);

    let resolved_to_smith = data
        .publications
        .iter()
        .flat_map(|p| p.person_ids())
        .filter(|id| *id == "jsmith")
        .count();
    assert_eq!(resolved_to_smith, 2);

    let jsmith = data.person("jsmith").unwrap();
    assert_eq!(jsmith.publication_count, 2);
    assert_eq!(
        jsmith.publication_ids,
        vec!["smith2024feeding", "smith2023navigation"]
    );
    assert_eq!(data.person("jdoe").unwrap().publication_count, 0);

    assert_eq!(result.diagnostics.unresolved_authors, vec!["E. Jönsson"]);
    assert_eq!(
        data.collaborators,
        vec![Collaborator {
            name: "E. Jönsson".to_string(),
            publication_count: 1,
            last_year: 2022,
        }]
    );
}

#[test]
fn test_unknown_project_is_reported_and_kept() {
    let result = assemble_with_diagnostics(&load_lab_config()).unwrap();
    let data = &result.data;

    assert_eq!(result.diagnostics.unknown_projects, vec!["ghost"]);
    assert_eq!(
        data.publication("jonsson2022grasping").unwrap().project_ids,
        vec!["ghost"]
    );
    assert!(data
        .projects
        .iter()
        .all(|p| !p.publication_ids.contains(&"jonsson2022grasping".to_string())));
    assert_eq!(
        resolve_projects(&data.publications, &data.projects),
        vec!["ghost"]
    );
}

#[test]
fn test_project_backlinks() {
    let data = assemble(&load_lab_config()).unwrap();

    let feeding = data.project("robotfeeding").unwrap();
    assert_eq!(
        feeding.publication_ids,
        vec!["smith2024feeding", "smith2023navigation"]
    );
    assert_eq!(feeding.people_ids, vec!["jsmith", "mchen"]);

    let navigation = data.project("navigation").unwrap();
    assert_eq!(navigation.people_ids, vec!["jsmith", "mchen"]);

    let archive = data.project("archive").unwrap();
    assert_eq!(archive.status, "archived");
    assert!(archive.publication_ids.is_empty());

    let linked: Vec<&str> = publications_for_project(&data, "robotfeeding")
        .iter()
        .map(|p| p.bib_id.as_str())
        .collect();
    assert_eq!(linked, vec!["smith2024feeding", "smith2023navigation"]);
}

#[test]
fn test_clean_diagnostics_otherwise() {
    let result = assemble_with_diagnostics(&load_lab_config()).unwrap();
    assert!(result.diagnostics.ambiguous_aliases.is_empty());
    assert!(result.diagnostics.duplicate_bib_ids.is_empty());
    assert!(!result.diagnostics.is_clean());
}

#[test]
fn test_lab_metadata_carried_through() {
    let data = assemble(&load_lab_config()).unwrap();
    let lab = data.lab.unwrap();
    assert_eq!(lab.name.as_deref(), Some("Personal Robotics Lab"));
    assert_eq!(
        lab.extra.get("affiliation").and_then(|v| v.as_str()),
        Some("Example University")
    );
    assert_eq!(lab.extra.get("founded").and_then(|v| v.as_u64()), Some(2010));
}

#[test]
fn test_missing_rosters_resolve_nothing_and_report_nothing() {
    let mut config = load_lab_config();
    config.people_file = Some(fixture_path("no-such-people.yaml"));
    config.projects_file = None;

    let result = assemble_with_diagnostics(&config).unwrap();
    assert!(result.data.people.is_empty());
    assert!(result.diagnostics.unresolved_authors.is_empty());
    assert_eq!(result.diagnostics.unknown_projects, vec!["ghost", "navigation", "robotfeeding"]);
    assert!(result
        .data
        .publications
        .iter()
        .all(|p| p.authors.iter().all(|a| !a.is_resolved())));
}

#[test]
fn test_missing_source_fails() {
    let mut config = load_lab_config();
    config.bib_files[1].name = "missing.bib".to_string();

    let err = assemble(&config).unwrap_err();
    assert!(matches!(err, LabDataError::Io { .. }));
}

#[test]
fn test_grouping_by_configured_category_order() {
    let config = load_lab_config();
    let data = assemble(&config).unwrap();

    let groups = group_by_year_and_category(&data.publications, &config.category_order());
    let years: Vec<i32> = groups.iter().map(|(year, _)| *year).collect();
    assert_eq!(years, vec![2024, 2023, 2022]);
    assert_eq!(groups[1].1[0].0, "Conference Papers");
}

// === Export ===

#[test]
fn test_export_round_trip_yaml() {
    let data = assemble(&load_lab_config()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out/lab.yaml");

    export(&data, &path, ExportFormat::Yaml).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("E. Jönsson"));
    assert!(text.contains("Zürich"));

    let back: LabData = serde_yaml::from_str(&text).unwrap();
    assert_eq!(back.publications.len(), data.publications.len());
    for (a, b) in back.publications.iter().zip(&data.publications) {
        assert_eq!(a.authors, b.authors);
    }
}

#[test]
fn test_export_round_trip_json() {
    let data = assemble(&load_lab_config()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lab.json");

    export(&data, &path, ExportFormat::Json).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"name\": \"E. Jönsson\""));
    assert!(!text.contains("\\u00"));

    let back: LabData = serde_json::from_str(&text).unwrap();
    assert_eq!(back.publications, data.publications);
    assert_eq!(back.collaborators, data.collaborators);
}

#[test]
fn test_exported_people_projection() {
    let data = assemble(&load_lab_config()).unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&labdata_core::export::to_json_string(&data).unwrap()).unwrap();
    let people = value["people"].as_array().unwrap();

    let jsmith = &people[0];
    assert_eq!(jsmith["publication_count"], 2);
    assert!(jsmith.get("degree").is_none());

    let mchen = &people[1];
    assert_eq!(mchen["start_year"], 2021);
    assert!(mchen.get("email").is_none());

    let jdoe = &people[2];
    assert_eq!(jdoe["degree"], "PhD");
    assert_eq!(jdoe["end_year"], 2023);
    assert!(jdoe.get("publication_ids").is_none());

    let publication = &value["publications"][2];
    assert!(publication["video_url"].is_null());
    assert!(publication["authors"][0]["person_id"].is_null());
}
