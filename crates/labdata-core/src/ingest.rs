//! BibTeX ingestion: configured source files to a flat publication list

use std::collections::HashSet;
use std::path::Path;

use labdata_bibtex::{parse_strict, Bibliography, ParseError};

use crate::config::BibFile;
use crate::domain::Publication;
use crate::error::{LabDataError, Result};
use crate::formatter::EntryFormatter;

/// Publications read from every configured source
#[derive(Debug, Clone, Default)]
pub struct Ingested {
    /// Sorted by year descending; ties keep file order, then in-file order
    pub publications: Vec<Publication>,
    /// Bib ids seen more than once, sorted; only the first record was kept
    pub duplicate_bib_ids: Vec<String>,
}

/// Read and strictly parse one BibTeX file
pub fn parse_bibtex_file(path: &Path) -> Result<Bibliography> {
    let contents = std::fs::read_to_string(path).map_err(|e| LabDataError::io(path, e))?;
    let bibliography = parse_strict(&contents).map_err(|e| match e {
        ParseError::Syntax { line, message } => LabDataError::BibSyntax {
            path: path.to_path_buf(),
            line,
            message,
        },
    })?;

    tracing::debug!(
        path = %path.display(),
        entries = bibliography.entries.len(),
        "Parsed BibTeX file"
    );
    Ok(bibliography)
}

/// Parse every source in order and format its records.
///
/// A missing or malformed source fails the whole ingest. When a bib id
/// repeats, the first record wins.
pub fn ingest_publications(
    bib_dir: &Path,
    bib_files: &[BibFile],
    formatter: &EntryFormatter,
) -> Result<Ingested> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut duplicates: Vec<String> = Vec::new();
    let mut publications = Vec::new();

    for bib_file in bib_files {
        let path = bib_dir.join(&bib_file.name);
        let bibliography = parse_bibtex_file(&path)?;

        for entry in &bibliography.entries {
            if !seen.insert(entry.cite_key.clone()) {
                tracing::warn!(
                    bib_id = %entry.cite_key,
                    path = %path.display(),
                    "Duplicate bib id, keeping the first record"
                );
                duplicates.push(entry.cite_key.clone());
                continue;
            }
            publications.push(formatter.format(entry, &bib_file.category));
        }
    }

    // stable: equal years keep encounter order
    publications.sort_by(|a: &Publication, b: &Publication| b.year.cmp(&a.year));

    duplicates.sort();
    duplicates.dedup();

    tracing::info!(
        sources = bib_files.len(),
        publications = publications.len(),
        "Ingested publications"
    );

    Ok(Ingested {
        publications,
        duplicate_bib_ids: duplicates,
    })
}

/// Convenience wrapper returning only the publications.
/// A local `pdf_base_url` is checked relative to the working directory.
pub fn parse_all_publications(
    bib_dir: &Path,
    bib_files: &[BibFile],
    pdf_base_url: Option<&str>,
) -> Result<Vec<Publication>> {
    let formatter = EntryFormatter::new(pdf_base_url.map(str::to_string));
    Ok(ingest_publications(bib_dir, bib_files, &formatter)?.publications)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_sources(files: &[(&str, &str)]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (name, contents) in files {
            fs::write(dir.path().join(name), contents).unwrap();
        }
        dir
    }

    #[test]
    fn test_sorted_by_year_descending_and_stable() {
        let dir = write_sources(&[
            (
                "journal.bib",
                "@article{a2020, title={A}, year={2020}}\n@article{b2022, title={B}, year={2022}}\n@article{c2020, title={C}, year={2020}}\n",
            ),
            ("conf.bib", "@inproceedings{d2020, title={D}, year={2020}}\n"),
        ]);
        let files = vec![
            BibFile::new("journal.bib", "Journal Papers"),
            BibFile::new("conf.bib", "Conference Papers"),
        ];

        let ingested = ingest_publications(dir.path(), &files, &EntryFormatter::default()).unwrap();
        let ids: Vec<&str> = ingested
            .publications
            .iter()
            .map(|p| p.bib_id.as_str())
            .collect();
        assert_eq!(ids, vec!["b2022", "a2020", "c2020", "d2020"]);
        assert_eq!(ingested.publications[3].category, "Conference Papers");
        assert!(ingested.duplicate_bib_ids.is_empty());
    }

    #[test]
    fn test_duplicate_bib_id_first_writer_wins() {
        let dir = write_sources(&[
            ("a.bib", "@article{dup, title={First}, year={2021}}\n"),
            (
                "b.bib",
                "@article{dup, title={Second}, year={2024}}\n@misc{dup, title={Third}, year={2024}}\n",
            ),
        ]);
        let files = vec![BibFile::new("a.bib", "A"), BibFile::new("b.bib", "B")];

        let ingested = ingest_publications(dir.path(), &files, &EntryFormatter::default()).unwrap();
        assert_eq!(ingested.publications.len(), 1);
        assert_eq!(ingested.publications[0].title, "First");
        assert_eq!(ingested.duplicate_bib_ids, vec!["dup"]);
    }

    #[test]
    fn test_missing_source_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = parse_all_publications(dir.path(), &[BibFile::new("nope.bib", "A")], None)
            .unwrap_err();
        assert!(matches!(err, LabDataError::Io { .. }));
        assert!(err.is_input_error());
    }

    #[test]
    fn test_malformed_source_is_an_error() {
        let dir = write_sources(&[("bad.bib", "@article{ok, title={Fine}}\n@article{broken, title={unclosed\n")]);
        let err = parse_all_publications(dir.path(), &[BibFile::new("bad.bib", "A")], None)
            .unwrap_err();
        assert!(matches!(err, LabDataError::BibSyntax { .. }));
    }

    #[test]
    fn test_pdf_base_url_applied() {
        let dir = write_sources(&[("a.bib", "@article{smith2024, title={T}, year={2024}}\n")]);
        let pubs = parse_all_publications(
            dir.path(),
            &[BibFile::new("a.bib", "A")],
            Some("https://lab.example.edu/pdfs/"),
        )
        .unwrap();
        assert_eq!(
            pubs[0].pdf_url.as_deref(),
            Some("https://lab.example.edu/pdfs/smith2024.pdf")
        );
    }
}
