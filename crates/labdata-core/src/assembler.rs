//! Pipeline orchestration
//!
//! Stages run in a fixed order: ingest publications, load people and
//! projects, resolve authors, validate project tags, aggregate external
//! collaborators, then compute back-links over the resolved data.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::config::LabDataConfig;
use crate::domain::{Collaborator, LabData, Person, Project, Publication};
use crate::error::Result;
use crate::ingest::ingest_publications;
use crate::resolver::{compute_backlinks, resolve_authors, resolve_projects, AmbiguousAlias};
use crate::roster::{load_people, load_projects};

/// Data-quality findings from one assembly run. None of these stop the
/// pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Diagnostics {
    /// Author names matching no roster person, sorted
    pub unresolved_authors: Vec<String>,
    /// Project ids tagged on publications but missing from the roster, sorted
    pub unknown_projects: Vec<String>,
    pub ambiguous_aliases: Vec<AmbiguousAlias>,
    /// Bib ids dropped because an earlier record used them, sorted
    pub duplicate_bib_ids: Vec<String>,
}

impl Diagnostics {
    pub fn is_clean(&self) -> bool {
        self.unresolved_authors.is_empty()
            && self.unknown_projects.is_empty()
            && self.ambiguous_aliases.is_empty()
            && self.duplicate_bib_ids.is_empty()
    }
}

/// Assembled data together with its diagnostics
#[derive(Debug, Clone)]
pub struct AssemblyResult {
    pub data: LabData,
    pub diagnostics: Diagnostics,
}

/// Run the pipeline and return only the assembled data
pub fn assemble(config: &LabDataConfig) -> Result<LabData> {
    Ok(assemble_with_diagnostics(config)?.data)
}

/// Run the pipeline and return the data with its diagnostics
pub fn assemble_with_diagnostics(config: &LabDataConfig) -> Result<AssemblyResult> {
    let ingested = ingest_publications(
        &config.bib_dir,
        &config.bib_files,
        &config.entry_formatter(),
    )?;

    let people: Vec<Person> = match &config.people_file {
        Some(path) => load_people(path)?,
        None => Vec::new(),
    };
    let projects: Vec<Project> = match &config.projects_file {
        Some(path) => load_projects(path)?,
        None => Vec::new(),
    };
    tracing::info!(
        people = people.len(),
        projects = projects.len(),
        "Loaded rosters"
    );

    let resolution = resolve_authors(ingested.publications, &people, &config.resolver);
    let unknown_projects = resolve_projects(&resolution.publications, &projects);
    let collaborators = aggregate_collaborators(&resolution.publications);

    tracing::info!(
        unresolved = resolution.unresolved.len(),
        unknown_projects = unknown_projects.len(),
        collaborators = collaborators.len(),
        "Resolved references"
    );

    let mut data = LabData {
        publications: resolution.publications,
        people,
        projects,
        collaborators,
        lab: config.lab.clone(),
    };
    compute_backlinks(&mut data);

    Ok(AssemblyResult {
        data,
        diagnostics: Diagnostics {
            unresolved_authors: resolution.unresolved,
            unknown_projects,
            ambiguous_aliases: resolution.ambiguous_aliases,
            duplicate_bib_ids: ingested.duplicate_bib_ids,
        },
    })
}

/// One collaborator per distinct unresolved author name.
///
/// Sorted by most recent year, then publication count (both descending),
/// then name. A name listed twice on one publication counts once.
pub fn aggregate_collaborators(publications: &[Publication]) -> Vec<Collaborator> {
    let mut stats: BTreeMap<&str, (usize, i32)> = BTreeMap::new();

    for publication in publications {
        let mut counted: HashSet<&str> = HashSet::new();
        for author in publication.authors.iter().filter(|a| !a.is_resolved()) {
            if !counted.insert(author.name.as_str()) {
                continue;
            }
            let entry = stats.entry(author.name.as_str()).or_insert((0, publication.year));
            entry.0 += 1;
            entry.1 = entry.1.max(publication.year);
        }
    }

    let mut collaborators: Vec<Collaborator> = stats
        .into_iter()
        .map(|(name, (publication_count, last_year))| Collaborator {
            name: name.to_string(),
            publication_count,
            last_year,
        })
        .collect();

    collaborators.sort_by(|a, b| {
        b.last_year
            .cmp(&a.last_year)
            .then_with(|| b.publication_count.cmp(&a.publication_count))
            .then_with(|| a.name.cmp(&b.name))
    });
    collaborators
}
