//! Entity resolution: link publications to people and projects
//!
//! Author names are matched against the roster by exact normalized alias
//! first, then by fuzzy similarity. Project tags are validated, and
//! back-links from people and projects to publications are computed.

pub mod alias_index;
pub mod backlinks;
pub mod normalize;
pub mod similarity;

use std::collections::BTreeSet;

pub use alias_index::{build_alias_index, AliasIndex, AmbiguousAlias};
pub use backlinks::compute_backlinks;
pub use normalize::{is_abbreviated, normalize_name};
pub use similarity::{indel_ratio, SimilarityMetric};

use crate::config::ResolverConfig;
use crate::domain::{Author, Person, Project, Publication};

/// Outcome of [`resolve_authors`]
#[derive(Debug, Clone, Default)]
pub struct AuthorResolution {
    /// Publications with resolved authors linked
    pub publications: Vec<Publication>,
    /// Display names left unresolved, sorted and de-duplicated
    pub unresolved: Vec<String>,
    pub ambiguous_aliases: Vec<AmbiguousAlias>,
}

/// Fuzzy-match a name against the index.
///
/// Single-initial names ("S. Zhang") never fuzzy-match. Among aliases tied
/// at the best ratio the smallest person id wins.
pub fn fuzzy_match<'a>(
    name: &str,
    index: &'a AliasIndex,
    config: &ResolverConfig,
) -> Option<&'a str> {
    let normalized = normalize_name(name);
    if is_abbreviated(&normalized) {
        return None;
    }

    let mut best: Option<(f64, &str)> = None;
    for (alias, person_id) in index.iter() {
        let ratio = config.similarity.ratio(&normalized, alias);
        best = match best {
            Some((best_ratio, best_id))
                if ratio < best_ratio || (ratio == best_ratio && person_id >= best_id) =>
            {
                Some((best_ratio, best_id))
            }
            _ => Some((ratio, person_id)),
        };
    }

    let (ratio, person_id) = best?;
    if ratio >= config.fuzzy_threshold {
        tracing::debug!(name, person_id, ratio, "Fuzzy-matched author");
        Some(person_id)
    } else {
        None
    }
}

/// Link author names to roster people.
///
/// Each unresolved author is tried by exact normalized match, then fuzzy
/// match; already-resolved authors are left alone. An empty roster resolves
/// nothing and reports nothing.
pub fn resolve_authors(
    publications: Vec<Publication>,
    people: &[Person],
    config: &ResolverConfig,
) -> AuthorResolution {
    if people.is_empty() {
        return AuthorResolution {
            publications,
            ..Default::default()
        };
    }

    let (index, ambiguous_aliases) = build_alias_index(people);
    for report in &ambiguous_aliases {
        tracing::warn!(
            alias = %report.alias,
            person_ids = ?report.person_ids,
            "Ambiguous alias matches multiple people, excluding it from matching"
        );
    }

    let mut unresolved: BTreeSet<String> = BTreeSet::new();
    let publications = publications
        .into_iter()
        .map(|publication| {
            let authors = publication
                .authors
                .into_iter()
                .map(|author| resolve_author(author, &index, config, &mut unresolved))
                .collect();
            Publication {
                authors,
                ..publication
            }
        })
        .collect();

    AuthorResolution {
        publications,
        unresolved: unresolved.into_iter().collect(),
        ambiguous_aliases,
    }
}

fn resolve_author(
    author: Author,
    index: &AliasIndex,
    config: &ResolverConfig,
    unresolved: &mut BTreeSet<String>,
) -> Author {
    if author.is_resolved() {
        return author;
    }

    let matched = index
        .get(&normalize_name(&author.name))
        .or_else(|| fuzzy_match(&author.name, index, config))
        .map(str::to_string);

    match matched {
        Some(person_id) => author.resolved_to(person_id),
        None => {
            unresolved.insert(author.name.clone());
            author
        }
    }
}

/// Project ids tagged on publications but absent from the roster, sorted.
/// Publications keep their tags.
pub fn resolve_projects(publications: &[Publication], projects: &[Project]) -> Vec<String> {
    let known: BTreeSet<&str> = projects.iter().map(|p| p.id.as_str()).collect();

    publications
        .iter()
        .flat_map(|p| p.project_ids.iter())
        .filter(|id| !known.contains(id.as_str()))
        .cloned()
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}
