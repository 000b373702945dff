//! Grouping helpers for front ends that list publications by year

use crate::domain::{LabData, Publication};

/// Publications of one year, in input order
pub type YearGroup<'a> = (i32, Vec<&'a Publication>);

/// Publications of one category within a year
pub type CategoryGroup<'a> = (String, Vec<&'a Publication>);

/// Bucket by year, newest first. Input order is kept inside a bucket.
pub fn group_by_year(publications: &[Publication]) -> Vec<YearGroup<'_>> {
    let mut groups: Vec<YearGroup<'_>> = Vec::new();
    for publication in publications {
        match groups.iter_mut().find(|(year, _)| *year == publication.year) {
            Some((_, bucket)) => bucket.push(publication),
            None => groups.push((publication.year, vec![publication])),
        }
    }
    groups.sort_by(|a, b| b.0.cmp(&a.0));
    groups
}

/// Bucket by year, then by category.
///
/// Categories follow `category_order`; categories not listed there come
/// after it in the order they are first seen.
pub fn group_by_year_and_category<'a>(
    publications: &'a [Publication],
    category_order: &[&str],
) -> Vec<(i32, Vec<CategoryGroup<'a>>)> {
    group_by_year(publications)
        .into_iter()
        .map(|(year, pubs)| (year, group_by_category(pubs, category_order)))
        .collect()
}

fn group_by_category<'a>(
    publications: Vec<&'a Publication>,
    category_order: &[&str],
) -> Vec<CategoryGroup<'a>> {
    let mut groups: Vec<CategoryGroup<'a>> = Vec::new();
    for publication in publications {
        match groups
            .iter_mut()
            .find(|(category, _)| *category == publication.category)
        {
            Some((_, bucket)) => bucket.push(publication),
            None => groups.push((publication.category.clone(), vec![publication])),
        }
    }

    let rank = |category: &str| {
        category_order
            .iter()
            .position(|c| *c == category)
            .unwrap_or(category_order.len())
    };
    groups.sort_by_key(|(category, _)| rank(category));
    groups
}

/// Publications back-linked to a project, in data-set order
pub fn publications_for_project<'a>(data: &'a LabData, project_id: &str) -> Vec<&'a Publication> {
    let Some(project) = data.project(project_id) else {
        return Vec::new();
    };

    data.publications
        .iter()
        .filter(|p| project.publication_ids.contains(&p.bib_id))
        .collect()
}
