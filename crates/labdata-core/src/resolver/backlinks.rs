//! Back-links from people and projects to publications

use std::collections::{BTreeSet, HashMap};

use crate::domain::{LabData, Publication};

/// Populate back-references on people and projects.
///
/// - `Person::publication_ids` / `publication_count`
/// - `Project::publication_ids` / `people_ids`
///
/// Existing ids are never appended twice, so running this again over the
/// same data changes nothing.
pub fn compute_backlinks(data: &mut LabData) {
    let people_by_id: HashMap<String, usize> = data
        .people
        .iter()
        .enumerate()
        .map(|(i, p)| (p.id.clone(), i))
        .collect();
    let projects_by_id: HashMap<String, usize> = data
        .projects
        .iter()
        .enumerate()
        .map(|(i, p)| (p.id.clone(), i))
        .collect();

    for publication in &data.publications {
        for person_id in publication.person_ids() {
            if let Some(&i) = people_by_id.get(person_id) {
                push_unique(&mut data.people[i].publication_ids, &publication.bib_id);
            }
        }

        for project_id in &publication.project_ids {
            if let Some(&i) = projects_by_id.get(project_id) {
                push_unique(&mut data.projects[i].publication_ids, &publication.bib_id);
            }
        }
    }

    for person in &mut data.people {
        person.publication_count = person.publication_ids.len();
    }

    let mut publications_by_id: HashMap<&str, &Publication> = HashMap::new();
    for publication in &data.publications {
        publications_by_id
            .entry(publication.bib_id.as_str())
            .or_insert(publication);
    }

    for project in &mut data.projects {
        let people: BTreeSet<&str> = project
            .publication_ids
            .iter()
            .filter_map(|bib_id| publications_by_id.get(bib_id.as_str()))
            .flat_map(|publication| publication.person_ids())
            .collect();
        project.people_ids = people.into_iter().map(str::to_string).collect();
    }
}

fn push_unique(ids: &mut Vec<String>, bib_id: &str) {
    if !ids.iter().any(|id| id == bib_id) {
        ids.push(bib_id.to_string());
    }
}
