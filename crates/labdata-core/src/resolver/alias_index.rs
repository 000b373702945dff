//! Normalized name to person lookup

use std::collections::HashMap;

use serde::Serialize;

use super::normalize::normalize_name;
use crate::domain::Person;

/// A normalized alias claimed by more than one person.
/// Excluded from matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AmbiguousAlias {
    pub alias: String,
    /// Claimants in roster order
    pub person_ids: Vec<String>,
}

/// Normalized canonical names and aliases mapped to person ids.
///
/// Iteration follows roster insertion order.
#[derive(Debug, Clone, Default)]
pub struct AliasIndex {
    keys: Vec<String>,
    owners: HashMap<String, String>,
}

impl AliasIndex {
    /// Exact lookup of an already-normalized name
    pub fn get(&self, normalized: &str) -> Option<&str> {
        self.owners.get(normalized).map(String::as_str)
    }

    pub fn contains(&self, normalized: &str) -> bool {
        self.owners.contains_key(normalized)
    }

    /// `(normalized name, person id)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.keys
            .iter()
            .filter_map(|key| self.owners.get(key).map(|id| (key.as_str(), id.as_str())))
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

/// Index every person's canonical name and aliases.
///
/// A normalized form claimed by two different people is dropped from the
/// index, and any later claim on it stays dropped; each such form is
/// reported once.
pub fn build_alias_index(people: &[Person]) -> (AliasIndex, Vec<AmbiguousAlias>) {
    let mut index = AliasIndex::default();
    let mut ambiguous: Vec<AmbiguousAlias> = Vec::new();
    let mut ambiguous_positions: HashMap<String, usize> = HashMap::new();

    for person in people {
        for name in std::iter::once(&person.name).chain(&person.aliases) {
            let key = normalize_name(name);
            if key.is_empty() {
                continue;
            }

            if let Some(&position) = ambiguous_positions.get(&key) {
                let report = &mut ambiguous[position];
                if !report.person_ids.contains(&person.id) {
                    report.person_ids.push(person.id.clone());
                }
                continue;
            }

            match index.owners.get(&key) {
                Some(owner) if *owner != person.id => {
                    let owner = owner.clone();
                    index.owners.remove(&key);
                    ambiguous_positions.insert(key.clone(), ambiguous.len());
                    ambiguous.push(AmbiguousAlias {
                        alias: key,
                        person_ids: vec![owner, person.id.clone()],
                    });
                }
                Some(_) => {}
                None => {
                    index.owners.insert(key.clone(), person.id.clone());
                    index.keys.push(key);
                }
            }
        }
    }

    let AliasIndex { keys, owners } = &mut index;
    keys.retain(|key| owners.contains_key(key));

    (index, ambiguous)
}
