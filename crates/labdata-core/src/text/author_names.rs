//! Author field parsing
//!
//! Splits a BibTeX author field on `and`, reads each name in
//! "First von Last", "von Last, First" or "von Last, Jr, First" form, and
//! renders it as "F. M. Last" with an optional `<sup>` affiliation marker.

use lazy_static::lazy_static;
use regex::Regex;

use super::collapse_whitespace;
use super::latex::{replace_latex_accents, strip_braces};
use crate::domain::Author;

/// Lowercase name particles that belong to the surname
const SURNAME_PARTICLES: &[&str] = &[
    "von", "van", "der", "den", "de", "del", "della", "di", "da", "dos", "du", "la", "le", "ben",
    "bin", "ter", "ten", "zu",
];

/// Generational suffixes dropped from the no-comma form
const SUFFIXES: &[&str] = &["jr", "jr.", "jnr", "junior"];

lazy_static! {
    static ref SUPERSCRIPT_RE: Regex = Regex::new(r"^(.*?)\$?\^\{(.+?)\}\$?$").unwrap();
    static ref SUPERSCRIPT_ONLY_RE: Regex = Regex::new(r"^\$?\^\{.+\}\$?$").unwrap();
    static ref PARENTHETICAL_RE: Regex = Regex::new(r"\(.*?\)").unwrap();
}

/// Parse a raw author field into abbreviated [`Author`]s (all unresolved).
///
/// A field with unbalanced braces is kept as a single literal name.
pub fn parse_author_list(raw: &str) -> Vec<Author> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Vec::new();
    }

    match split_names(raw) {
        Some(names) => names
            .iter()
            .map(|words| abbreviate_name(words))
            .filter(|name| !name.is_empty())
            .map(Author::new)
            .collect(),
        None => {
            tracing::debug!(field = raw, "Malformed author field, keeping it as one name");
            vec![Author::new(raw)]
        }
    }
}

/// Join display names: "A", "A and B", "A, B, and C"
pub fn format_authors_string(authors: &[Author]) -> String {
    let names: Vec<&str> = authors.iter().map(|a| a.name.as_str()).collect();
    match names.as_slice() {
        [] => String::new(),
        [one] => one.to_string(),
        [first, second] => format!("{first} and {second}"),
        [rest @ .., last] => format!("{}, and {}", rest.join(", "), last),
    }
}

/// Split a field into names, each a list of top-level words.
/// Returns `None` when braces do not balance.
fn split_names(raw: &str) -> Option<Vec<Vec<String>>> {
    let mut names = Vec::new();
    let mut words: Vec<String> = Vec::new();
    let mut word = String::new();
    let mut depth = 0usize;

    for c in raw.chars() {
        match c {
            '{' => {
                depth += 1;
                word.push(c);
            }
            '}' => {
                depth = depth.checked_sub(1)?;
                word.push(c);
            }
            c if c.is_whitespace() && depth == 0 => flush_word(&mut word, &mut words, &mut names),
            c => word.push(c),
        }
    }

    if depth != 0 {
        return None;
    }
    flush_word(&mut word, &mut words, &mut names);
    if !words.is_empty() {
        names.push(words);
    }

    Some(names)
}

fn flush_word(word: &mut String, words: &mut Vec<String>, names: &mut Vec<Vec<String>>) {
    if word.eq_ignore_ascii_case("and") {
        if !words.is_empty() {
            names.push(std::mem::take(words));
        }
    } else if !word.is_empty() {
        words.push(word.clone());
    }
    word.clear();
}

/// Split text on commas outside braces
fn split_top_level_commas(text: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;

    for c in text.chars() {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(current.trim().to_string());
                current.clear();
                continue;
            }
            _ => {}
        }
        current.push(c);
    }
    parts.push(current.trim().to_string());

    parts
}

/// Separate one name's words into (first, last)
fn name_parts(words: &[String]) -> (String, String) {
    let joined = words.join(" ");
    let parts = split_top_level_commas(&joined);

    match parts.as_slice() {
        [last, first] => return (first.clone(), last.clone()),
        [last, _suffix, first, ..] => return (first.clone(), last.clone()),
        _ => {}
    }

    let mut words: Vec<String> = Vec::with_capacity(words.len());
    for word in words_of(&joined) {
        // "Smith $^{1}$" carries the marker as its own word
        if SUPERSCRIPT_ONLY_RE.is_match(&word) {
            if let Some(prev) = words.last_mut() {
                prev.push_str(&word);
                continue;
            }
        }
        words.push(word);
    }

    let Some(mut last) = words.pop() else {
        return (String::new(), String::new());
    };
    if SUFFIXES.contains(&last.to_lowercase().as_str()) && !words.is_empty() {
        last = words.pop().unwrap_or_default();
    }
    while words
        .last()
        .is_some_and(|word| SURNAME_PARTICLES.contains(&word.as_str()))
    {
        if let Some(word) = words.pop() {
            last = format!("{word} {last}");
        }
    }

    (words.join(" "), last)
}

fn words_of(text: &str) -> Vec<String> {
    split_names(text)
        .and_then(|mut names| names.pop())
        .unwrap_or_default()
}

/// Render a name as "F. M. Last<sup>x</sup>"
fn abbreviate_name(words: &[String]) -> String {
    let (first, last) = name_parts(words);

    let mut last = replace_latex_accents(&last);
    let mut superscript = String::new();
    if let Some(caps) = SUPERSCRIPT_RE.captures(&last) {
        superscript = format!("<sup>{}</sup>", &caps[2]);
        last = caps[1].to_string();
    }
    let last = collapse_whitespace(&strip_braces(&last));

    let first = replace_latex_accents(&first);
    let first = PARENTHETICAL_RE.replace_all(&first, "");
    let first = strip_braces(&first).replace('.', ". ");
    let initials: Vec<String> = first
        .split_whitespace()
        .filter_map(|part| part.chars().next())
        .map(|c| format!("{c}."))
        .collect();

    collapse_whitespace(&format!("{} {}{}", initials.join(" "), last, superscript))
}
