//! BibTeX record to [`Publication`] formatting
//!
//! Venue strings are built per [`EntryType`]; titles and notes become
//! Markdown; DOI, arXiv, video and PDF links are derived from their fields.

use std::path::{Path, PathBuf};

use labdata_bibtex::{BibEntry, EntryType};
use url::Url;

use crate::domain::Publication;
use crate::text::{latex_to_markdown, latex_to_text, parse_author_list};

/// Hosts whose links are classified as videos (subdomains included)
pub const VIDEO_HOSTS: &[&str] = &["youtube.com", "youtu.be", "vimeo.com"];

/// Formats raw records into publications
#[derive(Debug, Clone, Default)]
pub struct EntryFormatter {
    pdf_base_url: Option<String>,
    pdf_dir: Option<PathBuf>,
}

impl EntryFormatter {
    pub fn new(pdf_base_url: Option<String>) -> Self {
        Self {
            pdf_base_url,
            pdf_dir: None,
        }
    }

    /// Look for local PDFs in `dir` instead of the base as written.
    /// Emitted links still use the configured base.
    pub fn with_pdf_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.pdf_dir = Some(dir.into());
        self
    }

    /// Map one record and its source category to a publication
    pub fn format(&self, entry: &BibEntry, category: &str) -> Publication {
        let raw_url = entry.get_nonblank("url");
        let video_url = extract_video_url(entry);

        Publication {
            bib_id: entry.cite_key.clone(),
            title: latex_to_markdown(entry.title().unwrap_or_default()),
            authors: parse_author_list(entry.author().unwrap_or_default()),
            year: parse_year(entry.year().unwrap_or_default()),
            venue: format_venue(entry),
            category: category.to_string(),
            entry_type: entry.entry_type.clone(),
            abstract_text: entry.get_nonblank("abstract").map(str::to_string),
            note: extract_note(entry),
            pdf_url: resolve_pdf_url(
                &entry.cite_key,
                self.pdf_base_url.as_deref(),
                self.pdf_dir.as_deref(),
            ),
            doi_url: construct_doi_url(entry),
            arxiv_url: construct_arxiv_url(entry),
            url: match video_url {
                Some(_) => None,
                None => raw_url.map(str::to_string),
            },
            video_url,
            project_ids: parse_project_ids(entry),
        }
    }
}

/// Year as an integer, 0 when absent or unparseable
pub fn parse_year(raw: &str) -> i32 {
    raw.trim().parse().unwrap_or(0)
}

/// Display string for where the entry appeared
pub fn format_venue(entry: &BibEntry) -> String {
    let year = field(entry, "year");

    match &entry.entry_type {
        EntryType::PhdThesis => thesis_venue("PhD thesis", entry, &year),
        EntryType::MastersThesis => thesis_venue("Masters thesis", entry, &year),
        EntryType::TechReport => techreport_venue(entry, &year),
        EntryType::Misc => misc_venue(entry, &year),
        EntryType::Article => article_venue(entry, &year),
        EntryType::InProceedings => inproceedings_venue(entry, &year),
        EntryType::Other(_) => year,
    }
}

/// Trimmed field value, empty when missing
fn field(entry: &BibEntry, key: &str) -> String {
    entry.get_nonblank(key).unwrap_or_default().to_string()
}

fn thesis_venue(kind: &str, entry: &BibEntry, year: &str) -> String {
    let school = latex_to_text(&field(entry, "school"));
    format!("{kind}, {school}, {year}")
}

fn techreport_venue(entry: &BibEntry, year: &str) -> String {
    let mut venue = entry
        .get_nonblank("type")
        .map(latex_to_text)
        .unwrap_or_else(|| "Technical Report".to_string());
    if let Some(number) = entry.get_nonblank("number") {
        venue.push(' ');
        venue.push_str(number);
    }
    let institution = latex_to_text(&field(entry, "institution"));
    format!("{venue}, {institution}, {year}")
}

fn misc_venue(entry: &BibEntry, year: &str) -> String {
    match entry.get_nonblank("eprint") {
        Some(eprint) => format!("*arXiv:{eprint}*, {year}"),
        None => year.to_string(),
    }
}

fn article_venue(entry: &BibEntry, year: &str) -> String {
    let journal = latex_to_text(&field(entry, "journal"));
    let mut venue = format!("*{journal}*");
    if let Some(volume) = entry.get_nonblank("volume") {
        venue.push_str(&format!(", {volume}"));
        if let Some(number) = entry.get_nonblank("number") {
            venue.push_str(&format!("({number})"));
        }
    }
    if !year.is_empty() {
        venue.push_str(&format!(", {year}"));
    }
    venue
}

fn inproceedings_venue(entry: &BibEntry, year: &str) -> String {
    let conference = latex_to_text(&field(entry, "booktitle"));
    if conference.is_empty() {
        year.to_string()
    } else {
        format!("*{conference}*, {year}")
    }
}

/// Note as Markdown, trailing periods and whitespace removed
pub fn extract_note(entry: &BibEntry) -> Option<String> {
    let note = entry
        .get("note")?
        .trim()
        .trim_end_matches(|c: char| c == '.' || c == ' ');
    if note.is_empty() {
        None
    } else {
        Some(latex_to_markdown(note))
    }
}

/// The `url` field when it points at a video host
pub fn extract_video_url(entry: &BibEntry) -> Option<String> {
    let raw = entry.get_nonblank("url")?;
    is_video_url(raw).then(|| raw.to_string())
}

/// Whether a link's host is a video host or one of its subdomains
pub fn is_video_url(raw: &str) -> bool {
    let parsed = Url::parse(raw).or_else(|_| Url::parse(&format!("https://{raw}")));
    let Some(host) = parsed.ok().and_then(|u| u.host_str().map(str::to_lowercase)) else {
        return false;
    };

    VIDEO_HOSTS
        .iter()
        .any(|domain| host == *domain || host.ends_with(&format!(".{domain}")))
}

/// DOI link: verbatim when already a URL, else under https://doi.org/.
/// A `doi:` prefix is dropped.
pub fn construct_doi_url(entry: &BibEntry) -> Option<String> {
    let doi = entry.get_nonblank("doi")?;
    match Url::parse(doi) {
        Ok(url) if url.scheme() == "doi" => {
            let bare = doi
                .split_once(':')
                .map_or(doi, |(_, rest)| rest)
                .trim_start_matches('/');
            Some(format!("https://doi.org/{bare}"))
        }
        Ok(_) => Some(doi.to_string()),
        Err(_) => Some(format!("https://doi.org/{doi}")),
    }
}

/// arXiv abstract link for entries with an eprint and no foreign archive prefix
pub fn construct_arxiv_url(entry: &BibEntry) -> Option<String> {
    let eprint = entry.get_nonblank("eprint")?;
    match entry.get_nonblank("archiveprefix") {
        Some(prefix) if !prefix.eq_ignore_ascii_case("arxiv") => None,
        _ => Some(format!("https://arxiv.org/abs/{eprint}")),
    }
}

/// Comma-separated project tags, order and duplicates preserved
pub fn parse_project_ids(entry: &BibEntry) -> Vec<String> {
    let Some(raw) = entry.get_nonblank("project") else {
        return Vec::new();
    };
    let raw = match raw.strip_prefix('{').and_then(|r| r.strip_suffix('}')) {
        Some(inner) => inner,
        None => raw,
    };

    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

/// `<base>/<bib_id>.pdf`; for a local base only when the file exists.
///
/// The existence check looks in `pdf_dir` when given, else in the base
/// itself. The returned link always uses the base as configured.
pub fn resolve_pdf_url(
    bib_id: &str,
    pdf_base_url: Option<&str>,
    pdf_dir: Option<&Path>,
) -> Option<String> {
    let raw = pdf_base_url?.trim();
    if raw.is_empty() {
        return None;
    }

    // "/" trims to "" and still yields "/<bib_id>.pdf"
    let pdf = format!("{}/{bib_id}.pdf", raw.trim_end_matches('/'));
    if raw.starts_with("http://") || raw.starts_with("https://") {
        return Some(pdf);
    }

    let file_name = format!("{bib_id}.pdf");
    let on_disk = match pdf_dir {
        Some(dir) => dir.join(file_name),
        None => Path::new(raw).join(file_name),
    };
    on_disk.exists().then_some(pdf)
}
