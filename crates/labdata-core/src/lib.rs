//! labdata-core: assembly pipeline for lab publication data
//!
//! Turns BibTeX sources plus people and project rosters into one
//! cross-referenced data set ready for YAML or JSON export:
//! - LaTeX to Unicode, Markdown and plain text
//! - Author-list parsing and abbreviation
//! - BibTeX record formatting (venues, DOI/arXiv/video/PDF links)
//! - Author resolution against the roster (exact, then fuzzy)
//! - Project tag validation and back-links
//! - External collaborator aggregation
//!
//! ```no_run
//! use std::path::Path;
//! use labdata_core::{assemble_with_diagnostics, export, ExportFormat, LabDataConfig};
//!
//! let config = LabDataConfig::from_file(Path::new("lab.yaml"))?;
//! let result = assemble_with_diagnostics(&config)?;
//! for name in &result.diagnostics.unresolved_authors {
//!     println!("unresolved: {name}");
//! }
//! export(&result.data, Path::new("site/_data/lab.json"), ExportFormat::Json)?;
//! # Ok::<(), labdata_core::LabDataError>(())
//! ```

pub mod assembler;
pub mod config;
pub mod domain;
pub mod error;
pub mod export;
pub mod formatter;
pub mod grouping;
pub mod ingest;
pub mod resolver;
pub mod roster;
pub mod text;

pub use assembler::{
    aggregate_collaborators, assemble, assemble_with_diagnostics, AssemblyResult, Diagnostics,
};
pub use config::{BibFile, LabDataConfig, ResolverConfig};
pub use domain::{
    Author, Collaborator, LabData, LabInfo, Person, Project, Publication, Resolution,
};
pub use error::{LabDataError, Result, SerializationError};
pub use export::{export, export_to_json, export_to_yaml, ExportFormat};
pub use formatter::EntryFormatter;
pub use grouping::{group_by_year, group_by_year_and_category, publications_for_project};
pub use ingest::{ingest_publications, parse_all_publications, Ingested};
pub use resolver::{
    build_alias_index, compute_backlinks, fuzzy_match, normalize_name, resolve_authors,
    resolve_projects, AmbiguousAlias, AuthorResolution, SimilarityMetric,
};
pub use roster::{load_people, load_projects};

pub use labdata_bibtex::EntryType;
