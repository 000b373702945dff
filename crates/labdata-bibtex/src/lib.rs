//! # labdata-bibtex
//!
//! BibTeX reader for the lab-data pipeline.
//!
//! Produces raw [`BibEntry`] records with their original field text; LaTeX
//! decoding and formatting happen downstream in `labdata-core`.
//!
//! ## Example
//!
//! ```
//! use labdata_bibtex::{parse, EntryType};
//!
//! let bib = parse("@article{smith2024, author = {John Smith}, year = 2024}");
//! assert_eq!(bib.entries.len(), 1);
//! assert_eq!(bib.entries[0].entry_type, EntryType::Article);
//! assert_eq!(bib.entries[0].year(), Some("2024"));
//! ```

mod entry;
mod parser;

pub use entry::{BibEntry, BibField, EntryType};
pub use parser::{parse, parse_strict, Bibliography, ParseError, SyntaxError};
