//! Lab data domain types
//!
//! - Author: a byline name plus its resolution state
//! - Publication: one formatted bibliographic entry
//! - Person, Project: roster entities with computed back-links
//! - Collaborator: an aggregated external co-author
//! - LabData: the assembled, cross-referenced data set

pub mod author;
pub mod lab_data;
pub mod person;
pub mod project;
pub mod publication;

pub use author::*;
pub use lab_data::*;
pub use person::*;
pub use project::*;
pub use publication::*;
