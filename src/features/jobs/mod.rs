//! Job board: public listing and filtering, admin create and delete.

pub mod catalog;
pub mod client;
pub mod types;

pub use catalog::{split_keywords, Committed, JobCatalog, JobDraft, JobFilter};
pub use types::{Job, JobType, NewJob};
