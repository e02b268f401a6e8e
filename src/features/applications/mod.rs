//! Job applications: the applicant's multipart submission and the admin
//! dashboard that moves them through review.

pub mod board;
pub mod client;
pub mod form;
pub mod types;

pub use board::ApplicationBoard;
pub use form::{submit, ApplicationForm, CvFile};
pub use types::{Application, ApplicationStatus, Gender};
