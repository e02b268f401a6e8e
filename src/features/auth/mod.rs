//! Auth feature: session store, registration/verification/login flow and the
//! role guard. The session store is the single source of truth for who is
//! signed in; the API client reads the bearer token from it and the guards
//! read the user from it. This module handles credentials and must never log
//! passwords, one-time codes or tokens.
//!
//! Flow overview: registration posts the account and the backend emails a
//! one-time code. Verification exchanges the code for a token and a profile
//! (fetching `/auth/me` when the profile is missing). Login exchanges email
//! and password for the same pair. Either way the pair lands in the session
//! store and on disk.

pub mod client;
pub mod flow;
pub mod guards;
pub mod state;
pub mod token;
pub mod types;

pub use flow::{AuthFlow, AuthState, Registration};
pub use guards::{require_admin, require_session, GuardOutcome};
pub use state::{RestoreStatus, Session, SessionStore};
pub use types::{Access, Role, User};
