//! Portal routes and the access each one requires. Path strings live in
//! [`paths`] so links and redirects never drift from the route table.

use crate::features::auth::{
    guards::{self, GuardOutcome},
    state::SessionStore,
    types::Access,
};

pub mod paths {
    pub const HOME: &str = "/";
    pub const ABOUT: &str = "/about";
    pub const CAREERS: &str = "/careers";
    pub const CONTACT: &str = "/contact";
    pub const ADMIN: &str = "/admin";
    pub const LOGIN: &str = "/login";
    pub const REGISTER: &str = "/register";
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    About,
    Careers,
    /// Job details, including the apply form.
    JobDetails(u64),
    Contact,
    Admin,
    Login,
    Register,
}

impl Route {
    /// Resolves a path; query strings and trailing slashes are ignored.
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default().trim();
        let trimmed = path.trim_end_matches('/');
        let path = if trimmed.is_empty() { paths::HOME } else { trimmed };

        match path {
            paths::HOME => Some(Route::Home),
            paths::ABOUT => Some(Route::About),
            paths::CAREERS => Some(Route::Careers),
            paths::CONTACT => Some(Route::Contact),
            paths::ADMIN => Some(Route::Admin),
            paths::LOGIN => Some(Route::Login),
            paths::REGISTER => Some(Route::Register),
            other => other
                .strip_prefix("/careers/")
                .and_then(|id| id.parse().ok())
                .map(Route::JobDetails),
        }
    }

    #[must_use]
    pub fn path(self) -> String {
        match self {
            Route::Home => paths::HOME.to_string(),
            Route::About => paths::ABOUT.to_string(),
            Route::Careers => paths::CAREERS.to_string(),
            Route::JobDetails(id) => format!("{}/{id}", paths::CAREERS),
            Route::Contact => paths::CONTACT.to_string(),
            Route::Admin => paths::ADMIN.to_string(),
            Route::Login => paths::LOGIN.to_string(),
            Route::Register => paths::REGISTER.to_string(),
        }
    }

    /// The job details page is public; only its apply form needs a session,
    /// which is gated separately with [`Access::Authenticated`].
    #[must_use]
    pub fn access(self) -> Access {
        match self {
            Route::Admin => Access::Admin,
            _ => Access::Public,
        }
    }

    /// Runs the route's guard against the session store.
    #[must_use]
    pub fn visit(self, store: &SessionStore) -> GuardOutcome {
        guards::check(store, self.access())
    }
}
