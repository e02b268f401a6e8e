use crate::{
    features::auth::{
        state::{RestoreStatus, SessionStore},
        types::{Access, User},
    },
    portal::AppError,
    routes::Route,
};

/// What a gated route should do for the current session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Restore has not finished; render nothing yet.
    Pending,
    Render,
    Redirect(Route),
    /// Show a sign-in call-to-action in place of the protected content.
    PromptLogin,
}

/// Decides the outcome for `access` given the restore status and the user.
#[must_use]
pub fn evaluate(status: RestoreStatus, user: Option<&User>, access: Access) -> GuardOutcome {
    if access == Access::Public {
        return GuardOutcome::Render;
    }
    if status == RestoreStatus::Pending {
        return GuardOutcome::Pending;
    }

    match (access, user) {
        (Access::Admin, Some(user)) if user.can_access(Access::Admin) => GuardOutcome::Render,
        (Access::Admin, _) => GuardOutcome::Redirect(Route::Login),
        (_, Some(_)) => GuardOutcome::Render,
        (_, None) => GuardOutcome::PromptLogin,
    }
}

/// Evaluates the guard against the live session store.
#[must_use]
pub fn check(store: &SessionStore, access: Access) -> GuardOutcome {
    evaluate(store.restore_status(), store.current_user().as_ref(), access)
}

/// Evaluates `access` against one read of the session, so the user returned
/// is the one the guard approved.
fn authorize(store: &SessionStore, access: Access, denied: &str) -> Result<User, AppError> {
    let user = store.current_user();
    match (evaluate(store.restore_status(), user.as_ref(), access), user) {
        (GuardOutcome::Render, Some(user)) => Ok(user),
        _ => Err(AppError::AuthRequired(denied.to_string())),
    }
}

/// UX-only gate for admin operations; the backend enforces the real rule.
///
/// # Errors
/// Returns `AppError::AuthRequired` unless an admin is signed in.
pub fn require_admin(store: &SessionStore) -> Result<User, AppError> {
    authorize(
        store,
        Access::Admin,
        "Administrator access required. Please log in with an admin account.",
    )
}

/// Gate for signed-in operations such as applying for a job.
///
/// # Errors
/// Returns `AppError::AuthRequired` when nobody is signed in.
pub fn require_session(store: &SessionStore) -> Result<User, AppError> {
    authorize(
        store,
        Access::Authenticated,
        "Please log in or register to apply for this position.",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::types::Role;
    use secrecy::SecretString;

    fn user(role: Role) -> User {
        User {
            id: 1,
            username: "ruwan".to_string(),
            email: "ruwan@example.com".to_string(),
            role,
            verified: true,
        }
    }

    #[test]
    fn public_routes_always_render() {
        assert_eq!(
            evaluate(RestoreStatus::Pending, None, Access::Public),
            GuardOutcome::Render
        );
    }

    #[test]
    fn pending_restore_renders_nothing() {
        assert_eq!(
            evaluate(RestoreStatus::Pending, None, Access::Admin),
            GuardOutcome::Pending
        );
        assert_eq!(
            evaluate(RestoreStatus::Pending, Some(&user(Role::Admin)), Access::Admin),
            GuardOutcome::Pending
        );
        assert_eq!(
            evaluate(RestoreStatus::Pending, None, Access::Authenticated),
            GuardOutcome::Pending
        );
    }

    #[test]
    fn admin_route_redirects_anonymous_and_non_admin() {
        assert_eq!(
            evaluate(RestoreStatus::Restored, None, Access::Admin),
            GuardOutcome::Redirect(Route::Login)
        );
        assert_eq!(
            evaluate(RestoreStatus::Restored, Some(&user(Role::User)), Access::Admin),
            GuardOutcome::Redirect(Route::Login)
        );
        assert_eq!(
            evaluate(RestoreStatus::Restored, Some(&user(Role::Admin)), Access::Admin),
            GuardOutcome::Render
        );
    }

    #[test]
    fn authenticated_content_prompts_instead_of_redirecting() {
        assert_eq!(
            evaluate(RestoreStatus::Restored, None, Access::Authenticated),
            GuardOutcome::PromptLogin
        );
        assert_eq!(
            evaluate(RestoreStatus::Restored, Some(&user(Role::User)), Access::Authenticated),
            GuardOutcome::Render
        );
    }

    #[test]
    fn require_helpers_follow_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path().join("session.json"));

        assert!(matches!(require_admin(&store), Err(AppError::AuthRequired(_))));
        assert!(matches!(require_session(&store), Err(AppError::AuthRequired(_))));

        store.login(SecretString::from("t".to_string()), user(Role::User));
        assert!(require_session(&store).is_ok());
        assert!(require_admin(&store).is_err());

        store.login(SecretString::from("t".to_string()), user(Role::Admin));
        assert_eq!(require_admin(&store).map(|u| u.role).ok(), Some(Role::Admin));
    }

    #[test]
    fn pending_store_blocks_admin_operations() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        assert_eq!(check(&store, Access::Admin), GuardOutcome::Pending);
        assert!(require_admin(&store).is_err());
    }

    #[test]
    fn admin_gate_never_returns_a_user_it_did_not_approve() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open(dir.path().join("session.json"));
        store.login(SecretString::from("t".to_string()), user(Role::Admin));

        std::thread::scope(|scope| {
            scope.spawn(|| {
                for round in 0..200 {
                    let role = if round % 2 == 0 { Role::User } else { Role::Admin };
                    store.login(SecretString::from("t".to_string()), user(role));
                }
            });
            for _ in 0..200 {
                if let Ok(approved) = require_admin(&store) {
                    assert_eq!(approved.role, Role::Admin);
                }
            }
        });
    }
}
