//! Request and response types for auth-related API calls. Requests carry
//! passwords and one-time codes, so they deliberately do not implement `Debug`
//! and must never be logged.

use crate::portal::AppError;
use secrecy::SecretString;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Closed set of account roles.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

/// Access level a route or operation requires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
    Admin,
}

impl Role {
    /// The single authorization predicate shared by every gated route and action.
    #[must_use]
    pub fn satisfies(self, access: Access) -> bool {
        match access {
            Access::Public | Access::Authenticated => true,
            Access::Admin => self == Role::Admin,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

/// Cached profile of the signed-in account.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub role: Role,
    #[serde(default, alias = "is_verified", deserialize_with = "flag")]
    pub verified: bool,
}

impl User {
    #[must_use]
    pub fn can_access(&self, access: Access) -> bool {
        self.role.satisfies(access)
    }
}

/// Accepts `true`/`false` as well as the `0`/`1` integers some databases return.
fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Bool(value) => Ok(value),
        Value::Number(value) => Ok(value.as_i64().is_some_and(|v| v != 0)),
        Value::Null => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "expected boolean flag, got {other}"
        ))),
    }
}

#[derive(Serialize)]
pub struct RegisterRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Serialize)]
pub struct VerifyRequest<'a> {
    pub email: &'a str,
    pub otp: &'a str,
}

#[derive(Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Token issued by login or verification, with the user profile when the
/// backend included a complete one.
pub struct AuthGrant {
    pub token: SecretString,
    pub user: Option<User>,
}

impl AuthGrant {
    /// Accepts `{token, user: {...}}` as well as `{token, id, username, ...}`.
    ///
    /// # Errors
    /// Returns `AppError::Parse` if the response carries no token.
    pub fn from_value(value: &Value) -> Result<Self, AppError> {
        let token = value
            .get("token")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AppError::Parse("Response is missing the session token.".to_string()))?;

        Ok(Self {
            token: SecretString::from(token.to_string()),
            user: user_from_value(value),
        })
    }
}

/// Reads a complete user either nested under `user` or at the top level.
#[must_use]
pub fn user_from_value(value: &Value) -> Option<User> {
    value
        .get("user")
        .and_then(|nested| User::deserialize(nested).ok())
        .or_else(|| User::deserialize(value).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use serde_json::json;

    #[test]
    fn role_predicate() {
        assert!(Role::Admin.satisfies(Access::Admin));
        assert!(Role::Admin.satisfies(Access::Authenticated));
        assert!(Role::User.satisfies(Access::Public));
        assert!(Role::User.satisfies(Access::Authenticated));
        assert!(!Role::User.satisfies(Access::Admin));
    }

    #[test]
    fn user_accepts_integer_verification_flag() {
        let user: User = serde_json::from_value(json!({
            "id": 3,
            "username": "nimal",
            "email": "nimal@example.com",
            "role": "user",
            "is_verified": 1
        }))
        .unwrap();
        assert!(user.verified);
        assert_eq!(user.role, Role::User);
    }

    #[test]
    fn user_defaults_to_unverified() {
        let user: User = serde_json::from_value(json!({
            "id": 3,
            "username": "nimal",
            "email": "nimal@example.com",
            "role": "admin"
        }))
        .unwrap();
        assert!(!user.verified);
    }

    #[test]
    fn unknown_role_is_rejected() {
        let result: Result<User, _> = serde_json::from_value(json!({
            "id": 3,
            "username": "nimal",
            "email": "nimal@example.com",
            "role": "superuser"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn grant_reads_nested_user() {
        let grant = AuthGrant::from_value(&json!({
            "token": "abc.def.ghi",
            "user": { "id": 1, "username": "admin", "email": "admin@example.com", "role": "admin" }
        }))
        .unwrap();
        assert_eq!(grant.token.expose_secret(), "abc.def.ghi");
        assert_eq!(grant.user.map(|u| u.role), Some(Role::Admin));
    }

    #[test]
    fn grant_reads_flat_user() {
        let grant = AuthGrant::from_value(&json!({
            "token": "t-1",
            "id": 9,
            "username": "kamal",
            "email": "kamal@example.com",
            "role": "user"
        }))
        .unwrap();
        assert_eq!(grant.user.map(|u| u.id), Some(9));
    }

    #[test]
    fn grant_without_profile_has_no_user() {
        let grant = AuthGrant::from_value(&json!({
            "message": "Email verified",
            "token": "t-2"
        }))
        .unwrap();
        assert!(grant.user.is_none());
    }

    #[test]
    fn grant_requires_token() {
        let err = AuthGrant::from_value(&json!({ "message": "ok" })).err();
        assert!(matches!(err, Some(AppError::Parse(_))));

        let err = AuthGrant::from_value(&json!({ "token": "  " })).err();
        assert!(matches!(err, Some(AppError::Parse(_))));
    }
}
