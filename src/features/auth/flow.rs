//! Registration, email verification and login as one state machine:
//! `Anonymous -> RegisteredUnverified -> LoggedIn`. Local validation failures
//! never reach the backend. A session is only established with a complete
//! user profile: when verification does not return one, the profile is fetched
//! from `/auth/me` with the new token before switching to `LoggedIn`.

use crate::{
    features::{
        auth::{
            client,
            types::{AuthGrant, LoginRequest, RegisterRequest, User, VerifyRequest},
        },
        required, valid_email,
    },
    portal::{ApiClient, AppError},
};
use secrecy::{ExposeSecret, SecretString};
use tracing::{info, instrument, warn};

pub const REGISTER_FALLBACK: &str = "Registration failed";
pub const VERIFY_FALLBACK: &str = "Verification failed";
pub const LOGIN_FALLBACK: &str = "Login failed";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthState {
    Anonymous,
    RegisteredUnverified { email: String },
    LoggedIn(User),
}

/// Registration form input.
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
}

impl Registration {
    /// # Errors
    /// Returns `AppError::Validation` for blank fields, a malformed email or
    /// mismatched passwords.
    pub fn validate(&self) -> Result<(), AppError> {
        required("Username", &self.username)?;
        required("Email", &self.email)?;
        if !valid_email(self.email.trim()) {
            return Err(AppError::Validation(
                "Please enter a valid email address.".to_string(),
            ));
        }
        if self.password.expose_secret().is_empty() {
            return Err(AppError::Validation("Password is required.".to_string()));
        }
        if self.password.expose_secret() != self.confirm_password.expose_secret() {
            return Err(AppError::Validation("Passwords don't match".to_string()));
        }
        Ok(())
    }
}

pub struct AuthFlow<'a> {
    api: &'a ApiClient,
    state: AuthState,
}

impl<'a> AuthFlow<'a> {
    /// Starts from whatever the session store holds.
    #[must_use]
    pub fn new(api: &'a ApiClient) -> Self {
        let state = api
            .session()
            .current_user()
            .map_or(AuthState::Anonymous, AuthState::LoggedIn);
        Self { api, state }
    }

    /// Resumes a registration whose code was sent earlier.
    #[must_use]
    pub fn awaiting_verification(api: &'a ApiClient, email: &str) -> Self {
        Self {
            api,
            state: AuthState::RegisteredUnverified {
                email: email.trim().to_string(),
            },
        }
    }

    /// Current state; a session cleared elsewhere (logout, rejected token)
    /// reads as `Anonymous`.
    #[must_use]
    pub fn state(&self) -> AuthState {
        match &self.state {
            AuthState::LoggedIn(_) => self
                .api
                .session()
                .current_user()
                .map_or(AuthState::Anonymous, AuthState::LoggedIn),
            other => other.clone(),
        }
    }

    /// # Errors
    /// Returns a validation error without contacting the backend, or the
    /// backend rejection. State is unchanged on error.
    #[instrument(skip_all)]
    pub async fn register(&mut self, registration: &Registration) -> Result<(), AppError> {
        if let AuthState::LoggedIn(user) = self.state() {
            return Err(AppError::Validation(format!(
                "You are already signed in as {}. Log out to create a new account.",
                user.email
            )));
        }
        registration.validate()?;

        let email = registration.email.trim();
        client::register(
            self.api,
            &RegisterRequest {
                username: registration.username.trim(),
                email,
                password: registration.password.expose_secret(),
            },
        )
        .await?;

        info!("Registration accepted, verification code sent");
        self.state = AuthState::RegisteredUnverified {
            email: email.to_string(),
        };
        Ok(())
    }

    /// Confirms the emailed code and signs the new account in.
    ///
    /// # Errors
    /// Fails when no registration is pending, the code is blank or wrong, or
    /// no complete profile could be obtained. The flow stays
    /// `RegisteredUnverified` on error.
    #[instrument(skip_all)]
    pub async fn verify(&mut self, code: &SecretString) -> Result<User, AppError> {
        let AuthState::RegisteredUnverified { email } = self.state.clone() else {
            return Err(AppError::Validation(
                "Register first, then enter the verification code sent to your email.".to_string(),
            ));
        };
        let code = code.expose_secret().trim();
        if code.is_empty() {
            return Err(AppError::Validation(
                "Verification code is required.".to_string(),
            ));
        }

        let grant = client::verify(self.api, &VerifyRequest { email: &email, otp: code }).await?;
        let user = self.complete_profile(&grant).await?;

        if !user.email.eq_ignore_ascii_case(&email) {
            warn!("Verification returned a profile for a different account");
            return Err(AppError::Parse(
                "Verified account does not match the registered email.".to_string(),
            ));
        }

        self.establish(grant.token, user.clone());
        Ok(user)
    }

    /// # Errors
    /// Returns a validation error for blank input or the backend rejection;
    /// the state is unchanged on error.
    #[instrument(skip_all)]
    pub async fn login(&mut self, email: &str, password: &SecretString) -> Result<User, AppError> {
        let email = email.trim();
        if email.is_empty() || password.expose_secret().is_empty() {
            return Err(AppError::Validation(
                "Email and password are required.".to_string(),
            ));
        }

        let grant = client::login(
            self.api,
            &LoginRequest {
                email,
                password: password.expose_secret(),
            },
        )
        .await?;
        let user = self.complete_profile(&grant).await?;

        self.establish(grant.token, user.clone());
        Ok(user)
    }

    pub fn logout(&mut self) {
        self.api.session().logout();
        self.state = AuthState::Anonymous;
    }

    async fn complete_profile(&self, grant: &AuthGrant) -> Result<User, AppError> {
        match &grant.user {
            Some(user) => Ok(user.clone()),
            None => {
                info!("Auth response carried no profile, fetching it");
                client::fetch_me(self.api, &grant.token).await
            }
        }
    }

    fn establish(&mut self, token: SecretString, user: User) {
        info!(user_id = user.id, role = user.role.as_str(), "Signed in");
        self.api.session().login(token, user.clone());
        self.state = AuthState::LoggedIn(user);
    }
}
