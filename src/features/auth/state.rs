//! Session store shared by every component that needs the current user. The
//! token and the cached profile live behind one lock so readers never observe
//! one without the other. The session survives restarts through a JSON file;
//! a missing, unreadable or stale file simply means "logged out".

use crate::features::auth::{
    token::{inspect, TokenCheck},
    types::User,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicBool, Ordering},
        PoisonError, RwLock,
    },
};
use tracing::{debug, instrument, warn};

/// Token plus the profile it authorizes.
#[derive(Clone, Debug)]
pub struct Session {
    pub token: SecretString,
    pub user: User,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RestoreStatus {
    Pending,
    Restored,
}

/// On-disk layout of the session file.
#[derive(Serialize, Deserialize)]
struct StoredSession {
    token: String,
    user: Option<User>,
}

#[derive(Debug)]
pub struct SessionStore {
    path: PathBuf,
    session: RwLock<Option<Session>>,
    restored: AtomicBool,
}

impl SessionStore {
    /// Creates an empty store whose restore is still pending.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            session: RwLock::new(None),
            restored: AtomicBool::new(false),
        }
    }

    /// Creates the store and restores any persisted session.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let store = Self::new(path);
        store.restore();
        store
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the persisted session. Anything unusable is discarded and the
    /// store ends up logged out.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn restore(&self) {
        let restored = match load(&self.path) {
            Ok(Some(session)) => Some(session),
            Ok(None) => None,
            Err(reason) => {
                warn!("Discarding stored session: {reason}");
                remove(&self.path);
                None
            }
        };

        *self.session.write().unwrap_or_else(PoisonError::into_inner) = restored;
        self.restored.store(true, Ordering::Release);
    }

    #[must_use]
    pub fn restore_status(&self) -> RestoreStatus {
        if self.restored.load(Ordering::Acquire) {
            RestoreStatus::Restored
        } else {
            RestoreStatus::Pending
        }
    }

    /// Establishes a session in memory and persists it. A failed write only
    /// costs persistence across restarts, so it is logged and ignored.
    #[instrument(skip(self, token, user), fields(user_id = user.id))]
    pub fn login(&self, token: SecretString, user: User) {
        if let Err(err) = persist(&self.path, &token, &user) {
            warn!("Failed to persist session: {err}");
        }

        *self.session.write().unwrap_or_else(PoisonError::into_inner) =
            Some(Session { token, user });
        self.restored.store(true, Ordering::Release);
        debug!("Session established");
    }

    /// Clears the in-memory session and the session file.
    #[instrument(skip(self))]
    pub fn logout(&self) {
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = None;
        remove(&self.path);
        debug!("Session cleared");
    }

    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.read(|session| session.user.clone())
    }

    #[must_use]
    pub fn token(&self) -> Option<SecretString> {
        self.read(|session| session.token.clone())
    }

    #[must_use]
    pub fn snapshot(&self) -> Option<Session> {
        self.read(Clone::clone)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read(|_| ()).is_some()
    }

    fn read<T>(&self, f: impl FnOnce(&Session) -> T) -> Option<T> {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(f)
    }
}

fn load(path: &Path) -> Result<Option<Session>, String> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(format!("unreadable session file: {err}")),
    };

    let stored: StoredSession =
        serde_json::from_str(&raw).map_err(|err| format!("malformed session file: {err}"))?;

    let token = stored.token.trim();
    match inspect(token, chrono::Utc::now().timestamp()) {
        TokenCheck::Usable => {}
        TokenCheck::Expired => return Err("token expired".to_string()),
        TokenCheck::Malformed => return Err("malformed token".to_string()),
    }

    let user = stored.user.ok_or_else(|| "missing user profile".to_string())?;

    Ok(Some(Session {
        token: SecretString::from(token.to_string()),
        user,
    }))
}

/// Writes through a temporary file and renames it so a crash never leaves a
/// half-written session behind.
fn persist(path: &Path, token: &SecretString, user: &User) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let stored = StoredSession {
        token: token.expose_secret().to_string(),
        user: Some(user.clone()),
    };
    let payload = serde_json::to_vec_pretty(&stored)?;

    let tmp = path.with_extension("json.tmp");
    {
        let mut file = create_private(&tmp)?;
        file.write_all(&payload)?;
        file.sync_all()?;
    }
    fs::rename(&tmp, path)
}

#[cfg(unix)]
fn create_private(path: &Path) -> std::io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;

    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn create_private(path: &Path) -> std::io::Result<fs::File> {
    fs::File::create(path)
}

fn remove(path: &Path) {
    if let Err(err) = fs::remove_file(path) {
        if err.kind() != std::io::ErrorKind::NotFound {
            warn!("Failed to remove session file: {err}");
        }
    }
}
