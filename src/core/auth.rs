//! User accounts and session handling
//!
//! Accounts and the active session persist under their own storage keys. A
//! primary `admin` account always exists and cannot be removed; the first
//! load seeds it with the default password so a fresh install is usable
//! immediately.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use ulid::Ulid;

use crate::storage::{self, keys, warn_storage, KvStore};

/// Account roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[derive(Default)]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "Admin"),
            Role::User => write!(f, "User"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

/// A stored account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub id: String,
    pub username: String,
    pub password_digest: String,
    #[serde(default)]
    pub role: Role,
}

/// The account that is always present
pub const PRIMARY_ADMIN: &str = "admin";

const DEFAULT_ADMIN_PASSWORD: &str = "123";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("a user named \"{0}\" already exists")]
    DuplicateUser(String),

    #[error("no user named \"{0}\"")]
    UnknownUser(String),

    #[error("the primary admin account cannot be deleted")]
    ProtectedUser,

    #[error("cannot delete the account you are logged in with")]
    DeleteSelf,

    #[error("not logged in (run `sit login` first)")]
    NotLoggedIn,

    #[error("this action requires the Admin role")]
    AdminRequired,
}

/// SHA-256 hex digest of a password
pub fn digest_password(password: &str) -> String {
    let digest = Sha256::digest(password.as_bytes());
    digest.iter().map(|byte| format!("{byte:02x}")).collect()
}

pub struct AuthStore {
    users: Vec<UserAccount>,
    session: Option<String>,
    storage: Box<dyn KvStore>,
}

impl AuthStore {
    /// Load accounts and session, seeding the primary admin when absent
    pub fn load(storage: Box<dyn KvStore>) -> Self {
        let mut users: Vec<UserAccount> =
            storage::load_json(storage.as_ref(), keys::USERS).unwrap_or_default();

        if !users
            .iter()
            .any(|user| user.username.eq_ignore_ascii_case(PRIMARY_ADMIN))
        {
            users.push(UserAccount {
                id: "default-admin".to_string(),
                username: PRIMARY_ADMIN.to_string(),
                password_digest: digest_password(DEFAULT_ADMIN_PASSWORD),
                role: Role::Admin,
            });
        }

        let session = storage::load_json::<String>(storage.as_ref(), keys::SESSION).filter(
            |username| {
                users
                    .iter()
                    .any(|user| user.username.eq_ignore_ascii_case(username))
            },
        );

        Self {
            users,
            session,
            storage,
        }
    }

    pub fn users(&self) -> &[UserAccount] {
        &self.users
    }

    pub fn current_user(&self) -> Option<&UserAccount> {
        let session = self.session.as_deref()?;
        self.users
            .iter()
            .find(|user| user.username.eq_ignore_ascii_case(session))
    }

    /// The logged-in account, or `NotLoggedIn`
    pub fn require_session(&self) -> Result<&UserAccount, AuthError> {
        self.current_user().ok_or(AuthError::NotLoggedIn)
    }

    /// The logged-in account when it holds the Admin role
    pub fn require_admin(&self) -> Result<&UserAccount, AuthError> {
        let user = self.require_session()?;
        if user.role == Role::Admin {
            Ok(user)
        } else {
            Err(AuthError::AdminRequired)
        }
    }

    /// Start a session; usernames match case-insensitively
    pub fn login(&mut self, username: &str, password: &str) -> Result<&UserAccount, AuthError> {
        let digest = digest_password(password);
        let found = self
            .users
            .iter()
            .position(|user| {
                user.username.eq_ignore_ascii_case(username) && user.password_digest == digest
            })
            .ok_or(AuthError::InvalidCredentials)?;

        self.session = Some(self.users[found].username.clone());
        self.persist_session();
        Ok(&self.users[found])
    }

    pub fn logout(&mut self) {
        self.session = None;
        self.persist_session();
    }

    pub fn add_user(
        &mut self,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<&UserAccount, AuthError> {
        if self
            .users
            .iter()
            .any(|user| user.username.eq_ignore_ascii_case(username))
        {
            return Err(AuthError::DuplicateUser(username.to_string()));
        }

        self.users.push(UserAccount {
            id: format!("USR-{}", Ulid::new()),
            username: username.to_string(),
            password_digest: digest_password(password),
            role,
        });
        self.persist_users();
        Ok(self.users.last().expect("just pushed"))
    }

    pub fn delete_user(&mut self, username: &str) -> Result<(), AuthError> {
        if username.eq_ignore_ascii_case(PRIMARY_ADMIN) {
            return Err(AuthError::ProtectedUser);
        }
        if let Some(session) = &self.session {
            if session.eq_ignore_ascii_case(username) {
                return Err(AuthError::DeleteSelf);
            }
        }

        let index = self
            .users
            .iter()
            .position(|user| user.username.eq_ignore_ascii_case(username))
            .ok_or_else(|| AuthError::UnknownUser(username.to_string()))?;

        self.users.remove(index);
        self.persist_users();
        Ok(())
    }

    fn persist_users(&self) {
        storage::save_json(self.storage.as_ref(), keys::USERS, &self.users);
    }

    fn persist_session(&self) {
        match &self.session {
            Some(username) => {
                storage::save_json(self.storage.as_ref(), keys::SESSION, username);
            }
            None => {
                if let Err(err) = self.storage.remove(keys::SESSION) {
                    warn_storage("Could not clear session", err);
                }
            }
        }
    }
}
