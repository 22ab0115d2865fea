pub mod digest;
pub mod prompt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::store::{load_json, save_json, KeyValueStore, StoreError};

pub use prompt::{password_from_env, prompt_for_password, ENV_PASSWORD_VAR};

/// Store key holding all registered users
pub const USERS_KEY: &str = "fce_users";
/// Store key holding the logged-in user
pub const SESSION_KEY: &str = "session";

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("username and password are required")]
    MissingCredentials,

    #[error("username '{0}' already exists, please choose another")]
    UsernameTaken(String),

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("not logged in; run `fce-score login <username>` first")]
    NotLoggedIn,

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub salt: String,
    pub password_digest: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    pub logged_in_at: DateTime<Utc>,
}

fn load_users<S: KeyValueStore + ?Sized>(store: &S) -> Result<HashMap<String, UserRecord>, StoreError> {
    Ok(load_json(store, USERS_KEY)?.unwrap_or_default())
}

fn start_session<S: KeyValueStore + ?Sized>(store: &mut S, username: &str) -> Result<(), StoreError> {
    let session = Session {
        username: username.to_string(),
        logged_in_at: Utc::now(),
    };
    save_json(store, SESSION_KEY, &session)
}

/// Create an account and log it in.
pub fn register<S: KeyValueStore + ?Sized>(
    store: &mut S,
    username: &str,
    password: &str,
) -> Result<String, AccountError> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(AccountError::MissingCredentials);
    }

    let mut users = load_users(store)?;
    if users.contains_key(username) {
        return Err(AccountError::UsernameTaken(username.to_string()));
    }

    let salt = digest::new_salt();
    let record = UserRecord {
        password_digest: digest::password_digest(&salt, password),
        salt,
        created_at: Utc::now(),
    };
    users.insert(username.to_string(), record);
    save_json(store, USERS_KEY, &users)?;
    start_session(store, username)?;

    tracing::info!(username, "registered account");
    Ok(username.to_string())
}

/// Check credentials and start a session.
///
/// Unknown users and wrong passwords produce the same error.
pub fn login<S: KeyValueStore + ?Sized>(
    store: &mut S,
    username: &str,
    password: &str,
) -> Result<String, AccountError> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(AccountError::MissingCredentials);
    }

    let users = load_users(store)?;
    let matches = users
        .get(username)
        .map(|u| digest::password_digest(&u.salt, password) == u.password_digest)
        .unwrap_or(false);
    if !matches {
        tracing::debug!(username, "login rejected");
        return Err(AccountError::InvalidCredentials);
    }

    start_session(store, username)?;
    tracing::info!(username, "logged in");
    Ok(username.to_string())
}

/// End the current session. Returns true if someone was logged in.
pub fn logout<S: KeyValueStore + ?Sized>(store: &mut S) -> Result<bool, AccountError> {
    Ok(store.remove(SESSION_KEY)?)
}

/// Username of the logged-in user, if any.
pub fn current_user<S: KeyValueStore + ?Sized>(store: &S) -> Result<Option<String>, AccountError> {
    let session: Option<Session> = load_json(store, SESSION_KEY)?;
    Ok(session.map(|s| s.username))
}

/// Like [`current_user`] but fails when nobody is logged in.
pub fn require_user<S: KeyValueStore + ?Sized>(store: &S) -> Result<String, AccountError> {
    current_user(store)?.ok_or(AccountError::NotLoggedIn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_register_logs_in() {
        let mut store = MemoryStore::new();
        let user = register(&mut store, "alice", "secret").unwrap();
        assert_eq!(user, "alice");
        assert_eq!(current_user(&store).unwrap().as_deref(), Some("alice"));
    }

    #[test]
    fn test_register_trims_username() {
        let mut store = MemoryStore::new();
        register(&mut store, "  alice ", "secret").unwrap();
        logout(&mut store).unwrap();
        assert!(login(&mut store, "alice", "secret").is_ok());
    }

    #[test]
    fn test_register_requires_both_fields() {
        let mut store = MemoryStore::new();
        assert!(matches!(
            register(&mut store, "", "pw"),
            Err(AccountError::MissingCredentials)
        ));
        assert!(matches!(
            register(&mut store, "bob", ""),
            Err(AccountError::MissingCredentials)
        ));
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let mut store = MemoryStore::new();
        register(&mut store, "alice", "one").unwrap();
        let err = register(&mut store, "alice", "two").unwrap_err();
        assert!(matches!(err, AccountError::UsernameTaken(ref u) if u == "alice"));
    }

    #[test]
    fn test_login_roundtrip() {
        let mut store = MemoryStore::new();
        register(&mut store, "alice", "secret").unwrap();
        logout(&mut store).unwrap();

        assert!(matches!(
            login(&mut store, "alice", "wrong"),
            Err(AccountError::InvalidCredentials)
        ));
        assert_eq!(current_user(&store).unwrap(), None);

        login(&mut store, "alice", "secret").unwrap();
        assert_eq!(current_user(&store).unwrap().as_deref(), Some("alice"));
    }

    #[test]
    fn test_login_unknown_user_same_error() {
        let mut store = MemoryStore::new();
        assert!(matches!(
            login(&mut store, "ghost", "pw"),
            Err(AccountError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_password_not_stored_in_plaintext() {
        let mut store = MemoryStore::new();
        register(&mut store, "alice", "hunter2").unwrap();
        let blob = store.get(USERS_KEY).unwrap().unwrap();
        assert!(!blob.contains("hunter2"));
    }

    #[test]
    fn test_logout() {
        let mut store = MemoryStore::new();
        assert!(!logout(&mut store).unwrap());
        register(&mut store, "alice", "pw").unwrap();
        assert!(logout(&mut store).unwrap());
        assert_eq!(current_user(&store).unwrap(), None);
        assert!(matches!(require_user(&store), Err(AccountError::NotLoggedIn)));
    }
}
