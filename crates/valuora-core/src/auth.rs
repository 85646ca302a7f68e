//! Session handling behind an [`Authenticator`] seam.
//!
//! The shipped [`DemoAuthenticator`] only checks the shape of the
//! credentials and mints a random token. It keeps the demo flow working and
//! is not a security boundary; a real identity provider plugs in through
//! the same trait.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::http_client::HttpAuth;
use crate::storage::{LocalStore, StorageError, SESSION_KEY};
use crate::UtcDateTime;

const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("'{email}' is not a valid e-mail address")]
    InvalidEmail { email: String },

    #[error("password must be at least {min} characters")]
    WeakPassword { min: usize },

    #[error("not logged in")]
    NotLoggedIn,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// An authenticated user session.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub email: String,
    token: String,
    pub issued_at: UtcDateTime,
}

impl Session {
    pub fn new(email: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            token: token.into(),
            issued_at: UtcDateTime::now(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn http_auth(&self) -> HttpAuth {
        HttpAuth::BearerToken(self.token.clone())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("email", &self.email)
            .field("token", &"<redacted>")
            .field("issued_at", &self.issued_at)
            .finish()
    }
}

pub trait Authenticator: Send + Sync {
    fn login(&self, credentials: &Credentials) -> Result<Session, AuthError>;
}

/// Client-only login used by the demo product.
#[derive(Debug, Default, Clone, Copy)]
pub struct DemoAuthenticator;

impl Authenticator for DemoAuthenticator {
    fn login(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        let email = credentials.email.trim();
        if !looks_like_email(email) {
            return Err(AuthError::InvalidEmail {
                email: email.to_owned(),
            });
        }

        if credentials.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword {
                min: MIN_PASSWORD_LEN,
            });
        }

        Ok(Session::new(
            email.to_ascii_lowercase(),
            Uuid::new_v4().simple().to_string(),
        ))
    }
}

fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        && !value.chars().any(char::is_whitespace)
}

/// Persists the current session in a [`LocalStore`].
pub struct SessionManager<'s, S: LocalStore> {
    store: &'s S,
    authenticator: Box<dyn Authenticator>,
}

impl<'s, S: LocalStore> SessionManager<'s, S> {
    pub fn new(store: &'s S, authenticator: impl Authenticator + 'static) -> Self {
        Self {
            store,
            authenticator: Box::new(authenticator),
        }
    }

    pub fn login(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        let session = self.authenticator.login(credentials)?;
        self.store.save(SESSION_KEY, &session)?;
        tracing::info!(email = %session.email, "logged in");
        Ok(session)
    }

    /// Returns whether a session was active.
    pub fn logout(&self) -> Result<bool, AuthError> {
        Ok(self.store.remove(SESSION_KEY)?)
    }

    /// Current session, if any. An unreadable stored session counts as
    /// logged out.
    pub fn current(&self) -> Result<Option<Session>, AuthError> {
        match self.store.load::<Session>(SESSION_KEY) {
            Ok(session) => Ok(session),
            Err(StorageError::Serialization { .. }) => {
                tracing::warn!("discarding unreadable stored session");
                Ok(None)
            }
            Err(error) => Err(error.into()),
        }
    }

    pub fn require(&self) -> Result<Session, AuthError> {
        self.current()?.ok_or(AuthError::NotLoggedIn)
    }
}
