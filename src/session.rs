//! The session of the logged in user
//!
//! Loaded once on start-up and handed to everything that needs it, written on
//! login and removed on logout

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::config::Config;
use crate::error::Error;
use crate::error::Result;

/// User roles
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// Manage everything, including users and reports
    Admin,
    /// Work the job lists and notes
    #[default]
    Employee,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Employee => "Employee",
        }
    }
}

/// The user a session belongs to
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct SessionUser {
    pub username: String,
    #[serde(default)]
    pub role: Role,
}

/// Token and user of the current session
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Session {
    /// Bearer token sent along with every request
    pub token: String,
    pub user: SessionUser,
}

impl Session {
    pub fn new(token: String, username: String, role: Role) -> Self {
        Self {
            token,
            user: SessionUser { username, role },
        }
    }

    /// Value of the `Authorization` header
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Session kept on disk between runs
#[derive(Clone, Debug)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new<P>(path: P) -> Self
    where
        P: Into<PathBuf>,
    {
        Self { path: path.into() }
    }

    /// Read the stored session, if any
    pub fn load(&self) -> Result<Option<Session>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Store the session, replacing any previous one
    pub fn save(&self, session: &Session) -> Result<()> {
        fs::write(&self.path, serde_json::to_vec_pretty(session)?)?;

        tracing::info!("Logged in as {}", session.user.username);

        Ok(())
    }

    /// Forget the stored session
    ///
    /// Returns `false` when there was nothing to forget
    pub fn clear(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!("Logged out");
                Ok(true)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}

/// Find the session to act with
///
/// A token from the configuration wins over the stored one
pub fn resolve(config: &Config, session_file: &SessionFile) -> Result<Session> {
    let stored = session_file.load()?;

    match (config.token.clone(), stored) {
        (Some(token), Some(stored)) => Ok(Session { token, ..stored }),
        (Some(token), None) => Ok(Session::new(
            token,
            "api-token".to_string(),
            Role::default(),
        )),
        (None, Some(stored)) => Ok(stored),
        (None, None) => Err(Error::NotLoggedIn),
    }
}
