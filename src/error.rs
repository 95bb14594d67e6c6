//! Errors of all note interactions

use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can go wrong talking to the backend or handling the session
#[derive(Debug, Error)]
pub enum Error {
    /// A note needs a title, checked before anything is sent
    #[error("Title is required")]
    EmptyTitle,

    /// Rescheduling a reminder needs a new date
    #[error("A new reminder date is required")]
    MissingReminderDate,

    /// The backend could not be reached
    #[error("Network error: {0}")]
    Network(String),

    /// The backend does not know the note
    #[error("Note not found")]
    NotFound,

    /// The note changed on the backend since it was fetched
    #[error("Note was changed by someone else, reload and try again")]
    Conflict,

    /// Any other failed response of the backend
    #[error("Server error ({status}): {message}")]
    Server {
        /// Status code of the response
        status: StatusCode,

        /// Human-readable message, taken from the response when available
        message: String,
    },

    /// The backend responded with something that is not a note
    #[error("Invalid response: {0}")]
    Decode(String),

    /// There is no session to act on behalf of
    #[error("Not logged in, run `fieldnote login` first")]
    NotLoggedIn,

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading or writing the session file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The session file is not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for all note interactions
pub type Result<T> = core::result::Result<T, Error>;
