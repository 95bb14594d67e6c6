//! Remote data gateway for notes
//!
//! Pass-through to the backend, the store decides what happens with the results

use crate::error::Result;
use crate::notes::NewNote;
use crate::notes::Note;
use crate::notes::NoteId;
use crate::notes::NoteUpdate;
use crate::notes::ReminderAction;

pub use http::Http;

mod http;

/// Backend with all supported note operations
pub trait Gateway {
    /// All notes of the current user
    async fn list_notes(&self) -> Result<Vec<Note>>;

    /// Create a note, the backend assigns ID and creation date
    async fn create_note(&self, note: &NewNote) -> Result<Note>;

    /// Send the given fields, get back the complete note
    async fn update_note(&self, id: &NoteId, update: &NoteUpdate) -> Result<Note>;

    /// Delete a note
    async fn delete_note(&self, id: &NoteId) -> Result<()>;

    /// Complete or reschedule a reminder, get back the complete note
    async fn update_reminder(&self, id: &NoteId, action: ReminderAction) -> Result<Note>;
}
