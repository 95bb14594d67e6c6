//! The note store
//!
//! Single source of truth for the notes on screen. Every change goes through
//! the gateway first, the local collection only follows the responses.

use crate::card::Intent;
use crate::error::Error;
use crate::error::Result;
use crate::gateway::Gateway;
use crate::notes::NewNote;
use crate::notes::Note;
use crate::notes::NoteId;
use crate::notes::NoteUpdate;
use crate::notes::ReminderAction;
use crate::views;

/// Where the last full load stands
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Status {
    /// Nothing loaded yet
    #[default]
    Idle,
    Loading,
    Succeeded,
    /// Loading failed with the given message
    Failed(String),
}

/// In-memory collection of notes, kept in sync with the backend
#[derive(Debug)]
pub struct Store<G> {
    gateway: G,
    notes: Vec<Note>,
    status: Status,
}

impl<G> Store<G>
where
    G: Gateway,
{
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            notes: Vec::new(),
            status: Status::Idle,
        }
    }

    /// All notes, in the order they were received
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Message of the last failed load
    pub fn error(&self) -> Option<&str> {
        match &self.status {
            Status::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn get(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| &note.id == id)
    }

    /// Notes in display order, derived on every call
    pub fn sorted(&self) -> Vec<&Note> {
        views::sorted(&self.notes)
    }

    /// Replace the whole collection with what the backend has
    ///
    /// On failure the collection stays as it was
    pub async fn list(&mut self) -> Result<()> {
        self.status = Status::Loading;

        match self.gateway.list_notes().await {
            Ok(notes) => {
                tracing::debug!("Loaded {} notes", notes.len());

                self.notes = notes;
                self.status = Status::Succeeded;

                Ok(())
            }
            Err(err) => {
                tracing::warn!("Could not load notes: {err}");

                self.status = Status::Failed(err.to_string());

                Err(err)
            }
        }
    }

    /// Create a note and put it in front
    ///
    /// A note without a title never reaches the backend
    pub async fn create(&mut self, mut draft: NewNote) -> Result<Note> {
        if !draft.has_title() {
            return Err(Error::EmptyTitle);
        }

        draft.normalize_reminder();

        let note = self.gateway.create_note(&draft).await?;

        tracing::info!("Created note {}", note.id);

        self.notes.insert(0, note.clone());

        Ok(note)
    }

    /// Update a note, the response replaces the stored note as a whole
    ///
    /// Fields not sent are whatever the backend answers with, so send the
    /// complete note to keep them
    pub async fn update(&mut self, id: &NoteId, mut update: NoteUpdate) -> Result<Note> {
        update.normalize_reminder();

        // a partial update of a note that is no reminder keeps it without date
        if update.is_reminder.is_none() && self.get(id).is_some_and(|note| !note.is_reminder) {
            update.reminder_date = Some(None);
        }

        let note = self.gateway.update_note(id, &update).await?;

        tracing::info!("Updated note {id}");

        self.replace(note.clone());

        Ok(note)
    }

    /// Delete a note and drop it from the collection
    pub async fn remove(&mut self, id: &NoteId) -> Result<()> {
        self.gateway.delete_note(id).await?;

        tracing::info!("Deleted note {id}");

        self.notes.retain(|note| &note.id != id);

        Ok(())
    }

    /// Complete or reschedule a reminder
    pub async fn handle_reminder(&mut self, id: &NoteId, action: ReminderAction) -> Result<Note> {
        let note = self.gateway.update_reminder(id, action).await?;

        tracing::info!("Handled reminder of note {id}");

        self.replace(note.clone());

        Ok(note)
    }

    /// Carry out what a note card asked for
    pub async fn dispatch(&mut self, intent: Intent) -> Result<()> {
        match intent {
            Intent::Update { id, update } => self.update(&id, update).await.map(|_| ()),
            Intent::Remove { id } => self.remove(&id).await,
        }
    }

    /// Swap in the note with the same ID, notes unknown locally are ignored
    fn replace(&mut self, note: Note) {
        if let Some(existing) = self.notes.iter_mut().find(|existing| existing.id == note.id) {
            *existing = note;
        }
    }
}
