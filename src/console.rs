//! The console
//!
//! Ties the session, the store and the pages together. Every interaction ends
//! up as a notification, failures never go further than the interaction that
//! caused them.

use chrono::DateTime;
use chrono::Utc;

use crate::board::Board;
use crate::board::Page;
use crate::card::ClickOrigin;
use crate::card::EditDraft;
use crate::card::Intent;
use crate::card::NoteCard;
use crate::error::Error;
use crate::error::Result;
use crate::gateway::Gateway;
use crate::notes::Color;
use crate::notes::Note;
use crate::notes::NoteId;
use crate::notes::ReminderAction;
use crate::notify::Notifications;
use crate::render;
use crate::session::Session;
use crate::store::Status;
use crate::store::Store;

/// A note as filled in the create dialog
#[derive(Clone, Debug, Default)]
pub struct NoteForm {
    pub title: String,
    pub content: String,

    /// Page default when absent
    pub color: Option<Color>,
    pub remind_at: Option<DateTime<Utc>>,
    pub pinned: bool,
    pub show_in_job_list: bool,
}

/// Change to the reminder in the edit dialog
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReminderChange {
    Off,
    At(DateTime<Utc>),
}

/// Changes made in the edit dialog, absent fields stay as they are
#[derive(Clone, Debug, Default)]
pub struct NoteChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub color: Option<Color>,
    pub reminder: Option<ReminderChange>,
}

impl NoteChanges {
    fn apply(self, draft: &mut EditDraft) {
        if let Some(title) = self.title {
            draft.title = title;
        }

        if let Some(content) = self.content {
            draft.content = content;
        }

        if let Some(color) = self.color {
            draft.color = color;
        }

        match self.reminder {
            Some(ReminderChange::Off) => draft.set_reminder(false),
            Some(ReminderChange::At(reminder_date)) => {
                draft.set_reminder(true);
                draft.set_reminder_date(reminder_date);
            }
            None => {}
        }
    }
}

/// Console of a logged in user
#[derive(Debug)]
pub struct Console<G> {
    session: Session,
    store: Store<G>,
    notifications: Notifications,
}

impl<G> Console<G>
where
    G: Gateway,
{
    pub fn new(session: Session, gateway: G) -> Self {
        Self {
            session,
            store: Store::new(gateway),
            notifications: Notifications::default(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn store(&self) -> &Store<G> {
        &self.store
    }

    pub fn notifications(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    /// Show a page, optionally with every card opened
    pub async fn show(&mut self, page: Page, expanded: bool) -> String {
        let mut board = Board::new(page);

        if let Err(err) = board.mount(&mut self.store, self.session.user.role).await {
            self.notifications.error(&err);
            return render::load_failed(self.store.error().unwrap_or_default());
        }

        let sections = board.render(self.store.notes());

        if expanded {
            // notes the page filters out have no card
            for note in self.store.sorted() {
                if let Some(card) = board.card_mut(&note.id)
                    && !card.is_expanded()
                {
                    card.click(ClickOrigin::Surface);
                }
            }
        }

        render::board(&board, &sections)
    }

    /// Create a note through the create dialog of a page
    pub async fn create(&mut self, page: Page, form: NoteForm) -> String {
        let mut board = Board::new(page);
        let dialog = board.create_dialog();

        dialog.open();

        let draft = dialog.draft_mut();
        draft.title = form.title;
        draft.content = form.content;
        draft.is_pinned = form.pinned;
        draft.show_in_job_list = form.show_in_job_list;

        if let Some(color) = form.color {
            draft.color = color;
        }

        if let Some(remind_at) = form.remind_at {
            draft.is_reminder = true;
            draft.reminder_date = Some(remind_at);
        }

        match dialog.submit(&mut self.store).await {
            Ok(note) => {
                self.notifications.success(format!("Created note {}", note.id));
                render::card(&note, None)
            }
            Err(err) => {
                self.notifications.error(&err);
                String::new()
            }
        }
    }

    /// Change a note through the edit dialog of its card
    pub async fn edit(&mut self, id: &NoteId, changes: NoteChanges) -> String {
        let result = self
            .with_card(id, |note, card| {
                card.open_full_edit(note);

                if let Some(draft) = card.draft_mut() {
                    changes.apply(draft);
                }

                card.save_full_edit().ok_or(Error::EmptyTitle).map(Some)
            })
            .await;

        self.finish(id, result, "Saved note").await
    }

    /// Replace the content, the way it is edited in place on a card
    pub async fn set_content(&mut self, id: &NoteId, content: &str) -> String {
        let result = self
            .with_card(id, |note, card| {
                if !card.is_expanded() {
                    card.click(ClickOrigin::Surface);
                }

                card.double_click_content(note);
                card.inline_input(content);

                Ok(card.commit_inline(note))
            })
            .await;

        self.finish(id, result, "Saved note").await
    }

    pub async fn toggle_pin(&mut self, id: &NoteId) -> String {
        let result = self
            .with_card(id, |note, card| Ok(card.toggle_pin(note)))
            .await;

        self.finish(id, result, "Toggled pin of note").await
    }

    pub async fn toggle_job_list(&mut self, id: &NoteId) -> String {
        let result = self
            .with_card(id, |note, card| Ok(card.toggle_job_list(note)))
            .await;

        self.finish(id, result, "Toggled job list of note").await
    }

    /// Delete a note, only once confirmed
    pub async fn delete(&mut self, id: &NoteId, confirmed: bool) -> String {
        let mut question = String::new();

        let result = self
            .with_card(id, |note, card| {
                card.request_delete();
                question = render::card(note, Some(&*card));

                if confirmed {
                    Ok(card.confirm_delete())
                } else {
                    card.dismiss_delete();
                    Ok(None)
                }
            })
            .await;

        match result {
            Ok(None) => {
                self.notifications
                    .success("Nothing deleted, confirm with --yes");
                question
            }
            result => self.finish(id, result, "Deleted note").await,
        }
    }

    /// Complete or reschedule a reminder
    pub async fn reminder(&mut self, id: &NoteId, action: ReminderAction) -> String {
        let result = match self.find(id).await {
            Ok(_) => self.store.handle_reminder(id, action).await,
            Err(err) => Err(err),
        };

        match result {
            Ok(note) => {
                self.notifications
                    .success(format!("Updated reminder of note {id}"));
                render::card(&note, None)
            }
            Err(err) => {
                self.notifications.error(&err);
                String::new()
            }
        }
    }

    /// Load the notes if needed and find one
    async fn find(&mut self, id: &NoteId) -> Result<Note> {
        if self.store.status() != &Status::Succeeded {
            self.store.list().await?;
        }

        self.store.get(id).cloned().ok_or(Error::NotFound)
    }

    /// Run an interaction on the card of a note, giving back what the card asks for
    async fn with_card<F, T>(&mut self, id: &NoteId, interact: F) -> Result<T>
    where
        F: FnOnce(&Note, &mut NoteCard) -> Result<T>,
    {
        let note = self.find(id).await?;
        let mut board = Board::new(Page::Dashboard);
        board.render(self.store.notes());

        let card = board.card_mut(id).ok_or(Error::NotFound)?;

        interact(&note, card)
    }

    /// Dispatch what a card asked for and report back
    async fn finish(
        &mut self,
        id: &NoteId,
        intent: Result<Option<Intent>>,
        success: &str,
    ) -> String {
        let result = match intent {
            Ok(Some(intent)) => self.store.dispatch(intent).await,
            Ok(None) => {
                self.notifications.success("Nothing changed");
                return self.render_note(id);
            }
            Err(err) => Err(err),
        };

        match result {
            Ok(()) => {
                self.notifications.success(format!("{success} {id}"));
                self.render_note(id)
            }
            Err(err) => {
                self.notifications.error(&err);
                String::new()
            }
        }
    }

    fn render_note(&self, id: &NoteId) -> String {
        self.store
            .get(id)
            .map(|note| render::card(note, None))
            .unwrap_or_default()
    }
}
