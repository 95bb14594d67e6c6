//! The note card
//!
//! One card for every place a note is shown, what it allows depends on its
//! capabilities. A card never talks to the store itself: interactions that
//! change a note hand back an [`Intent`] for the caller to dispatch, and the
//! card only reflects the change once the store has the response.

use chrono::DateTime;
use chrono::Utc;

use crate::notes::Color;
use crate::notes::Note;
use crate::notes::NoteId;
use crate::notes::NoteUpdate;

/// A change a card wants to make to its note
#[derive(Clone, Debug, PartialEq)]
pub enum Intent {
    Update { id: NoteId, update: NoteUpdate },
    Remove { id: NoteId },
}

/// What a card allows, depending on where it is shown
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capabilities {
    /// Clicking the card opens and closes its content
    pub expandable: bool,

    /// Double-clicking the content edits it in place
    pub inline_editable: bool,

    /// The pin control is shown
    pub pin_toggle: bool,

    /// The control to show the note next to the job lists is shown
    pub job_list_toggle: bool,
}

impl Capabilities {
    /// Dashboard and notes page
    pub const FULL: Self = Self {
        expandable: true,
        inline_editable: true,
        pin_toggle: true,
        job_list_toggle: true,
    };

    /// Sidebar next to the job lists
    pub const JOB_LIST: Self = Self {
        expandable: true,
        inline_editable: true,
        pin_toggle: false,
        job_list_toggle: true,
    };
}

/// Where a click landed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOrigin {
    /// The card itself
    Surface,

    /// One of the controls on the card, never toggles the card
    Control,
}

/// How much of the card is shown
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expansion {
    Collapsed,
    Expanded,

    /// Expanded, with the content being edited in place
    InlineEditing { buffer: String },
}

/// Working copy of a note in the edit dialog
#[derive(Clone, Debug, PartialEq)]
pub struct EditDraft {
    pub title: String,
    pub content: String,
    pub color: Color,
    pub is_pinned: bool,
    pub show_in_job_list: bool,
    is_reminder: bool,
    reminder_date: Option<DateTime<Utc>>,
    version: Option<i64>,
}

impl EditDraft {
    fn from_note(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone(),
            color: note.color.clone(),
            is_pinned: note.is_pinned,
            show_in_job_list: note.show_in_job_list,
            is_reminder: note.is_reminder,
            reminder_date: Some(note.reminder_date.unwrap_or_else(Utc::now)),
            version: note.version,
        }
    }

    pub fn is_reminder(&self) -> bool {
        self.is_reminder
    }

    pub fn reminder_date(&self) -> Option<DateTime<Utc>> {
        self.reminder_date
    }

    /// Switching the reminder on starts it at now, switching it off drops the date
    pub fn set_reminder(&mut self, is_reminder: bool) {
        self.is_reminder = is_reminder;
        self.reminder_date = is_reminder.then(Utc::now);
    }

    /// Pick the reminder date, only while the draft is a reminder
    pub fn set_reminder_date(&mut self, reminder_date: DateTime<Utc>) {
        if self.is_reminder {
            self.reminder_date = Some(reminder_date);
        }
    }

    fn into_update(self) -> NoteUpdate {
        NoteUpdate {
            title: Some(self.title),
            content: Some(self.content),
            color: Some(self.color),
            is_pinned: Some(self.is_pinned),
            is_reminder: Some(self.is_reminder),
            reminder_date: Some(if self.is_reminder {
                self.reminder_date
            } else {
                None
            }),
            show_in_job_list: Some(self.show_in_job_list),
            updated_at: None,
            version: self.version,
        }
        .touched()
    }
}

/// Per-card state, owned by the view showing the card
#[derive(Clone, Debug)]
pub struct NoteCard {
    id: NoteId,
    capabilities: Capabilities,
    expansion: Expansion,
    draft: Option<EditDraft>,
    confirming_delete: bool,
}

impl NoteCard {
    pub fn new(note: &Note, capabilities: Capabilities, expanded: bool) -> Self {
        Self {
            id: note.id.clone(),
            capabilities,
            expansion: if expanded {
                Expansion::Expanded
            } else {
                Expansion::Collapsed
            },
            draft: None,
            confirming_delete: false,
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn expansion(&self) -> &Expansion {
        &self.expansion
    }

    pub fn is_expanded(&self) -> bool {
        !matches!(self.expansion, Expansion::Collapsed)
    }

    /// Toggle between collapsed and expanded
    pub fn click(&mut self, origin: ClickOrigin) {
        if origin == ClickOrigin::Control || !self.capabilities.expandable {
            return;
        }

        self.expansion = match self.expansion {
            Expansion::Collapsed => Expansion::Expanded,
            Expansion::Expanded => Expansion::Collapsed,
            // clicks inside the editor stay inside the editor
            Expansion::InlineEditing { .. } => return,
        };
    }

    /// Start editing the content in place, only when expanded
    pub fn double_click_content(&mut self, note: &Note) {
        if self.capabilities.inline_editable && self.expansion == Expansion::Expanded {
            self.expansion = Expansion::InlineEditing {
                buffer: note.content.clone(),
            };
        }
    }

    /// Replace the text being edited in place
    pub fn inline_input(&mut self, text: &str) {
        if let Expansion::InlineEditing { buffer } = &mut self.expansion {
            text.clone_into(buffer);
        }
    }

    /// Blur or Ctrl+Enter, an unchanged content asks for nothing
    pub fn commit_inline(&mut self, note: &Note) -> Option<Intent> {
        if !matches!(self.expansion, Expansion::InlineEditing { .. }) {
            return None;
        }

        let Expansion::InlineEditing { buffer } =
            std::mem::replace(&mut self.expansion, Expansion::Expanded)
        else {
            return None;
        };

        if buffer == note.content {
            return None;
        }

        let update = NoteUpdate {
            content: Some(buffer),
            ..NoteUpdate::full(note)
        };

        Some(self.update(update.touched()))
    }

    /// Escape, the edited text is dropped
    pub fn cancel_inline(&mut self) {
        if matches!(self.expansion, Expansion::InlineEditing { .. }) {
            self.expansion = Expansion::Expanded;
        }
    }

    /// Open the edit dialog with a working copy of the note
    pub fn open_full_edit(&mut self, note: &Note) {
        self.draft = Some(EditDraft::from_note(note));
    }

    pub fn draft(&self) -> Option<&EditDraft> {
        self.draft.as_ref()
    }

    pub fn draft_mut(&mut self) -> Option<&mut EditDraft> {
        self.draft.as_mut()
    }

    /// Save the edit dialog
    ///
    /// A draft without a title keeps the dialog open
    pub fn save_full_edit(&mut self) -> Option<Intent> {
        if self
            .draft
            .as_ref()
            .is_none_or(|draft| draft.title.trim().is_empty())
        {
            return None;
        }

        let draft = self.draft.take()?;

        Some(self.update(draft.into_update()))
    }

    /// Close the edit dialog, the working copy is dropped
    pub fn cancel_full_edit(&mut self) {
        self.draft = None;
    }

    /// Ask for confirmation before deleting
    pub fn request_delete(&mut self) {
        self.confirming_delete = true;
    }

    pub fn is_confirming_delete(&self) -> bool {
        self.confirming_delete
    }

    pub fn confirm_delete(&mut self) -> Option<Intent> {
        if !std::mem::take(&mut self.confirming_delete) {
            return None;
        }

        Some(Intent::Remove {
            id: self.id.clone(),
        })
    }

    /// Close the confirmation, the note stays
    pub fn dismiss_delete(&mut self) {
        self.confirming_delete = false;
    }

    pub fn toggle_pin(&self, note: &Note) -> Option<Intent> {
        if !self.capabilities.pin_toggle {
            return None;
        }

        let update = NoteUpdate {
            is_pinned: Some(!note.is_pinned),
            ..NoteUpdate::full(note)
        };

        Some(self.update(update.touched()))
    }

    pub fn toggle_job_list(&self, note: &Note) -> Option<Intent> {
        if !self.capabilities.job_list_toggle {
            return None;
        }

        let update = NoteUpdate {
            show_in_job_list: Some(!note.show_in_job_list),
            ..NoteUpdate::full(note)
        };

        Some(self.update(update.touched()))
    }

    fn update(&self, update: NoteUpdate) -> Intent {
        Intent::Update {
            id: self.id.clone(),
            update,
        }
    }
}
