//! Pages showing a list of note cards
//!
//! The dashboard, the notes page and the sidebar next to the job lists all
//! derive their list from the same sorted collection, each with its own filter
//! on top, and keep the card state of the notes they show.

use std::collections::HashMap;

use crate::card::Capabilities;
use crate::card::NoteCard;
use crate::error::Error;
use crate::error::Result;
use crate::gateway::Gateway;
use crate::notes::Color;
use crate::notes::NewNote;
use crate::notes::Note;
use crate::notes::NoteId;
use crate::session::Role;
use crate::store::Store;
use crate::views;
use crate::views::Sections;

/// The pages listing notes
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Page {
    Dashboard,

    /// Notes page, with a search on title
    Notes { query: String },

    /// Sidebar next to the job lists, admins only
    JobList,
}

impl Page {
    /// Color a new note starts with on this page
    pub fn default_color(&self) -> Color {
        match self {
            Page::Dashboard => Color::Cream,
            Page::Notes { .. } | Page::JobList => Color::Grey,
        }
    }

    fn capabilities(&self) -> Capabilities {
        match self {
            Page::Dashboard | Page::Notes { .. } => Capabilities::FULL,
            Page::JobList => Capabilities::JOB_LIST,
        }
    }

    /// Cards on the notes page start expanded
    fn expanded(&self) -> bool {
        matches!(self, Page::Notes { .. })
    }
}

/// Dialog to create a note
#[derive(Clone, Debug)]
pub struct CreateDialog {
    color: Color,
    open: bool,
    draft: NewNote,
}

impl CreateDialog {
    pub fn new(color: Color) -> Self {
        Self {
            draft: NewNote::seeded(color.clone()),
            color,
            open: false,
        }
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Close without creating, the draft is kept for next time
    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn draft(&self) -> &NewNote {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut NewNote {
        &mut self.draft
    }

    /// Create the note
    ///
    /// Without a title nothing is sent and the dialog stays open, just like on
    /// failure. Success closes the dialog and starts a fresh draft.
    pub async fn submit<G>(&mut self, store: &mut Store<G>) -> Result<Note>
    where
        G: Gateway,
    {
        if !self.draft.has_title() {
            return Err(Error::EmptyTitle);
        }

        let note = store.create(self.draft.clone()).await?;

        self.open = false;
        self.draft = NewNote::seeded(self.color.clone());

        Ok(note)
    }
}

/// A page with its cards and create dialog
#[derive(Debug)]
pub struct Board {
    page: Page,
    cards: HashMap<NoteId, NoteCard>,
    create: CreateDialog,
}

impl Board {
    pub fn new(page: Page) -> Self {
        Self {
            create: CreateDialog::new(page.default_color()),
            cards: HashMap::new(),
            page,
        }
    }

    /// Load the notes when the page is shown
    ///
    /// The job-list sidebar only loads them for admins
    pub async fn mount<G>(&mut self, store: &mut Store<G>, role: Role) -> Result<()>
    where
        G: Gateway,
    {
        if self.page == Page::JobList && role != Role::Admin {
            tracing::debug!("Notes next to the job lists are for admins only");
            return Ok(());
        }

        store.list().await
    }

    /// Change the search of the notes page, other pages ignore it
    pub fn set_query(&mut self, query: &str) {
        if let Page::Notes { query: current } = &mut self.page {
            query.clone_into(current);
        }
    }

    /// Derive what the page shows from the notes of the store
    ///
    /// Cards of notes that are gone are dropped, new notes get a fresh card
    pub fn render<'a>(&mut self, notes: &'a [Note]) -> Sections<'a> {
        let sorted = match &self.page {
            Page::Dashboard => views::sorted(notes),
            Page::Notes { query } => views::search(notes, query),
            Page::JobList => views::job_list(notes),
        };

        self.cards
            .retain(|id, _| sorted.iter().any(|note| &note.id == id));

        let capabilities = self.page.capabilities();
        let expanded = self.page.expanded();
        for note in &sorted {
            self.cards
                .entry(note.id.clone())
                .or_insert_with(|| NoteCard::new(note, capabilities, expanded));
        }

        views::sections(sorted)
    }

    pub fn card(&self, id: &NoteId) -> Option<&NoteCard> {
        self.cards.get(id)
    }

    pub fn card_mut(&mut self, id: &NoteId) -> Option<&mut NoteCard> {
        self.cards.get_mut(id)
    }

    pub fn create_dialog(&mut self) -> &mut CreateDialog {
        &mut self.create
    }

    /// What to show when there are no cards
    pub fn empty_message(&self) -> &'static str {
        match &self.page {
            Page::Notes { query } if !query.trim().is_empty() => "No notes match the search",
            Page::JobList => "No notes next to the job lists",
            _ => "No notes yet",
        }
    }
}
