//! Command line interface

use chrono::DateTime;
use chrono::Utc;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

use crate::board::Page;
use crate::console::NoteChanges;
use crate::console::NoteForm;
use crate::console::ReminderChange;
use crate::error::Error;
use crate::error::Result;
use crate::notes::Color;
use crate::notes::NoteId;
use crate::notes::ReminderAction;
use crate::session::Role;

#[derive(Parser, Debug)]
#[command(name = "fieldnote")]
#[command(version, about = "Notes and reminders of the field-service admin console")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Store the session to act with
    Login {
        /// Bearer token handed out by the backend
        #[arg(long)]
        token: String,

        #[arg(long)]
        username: String,

        #[arg(long, value_enum, default_value = "employee")]
        role: RoleArg,
    },

    /// Forget the stored session
    Logout,

    /// Show who is logged in
    Whoami,

    /// List notes, pinned notes first
    List {
        /// Page to list the notes of
        #[arg(long, value_enum, default_value = "notes")]
        page: PageArg,

        /// Only notes with this in their title (notes page)
        #[arg(long, short = 's')]
        search: Option<String>,

        /// Show the content of every note
        #[arg(long, short = 'e')]
        expanded: bool,
    },

    /// Create a note
    Create {
        title: String,

        #[arg(long, short = 'c', default_value = "")]
        content: String,

        /// Note color (grey, green, yellow, red, cream), defaults per page
        #[arg(long)]
        color: Option<Color>,

        /// Make the note a reminder at this date (RFC 3339)
        #[arg(long)]
        remind_at: Option<DateTime<Utc>>,

        #[arg(long)]
        pin: bool,

        /// Also show the note next to the job lists
        #[arg(long)]
        job_list: bool,

        /// Page the note is created from
        #[arg(long, value_enum, default_value = "notes")]
        page: PageArg,
    },

    /// Edit a note
    Edit {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long, short = 'c')]
        content: Option<String>,

        #[arg(long)]
        color: Option<Color>,

        /// Make the note a reminder at this date (RFC 3339)
        #[arg(long, conflicts_with = "no_reminder")]
        remind_at: Option<DateTime<Utc>>,

        /// Stop the note being a reminder
        #[arg(long)]
        no_reminder: bool,
    },

    /// Replace the content of a note
    Content { id: String, content: String },

    /// Pin or unpin a note
    Pin { id: String },

    /// Show or hide a note next to the job lists
    JobList { id: String },

    /// Delete a note
    Delete {
        id: String,

        /// Confirm the deletion
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Complete or reschedule a reminder
    Remind {
        id: String,

        #[arg(value_enum)]
        action: ReminderArg,

        /// New date of a rescheduled reminder (RFC 3339)
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum PageArg {
    Dashboard,
    Notes,
    JobList,
}

impl PageArg {
    pub fn into_page(self, search: Option<String>) -> Page {
        match self {
            PageArg::Dashboard => Page::Dashboard,
            PageArg::Notes => Page::Notes {
                query: search.unwrap_or_default(),
            },
            PageArg::JobList => Page::JobList,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum RoleArg {
    Admin,
    Employee,
}

impl From<RoleArg> for Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Admin => Role::Admin,
            RoleArg::Employee => Role::Employee,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ReminderArg {
    Complete,
    Reschedule,
}

/// Build the reminder action, rescheduling needs a date
pub fn reminder_action(action: ReminderArg, at: Option<DateTime<Utc>>) -> Result<ReminderAction> {
    match (action, at) {
        (ReminderArg::Complete, _) => Ok(ReminderAction::Complete),
        (ReminderArg::Reschedule, Some(at)) => Ok(ReminderAction::Reschedule(at)),
        (ReminderArg::Reschedule, None) => Err(Error::MissingReminderDate),
    }
}

pub fn note_form(
    title: String,
    content: String,
    color: Option<Color>,
    remind_at: Option<DateTime<Utc>>,
    pin: bool,
    job_list: bool,
) -> NoteForm {
    NoteForm {
        title,
        content,
        color,
        remind_at,
        pinned: pin,
        show_in_job_list: job_list,
    }
}

pub fn note_changes(
    title: Option<String>,
    content: Option<String>,
    color: Option<Color>,
    remind_at: Option<DateTime<Utc>>,
    no_reminder: bool,
) -> NoteChanges {
    let reminder = if no_reminder {
        Some(ReminderChange::Off)
    } else {
        remind_at.map(ReminderChange::At)
    };

    NoteChanges {
        title,
        content,
        color,
        reminder,
    }
}

pub fn note_id(id: String) -> NoteId {
    NoteId::from(id)
}
