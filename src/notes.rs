//! The note and everything sent to the backend to change one

use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;

/// Server-assigned identifier of a note
///
/// Opaque to the console, the backend may hand out strings or numbers
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NoteId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NoteId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl<'de> Deserialize<'de> for NoteId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(id) => Self(id),
            RawId::Number(id) => Self(id.to_string()),
        })
    }
}

/// Note colors
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Color {
    /// Default of the notes page
    #[default]
    Grey,
    Green,
    Yellow,
    Red,
    /// Default of the dashboard
    Cream,
    /// Anything outside the palette the backend already had, kept as-is
    Custom(String),
}

impl Color {
    /// The colors a user can pick from
    pub const PALETTE: [Self; 5] = [
        Self::Grey,
        Self::Green,
        Self::Yellow,
        Self::Red,
        Self::Cream,
    ];

    pub fn hex(&self) -> &str {
        match self {
            Self::Grey => "#f5f5f5",
            Self::Green => "#2e7d32",
            Self::Yellow => "#f9a825",
            Self::Red => "#c62828",
            Self::Cream => "#fff9c4",
            Self::Custom(hex) => hex.as_str(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Grey => "grey",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
            Self::Cream => "cream",
            Self::Custom(hex) => hex.as_str(),
        }
    }

    /// Find a palette color by its name or hex value, ignoring case
    fn from_palette(value: &str) -> Option<Self> {
        let value = value.trim();

        Self::PALETTE.into_iter().find(|color| {
            color.hex().eq_ignore_ascii_case(value) || color.name().eq_ignore_ascii_case(value)
        })
    }
}

impl FromStr for Color {
    type Err = String;

    /// Only palette colors can be picked
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_palette(value).ok_or_else(|| {
            let names = Self::PALETTE
                .iter()
                .map(Color::name)
                .collect::<Vec<_>>()
                .join(", ");

            format!("Unknown color `{value}`, pick one of: {names}")
        })
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;

        Ok(Self::from_palette(&value).unwrap_or(Self::Custom(value)))
    }
}

/// Missing and `null` values both become the default
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A note as the backend knows it
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub color: Color,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_pinned: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_reminder: bool,
    #[serde(default)]
    pub reminder_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub show_in_job_list: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    /// Revision maintained by the backend, when it supports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
}

/// A note to be created
///
/// The backend assigns the ID and creation date
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub color: Color,
    pub is_pinned: bool,
    pub is_reminder: bool,
    pub reminder_date: Option<DateTime<Utc>>,
    pub show_in_job_list: bool,
}

impl NewNote {
    /// Empty note in the given color, reminder date seeded with now
    pub fn seeded(color: Color) -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            color,
            is_pinned: false,
            is_reminder: false,
            reminder_date: Some(Utc::now()),
            show_in_job_list: false,
        }
    }

    /// Does the note have a title that is not only whitespace
    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }

    /// Drop the reminder date of a note that is no reminder
    pub fn normalize_reminder(&mut self) {
        if !self.is_reminder {
            self.reminder_date = None;
        }
    }
}

/// Fields to change on a note, absent fields are left out of the request
///
/// The backend answers with the complete note, which replaces the local one
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_pinned: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_reminder: Option<bool>,

    /// `Some(None)` is sent as an explicit `null`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder_date: Option<Option<DateTime<Utc>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_in_job_list: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    /// Version the change is based on, sent as a precondition header
    #[serde(skip)]
    pub version: Option<i64>,
}

impl NoteUpdate {
    /// Every field of the note, so nothing is lost when the response replaces it
    pub fn full(note: &Note) -> Self {
        Self {
            title: Some(note.title.clone()),
            content: Some(note.content.clone()),
            color: Some(note.color.clone()),
            is_pinned: Some(note.is_pinned),
            is_reminder: Some(note.is_reminder),
            reminder_date: Some(note.reminder_date),
            show_in_job_list: Some(note.show_in_job_list),
            updated_at: note.updated_at,
            version: note.version,
        }
    }

    /// Mark the change with the current time
    #[must_use]
    pub fn touched(mut self) -> Self {
        self.updated_at = Some(Utc::now());
        self
    }

    /// A note that is no reminder has no reminder date
    pub fn normalize_reminder(&mut self) {
        if self.is_reminder == Some(false) {
            self.reminder_date = Some(None);
        }
    }
}

/// What to do with a reminder
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReminderAction {
    /// Done, the note stops being a reminder
    Complete,

    /// Move the reminder to a new date
    Reschedule(DateTime<Utc>),
}

/// Body of the reminder endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderRequest {
    action: &'static str,
    new_date: Option<DateTime<Utc>>,
}

impl From<ReminderAction> for ReminderRequest {
    fn from(action: ReminderAction) -> Self {
        match action {
            ReminderAction::Complete => Self {
                action: "complete",
                new_date: None,
            },
            ReminderAction::Reschedule(new_date) => Self {
                action: "reschedule",
                new_date: Some(new_date),
            },
        }
    }
}
