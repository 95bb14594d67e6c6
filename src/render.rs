//! Plain-text rendering of pages and cards

use std::fmt::Write;

use chrono::DateTime;
use chrono::Utc;

use crate::board::Board;
use crate::card::Expansion;
use crate::card::NoteCard;
use crate::notes::Note;
use crate::session::Session;
use crate::views::Sections;

const DATE_FORMAT: &str = "%-d %B %Y %H:%M";
const CONTENT_PLACEHOLDER: &str = "Double-click to add content...";

fn date(date: DateTime<Utc>) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// A page, pinned notes in their own section
pub fn board(board: &Board, sections: &Sections) -> String {
    if sections.is_empty() {
        return format!("{}\n", board.empty_message());
    }

    let mut out = String::new();

    if !sections.pinned.is_empty() {
        out.push_str("== Pinned ==\n\n");
        for note in &sections.pinned {
            out.push_str(&card(note, board.card(&note.id)));
            out.push('\n');
        }
    }

    if !sections.unpinned.is_empty() {
        if !sections.pinned.is_empty() {
            out.push_str("== Notes ==\n\n");
        }

        for note in &sections.unpinned {
            out.push_str(&card(note, board.card(&note.id)));
            out.push('\n');
        }
    }

    out
}

/// A single card, the content only when expanded
pub fn card(note: &Note, card: Option<&NoteCard>) -> String {
    let mut out = String::new();

    let pin = if note.is_pinned { "* " } else { "" };
    let _ = writeln!(out, "{pin}{} [{}] ({})", note.title, note.id, note.color.name());
    let _ = writeln!(out, "  created {}", date(note.created_at));

    if note.is_reminder
        && let Some(reminder_date) = note.reminder_date
    {
        let _ = writeln!(out, "  reminder {}", date(reminder_date));
    }

    if note.show_in_job_list {
        out.push_str("  shown next to the job lists\n");
    }

    match card.map(NoteCard::expansion) {
        Some(Expansion::Expanded) => {
            let content = if note.content.is_empty() {
                CONTENT_PLACEHOLDER
            } else {
                note.content.as_str()
            };

            for line in content.lines() {
                let _ = writeln!(out, "  | {line}");
            }
        }
        Some(Expansion::InlineEditing { buffer }) => {
            for line in buffer.lines() {
                let _ = writeln!(out, "  > {line}");
            }
        }
        Some(Expansion::Collapsed) | None => {}
    }

    if card.is_some_and(NoteCard::is_confirming_delete) {
        let _ = writeln!(out, "  Delete the note \"{}\"?", note.title);
    }

    out
}

/// A page whose notes could not be loaded
pub fn load_failed(message: &str) -> String {
    format!("Could not load notes: {message}\n")
}

pub fn session(session: &Session) -> String {
    format!(
        "{} ({})\n",
        session.user.username,
        session.user.role.label()
    )
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::board::Page;
    use crate::card::Capabilities;
    use crate::notes::Color;
    use crate::notes::NoteId;

    fn note() -> Note {
        Note {
            id: NoteId::from("12"),
            title: "Boiler".to_string(),
            content: "Check pressure\nReplace valve".to_string(),
            color: Color::Yellow,
            is_pinned: true,
            is_reminder: true,
            reminder_date: Some(Utc.with_ymd_and_hms(2024, 4, 2, 9, 30, 0).unwrap()),
            show_in_job_list: false,
            created_at: Utc.with_ymd_and_hms(2024, 4, 1, 8, 0, 0).unwrap(),
            updated_at: None,
            version: None,
        }
    }

    #[test]
    fn test_collapsed_card() {
        let note = note();
        let card = NoteCard::new(&note, Capabilities::FULL, false);

        assert_eq!(
            "* Boiler [12] (yellow)\n  created 1 April 2024 08:00\n  reminder 2 April 2024 09:30\n",
            super::card(&note, Some(&card))
        );
    }

    #[test]
    fn test_expanded_card() {
        let mut note = note();
        let card = NoteCard::new(&note, Capabilities::FULL, true);

        let out = super::card(&note, Some(&card));
        assert!(out.contains("  | Check pressure\n  | Replace valve\n"));

        note.content = String::new();
        let out = super::card(&note, Some(&card));
        assert!(out.contains(CONTENT_PLACEHOLDER));
    }

    #[test]
    fn test_empty_board() {
        let mut board = Board::new(Page::Dashboard);
        let sections = board.render(&[]);

        assert_eq!("No notes yet\n", super::board(&board, &sections));
    }
}
