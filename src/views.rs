//! Derived views on the note collection
//!
//! Nothing here is stored, every consumer derives what it shows on each render
//! from the collection of the store.

use unicode_normalization::UnicodeNormalization;

use crate::notes::Note;

/// Display order: pinned notes first, then newest first
///
/// The sort is stable, notes with equal keys keep their collection order
pub fn sorted(notes: &[Note]) -> Vec<&Note> {
    let mut sorted = notes.iter().collect::<Vec<_>>();

    sorted.sort_by(|a, b| {
        b.is_pinned
            .cmp(&a.is_pinned)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });

    sorted
}

/// Display order, only the notes matching the predicate
pub fn sorted_where<P>(notes: &[Note], predicate: P) -> Vec<&Note>
where
    P: Fn(&Note) -> bool,
{
    let mut sorted = sorted(notes);
    sorted.retain(|note| predicate(*note));
    sorted
}

/// Pinned and unpinned notes as separate sections
#[derive(Debug, Default)]
pub struct Sections<'a> {
    pub pinned: Vec<&'a Note>,
    pub unpinned: Vec<&'a Note>,
}

impl Sections<'_> {
    pub fn is_empty(&self) -> bool {
        self.pinned.is_empty() && self.unpinned.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pinned.len() + self.unpinned.len()
    }
}

/// Split already sorted notes in sections, keeping their order
pub fn sections<'a>(sorted: Vec<&'a Note>) -> Sections<'a> {
    let (pinned, unpinned): (Vec<_>, Vec<_>) =
        sorted.into_iter().partition(|note| note.is_pinned);

    Sections { pinned, unpinned }
}

/// Notes that also show up next to the job lists
pub fn job_list(notes: &[Note]) -> Vec<&Note> {
    sorted_where(notes, |note| note.show_in_job_list)
}

/// Notes with the query in their title, ignoring case
///
/// An empty query matches everything
pub fn search<'a>(notes: &'a [Note], query: &str) -> Vec<&'a Note> {
    let query = fold(query.trim());

    if query.is_empty() {
        return sorted(notes);
    }

    sorted_where(notes, |note| fold(&note.title).contains(&query))
}

/// Normalize for comparison: composed form, lowercase
fn fold(text: &str) -> String {
    text.nfc().collect::<String>().to_lowercase()
}
