//! Rendering helpers for tool results

use crate::notes::types::Note;

/// Render a single note as a short block of text
pub fn format_note(note: &Note) -> String {
    format!(
        "ID: {}\nText: {}\nCreated: {}\n",
        note.id,
        note.text,
        note.created_at.to_rfc3339()
    )
}

/// Render a list of notes under a heading, e.g. "Found 2 notes:"
pub fn format_note_list(heading: &str, notes: &[Note]) -> String {
    let mut text = format!("{} {}:\n", heading, pluralize(notes.len(), "note"));

    for note in notes {
        text.push('\n');
        text.push_str(&format_note(note));
    }

    text
}

/// "1 note", "3 notes"
pub fn pluralize(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}
