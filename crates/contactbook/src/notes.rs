//! # Notes
//!
//! [`NoteCollection`] maps a title to one body of free text. Titles are unique;
//! writing to an existing title replaces its text in place (no history kept).
//! Search is a plain case-sensitive substring match on title or text.

use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub title: String,
    pub text: String,
}

impl Note {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }

    fn contains(&self, needle: &str) -> bool {
        self.title.contains(needle) || self.text.contains(needle)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteCollection {
    notes: Vec<Note>,
}

impl NoteCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Note> {
        self.notes.iter()
    }

    pub fn get(&self, title: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.title == title)
    }

    fn position(&self, title: &str) -> Option<usize> {
        self.notes.iter().position(|n| n.title == title)
    }

    /// Stores `text` under `title`, overwriting any existing text.
    pub fn add(&mut self, title: impl Into<String>, text: impl Into<String>) -> &Note {
        let note = Note::new(title, text);
        let idx = match self.position(&note.title) {
            Some(idx) => {
                self.notes[idx] = note;
                idx
            }
            None => {
                self.notes.push(note);
                self.notes.len() - 1
            }
        };
        debug!(
            "event=note_add module=notes status=ok count={}",
            self.notes.len()
        );
        &self.notes[idx]
    }

    /// Notes whose title or text contains `needle`, as a new collection.
    pub fn search(&self, needle: &str) -> NoteCollection {
        let notes = self
            .notes
            .iter()
            .filter(|n| n.contains(needle))
            .cloned()
            .collect();
        NoteCollection { notes }
    }

    /// Replaces the text of an existing note; `None` if `title` is unknown.
    pub fn edit(&mut self, title: &str, new_text: impl Into<String>) -> Option<&Note> {
        let idx = self.position(title)?;
        self.notes[idx].text = new_text.into();
        debug!("event=note_edit module=notes status=ok");
        Some(&self.notes[idx])
    }

    /// Removes the note; returns whether it existed.
    pub fn delete(&mut self, title: &str) -> bool {
        match self.position(title) {
            Some(idx) => {
                self.notes.remove(idx);
                debug!(
                    "event=note_delete module=notes status=ok count={}",
                    self.notes.len()
                );
                true
            }
            None => false,
        }
    }
}

impl<'a> IntoIterator for &'a NoteCollection {
    type Item = &'a Note;
    type IntoIter = std::slice::Iter<'a, Note>;

    fn into_iter(self) -> Self::IntoIter {
        self.notes.iter()
    }
}
