//! # API Facade
//!
//! [`ContactBook`] is the single value a UI (CLI, TUI, anything else) holds. It
//! owns the [`ContactCollection`], the [`NoteCollection`] and the
//! [`BookConfig`], and adds the few operations that need all three:
//! configured pagination, the upcoming-birthday window, and snapshots.
//!
//! ## What the Facade Does NOT Do
//!
//! - **Business rules**: those live on the collections and records.
//! - **I/O**: no stdout, no files. Snapshots are JSON strings; where they are
//!   kept is the caller's decision.
//! - **Presentation**: results are structured data, never formatted text.
//!
//! ## Snapshots
//!
//! [`ContactBook::to_json`] writes `{ "contacts": [...], "notes": [...] }`.
//! [`ContactBook::from_json`] reads it back, validating every field again and
//! refusing duplicate contact names, so a loaded book upholds the same
//! invariants as one built by hand.

use chrono::{Local, NaiveDate};
use log::info;
use serde::{Deserialize, Serialize};

use crate::config::BookConfig;
use crate::contacts::{ContactCollection, Pages};
use crate::error::Result;
use crate::notes::{Note, NoteCollection};
use crate::record::ContactRecord;

#[derive(Debug, Clone, Default)]
pub struct ContactBook {
    contacts: ContactCollection,
    notes: NoteCollection,
    config: BookConfig,
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    contacts: Vec<&'a ContactRecord>,
    notes: Vec<&'a Note>,
}

#[derive(Deserialize)]
struct Snapshot {
    #[serde(default)]
    contacts: Vec<ContactRecord>,
    #[serde(default)]
    notes: Vec<Note>,
}

impl ContactBook {
    pub fn new(config: BookConfig) -> Self {
        Self {
            contacts: ContactCollection::new(),
            notes: NoteCollection::new(),
            config,
        }
    }

    pub fn config(&self) -> &BookConfig {
        &self.config
    }

    pub fn contacts(&self) -> &ContactCollection {
        &self.contacts
    }

    pub fn contacts_mut(&mut self) -> &mut ContactCollection {
        &mut self.contacts
    }

    pub fn notes(&self) -> &NoteCollection {
        &self.notes
    }

    pub fn notes_mut(&mut self) -> &mut NoteCollection {
        &mut self.notes
    }

    /// Contacts in batches of the configured page size.
    pub fn pages(&self) -> Pages<'_> {
        self.contacts.paginate(self.config.page_size)
    }

    /// Contacts with a birthday within the configured window from today.
    pub fn upcoming_birthdays(&self) -> Vec<(&ContactRecord, i64)> {
        self.upcoming_birthdays_from(Local::now().date_naive())
    }

    pub fn upcoming_birthdays_from(&self, today: NaiveDate) -> Vec<(&ContactRecord, i64)> {
        self.contacts
            .upcoming_birthdays(self.config.birthday_window_days, today)
    }

    pub fn to_json(&self) -> Result<String> {
        let snapshot = SnapshotRef {
            contacts: self.contacts.iter().collect(),
            notes: self.notes.iter().collect(),
        };
        let json = serde_json::to_string_pretty(&snapshot)?;
        info!(
            "event=snapshot_export module=api status=ok contacts={} notes={}",
            self.contacts.len(),
            self.notes.len()
        );
        Ok(json)
    }

    /// Rebuilds a book from [`ContactBook::to_json`] output.
    pub fn from_json(json: &str, config: BookConfig) -> Result<Self> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        let mut book = Self::new(config);
        for record in snapshot.contacts {
            book.contacts.add(record)?;
        }
        for note in snapshot.notes {
            book.notes.add(note.title, note.text);
        }
        info!(
            "event=snapshot_import module=api status=ok contacts={} notes={}",
            book.contacts.len(),
            book.notes.len()
        );
        Ok(book)
    }
}
