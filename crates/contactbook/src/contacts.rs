//! # Contact Collection
//!
//! [`ContactCollection`] is the name-keyed store of [`ContactRecord`]s.
//!
//! ## Keys
//!
//! A record's key is its name, compared exactly (case-sensitive). The key is
//! read from the record itself, so it cannot drift from the stored name. The
//! only ways to change a stored name are [`ContactCollection::rename`] and
//! [`ContactCollection::update`], and both refuse to create a second record
//! with the same name.
//!
//! ## Ordering
//!
//! Records keep insertion order, which is the order [`ContactCollection::iter`]
//! and [`ContactCollection::paginate`] walk. A rename re-inserts the record, so
//! it moves to the end.
//!
//! ## Search
//!
//! [`ContactCollection::search`] lowercases the query and the concatenation of
//! every record's name, phones, addresses and emails (no separator, so a query
//! may span two adjacent values), and keeps the records whose text contains the
//! query. A blank query is not a search at all and yields `None`.

use chrono::NaiveDate;
use log::{debug, warn};

use crate::error::{BookError, Result};
use crate::fields::Name;
use crate::record::ContactRecord;

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 2;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactCollection {
    records: Vec<ContactRecord>,
}

impl ContactCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, ContactRecord> {
        self.records.iter()
    }

    /// Keys in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.name().as_str())
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.records.iter().position(|r| r.name() == name)
    }

    /// Stores `record` under its name. An existing record with that name is
    /// never replaced.
    pub fn add(&mut self, record: ContactRecord) -> Result<&ContactRecord> {
        if self.position(record.name().as_str()).is_some() {
            warn!("event=contact_add module=contacts status=error reason=duplicate");
            return Err(BookError::ContactAlreadyExists(
                record.name().as_str().to_string(),
            ));
        }
        self.records.push(record);
        debug!(
            "event=contact_add module=contacts status=ok count={}",
            self.records.len()
        );
        Ok(&self.records[self.records.len() - 1])
    }

    pub fn find(&self, name: &str) -> Option<&ContactRecord> {
        self.records.iter().find(|r| r.name() == name)
    }

    /// Removes the record named `name`, if any.
    pub fn delete(&mut self, name: &str) {
        if let Some(idx) = self.position(name) {
            self.records.remove(idx);
            debug!(
                "event=contact_delete module=contacts status=ok count={}",
                self.records.len()
            );
        }
    }

    /// Moves the record stored as `old_name` to `new_name`.
    ///
    /// Fails with [`BookError::NameAlreadyTaken`] when `new_name` is in use
    /// (including when it equals `old_name`), then with
    /// [`BookError::NotFound`] when there is no `old_name`. On failure nothing
    /// changes.
    pub fn rename(&mut self, old_name: &str, new_name: &str) -> Result<&ContactRecord> {
        if self.position(new_name).is_some() {
            warn!("event=contact_rename module=contacts status=error reason=name_taken");
            return Err(BookError::NameAlreadyTaken(new_name.to_string()));
        }
        let idx = self
            .position(old_name)
            .ok_or_else(|| BookError::NotFound(old_name.to_string()))?;
        let name = Name::new(new_name)?;

        let mut record = self.records.remove(idx);
        record.set_name(name);
        self.records.push(record);
        debug!("event=contact_rename module=contacts status=ok");
        Ok(&self.records[self.records.len() - 1])
    }

    /// Runs `f` against the record named `name`.
    ///
    /// If `f` renames the record onto a name held by another record, the
    /// rename is undone and [`BookError::NameAlreadyTaken`] is returned; any
    /// other edits `f` made are kept.
    pub fn update<T, F>(&mut self, name: &str, f: F) -> Result<T>
    where
        F: FnOnce(&mut ContactRecord) -> Result<T>,
    {
        let idx = self
            .position(name)
            .ok_or_else(|| BookError::NotFound(name.to_string()))?;
        let original = self.records[idx].name().clone();

        let outcome = f(&mut self.records[idx]);

        let current = self.records[idx].name().as_str();
        if current != original.as_str() {
            let clash = self
                .records
                .iter()
                .enumerate()
                .any(|(i, r)| i != idx && r.name().as_str() == current);
            if clash {
                let taken = current.to_string();
                self.records[idx].set_name(original);
                warn!("event=contact_update module=contacts status=error reason=name_taken");
                return Err(BookError::NameAlreadyTaken(taken));
            }
        }
        outcome
    }

    /// Case-insensitive search over names, phones, addresses and emails.
    ///
    /// Returns `None` for a blank query, otherwise a new collection holding
    /// copies of the matching records (possibly empty).
    pub fn search(&self, text: &str) -> Option<ContactCollection> {
        let needle = text.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }

        let records = self
            .records
            .iter()
            .filter(|r| r.search_haystack().contains(&needle))
            .cloned()
            .collect();
        Some(ContactCollection { records })
    }

    /// Splits the records into consecutive batches of `page_size` (the last
    /// one may be shorter). A `page_size` of 0 is treated as 1.
    pub fn paginate(&self, page_size: usize) -> Pages<'_> {
        Pages {
            chunks: self.records.chunks(page_size.max(1)),
        }
    }

    /// Records whose next birthday is at most `within_days` days after
    /// `today`, nearest first, with the day count.
    pub fn upcoming_birthdays(
        &self,
        within_days: u32,
        today: NaiveDate,
    ) -> Vec<(&ContactRecord, i64)> {
        let mut upcoming: Vec<_> = self
            .records
            .iter()
            .filter_map(|r| {
                r.days_until_birthday_from(today)
                    .filter(|days| *days <= i64::from(within_days))
                    .map(|days| (r, days))
            })
            .collect();
        upcoming.sort_by_key(|(_, days)| *days);
        upcoming
    }
}

impl<'a> IntoIterator for &'a ContactCollection {
    type Item = &'a ContactRecord;
    type IntoIter = std::slice::Iter<'a, ContactRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Single pass over fixed-size batches of a [`ContactCollection`].
#[derive(Debug, Clone)]
pub struct Pages<'a> {
    chunks: std::slice::Chunks<'a, ContactRecord>,
}

impl<'a> Iterator for Pages<'a> {
    type Item = &'a [ContactRecord];

    fn next(&mut self) -> Option<Self::Item> {
        self.chunks.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chunks.size_hint()
    }
}

impl ExactSizeIterator for Pages<'_> {}
