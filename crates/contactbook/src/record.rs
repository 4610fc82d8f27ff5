//! # Contact Records
//!
//! A [`ContactRecord`] gathers everything known about one person: a name, any
//! number of phones, addresses and emails, and at most one birthday.
//!
//! ## Duplicate and Missing Values
//!
//! Phones, addresses and emails are de-duplicated by value, but the three lists
//! do not react the same way to duplicates or to removing something absent:
//!
//! | Operation | Duplicate / absent value |
//! |-----------|--------------------------|
//! | [`ContactRecord::add_phone`] | ignored, the list stays as it was |
//! | [`ContactRecord::add_address`] | [`BookError::AddressAlreadyExists`] |
//! | [`ContactRecord::add_email`] | [`BookError::EmailAlreadyExists`] |
//! | [`ContactRecord::remove_phone`] | returns `None` |
//! | [`ContactRecord::remove_email`] | returns `None` |
//! | [`ContactRecord::remove_address`] | [`BookError::AddressNotFound`] |
//!
//! Callers match on these outcomes, so the table is part of the contract.
//!
//! ## Birthdays
//!
//! [`ContactRecord::days_until_birthday_from`] counts days from a given date to
//! the next occurrence of the birthday, always in `0..=365`. A 29 February
//! birthday is observed on 28 February in non-leap years.

use chrono::{Datelike, Local, NaiveDate};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{BookError, Result};
use crate::fields::{Address, Birthday, Email, Field, FieldKind, Name, Phone};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactRecord {
    name: Name,
    phones: Vec<Phone>,
    addresses: Vec<Address>,
    emails: Vec<Email>,
    birthday: Option<Birthday>,
}

impl ContactRecord {
    /// A record with only a name.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            name: Name::new(name)?,
            phones: Vec::new(),
            addresses: Vec::new(),
            emails: Vec::new(),
            birthday: None,
        })
    }

    /// Builds a record seeded with optional fields. Every supplied value is
    /// validated first; if any is rejected no record is produced.
    pub fn create(
        name: impl Into<String>,
        phone: Option<&str>,
        address: Option<&str>,
        birthday: Option<&str>,
        email: Option<&str>,
    ) -> Result<Self> {
        let name = Name::new(name)?;
        let phone = phone.map(Phone::new).transpose()?;
        let address = address.map(Address::new).transpose()?;
        let birthday = birthday.map(Birthday::new).transpose()?;
        let email = email.map(Email::new).transpose()?;

        Ok(Self {
            name,
            phones: phone.into_iter().collect(),
            addresses: address.into_iter().collect(),
            emails: email.into_iter().collect(),
            birthday,
        })
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn phones(&self) -> &[Phone] {
        &self.phones
    }

    pub fn addresses(&self) -> &[Address] {
        &self.addresses
    }

    pub fn emails(&self) -> &[Email] {
        &self.emails
    }

    pub fn birthday(&self) -> Option<&Birthday> {
        self.birthday.as_ref()
    }

    /// Adds a phone unless an equal one is already stored. Returns the
    /// validated phone either way.
    pub fn add_phone(&mut self, value: &str) -> Result<Phone> {
        let phone = Phone::new(value)?;
        if !self.phones.contains(&phone) {
            self.phones.push(phone.clone());
            debug!(
                "event=phone_add module=record status=ok count={}",
                self.phones.len()
            );
        }
        Ok(phone)
    }

    pub fn add_address(&mut self, value: &str) -> Result<&[Address]> {
        let address = Address::new(value)?;
        if self.addresses.contains(&address) {
            return Err(BookError::AddressAlreadyExists(address.into_string()));
        }
        self.addresses.push(address);
        debug!(
            "event=address_add module=record status=ok count={}",
            self.addresses.len()
        );
        Ok(&self.addresses)
    }

    pub fn add_email(&mut self, value: &str) -> Result<&[Email]> {
        let email = Email::new(value)?;
        if self.emails.contains(&email) {
            return Err(BookError::EmailAlreadyExists(email.into_string()));
        }
        self.emails.push(email);
        debug!(
            "event=email_add module=record status=ok count={}",
            self.emails.len()
        );
        Ok(&self.emails)
    }

    /// Sets the birthday, replacing any previous one.
    pub fn add_birthday(&mut self, value: &str) -> Result<&Birthday> {
        let birthday = Birthday::new(value)?;
        Ok(&*self.birthday.insert(birthday))
    }

    /// Removes every address equal to `value`.
    pub fn remove_address(&mut self, value: &str) -> Result<&Self> {
        if !retain_removed(&mut self.addresses, value) {
            return Err(BookError::AddressNotFound(value.to_string()));
        }
        Ok(self)
    }

    /// Removes every phone equal to `value`; `None` when nothing matched.
    pub fn remove_phone(&mut self, value: &str) -> Option<&Self> {
        retain_removed(&mut self.phones, value).then_some(&*self)
    }

    /// Removes every email equal to `value`; `None` when nothing matched.
    pub fn remove_email(&mut self, value: &str) -> Option<&Self> {
        retain_removed(&mut self.emails, value).then_some(&*self)
    }

    /// Changes the name of a record that is not (yet) stored in a collection.
    ///
    /// Stored records are renamed through
    /// [`ContactCollection::rename`](crate::contacts::ContactCollection::rename)
    /// so their key follows.
    pub fn edit_name(&mut self, new_name: &str) -> Result<()> {
        self.name.set(new_name)
    }

    /// Replaces `old` with `new`. `new` is validated before anything changes;
    /// a missing `old` is not an error, `new` is added regardless.
    pub fn edit_phone(&mut self, old: &str, new: &str) -> Result<Phone> {
        Phone::new(new)?;
        self.remove_phone(old);
        self.add_phone(new)
    }

    /// Replaces `old` with `new`. `new` is validated before anything changes.
    ///
    /// Returns `Ok(None)` and leaves the emails untouched when `old` is not
    /// stored on this record.
    pub fn edit_email(&mut self, old: &str, new: &str) -> Result<Option<&[Email]>> {
        let email = Email::new(new)?;
        if !self.emails.iter().any(|e| e == old) {
            return Ok(None);
        }
        if old != new && self.emails.contains(&email) {
            return Err(BookError::EmailAlreadyExists(email.into_string()));
        }
        self.remove_email(old);
        self.add_email(new).map(Some)
    }

    pub fn find_phone(&self, value: &str) -> Result<&Phone> {
        self.phones
            .iter()
            .find(|p| *p == value)
            .ok_or_else(|| BookError::NotFound(value.to_string()))
    }

    /// Days from today (local time) until the next birthday.
    pub fn days_until_birthday(&self) -> Option<i64> {
        self.days_until_birthday_from(Local::now().date_naive())
    }

    /// Days from `today` until the next occurrence of the birthday, or `None`
    /// when the record has no birthday.
    pub fn days_until_birthday_from(&self, today: NaiveDate) -> Option<i64> {
        let born = self.birthday.as_ref()?.date()?;
        let this_year = anniversary(born, today.year())?;
        let next = if this_year < today {
            anniversary(born, today.year() + 1)?
        } else {
            this_year
        };
        Some((next - today).num_days())
    }

    /// Lowercased text that contact search matches against.
    pub(crate) fn search_haystack(&self) -> String {
        std::iter::once(self.name.as_str())
            .chain(self.phones.iter().map(Phone::as_str))
            .chain(self.addresses.iter().map(Address::as_str))
            .chain(self.emails.iter().map(Email::as_str))
            .collect::<String>()
            .to_lowercase()
    }

    pub(crate) fn set_name(&mut self, name: Name) {
        self.name = name;
    }
}

/// Drops all entries equal to `value`, reporting whether any were dropped.
fn retain_removed<K: FieldKind>(items: &mut Vec<Field<K>>, value: &str) -> bool {
    let before = items.len();
    items.retain(|item| item != value);
    items.len() != before
}

fn anniversary(born: NaiveDate, year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, born.month(), born.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
}

// Stored duplicates collapse on load, matching what the add operations allow.
impl<'de> Deserialize<'de> for ContactRecord {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let helper = RecordHelper::deserialize(deserializer)?;

        let mut record = ContactRecord {
            name: helper.name,
            phones: Vec::new(),
            addresses: Vec::new(),
            emails: Vec::new(),
            birthday: helper.birthday,
        };
        for phone in helper.phones {
            if !record.phones.contains(&phone) {
                record.phones.push(phone);
            }
        }
        for address in helper.addresses {
            if !record.addresses.contains(&address) {
                record.addresses.push(address);
            }
        }
        for email in helper.emails {
            if !record.emails.contains(&email) {
                record.emails.push(email);
            }
        }
        Ok(record)
    }
}

#[derive(Deserialize)]
struct RecordHelper {
    name: Name,
    #[serde(default)]
    phones: Vec<Phone>,
    #[serde(default)]
    addresses: Vec<Address>,
    #[serde(default)]
    emails: Vec<Email>,
    #[serde(default)]
    birthday: Option<Birthday>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn phones(record: &ContactRecord) -> Vec<&str> {
        record.phones().iter().map(Phone::as_str).collect()
    }

    #[test]
    fn create_with_name_only() {
        let record = ContactRecord::new("Ann").unwrap();
        assert_eq!(record.name().as_str(), "Ann");
        assert!(record.phones().is_empty());
        assert!(record.addresses().is_empty());
        assert!(record.emails().is_empty());
        assert!(record.birthday().is_none());
    }

    #[test]
    fn create_seeds_optional_fields() {
        let record = ContactRecord::create(
            "Ann",
            Some("1234567890"),
            Some("Main St"),
            Some("01.02.1990"),
            Some("ann@example.com"),
        )
        .unwrap();
        assert_eq!(phones(&record), vec!["1234567890"]);
        assert_eq!(record.addresses()[0].as_str(), "Main St");
        assert_eq!(record.birthday().unwrap().as_str(), "01.02.1990");
        assert_eq!(record.emails()[0].as_str(), "ann@example.com");
    }

    #[test]
    fn create_fails_atomically_on_any_bad_field() {
        let err = ContactRecord::create("Ann", Some("123"), None, None, None).unwrap_err();
        assert!(matches!(err, BookError::InvalidValue { .. }));

        let err =
            ContactRecord::create("Ann", None, None, Some("1990-02-01"), None).unwrap_err();
        assert!(matches!(err, BookError::BadBirthdayFormat(_)));

        let err = ContactRecord::create("Ann", Some("1234567890"), None, None, Some("ann@"))
            .unwrap_err();
        assert!(matches!(err, BookError::BadEmailFormat(_)));
    }

    #[test]
    fn adding_same_phone_twice_keeps_one() {
        let mut record =
            ContactRecord::create("Ann", Some("1234567890"), None, None, None).unwrap();
        let phone = record.add_phone("1234567890").unwrap();
        assert_eq!(phone.as_str(), "1234567890");
        assert_eq!(record.phones().len(), 1);

        record.add_phone("0987654321").unwrap();
        assert_eq!(phones(&record), vec!["1234567890", "0987654321"]);
    }

    #[test]
    fn add_phone_rejects_invalid_without_change() {
        let mut record = ContactRecord::new("Ann").unwrap();
        assert!(record.add_phone("12ab").is_err());
        assert!(record.phones().is_empty());
    }

    #[test]
    fn adding_same_address_twice_fails() {
        let mut record = ContactRecord::new("Ann").unwrap();
        assert_eq!(record.add_address("Main St").unwrap().len(), 1);
        let err = record.add_address("Main St").unwrap_err();
        assert!(matches!(err, BookError::AddressAlreadyExists(ref a) if a == "Main St"));
        assert_eq!(record.addresses().len(), 1);
    }

    #[test]
    fn adding_same_email_twice_fails() {
        let mut record = ContactRecord::new("Ann").unwrap();
        record.add_email("ann@example.com").unwrap();
        let err = record.add_email("ann@example.com").unwrap_err();
        assert!(matches!(err, BookError::EmailAlreadyExists(_)));
        assert_eq!(record.emails().len(), 1);
    }

    #[test]
    fn add_birthday_replaces_previous() {
        let mut record = ContactRecord::new("Ann").unwrap();
        record.add_birthday("01.01.1990").unwrap();
        let birthday = record.add_birthday("02.02.1992").unwrap();
        assert_eq!(birthday.as_str(), "02.02.1992");
        assert_eq!(record.birthday().unwrap().as_str(), "02.02.1992");

        assert!(matches!(
            record.add_birthday("not a date"),
            Err(BookError::BadBirthdayFormat(_))
        ));
        assert_eq!(record.birthday().unwrap().as_str(), "02.02.1992");
    }

    #[test]
    fn remove_address_errors_when_absent() {
        let mut record = ContactRecord::new("Ann").unwrap();
        record.add_address("Main St").unwrap();
        assert!(matches!(
            record.remove_address("Elm St"),
            Err(BookError::AddressNotFound(_))
        ));
        assert!(record.remove_address("Main St").is_ok());
        assert!(record.addresses().is_empty());
    }

    #[test]
    fn remove_phone_and_email_return_none_when_absent() {
        let mut record = ContactRecord::create(
            "Ann",
            Some("1234567890"),
            None,
            None,
            Some("ann@example.com"),
        )
        .unwrap();

        assert!(record.remove_phone("0000000000").is_none());
        assert!(record.remove_email("bob@example.com").is_none());

        assert!(record.remove_phone("1234567890").is_some());
        assert!(record.remove_email("ann@example.com").is_some());
        assert!(record.phones().is_empty());
        assert!(record.emails().is_empty());
    }

    #[test]
    fn edit_name_changes_name() {
        let mut record = ContactRecord::new("Ann").unwrap();
        record.edit_name("Anna").unwrap();
        assert_eq!(record.name().as_str(), "Anna");
    }

    #[test]
    fn edit_phone_validates_before_mutating() {
        let mut record =
            ContactRecord::create("Ann", Some("1234567890"), None, None, None).unwrap();
        assert!(record.edit_phone("1234567890", "bad").is_err());
        assert_eq!(phones(&record), vec!["1234567890"]);

        let phone = record.edit_phone("1234567890", "0987654321").unwrap();
        assert_eq!(phone.as_str(), "0987654321");
        assert_eq!(phones(&record), vec!["0987654321"]);
    }

    #[test]
    fn edit_phone_with_missing_old_still_adds_new() {
        let mut record =
            ContactRecord::create("Ann", Some("1234567890"), None, None, None).unwrap();
        record.edit_phone("5555555555", "0987654321").unwrap();
        assert_eq!(phones(&record), vec!["1234567890", "0987654321"]);
    }

    #[test]
    fn edit_email_replaces_existing() {
        let mut record =
            ContactRecord::create("Ann", None, None, None, Some("ann@example.com")).unwrap();
        let emails = record
            .edit_email("ann@example.com", "ann@work.org")
            .unwrap()
            .unwrap();
        assert_eq!(emails.len(), 1);
        assert_eq!(emails[0].as_str(), "ann@work.org");
    }

    #[test]
    fn edit_email_with_missing_old_changes_nothing() {
        let mut record =
            ContactRecord::create("Ann", None, None, None, Some("ann@example.com")).unwrap();
        let outcome = record.edit_email("bob@example.com", "ann@work.org").unwrap();
        assert!(outcome.is_none());
        assert_eq!(record.emails().len(), 1);
        assert_eq!(record.emails()[0].as_str(), "ann@example.com");
    }

    #[test]
    fn edit_email_rejects_bad_format_and_duplicates() {
        let mut record =
            ContactRecord::create("Ann", None, None, None, Some("ann@example.com")).unwrap();
        record.add_email("ann@work.org").unwrap();

        assert!(matches!(
            record.edit_email("ann@example.com", "broken"),
            Err(BookError::BadEmailFormat(_))
        ));
        assert!(matches!(
            record.edit_email("ann@example.com", "ann@work.org"),
            Err(BookError::EmailAlreadyExists(_))
        ));
        assert_eq!(record.emails().len(), 2);
    }

    #[test]
    fn find_phone_by_value() {
        let record = ContactRecord::create("Ann", Some("1234567890"), None, None, None).unwrap();
        assert_eq!(record.find_phone("1234567890").unwrap().as_str(), "1234567890");
        assert!(matches!(
            record.find_phone("0000000000"),
            Err(BookError::NotFound(_))
        ));
    }

    #[test]
    fn days_until_birthday_without_birthday_is_none() {
        let record = ContactRecord::new("Ann").unwrap();
        assert_eq!(record.days_until_birthday_from(date(2024, 5, 1)), None);
        assert_eq!(record.days_until_birthday(), None);
    }

    #[test]
    fn days_until_birthday_today_is_zero() {
        let record = ContactRecord::create("Ann", None, None, Some("15.06.1990"), None).unwrap();
        assert_eq!(record.days_until_birthday_from(date(2024, 6, 15)), Some(0));
    }

    #[test]
    fn days_until_birthday_later_this_year() {
        let record = ContactRecord::create("Ann", None, None, Some("20.06.1990"), None).unwrap();
        assert_eq!(record.days_until_birthday_from(date(2023, 6, 15)), Some(5));
    }

    #[test]
    fn days_until_birthday_already_passed_rolls_to_next_year() {
        let record = ContactRecord::create("Ann", None, None, Some("14.06.1990"), None).unwrap();
        assert_eq!(record.days_until_birthday_from(date(2023, 6, 15)), Some(365));

        let record = ContactRecord::create("Ann", None, None, Some("31.12.1990"), None).unwrap();
        assert_eq!(record.days_until_birthday_from(date(2024, 1, 1)), Some(365));

        let record = ContactRecord::create("Ann", None, None, Some("01.01.1990"), None).unwrap();
        assert_eq!(record.days_until_birthday_from(date(2023, 12, 31)), Some(1));
    }

    #[test]
    fn days_until_birthday_is_always_in_range() {
        let record = ContactRecord::create("Ann", None, None, Some("10.03.1985"), None).unwrap();
        let mut today = date(2023, 1, 1);
        while today < date(2025, 1, 1) {
            let days = record.days_until_birthday_from(today).unwrap();
            assert!((0..=365).contains(&days), "{today}: {days}");
            today = today.succ_opt().unwrap();
        }
    }

    #[test]
    fn leap_day_birthday_falls_on_feb_28_in_common_years() {
        let record = ContactRecord::create("Ann", None, None, Some("29.02.2000"), None).unwrap();
        assert_eq!(record.days_until_birthday_from(date(2023, 2, 28)), Some(0));
        assert_eq!(record.days_until_birthday_from(date(2024, 2, 1)), Some(28));
        assert_eq!(record.days_until_birthday_from(date(2023, 3, 1)), Some(365));
    }

    #[test]
    fn search_haystack_is_lowercased_and_covers_all_lists() {
        let mut record =
            ContactRecord::create("Ann", Some("5551234567"), None, None, None).unwrap();
        record.add_address("Main St").unwrap();
        record.add_email("Ann@Example.com").unwrap();
        let haystack = record.search_haystack();
        assert!(haystack.contains("ann"));
        assert!(haystack.contains("5551234567"));
        assert!(haystack.contains("main st"));
        assert!(haystack.contains("ann@example.com"));
        assert!(haystack.starts_with("ann5551234567main st"));
    }

    #[test]
    fn deserialize_collapses_duplicates_and_validates() {
        let json = r#"{
            "name": "Ann",
            "phones": ["1234567890", "1234567890"],
            "addresses": ["Main St", "Main St"],
            "emails": ["ann@example.com"],
            "birthday": "01.02.1990"
        }"#;
        let record: ContactRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.phones().len(), 1);
        assert_eq!(record.addresses().len(), 1);

        let bad = r#"{"name": "Ann", "phones": ["12"]}"#;
        assert!(serde_json::from_str::<ContactRecord>(bad).is_err());

        let minimal: ContactRecord = serde_json::from_str(r#"{"name": "Bob"}"#).unwrap();
        assert_eq!(minimal, ContactRecord::new("Bob").unwrap());
    }

    #[test]
    fn serialize_round_trips() {
        let mut record = ContactRecord::create(
            "Ann",
            Some("1234567890"),
            Some("Main St"),
            Some("01.02.1990"),
            Some("ann@example.com"),
        )
        .unwrap();
        record.add_phone("0987654321").unwrap();
        let json = serde_json::to_string(&record).unwrap();
        let back: ContactRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
