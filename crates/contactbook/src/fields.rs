//! # Validated Fields
//!
//! Every scalar stored on a contact goes through a [`Field`]. A field is a plain
//! string tagged with its kind; the kind owns the predicate that decides whether
//! a string is acceptable.
//!
//! | Kind | Rule | Error on rejection |
//! |------|------|--------------------|
//! | [`Name`] | free text | never rejected |
//! | [`Address`] | free text | never rejected |
//! | [`Phone`] | exactly 10 ASCII digits | [`BookError::InvalidValue`] |
//! | [`Email`] | `local@domain.tld`, final label of 2+ letters | [`BookError::BadEmailFormat`] |
//! | [`Birthday`] | calendar date written `DD.MM.YYYY` | [`BookError::BadBirthdayFormat`] |
//!
//! A field can only be obtained through [`Field::new`] (or deserialization, which
//! calls it), and [`Field::set`] re-runs the same predicate before touching the
//! stored value. A `Field<K>` in hand therefore always satisfies `K`'s rule.

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

use crate::error::{BookError, Result};

/// Date layout accepted for birthdays, e.g. `24.08.1991`.
pub const BIRTHDAY_FORMAT: &str = "%d.%m.%Y";

const PHONE_DIGITS: usize = 10;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

// `%Y` alone would also take signed or short years.
static BIRTHDAY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{1,2}\.[0-9]{1,2}\.[0-9]{4}$").expect("valid birthday regex"));

mod sealed {
    pub trait Sealed {}
}

/// The closed set of field kinds. Each kind carries its own predicate.
pub trait FieldKind: sealed::Sealed {
    /// Human readable kind name, used in error messages.
    const KIND: &'static str;

    fn validate(value: &str) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NameKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddressKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PhoneKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EmailKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BirthdayKind;

impl sealed::Sealed for NameKind {}
impl sealed::Sealed for AddressKind {}
impl sealed::Sealed for PhoneKind {}
impl sealed::Sealed for EmailKind {}
impl sealed::Sealed for BirthdayKind {}

impl FieldKind for NameKind {
    const KIND: &'static str = "name";

    fn validate(_value: &str) -> Result<()> {
        Ok(())
    }
}

impl FieldKind for AddressKind {
    const KIND: &'static str = "address";

    fn validate(_value: &str) -> Result<()> {
        Ok(())
    }
}

impl FieldKind for PhoneKind {
    const KIND: &'static str = "phone";

    fn validate(value: &str) -> Result<()> {
        if value.len() == PHONE_DIGITS && value.bytes().all(|b| b.is_ascii_digit()) {
            Ok(())
        } else {
            Err(BookError::InvalidValue {
                kind: Self::KIND,
                value: value.to_string(),
            })
        }
    }
}

impl FieldKind for EmailKind {
    const KIND: &'static str = "email";

    fn validate(value: &str) -> Result<()> {
        if EMAIL_RE.is_match(value) {
            Ok(())
        } else {
            Err(BookError::BadEmailFormat(value.to_string()))
        }
    }
}

impl FieldKind for BirthdayKind {
    const KIND: &'static str = "birthday";

    fn validate(value: &str) -> Result<()> {
        parse_birthday(value).map(|_| ())
    }
}

fn parse_birthday(value: &str) -> Result<NaiveDate> {
    let bad_format = || BookError::BadBirthdayFormat(value.to_string());
    if !BIRTHDAY_RE.is_match(value) {
        return Err(bad_format());
    }
    let date = NaiveDate::parse_from_str(value, BIRTHDAY_FORMAT).map_err(|_| bad_format())?;
    if date.year() < 1 {
        return Err(bad_format());
    }
    Ok(date)
}

/// A string value that is known to satisfy the predicate of kind `K`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field<K: FieldKind> {
    value: String,
    kind: PhantomData<K>,
}

pub type Name = Field<NameKind>;
pub type Address = Field<AddressKind>;
pub type Phone = Field<PhoneKind>;
pub type Email = Field<EmailKind>;
pub type Birthday = Field<BirthdayKind>;

impl<K: FieldKind> Field<K> {
    /// Validates `value` and wraps it. Nothing is built when validation fails.
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        K::validate(&value)?;
        Ok(Self {
            value,
            kind: PhantomData,
        })
    }

    /// Replaces the stored value. On error the previous value is kept.
    pub fn set(&mut self, value: impl Into<String>) -> Result<()> {
        let value = value.into();
        K::validate(&value)?;
        self.value = value;
        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

impl Birthday {
    /// The calendar date this birthday denotes.
    pub fn date(&self) -> Option<NaiveDate> {
        parse_birthday(&self.value).ok()
    }
}

impl<K: FieldKind> fmt::Display for Field<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<K: FieldKind> PartialEq<str> for Field<K> {
    fn eq(&self, other: &str) -> bool {
        self.value == other
    }
}

impl<K: FieldKind> Serialize for Field<K> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.value)
    }
}

// Deserialization goes through `Field::new` so stored data cannot smuggle in
// values the predicate would reject.
impl<'de, K: FieldKind> Deserialize<'de> for Field<K> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Field::new(raw).map_err(serde::de::Error::custom)
    }
}
