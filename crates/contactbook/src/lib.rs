//! # Contactbook Architecture
//!
//! Contactbook is a **UI-agnostic contact and notes library**. It keeps contacts
//! and notes in memory, guarantees every stored value is valid, and hands back
//! structured data. Parsing commands, printing tables and saving files belong
//! to whoever embeds it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - ContactBook: owns both collections and the config        │
//! │  - Pagination by configured size, JSON snapshots            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Collections (contacts.rs, notes.rs)                        │
//! │  - Unique keys (contact name, note title)                   │
//! │  - Add / find / delete / rename / search / paginate         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Records and Fields (record.rs, fields.rs)                  │
//! │  - ContactRecord: phones, addresses, emails, birthday       │
//! │  - Field<K>: a string that passed K's predicate             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O in the Core
//!
//! Nothing in this crate writes to stdout/stderr, touches the filesystem
//! (apart from reading an optional config file), or keeps global state. Both
//! collections are plain values owned by the caller; the crate provides no
//! locking, so a multi-threaded host wraps each collection in its own lock.
//!
//! Diagnostics go through the [`log`] facade as `event=... module=...`
//! key-value lines carrying counts only, never personal data. Installing a
//! logger is the host's job.
//!
//! ## Module Overview
//!
//! - [`api`]: The `ContactBook` facade
//! - [`contacts`]: Name-keyed contact collection
//! - [`notes`]: Title-keyed note collection
//! - [`record`]: A single contact and its field lists
//! - [`fields`]: Validated field kinds
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod config;
pub mod contacts;
pub mod error;
pub mod fields;
pub mod notes;
pub mod record;

pub use api::ContactBook;
pub use config::BookConfig;
pub use contacts::{ContactCollection, Pages};
pub use error::{BookError, Result};
pub use fields::{Address, Birthday, Email, Field, FieldKind, Name, Phone};
pub use notes::{Note, NoteCollection};
pub use record::ContactRecord;
