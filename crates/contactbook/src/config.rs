//! # Configuration
//!
//! Contactbook configuration is loaded with [`confique`], layered in priority
//! order:
//! 1. **Environment variables**: `CONTACTBOOK_PAGE_SIZE`,
//!    `CONTACTBOOK_BIRTHDAY_WINDOW_DAYS`.
//! 2. **Config file**: an optional TOML file supplied by the host application.
//! 3. **Compiled defaults**: via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `page_size` | `2` | Contacts per page when listing page by page |
//! | `birthday_window_days` | `7` | How far ahead upcoming birthdays are reported |

use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::contacts::DEFAULT_PAGE_SIZE;
use crate::error::{BookError, Result};

pub const DEFAULT_BIRTHDAY_WINDOW_DAYS: u32 = 7;

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BookConfig {
    /// Contacts per page; must be at least 1.
    #[config(default = 2, env = "CONTACTBOOK_PAGE_SIZE")]
    pub page_size: usize,

    /// Days ahead (inclusive) that count as an upcoming birthday.
    #[config(default = 7, env = "CONTACTBOOK_BIRTHDAY_WINDOW_DAYS")]
    pub birthday_window_days: u32,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            birthday_window_days: DEFAULT_BIRTHDAY_WINDOW_DAYS,
        }
    }
}

impl BookConfig {
    /// Loads configuration from the environment, then `file` if given and
    /// present, then defaults.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = file {
            builder = builder.file(path);
        }
        let config = builder
            .load()
            .map_err(|e| BookError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(BookError::Config("page_size must be at least 1".into()));
        }
        Ok(())
    }
}
