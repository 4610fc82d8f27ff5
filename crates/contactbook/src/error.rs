use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookError {
    #[error("Invalid {kind} value: {value:?}")]
    InvalidValue { kind: &'static str, value: String },

    #[error("Bad email format: {0:?}")]
    BadEmailFormat(String),

    #[error("Bad birthday format, expected DD.MM.YYYY: {0:?}")]
    BadBirthdayFormat(String),

    #[error("Contact already exists: {0}")]
    ContactAlreadyExists(String),

    #[error("Name is already taken: {0}")]
    NameAlreadyTaken(String),

    #[error("Address already exists: {0}")]
    AddressAlreadyExists(String),

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Address not found: {0}")]
    AddressNotFound(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BookError>;
