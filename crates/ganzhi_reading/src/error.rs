//! Error types for the reading service and its collaborators.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use ganzhi_base::BaziError;
use ganzhi_time::TimeError;

/// Errors returned by [`ReadingService::read`](crate::ReadingService::read).
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ReadingError {
    /// Malformed or out-of-range request field (client error).
    InvalidInput(String),
    /// The engine reached an internally inconsistent state.
    Engine(BaziError),
}

impl Display for ReadingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            Self::Engine(e) => write!(f, "engine error: {e}"),
        }
    }
}

impl Error for ReadingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Engine(e) => Some(e),
            Self::InvalidInput(_) => None,
        }
    }
}

impl From<TimeError> for ReadingError {
    fn from(e: TimeError) -> Self {
        Self::InvalidInput(e.to_string())
    }
}

/// Range and calendar errors are the caller's fault; anything else is an
/// engine fault.
impl From<BaziError> for ReadingError {
    fn from(e: BaziError) -> Self {
        match e {
            BaziError::Time(_)
            | BaziError::InvalidMonth(_)
            | BaziError::InvalidHour(_)
            | BaziError::UnknownSymbol(_) => Self::InvalidInput(e.to_string()),
            other => Self::Engine(other),
        }
    }
}

/// Errors from a narrative collaborator.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum NarrativeError {
    /// No API key in configuration or environment.
    MissingApiKey,
    /// Transport failure or timeout.
    Http(String),
    /// Non-success status from the text-generation service.
    Status { code: u16, body: String },
    /// Response body did not have the expected shape.
    Malformed(String),
    /// The service answered with no text.
    EmptyResponse,
}

impl Display for NarrativeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingApiKey => write!(f, "no API key configured for the chat narrator"),
            Self::Http(msg) => write!(f, "HTTP error: {msg}"),
            Self::Status { code, body } => write!(f, "service returned {code}: {body}"),
            Self::Malformed(msg) => write!(f, "malformed response: {msg}"),
            Self::EmptyResponse => write!(f, "service returned an empty completion"),
        }
    }
}

impl Error for NarrativeError {}

impl From<reqwest::Error> for NarrativeError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e.to_string())
    }
}

/// Errors from a history store.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum HistoryError {
    /// The database directory could not be prepared.
    Io(String),
    /// SQLite rejected an open, query or insert.
    Database(String),
    /// A record could not be encoded or decoded.
    Serde(String),
}

impl Display for HistoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "history I/O error: {msg}"),
            Self::Database(msg) => write!(f, "history database error: {msg}"),
            Self::Serde(msg) => write!(f, "history encoding error: {msg}"),
        }
    }
}

impl Error for HistoryError {}

impl From<std::io::Error> for HistoryError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<rusqlite::Error> for HistoryError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Database(e.to_string())
    }
}

impl From<serde_json::Error> for HistoryError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

/// Errors from loading a [`ReadingConfig`](crate::ReadingConfig).
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ConfigError {
    /// The file could not be read.
    Io { path: PathBuf, msg: String },
    /// The text is not a valid configuration.
    Parse(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, msg } => write!(f, "cannot read {}: {msg}", path.display()),
            Self::Parse(msg) => write!(f, "config parse error: {msg}"),
        }
    }
}

impl Error for ConfigError {}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Parse(e.to_string())
    }
}
