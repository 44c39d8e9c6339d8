//! Bazi reading service around the `ganzhi_base` engine.
//!
//! This crate provides:
//! - `ReadingRequest` parsing and validation
//! - `ReadingService::read`, producing a serde-serializable `Reading`
//! - Narrators: rule templates (zh/en/mi) and an OpenAI-compatible chat
//!   backend with template fallback
//! - Reading history stores (SQLite, in-memory)
//! - TOML configuration
//!
//! Logging goes through `tracing`; installing a subscriber is left to the
//! binary.

mod chat;
pub mod config;
pub mod error;
pub mod history;
pub mod narrative;
pub mod reading;
pub mod request;
pub mod service;
pub mod template;

pub use config::{HistoryConfig, NarrativeConfig, NarrativeProvider, ReadingConfig};
pub use error::{ConfigError, HistoryError, NarrativeError, ReadingError};
pub use history::{
    DEFAULT_HISTORY_LIMIT, HistoryStore, MemoryHistoryStore, ReadingRecord, SqliteHistoryStore,
};
pub use narrative::{
    ChatNarrator, FallbackNarrator, NarrativeContext, Narrator, TemplateNarrator,
};
pub use reading::{Reading, ReadingAnalysis};
pub use request::{Focus, Language, ParsedRequest, ReadingRequest};
pub use service::ReadingService;
