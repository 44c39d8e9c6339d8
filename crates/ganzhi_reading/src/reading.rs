//! The reading response.

use ganzhi_base::{Chart, ChartAnalysis};
use serde::{Deserialize, Serialize};

use crate::request::{Focus, Language};

/// Structured analysis plus a one-paragraph digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingAnalysis {
    #[serde(flatten)]
    pub chart: ChartAnalysis,
    pub analysis_summary: String,
}

/// A complete Bazi reading.
///
/// Serialized with the four pillars at top level (`year_pillar` through
/// `hour_pillar`), followed by `analysis`, `focus`, `language` and
/// `interpretation`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reading {
    #[serde(flatten)]
    pub chart: Chart,
    pub analysis: ReadingAnalysis,
    pub focus: Focus,
    pub language: Language,
    /// Narrative text; `None` only when the narrator failed outright.
    pub interpretation: Option<String>,
}
