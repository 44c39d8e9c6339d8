//! The reading service: validate, compute, narrate, record.

use ganzhi_base::{BaziError, analyze_chart, compute_chart};
use tracing::{debug, error, info, warn};

use crate::config::{NarrativeProvider, ReadingConfig};
use crate::error::{HistoryError, ReadingError};
use crate::history::{BAZI_KIND, HistoryStore, ReadingRecord, SqliteHistoryStore};
use crate::narrative::{ChatNarrator, FallbackNarrator, NarrativeContext, Narrator, TemplateNarrator};
use crate::reading::{Reading, ReadingAnalysis};
use crate::request::ReadingRequest;
use crate::template;

/// Serves Bazi readings.
///
/// Only request validation and engine faults fail a reading. Narrative
/// failures leave `interpretation` empty and history failures are logged.
pub struct ReadingService {
    config: ReadingConfig,
    narrator: Box<dyn Narrator>,
    history: Option<Box<dyn HistoryStore>>,
}

impl ReadingService {
    pub fn new(
        config: ReadingConfig,
        narrator: Box<dyn Narrator>,
        history: Option<Box<dyn HistoryStore>>,
    ) -> Self {
        Self {
            config,
            narrator,
            history,
        }
    }

    /// Wire collaborators as the configuration asks.
    ///
    /// A chat provider without a usable key degrades to the template, and
    /// a history database that cannot be opened disables history.
    pub fn from_config(config: ReadingConfig) -> Self {
        let narrator: Box<dyn Narrator> = match config.narrative.provider {
            NarrativeProvider::Template => Box::new(TemplateNarrator),
            NarrativeProvider::Chat => match ChatNarrator::from_config(&config.narrative) {
                Ok(chat) => Box::new(FallbackNarrator::new(Box::new(chat))),
                Err(e) => {
                    warn!(error = %e, "chat narrator unavailable, using template");
                    Box::new(TemplateNarrator)
                }
            },
        };
        let history: Option<Box<dyn HistoryStore>> = if config.history.enabled {
            match SqliteHistoryStore::open(&config.history.path) {
                Ok(store) => Some(Box::new(store)),
                Err(e) => {
                    warn!(
                        path = %config.history.path.display(),
                        error = %e,
                        "history unavailable, readings will not be recorded"
                    );
                    None
                }
            }
        } else {
            None
        };
        info!(
            narrator = narrator.name(),
            history = history.is_some(),
            "reading service ready"
        );
        Self::new(config, narrator, history)
    }

    pub fn config(&self) -> &ReadingConfig {
        &self.config
    }

    pub fn history(&self) -> Option<&dyn HistoryStore> {
        self.history.as_deref()
    }

    /// Compute a full reading for one request.
    #[tracing::instrument(skip_all, fields(birth_date = %request.birth_date))]
    pub fn read(&self, request: &ReadingRequest) -> Result<Reading, ReadingError> {
        let parsed = request.parse()?;
        let focus = request.focus.unwrap_or(self.config.default_focus);
        let language = request.language.unwrap_or(self.config.language);

        let chart = compute_chart(parsed.date, parsed.hour()).map_err(engine_error)?;
        let analysis = analyze_chart(&chart);
        debug!(
            day_master = %analysis.day_master,
            strength = analysis.day_master_strength.name(),
            balance = %analysis.element_analysis.element_balance,
            "chart computed"
        );

        let ctx = NarrativeContext {
            chart: &chart,
            analysis: &analysis,
            focus,
            language,
        };
        let interpretation = match self.narrator.narrate(&ctx) {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(narrator = self.narrator.name(), error = %e, "narrative unavailable");
                None
            }
        };

        let analysis_summary = template::summary(&analysis, language);
        let reading = Reading {
            chart,
            analysis: ReadingAnalysis {
                chart: analysis,
                analysis_summary,
            },
            focus,
            language,
            interpretation,
        };

        if let Some(store) = &self.history {
            if let Err(e) = record(store.as_ref(), request, &reading) {
                warn!(error = %e, "failed to record reading history");
            }
        }
        Ok(reading)
    }
}

fn engine_error(e: BaziError) -> ReadingError {
    let e = ReadingError::from(e);
    if let ReadingError::Engine(inner) = &e {
        error!(error = %inner, "engine inconsistency");
    }
    e
}

fn record(
    store: &dyn HistoryStore,
    request: &ReadingRequest,
    reading: &Reading,
) -> Result<(), HistoryError> {
    let record = ReadingRecord::new(
        BAZI_KIND,
        serde_json::to_string(request)?,
        serde_json::to_string(reading)?,
        request.user_id.clone(),
    );
    store.append(&record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NarrativeError;
    use crate::history::MemoryHistoryStore;
    use crate::request::{Focus, Language};
    use std::sync::Arc;

    struct Failing;

    impl Narrator for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn narrate(&self, _: &NarrativeContext<'_>) -> Result<String, NarrativeError> {
            Err(NarrativeError::Http("connection refused".into()))
        }
    }

    struct BrokenStore;

    impl HistoryStore for BrokenStore {
        fn append(&self, _: &ReadingRecord) -> Result<(), HistoryError> {
            Err(HistoryError::Io("disk full".into()))
        }

        fn list(&self, _: usize) -> Result<Vec<ReadingRecord>, HistoryError> {
            Err(HistoryError::Io("disk full".into()))
        }

        fn list_for_user(&self, _: &str, _: usize) -> Result<Vec<ReadingRecord>, HistoryError> {
            Err(HistoryError::Io("disk full".into()))
        }
    }

    /// Lets a test keep a handle on the store it gives away.
    struct Shared(Arc<MemoryHistoryStore>);

    impl HistoryStore for Shared {
        fn append(&self, r: &ReadingRecord) -> Result<(), HistoryError> {
            self.0.append(r)
        }

        fn list(&self, limit: usize) -> Result<Vec<ReadingRecord>, HistoryError> {
            self.0.list(limit)
        }

        fn list_for_user(&self, u: &str, limit: usize) -> Result<Vec<ReadingRecord>, HistoryError> {
            self.0.list_for_user(u, limit)
        }
    }

    #[test]
    fn defaults_come_from_config() {
        let config = ReadingConfig {
            language: Language::En,
            default_focus: Focus::Love,
            ..ReadingConfig::default()
        };
        let service = ReadingService::from_config(config);
        let reading = service.read(&ReadingRequest::new("1990-01-01")).unwrap();
        assert_eq!(reading.language, Language::En);
        assert_eq!(reading.focus, Focus::Love);
        assert!(reading.interpretation.unwrap().contains("In relationships"));
    }

    #[test]
    fn narrator_failure_leaves_interpretation_empty() {
        let service = ReadingService::new(ReadingConfig::default(), Box::new(Failing), None);
        let reading = service.read(&ReadingRequest::new("1990-01-01")).unwrap();
        assert_eq!(reading.interpretation, None);
        assert!(!reading.analysis.analysis_summary.is_empty());
    }

    #[test]
    fn history_failure_does_not_fail_reading() {
        let service = ReadingService::new(
            ReadingConfig::default(),
            Box::new(TemplateNarrator),
            Some(Box::new(BrokenStore)),
        );
        assert!(service.read(&ReadingRequest::new("1990-01-01")).is_ok());
    }

    #[test]
    fn reading_is_recorded() {
        let store = Arc::new(MemoryHistoryStore::new());
        let service = ReadingService::new(
            ReadingConfig::default(),
            Box::new(TemplateNarrator),
            Some(Box::new(Shared(Arc::clone(&store)))),
        );
        let request = ReadingRequest::new("1990-01-01")
            .with_time("12:00")
            .with_user_id("u-1");
        let reading = service.read(&request).unwrap();

        let records = store.list_for_user("u-1", 10).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, "bazi");
        let input: ReadingRequest = serde_json::from_str(&records[0].input_data).unwrap();
        assert_eq!(input, request);
        let stored: Reading = serde_json::from_str(&records[0].result).unwrap();
        assert_eq!(stored, reading);
    }

    #[test]
    fn invalid_date_is_client_error() {
        let service = ReadingService::from_config(ReadingConfig::default());
        let err = service.read(&ReadingRequest::new("1990-13-01")).unwrap_err();
        assert!(matches!(err, ReadingError::InvalidInput(_)));
    }

    #[test]
    fn chat_without_key_degrades_to_template() {
        let mut config = ReadingConfig::default();
        config.narrative.provider = NarrativeProvider::Chat;
        config.narrative.api_key = Some(String::new());
        let service = ReadingService::from_config(config);
        let reading = service.read(&ReadingRequest::new("1990-01-01")).unwrap();
        assert!(reading.interpretation.is_some());
    }
}
