//! Narrative collaborators: turn a computed chart into prose.
//!
//! [`TemplateNarrator`] never fails. [`ChatNarrator`] asks a remote
//! text-generation service and can fail in many ways, so it is normally
//! wrapped in a [`FallbackNarrator`].

use ganzhi_base::{Chart, ChartAnalysis};
use tracing::warn;

use crate::error::NarrativeError;
use crate::request::{Focus, Language};

pub use crate::chat::ChatNarrator;
pub use crate::template::TemplateNarrator;

/// Everything a narrator may draw on.
#[derive(Debug, Clone, Copy)]
pub struct NarrativeContext<'a> {
    pub chart: &'a Chart,
    pub analysis: &'a ChartAnalysis,
    pub focus: Focus,
    pub language: Language,
}

/// Produces the interpretation text of a reading.
pub trait Narrator: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    fn narrate(&self, ctx: &NarrativeContext<'_>) -> Result<String, NarrativeError>;
}

/// Tries `primary`, then the built-in template on any error.
pub struct FallbackNarrator {
    primary: Box<dyn Narrator>,
    fallback: TemplateNarrator,
}

impl FallbackNarrator {
    pub fn new(primary: Box<dyn Narrator>) -> Self {
        Self {
            primary,
            fallback: TemplateNarrator,
        }
    }
}

impl Narrator for FallbackNarrator {
    fn name(&self) -> &'static str {
        "fallback"
    }

    fn narrate(&self, ctx: &NarrativeContext<'_>) -> Result<String, NarrativeError> {
        match self.primary.narrate(ctx) {
            Ok(text) => Ok(text),
            Err(e) => {
                warn!(
                    narrator = self.primary.name(),
                    error = %e,
                    "narrative generation failed, using template"
                );
                self.fallback.narrate(ctx)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ganzhi_base::{analyze_chart, compute_chart};
    use ganzhi_time::CivilDate;

    struct Broken;

    impl Narrator for Broken {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn narrate(&self, _: &NarrativeContext<'_>) -> Result<String, NarrativeError> {
            Err(NarrativeError::EmptyResponse)
        }
    }

    struct Fixed;

    impl Narrator for Fixed {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn narrate(&self, _: &NarrativeContext<'_>) -> Result<String, NarrativeError> {
            Ok("fixed text".to_string())
        }
    }

    fn with_ctx<R>(f: impl FnOnce(&NarrativeContext<'_>) -> R) -> R {
        let chart = compute_chart(CivilDate::new(1990, 1, 1).unwrap(), None).unwrap();
        let analysis = analyze_chart(&chart);
        f(&NarrativeContext {
            chart: &chart,
            analysis: &analysis,
            focus: Focus::Overall,
            language: Language::En,
        })
    }

    #[test]
    fn primary_used_when_it_works() {
        let n = FallbackNarrator::new(Box::new(Fixed));
        assert_eq!(with_ctx(|c| n.narrate(c)).unwrap(), "fixed text");
    }

    #[test]
    fn template_used_when_primary_fails() {
        let n = FallbackNarrator::new(Box::new(Broken));
        let text = with_ctx(|c| n.narrate(c)).unwrap();
        let template = with_ctx(|c| TemplateNarrator.narrate(c)).unwrap();
        assert_eq!(text, template);
    }
}
