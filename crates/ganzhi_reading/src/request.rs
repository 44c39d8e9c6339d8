//! Reading request: the wire-level input and its validated form.

use std::str::FromStr;

use ganzhi_time::{BirthTime, CivilDate};
use serde::{Deserialize, Serialize};

use crate::error::ReadingError;

/// Life area the narrative should lean towards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Focus {
    #[default]
    Overall,
    Career,
    Wealth,
    Love,
    Health,
    Family,
}

pub const ALL_FOCI: [Focus; 6] = [
    Focus::Overall,
    Focus::Career,
    Focus::Wealth,
    Focus::Love,
    Focus::Health,
    Focus::Family,
];

impl Focus {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Overall => "overall",
            Self::Career => "career",
            Self::Wealth => "wealth",
            Self::Love => "love",
            Self::Health => "health",
            Self::Family => "family",
        }
    }
}

impl std::fmt::Display for Focus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Focus {
    type Err = ReadingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ALL_FOCI
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ReadingError::InvalidInput(format!("unknown focus: {s:?}")))
    }
}

/// Output language of the narrative and summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Chinese.
    #[default]
    Zh,
    /// English.
    En,
    /// Māori.
    Mi,
}

impl Language {
    pub const fn code(self) -> &'static str {
        match self {
            Self::Zh => "zh",
            Self::En => "en",
            Self::Mi => "mi",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = ReadingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zh" => Ok(Self::Zh),
            "en" => Ok(Self::En),
            "mi" => Ok(Self::Mi),
            other => Err(ReadingError::InvalidInput(format!(
                "unknown language: {other:?} (expected zh, en or mi)"
            ))),
        }
    }
}

/// A Bazi reading request as received on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingRequest {
    /// `YYYY-MM-DD`.
    pub birth_date: String,
    /// `HH`, `HH:MM` or `HH:MM:SS`; only the hour is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus: Option<Focus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl ReadingRequest {
    pub fn new(birth_date: impl Into<String>) -> Self {
        Self {
            birth_date: birth_date.into(),
            ..Self::default()
        }
    }

    pub fn with_time(mut self, birth_time: impl Into<String>) -> Self {
        self.birth_time = Some(birth_time.into());
        self
    }

    pub fn with_focus(mut self, focus: Focus) -> Self {
        self.focus = Some(focus);
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Validate the date and time fields.
    ///
    /// A blank `birth_time` counts as absent.
    pub fn parse(&self) -> Result<ParsedRequest, ReadingError> {
        let date: CivilDate = self.birth_date.parse()?;
        let time = match self.birth_time.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(t) => Some(t.parse::<BirthTime>()?),
        };
        Ok(ParsedRequest { date, time })
    }
}

/// Validated date and optional time of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedRequest {
    pub date: CivilDate,
    pub time: Option<BirthTime>,
}

impl ParsedRequest {
    /// Hour of day feeding the hour pillar.
    pub fn hour(&self) -> Option<u32> {
        self.time.map(BirthTime::hour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_only() {
        let p = ReadingRequest::new("1990-01-01").parse().unwrap();
        assert_eq!(p.date, CivilDate::new(1990, 1, 1).unwrap());
        assert_eq!(p.hour(), None);
    }

    #[test]
    fn time_forms() {
        for t in ["12", "12:30", "12:30:45"] {
            let p = ReadingRequest::new("1990-01-01").with_time(t).parse().unwrap();
            assert_eq!(p.hour(), Some(12), "{t}");
        }
    }

    #[test]
    fn blank_time_is_absent() {
        let p = ReadingRequest::new("1990-01-01").with_time("  ").parse().unwrap();
        assert_eq!(p.time, None);
    }

    #[test]
    fn bad_inputs_are_client_errors() {
        for (date, time) in [
            ("1990-02-30", None),
            ("1990/01/01", None),
            ("1990-01-01", Some("24")),
            ("1990-01-01", Some("12:60")),
            ("1990-01-01", Some("noon")),
        ] {
            let mut r = ReadingRequest::new(date);
            r.birth_time = time.map(String::from);
            assert!(
                matches!(r.parse(), Err(ReadingError::InvalidInput(_))),
                "{date} {time:?}"
            );
        }
    }

    #[test]
    fn wire_format() {
        let r: ReadingRequest = serde_json::from_str(
            r#"{"birth_date":"1990-01-01","birth_time":"08:15","focus":"career","language":"en"}"#,
        )
        .unwrap();
        assert_eq!(r.focus, Some(Focus::Career));
        assert_eq!(r.language, Some(Language::En));
        assert_eq!(r.user_id, None);
        let r: Result<ReadingRequest, _> =
            serde_json::from_str(r#"{"birth_date":"1990-01-01","language":"fr"}"#);
        assert!(r.is_err());
    }

    #[test]
    fn focus_and_language_parse() {
        assert_eq!("Wealth".parse::<Focus>().unwrap(), Focus::Wealth);
        assert_eq!("MI".parse::<Language>().unwrap(), Language::Mi);
        assert!("fate".parse::<Focus>().is_err());
    }
}
