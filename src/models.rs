//! Data models for 2Captcha jobs and results.

use crate::error::ErrorKind;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::Instant;

/// Character class constraint for the expected answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharacterClass {
    Any,
    NumbersOnly,
    LettersOnly,
    NumbersOrLetters,
    NumbersAndLetters,
}

impl CharacterClass {
    /// Returns the wire value for the `numeric` parameter.
    pub fn as_param(&self) -> u8 {
        match self {
            CharacterClass::Any => 0,
            CharacterClass::NumbersOnly => 1,
            CharacterClass::LettersOnly => 2,
            CharacterClass::NumbersOrLetters => 3,
            CharacterClass::NumbersAndLetters => 4,
        }
    }
}

/// Alphabet of the expected answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    Any,
    Cyrillic,
    Latin,
}

impl Language {
    pub fn as_param(&self) -> u8 {
        match self {
            Language::Any => 0,
            Language::Cyrillic => 1,
            Language::Latin => 2,
        }
    }
}

/// Optional guidance forwarded to the workers along with the image.
///
/// Every field left as `None` is omitted from the submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hints {
    /// Answer contains more than one word
    pub phrase: Option<bool>,
    /// Answer is case sensitive
    pub regsense: Option<bool>,
    pub numeric: Option<CharacterClass>,
    /// Image is a math expression to be calculated
    pub calc: Option<bool>,
    pub min_len: Option<u32>,
    pub max_len: Option<u32>,
    pub language: Option<Language>,
    /// Alternate form identifier, used for click-grid captchas
    pub id_constructor: Option<u32>,
}

impl Hints {
    /// Overlay `overrides` on top of `self`; set fields in `overrides` win.
    pub fn merge(&self, overrides: &Hints) -> Hints {
        Hints {
            phrase: overrides.phrase.or(self.phrase),
            regsense: overrides.regsense.or(self.regsense),
            numeric: overrides.numeric.or(self.numeric),
            calc: overrides.calc.or(self.calc),
            min_len: overrides.min_len.or(self.min_len),
            max_len: overrides.max_len.or(self.max_len),
            language: overrides.language.or(self.language),
            id_constructor: overrides.id_constructor.or(self.id_constructor),
        }
    }

    /// Check that the length bounds are consistent.
    pub fn validate(&self) -> std::result::Result<(), String> {
        match (self.min_len, self.max_len) {
            (Some(min), Some(max)) if min > max => {
                Err(format!("min_len ({}) is greater than max_len ({})", min, max))
            }
            _ => Ok(()),
        }
    }

    /// Render the hints as form parameters.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let flag = |b: bool| if b { "1" } else { "0" }.to_string();
        let mut params = Vec::new();

        if let Some(phrase) = self.phrase {
            params.push(("phrase", flag(phrase)));
        }
        if let Some(regsense) = self.regsense {
            params.push(("regsense", flag(regsense)));
        }
        if let Some(numeric) = self.numeric {
            params.push(("numeric", numeric.as_param().to_string()));
        }
        if let Some(calc) = self.calc {
            params.push(("calc", flag(calc)));
        }
        if let Some(min_len) = self.min_len {
            params.push(("min_len", min_len.to_string()));
        }
        if let Some(max_len) = self.max_len {
            params.push(("max_len", max_len.to_string()));
        }
        if let Some(language) = self.language {
            params.push(("language", language.as_param().to_string()));
        }
        if let Some(id_constructor) = self.id_constructor {
            params.push(("id_constructor", id_constructor.to_string()));
        }

        params
    }
}

/// A submitted captcha job.
#[derive(Debug, Clone)]
pub struct Job {
    id: String,
    submitted_at: Instant,
    timeout: Duration,
    pooling: Duration,
}

impl Job {
    pub(crate) fn new(id: String, timeout: Duration, pooling: Duration) -> Self {
        Self {
            id,
            submitted_at: Instant::now(),
            timeout,
            pooling,
        }
    }

    /// Identifier assigned by the service.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn submitted_at(&self) -> Instant {
        self.submitted_at
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Interval between two result polls.
    pub fn pooling(&self) -> Duration {
        self.pooling
    }
}

/// Decoded answer of a solved captcha.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Answer {
    /// Literal text typed by the worker
    Text(String),
    /// Clicked positions of a click-style captcha
    Clicks(Vec<u32>),
}

impl Answer {
    /// Returns the text answer, if this is one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Answer::Text(text) => Some(text),
            Answer::Clicks(_) => None,
        }
    }
}

/// A solved captcha.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Captcha {
    pub id: String,
    pub answer: Answer,
}

impl Captcha {
    /// Shorthand for the text answer.
    pub fn text(&self) -> Option<&str> {
        self.answer.as_text()
    }
}

/// Outcome of a fail-soft call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SolveResult {
    Solved(Captcha),
    Reported,
    Failed { kind: ErrorKind, detail: String },
}

impl SolveResult {
    pub fn is_solved(&self) -> bool {
        matches!(self, SolveResult::Solved(_))
    }

    /// The error kind of a failed result.
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            SolveResult::Failed { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

impl From<crate::error::TwoCaptchaError> for SolveResult {
    fn from(err: crate::error::TwoCaptchaError) -> Self {
        SolveResult::Failed {
            kind: err.kind(),
            detail: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hints_merge_prefers_overrides() {
        let base = Hints {
            phrase: Some(false),
            min_len: Some(4),
            max_len: Some(6),
            ..Default::default()
        };
        let overrides = Hints {
            max_len: Some(8),
            id_constructor: Some(23),
            ..Default::default()
        };

        let merged = base.merge(&overrides);
        assert_eq!(merged.phrase, Some(false));
        assert_eq!(merged.min_len, Some(4));
        assert_eq!(merged.max_len, Some(8));
        assert_eq!(merged.id_constructor, Some(23));
    }

    #[test]
    fn test_hints_params() {
        let hints = Hints {
            regsense: Some(true),
            numeric: Some(CharacterClass::NumbersOnly),
            calc: Some(false),
            language: Some(Language::Latin),
            ..Default::default()
        };

        let params = hints.to_params();
        assert_eq!(
            params,
            vec![
                ("regsense", "1".to_string()),
                ("numeric", "1".to_string()),
                ("calc", "0".to_string()),
                ("language", "2".to_string()),
            ]
        );
        assert!(Hints::default().to_params().is_empty());
    }

    #[test]
    fn test_hints_length_bounds() {
        let bad = Hints {
            min_len: Some(7),
            max_len: Some(3),
            ..Default::default()
        };
        assert!(bad.validate().is_err());

        let only_min = Hints {
            min_len: Some(7),
            ..Default::default()
        };
        assert!(only_min.validate().is_ok());
    }

    #[test]
    fn test_solve_result_json() {
        let solved = SolveResult::Solved(Captcha {
            id: "42".into(),
            answer: Answer::Clicks(vec![1, 5]),
        });
        let json = serde_json::to_value(&solved).unwrap();
        assert_eq!(json["status"], "solved");
        assert_eq!(json["answer"]["type"], "clicks");
        assert_eq!(json["answer"]["value"][1], 5);

        let failed = SolveResult::Failed {
            kind: ErrorKind::Timeout,
            detail: "late".into(),
        };
        assert_eq!(failed.error_kind(), Some(ErrorKind::Timeout));
        assert!(!failed.is_solved());
    }
}
