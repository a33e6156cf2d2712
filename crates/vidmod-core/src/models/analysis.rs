use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::error::ResultParseError;

/// Highest discrete severity level the service reports.
pub const MAX_SEVERITY_LEVEL: u8 = 5;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    Safe,
    Nsfw,
}

impl Display for ContentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ContentStatus::Safe => write!(f, "safe"),
            ContentStatus::Nsfw => write!(f, "nsfw"),
        }
    }
}

/// How risky the content is, in whichever form the service reported it.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SeverityIndicator {
    /// Certainty of the safe/NSFW call, in [0, 1].
    Confidence { score: f64 },
    /// Discrete level, 0 (safe) to 5 (illegal).
    Level { level: u8 },
}

/// A classification returned by the analysis service.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AnalysisResult {
    pub method: String,
    pub status: ContentStatus,
    pub categories: Vec<String>,
    pub severity: Option<SeverityIndicator>,
    pub description: Option<String>,
}

/// Confidence-based body: `{is_nsfw, category, confidence?, method, explanation?}`
#[derive(Debug, Deserialize)]
struct ConfidenceBody {
    is_nsfw: bool,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    confidence: Option<f64>,
    method: String,
    #[serde(default)]
    explanation: Option<String>,
}

/// Severity-based body: `{status, categories, severity, method, description}`
#[derive(Debug, Deserialize)]
struct SeverityBody {
    status: ContentStatus,
    #[serde(default)]
    categories: Vec<String>,
    severity: u8,
    method: String,
    #[serde(default)]
    description: Option<String>,
}

impl AnalysisResult {
    /// Parse a success body. The schema is picked by which severity field is
    /// present: `severity` means the level-based body, otherwise `is_nsfw`
    /// means the confidence-based body.
    pub fn from_json(body: &[u8]) -> Result<Self, ResultParseError> {
        let value: JsonValue = serde_json::from_slice(body)?;
        Self::from_value(value)
    }

    pub fn from_value(value: JsonValue) -> Result<Self, ResultParseError> {
        let object = value.as_object().ok_or(ResultParseError::UnknownSchema)?;

        if object.contains_key("severity") {
            let body: SeverityBody = serde_json::from_value(value)?;
            body.try_into()
        } else if object.contains_key("is_nsfw") {
            let body: ConfidenceBody = serde_json::from_value(value)?;
            body.try_into()
        } else {
            Err(ResultParseError::UnknownSchema)
        }
    }

    pub fn is_nsfw(&self) -> bool {
        self.status == ContentStatus::Nsfw
    }

    pub fn confidence(&self) -> Option<f64> {
        match self.severity {
            Some(SeverityIndicator::Confidence { score }) => Some(score),
            _ => None,
        }
    }

    pub fn severity_level(&self) -> Option<u8> {
        match self.severity {
            Some(SeverityIndicator::Level { level }) => Some(level),
            _ => None,
        }
    }
}

impl TryFrom<ConfidenceBody> for AnalysisResult {
    type Error = ResultParseError;

    fn try_from(body: ConfidenceBody) -> Result<Self, Self::Error> {
        if let Some(score) = body.confidence {
            if !(0.0..=1.0).contains(&score) {
                return Err(ResultParseError::ConfidenceOutOfRange(score));
            }
        }

        let status = if body.is_nsfw {
            ContentStatus::Nsfw
        } else {
            ContentStatus::Safe
        };

        Ok(AnalysisResult {
            method: body.method,
            status,
            categories: normalize_categories(body.category.into_iter()),
            severity: body
                .confidence
                .map(|score| SeverityIndicator::Confidence { score }),
            description: non_empty(body.explanation),
        })
    }
}

impl TryFrom<SeverityBody> for AnalysisResult {
    type Error = ResultParseError;

    fn try_from(body: SeverityBody) -> Result<Self, Self::Error> {
        if body.severity > MAX_SEVERITY_LEVEL {
            return Err(ResultParseError::SeverityOutOfRange(body.severity));
        }

        Ok(AnalysisResult {
            method: body.method,
            status: body.status,
            categories: normalize_categories(body.categories.into_iter()),
            severity: Some(SeverityIndicator::Level {
                level: body.severity,
            }),
            description: non_empty(body.description),
        })
    }
}

/// Trim labels, drop blanks and duplicates, keep first-seen order.
fn normalize_categories(labels: impl Iterator<Item = String>) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for label in labels {
        let label = label.trim();
        if !label.is_empty() && !categories.iter().any(|c| c == label) {
            categories.push(label.to_string());
        }
    }
    categories
}

fn non_empty(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.trim().is_empty())
}
