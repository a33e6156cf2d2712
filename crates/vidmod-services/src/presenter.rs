//! Turns an `AnalysisResult` into display-ready values.
//!
//! Everything here is pure: same input, same output, no I/O. Renderers pick
//! colors from `Tone` and never inspect the raw result themselves.

use serde::Serialize;
use vidmod_core::{AnalysisResult, ContentStatus, SeverityIndicator};

/// Confidence at or above this is shown in the green tier.
pub const HIGH_CONFIDENCE_THRESHOLD: f64 = 0.8;
/// Confidence at or above this (and below high) is shown in the yellow tier.
pub const MEDIUM_CONFIDENCE_THRESHOLD: f64 = 0.6;

const SEVERITY_LABELS: [&str; 6] = [
    "Safe",
    "Suggestive",
    "Mature",
    "Explicit",
    "Extreme",
    "Illegal",
];

const MAX_SEVERITY: u8 = (SEVERITY_LABELS.len() - 1) as u8;

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Green,
    Yellow,
    Red,
    DarkRed,
    Purple,
    Orange,
    Gray,
}

/// Known moderation categories; anything else renders as `Other`.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CategoryStyle {
    Safe,
    Violence,
    SexualContent,
    GraphicContent,
    HateSpeech,
    Other,
}

impl CategoryStyle {
    /// Case-insensitive match on the category name.
    pub fn for_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "safe" => CategoryStyle::Safe,
            "violence" => CategoryStyle::Violence,
            "sexual content" => CategoryStyle::SexualContent,
            "graphic content" => CategoryStyle::GraphicContent,
            "hate speech" => CategoryStyle::HateSpeech,
            _ => CategoryStyle::Other,
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            CategoryStyle::Safe => Tone::Green,
            CategoryStyle::Violence => Tone::Red,
            CategoryStyle::SexualContent => Tone::Purple,
            CategoryStyle::GraphicContent => Tone::Orange,
            CategoryStyle::HateSpeech => Tone::DarkRed,
            CategoryStyle::Other => Tone::Gray,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    pub fn from_score(score: f64) -> Self {
        if score >= HIGH_CONFIDENCE_THRESHOLD {
            ConfidenceTier::High
        } else if score >= MEDIUM_CONFIDENCE_THRESHOLD {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::Low
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            ConfidenceTier::High => Tone::Green,
            ConfidenceTier::Medium => Tone::Yellow,
            ConfidenceTier::Low => Tone::Red,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StatusBadge {
    pub label: &'static str,
    pub tone: Tone,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryBadge {
    pub label: String,
    pub style: CategoryStyle,
    pub tone: Tone,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SeverityDisplay {
    Confidence {
        score: f64,
        /// One decimal place, e.g. "95.0%"
        percent: String,
        tier: ConfidenceTier,
        tone: Tone,
    },
    Level {
        level: u8,
        label: &'static str,
        /// Fraction of the bar to fill, 0.0..=1.0
        progress: f64,
    },
}

impl SeverityDisplay {
    /// Bar fill in whole percent.
    pub fn progress_percent(&self) -> u32 {
        let fraction = match self {
            SeverityDisplay::Confidence { score, .. } => *score,
            SeverityDisplay::Level { progress, .. } => *progress,
        };
        (fraction.clamp(0.0, 1.0) * 100.0).round() as u32
    }
}

/// Everything a renderer needs to show one classification.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DisplayModel {
    pub status: StatusBadge,
    pub categories: Vec<CategoryBadge>,
    pub severity: Option<SeverityDisplay>,
    pub method: String,
    pub description: Option<String>,
}

pub fn present(result: &AnalysisResult) -> DisplayModel {
    DisplayModel {
        status: status_badge(result.status),
        categories: result
            .categories
            .iter()
            .map(|label| {
                let style = CategoryStyle::for_label(label);
                CategoryBadge {
                    label: label.clone(),
                    style,
                    tone: style.tone(),
                }
            })
            .collect(),
        severity: result.severity.map(severity_display),
        method: format_method(&result.method),
        description: result.description.clone(),
    }
}

pub fn status_badge(status: ContentStatus) -> StatusBadge {
    match status {
        ContentStatus::Nsfw => StatusBadge {
            label: "NSFW Content Detected",
            tone: Tone::Red,
        },
        ContentStatus::Safe => StatusBadge {
            label: "Safe Content",
            tone: Tone::Green,
        },
    }
}

pub fn severity_display(indicator: SeverityIndicator) -> SeverityDisplay {
    match indicator {
        SeverityIndicator::Confidence { score } => {
            let tier = ConfidenceTier::from_score(score);
            SeverityDisplay::Confidence {
                score,
                percent: format!("{:.1}%", score * 100.0),
                tier,
                tone: tier.tone(),
            }
        }
        SeverityIndicator::Level { level } => {
            let level = level.min(MAX_SEVERITY);
            SeverityDisplay::Level {
                level,
                label: SEVERITY_LABELS[level as usize],
                progress: f64::from(level) / f64::from(MAX_SEVERITY),
            }
        }
    }
}

/// "joycaption-whisper-grok" -> "joycaption + whisper + grok"
pub fn format_method(method: &str) -> String {
    method.replace('-', " + ")
}

/// Human-readable size, base 1024, at most two decimals.
///
/// 0 -> "0 Bytes", 1536 -> "1.5 KB", 1048576 -> "1 MB"
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return format!("0 {}", SIZE_UNITS[0]);
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let formatted = format!("{:.2}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, SIZE_UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nsfw_confidence(score: f64) -> AnalysisResult {
        AnalysisResult {
            method: "gemini".to_string(),
            status: ContentStatus::Nsfw,
            categories: vec!["Violence".to_string()],
            severity: Some(SeverityIndicator::Confidence { score }),
            description: Some("Fight scene".to_string()),
        }
    }

    #[test]
    fn test_status_badges() {
        let model = present(&nsfw_confidence(0.9));
        assert_eq!(model.status.label, "NSFW Content Detected");
        assert_eq!(model.status.tone, Tone::Red);

        let safe = status_badge(ContentStatus::Safe);
        assert_eq!(safe.label, "Safe Content");
        assert_eq!(safe.tone, Tone::Green);
    }

    #[test]
    fn test_confidence_display() {
        let model = present(&nsfw_confidence(0.95));
        match model.severity.unwrap() {
            SeverityDisplay::Confidence {
                percent,
                tier,
                tone,
                ..
            } => {
                assert_eq!(percent, "95.0%");
                assert_eq!(tier, ConfidenceTier::High);
                assert_eq!(tone, Tone::Green);
            }
            other => panic!("expected confidence display, got {other:?}"),
        }
    }

    #[test]
    fn test_confidence_tiers() {
        assert_eq!(ConfidenceTier::from_score(0.8), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::from_score(0.79), ConfidenceTier::Medium);
        assert_eq!(ConfidenceTier::from_score(0.6), ConfidenceTier::Medium);
        assert_eq!(ConfidenceTier::from_score(0.59), ConfidenceTier::Low);
        assert_eq!(ConfidenceTier::from_score(0.0).tone(), Tone::Red);
        assert_eq!(ConfidenceTier::from_score(0.7).tone(), Tone::Yellow);
    }

    #[test]
    fn test_severity_level_display() {
        let result = AnalysisResult {
            method: "joycaption-whisper-grok".to_string(),
            status: ContentStatus::Nsfw,
            categories: vec!["pornography".to_string(), "violence".to_string()],
            severity: Some(SeverityIndicator::Level { level: 4 }),
            description: Some("Contains explicit content and graphic violence".to_string()),
        };

        let model = present(&result);
        let severity = model.severity.unwrap();
        assert_eq!(
            severity,
            SeverityDisplay::Level {
                level: 4,
                label: "Extreme",
                progress: 0.8
            }
        );
        assert_eq!(severity.progress_percent(), 80);
        assert_eq!(model.method, "joycaption + whisper + grok");
        assert_eq!(
            model.description.as_deref(),
            Some("Contains explicit content and graphic violence")
        );
    }

    #[test]
    fn test_all_severity_labels() {
        let labels: Vec<&str> = (0..=5)
            .map(|level| match severity_display(SeverityIndicator::Level { level }) {
                SeverityDisplay::Level { label, .. } => label,
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(
            labels,
            vec!["Safe", "Suggestive", "Mature", "Explicit", "Extreme", "Illegal"]
        );
    }

    #[test]
    fn test_category_styles() {
        let result = AnalysisResult {
            method: "gemini".to_string(),
            status: ContentStatus::Nsfw,
            categories: vec![
                "Safe".to_string(),
                "VIOLENCE".to_string(),
                "sexual content".to_string(),
                "Graphic Content".to_string(),
                "Hate Speech".to_string(),
                "pornography".to_string(),
            ],
            severity: None,
            description: None,
        };

        let tones: Vec<Tone> = present(&result).categories.iter().map(|c| c.tone).collect();
        assert_eq!(
            tones,
            vec![
                Tone::Green,
                Tone::Red,
                Tone::Purple,
                Tone::Orange,
                Tone::DarkRed,
                Tone::Gray
            ]
        );
        assert_eq!(CategoryStyle::for_label("pornography"), CategoryStyle::Other);
    }

    #[test]
    fn test_missing_severity_and_description() {
        let result = AnalysisResult {
            method: "gemini".to_string(),
            status: ContentStatus::Safe,
            categories: vec![],
            severity: None,
            description: None,
        };
        let model = present(&result);
        assert!(model.severity.is_none());
        assert!(model.description.is_none());
        assert!(model.categories.is_empty());
    }

    #[test]
    fn test_format_method() {
        assert_eq!(format_method("gemini"), "gemini");
        assert_eq!(format_method("joycaption-whisper"), "joycaption + whisper");
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(500), "500 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1_048_576), "1 MB");
        assert_eq!(format_file_size(5_767_168), "5.5 MB");
        assert_eq!(format_file_size(1_073_741_824), "1 GB");
        assert_eq!(format_file_size(1_234_567), "1.18 MB");
    }

    #[test]
    fn test_display_model_serializes() {
        let json = serde_json::to_value(present(&nsfw_confidence(0.5))).unwrap();
        assert_eq!(json["status"]["tone"], "red");
        assert_eq!(json["severity"]["kind"], "confidence");
        assert_eq!(json["severity"]["tier"], "low");
        assert_eq!(json["categories"][0]["style"], "violence");
    }
}
