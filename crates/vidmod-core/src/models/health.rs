use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthReport {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    /// Upstream model providers and whether each one is configured
    #[serde(default)]
    pub services: BTreeMap<String, bool>,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }

    /// Providers the service reports as not configured.
    pub fn unavailable_services(&self) -> Vec<&str> {
        self.services
            .iter()
            .filter(|(_, available)| !**available)
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_health_report() {
        let report: HealthReport = serde_json::from_str(
            r#"{
                "status": "healthy",
                "timestamp": "2024-05-01T10:00:00.123456",
                "services": {"gemini": true, "replicate": false, "grok": true}
            }"#,
        )
        .unwrap();
        assert!(report.is_healthy());
        assert_eq!(report.services.len(), 3);
        assert_eq!(report.unavailable_services(), vec!["replicate"]);
    }

    #[test]
    fn test_minimal_health_report() {
        let report: HealthReport = serde_json::from_str(r#"{"status": "degraded"}"#).unwrap();
        assert!(!report.is_healthy());
        assert!(report.timestamp.is_none());
        assert!(report.unavailable_services().is_empty());
    }
}
