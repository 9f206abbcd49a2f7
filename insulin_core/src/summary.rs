//! Summary document generation for export.
//!
//! Takes a validated payload of calculated result lines and renders the
//! plain-text summary document. Validation failures reject the whole
//! payload; no partial document is ever produced.

use crate::{Error, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Export payload: which calculator, when, and its result lines.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SummaryRequest {
    pub module_name: String,
    pub timestamp: String,
    pub results: Vec<String>,
}

impl SummaryRequest {
    /// Build a request stamped with the current UTC time.
    pub fn new(module_name: impl Into<String>, results: Vec<String>) -> Self {
        Self {
            module_name: module_name.into(),
            timestamp: Utc::now().format("%Y-%m-%d %H:%M UTC").to_string(),
            results,
        }
    }
}

/// Parse and validate an export payload from JSON.
///
/// Non-string result entries and missing fields fail serde
/// deserialization; an empty module name fails the explicit check. Both
/// surface as a single [`Error::Summary`].
pub fn parse_request(json: &str) -> Result<SummaryRequest> {
    let request: SummaryRequest = serde_json::from_str(json)
        .map_err(|e| Error::Summary(format!("Invalid request data: {}", e)))?;
    validate(&request)?;
    Ok(request)
}

fn validate(request: &SummaryRequest) -> Result<()> {
    if request.module_name.trim().is_empty() {
        return Err(Error::Summary("module name must not be empty".into()));
    }
    Ok(())
}

/// Render the plain-text summary document.
pub fn render(request: &SummaryRequest) -> Result<String> {
    validate(request)?;

    let mut content = format!("Insulin Calculator Summary - {}\n", request.module_name);
    content.push_str(&format!("Generated: {}\n\n", request.timestamp));

    if request.results.is_empty() {
        content.push_str("No calculations available.\n");
    } else {
        content.push_str("Calculated Values:\n");
        for line in &request.results {
            content.push_str(line);
            content.push('\n');
        }
    }

    content.push_str("\n---\n");
    content.push_str("This summary was generated by the Inpatient Insulin Calculator\n");
    content.push_str("based on ADA 2025 Guidelines for clinical reference.\n");

    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_with_results() {
        let request = SummaryRequest {
            module_name: "Correction Dose Calculator".into(),
            timestamp: "2025-01-15 10:30 UTC".into(),
            results: vec![
                "Insulin Sensitivity Factor: 40 mg/dL/unit".into(),
                "Correction Dose (rounded): 2 units".into(),
            ],
        };

        let text = render(&request).unwrap();
        assert!(text.starts_with("Insulin Calculator Summary - Correction Dose Calculator\n"));
        assert!(text.contains("Generated: 2025-01-15 10:30 UTC\n"));
        assert!(text.contains("Calculated Values:\nInsulin Sensitivity Factor"));
        assert!(text.contains("\n---\n"));
        assert!(text.contains("ADA 2025 Guidelines"));
    }

    #[test]
    fn test_render_empty_results_placeholder() {
        let request = SummaryRequest::new("New Insulin Initiation", vec![]);
        let text = render(&request).unwrap();
        assert!(text.contains("No calculations available.\n"));
        assert!(!text.contains("Calculated Values:"));
    }

    #[test]
    fn test_parse_rejects_missing_module_name() {
        let json = r#"{"timestamp": "now", "results": []}"#;
        let err = parse_request(json).unwrap_err();
        assert!(matches!(err, Error::Summary(_)));
    }

    #[test]
    fn test_parse_rejects_non_string_results() {
        let json = r#"{"module_name": "M4", "timestamp": "now", "results": [1, 2]}"#;
        assert!(parse_request(json).is_err());
    }

    #[test]
    fn test_parse_rejects_blank_module_name() {
        let json = r#"{"module_name": "  ", "timestamp": "now", "results": []}"#;
        assert!(parse_request(json).is_err());
    }

    #[test]
    fn test_render_rejects_invalid_without_partial_output() {
        let request = SummaryRequest {
            module_name: "".into(),
            timestamp: "now".into(),
            results: vec!["line".into()],
        };
        assert!(render(&request).is_err());
    }

    #[test]
    fn test_parse_accepts_valid_payload() {
        let json = r#"{
            "module_name": "Conversion from Home Insulin",
            "timestamp": "2025-01-15 10:30 UTC",
            "results": ["Adjusted TDD: 32.0 units"]
        }"#;
        let request = parse_request(json).unwrap();
        assert_eq!(request.results.len(), 1);
    }
}
