// src/compare/verdict.rs
//! Structured verdict returned by the advice delegate.

use serde::{Deserialize, Serialize};

/// Reference-versus-candidate assessment.
///
/// Parsing is all-or-nothing: a response with a missing or extra field is
/// rejected rather than partially filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ComparisonVerdict {
    pub tonal_balance: String,
    pub dynamics_compare: String,
    pub stereo_depth: String,
    /// Ordered correction steps
    pub correction_blueprint: Vec<String>,
}

impl ComparisonVerdict {
    /// Parse a raw delegate response, tolerating a surrounding code fence.
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(strip_fence(raw))
    }
}

fn strip_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(body) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = body.strip_prefix("json").unwrap_or(body);
    body.strip_suffix("```").unwrap_or(body).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD: &str = r#"{
        "tonalBalance": "Candidate is 3 dB heavier around 250 Hz.",
        "dynamicsCompare": "Reference has 2 LU more short-term range.",
        "stereoDepth": "Candidate collapses below 150 Hz.",
        "correctionBlueprint": ["Cut 250 Hz by 2 dB", "Relax bus compression"]
    }"#;

    #[test]
    fn parses_well_formed_response() {
        let v = ComparisonVerdict::parse(GOOD).unwrap();
        assert_eq!(v.correction_blueprint.len(), 2);
        assert_eq!(v.correction_blueprint[0], "Cut 250 Hz by 2 dB");
    }

    #[test]
    fn accepts_fenced_json() {
        let fenced = format!("```json\n{GOOD}\n```");
        assert!(ComparisonVerdict::parse(&fenced).is_ok());
    }

    #[test]
    fn rejects_missing_blueprint() {
        let raw = r#"{"tonalBalance":"a","dynamicsCompare":"b","stereoDepth":"c"}"#;
        assert!(ComparisonVerdict::parse(raw).is_err());
    }

    #[test]
    fn rejects_blueprint_that_is_not_an_array() {
        let raw = r#"{"tonalBalance":"a","dynamicsCompare":"b","stereoDepth":"c","correctionBlueprint":"d"}"#;
        assert!(ComparisonVerdict::parse(raw).is_err());
    }

    #[test]
    fn rejects_unknown_fields() {
        let raw = r#"{"tonalBalance":"a","dynamicsCompare":"b","stereoDepth":"c","correctionBlueprint":[],"mood":"e"}"#;
        assert!(ComparisonVerdict::parse(raw).is_err());
    }

    #[test]
    fn rejects_prose() {
        assert!(ComparisonVerdict::parse("Sounds great!").is_err());
    }
}
