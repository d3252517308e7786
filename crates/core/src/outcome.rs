use serde::Serialize;
use serde_json::Value;

use crate::platform::Platform;

/// Result of one platform attempt. Lives only until the run summary is printed.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishOutcome {
    pub platform: Platform,
    /// Response payload on success, error message on failure
    pub result: Result<Value, String>,
}

impl PublishOutcome {
    pub fn success(platform: Platform, payload: Value) -> Self {
        Self {
            platform,
            result: Ok(payload),
        }
    }

    pub fn failure(platform: Platform, error: impl Into<String>) -> Self {
        Self {
            platform,
            result: Err(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Serializable view of an outcome for `--json` output
#[derive(Debug, Serialize, PartialEq)]
pub struct OutcomeOutput {
    pub platform: Platform,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Counts shown at the end of a run
#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
pub struct Summary {
    pub succeeded: usize,
    pub attempted: usize,
}

/// Full `--json` document
#[derive(Debug, Serialize, PartialEq)]
pub struct RunOutput {
    pub outcomes: Vec<OutcomeOutput>,
    pub summary: Summary,
}

/// Count successes over attempted platforms. Skipped platforms have no outcome.
pub fn summarize(outcomes: &[PublishOutcome]) -> Summary {
    Summary {
        succeeded: outcomes.iter().filter(|o| o.is_success()).count(),
        attempted: outcomes.len(),
    }
}

/// Convert outcomes to their serializable form.
pub fn transform_outcomes(outcomes: &[PublishOutcome]) -> RunOutput {
    RunOutput {
        outcomes: outcomes
            .iter()
            .map(|outcome| match &outcome.result {
                Ok(payload) => OutcomeOutput {
                    platform: outcome.platform,
                    success: true,
                    result: Some(payload.clone()),
                    error: None,
                },
                Err(error) => OutcomeOutput {
                    platform: outcome.platform,
                    success: false,
                    result: None,
                    error: Some(error.clone()),
                },
            })
            .collect(),
        summary: summarize(outcomes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summarize() {
        let outcomes = vec![
            PublishOutcome::success(Platform::DevTo, json!({ "id": 1 })),
            PublishOutcome::failure(Platform::Medium, "Medium API error: 401 - nope"),
        ];
        assert_eq!(
            summarize(&outcomes),
            Summary {
                succeeded: 1,
                attempted: 2
            }
        );
    }

    #[test]
    fn test_summarize_empty() {
        assert_eq!(
            summarize(&[]),
            Summary {
                succeeded: 0,
                attempted: 0
            }
        );
    }

    #[test]
    fn test_transform_outcomes_json_shape() {
        let outcomes = vec![
            PublishOutcome::success(Platform::Hashnode, json!({ "url": "u" })),
            PublishOutcome::failure(Platform::DevTo, "boom"),
        ];
        let value = serde_json::to_value(transform_outcomes(&outcomes)).unwrap();

        assert_eq!(
            value,
            json!({
                "outcomes": [
                    { "platform": "Hashnode", "success": true, "result": { "url": "u" } },
                    { "platform": "Dev.to", "success": false, "error": "boom" }
                ],
                "summary": { "succeeded": 1, "attempted": 2 }
            })
        );
    }
}
