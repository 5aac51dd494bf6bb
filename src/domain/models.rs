use crate::domain::error::AutomationError;

pub type BoxKey = String;

#[derive(Debug, Clone, Default)]
pub struct UpdateRequest {
    pub credential: String,
    pub pipeline_key: String,
    pub source_field_id: String,
    pub dest_field_id: String,
}

impl UpdateRequest {
    /// Checks inputs in trigger order; the first missing one is reported.
    pub fn validate(&self) -> Result<(), AutomationError> {
        let required = [
            (&self.credential, "x-StreakAPI header is missing."),
            (&self.pipeline_key, "Please provide a 'boxKey' query parameter."),
            (&self.source_field_id, "Please provide a 'fieldId' query parameter."),
            (&self.dest_field_id, "Please provide a 'fieldToUpdateId' query parameter."),
        ];

        for (value, message) in required {
            if value.is_empty() {
                return Err(AutomationError::Validation(message.to_string()));
            }
        }
        Ok(())
    }
}

#[derive(Debug)]
pub enum BoxOutcome {
    Updated { url: String },
    Skipped,
    // Still reported as updated; the write result is not checked.
    WriteFailed { url: String, error: AutomationError },
}

impl BoxOutcome {
    pub fn reported_url(&self) -> Option<&str> {
        match self {
            BoxOutcome::Updated { url } | BoxOutcome::WriteFailed { url, .. } => Some(url),
            BoxOutcome::Skipped => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateSummary {
    pub updated_urls: Vec<String>,
    pub processed: usize,
    pub skipped: usize,
    pub write_failures: usize,
}

impl UpdateSummary {
    pub fn from_outcomes(outcomes: Vec<BoxOutcome>) -> Self {
        let mut summary = UpdateSummary {
            processed: outcomes.len(),
            ..Default::default()
        };

        for outcome in outcomes {
            match outcome {
                BoxOutcome::Updated { url } => summary.updated_urls.push(url),
                BoxOutcome::WriteFailed { url, .. } => {
                    summary.write_failures += 1;
                    summary.updated_urls.push(url);
                }
                BoxOutcome::Skipped => summary.skipped += 1,
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_request() -> UpdateRequest {
        UpdateRequest {
            credential: "dG9rZW46".to_string(),
            pipeline_key: "pipeline-1".to_string(),
            source_field_id: "1001".to_string(),
            dest_field_id: "1002".to_string(),
        }
    }

    #[test]
    fn test_validate_accepts_complete_request() {
        assert!(full_request().validate().is_ok());
    }

    #[test]
    fn test_validate_reports_first_missing_input() {
        let mut request = full_request();
        request.source_field_id.clear();
        request.dest_field_id.clear();

        match request.validate() {
            Err(AutomationError::Validation(msg)) => assert!(msg.contains("fieldId")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_summary_counts_write_failures_as_updated() {
        let outcomes = vec![
            BoxOutcome::Updated { url: "https://a".to_string() },
            BoxOutcome::Skipped,
            BoxOutcome::WriteFailed {
                url: "https://b".to_string(),
                error: AutomationError::Request { status: 500, url: "x".to_string() },
            },
        ];

        let summary = UpdateSummary::from_outcomes(outcomes);
        assert_eq!(summary.updated_urls, vec!["https://a", "https://b"]);
        assert_eq!(summary.processed, 3);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.write_failures, 1);
    }
}
