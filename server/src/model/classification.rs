use serde::{Deserialize, Serialize};

use crate::prompt::Tag;

/// # POST /classify
#[derive(Debug, Deserialize)]
pub struct EmailInput {
    pub content: String,
}

/// # POST /classify-batch, POST /export-csv
#[derive(Debug, Deserialize)]
pub struct EmailBatchInput {
    pub emails: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub email: String,
    /// Never empty; falls back to `[Tag::Other]`.
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchClassificationResult {
    pub results: Vec<ClassificationResult>,
}

impl BatchClassificationResult {
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Same length, same order, same strings.
    pub fn matches_emails(&self, emails: &[String]) -> bool {
        self.results.len() == emails.len()
            && self
                .results
                .iter()
                .zip(emails)
                .all(|(result, email)| &result.email == email)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CsvExport {
    pub csv: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(emails: &[&str]) -> BatchClassificationResult {
        BatchClassificationResult {
            results: emails
                .iter()
                .map(|e| ClassificationResult {
                    email: e.to_string(),
                    tags: vec![Tag::Other],
                })
                .collect(),
        }
    }

    fn owned(emails: &[&str]) -> Vec<String> {
        emails.iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn test_matches_emails() {
        let stored = batch(&["a", "b"]);
        assert!(stored.matches_emails(&owned(&["a", "b"])));
        assert!(!stored.matches_emails(&owned(&["b", "a"])));
        assert!(!stored.matches_emails(&owned(&["a", "b", "c"])));
        assert!(!stored.matches_emails(&owned(&["a"])));
        assert!(!stored.matches_emails(&owned(&["a", "B"])));
    }

    #[test]
    fn test_empty_batch_matches_empty_list() {
        assert!(BatchClassificationResult::default().matches_emails(&[]));
    }

    #[test]
    fn test_result_json_shape() {
        let result = ClassificationResult {
            email: "charged twice".to_string(),
            tags: vec![Tag::BillingIssue, Tag::Complaint],
        };
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            serde_json::json!({"email": "charged twice", "tags": ["Billing Issue", "Complaint"]})
        );
    }
}
