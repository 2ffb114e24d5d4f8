use derive_more::derive::Display;
use indoc::formatdoc;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use strum::IntoEnumIterator;

use crate::HttpClient;

use super::tags::Tag;

/// Worked examples that anchor the model's output format.
const EXAMPLES: [(&str, &[Tag]); 5] = [
    (
        "I can't log into my account, getting error 404",
        &[Tag::BugReport, Tag::TechnicalSupport],
    ),
    ("The new update is amazing! Great work!", &[Tag::Praise]),
    (
        "I've been charged twice for the same service",
        &[Tag::BillingIssue, Tag::Complaint],
    ),
    (
        "When will my order arrive? It's been 2 weeks",
        &[Tag::ShippingDelivery, Tag::Complaint],
    ),
    (
        "I want to suggest adding a dark mode feature",
        &[Tag::FeatureRequest],
    ),
];

#[derive(Debug, Display)]
pub enum PromptError {
    #[display("request to classification service failed: {_0}")]
    Transport(reqwest::Error),
    #[display("classification service responded with {_0}: {_1}")]
    Status(StatusCode, String),
    #[display("could not decode response envelope: {_0}")]
    Envelope(serde_json::Error),
    #[display("response envelope has no generated text")]
    MissingText,
    #[display("generated text is not JSON: {_0}")]
    Answer(serde_json::Error),
    #[display("generated JSON has no tags list")]
    MissingTags,
}

impl std::error::Error for PromptError {}

impl From<reqwest::Error> for PromptError {
    fn from(error: reqwest::Error) -> Self {
        PromptError::Transport(error)
    }
}

fn format_tag_list(tags: &[Tag]) -> String {
    let quoted = tags
        .iter()
        .map(|t| format!("\"{}\"", t))
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{quoted}]")
}

pub fn classification_prompt(email_content: &str) -> String {
    let categories = Tag::labels().join(", ");
    let guidelines = Tag::iter()
        .map(|t| format!("- {}: {}", t, t.guidance()))
        .collect::<Vec<_>>()
        .join("\n");
    let examples = EXAMPLES
        .iter()
        .enumerate()
        .map(|(i, (text, tags))| format!("{}. \"{}\" -> {}", i + 1, text, format_tag_list(tags)))
        .collect::<Vec<_>>()
        .join("\n");

    formatdoc! {r#"
        You are an AI assistant specialized in email classification. Your task is to classify customer messages into one or more of the following categories:

        {categories}

        Guidelines for classification:
        {guidelines}

        Examples:
        {examples}

        Now, classify this message:
        {email_content}

        IMPORTANT: You must respond with ONLY a JSON object in this exact format: {{"tags": ["tag1", "tag2"]}}
        Do not include any other text or explanation. Use ONLY the tags from the provided list above.
        "#,
        categories = categories,
        guidelines = guidelines,
        examples = examples,
        email_content = email_content,
    }
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
pub struct ContentPart {
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// `candidates[0].content.parts[0].text`
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }
}

/// Parse the model's generated text into vocabulary tags.
///
/// Labels outside the vocabulary (and non-string entries) are dropped, keeping
/// the model's order. The result may be empty.
pub fn parse_tags_answer(content: &str) -> Result<Vec<Tag>, PromptError> {
    let parsed: serde_json::Value = serde_json::from_str(content).map_err(PromptError::Answer)?;
    let tags = parsed
        .get("tags")
        .and_then(|v| v.as_array())
        .ok_or(PromptError::MissingTags)?;

    Ok(tags
        .iter()
        .filter_map(|v| v.as_str())
        .filter_map(Tag::parse_label)
        .collect())
}

pub async fn send_tag_prompt(
    http_client: &HttpClient,
    endpoint: &str,
    api_key: &str,
    email_content: &str,
) -> Result<Vec<Tag>, PromptError> {
    let resp = http_client
        .post(endpoint)
        .query(&[("key", api_key)])
        .json(&json!({
            "contents": [
                {
                    "parts": [
                        { "text": classification_prompt(email_content) }
                    ]
                }
            ]
        }))
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        let error_text = resp.text().await.unwrap_or_default();
        return Err(PromptError::Status(status, error_text));
    }

    let body = resp.text().await?;
    tracing::debug!("Raw classification response: {}", body);

    let envelope: GenerateContentResponse =
        serde_json::from_str(&body).map_err(PromptError::Envelope)?;
    let Some(generated_text) = envelope.first_text() else {
        let finish_reason = envelope
            .candidates
            .first()
            .and_then(|c| c.finish_reason.as_deref());
        tracing::warn!("No generated text, finish reason: {:?}", finish_reason);
        return Err(PromptError::MissingText);
    };
    tracing::debug!("Generated text: {}", generated_text);

    parse_tags_answer(generated_text)
}
