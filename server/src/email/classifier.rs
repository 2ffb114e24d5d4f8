use futures::{stream, StreamExt};

use crate::{
    model::{BatchClassificationResult, ClassificationResult},
    prompt::{gemini, Tag},
    server_config::ServerConfig,
    HttpClient,
};

/// Tags emails through the remote generative-language service.
///
/// Every failure mode degrades to `[Tag::Other]`; callers never see an error.
#[derive(Clone)]
pub struct EmailClassifier {
    http_client: HttpClient,
    endpoint: String,
    api_key: String,
    max_concurrency: usize,
}

impl EmailClassifier {
    pub fn new(
        http_client: HttpClient,
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        max_concurrency: usize,
    ) -> Self {
        Self {
            http_client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            max_concurrency: max_concurrency.max(1),
        }
    }

    pub fn from_config(http_client: HttpClient, config: &ServerConfig) -> anyhow::Result<Self> {
        let endpoint = config.endpoint()?;
        if config.api_key.is_none() {
            tracing::warn!(
                "No API key configured, every email will be tagged {}",
                Tag::FALLBACK
            );
        }

        Ok(Self::new(
            http_client,
            endpoint.as_str(),
            config.api_key.clone().unwrap_or_default(),
            config.batch.max_concurrency,
        ))
    }

    pub async fn classify(&self, email: &str) -> ClassificationResult {
        tracing::debug!("Processing email: {}", email);

        let tags = match gemini::send_tag_prompt(
            &self.http_client,
            &self.endpoint,
            &self.api_key,
            email,
        )
        .await
        {
            Ok(tags) if tags.is_empty() => {
                tracing::warn!("No valid tags found, defaulting to {}", Tag::FALLBACK);
                Tag::fallback_list()
            }
            Ok(tags) => {
                tracing::debug!("Validated tags: {:?}", tags);
                tags
            }
            Err(e) => {
                tracing::error!("Error in classification: {}", e);
                Tag::fallback_list()
            }
        };

        ClassificationResult {
            email: email.to_string(),
            tags,
        }
    }

    /// Results come back in input order whatever order the remote calls finish in.
    pub async fn classify_batch(&self, emails: &[String]) -> BatchClassificationResult {
        tracing::info!(
            "Classifying batch of {} emails, up to {} at a time",
            emails.len(),
            self.max_concurrency
        );

        let results = stream::iter(emails.iter().cloned())
            .map(|email| {
                let classifier = self.clone();
                async move { classifier.classify(&email).await }
            })
            .buffered(self.max_concurrency)
            .collect::<Vec<_>>()
            .await;

        BatchClassificationResult { results }
    }
}
