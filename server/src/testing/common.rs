use serde_json::json;
use wiremock::{matchers::method, Mock, MockServer, ResponseTemplate};

use crate::{email::classifier::EmailClassifier, state::BatchCache, HttpClient, ServerState};

pub const TEST_API_KEY: &str = "test-key";
pub const TEST_MODEL_PATH: &str = "/v1beta/models/test-model:generateContent";

/// Generate-content envelope wrapping `text` the way the service returns it.
pub fn gemini_reply(text: &str) -> serde_json::Value {
    json!({
        "candidates": [
            {
                "content": {
                    "parts": [{ "text": text }],
                    "role": "model"
                },
                "finishReason": "STOP",
                "index": 0
            }
        ],
        "modelVersion": "test-model"
    })
}

/// Answers every POST with `generated_text`.
pub async fn mount_reply(server: &MockServer, generated_text: &str) {
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply(generated_text)))
        .mount(server)
        .await;
}

pub async fn remote_call_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .map(|requests| requests.len())
        .unwrap_or(0)
}

pub fn classifier_for(server: &MockServer) -> EmailClassifier {
    EmailClassifier::new(
        HttpClient::new(),
        format!("{}{}", server.uri(), TEST_MODEL_PATH),
        TEST_API_KEY,
        8,
    )
}

pub fn state_for(server: &MockServer) -> ServerState {
    ServerState {
        classifier: classifier_for(server),
        batch_cache: BatchCache::new(),
    }
}
