use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::prompt::build_prompt;
use super::{EnrichmentError, Summarizer};
use crate::config::EnrichmentConfig;
use crate::evaluation::StoryPayload;

const APIKEY_GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";

/// Resolved settings for calling watsonx.ai text generation.
#[derive(Clone)]
pub struct WatsonxConfig {
    pub service_url: String,
    pub api_key: String,
    pub project_id: String,
    pub model_id: String,
    pub iam_url: String,
    pub api_version: String,
    pub max_new_tokens: u32,
    pub timeout_secs: u64,
}

impl WatsonxConfig {
    pub fn from_settings(settings: &EnrichmentConfig) -> Result<Self, EnrichmentError> {
        let service_url = settings
            .service_url
            .clone()
            .ok_or(EnrichmentError::MissingSetting("WATSONX_URL"))?;
        let api_key = settings
            .api_key
            .clone()
            .ok_or(EnrichmentError::MissingSetting("WATSONX_APIKEY"))?;
        let project_id = settings
            .project_id
            .clone()
            .ok_or(EnrichmentError::MissingSetting("WATSONX_PROJECT_ID"))?;

        Ok(Self {
            service_url: service_url.trim_end_matches('/').to_string(),
            api_key,
            project_id,
            model_id: settings.model_id.clone(),
            iam_url: settings.iam_url.trim_end_matches('/').to_string(),
            api_version: settings.api_version.clone(),
            max_new_tokens: settings.max_new_tokens,
            timeout_secs: settings.timeout_secs,
        })
    }
}

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    input: &'a str,
    model_id: &'a str,
    project_id: &'a str,
    parameters: GenerationParameters,
}

#[derive(Debug, Serialize)]
struct GenerationParameters {
    max_new_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    #[serde(default)]
    results: Vec<GenerationResult>,
}

#[derive(Debug, Deserialize)]
struct GenerationResult {
    #[serde(default)]
    generated_text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Summarizer backed by a Granite model hosted on watsonx.ai.
#[derive(Clone)]
pub struct WatsonxClient {
    client: Client,
    config: WatsonxConfig,
}

impl WatsonxClient {
    pub fn new(config: WatsonxConfig) -> Result<Self, EnrichmentError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    pub fn from_settings(settings: &EnrichmentConfig) -> Result<Self, EnrichmentError> {
        Self::new(WatsonxConfig::from_settings(settings)?)
    }

    pub fn model_id(&self) -> &str {
        &self.config.model_id
    }

    /// Exchange the API key for a short-lived IAM bearer token.
    async fn access_token(&self) -> Result<String, EnrichmentError> {
        let url = format!("{}/identity/token", self.config.iam_url);
        let response = self
            .client
            .post(&url)
            .form(&[
                ("grant_type", APIKEY_GRANT_TYPE),
                ("apikey", self.config.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EnrichmentError::Http { status, body });
        }

        let token: TokenResponse = response.json().await?;
        Ok(token.access_token)
    }

    /// Run a single text generation request; no retries.
    pub async fn generate(&self, input: &str) -> Result<String, EnrichmentError> {
        let token = self.access_token().await?;
        let url = format!(
            "{}/ml/v1/text/generation?version={}",
            self.config.service_url, self.config.api_version
        );
        let request = GenerationRequest {
            input,
            model_id: &self.config.model_id,
            project_id: &self.config.project_id,
            parameters: GenerationParameters {
                max_new_tokens: self.config.max_new_tokens,
            },
        };

        debug!(model = %self.config.model_id, "requesting story summary");
        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EnrichmentError::Http { status, body });
        }

        let generation: GenerationResponse = response.json().await?;
        Ok(generation
            .results
            .into_iter()
            .next()
            .and_then(|result| result.generated_text)
            .unwrap_or_default())
    }
}

#[async_trait]
impl Summarizer for WatsonxClient {
    async fn summarize(&self, payload: &StoryPayload) -> Result<String, EnrichmentError> {
        let prompt = build_prompt(payload);
        self.generate(&prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::Stage;
    use wiremock::matchers::{
        body_partial_json, body_string_contains, header, method, path, query_param,
    };
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base_url: &str) -> WatsonxConfig {
        WatsonxConfig {
            service_url: base_url.to_string(),
            api_key: "test-api-key".to_string(),
            project_id: "project-123".to_string(),
            model_id: "ibm/granite-3-3-8b-instruct".to_string(),
            iam_url: base_url.to_string(),
            api_version: "2024-05-31".to_string(),
            max_new_tokens: 280,
            timeout_secs: 5,
        }
    }

    fn payload() -> StoryPayload {
        StoryPayload::new(
            vec![Stage::new("Pembuka", &["hujan"], "Hujan turun di kota.")],
            "kenangan",
        )
    }

    async fn mount_token(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/identity/token"))
            .and(body_string_contains("apikey=test-api-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "iam-token",
                "token_type": "Bearer",
                "expires_in": 3600
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn summarize_returns_generated_text() {
        let server = MockServer::start().await;
        mount_token(&server).await;

        Mock::given(method("POST"))
            .and(path("/ml/v1/text/generation"))
            .and(query_param("version", "2024-05-31"))
            .and(header("authorization", "Bearer iam-token"))
            .and(body_partial_json(serde_json::json!({
                "model_id": "ibm/granite-3-3-8b-instruct",
                "project_id": "project-123",
                "parameters": { "max_new_tokens": 280 }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [{ "generated_text": "Cerita hujan yang hangat." }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = WatsonxClient::new(test_config(&server.uri())).expect("client builds");
        let summary = client.summarize(&payload()).await.expect("summary");

        assert_eq!(summary, "Cerita hujan yang hangat.");
    }

    #[tokio::test]
    async fn summarize_defaults_to_empty_text_without_results() {
        let server = MockServer::start().await;
        mount_token(&server).await;

        Mock::given(method("POST"))
            .and(path("/ml/v1/text/generation"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let client = WatsonxClient::new(test_config(&server.uri())).expect("client builds");
        let summary = client.summarize(&payload()).await.expect("summary");

        assert_eq!(summary, "");
    }

    #[tokio::test]
    async fn generation_failure_is_reported_without_retry() {
        let server = MockServer::start().await;
        mount_token(&server).await;

        Mock::given(method("POST"))
            .and(path("/ml/v1/text/generation"))
            .respond_with(ResponseTemplate::new(503).set_body_string("model overloaded"))
            .expect(1)
            .mount(&server)
            .await;

        let client = WatsonxClient::new(test_config(&server.uri())).expect("client builds");
        let err = client
            .summarize(&payload())
            .await
            .expect_err("503 is an error");

        match err {
            EnrichmentError::Http { status, body } => {
                assert_eq!(status.as_u16(), 503);
                assert_eq!(body, "model overloaded");
            }
            other => panic!("expected HTTP error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn slow_generation_times_out() {
        let server = MockServer::start().await;
        mount_token(&server).await;

        Mock::given(method("POST"))
            .and(path("/ml/v1/text/generation"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({
                        "results": [{ "generated_text": "terlambat" }]
                    }))
                    .set_delay(Duration::from_secs(3)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let mut config = test_config(&server.uri());
        config.timeout_secs = 1;
        let client = WatsonxClient::new(config).expect("client builds");
        let err = client
            .summarize(&payload())
            .await
            .expect_err("slow model is an error");

        match err {
            EnrichmentError::Request(source) => assert!(source.is_timeout(), "{source:?}"),
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn rejected_api_key_stops_before_generation() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/identity/token"))
            .respond_with(ResponseTemplate::new(400).set_body_string("invalid apikey"))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/ml/v1/text/generation"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = WatsonxClient::new(test_config(&server.uri())).expect("client builds");
        let err = client.summarize(&payload()).await.expect_err("token rejected");

        assert!(matches!(err, EnrichmentError::Http { .. }));
    }

    #[test]
    fn settings_require_credentials() {
        let mut settings = EnrichmentConfig::disabled();
        settings.enabled = true;
        settings.service_url = Some("https://us-south.ml.cloud.ibm.com/".to_string());

        match WatsonxConfig::from_settings(&settings) {
            Err(EnrichmentError::MissingSetting(key)) => assert_eq!(key, "WATSONX_APIKEY"),
            Err(other) => panic!("expected missing setting, got {other:?}"),
            Ok(_) => panic!("expected missing setting"),
        }

        settings.api_key = Some("key".to_string());
        settings.project_id = Some("project".to_string());
        let config = WatsonxConfig::from_settings(&settings).expect("complete settings");
        assert_eq!(config.service_url, "https://us-south.ml.cloud.ibm.com");
    }
}
