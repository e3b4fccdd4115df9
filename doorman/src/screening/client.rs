//! Single-shot compliance evaluation against the remote provider.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;
use utoipa::ToSchema;

use crate::config::ProviderConfig;
use crate::screening::messages::ChatMessage;

/// The envelope every analyze endpoint returns.
///
/// `Response` carries the provider's structured verdict as the raw content
/// string of the first completion choice - it is relayed without parsing or
/// validation, so downstream consumers interpret it against the declared
/// schema themselves. `Error` carries a human-readable description of
/// whatever went wrong talking to the provider.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ScreeningOutcome {
    Response { response: String },
    Error { error: String },
}

/// First-choice subset of the provider's chat completion response.
#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: String,
}

/// Issues compliance evaluations against the provider's chat-completions API.
///
/// The client holds a reqwest connection pool and the fixed request
/// parameters. Exactly one provider request is made per evaluation - no
/// retries, no streaming - and every failure mode is folded into the
/// [`ScreeningOutcome`] envelope rather than raised, so callers always get a
/// response body to relay.
#[derive(Clone)]
pub struct ScreeningClient {
    client: Client,
    provider: ProviderConfig,
}

/// Structured-output schema constraining the provider's verdict to a boolean
/// `status` plus a `violation_reason` string, with nothing else permitted.
fn verdict_response_format() -> serde_json::Value {
    json!({
        "type": "json_schema",
        "json_schema": {
            "name": "compliance_verdict",
            "strict": true,
            "schema": {
                "type": "object",
                "properties": {
                    "status": { "type": "boolean" },
                    "violation_reason": { "type": "string" }
                },
                "required": ["status", "violation_reason"],
                "additionalProperties": false
            }
        }
    })
}

impl ScreeningClient {
    /// Create a new screening client with a default HTTP client.
    pub fn new(provider: ProviderConfig) -> Self {
        Self {
            client: Client::new(),
            provider,
        }
    }

    /// Evaluate a normalized message list against the provider.
    ///
    /// Never raises: transport errors, provider-side rejections and
    /// unparseable responses all come back as [`ScreeningOutcome::Error`].
    pub async fn evaluate(&self, messages: Vec<ChatMessage>) -> ScreeningOutcome {
        let url = format!("{}/chat/completions", self.provider.base_url.as_str().trim_end_matches('/'));
        let payload = json!({
            "model": self.provider.model,
            "messages": messages,
            "temperature": self.provider.temperature,
            "top_p": self.provider.top_p,
            "max_tokens": self.provider.max_tokens,
            "response_format": verdict_response_format(),
        });

        debug!(model = %self.provider.model, url = %url, "Sending screening request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.provider.api_key)
            .json(&payload)
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(e) => return ScreeningOutcome::Error { error: e.to_string() },
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return ScreeningOutcome::Error {
                    error: format!("HTTP {} - Failed to read response body: {}", status.as_u16(), e),
                };
            }
        };

        if !status.is_success() {
            return ScreeningOutcome::Error {
                error: format!("HTTP {} - {}", status.as_u16(), body),
            };
        }

        match serde_json::from_str::<CompletionResponse>(&body) {
            Ok(completion) => match completion.choices.into_iter().next() {
                Some(choice) => ScreeningOutcome::Response {
                    response: choice.message.content,
                },
                None => ScreeningOutcome::Error {
                    error: "Provider returned no completion choices".to_string(),
                },
            },
            Err(e) => ScreeningOutcome::Error {
                error: format!("Failed to parse provider response: {}", e),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screening::messages::text_messages;
    use crate::test_utils::{MockResponse, spawn_mock_provider, test_provider_config};

    #[test]
    fn test_verdict_schema_is_strict() {
        let format = verdict_response_format();

        assert_eq!(format["type"], "json_schema");
        assert_eq!(format["json_schema"]["strict"], true);
        let schema = &format["json_schema"]["schema"];
        assert_eq!(schema["properties"]["status"]["type"], "boolean");
        assert_eq!(schema["properties"]["violation_reason"]["type"], "string");
        assert_eq!(schema["additionalProperties"], false);
    }

    #[test]
    fn test_outcome_envelope_shape() {
        let success = serde_json::to_value(ScreeningOutcome::Response {
            response: "{\"status\": true, \"violation_reason\": \"\"}".to_string(),
        })
        .unwrap();
        assert_eq!(success.as_object().unwrap().keys().collect::<Vec<_>>(), vec!["response"]);

        let failure = serde_json::to_value(ScreeningOutcome::Error {
            error: "connection refused".to_string(),
        })
        .unwrap();
        assert_eq!(failure.as_object().unwrap().keys().collect::<Vec<_>>(), vec!["error"]);
    }

    #[test_log::test(tokio::test)]
    async fn test_successful_verdict_is_passed_through_raw() {
        // Deliberately not valid JSON - the client must relay it untouched
        let mock = spawn_mock_provider(MockResponse::Success("not-even-json".to_string())).await;
        let client = ScreeningClient::new(test_provider_config(&mock));

        let outcome = client.evaluate(text_messages("hello")).await;

        assert!(matches!(outcome, ScreeningOutcome::Response { response } if response == "not-even-json"));
        assert_eq!(mock.hits(), 1);
    }

    #[test_log::test(tokio::test)]
    async fn test_request_carries_fixed_parameters() {
        let mock = spawn_mock_provider(MockResponse::Success("ok".to_string())).await;
        let client = ScreeningClient::new(test_provider_config(&mock));

        client.evaluate(text_messages("hello")).await;

        let body = mock.last_body().expect("provider should have been called");
        assert_eq!(body["model"], "screening-model");
        assert_eq!(body["temperature"], 0.0);
        assert_eq!(body["max_tokens"], 500);
        assert_eq!(body["response_format"]["json_schema"]["name"], "compliance_verdict");
        assert_eq!(body["messages"].as_array().unwrap().len(), 2);
    }

    #[test_log::test(tokio::test)]
    async fn test_provider_rejection_becomes_error_envelope() {
        let mock = spawn_mock_provider(MockResponse::Status(500, "upstream exploded".to_string())).await;
        let client = ScreeningClient::new(test_provider_config(&mock));

        let outcome = client.evaluate(text_messages("hello")).await;

        match outcome {
            ScreeningOutcome::Error { error } => {
                assert!(error.starts_with("HTTP 500"), "unexpected error: {error}");
                assert!(error.contains("upstream exploded"));
            }
            other => panic!("expected error envelope, got {other:?}"),
        }
    }

    #[test_log::test(tokio::test)]
    async fn test_unreachable_provider_becomes_error_envelope() {
        // Bind a port and drop it so nothing is listening there
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ScreeningClient::new(test_provider_config_at(&format!("http://{addr}")));

        let outcome = client.evaluate(text_messages("hello")).await;

        assert!(matches!(outcome, ScreeningOutcome::Error { error } if !error.is_empty()));
    }

    #[test_log::test(tokio::test)]
    async fn test_malformed_completion_becomes_error_envelope() {
        let mock = spawn_mock_provider(MockResponse::Raw("{\"choices\": \"nope\"}".to_string())).await;
        let client = ScreeningClient::new(test_provider_config(&mock));

        let outcome = client.evaluate(text_messages("hello")).await;

        assert!(matches!(outcome, ScreeningOutcome::Error { error } if error.starts_with("Failed to parse provider response")));
    }

    fn test_provider_config_at(base_url: &str) -> crate::config::ProviderConfig {
        crate::config::ProviderConfig {
            api_key: "sk-test".to_string(),
            base_url: base_url.parse().unwrap(),
            ..Default::default()
        }
    }
}
