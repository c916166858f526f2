//! Chat-completions client for an OpenAI-compatible endpoint.
//!
//! Speaks the `/chat/completions` wire format: a model name plus a list
//! of role-tagged messages, answered with a list of choices of which we
//! read the first. Groq hosts this shape, but any compatible endpoint
//! works.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use rg_core::Config;

use crate::error::{StoryError, StoryResult};

/// Timeout for completion requests. Generation is slow compared to the
/// data APIs, so this is deliberately generous.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// A chat message role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions to the model.
    System,
    /// The player's input.
    User,
    /// The model's own prior output.
    Assistant,
}

/// One message in a chat transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Who said it.
    pub role: Role,
    /// What they said.
    pub content: String,
}

impl Message {
    /// A system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// A user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// An assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f64,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

/// Blocking client for a chat-completions endpoint.
pub struct ChatClient {
    client: reqwest::blocking::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl ChatClient {
    /// Build a client from configuration. Fails if no Groq API key is
    /// configured.
    pub fn from_config(config: &Config) -> StoryResult<Self> {
        let api_key = config.require_groq_key()?;
        Self::new(api_key, &config.groq_endpoint, &config.groq_model)
    }

    /// Build a client against an explicit endpoint.
    pub fn new(api_key: &str, endpoint: &str, model: &str) -> StoryResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.to_owned(),
            api_key: api_key.to_owned(),
            model: model.to_owned(),
        })
    }

    /// The configured model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Request a completion for `messages` and return the assistant's
    /// reply text.
    pub fn complete(
        &self,
        messages: &[Message],
        temperature: f64,
        max_tokens: u32,
    ) -> StoryResult<String> {
        let request = CompletionRequest {
            model: &self.model,
            messages,
            temperature,
            max_tokens,
        };

        debug!(
            model = %self.model,
            messages = messages.len(),
            "requesting completion"
        );

        let response: CompletionResponse = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()?
            .error_for_status()?
            .json()?;

        let content = response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| StoryError::Completion("response contained no choices".into()))?;

        if content.trim().is_empty() {
            return Err(StoryError::Completion("response content was empty".into()));
        }
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;

    #[test]
    fn roles_serialize_lowercase() {
        let msg = Message::system("hi");
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["role"], "system");
        assert_eq!(value["content"], "hi");
    }

    #[test]
    fn complete_returns_first_choice_content() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .header("authorization", "Bearer test-key")
                .json_body_partial(r#"{ "model": "test-model" }"#);
            then.status(200).json_body(json!({
                "choices": [
                    { "message": { "role": "assistant", "content": "Story: hello" } }
                ]
            }));
        });

        let client =
            ChatClient::new("test-key", &server.url("/chat/completions"), "test-model").unwrap();
        let reply = client
            .complete(&[Message::user("hi")], 0.7, 1024)
            .unwrap();

        mock.assert();
        assert_eq!(reply, "Story: hello");
    }

    #[test]
    fn empty_choice_list_is_a_completion_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(json!({ "choices": [] }));
        });

        let client =
            ChatClient::new("k", &server.url("/chat/completions"), "test-model").unwrap();
        let err = client.complete(&[Message::user("hi")], 0.7, 1024).unwrap_err();
        assert!(matches!(err, StoryError::Completion(_)));
    }

    #[test]
    fn http_error_status_surfaces_as_http_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(429);
        });

        let client =
            ChatClient::new("k", &server.url("/chat/completions"), "test-model").unwrap();
        let err = client.complete(&[Message::user("hi")], 0.7, 1024).unwrap_err();
        assert!(matches!(err, StoryError::Http(_)));
    }
}
