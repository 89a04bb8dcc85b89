use std::sync::Arc;

use futures::future::BoxFuture;
use reqwest::Client;

use super::{
    CompletionRequest, TextGenerator,
    error::{GeneratorError, GeneratorResult},
    models::{ChatCompletionBody, ChatCompletionResponse, ChatMessage},
};

/// Default API root, overridable for proxies and compatible providers.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
/// Model used when the configuration does not name one.
pub const DEFAULT_MODEL: &str = "gpt-4";

/// Runtime configuration describing how to reach the completion API.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API root, without the `/chat/completions` suffix.
    pub base_url: String,
    /// Chat model name.
    pub model: String,
    /// Bearer credential; blank values count as absent.
    pub api_key: Option<String>,
}

/// [`TextGenerator`] backed by an OpenAI-compatible `/chat/completions` endpoint.
#[derive(Clone)]
pub struct OpenAiGenerator {
    client: Client,
    base_url: Arc<str>,
    model: Arc<str>,
    api_key: Option<Arc<str>>,
}

impl OpenAiGenerator {
    /// Build the HTTP client. No request is issued until the first completion.
    pub fn new(config: OpenAiConfig) -> GeneratorResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|source| GeneratorError::ClientBuilder { source })?;

        let api_key = config
            .api_key
            .filter(|key| !key.trim().is_empty())
            .map(Arc::<str>::from);

        Ok(Self {
            client,
            base_url: Arc::<str>::from(config.base_url.trim_end_matches('/')),
            model: Arc::<str>::from(config.model),
            api_key,
        })
    }

    async fn send(
        client: Client,
        url: String,
        model: Arc<str>,
        api_key: Arc<str>,
        request: CompletionRequest,
    ) -> GeneratorResult<String> {
        let body = ChatCompletionBody {
            model: &model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user_prompt,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let response = client
            .post(&url)
            .bearer_auth(api_key.as_ref())
            .timeout(request.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|source| GeneratorError::RequestSend {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeneratorError::RequestStatus { status, body });
        }

        let payload = response
            .json::<ChatCompletionResponse>()
            .await
            .map_err(|source| GeneratorError::DecodeResponse { source })?;

        payload
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.unwrap_or_default())
            .ok_or(GeneratorError::NoChoices)
    }
}

impl TextGenerator for OpenAiGenerator {
    fn complete(&self, request: CompletionRequest) -> BoxFuture<'static, GeneratorResult<String>> {
        let Some(api_key) = self.api_key.clone() else {
            return Box::pin(async { Err(GeneratorError::MissingCredential) });
        };

        let client = self.client.clone();
        let url = format!("{}/chat/completions", self.base_url);
        let model = self.model.clone();
        Box::pin(Self::send(client, url, model, api_key, request))
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}
