//! Text-generation collaborator used to produce secret words on demand.

mod error;
mod models;
mod openai;

use std::time::Duration;

use futures::future::BoxFuture;

pub use self::error::{GeneratorError, GeneratorResult};
pub use self::openai::{DEFAULT_BASE_URL, DEFAULT_MODEL, OpenAiConfig, OpenAiGenerator};

/// Single prompt sent to a completion backend.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Instructions framing the model's role.
    pub system_prompt: String,
    /// The actual request.
    pub user_prompt: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Upper bound on the completion length.
    pub max_tokens: u32,
    /// Upper bound for the whole HTTP exchange.
    pub timeout: Duration,
}

/// Abstraction over any backend able to complete a prompt into raw text.
pub trait TextGenerator: Send + Sync {
    /// Run one completion. Implementations never retry.
    fn complete(&self, request: CompletionRequest) -> BoxFuture<'static, GeneratorResult<String>>;

    /// Whether a credential is available; a generator without one fails every call.
    fn is_configured(&self) -> bool;
}
