//! Secret word selection: generated on demand, or drawn from the fixed pool.

use std::{fmt, str::FromStr, sync::Arc, time::Duration};

use rand::{Rng, rngs::StdRng};
use serde::Deserialize;
use thiserror::Error;
use tokio::{sync::Mutex, time::timeout};
use tracing::{debug, warn};

use crate::{
    config::AppConfig,
    dao::generator::{CompletionRequest, GeneratorError, TextGenerator},
};

const SYSTEM_PROMPT: &str = "You are a word generator for Arabic party games. \
Reply with the requested word only, without any additional text.";

/// What to do when generation was requested but failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackMode {
    /// Substitute a fixed-pool word and flag the substitution.
    #[default]
    Lenient,
    /// Surface the failure to the caller.
    Strict,
}

impl fmt::Display for FallbackMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackMode::Lenient => f.write_str("lenient"),
            FallbackMode::Strict => f.write_str("strict"),
        }
    }
}

/// Raised when a fallback mode string is neither `lenient` nor `strict`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown fallback mode `{0}` (expected `lenient` or `strict`)")]
pub struct UnknownFallbackMode(String);

impl FromStr for FallbackMode {
    type Err = UnknownFallbackMode;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(FallbackMode::Lenient),
            "strict" => Ok(FallbackMode::Strict),
            _ => Err(UnknownFallbackMode(value.to_owned())),
        }
    }
}

/// Reasons a generation attempt produced no usable word.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The collaborator is unconfigured or the call itself failed.
    #[error(transparent)]
    Unavailable(#[from] GeneratorError),
    /// No answer within the configured limit.
    #[error("word generation timed out after {}s", .0.as_secs_f32())]
    TimedOut(Duration),
    /// The collaborator answered with blank text.
    #[error("word generator returned an empty response")]
    Empty,
}

/// The fixed vocabulary. Construction guarantees it is never empty.
#[derive(Debug, Clone)]
pub struct FixedPool {
    terms: Arc<[String]>,
}

/// Raised when building a [`FixedPool`] without any usable term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("the fixed word pool must contain at least one term")]
pub struct EmptyPool;

impl FixedPool {
    /// Build the pool, dropping blank terms.
    pub fn new(terms: Vec<String>) -> Result<Self, EmptyPool> {
        let terms = terms
            .into_iter()
            .filter(|term| !term.trim().is_empty())
            .collect::<Vec<_>>();
        if terms.is_empty() {
            return Err(EmptyPool);
        }
        Ok(Self {
            terms: terms.into(),
        })
    }

    /// Uniform pick over the pool.
    pub fn pick<R: Rng>(&self, rng: &mut R) -> &str {
        &self.terms[rng.random_range(0..self.terms.len())]
    }

    /// Whether `term` belongs to the pool.
    pub fn contains(&self, term: &str) -> bool {
        self.terms.iter().any(|candidate| candidate == term)
    }

    /// Every term, in configuration order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}

/// Word chosen for a round or a standalone request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedWord {
    /// The selected word, already trimmed.
    pub word: String,
    /// `true` when generation failed and a fixed-pool word was substituted.
    pub fallback: bool,
}

/// Produces secret words from the generator or the fixed pool according to the fallback policy.
#[derive(Clone)]
pub struct WordSource {
    generator: Arc<dyn TextGenerator>,
    pool: FixedPool,
    mode: FallbackMode,
    temperature: f32,
    max_tokens: u32,
    timeout: Duration,
}

impl WordSource {
    /// Bind the generator and pool to the configured policy and limits.
    pub fn new(generator: Arc<dyn TextGenerator>, pool: FixedPool, config: &AppConfig) -> Self {
        Self {
            generator,
            pool,
            mode: config.fallback_mode,
            temperature: config.generation.temperature,
            max_tokens: config.generation.max_tokens,
            timeout: config.generation.timeout,
        }
    }

    /// The fixed vocabulary.
    pub fn pool(&self) -> &FixedPool {
        &self.pool
    }

    /// Whether the generator has a credential to work with.
    pub fn generation_configured(&self) -> bool {
        self.generator.is_configured()
    }

    /// Ask the generator for one word, optionally constrained to `topic`. Single attempt.
    pub async fn generate(&self, topic: Option<&str>) -> Result<String, GenerationError> {
        let request = CompletionRequest {
            system_prompt: SYSTEM_PROMPT.into(),
            user_prompt: user_prompt(topic),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            timeout: self.timeout,
        };

        let text = timeout(self.timeout, self.generator.complete(request))
            .await
            .map_err(|_| GenerationError::TimedOut(self.timeout))??;

        let word = text.trim();
        if word.is_empty() {
            return Err(GenerationError::Empty);
        }
        Ok(word.to_owned())
    }

    /// Draw a word from the fixed pool. Never fails.
    pub fn pick_fixed<R: Rng>(&self, rng: &mut R) -> String {
        self.pool.pick(rng).to_owned()
    }

    /// Resolve a word under the configured fallback policy.
    ///
    /// The random source is only locked after generation returns, so a slow call never holds it.
    pub async fn resolve(
        &self,
        topic: Option<&str>,
        use_generation: bool,
        rng: &Mutex<StdRng>,
    ) -> Result<ResolvedWord, GenerationError> {
        if !use_generation {
            let word = self.pick_fixed(&mut *rng.lock().await);
            return Ok(ResolvedWord {
                word,
                fallback: false,
            });
        }

        match self.generate(topic).await {
            Ok(word) => {
                debug!(topic = topic.unwrap_or_default(), "generated word");
                Ok(ResolvedWord {
                    word,
                    fallback: false,
                })
            }
            Err(err) if self.mode == FallbackMode::Lenient => {
                warn!(error = %err, "word generation failed; falling back to fixed pool");
                let word = self.pick_fixed(&mut *rng.lock().await);
                Ok(ResolvedWord {
                    word,
                    fallback: true,
                })
            }
            Err(err) => {
                warn!(error = %err, "word generation failed");
                Err(err)
            }
        }
    }
}

fn user_prompt(topic: Option<&str>) -> String {
    let topic = topic.map(str::trim).filter(|topic| !topic.is_empty());

    let mut prompt = String::from(
        "Give ONE Arabic word or short term (three words at most) for the party game \
\"برا السالفة\"",
    );
    match topic {
        Some(topic) => {
            prompt.push_str(" on the topic: ");
            prompt.push_str(topic);
        }
        None => prompt.push_str(" from any category (places, objects, food, jobs, activities)"),
    }
    prompt.push_str(
        ".\n\nIt must be common and familiar, neither too easy nor too hard to describe \
without saying it, and suitable for a guessing game.\n\n\
Answer with the Arabic word only: no explanation, no punctuation, no extra text.",
    );
    prompt
}
