/// Single-client round state machine.
pub mod round;

use std::sync::Arc;

use rand::{SeedableRng, rngs::StdRng};
use thiserror::Error;
use tokio::sync::Mutex;

use crate::{
    config::AppConfig,
    dao::{
        generator::{GeneratorError, OpenAiGenerator, TextGenerator},
        session_store::{MemorySessionStore, SessionStore},
    },
    services::word_source::{EmptyPool, FixedPool, WordSource},
};

/// Handle cloned into every handler.
pub type SharedState = Arc<AppState>;

/// Failures while assembling the application state.
#[derive(Debug, Error)]
pub enum StateInitError {
    /// The completion client could not be built.
    #[error("failed to build word generator")]
    Generator(#[from] GeneratorError),
    /// The configured word pool has no usable term.
    #[error(transparent)]
    Pool(#[from] EmptyPool),
}

/// Central application state: word source, per-client sessions and the shared random source.
pub struct AppState {
    config: AppConfig,
    words: WordSource,
    sessions: Arc<dyn SessionStore>,
    rng: Mutex<StdRng>,
}

impl AppState {
    /// Build the production state: OpenAI-compatible generator and in-memory sessions.
    pub fn new(config: AppConfig) -> Result<SharedState, StateInitError> {
        let generator = Arc::new(OpenAiGenerator::new(config.generation.client_config())?);
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_parts(
            config,
            generator,
            Arc::new(MemorySessionStore::new()),
            rng,
        )
    }

    /// Assemble the state from explicit collaborators.
    pub fn with_parts(
        config: AppConfig,
        generator: Arc<dyn TextGenerator>,
        sessions: Arc<dyn SessionStore>,
        rng: StdRng,
    ) -> Result<SharedState, StateInitError> {
        let pool = FixedPool::new(config.terms.clone())?;
        let words = WordSource::new(generator, pool, &config);

        Ok(Arc::new(Self {
            config,
            words,
            sessions,
            rng: Mutex::new(rng),
        }))
    }

    /// Effective configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Word source applying the configured fallback policy.
    pub fn words(&self) -> &WordSource {
        &self.words
    }

    /// Per-client round sessions.
    pub fn sessions(&self) -> &dyn SessionStore {
        self.sessions.as_ref()
    }

    /// Random source shared by word picks and excluded-player rolls.
    pub fn rng(&self) -> &Mutex<StdRng> {
        &self.rng
    }
}
