//! Application-level configuration loading: fixed word pool, fallback policy and generation settings.

use std::{env, fs, io::ErrorKind, path::PathBuf, time::Duration};

use serde::Deserialize;
use tracing::{info, warn};

use crate::{
    dao::generator::{DEFAULT_BASE_URL, DEFAULT_MODEL, OpenAiConfig},
    services::word_source::FallbackMode,
};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "BARA_ALSALFA_CONFIG_PATH";
const API_KEY_ENV: &str = "OPENAI_API_KEY";
const BASE_URL_ENV: &str = "OPENAI_BASE_URL";
const MODEL_ENV: &str = "OPENAI_MODEL";
const FALLBACK_MODE_ENV: &str = "BARA_ALSALFA_FALLBACK_MODE";
const RNG_SEED_ENV: &str = "BARA_ALSALFA_RNG_SEED";

const DEFAULT_TEMPERATURE: f32 = 0.9;
const DEFAULT_MAX_TOKENS: u32 = 20;
const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_SESSION_IDLE: Duration = Duration::from_secs(6 * 60 * 60);

/// Settings for the external word generation call.
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    /// API root of the OpenAI-compatible provider.
    pub base_url: String,
    /// Chat model asked for the word.
    pub model: String,
    /// Only ever read from the environment.
    pub api_key: Option<String>,
    /// Sampling temperature.
    pub temperature: f32,
    /// Upper bound on the completion length.
    pub max_tokens: u32,
    /// Deadline for a single generation, never zero.
    pub timeout: Duration,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            model: DEFAULT_MODEL.into(),
            api_key: None,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: DEFAULT_GENERATION_TIMEOUT,
        }
    }
}

impl GenerationSettings {
    /// Connection settings for the completion client.
    pub fn client_config(&self) -> OpenAiConfig {
        OpenAiConfig {
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            api_key: self.api_key.clone(),
        }
    }
}

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    /// Fixed pool used when generation is disabled or fails. Never empty.
    pub terms: Vec<String>,
    /// What happens when generation fails.
    pub fallback_mode: FallbackMode,
    /// Completion client settings.
    pub generation: GenerationSettings,
    /// Sessions idle for longer than this are purged.
    pub session_idle: Duration,
    /// Seed for the shared random source; `None` seeds from the OS.
    pub rng_seed: Option<u64>,
}

impl AppConfig {
    /// Load the configuration from disk and the environment, falling back to built-in defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        let config = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let app_config: Self = raw.into();
                    info!(
                        path = %path.display(),
                        terms = app_config.terms.len(),
                        "loaded configuration"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        };

        config.with_overrides(|key| env::var(key).ok())
    }

    /// Apply environment-style overrides resolved through `lookup`.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(api_key) = read(API_KEY_ENV) {
            self.generation.api_key = Some(api_key);
        }
        if let Some(base_url) = read(BASE_URL_ENV) {
            self.generation.base_url = base_url;
        }
        if let Some(model) = read(MODEL_ENV) {
            self.generation.model = model;
        }
        if let Some(mode) = read(FALLBACK_MODE_ENV) {
            match mode.parse() {
                Ok(mode) => self.fallback_mode = mode,
                Err(err) => warn!(value = %mode, error = %err, "ignoring fallback mode override"),
            }
        }
        if let Some(seed) = read(RNG_SEED_ENV) {
            match seed.trim().parse() {
                Ok(seed) => self.rng_seed = Some(seed),
                Err(err) => warn!(value = %seed, error = %err, "ignoring rng seed override"),
            }
        }

        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            terms: default_terms(),
            fallback_mode: FallbackMode::default(),
            generation: GenerationSettings::default(),
            session_idle: DEFAULT_SESSION_IDLE,
            rng_seed: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    terms: Option<Vec<String>>,
    fallback_mode: Option<FallbackMode>,
    generation: RawGeneration,
    session_idle_secs: Option<u64>,
    rng_seed: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawGeneration {
    base_url: Option<String>,
    model: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    timeout_secs: Option<u64>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = Self::default();

        let terms = match value.terms {
            Some(terms) => {
                let terms = terms
                    .into_iter()
                    .map(|term| term.trim().to_owned())
                    .filter(|term| !term.is_empty())
                    .collect::<Vec<_>>();
                if terms.is_empty() {
                    warn!("configured word pool is empty; using built-in terms");
                    defaults.terms
                } else {
                    terms
                }
            }
            None => defaults.terms,
        };

        let generation = GenerationSettings {
            base_url: value
                .generation
                .base_url
                .unwrap_or(defaults.generation.base_url),
            model: value.generation.model.unwrap_or(defaults.generation.model),
            api_key: None,
            temperature: value
                .generation
                .temperature
                .unwrap_or(defaults.generation.temperature),
            max_tokens: value
                .generation
                .max_tokens
                .unwrap_or(defaults.generation.max_tokens),
            timeout: match value.generation.timeout_secs {
                Some(0) => {
                    warn!("generation timeout of 0s would fail every call; using the default");
                    defaults.generation.timeout
                }
                Some(secs) => Duration::from_secs(secs),
                None => defaults.generation.timeout,
            },
        };

        Self {
            terms,
            fallback_mode: value.fallback_mode.unwrap_or(defaults.fallback_mode),
            generation,
            session_idle: value
                .session_idle_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.session_idle),
            rng_seed: value.rng_seed,
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Built-in word pool shipped with the binary.
fn default_terms() -> Vec<String> {
    [
        "قهوة",
        "سيارة",
        "مدرسة",
        "مطار",
        "مطعم",
        "سينما",
        "بحر",
        "جبل",
        "كتاب",
        "هاتف",
        "كمبيوتر",
        "مستشفى",
        "فندق",
        "حديقة",
        "ملعب",
        "سوق",
        "مكتبة",
        "جامعة",
        "شاطئ",
        "صحراء",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
