use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Generation limits and sampling parameters are fixed at build time.
pub const MAX_SUBSTITUTES: usize = 5;
pub const MAX_RECIPES: usize = 5;
pub const MAX_INGREDIENTS: usize = 5;
pub const TEMPERATURE: f32 = 0.3;
pub const TOP_P: f32 = 0.9;
pub const REPETITION_PENALTY: f32 = 1.1;

const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000";
const DEFAULT_PERSISTENCE_TIMEOUT_SECS: u64 = 10;
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct RecipeConfig {
    pub common: core_config::Config,
    pub supabase: SupabaseConfig,
    pub models: ModelConfig,
    pub generation: GenerationConfig,
    pub paths: PathConfig,
    pub cors: CorsConfig,
    pub persistence: PersistenceConfig,
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    /// Project URL without trailing slash, e.g. `https://xyz.supabase.co`.
    pub url: String,
    /// Service-role key; required for inserts.
    pub service_key: Secret<String>,
}

#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub openai_model: String,
    pub gemini_model: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    pub max_substitutes: usize,
    pub max_recipes: usize,
    pub max_ingredients: usize,
    pub temperature: f32,
    pub top_p: f32,
    pub repetition_penalty: f32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_substitutes: MAX_SUBSTITUTES,
            max_recipes: MAX_RECIPES,
            max_ingredients: MAX_INGREDIENTS,
            temperature: TEMPERATURE,
            top_p: TOP_P,
            repetition_penalty: REPETITION_PENALTY,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PathConfig {
    pub base_dir: PathBuf,
    pub dataset_path: PathBuf,
}

impl Default for PathConfig {
    fn default() -> Self {
        let base_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let dataset_path = base_dir.join("dataset").join("ingredients.json");
        Self {
            base_dir,
            dataset_path,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct PersistenceConfig {
    /// How the `/suggest` message log is issued.
    pub mode: PersistenceMode,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Base URL of the ingredient service. Unset means substitutions answer
    /// with an empty result.
    pub ingredient_service_url: Option<String>,
    /// Base URL of the recipe service. Unset means no suggestions.
    pub recipe_service_url: Option<String>,
    pub timeout: Duration,
}

/// Durability vs. latency choice for best-effort writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PersistenceMode {
    /// Wait for the insert before continuing; failures are still only logged.
    #[default]
    Awaited,
    /// Spawn the insert and continue immediately.
    Background,
}

impl FromStr for PersistenceMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "awaited" | "await" | "sync" => Ok(PersistenceMode::Awaited),
            "background" | "fire_and_forget" | "async" => Ok(PersistenceMode::Background),
            other => Err(AppError::ConfigError(anyhow::anyhow!(
                "PERSISTENCE_MODE must be 'awaited' or 'background', got '{}'",
                other
            ))),
        }
    }
}

impl RecipeConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        let supabase_url = get_env("SUPABASE_URL", None, is_prod)?;
        let service_key = get_env("SUPABASE_SERVICE_KEY", None, is_prod)?;

        Ok(RecipeConfig {
            common: common_config,
            supabase: SupabaseConfig {
                url: normalize_base_url("SUPABASE_URL", &supabase_url)?,
                service_key: Secret::new(service_key),
            },
            models: ModelConfig {
                openai_model: get_env("OPENAI_MODEL", Some(DEFAULT_OPENAI_MODEL), is_prod)?,
                gemini_model: get_env("GEMINI_MODEL", Some(DEFAULT_GEMINI_MODEL), is_prod)?,
            },
            generation: GenerationConfig::default(),
            paths: PathConfig::default(),
            cors: CorsConfig {
                allowed_origins: parse_origins(&get_env(
                    "CORS_ALLOWED_ORIGINS",
                    Some(DEFAULT_CORS_ORIGINS),
                    is_prod,
                )?)?,
            },
            persistence: PersistenceConfig {
                mode: env::var("PERSISTENCE_MODE")
                    .map(|v| v.parse::<PersistenceMode>())
                    .unwrap_or(Ok(PersistenceMode::default()))?,
                timeout: parse_secs(
                    "PERSISTENCE_TIMEOUT_SECS",
                    env::var("PERSISTENCE_TIMEOUT_SECS").ok(),
                    DEFAULT_PERSISTENCE_TIMEOUT_SECS,
                )?,
            },
            upstream: UpstreamConfig {
                ingredient_service_url: optional_url("INGREDIENT_SERVICE_URL")?,
                recipe_service_url: optional_url("RECIPE_SERVICE_URL")?,
                timeout: parse_secs(
                    "UPSTREAM_TIMEOUT_SECS",
                    env::var("UPSTREAM_TIMEOUT_SECS").ok(),
                    DEFAULT_UPSTREAM_TIMEOUT_SECS,
                )?,
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

fn optional_url(key: &str) -> Result<Option<String>, AppError> {
    match env::var(key) {
        Ok(val) if !val.trim().is_empty() => Ok(Some(normalize_base_url(key, &val)?)),
        _ => Ok(None),
    }
}

/// Validates an absolute http(s) URL and strips the trailing slash.
pub fn normalize_base_url(key: &str, raw: &str) -> Result<String, AppError> {
    let trimmed = raw.trim();
    let url = reqwest::Url::parse(trimmed)
        .map_err(|e| AppError::ConfigError(anyhow::anyhow!("{} is not a valid URL: {}", key, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(AppError::ConfigError(anyhow::anyhow!(
            "{} must use http or https",
            key
        )));
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}

/// Splits a comma-separated origin list. A wildcard is refused because the
/// CORS layer allows credentials.
pub fn parse_origins(raw: &str) -> Result<Vec<String>, AppError> {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect();

    if origins.iter().any(|o| o == "*") {
        return Err(AppError::ConfigError(anyhow::anyhow!(
            "CORS_ALLOWED_ORIGINS cannot contain '*' when credentials are allowed"
        )));
    }

    Ok(origins)
}

fn parse_secs(key: &str, raw: Option<String>, default: u64) -> Result<Duration, AppError> {
    match raw {
        None => Ok(Duration::from_secs(default)),
        Some(value) => value
            .trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!("{} must be whole seconds: {}", key, e))
            }),
    }
}
