use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone)]
pub struct RecipeConfig {
    pub common: core_config::Config,
    pub provider: ProviderKind,
    pub google: GoogleConfig,
    pub models: ModelConfig,
    pub cors: CorsConfig,
    /// OTLP collector endpoint; tracing export is off when unset.
    pub otlp_endpoint: Option<String>,
}

/// Which text generation backend serves `/generate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Gemini,
    Mock,
}

impl std::str::FromStr for ProviderKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(ProviderKind::Gemini),
            "mock" => Ok(ProviderKind::Mock),
            other => Err(AppError::ConfigError(anyhow::anyhow!(
                "GENAI_PROVIDER must be 'gemini' or 'mock', got '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub api_key: Secret<String>,
    pub api_base: String,
}

#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Model identifier passed to the provider (e.g., gemini-2.5-flash)
    pub text_model: String,
    pub request_timeout_secs: u64,
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct CorsConfig {
    /// Allowed origins. Empty means any origin.
    pub allowed_origins: Vec<String>,
}

impl RecipeConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        Self::from_lookup(common_config, |key| env::var(key).ok())
    }

    /// Build the config from an arbitrary variable source.
    pub fn from_lookup<F>(common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars {
            lookup: &lookup,
            is_prod: lookup("ENVIRONMENT").as_deref() == Some("prod"),
        };

        let provider: ProviderKind = vars.get("GENAI_PROVIDER", Some("gemini"))?.parse()?;

        let api_key = vars
            .optional("GOOGLE_API_KEY")
            .or_else(|| vars.optional("GEMINI_API_KEY"))
            .unwrap_or_default();
        if provider == ProviderKind::Gemini && api_key.is_empty() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "GOOGLE_API_KEY (or GEMINI_API_KEY) is required but not set"
            )));
        }

        Ok(RecipeConfig {
            common,
            provider,
            google: GoogleConfig {
                api_key: Secret::new(api_key),
                api_base: vars.get("GEMINI_API_BASE", Some(DEFAULT_API_BASE))?,
            },
            models: ModelConfig {
                text_model: vars.get("GENAI_TEXT_MODEL", Some(DEFAULT_TEXT_MODEL))?,
                request_timeout_secs: parse_var(
                    "GENAI_REQUEST_TIMEOUT_SECS",
                    &vars.get(
                        "GENAI_REQUEST_TIMEOUT_SECS",
                        Some(&DEFAULT_REQUEST_TIMEOUT_SECS.to_string()),
                    )?,
                )?,
                temperature: vars
                    .optional("GENAI_TEMPERATURE")
                    .map(|v| parse_var("GENAI_TEMPERATURE", &v))
                    .transpose()?,
                max_output_tokens: vars
                    .optional("GENAI_MAX_OUTPUT_TOKENS")
                    .map(|v| parse_var("GENAI_MAX_OUTPUT_TOKENS", &v))
                    .transpose()?,
            },
            cors: CorsConfig {
                allowed_origins: vars
                    .optional("CORS_ALLOWED_ORIGINS")
                    .map(|v| parse_origins(&v))
                    .unwrap_or_default(),
            },
            otlp_endpoint: vars.optional("OTLP_ENDPOINT"),
        })
    }
}

struct Vars<'a, F> {
    lookup: &'a F,
    is_prod: bool,
}

impl<F> Vars<'_, F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Non-empty value of `key`, if any.
    fn optional(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// In production every key read here must be set explicitly.
    fn get(&self, key: &str, default: Option<&str>) -> Result<String, AppError> {
        match self.optional(key) {
            Some(val) => Ok(val),
            None => {
                if self.is_prod {
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
}

fn parse_var<T>(key: &str, value: &str) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e| {
        AppError::ConfigError(anyhow::anyhow!("{} has invalid value '{}': {}", key, value, e))
    })
}

fn parse_origins(value: &str) -> Vec<String> {
    let origins: Vec<String> = value
        .split(',')
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .collect();

    if origins.iter().any(|o| o == "*") {
        Vec::new()
    } else {
        origins
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<RecipeConfig, AppError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RecipeConfig::from_lookup(core_config::Config::default(), |key| map.get(key).cloned())
    }

    #[test]
    fn missing_api_key_is_fatal_for_gemini() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
        assert!(err.to_string().contains("GOOGLE_API_KEY"));
    }

    #[test]
    fn blank_api_key_is_treated_as_missing() {
        assert!(load(&[("GOOGLE_API_KEY", "   ")]).is_err());
    }

    #[test]
    fn gemini_api_key_is_accepted_as_fallback() {
        let config = load(&[("GEMINI_API_KEY", "legacy-key")]).unwrap();
        assert_eq!(config.google.api_key.expose_secret(), "legacy-key");
    }

    #[test]
    fn defaults_apply_outside_production() {
        let config = load(&[("GOOGLE_API_KEY", "k")]).unwrap();
        assert_eq!(config.provider, ProviderKind::Gemini);
        assert_eq!(config.models.text_model, DEFAULT_TEXT_MODEL);
        assert_eq!(config.google.api_base, DEFAULT_API_BASE);
        assert_eq!(config.models.request_timeout_secs, 120);
        assert_eq!(config.models.temperature, None);
        assert!(config.cors.allowed_origins.is_empty());
        assert!(config.otlp_endpoint.is_none());
    }

    #[test]
    fn model_identifier_is_configurable() {
        let config = load(&[("GOOGLE_API_KEY", "k"), ("GENAI_TEXT_MODEL", "gemini-pro")]).unwrap();
        assert_eq!(config.models.text_model, "gemini-pro");
    }

    #[test]
    fn mock_provider_needs_no_api_key() {
        let config = load(&[("GENAI_PROVIDER", "Mock")]).unwrap();
        assert_eq!(config.provider, ProviderKind::Mock);
    }

    #[test]
    fn unknown_provider_is_rejected() {
        assert!(load(&[("GENAI_PROVIDER", "openai")]).is_err());
    }

    #[test]
    fn production_requires_explicit_values() {
        let err = load(&[("ENVIRONMENT", "prod"), ("GOOGLE_API_KEY", "k")]).unwrap_err();
        assert!(err.to_string().contains("required in production"));
    }

    #[test]
    fn invalid_numbers_are_reported() {
        let err = load(&[("GOOGLE_API_KEY", "k"), ("GENAI_TEMPERATURE", "warm")]).unwrap_err();
        assert!(err.to_string().contains("GENAI_TEMPERATURE"));
    }

    #[test]
    fn generation_params_are_parsed() {
        let config = load(&[
            ("GOOGLE_API_KEY", "k"),
            ("GENAI_TEMPERATURE", "0.7"),
            ("GENAI_MAX_OUTPUT_TOKENS", "2048"),
            ("GENAI_REQUEST_TIMEOUT_SECS", "30"),
        ])
        .unwrap();
        assert_eq!(config.models.temperature, Some(0.7));
        assert_eq!(config.models.max_output_tokens, Some(2048));
        assert_eq!(config.models.request_timeout_secs, 30);
    }

    #[test]
    fn cors_origins_are_split_and_wildcard_means_any() {
        assert_eq!(
            parse_origins("https://a.example, https://b.example ,"),
            vec!["https://a.example", "https://b.example"]
        );
        assert!(parse_origins("*").is_empty());
    }
}
