//! Process configuration: optional TOML file, then `GITME_*` environment

use std::env;
use std::net::SocketAddr;
use std::path::Path;

use config::{Config, Environment, File, Map};
use gitme_domain::{
    GenerationConfig, GitHubSettings, HttpConfig, PipelineLimits, ProviderSettings, RetryConfig,
};
use serde::Deserialize;

/// Configuration file read when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "gitme.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 3014 }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProvidersConfig {
    pub gemini: ProviderSettings,
    pub groq: ProviderSettings,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self { gemini: ProviderSettings::gemini(), groq: ProviderSettings::groq() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub github: GitHubSettings,
    pub providers: ProvidersConfig,
    pub generation: GenerationConfig,
    pub retry: RetryConfig,
    pub limits: PipelineLimits,
    pub http: HttpConfig,
}

/// Environment variables standing in for the process environment
pub type EnvVars = Map<String, String>;

impl AppConfig {
    /// Load from `path` (or [`DEFAULT_CONFIG_FILE`] when it exists) and the
    /// process environment. Callers load `.env` first.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        Self::load_with(path, None)
    }

    /// Load with `vars` in place of the process environment when given.
    fn load_with(path: Option<&Path>, vars: Option<EnvVars>) -> anyhow::Result<Self> {
        let defaults = ProvidersConfig::default();
        let mut builder = Config::builder()
            .set_default("providers.gemini.base_url", defaults.gemini.base_url)?
            .set_default("providers.gemini.model", defaults.gemini.model)?
            .set_default("providers.groq.base_url", defaults.groq.base_url)?
            .set_default("providers.groq.model", defaults.groq.model)?;

        builder = match path {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };

        let mut config: AppConfig = builder
            .add_source(
                Environment::with_prefix("GITME")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(vars.clone()),
            )
            .build()?
            .try_deserialize()?;

        config.apply_conventional_env(|key| match &vars {
            Some(vars) => vars.get(key).cloned(),
            None => env::var(key).ok(),
        });
        Ok(config)
    }

    /// Fold in `GEMINI_API_KEY`, `GROQ_API_KEY` and `GITHUB_TOKEN` when the
    /// structured keys are unset.
    fn apply_conventional_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let lookup = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if self.providers.gemini.api_key.is_none() {
            self.providers.gemini.api_key = lookup("GEMINI_API_KEY");
        }
        if self.providers.groq.api_key.is_none() {
            self.providers.groq.api_key = lookup("GROQ_API_KEY");
        }
        if self.github.token.is_none() {
            self.github.token = lookup("GITHUB_TOKEN");
        }
    }
}
