use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, Map};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub gemini: GeminiSettings,
    #[serde(default)]
    pub analysis: AnalysisSettings,
    #[serde(default)]
    pub cors: CorsSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8000 }

#[derive(Clone, Deserialize)]
pub struct GeminiSettings {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,
    #[serde(default = "default_gemini_model")]
    pub model: String,
    #[serde(default = "default_gemini_request_timeout")]
    pub request_timeout_secs: u64,
}

// Keeps the key out of startup logs
impl std::fmt::Debug for GeminiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiSettings")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_gemini_base_url(),
            model: default_gemini_model(),
            request_timeout_secs: default_gemini_request_timeout(),
        }
    }
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta/models".to_string()
}
fn default_gemini_model() -> String { "gemini-2.5-flash".to_string() }
fn default_gemini_request_timeout() -> u64 { 120 }

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisSettings {
    /// Deadline for one complete analysis, across all provider calls
    #[serde(default = "default_analysis_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,
    #[serde(default = "default_max_content_chars")]
    pub max_content_chars: usize,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_analysis_timeout(),
            fetch_timeout_secs: default_fetch_timeout(),
            max_content_chars: default_max_content_chars(),
            user_agent: default_user_agent(),
        }
    }
}

impl AnalysisSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_analysis_timeout() -> u64 { 300 }
fn default_fetch_timeout() -> u64 { 30 }
fn default_max_content_chars() -> usize { 500_000 }
fn default_user_agent() -> String {
    concat!("company-profiler/", env!("CARGO_PKG_VERSION")).to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    /// Allowed browser origins; empty means any origin
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://localhost:5174".to_string(),
        "http://localhost:3000".to_string(),
    ]
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with PROFILER__)
    /// 5. `GEMINI_API_KEY`
    pub fn load() -> Result<Self, ConfigError> {
        let files = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false));

        Self::build(files, None)
    }

    /// Load configuration from a custom path
    ///
    /// The file replaces `config/default.toml` and `config/local.toml`; the
    /// environment layers apply exactly as in [`Settings::load`].
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::build(Config::builder().add_source(File::from(path.as_ref())), None)
    }

    /// Environment layers, overrides and validation shared by every loader
    ///
    /// `vars` replaces the process environment when set.
    fn build(
        files: ConfigBuilder<DefaultState>,
        vars: Option<Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let settings = files
            // e.g., PROFILER__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("PROFILER")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .try_parsing(true)
                    .source(vars.clone()),
            )
            .build()?;

        let settings = apply_env_overrides(settings, |key| match &vars {
            Some(vars) => vars.get(key).cloned(),
            None => std::env::var(key).ok(),
        })?;

        let settings: Settings = settings.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Startup checks that cannot be expressed as serde defaults
    ///
    /// A missing Gemini credential is a configuration failure, never a
    /// per-request one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gemini.api_key.trim().is_empty() {
            return Err(ConfigError::Message(
                "GEMINI_API_KEY is required (or set gemini.api_key)".to_string(),
            ));
        }
        if self.analysis.timeout_secs == 0 {
            return Err(ConfigError::Message(
                "analysis.timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Apply well-known unprefixed environment variables on top of `settings`
fn apply_env_overrides<F>(settings: Config, lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut builder = Config::builder().add_source(settings);

    if let Some(api_key) = lookup("GEMINI_API_KEY") {
        if !api_key.trim().is_empty() {
            builder = builder.set_override("gemini.api_key", api_key)?;
        }
    }
    if let Some(level) = lookup("LOG_LEVEL") {
        builder = builder.set_override("logging.level", level)?;
    }
    if let Some(format) = lookup("LOG_FORMAT") {
        builder = builder.set_override("logging.format", format)?;
    }

    builder.build()
}

/// Settings for the browser-side / terminal client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub api_url: String,
}

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl ClientSettings {
    /// `PROFILER_API_URL`, then `VITE_API_URL`, then the local dev address
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = ["PROFILER_API_URL", "VITE_API_URL"]
            .iter()
            .filter_map(|key| lookup(key))
            .map(|v| v.trim().to_string())
            .find(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Self { api_url }
    }
}
