use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub llm: LlmSettings,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub streaming: StreamingSettings,
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

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 5000 }

/// Chat-completion gateway settings
///
/// Retry count and per-attempt timeout are fixed in the decision client and
/// are not configurable.
#[derive(Clone, Deserialize)]
pub struct LlmSettings {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub api_keys: Vec<String>,
    /// Prefix for the Authorization header, e.g. `Bearer`. Unset sends the raw key.
    #[serde(default)]
    pub auth_scheme: Option<String>,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_keys: Vec::new(),
            auth_scheme: None,
        }
    }
}

impl std::fmt::Debug for LlmSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmSettings")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_keys", &self.api_keys.len())
            .field("auth_scheme", &self.auth_scheme)
            .finish()
    }
}

fn default_endpoint() -> String { "http://localhost:8000/v1/chat/completions".to_string() }
fn default_model() -> String { "DeepSeek-V3".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct DataSettings {
    #[serde(default = "default_users_path")]
    pub users_path: String,
    #[serde(default = "default_products_path")]
    pub products_path: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            users_path: default_users_path(),
            products_path: default_products_path(),
            output_dir: default_output_dir(),
        }
    }
}

fn default_users_path() -> String { "users.json".to_string() }
fn default_products_path() -> String { "products.json".to_string() }
fn default_output_dir() -> String { ".".to_string() }

/// Pacing between events pushed to the browser
#[derive(Debug, Clone, Deserialize)]
pub struct StreamingSettings {
    #[serde(default = "default_filter_pacing_ms")]
    pub filter_pacing_ms: u64,
    #[serde(default = "default_copy_pacing_ms")]
    pub copy_pacing_ms: u64,
}

impl Default for StreamingSettings {
    fn default() -> Self {
        Self {
            filter_pacing_ms: default_filter_pacing_ms(),
            copy_pacing_ms: default_copy_pacing_ms(),
        }
    }
}

fn default_filter_pacing_ms() -> u64 { 100 }
fn default_copy_pacing_ms() -> u64 { 30 }

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
fn default_log_format() -> String { "pretty".to_string() }

fn environment() -> Environment {
    // e.g., PFILTER__LLM__ENDPOINT -> llm.endpoint
    // PFILTER__LLM__API_KEYS is a comma separated list
    Environment::with_prefix("PFILTER")
        .prefix_separator("__")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("llm.api_keys")
        .try_parsing(true)
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with PFILTER__)
    /// 5. GPT_URL / GPT_MODEL / GPT_API_KEYS
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(environment())
            .build()?;

        let settings = apply_gateway_overrides(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        let settings = apply_gateway_overrides(settings)?;

        settings.try_deserialize()
    }
}

/// Apply the short gateway variables on top of everything else
fn apply_gateway_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(url) = env::var("GPT_URL") {
        builder = builder.set_override("llm.endpoint", url)?;
    }
    if let Ok(model) = env::var("GPT_MODEL") {
        builder = builder.set_override("llm.model", model)?;
    }
    if let Ok(keys) = env::var("GPT_API_KEYS") {
        builder = builder.set_override("llm.api_keys", split_keys(&keys))?;
    }

    builder.build()
}

fn split_keys(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}
